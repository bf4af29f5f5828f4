use proptest::prelude::*;
use title_common::aggregation::aggregate;
use title_common::normalization;
use title_common::ranking::{rank, write_report};
use title_common::tokenization::word_spans;
use title_common::types::{DocumentRecord, FrequencyTable};

proptest! {
    #[test]
    fn normalize_is_idempotent(s in ".*") {
        let once = normalization::normalize(&s);
        let twice = normalization::normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn normalize_is_deterministic(s in ".{0,64}") {
        prop_assert_eq!(normalization::normalize(&s), normalization::normalize(&s));
    }

    #[test]
    fn normalize_ignores_ascii_case(s in "[a-zA-Z0-9 ]{0,64}") {
        prop_assert_eq!(
            normalization::normalize(&s.to_uppercase()),
            normalization::normalize(&s.to_lowercase())
        );
    }

    #[test]
    fn table_total_matches_word_spans(titles in prop::collection::vec(".{0,40}", 0..20)) {
        let expected: usize = titles.iter().map(|t| word_spans(t).count()).sum();
        let docs = titles.iter().map(|t| Ok::<_, String>(DocumentRecord::article(t.as_str())));
        let table = aggregate(docs);
        prop_assert_eq!(table.total(), expected as u64);
    }

    #[test]
    fn filtered_documents_add_nothing(
        titles in prop::collection::vec("[a-zA-Z ]{1,30}", 0..10),
        ns in 1i64..=15,
    ) {
        let docs = titles.iter().flat_map(|t| {
            [
                Ok::<_, String>(DocumentRecord::in_namespace(ns, t.as_str())),
                Ok(DocumentRecord::redirect(t.as_str(), "Target")),
            ]
        });
        prop_assert!(aggregate(docs).is_empty());
    }

    #[test]
    fn rank_is_sorted_and_stable(counts in prop::collection::hash_map("[a-z]{1,6}", 1u64..50, 0..40)) {
        let table: FrequencyTable = counts.iter().map(|(t, c)| (t.as_str(), *c)).collect();
        let ranked = rank(&table);
        prop_assert_eq!(ranked.len(), counts.len());
        for pair in ranked.windows(2) {
            prop_assert!(
                pair[0].count > pair[1].count
                    || (pair[0].count == pair[1].count && pair[0].token < pair[1].token)
            );
        }

        let rebuilt: FrequencyTable = counts.iter().map(|(t, c)| (t.clone(), *c)).collect();
        let mut first = Vec::new();
        let mut second = Vec::new();
        write_report(&ranked, &mut first).unwrap();
        write_report(&rank(&rebuilt), &mut second).unwrap();
        prop_assert_eq!(first, second);
    }
}
