use title_common::ranking::*;
use title_common::types::{FrequencyTable, RankedEntry};

fn table(entries: &[(&str, u64)]) -> FrequencyTable {
    entries.iter().map(|(t, c)| (*t, *c)).collect()
}

fn render(entries: &[RankedEntry]) -> String {
    let mut out = Vec::new();
    write_report(entries, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn rank_orders_by_count_then_token() {
    let ranked = rank(&table(&[("a", 3), ("b", 3), ("c", 5)]));
    let order: Vec<(&str, u64)> = ranked.iter().map(|e| (e.token.as_str(), e.count)).collect();
    assert_eq!(order, vec![("c", 5), ("a", 3), ("b", 3)]);
}

#[test]
fn rank_percentages() {
    let ranked = rank(&table(&[("x", 1), ("y", 3)]));
    assert_eq!(render(&ranked), "y\t3\t75.000000\nx\t1\t25.000000\n");
}

#[test]
fn rank_empty_table() {
    assert!(rank(&FrequencyTable::new()).is_empty());
    assert_eq!(render(&[]), "");
}

#[test]
fn rank_all_zero_counts() {
    assert!(rank(&table(&[("ghost", 0)])).is_empty());
}

#[test]
fn rank_tie_break_is_bytewise() {
    // 'Z' < 'a' < 'é' in byte order
    let ranked = rank(&table(&[("\u{00E9}t\u{00E9}", 2), ("apple", 2), ("Zebra", 2)]));
    let tokens: Vec<&str> = ranked.iter().map(|e| e.token.as_str()).collect();
    assert_eq!(tokens, vec!["Zebra", "apple", "\u{00E9}t\u{00E9}"]);
}

#[test]
fn rank_is_deterministic() {
    let entries: Vec<(String, u64)> = (0..200).map(|i| (format!("tok{i}"), (i % 7) as u64 + 1)).collect();
    let first: FrequencyTable = entries.iter().cloned().collect();
    let second: FrequencyTable = entries.iter().rev().cloned().collect();
    assert_eq!(render(&rank(&first)), render(&rank(&second)));
}

#[test]
fn percentages_sum_to_hundred() {
    let ranked = rank(&table(&[("a", 1), ("b", 2), ("c", 3), ("d", 7)]));
    let sum: f64 = ranked.iter().map(|e| e.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);
}

#[test]
fn percentage_small_share() {
    assert_eq!(format!("{:.6}", percentage(1, 3)), "33.333333");
    assert_eq!(format!("{:.6}", percentage(1, 3_000_000)), "0.000033");
}

#[test]
fn ranked_entry_display() {
    let entry = RankedEntry {
        token: "river".into(),
        count: 12,
        percentage: 0.5,
    };
    assert_eq!(entry.to_string(), "river\t12\t0.500000");
}

#[test]
fn table_from_iter_merges_duplicates() {
    let t = table(&[("a", 1), ("a", 2)]);
    assert_eq!(t.count("a"), 3);
    assert_eq!(t.len(), 1);
}
