use std::fmt;

use crate::filter::{self, Rejection};
use crate::normalization::normalize;
use crate::tokenization::word_spans;
use crate::types::{DocumentRecord, FrequencyTable};

const PROGRESS_INTERVAL: u64 = 100_000;

/// How the document stream ended.
#[derive(Debug)]
pub enum Termination<E> {
    /// The source ran out of documents.
    Exhausted,
    /// The continue signal asked to stop before the source was exhausted.
    Cancelled,
    /// The source reported an error; documents after it were not read.
    Aborted(E),
}

impl<E> Termination<E> {
    pub fn is_complete(&self) -> bool {
        matches!(self, Termination::Exhausted)
    }
}

/// Counters collected while folding documents into the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateStats {
    pub documents: u64,
    pub accepted: u64,
    pub skipped_namespace: u64,
    pub skipped_redirect: u64,
    pub tokens: u64,
}

/// Result of one aggregation run.
#[derive(Debug)]
pub struct Aggregation<E> {
    pub table: FrequencyTable,
    pub stats: AggregateStats,
    pub termination: Termination<E>,
}

/// Count the canonical word tokens of every accepted title.
///
/// Stops at the first error from the source and returns what was counted up to
/// that point.
pub fn aggregate<I, E>(documents: I) -> FrequencyTable
where
    I: IntoIterator<Item = Result<DocumentRecord, E>>,
    E: fmt::Display,
{
    aggregate_while(documents, || true).table
}

/// [`aggregate`] with a continue signal, checked before each document is
/// requested from the source.
pub fn aggregate_while<I, E, F>(documents: I, mut keep_going: F) -> Aggregation<E>
where
    I: IntoIterator<Item = Result<DocumentRecord, E>>,
    E: fmt::Display,
    F: FnMut() -> bool,
{
    let mut table = FrequencyTable::new();
    let mut stats = AggregateStats::default();
    let mut documents = documents.into_iter();

    let termination = loop {
        if !keep_going() {
            break Termination::Cancelled;
        }
        let doc = match documents.next() {
            None => break Termination::Exhausted,
            Some(Err(err)) => {
                tracing::debug!(error = %err, "document source failed, keeping partial table");
                break Termination::Aborted(err);
            }
            Some(Ok(doc)) => doc,
        };

        stats.documents += 1;
        if stats.documents % PROGRESS_INTERVAL == 0 {
            tracing::info!(
                documents = stats.documents,
                distinct = table.len(),
                "aggregation progress"
            );
        }

        match filter::check(&doc) {
            Err(Rejection::Namespace(_)) => stats.skipped_namespace += 1,
            Err(Rejection::Redirect) => stats.skipped_redirect += 1,
            Ok(()) => {
                stats.accepted += 1;
                stats.tokens += count_title(&mut table, &doc.title);
            }
        }
    };

    tracing::info!(
        documents = stats.documents,
        accepted = stats.accepted,
        skipped_namespace = stats.skipped_namespace,
        skipped_redirect = stats.skipped_redirect,
        tokens = stats.tokens,
        distinct = table.len(),
        complete = termination.is_complete(),
        "aggregation finished"
    );

    Aggregation {
        table,
        stats,
        termination,
    }
}

/// Fold the word tokens of one title into `table`, returning how many were added.
pub fn count_title(table: &mut FrequencyTable, title: &str) -> u64 {
    let mut added = 0;
    for word in word_spans(title) {
        table.record(normalize(word));
        added += 1;
    }
    added
}
