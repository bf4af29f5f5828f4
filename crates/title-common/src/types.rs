use std::collections::hash_map::{self, HashMap};
use std::fmt;

/// One page of the corpus, as far as the title statistics are concerned.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentRecord {
    pub namespace: i64,
    /// Target of a redirect page; empty for regular pages.
    pub redirect_title: String,
    pub title: String,
}

impl DocumentRecord {
    /// A regular main-namespace article.
    pub fn article(title: impl Into<String>) -> Self {
        Self {
            namespace: 0,
            redirect_title: String::new(),
            title: title.into(),
        }
    }

    /// A main-namespace page redirecting to `target`.
    pub fn redirect(title: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            namespace: 0,
            redirect_title: target.into(),
            title: title.into(),
        }
    }

    /// A page in namespace `namespace`.
    pub fn in_namespace(namespace: i64, title: impl Into<String>) -> Self {
        Self {
            namespace,
            redirect_title: String::new(),
            title: title.into(),
        }
    }

    pub fn is_redirect(&self) -> bool {
        !self.redirect_title.is_empty()
    }
}

/// Occurrence count per canonical token.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `token`.
    pub fn record(&mut self, token: String) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.counts.iter(),
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for (token, count) in iter {
            *counts.entry(token.into()).or_insert(0) += count;
        }
        Self { counts }
    }
}

pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, u64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, u64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(token, count)| (token.as_str(), *count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = (&'a str, u64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A row of the final report.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedEntry {
    pub token: String,
    pub count: u64,
    /// Share of all counted tokens, 0.0..=100.0.
    pub percentage: f64,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{:.6}", self.token, self.count, self.percentage)
    }
}
