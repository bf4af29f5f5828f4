//! Word frequencies over the article titles of a MediaWiki dump.
//!
//! Titles of main-namespace, non-redirect pages are split at Unicode word
//! boundaries, each word is lowercased and stripped of nonspacing marks, and the
//! resulting tokens are counted and ranked by frequency. Dumps are read as a
//! stream (plain, bzip2 or xz) so the whole corpus never sits in memory.

pub mod aggregation;
pub mod corpus;
pub mod decompression;
pub mod error;
pub mod filter;
pub mod normalization;
pub mod ranking;
pub mod tokenization;
pub mod types;
