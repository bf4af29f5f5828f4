use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the dump reading layer.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("XML error at byte {position}: {source}")]
    Xml {
        position: usize,
        source: quick_xml::Error,
    },

    #[error("not a MediaWiki dump: {0}")]
    NotADump(String),

    #[error("malformed page: {0}")]
    Malformed(String),
}
