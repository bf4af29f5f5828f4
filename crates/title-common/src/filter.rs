use crate::types::DocumentRecord;

/// Namespace of regular content articles.
pub const MAIN_NAMESPACE: i64 = 0;

/// Why a document was left out of the statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// Talk pages, templates, categories and every other non-article namespace.
    Namespace(i64),
    /// The page only points at another page.
    Redirect,
}

/// Only non-redirect pages of the main namespace contribute tokens.
pub fn accept(doc: &DocumentRecord) -> bool {
    check(doc).is_ok()
}

/// Like [`accept`], but reports the first rule the document breaks.
pub fn check(doc: &DocumentRecord) -> Result<(), Rejection> {
    if doc.namespace != MAIN_NAMESPACE {
        return Err(Rejection::Namespace(doc.namespace));
    }
    if doc.is_redirect() {
        return Err(Rejection::Redirect);
    }
    Ok(())
}
