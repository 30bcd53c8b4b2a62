//! Text Extractor: converts an uploaded PDF into a single text blob.
//!
//! Pages are read one at a time with `lopdf` and concatenated in page order.
//! A page that cannot be read contributes nothing; a document that cannot be
//! loaded yields an empty string. Nothing in here returns an error.

use bytes::Bytes;
use lopdf::Document;
use tracing::{debug, warn};

/// Extracts the text of every page, in ascending page order, and concatenates it.
pub fn extract_text(bytes: &[u8]) -> String {
    extract_pages_or_else(bytes, extract_whole_document)
}

/// Per-page extraction; `fallback` only runs when the document loads but no page has text.
fn extract_pages_or_else<F>(bytes: &[u8], fallback: F) -> String
where
    F: FnOnce(&[u8]) -> String,
{
    let doc = match Document::load_mem(bytes) {
        Ok(doc) => doc,
        Err(e) => {
            warn!("PDF could not be loaded, treating as empty: {e}");
            return String::new();
        }
    };

    // BTreeMap keys: already in page order
    let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

    let text = concat_pages(page_numbers.iter().map(|&page| {
        match doc.extract_text(&[page]) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("Page {page} could not be read, skipping: {e}");
                None
            }
        }
    }));

    if text.trim().is_empty() && !page_numbers.is_empty() {
        debug!(
            "No text found on {} page(s), retrying with pdf-extract",
            page_numbers.len()
        );
        return fallback(bytes);
    }

    text
}

/// Runs `extract_text` on the blocking pool.
/// A panic inside the PDF libraries degrades to empty text like any other failure.
pub async fn extract_text_blocking(filename: &str, bytes: Bytes) -> String {
    let span = tracing::info_span!("extract", filename = %filename);

    let result = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        extract_text(&bytes)
    })
    .await;

    match result {
        Ok(text) => {
            if text.trim().is_empty() {
                warn!(filename, "No text could be extracted from upload");
            }
            text
        }
        Err(e) => {
            warn!(filename, "PDF extraction aborted: {e}");
            String::new()
        }
    }
}

/// Whole-document fallback. `pdf-extract` copes with more font encodings than
/// the per-page path but does not keep page boundaries.
fn extract_whole_document(bytes: &[u8]) -> String {
    pdf_extract::extract_text_from_mem(bytes).unwrap_or_else(|e| {
        warn!("pdf-extract fallback failed: {e}");
        String::new()
    })
}

/// Joins per-page text in order. Missing pages count as empty strings.
pub(crate) fn concat_pages<I>(pages: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    pages.into_iter().map(Option::unwrap_or_default).collect()
}
