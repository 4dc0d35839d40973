/// PDF fallback chain backends.
///
/// `pdf-extract` is the primary parser; the by-pages variant runs the same
/// engine with per-page whitespace handling, and `lopdf` is the final,
/// line-enforcing mode that keeps layout-driven line breaks the flat pass
/// sometimes collapses away.
pub struct PdfExtractor;

impl PdfExtractor {
    pub const EXHAUSTED: &'static str =
        "PDF has no extractable text (likely scanned or image-only)";

    /// Primary parser: every page, one flat stream.
    pub fn full_text(bytes: &[u8]) -> Result<String, String> {
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| format!("pdf parse: {e}"))
    }

    /// Whitespace-normalization variant: pages extracted separately and
    /// rejoined, which sidesteps cross-page spacing bugs in some documents.
    pub fn by_pages(bytes: &[u8]) -> Result<String, String> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|e| format!("pdf per-page parse: {e}"))?;
        Ok(pages.join("\n"))
    }

    /// Line-enforcing mode via lopdf, preserving text-operator line breaks.
    pub fn line_text(bytes: &[u8]) -> Result<String, String> {
        let doc = lopdf::Document::load_mem(bytes).map_err(|e| format!("pdf load: {e}"))?;
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err("pdf has no pages".to_string());
        }
        doc.extract_text(&page_numbers)
            .map_err(|e| format!("pdf text ops: {e}"))
    }

    /// Best-effort page count for exhaustion diagnostics.
    pub fn page_count(bytes: &[u8]) -> Option<usize> {
        lopdf::Document::load_mem(bytes)
            .ok()
            .map(|doc| doc.get_pages().len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pdf_bytes() {
        assert!(PdfExtractor::full_text(b"not a pdf at all").is_err());
        assert!(PdfExtractor::line_text(b"not a pdf at all").is_err());
        assert_eq!(PdfExtractor::page_count(b"nope"), None);
    }
}
