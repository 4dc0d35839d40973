pub mod classifier;
pub mod extractors;
pub mod normalize;
pub mod validity;

use crate::config::ExtractionConfig;
use crate::error::{DriveTextError, Result};
use crate::models::{ExtractionResult, FormatCategory};

use classifier::{classify, file_extension, SUPPORTED_EXTENSIONS};
use extractors::excel::ExcelExtractor;
use extractors::legacy_word::LegacyWordExtractor;
use extractors::pdf::PdfExtractor;
use extractors::text::TextExtractor;
use extractors::word::WordExtractor;
use extractors::{run_chain, Method};
use validity::ValidityJudge;

/// The format-detection-and-extraction engine. One instance serves any
/// number of concurrent calls: nothing here is mutated per call, every call
/// works from its own immutable buffer.
pub struct ExtractionService {
    config: ExtractionConfig,
    judge: ValidityJudge,
    word: WordExtractor,
    legacy_word: LegacyWordExtractor,
}

impl ExtractionService {
    pub fn new(config: ExtractionConfig) -> Self {
        let legacy_word = LegacyWordExtractor::new(&config);
        Self {
            config,
            judge: ValidityJudge::new(),
            word: WordExtractor::new(),
            legacy_word,
        }
    }

    /// Classify the buffer, run the matching strategy's fallback chain and
    /// return normalized, validity-judged text. A non-error return always
    /// passes [`ValidityJudge::is_valid`]; anything else is a typed failure.
    pub fn extract_text(
        &self,
        buffer: &[u8],
        mime_type: &str,
        file_name: &str,
    ) -> Result<ExtractionResult> {
        let category = classify(buffer, mime_type, file_name, &self.config);
        tracing::debug!(
            ?category,
            file = file_name,
            mime = mime_type,
            bytes = buffer.len(),
            "classified buffer"
        );

        let (page_content, file_type) = match category {
            FormatCategory::Pdf => (self.pdf_text(buffer)?, "pdf"),
            FormatCategory::ModernWord => (self.word_text(buffer)?, "docx"),
            FormatCategory::LegacyWord => (self.legacy_word_text(buffer)?, "doc"),
            FormatCategory::ModernExcel => {
                let methods: [Method<'_>; 1] = [("xlsx-calamine", &ExcelExtractor::modern)];
                (
                    run_chain(buffer, &methods, &self.judge, ExcelExtractor::EXHAUSTED_MODERN)?,
                    "xlsx",
                )
            }
            FormatCategory::LegacyExcel => {
                let methods: [Method<'_>; 1] = [("xls-calamine", &ExcelExtractor::legacy)];
                (
                    run_chain(buffer, &methods, &self.judge, ExcelExtractor::EXHAUSTED_LEGACY)?,
                    "xls",
                )
            }
            FormatCategory::PlainText => {
                let methods: [Method<'_>; 1] = [("utf8-decode", &TextExtractor::decode)];
                (
                    run_chain(buffer, &methods, &self.judge, TextExtractor::EXHAUSTED)?,
                    "text",
                )
            }
            FormatCategory::Image => {
                return Err(DriveTextError::UnsupportedFormat(format!(
                    "image file '{file_name}' is not vectorizable without OCR"
                )));
            }
            FormatCategory::Unsupported => {
                let ext = file_extension(file_name);
                let ext_label = if ext.is_empty() { "<none>".to_string() } else { format!(".{ext}") };
                return Err(DriveTextError::UnsupportedFormat(format!(
                    "file format not supported: {mime_type} ({file_name}, extension {ext_label}); \
                     supported extensions: {}",
                    SUPPORTED_EXTENSIONS.join(", ")
                )));
            }
        };

        Ok(ExtractionResult {
            page_content,
            file_type: file_type.to_string(),
        })
    }

    /// Defense-in-depth for callers constructing a result outside the main
    /// path: re-run the validity check on the content.
    pub fn validate_extraction_result(&self, result: &ExtractionResult) -> Result<()> {
        if self.judge.is_valid(&result.page_content) {
            Ok(())
        } else {
            Err(DriveTextError::NotVectorizable(
                "extraction result content failed the validity check".to_string(),
            ))
        }
    }

    fn pdf_text(&self, buffer: &[u8]) -> Result<String> {
        let methods: [Method<'_>; 3] = [
            ("pdf-full", &PdfExtractor::full_text),
            ("pdf-by-pages", &PdfExtractor::by_pages),
            ("pdf-lines", &PdfExtractor::line_text),
        ];
        run_chain(buffer, &methods, &self.judge, PdfExtractor::EXHAUSTED).map_err(|e| match e {
            DriveTextError::NotVectorizable(msg) => {
                let msg = match PdfExtractor::page_count(buffer) {
                    Some(pages) => format!("{msg} [{pages} page(s)]"),
                    None => msg,
                };
                DriveTextError::NotVectorizable(msg)
            }
            other => other,
        })
    }

    fn word_text(&self, buffer: &[u8]) -> Result<String> {
        let markup_strip = |b: &[u8]| self.word.markup_strip(b);
        let methods: [Method<'_>; 3] = [
            ("docx-structured", &WordExtractor::structured),
            ("docx-xml-scan", &WordExtractor::xml_scan),
            ("docx-markup-strip", &markup_strip),
        ];
        run_chain(buffer, &methods, &self.judge, WordExtractor::EXHAUSTED)
    }

    fn legacy_word_text(&self, buffer: &[u8]) -> Result<String> {
        let raw_scan = |b: &[u8]| self.legacy_word.raw_scan(b);
        let methods: [Method<'_>; 2] = [
            ("doc-word-stream", &LegacyWordExtractor::word_stream),
            ("doc-raw-scan", &raw_scan),
        ];
        run_chain(buffer, &methods, &self.judge, LegacyWordExtractor::EXHAUSTED)
    }
}
