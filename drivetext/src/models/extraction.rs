use serde::{Deserialize, Serialize};

/// Document kind resolved by the format classifier.
///
/// Legacy variants cover the pre-XML compound-binary Office containers
/// (.doc/.xls); modern variants cover the zip-based OOXML containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCategory {
    Pdf,
    ModernWord,
    LegacyWord,
    ModernExcel,
    LegacyExcel,
    PlainText,
    Image,
    Unsupported,
}

/// Normalized text extracted from a single document buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub page_content: String,
    pub file_type: String,
}
