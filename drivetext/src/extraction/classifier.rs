use crate::config::ExtractionConfig;
use crate::models::FormatCategory;

/// Magic signature of the pre-XML compound-binary Office container.
const OLE_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Extensions with an extraction strategy, quoted in unsupported-format errors.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "docm", "dotx", "dotm", "xls", "xlsx", "txt", "md", "json", "csv",
];

/// Known non-text binary containers. Checked before any buffer sniffing:
/// sniffing a corrupt or hostile binary is wasted work.
const DENIED_EXTENSIONS: &[&str] = &[
    "exe", "dll", "so", "msi", "bin", "dat", "zipx", "zip", "rar", "7z", "tar", "gz", "bz2", "xz",
    "iso", "img", "dmg", "vhd", "mp3", "mp4", "avi", "mov", "mkv", "wav", "flac", "ogg", "log",
];

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tiff"];

const TEXT_EXTENSIONS: &[&str] = &["txt", "md", "json", "csv"];

const MODERN_WORD_EXTENSIONS: &[&str] = &["docx", "docm", "dotx", "dotm", "doc"];

/// Boolean view over the declared hints and the sniffed buffer content,
/// computed once and matched against the fixed priority table below. Keeps
/// the priority order auditable instead of substring-matching a signal soup.
#[derive(Debug, Clone, Copy, Default)]
struct FormatSignals {
    pdf: bool,
    old_container: bool,
    modern_word_container: bool,
    word_markup: bool,
    spreadsheet_markup: bool,
    legacy_excel_container: bool,
    image: bool,
    text: bool,
}

impl FormatSignals {
    fn gather(buffer: &[u8], declared_mime: &str, extension: &str) -> Self {
        // Sniffing never errors; an unrecognized buffer just contributes
        // no detected signal.
        let detected = infer::get(buffer);
        let sniffed_mime = detected.map(|t| t.mime_type()).unwrap_or("");
        let sniffed_ext = detected.map(|t| t.extension()).unwrap_or("");

        Self {
            pdf: declared_mime.contains("pdf") || sniffed_mime.contains("pdf"),
            old_container: buffer.starts_with(&OLE_SIGNATURE),
            modern_word_container: sniffed_ext == "docx"
                || declared_mime.contains("wordprocessingml"),
            word_markup: declared_mime.contains("wordprocessingml")
                || declared_mime.contains("msword")
                || sniffed_ext == "docx"
                || sniffed_ext == "doc",
            spreadsheet_markup: declared_mime.contains("spreadsheetml") || sniffed_ext == "xlsx",
            legacy_excel_container: declared_mime.contains("ms-excel") || sniffed_ext == "xls",
            image: declared_mime.starts_with("image/")
                || sniffed_mime.starts_with("image/")
                || IMAGE_EXTENSIONS.contains(&extension),
            text: declared_mime.contains("text") || TEXT_EXTENSIONS.contains(&extension),
        }
    }
}

/// Lower-cased substring after the last `.` of the file name; empty when
/// there is no dot or the dot is the final character.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => file_name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Resolve the document kind from the buffer plus its untrusted hints.
///
/// Legacy-container checks run before the modern ones: old compound-binary
/// signatures partially overlap with generic Office MIME strings, so a
/// `.doc` with an OLE signature must win over a loose "msword" match.
pub fn classify(
    buffer: &[u8],
    declared_mime: &str,
    file_name: &str,
    config: &ExtractionConfig,
) -> FormatCategory {
    let declared = declared_mime.to_lowercase();
    let name = file_name.to_lowercase();
    let ext = file_extension(&name);

    if DENIED_EXTENSIONS.contains(&ext.as_str()) {
        return FormatCategory::Unsupported;
    }

    let signals = FormatSignals::gather(buffer, &declared, &ext);

    if signals.pdf || ext == "pdf" {
        return FormatCategory::Pdf;
    }
    if ext == "doc" && signals.old_container && !signals.modern_word_container {
        return FormatCategory::LegacyWord;
    }
    if ext == "xls" && !signals.spreadsheet_markup {
        return FormatCategory::LegacyExcel;
    }
    if signals.word_markup || MODERN_WORD_EXTENSIONS.contains(&ext.as_str()) {
        return FormatCategory::ModernWord;
    }
    if signals.spreadsheet_markup
        || signals.legacy_excel_container
        || ext == "xlsx"
        || ext == "xls"
    {
        return FormatCategory::ModernExcel;
    }
    if signals.image {
        return FormatCategory::Image;
    }
    if signals.text {
        return FormatCategory::PlainText;
    }
    if looks_like_plain_text(buffer, config) && (ext.is_empty() || ext == "txt" || !known_extension(&ext))
    {
        return FormatCategory::PlainText;
    }

    FormatCategory::Unsupported
}

fn known_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext)
        || DENIED_EXTENSIONS.contains(&ext)
        || IMAGE_EXTENSIONS.contains(&ext)
}

/// Last-resort sniff: sample the head of the buffer and accept it as text
/// when it is null-free and mostly printable Latin-1.
fn looks_like_plain_text(buffer: &[u8], config: &ExtractionConfig) -> bool {
    if buffer.is_empty() {
        return false;
    }
    let sample = &buffer[..buffer.len().min(config.sniff_sample_len)];
    if sample.contains(&0) {
        return false;
    }
    let printable = sample
        .iter()
        .filter(|&&b| matches!(b, b'\t' | b'\n' | b'\r' | 0x20..=0x7E | 0xA0..=0xFF))
        .count();
    printable as f64 / sample.len() as f64 >= config.sniff_min_printable_ratio
}
