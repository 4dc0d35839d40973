use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use std::io::{Cursor, Read};

/// Modern Word (.docx family) fallback chain backends.
pub struct WordExtractor {
    tag: Regex,
}

impl Default for WordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl WordExtractor {
    pub const EXHAUSTED: &'static str = "Word document has no extractable text";

    pub fn new() -> Self {
        Self {
            tag: Regex::new(r"<[^>]*>").expect("markup tag pattern"),
        }
    }

    /// Primary extractor: walk the parsed document tree, flattening
    /// paragraphs to lines and table rows to space-joined cell text.
    pub fn structured(bytes: &[u8]) -> Result<String, String> {
        let docx = docx_rs::read_docx(bytes).map_err(|e| format!("docx parse: {e}"))?;

        let mut lines: Vec<String> = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(paragraph) => {
                    let text = Self::paragraph_text(paragraph);
                    if !text.trim().is_empty() {
                        lines.push(text);
                    }
                }
                docx_rs::DocumentChild::Table(table) => {
                    for row in Self::table_rows(table) {
                        if !row.is_empty() {
                            lines.push(row);
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(lines.join("\n"))
    }

    /// Second opinion: stream `word/document.xml` directly and collect the
    /// `w:t` text nodes, independent of the tree parser's quirks.
    pub fn xml_scan(bytes: &[u8]) -> Result<String, String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| format!("docx archive: {e}"))?;
        let mut entry = archive
            .by_name("word/document.xml")
            .map_err(|_| "missing word/document.xml".to_string())?;
        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| format!("document.xml read: {e}"))?;

        let mut reader = Reader::from_reader(xml.as_bytes());
        let mut out = String::new();
        let mut in_text = false;
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"w:t" => in_text = true,
                Ok(Event::End(ref e)) => {
                    if e.name().as_ref() == b"w:t" {
                        in_text = false;
                    } else if e.name().as_ref() == b"w:p" {
                        out.push('\n');
                    }
                }
                Ok(Event::Text(e)) if in_text => {
                    let text = e.unescape().map_err(|e| format!("xml text: {e}"))?;
                    out.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(format!("document.xml parse: {e}")),
                _ => {}
            }
            buf.clear();
        }
        Ok(out)
    }

    /// Last resort: strip the markup of every `word/*.xml` part and keep
    /// whatever character data remains. Casts the widest net (headers,
    /// footers, text boxes) at the cost of picking up noise the validity
    /// check must arbitrate.
    pub fn markup_strip(&self, bytes: &[u8]) -> Result<String, String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| format!("docx archive: {e}"))?;

        let names: Vec<String> = (0..archive.len())
            .filter_map(|i| archive.by_index(i).ok().map(|e| e.name().to_string()))
            .filter(|n| n.starts_with("word/") && n.ends_with(".xml"))
            .collect();
        if names.is_empty() {
            return Err("no word/*.xml parts".to_string());
        }

        let mut combined = String::new();
        for name in names {
            let mut entry = archive
                .by_name(&name)
                .map_err(|e| format!("{name}: {e}"))?;
            let mut xml = String::new();
            entry
                .read_to_string(&mut xml)
                .map_err(|e| format!("{name} read: {e}"))?;
            combined.push_str(&self.tag.replace_all(&xml, " "));
            combined.push('\n');
        }
        Ok(combined)
    }

    fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
        let mut content = String::new();
        for child in &paragraph.children {
            if let docx_rs::ParagraphChild::Run(run) = child {
                for run_child in &run.children {
                    match run_child {
                        docx_rs::RunChild::Text(text) => content.push_str(&text.text),
                        docx_rs::RunChild::Tab(_) => content.push(' '),
                        docx_rs::RunChild::Break(_) => content.push('\n'),
                        _ => {}
                    }
                }
            }
        }
        content
    }

    fn table_rows(table: &docx_rs::Table) -> Vec<String> {
        let mut rows = Vec::new();
        for table_child in &table.rows {
            let docx_rs::TableChild::TableRow(row) = table_child;
            let mut cells: Vec<String> = Vec::new();
            for row_child in &row.cells {
                let docx_rs::TableRowChild::TableCell(cell) = row_child;
                let mut cell_text = String::new();
                for cell_child in &cell.children {
                    if let docx_rs::TableCellContent::Paragraph(para) = cell_child {
                        let text = Self::paragraph_text(para);
                        if !cell_text.is_empty() && !text.is_empty() {
                            cell_text.push(' ');
                        }
                        cell_text.push_str(&text);
                    }
                }
                let cell_text = cell_text.trim().to_string();
                if !cell_text.is_empty() {
                    cells.push(cell_text);
                }
            }
            rows.push(cells.join(" "));
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_rejects_corrupt_bytes() {
        assert!(WordExtractor::structured(&[0x00, 0x01, 0x02, 0xFF]).is_err());
    }

    #[test]
    fn xml_scan_rejects_non_zip() {
        let err = WordExtractor::xml_scan(b"plainly not a zip").unwrap_err();
        assert!(err.contains("archive"));
    }

    #[test]
    fn markup_strip_requires_word_parts() {
        // A valid but empty zip has no word/*.xml entries.
        let mut cursor = Cursor::new(Vec::new());
        {
            let writer = zip::ZipWriter::new(&mut cursor);
            writer.finish().unwrap();
        }
        let bytes = cursor.into_inner();
        let err = WordExtractor::new().markup_strip(&bytes).unwrap_err();
        assert!(err.contains("word/"));
    }
}
