use calamine::{Data, Range, Reader, Xls, Xlsx};
use std::io::Cursor;

/// Modern (.xlsx) and legacy (.xls) spreadsheet extraction.
///
/// Both containers flatten identically: non-empty cells of a row joined
/// with single spaces, rows joined with newlines, sheets concatenated.
pub struct ExcelExtractor;

impl ExcelExtractor {
    pub const EXHAUSTED_MODERN: &'static str = "Excel file has no extractable content";
    pub const EXHAUSTED_LEGACY: &'static str = "legacy Excel file has no extractable content";

    pub fn modern(bytes: &[u8]) -> Result<String, String> {
        let mut workbook: Xlsx<_> =
            Xlsx::new(Cursor::new(bytes)).map_err(|e| format!("xlsx parse: {e}"))?;
        let sheets = workbook.worksheets();
        Ok(Self::flatten(&sheets))
    }

    pub fn legacy(bytes: &[u8]) -> Result<String, String> {
        let mut workbook: Xls<_> =
            Xls::new(Cursor::new(bytes)).map_err(|e| format!("xls parse: {e}"))?;
        let sheets = workbook.worksheets();
        Ok(Self::flatten(&sheets))
    }

    fn flatten(sheets: &[(String, Range<Data>)]) -> String {
        let mut rows_out: Vec<String> = Vec::new();
        for (_name, range) in sheets {
            for row in range.rows() {
                let cells: Vec<String> = row
                    .iter()
                    .map(Self::cell_text)
                    .filter(|c| !c.is_empty())
                    .collect();
                if !cells.is_empty() {
                    rows_out.push(cells.join(" "));
                }
            }
        }
        rows_out.join("\n")
    }

    /// Scalar values stringify directly; floats lose trailing zeros; any
    /// structured value falls back to its display form.
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                let s = format!("{f}");
                if s.contains('.') {
                    s.trim_end_matches('0').trim_end_matches('.').to_string()
                } else {
                    s
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        }
    }
}
