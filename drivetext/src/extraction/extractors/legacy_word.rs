use crate::config::ExtractionConfig;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;
use std::collections::HashSet;
use std::io::{Cursor, Read};

/// Word binary file magic (wIdent) at the start of the WordDocument stream.
const WORD_BINARY_MAGIC: u16 = 0xA5EC;
/// FIB offsets of the first and one-past-last character positions.
const FIB_FC_MIN: usize = 0x18;
const FIB_FC_MAC: usize = 0x1C;

/// Legacy Word (.doc) fallback chain backends.
///
/// The compound-file route reads the real text range out of the
/// `WordDocument` stream and works for simple (non-complex) files; anything
/// it cannot handle falls through to a raw printable-run scan over the
/// whole buffer, which trades accuracy for never being stumped.
pub struct LegacyWordExtractor {
    run: BytesRegex,
    garbage_prefix: Regex,
    min_unique_ratio: f64,
    max_repeat: usize,
}

impl LegacyWordExtractor {
    pub const EXHAUSTED: &'static str =
        "legacy Word document unsupported; convert to a modern format";

    pub fn new(config: &ExtractionConfig) -> Self {
        let run_pattern = format!("[ -~]{{{},}}", config.scan_min_run_len.max(1));
        Self {
            run: BytesRegex::new(&run_pattern).expect("printable run pattern"),
            // Short alphabetic token, punctuation, short token, punctuation
            // at the very start: the FIB scraps that leak into scans.
            garbage_prefix: Regex::new(
                r"(?i)^[a-z]{1,8}[^\sa-z0-9]{1,3}\s*[a-z]{1,8}[^\sa-z0-9]{1,3}\s*",
            )
            .expect("garbage prefix pattern"),
            min_unique_ratio: config.scan_min_unique_ratio,
            max_repeat: config.scan_max_repeat.max(2),
        }
    }

    /// Primary method: open the compound file and decode the FIB-delimited
    /// text range of the `WordDocument` stream.
    pub fn word_stream(bytes: &[u8]) -> Result<String, String> {
        let mut compound = cfb::CompoundFile::open(Cursor::new(bytes))
            .map_err(|e| format!("not a compound file: {e}"))?;
        let mut stream = compound
            .open_stream("WordDocument")
            .map_err(|_| "no WordDocument stream in container".to_string())?;
        let mut doc = Vec::new();
        stream
            .read_to_end(&mut doc)
            .map_err(|e| format!("WordDocument stream read: {e}"))?;

        if doc.len() < FIB_FC_MAC + 4 {
            return Err("WordDocument stream too short for a FIB".to_string());
        }
        let ident = u16::from_le_bytes([doc[0], doc[1]]);
        if ident != WORD_BINARY_MAGIC {
            return Err(format!("unexpected WordDocument magic {ident:#06x}"));
        }
        let fc_min = read_u32(&doc, FIB_FC_MIN) as usize;
        let fc_mac = read_u32(&doc, FIB_FC_MAC) as usize;
        if fc_min >= fc_mac || fc_mac > doc.len() {
            return Err("FIB text range out of bounds (complex or piece-table file)".to_string());
        }

        Ok(decode_word_text(&doc[fc_min..fc_mac]))
    }

    /// Fallback: scan the raw buffer byte-for-byte for printable runs,
    /// dropping repetitive and low-diversity runs, and strip the leading
    /// garbage prefix old containers tend to produce.
    pub fn raw_scan(&self, bytes: &[u8]) -> Result<String, String> {
        let mut kept: Vec<String> = Vec::new();
        for m in self.run.find_iter(bytes) {
            let run = m.as_bytes();
            if self.is_repetitive(run) {
                continue;
            }
            // Runs are printable ASCII by construction.
            kept.push(String::from_utf8_lossy(run).into_owned());
        }
        if kept.is_empty() {
            return Err("no printable runs survived the scan".to_string());
        }
        let joined = kept.join(" ");
        Ok(self.garbage_prefix.replace(&joined, "").into_owned())
    }

    fn is_repetitive(&self, run: &[u8]) -> bool {
        let unique: HashSet<u8> = run.iter().copied().collect();
        if (unique.len() as f64) < self.min_unique_ratio * run.len() as f64 {
            return true;
        }
        let mut streak = 1usize;
        for pair in run.windows(2) {
            if pair[0] == pair[1] {
                streak += 1;
                if streak >= self.max_repeat {
                    return true;
                }
            } else {
                streak = 1;
            }
        }
        false
    }
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Word 97+ stores UTF-16LE text, older versions a single-byte code page.
/// Decide by how many odd-index bytes are zero and decode accordingly.
fn decode_word_text(slice: &[u8]) -> String {
    let zero_odd = slice.iter().skip(1).step_by(2).filter(|&&b| b == 0).count();
    let odd_total = slice.len() / 2;
    if odd_total > 0 && zero_odd * 2 >= odd_total {
        let units: Vec<u16> = slice
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        // Treat as Latin-1: every byte maps to the same code point.
        slice.iter().map(|&b| b as char).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> LegacyWordExtractor {
        LegacyWordExtractor::new(&ExtractionConfig::default())
    }

    #[test]
    fn raw_scan_keeps_prose_runs() {
        let mut buf = vec![0u8, 1, 2, 3];
        buf.extend_from_slice(b"Quarterly report for the finance team");
        buf.extend_from_slice(&[0xFE, 0xFF, 0x00]);
        buf.extend_from_slice(b"totals attached below");
        let out = extractor().raw_scan(&buf).unwrap();
        assert!(out.contains("Quarterly report"));
        assert!(out.contains("totals attached below"));
    }

    #[test]
    fn raw_scan_drops_repeated_character_runs() {
        let buf = b"\x00\x01aaaaaaaaaa\x02\x03".to_vec();
        assert!(extractor().raw_scan(&buf).is_err());
    }

    #[test]
    fn raw_scan_drops_low_diversity_runs() {
        // Alternating two characters: 2 unique out of 20 is under 30%.
        let buf = b"ababababababababababab".to_vec();
        assert!(extractor().raw_scan(&buf).is_err());
    }

    #[test]
    fn raw_scan_strips_leading_garbage_prefix() {
        let buf = b"\x00bjbj;QXW: The actual document body starts here".to_vec();
        let out = extractor().raw_scan(&buf).unwrap();
        assert!(out.starts_with("The actual document body"), "got: {out}");
    }

    #[test]
    fn word_stream_rejects_non_compound_bytes() {
        let err = LegacyWordExtractor::word_stream(b"just text").unwrap_err();
        assert!(err.contains("compound"));
    }

    #[test]
    fn decode_prefers_utf16_when_odd_bytes_are_zero() {
        let text = "hello doc";
        let utf16: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(decode_word_text(&utf16), text);
        assert_eq!(decode_word_text(b"plain bytes"), "plain bytes");
    }
}
