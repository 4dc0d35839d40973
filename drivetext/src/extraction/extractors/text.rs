/// Plain-text strategy: a lossy UTF-8 decode of the whole buffer. Empty or
/// garbage output is caught downstream by the validity check.
pub struct TextExtractor;

impl TextExtractor {
    pub const EXHAUSTED: &'static str = "text file is empty";

    pub fn decode(bytes: &[u8]) -> Result<String, String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_utf8() {
        assert_eq!(TextExtractor::decode(b"caf\xc3\xa9").unwrap(), "café");
    }

    #[test]
    fn invalid_sequences_become_replacement_chars() {
        assert_eq!(TextExtractor::decode(b"a\xFFb").unwrap(), "a\u{FFFD}b");
    }
}
