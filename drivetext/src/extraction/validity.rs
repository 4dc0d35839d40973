use regex::Regex;
use std::collections::HashSet;

/// Accept text once it carries this many characters, regardless of class.
const ACCEPT_LEN: usize = 500;
/// Minimum informative (alphanumeric / Latin-extended) characters required.
const MIN_INFORMATIVE: usize = 10;
/// Mid-tier acceptance: this much text with this many informative chars.
const MID_LEN: usize = 100;
const MID_INFORMATIVE: usize = 20;
/// Minimum distinct word tokens for short text.
const MIN_DISTINCT_WORDS: usize = 3;
/// Reject outright when pagination markers occupy more than this fraction.
const MAX_MARKER_FRACTION: f64 = 0.8;

/// Statistical acceptance test separating genuine extracted text from the
/// empty/garbage/pagination-only output some backends return instead of an
/// error. This is the only backstop against that class of silent failure.
pub struct ValidityJudge {
    marker: Regex,
    only_marker: Regex,
    word: Regex,
}

impl Default for ValidityJudge {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidityJudge {
    pub fn new() -> Self {
        // "-- 3 of 17 --", "Page 1 of 2", "página 4 de... " style markers.
        Self {
            marker: Regex::new(r"(?i)-*\s*\d+\s*(?:of|page|página)\s*\d+\s*-*")
                .expect("pagination marker pattern"),
            only_marker: Regex::new(r"(?i)^\s*-*\s*\d+\s*(?:of|page|página)\s*\d+\s*-*\s*$")
                .expect("lone pagination marker pattern"),
            word: Regex::new(r"\p{L}{2,}").expect("word token pattern"),
        }
    }

    pub fn is_valid(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return false;
        }
        if self.only_marker.is_match(trimmed) {
            return false;
        }

        let marker_len: usize = self
            .marker
            .find_iter(trimmed)
            .map(|m| m.as_str().len())
            .sum();
        let remainder = if marker_len > 0 {
            if marker_len as f64 / trimmed.len() as f64 > MAX_MARKER_FRACTION {
                return false;
            }
            self.marker.replace_all(trimmed, " ").into_owned()
        } else {
            trimmed.to_string()
        };

        let len = remainder.chars().count();
        if len >= ACCEPT_LEN {
            return true;
        }

        let informative = remainder.chars().filter(|c| is_informative(*c)).count();
        if informative < MIN_INFORMATIVE {
            return false;
        }
        if len >= MID_LEN && informative >= MID_INFORMATIVE {
            return true;
        }

        let words: Vec<String> = self
            .word
            .find_iter(&remainder)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        if words.len() < MIN_DISTINCT_WORDS {
            return false;
        }
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        distinct.len() >= MIN_DISTINCT_WORDS
    }
}

/// Alphanumeric ASCII plus the Latin-1 Supplement / Latin Extended-A letters.
fn is_informative(c: char) -> bool {
    c.is_ascii_alphanumeric() || ('\u{C0}'..='\u{17F}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_whitespace() {
        let judge = ValidityJudge::new();
        assert!(!judge.is_valid(""));
        assert!(!judge.is_valid("   \n\t  "));
    }

    #[test]
    fn rejects_lone_pagination_marker() {
        let judge = ValidityJudge::new();
        assert!(!judge.is_valid("-- 1 of 1 --"));
        assert!(!judge.is_valid("  Page 3 of 12  "));
        assert!(!judge.is_valid("\n-- 7 of 7 --\n"));
    }

    #[test]
    fn rejects_marker_only_repetition() {
        let judge = ValidityJudge::new();
        let noise = "-- 1 of 50 --\n".repeat(50);
        assert!(!judge.is_valid(&noise));
    }

    #[test]
    fn accepts_markers_interleaved_with_prose() {
        let judge = ValidityJudge::new();
        let mut text = String::new();
        for _ in 0..50 {
            text.push_str("-- 1 of 50 --\n");
            text.push_str("the quick brown fox ran\n");
        }
        assert!(judge.is_valid(&text));
    }

    #[test]
    fn rejects_single_repeated_character() {
        let judge = ValidityJudge::new();
        assert!(!judge.is_valid("aaaaaaaaaa"));
    }

    #[test]
    fn rejects_one_word_repeated() {
        let judge = ValidityJudge::new();
        assert!(!judge.is_valid("word word word word"));
    }

    #[test]
    fn accepts_short_real_sentence() {
        let judge = ValidityJudge::new();
        assert!(judge.is_valid("Hello\nworld\n\nEnd"));
    }

    #[test]
    fn accepts_long_text_unconditionally() {
        let judge = ValidityJudge::new();
        let long = "~".repeat(500);
        assert!(judge.is_valid(&long));
    }

    #[test]
    fn rejects_sparse_symbols() {
        let judge = ValidityJudge::new();
        assert!(!judge.is_valid("... --- ... !!"));
    }

    #[test]
    fn accepts_mid_tier_accented_text() {
        let judge = ValidityJudge::new();
        let text = "Según el informe de auditoría, la compañía registró pérdidas \
                    significativas durante el último trimestre del año."
            .to_string();
        assert!(judge.is_valid(&text));
    }
}
