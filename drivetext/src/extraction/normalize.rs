/// Canonicalize raw extractor output into a flattened text stream.
///
/// Removes null bytes, converts CRLF and bare CR to LF, collapses runs of
/// non-newline whitespace to a single space, drops whitespace hugging line
/// breaks, caps consecutive newlines at two and trims the ends. Idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(text: &str) -> String {
    let mut unified = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\0' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                unified.push('\n');
            }
            _ => unified.push(c),
        }
    }

    let mut out = String::with_capacity(unified.len());
    let mut newline_run = 0usize;
    let mut in_space = false;
    for c in unified.chars() {
        if c == '\n' {
            while out.ends_with(' ') {
                out.pop();
            }
            newline_run += 1;
            in_space = false;
            if newline_run <= 2 {
                out.push('\n');
            }
        } else if c.is_whitespace() {
            // Whitespace directly after a line break is dropped.
            if newline_run == 0 && !in_space {
                out.push(' ');
                in_space = true;
            }
        } else {
            newline_run = 0;
            in_space = false;
            out.push(c);
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_nulls_and_unifies_line_endings() {
        assert_eq!(normalize("a\0b\r\nc\rd"), "ab\nc\nd");
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(normalize("a \t  b"), "a b");
    }

    #[test]
    fn caps_blank_lines_at_one() {
        assert_eq!(normalize("Hello\r\nworld\r\n\r\n\r\nEnd"), "Hello\nworld\n\nEnd");
    }

    #[test]
    fn drops_whitespace_around_line_breaks() {
        assert_eq!(normalize("a \n  \n   \n b"), "a\n\nb");
    }

    #[test]
    fn trims_ends() {
        assert_eq!(normalize("  \n hello \n "), "hello");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "   ",
            "plain",
            "a\0b\r\nc\rd",
            "Hello\r\nworld\r\n\r\n\r\nEnd",
            "x \n \n \n y\t\tz",
            "tab\there  and\r\nthere\n\n\n\nend ",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
