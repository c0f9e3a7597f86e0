//! Free text cleanup for wiki markup and delimiter-unsafe characters.

use std::sync::LazyLock;

use regex::Regex;

/// `'''bold'''` spans.
static BOLD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'''(.+?)'''").expect("Invalid bold markup regex"));

/// `''italic''` spans. Applied after bold so triple apostrophes are consumed first.
static ITALIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"''(.+?)''").expect("Invalid italic markup regex"));

/// Whether a rendered field is wrapped in double quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Quoting {
    /// Wrap in `"..."` for a delimited field.
    #[default]
    Quoted,
    /// Leave the text bare.
    Plain,
}

/// Normalize free text.
///
/// Bold markup becomes `*text*`, italic markup becomes `_text_`, embedded
/// double quotes become single quotes and, with [`Quoting::Quoted`], the
/// result is wrapped in double quotes. Empty input is returned unchanged and
/// never quoted.
#[must_use]
pub fn sanitize(text: &str, quoting: Quoting) -> String {
    if text.is_empty() {
        return String::new();
    }
    let text = BOLD_REGEX.replace_all(text, "*${1}*");
    let text = ITALIC_REGEX.replace_all(&text, "_${1}_");
    let text = text.replace('"', "'");
    match quoting {
        Quoting::Quoted => format!("\"{text}\""),
        Quoting::Plain => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_then_italic() {
        assert_eq!(
            sanitize("a '''bold''' and ''italic'' word", Quoting::Plain),
            "a *bold* and _italic_ word"
        );
    }

    #[test]
    fn bold_is_not_recaptured_as_italic() {
        assert_eq!(sanitize("'''x''' ''y''", Quoting::Plain), "*x* _y_");
    }

    #[test]
    fn markup_does_not_span_lines() {
        assert_eq!(sanitize("''a\nb''", Quoting::Plain), "''a\nb''");
    }

    #[test]
    fn double_quotes_become_single() {
        assert_eq!(sanitize(r#"say "hi""#, Quoting::Quoted), r#""say 'hi'""#);
    }

    #[test]
    fn non_ascii_and_line_breaks_survive() {
        let text = "F\u{fc}r ben\u{f6}tigt k\u{f6}nnte.\r\n\r\nTest";
        assert_eq!(sanitize(text, Quoting::Quoted), format!("\"{text}\""));
    }

    #[test]
    fn empty_is_never_quoted() {
        assert_eq!(sanitize("", Quoting::Quoted), "");
        assert_eq!(sanitize("", Quoting::Plain), "");
    }
}
