const QUOTE: char = '"';

/// Splits the argument section of a command into tokens, left to right.
///
/// A token starting with `"` that has a matching closing quote is taken as one
/// argument (its content, trimmed). Anything else is a run of non-whitespace
/// characters. Quote characters never survive into an argument, so an unpaired
/// quote is simply dropped from the run it belongs to.
pub fn tokenize_args(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let (token, tail) = quoted_span(rest).unwrap_or_else(|| unquoted_run(rest));
        args.push(clean(token));
        rest = tail;
    }
    args
}

fn quoted_span(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix(QUOTE)?;
    let end = inner.find(QUOTE)?;
    Some((&inner[..end], &inner[end + QUOTE.len_utf8()..]))
}

fn unquoted_run(text: &str) -> (&str, &str) {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    text.split_at(end)
}

fn clean(token: &str) -> String {
    token.replace(QUOTE, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        tokenize_args(text)
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(tokens("a  b\tc\n d"), ["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_and_blank_input_yields_nothing() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t ").is_empty());
    }

    #[test]
    fn quoted_span_is_one_trimmed_argument() {
        assert_eq!(tokens(r#"x "  two words  " y"#), ["x", "two words", "y"]);
    }

    #[test]
    fn quoted_span_keeps_inner_spacing() {
        assert_eq!(tokens(r#""a   b""#), ["a   b"]);
    }

    #[test]
    fn empty_quoted_span_is_empty_argument() {
        assert_eq!(tokens(r#"a "" b"#), ["a", "", "b"]);
    }

    #[test]
    fn closing_quote_ends_token() {
        assert_eq!(tokens(r#""a b"c"#), ["a b", "c"]);
    }

    #[test]
    fn unpaired_quote_falls_through_to_unquoted_run() {
        assert_eq!(tokens(r#"say "hello world"#), ["say", "hello", "world"]);
        assert_eq!(tokens(r#"""#), [""]);
    }

    #[test]
    fn quotes_inside_unquoted_run_are_stripped() {
        assert_eq!(tokens(r#"ab"cd ef""#), ["abcd", "ef"]);
    }

    #[test]
    fn non_ascii_text() {
        assert_eq!(
            tokens(r#"zażółć "gęślą jaźń" ✓"#),
            ["zażółć", "gęślą jaźń", "✓"]
        );
    }
}
