//! PEST grammar for 8255 source lines and token shapes
//!
//! Line tokenizing never fails: an unterminated quote simply becomes part of
//! an ordinary token, and the value resolver rejects it when it runs.

use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "interpreter/grammar.pest"]
pub(crate) struct SourceParser;

/// A piece of a quoted string body, split on `$name` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Split one source line into tokens
///
/// Whitespace separates tokens, except inside a double-quoted run where
/// `\"` does not close the string.
pub(crate) fn tokenize(line: &str) -> Vec<String> {
    let Ok(mut pairs) = SourceParser::parse(Rule::line, line) else {
        // The line rule accepts any input; fall back to plain splitting
        return line.split_whitespace().map(str::to_string).collect();
    };

    pairs
        .next()
        .map(|pair| {
            pair.into_inner()
                .filter(|inner| inner.as_rule() == Rule::token)
                .map(|inner| inner.as_str().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Check that `text` matches `rule` in full
pub(crate) fn matches(rule: Rule, text: &str) -> bool {
    SourceParser::parse(rule, text).is_ok()
}

/// Return the text of the first `inner` pair when `text` matches `rule` in full
pub(crate) fn capture(rule: Rule, inner: Rule, text: &str) -> Option<&str> {
    let pair = SourceParser::parse(rule, text).ok()?.next()?;
    pair.into_inner()
        .flatten()
        .find(|p| p.as_rule() == inner)
        .map(|p| p.as_str())
}

/// Split a string body into literal text and `$name` placeholders
pub(crate) fn template(body: &str) -> Vec<Segment<'_>> {
    let Some(root) = SourceParser::parse(Rule::template, body)
        .ok()
        .and_then(|mut pairs| pairs.next())
    else {
        return vec![Segment::Text(body)];
    };

    root.into_inner()
        .filter_map(|pair| match pair.as_rule() {
            Rule::text => Some(Segment::Text(pair.as_str())),
            Rule::placeholder => pair
                .into_inner()
                .next()
                .map(|name| Segment::Placeholder(name.as_str())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_splits_on_whitespace() {
        assert_eq!(tokenize("add 5  &x\t> y"), vec!["add", "5", "&x", ">", "y"]);
    }

    #[test]
    fn test_tokenize_keeps_quoted_string_whole() {
        assert_eq!(
            tokenize(r#"out "value is $x""#),
            vec!["out", r#""value is $x""#]
        );
    }

    #[test]
    fn test_tokenize_escaped_quote_does_not_close_string() {
        assert_eq!(
            tokenize(r#"out "say \"hi there\"""#),
            vec!["out", r#""say \"hi there\"""#]
        );
    }

    #[test]
    fn test_tokenize_unterminated_quote_falls_back() {
        assert_eq!(tokenize(r#"out "hello world"#), vec!["out", "\"hello", "world"]);
    }

    #[test]
    fn test_tokenize_empty_line() {
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_capture_variable_name() {
        assert_eq!(capture(Rule::variable_name, Rule::name, "&count"), Some("count"));
        assert_eq!(capture(Rule::variable_name, Rule::name, "count"), Some("count"));
        assert_eq!(capture(Rule::variable_name, Rule::name, "&a-b"), None);
        assert_eq!(capture(Rule::variable_name, Rule::name, "&"), None);
    }

    #[test]
    fn test_capture_allocation_size() {
        assert_eq!(capture(Rule::allocation_size, Rule::size, ":[16]"), Some("16"));
        assert_eq!(capture(Rule::allocation_size, Rule::size, ":[16]x"), None);
        assert_eq!(capture(Rule::allocation_size, Rule::size, "[16]"), None);
    }

    #[test]
    fn test_integer_literal_shape() {
        assert!(matches(Rule::integer_literal, "42"));
        assert!(matches(Rule::integer_literal, "-7"));
        assert!(!matches(Rule::integer_literal, "+7"));
        assert!(!matches(Rule::integer_literal, "4.2"));
        assert!(!matches(Rule::integer_literal, "-"));
    }

    #[test]
    fn test_template_segments() {
        assert_eq!(
            template("value is $x, cost $$y!"),
            vec![
                Segment::Text("value is "),
                Segment::Placeholder("x"),
                Segment::Text(", cost $"),
                Segment::Placeholder("y"),
                Segment::Text("!"),
            ]
        );
    }

    #[test]
    fn test_template_without_placeholders() {
        assert_eq!(template("plain $ text"), vec![Segment::Text("plain $ text")]);
        assert!(template("").is_empty());
    }
}
