use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Underscore counts as a separator even though `\w` matches it.
    static ref SEPARATORS: Regex = Regex::new(r"[\W_]+").expect("valid regex");
}

/// Sanitize text into an ordered token sequence.
///
/// Lowercases, collapses every run of non-word characters into a single space,
/// trims, and splits on that space. Text without any word character yields a
/// single empty token.
pub fn sanitize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let collapsed = SEPARATORS.replace_all(&lowered, " ");
    collapsed.trim().split(' ').map(str::to_string).collect()
}

/// True when a sanitized sequence carries no real token (the `[""]` case).
pub fn is_blank(tokens: &[String]) -> bool {
    tokens.iter().all(|t| t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sanitize() {
        assert_eq!(sanitize("The cat, sat!"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn underscores_split_tokens() {
        assert_eq!(sanitize("snake_case--word"), vec!["snake", "case", "word"]);
    }

    #[test]
    fn punctuation_only_is_blank() {
        let t = sanitize("?!... ---");
        assert_eq!(t, vec![String::new()]);
        assert!(is_blank(&t));
    }
}
