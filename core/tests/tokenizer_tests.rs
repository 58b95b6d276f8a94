use search_core::tokenizer::{is_blank, sanitize};

#[test]
fn it_lowercases_and_splits() {
    let words = sanitize("  The QUICK brown-fox; jumped!! ");
    assert_eq!(words, vec!["the", "quick", "brown", "fox", "jumped"]);
}

#[test]
fn it_keeps_unicode_word_characters() {
    let words = sanitize("Café au lait, 2024");
    assert_eq!(words, vec!["café", "au", "lait", "2024"]);
}

#[test]
fn it_keeps_stopwords() {
    // No stopword filtering or stemming is applied.
    let words = sanitize("The runners and the running");
    assert_eq!(words, vec!["the", "runners", "and", "the", "running"]);
}

#[test]
fn empty_text_is_one_blank_token() {
    for text in ["", "   ", "__--!!"] {
        let words = sanitize(text);
        assert_eq!(words, vec![String::new()], "text {text:?}");
        assert!(is_blank(&words));
    }
}
