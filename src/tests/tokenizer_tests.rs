use crate::tokenizer::tokenize;

#[test]
fn splits_on_unquoted_whitespace() {
    assert_eq!(tokenize("echo hello world"), ["echo", "hello", "world"]);
}

#[test]
fn collapses_whitespace_runs() {
    assert_eq!(tokenize("a   b\t\t c"), ["a", "b", "c"]);
}

#[test]
fn ignores_leading_and_trailing_whitespace() {
    assert_eq!(tokenize("  x  "), ["x"]);
}

#[test]
fn empty_and_blank_input_yield_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \t ").is_empty());
}

#[test]
fn single_quotes_preserve_everything() {
    assert_eq!(tokenize(r"'a b\c'"), [r"a b\c"]);
    assert_eq!(tokenize(r"'$HOME \'"), [r"$HOME \"]);
}

#[test]
fn double_quotes_preserve_spaces() {
    assert_eq!(tokenize(r#""hello   world""#), ["hello   world"]);
}

#[test]
fn double_quote_escapes_reduce() {
    assert_eq!(tokenize(r#""a\"b""#), [r#"a"b"#]);
    assert_eq!(tokenize(r#""\$HOME""#), ["$HOME"]);
    assert_eq!(tokenize(r#""\\""#), [r"\"]);
}

#[test]
fn double_quote_keeps_backslash_before_ordinary_chars() {
    assert_eq!(tokenize(r#""a\xb""#), [r"a\xb"]);
}

#[test]
fn backslash_outside_quotes_escapes_anything() {
    assert_eq!(tokenize(r"hello\ world"), ["hello world"]);
    assert_eq!(tokenize(r"\'quoted\'"), ["'quoted'"]);
    assert_eq!(tokenize(r"a\\b"), [r"a\b"]);
}

#[test]
fn adjacent_quoted_runs_join() {
    assert_eq!(tokenize(r#"'a'b"c""#), ["abc"]);
}

#[test]
fn mixed_quoting_in_one_line() {
    assert_eq!(
        tokenize(r#"echo "a b" 'c d' e"#),
        ["echo", "a b", "c d", "e"]
    );
}

#[test]
fn unterminated_quotes_flush_what_was_collected() {
    assert_eq!(tokenize("'abc"), ["abc"]);
    assert_eq!(tokenize(r#""a b"#), ["a b"]);
}

#[test]
fn trailing_backslash_is_dropped() {
    assert_eq!(tokenize(r"abc\"), ["abc"]);
}

#[test]
fn empty_quotes_yield_no_token() {
    assert!(tokenize("''").is_empty());
    assert_eq!(tokenize("echo '' x"), ["echo", "x"]);
}
