use crate::tokenizer::{fragment_spans, is_operator_text, is_symbol, is_whitespace, tokenize};

#[test]
fn test_empty_input_is_single_empty_fragment() {
    assert_eq!(tokenize(""), vec![""]);
}

#[test]
fn test_member_chain() {
    assert_eq!(tokenize("Vector3.zero.x"), vec!["Vector3", ".", "zero", ".", "x"]);
}

#[test]
fn test_whitespace_runs_are_fragments() {
    assert_eq!(tokenize("a  +\tb"), vec!["a", "  ", "+", "\t", "b"]);
}

#[test]
fn test_every_punctuation_char_stands_alone() {
    let input = "+-*/=%^,<>&|!(){}[]'~.";
    let expected: Vec<String> = input.chars().map(|c| c.to_string()).collect();
    assert_eq!(tokenize(input), expected);
}

#[test]
fn test_string_literal_keeps_punctuation_and_spaces() {
    assert_eq!(
        tokenize(r#"Find("a (b).c")"#),
        vec!["Find", "(", r#""a (b).c""#, ")"]
    );
}

#[test]
fn test_closing_quote_ends_fragment() {
    assert_eq!(tokenize(r#""ab"cd"#), vec![r#""ab""#, "cd"]);
}

#[test]
fn test_escaped_quote_stays_inside_string() {
    assert_eq!(tokenize(r#""a\"b""#), vec![r#""a\"b""#]);
    assert_eq!(
        tokenize(r#"Spawn("say \"hi\"").x"#),
        vec!["Spawn", "(", r#""say \"hi\"""#, ")", ".", "x"]
    );
    assert_eq!(tokenize(r#""a\\"b"#), vec![r#""a\\""#, "b"]);
    assert_eq!(tokenize(r#""a\"#), vec![r#""a\"#]);
}

#[test]
fn test_unterminated_string_runs_to_end() {
    assert_eq!(tokenize(r#"Find("Main Cam"#), vec!["Find", "(", r#""Main Cam"#]);
}

#[test]
fn test_numeric_literal_keeps_single_decimal_point() {
    assert_eq!(tokenize("1.5f"), vec!["1.5f"]);
    assert_eq!(tokenize("1.5.x"), vec!["1.5", ".", "x"]);
    assert_eq!(tokenize("a1.b"), vec!["a1", ".", "b"]);
}

#[test]
fn test_dot_after_number_needs_a_digit() {
    assert_eq!(tokenize("1.ToString"), vec!["1", ".", "ToString"]);
    assert_eq!(tokenize("1."), vec!["1", "."]);
    assert_eq!(tokenize("10.5"), vec!["10.5"]);
    assert_eq!(tokenize("1.5f.x"), vec!["1.5f", ".", "x"]);
}

#[test]
fn test_generic_call() {
    assert_eq!(
        tokenize("GetComponent<Rigidbody>()"),
        vec!["GetComponent", "<", "Rigidbody", ">", "(", ")"]
    );
}

#[test]
fn test_tokenize_is_lossless() {
    let inputs = [
        "",
        " ",
        "Mathf.Max(1.5f, speed)",
        "a is List<int>",
        r#"Find("x y" ) .transform"#,
        "  new Vector3 ( 1 , 2 )[0]",
        "x >= 10 && !flag",
        "\"unterminated (",
        "ünïcödé.näme",
        r#""esc\"aped" + 1.ToString"#,
    ];
    for input in inputs {
        assert_eq!(tokenize(input).concat(), input, "input: {input:?}");
    }
}

#[test]
fn test_fragment_predicates() {
    assert!(is_symbol("."));
    assert!(is_symbol("<"));
    assert!(!is_symbol(">="));
    assert!(!is_symbol("a"));
    assert!(!is_symbol(""));

    assert!(is_whitespace(" \t"));
    assert!(!is_whitespace(""));
    assert!(!is_whitespace(" a"));

    assert!(is_operator_text(">="));
    assert!(is_operator_text("!"));
    assert!(!is_operator_text("("));
    assert!(!is_operator_text(""));
}

#[test]
fn test_fragment_spans_cover_input() {
    let input = "ab . \"é\"";
    let fragments = tokenize(input);
    let spans = fragment_spans(&fragments);

    assert_eq!(spans.len(), fragments.len());
    for (fragment, span) in fragments.iter().zip(&spans) {
        assert_eq!(&input[span.start as usize..span.end as usize], fragment);
    }
    assert_eq!(spans.last().map(|s| s.end), Some(input.len() as u32));
}
