//! Fragment tokenizer.
//!
//! Splits raw expression text into fragments: whitespace runs, string literals,
//! single punctuation characters and maximal runs of everything else.
//! The split is lossless: `tokenize(s).concat() == s` for every input.

use crate::span::Span;

/// Characters that always form a fragment of their own (outside string literals).
pub const PUNCTUATION: &[char] = &[
    '+', '-', '*', '/', '=', '%', '^', ',', '<', '>', '&', '|', '!', '(', ')', '{', '}', '[', ']',
    '\'', '~', '.',
];

/// Punctuation characters that may combine into multi-character operators (`>=`, `==`, `&&`).
pub const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '=', '%', '^', '<', '>', '&', '|', '!',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunKind {
    Plain,
    Whitespace,
}

struct Splitter {
    fragments: Vec<String>,
    current: String,
    run: RunKind,
}

impl Splitter {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.fragments.push(std::mem::take(&mut self.current));
        }
    }

    fn push_run(&mut self, ch: char, run: RunKind) {
        if !self.current.is_empty() && self.run != run {
            self.flush();
        }
        self.run = run;
        self.current.push(ch);
    }

    /// `1.5f` stays one fragment: a dot continues a numeric run that has no dot yet, as long
    /// as a digit follows it. `1.ToString` splits at the dot.
    fn continues_number(&self, ch: char, next: Option<char>) -> bool {
        ch == '.'
            && next.is_some_and(|c| c.is_ascii_digit())
            && self.run == RunKind::Plain
            && self.current.starts_with(|c: char| c.is_ascii_digit())
            && !self.current.contains('.')
    }
}

/// Where the splitter is relative to a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringState {
    Outside,
    Inside,
    /// Inside, right after a backslash.
    Escaped,
}

/// Split `input` into fragments.
///
/// - Whitespace runs are kept as fragments.
/// - Each [`PUNCTUATION`] character is its own fragment.
/// - `"` opens a string literal that swallows everything up to and including the closing
///   quote. A backslash escapes the character after it (`"a\"b"` is one fragment).
/// - Empty input yields a single empty fragment.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut splitter = Splitter {
        fragments: Vec::new(),
        current: String::new(),
        run: RunKind::Plain,
    };
    let mut string = StringState::Outside;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        match string {
            StringState::Escaped => {
                splitter.current.push(ch);
                string = StringState::Inside;
                continue;
            }
            StringState::Inside => {
                splitter.current.push(ch);
                match ch {
                    '\\' => string = StringState::Escaped,
                    '"' => {
                        string = StringState::Outside;
                        splitter.flush();
                    }
                    _ => {}
                }
                continue;
            }
            StringState::Outside => {}
        }

        if ch == '"' {
            splitter.flush();
            splitter.run = RunKind::Plain;
            splitter.current.push(ch);
            string = StringState::Inside;
            continue;
        }

        if ch.is_whitespace() {
            splitter.push_run(ch, RunKind::Whitespace);
            continue;
        }

        if PUNCTUATION.contains(&ch) {
            if splitter.continues_number(ch, chars.peek().copied()) {
                splitter.current.push(ch);
                continue;
            }
            splitter.flush();
            splitter.fragments.push(ch.to_string());
            continue;
        }

        splitter.push_run(ch, RunKind::Plain);
    }

    splitter.flush();
    if splitter.fragments.is_empty() {
        splitter.fragments.push(String::new());
    }
    splitter.fragments
}

/// True when `fragment` is exactly one punctuation character.
pub fn is_symbol(fragment: &str) -> bool {
    let mut chars = fragment.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if PUNCTUATION.contains(&c))
}

/// True for a non-empty fragment made only of whitespace.
pub fn is_whitespace(fragment: &str) -> bool {
    !fragment.is_empty() && fragment.chars().all(char::is_whitespace)
}

/// True when every character of `text` is an operator character.
pub fn is_operator_text(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| OPERATOR_CHARS.contains(&c))
}

/// Byte spans of `fragments` within the text they were split from.
pub fn fragment_spans(fragments: &[String]) -> Vec<Span> {
    let mut offset = 0u32;
    fragments
        .iter()
        .map(|fragment| {
            let start = offset;
            offset = offset.saturating_add(u32::try_from(fragment.len()).unwrap_or(u32::MAX));
            Span { start, end: offset }
        })
        .collect()
}
