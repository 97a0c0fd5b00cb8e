use std::fmt;

use analyzer::providers::{integer_suffix_len, literal_primitive};
use analyzer::{KeywordKind, Primitive, SymbolKind, Token};

use crate::EvalError;

/// A materialized literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    /// Held as `f64`; enough for editor-side previews.
    Decimal(f64),
    String(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::UInt(v) => write!(f, "{v}u"),
            Value::Long(v) => write!(f, "{v}L"),
            Value::ULong(v) => write!(f, "{v}UL"),
            Value::Float(v) => write!(f, "{v}f"),
            Value::Double(v) => write!(f, "{v}d"),
            Value::Decimal(v) => write!(f, "{v}m"),
            Value::String(v) => write!(f, "{v:?}"),
        }
    }
}

/// Materializes a `Literal` token or a `true`/`false`/`null` keyword.
pub fn literal_value(token: &Token) -> Result<Value, EvalError> {
    let text = token.text.as_str();
    let invalid = || EvalError::InvalidLiteral(text.to_string());

    if token.kind == SymbolKind::Keyword && token.keyword_kind == Some(KeywordKind::Value) {
        return match text {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            "null" => Ok(Value::Null),
            _ => Err(invalid()),
        };
    }
    if token.kind != SymbolKind::Literal {
        return Err(invalid());
    }

    match literal_primitive(text).ok_or_else(invalid)? {
        Primitive::String => parse_string(text).ok_or_else(invalid),
        Primitive::Float => strip_suffix(text)
            .parse()
            .map(Value::Float)
            .map_err(|_| invalid()),
        Primitive::Double if has_suffix(text) => strip_suffix(text)
            .parse()
            .map(Value::Double)
            .map_err(|_| invalid()),
        Primitive::Double => text.parse().map(Value::Double).map_err(|_| invalid()),
        Primitive::Decimal => strip_suffix(text)
            .parse()
            .map(Value::Decimal)
            .map_err(|_| invalid()),
        integer @ (Primitive::Int | Primitive::UInt | Primitive::Long | Primitive::ULong) => {
            integer_value(text, integer).ok_or_else(invalid)
        }
        _ => Err(invalid()),
    }
}

/// Parses a decimal or `0x` hex integer literal after dropping its `u`/`l`/`ul` suffix.
/// Unsuffixed integers too large for `int` become `long`.
fn integer_value(text: &str, primitive: Primitive) -> Option<Value> {
    let body = text.get(..text.len() - integer_suffix_len(text))?;
    let (digits, radix) = match body.get(..2) {
        Some("0x" | "0X") => (body.get(2..)?, 16),
        _ => (body, 10),
    };
    match primitive {
        Primitive::UInt => u32::from_str_radix(digits, radix).ok().map(Value::UInt),
        Primitive::Long => i64::from_str_radix(digits, radix).ok().map(Value::Long),
        Primitive::ULong => u64::from_str_radix(digits, radix).ok().map(Value::ULong),
        _ => i32::from_str_radix(digits, radix)
            .map(Value::Int)
            .or_else(|_| i64::from_str_radix(digits, radix).map(Value::Long))
            .ok(),
    }
}

fn has_suffix(text: &str) -> bool {
    text.ends_with(|c: char| c.is_ascii_alphabetic())
}

fn strip_suffix(text: &str) -> &str {
    text.strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(text)
}

fn parse_string(text: &str) -> Option<Value> {
    let body = text.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        out.push(match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            _ => return None,
        });
    }
    Some(Value::String(out))
}
