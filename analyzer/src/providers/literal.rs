use super::SymbolProvider;
use crate::catalogue::Primitive;
use crate::context::ResolutionContext;
use crate::symbol::{ResolvedMember, SymbolKind, SymbolKindSet, Token};

/// String and numeric literals.
pub struct LiteralProvider;

impl SymbolProvider for LiteralProvider {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Literal.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let Some(primitive) = literal_primitive(&cx.text) else {
            return false;
        };
        let ty = cx.catalogue.primitive(primitive);

        let mut text = cx.text.clone();
        if primitive == Primitive::String && !is_closed_string(&text) {
            text.push('"');
        }
        let token = Token::new(text, SymbolKind::Literal).with_member(ResolvedMember::Value(ty));

        if cx.is_last {
            cx.offer(token);
            return false;
        }
        cx.consume(token)
    }
}

/// Literal type implied by the fragment's first character and numeric suffix.
///
/// Numeric suffixes: `f` float, `d` double, `m` decimal, `u` uint, `l` long, `ul`/`lu`
/// ulong. Without a suffix the literal is an `int`, or a `double` when it contains a decimal
/// point. Hex literals (`0x1F`) are integers; their digits never count as a suffix.
pub fn literal_primitive(text: &str) -> Option<Primitive> {
    let first = text.chars().next()?;
    if first == '"' {
        return Some(Primitive::String);
    }
    if !first.is_ascii_digit() {
        return None;
    }

    let lower = text.to_ascii_lowercase();
    let hex = lower.starts_with("0x");
    let primitive = match lower.chars().last() {
        _ if lower.ends_with("ul") || lower.ends_with("lu") => Primitive::ULong,
        Some('u') => Primitive::UInt,
        Some('l') => Primitive::Long,
        _ if hex => Primitive::Int,
        Some('f') => Primitive::Float,
        Some('d') => Primitive::Double,
        Some('m') => Primitive::Decimal,
        _ if text.contains('.') => Primitive::Double,
        _ => Primitive::Int,
    };
    Some(primitive)
}

/// Length of the integer suffix (`u`, `l`, `ul`, `lu`, any case) at the end of `text`.
pub fn integer_suffix_len(text: &str) -> usize {
    let lower = text.to_ascii_lowercase();
    if lower.ends_with("ul") || lower.ends_with("lu") {
        2
    } else if lower.ends_with(['u', 'l']) {
        1
    } else {
        0
    }
}

/// True when the literal ends in an unescaped closing quote.
fn is_closed_string(text: &str) -> bool {
    let Some(body) = text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) else {
        return false;
    };
    let backslashes = body.chars().rev().take_while(|c| *c == '\\').count();
    backslashes % 2 == 0
}
