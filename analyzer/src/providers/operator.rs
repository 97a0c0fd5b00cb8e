use super::SymbolProvider;
use crate::context::ResolutionContext;
use crate::symbol::{SymbolKind, SymbolKindSet, Token};
use crate::tokenizer;

/// Punctuation and operator characters. Never offered as completions.
pub struct OperatorProvider;

impl SymbolProvider for OperatorProvider {
    fn name(&self) -> &'static str {
        "operators"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Symbol.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        if cx.is_last || !tokenizer::is_symbol(&cx.text) {
            return false;
        }
        cx.consume(Token::symbol(cx.text.clone()))
    }
}
