use super::SymbolProvider;
use crate::catalogue::{Catalogue, Primitive, TypeId};
use crate::context::ResolutionContext;
use crate::scope::GraphScope;
use crate::symbol::{KeywordKind, ResolvedMember, SymbolKind, SymbolKindSet, SymbolOrigin, Token};

pub const STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "using", "typeof", "nameof", "sizeof", "new",
    "return", "is", "as", "in", "out", "ref", "switch", "case", "default", "break", "continue",
    "var",
];

pub const VALUE_KEYWORDS: &[&str] = &["true", "false", "null"];

const THIS_KEYWORD: &str = "this";

/// Type, statement and value keywords, plus `this`.
pub struct KeywordProvider;

impl SymbolProvider for KeywordProvider {
    fn name(&self) -> &'static str {
        "keyword"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Keyword | SymbolKind::Type
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let candidates = candidates(cx);

        if cx.is_last {
            for token in candidates {
                if cx.matches_prefix(&token.text) {
                    cx.offer(token);
                }
            }
            return false;
        }

        match candidates.into_iter().find(|token| token.text == cx.text) {
            Some(token) => cx.consume(token),
            None => false,
        }
    }
}

fn candidates(cx: &ResolutionContext<'_>) -> Vec<Token> {
    let catalogue = cx.catalogue;
    let mut out = Vec::new();

    if cx.config.type_keywords {
        for primitive in Primitive::ALL {
            out.push(
                Token::new(primitive.keyword(), SymbolKind::Type)
                    .with_member(ResolvedMember::Type(catalogue.primitive(primitive))),
            );
        }
    }
    if cx.config.statement_keywords {
        for keyword in STATEMENT_KEYWORDS {
            out.push(Token::keyword(*keyword, KeywordKind::Statement));
        }
    }
    if cx.config.value_keywords {
        for keyword in VALUE_KEYWORDS {
            let token = Token::keyword(*keyword, KeywordKind::Value);
            out.push(match value_keyword_type(catalogue, keyword) {
                Some(ty) => token.with_member(ResolvedMember::Value(ty)),
                None => token,
            });
        }
    }
    if let Some(this_type) = cx.scope.this_type {
        out.push(
            Token::keyword(THIS_KEYWORD, KeywordKind::This)
                .with_member(ResolvedMember::Value(this_type))
                .with_origin(SymbolOrigin::This),
        );
    }
    out
}

fn value_keyword_type(catalogue: &Catalogue, keyword: &str) -> Option<TypeId> {
    match keyword {
        "true" | "false" => Some(catalogue.primitive(Primitive::Bool)),
        _ => None,
    }
}

/// Type whose instance members follow `keyword.`; `None` is a dead end (`null.`).
///
/// # Panics
///
/// Panics for keywords with no member-access rule. The resolver never routes statement
/// keywords here, so reaching the panic means the provider wiring is broken.
pub(crate) fn keyword_access_type(
    catalogue: &Catalogue,
    scope: &GraphScope,
    keyword: &Token,
) -> Option<TypeId> {
    match keyword.keyword_kind {
        Some(KeywordKind::This) => scope.this_type,
        Some(KeywordKind::Value) => value_keyword_type(catalogue, &keyword.text),
        Some(KeywordKind::Statement) | None => {
            panic!("keyword `{}` has no member-access rule", keyword.text)
        }
    }
}
