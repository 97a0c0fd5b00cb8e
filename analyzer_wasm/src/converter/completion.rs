use analyzer::{Catalogue, Evaluation, Token};

use crate::converter::Converter;
use crate::dto::v1::{CompletionItem, CompletionResult, PathToken, SymbolKind};
use crate::span::byte_span_to_utf16_span;

impl Converter {
    /// Converts an evaluation of `input` into the JS view.
    ///
    /// `input` must be the exact text the evaluation ran on; the replace span is re-encoded
    /// against it.
    pub fn completion_result(
        input: &str,
        evaluation: &Evaluation,
        catalogue: &Catalogue,
        max_items: Option<usize>,
    ) -> CompletionResult {
        let mut items: Vec<CompletionItem> = evaluation
            .completions
            .iter()
            .map(|token| completion_item_view(ide::CompletionItem::from_token(token, catalogue)))
            .collect();
        if let Some(max) = max_items {
            items.truncate(max);
        }

        CompletionResult {
            items,
            path: evaluation
                .path
                .iter()
                .filter(|token| !token.is_whitespace())
                .map(path_token_view)
                .collect(),
            replace: Some(byte_span_to_utf16_span(input, evaluation.replace)),
            error: None,
        }
    }

    pub fn error_result(message: impl Into<String>) -> CompletionResult {
        CompletionResult {
            error: Some(message.into()),
            ..CompletionResult::default()
        }
    }
}

fn completion_item_view(item: ide::CompletionItem) -> CompletionItem {
    CompletionItem {
        label: item.label,
        kind: item.kind.into(),
        detail: item.detail,
        insert_text: item.insert_text,
    }
}

fn path_token_view(token: &Token) -> PathToken {
    PathToken {
        text: token.text.clone(),
        kind: token.kind.into(),
    }
}

impl From<analyzer::SymbolKind> for SymbolKind {
    fn from(kind: analyzer::SymbolKind) -> Self {
        use analyzer::SymbolKind as K;
        match kind {
            K::Namespace => SymbolKind::Namespace,
            K::Keyword => SymbolKind::Keyword,
            K::Type => SymbolKind::Type,
            K::Field => SymbolKind::Field,
            K::Property => SymbolKind::Property,
            K::Method => SymbolKind::Method,
            K::Constructor => SymbolKind::Constructor,
            K::Literal => SymbolKind::Literal,
            K::Symbol => SymbolKind::Symbol,
            K::LocalVariable => SymbolKind::LocalVariable,
            K::Parameter => SymbolKind::Parameter,
            K::GraphVariable => SymbolKind::GraphVariable,
            K::GraphProperty => SymbolKind::GraphProperty,
            K::GraphFunction => SymbolKind::GraphFunction,
            K::None => SymbolKind::None,
        }
    }
}

impl From<SymbolKind> for analyzer::SymbolKind {
    fn from(kind: SymbolKind) -> Self {
        use analyzer::SymbolKind as K;
        match kind {
            SymbolKind::Namespace => K::Namespace,
            SymbolKind::Keyword => K::Keyword,
            SymbolKind::Type => K::Type,
            SymbolKind::Field => K::Field,
            SymbolKind::Property => K::Property,
            SymbolKind::Method => K::Method,
            SymbolKind::Constructor => K::Constructor,
            SymbolKind::Literal => K::Literal,
            SymbolKind::Symbol => K::Symbol,
            SymbolKind::LocalVariable => K::LocalVariable,
            SymbolKind::Parameter => K::Parameter,
            SymbolKind::GraphVariable => K::GraphVariable,
            SymbolKind::GraphProperty => K::GraphProperty,
            SymbolKind::GraphFunction => K::GraphFunction,
            SymbolKind::None => K::None,
        }
    }
}
