//! Completion items for editor UIs.

use analyzer::{Catalogue, SymbolKind, Token};
use serde::Serialize;

mod detail;

/// One completion candidate for an editor UI.
///
/// Use [`CompletionItem::new`] to construct with defaults, then chain the builder methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    pub label: String,
    pub kind: SymbolKind,
    /// Type or signature summary, e.g. `float x` or `Max(float, float) +1 overload`.
    pub detail: Option<String>,
    pub insert_text: String,
}

impl CompletionItem {
    /// `insert_text` defaults to a clone of `label`.
    pub fn new(label: impl Into<String>, kind: SymbolKind) -> Self {
        let label = label.into();
        Self {
            insert_text: label.clone(),
            label,
            kind,
            detail: None,
        }
    }

    pub fn with_insert_text(mut self, text: impl Into<String>) -> Self {
        self.insert_text = text.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Presents a terminal token from an [`Evaluation`](analyzer::Evaluation).
    pub fn from_token(token: &Token, catalogue: &Catalogue) -> Self {
        let item = CompletionItem::new(token.text.clone(), token.kind);
        match detail::describe(token, catalogue) {
            Some(detail) => item.with_detail(detail),
            None => item,
        }
    }
}
