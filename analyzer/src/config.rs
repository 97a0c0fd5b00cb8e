use serde::{Deserialize, Serialize};

use crate::symbol::SymbolKindSet;

/// Configuration knobs for one resolution pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Offer/resolve `int`, `float`, `string`, ...
    pub type_keywords: bool,
    /// Offer/resolve `if`, `typeof`, `new`, ...
    pub statement_keywords: bool,
    /// Offer/resolve `true`, `false`, `null`.
    pub value_keywords: bool,
    /// Terminal candidates of other kinds are dropped.
    pub accepted_kinds: SymbolKindSet,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            type_keywords: true,
            statement_keywords: true,
            value_keywords: true,
            accepted_kinds: SymbolKindSet::ALL,
        }
    }
}
