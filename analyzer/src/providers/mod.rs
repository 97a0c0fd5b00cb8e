//! Symbol providers.
//!
//! Each provider resolves the current fragment against one symbol category. In terminal mode
//! (the fragment being typed) a provider offers every prefix match and never stops the chain.
//! Otherwise it consumes at most one exact match and returns `true`, which stops the chain.

mod keyword;
mod literal;
mod member;
mod operator;
mod scope;
mod types;

pub use keyword::{KeywordProvider, STATEMENT_KEYWORDS, VALUE_KEYWORDS};
pub(crate) use keyword::keyword_access_type;
pub use literal::{LiteralProvider, integer_suffix_len, literal_primitive};
pub use member::MemberProvider;
pub(crate) use member::{call_value_type, member_value_type};
pub use operator::OperatorProvider;
pub use scope::{GraphFunctionProvider, ScopeSymbolProvider};
pub use types::{NamespaceProvider, TypeProvider};

use crate::context::ResolutionContext;
use crate::symbol::{SymbolKind, SymbolKindSet, Token};

pub trait SymbolProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Kinds this provider can produce; used to skip providers the caller filters out.
    fn kinds(&self) -> SymbolKindSet;

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool;
}

/// Fallback for fresh names nothing else recognized.
pub struct UnknownNameProvider;

impl SymbolProvider for UnknownNameProvider {
    fn name(&self) -> &'static str {
        "unknown"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::None.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        if cx.is_last {
            return false;
        }
        tracing::trace!(text = %cx.text, "unresolved fragment");
        cx.consume(Token::unresolved(cx.text.clone()))
    }
}

/// Fresh-chain priority order.
pub static FRESH_CHAIN: [&dyn SymbolProvider; 11] = [
    &LiteralProvider,
    &KeywordProvider,
    &ScopeSymbolProvider::LOCALS,
    &ScopeSymbolProvider::PARAMETERS,
    &ScopeSymbolProvider::VARIABLES,
    &ScopeSymbolProvider::PROPERTIES,
    &GraphFunctionProvider,
    &TypeProvider,
    &NamespaceProvider,
    &OperatorProvider,
    &UnknownNameProvider,
];

/// Runs `providers` in order. Terminal fragments visit every provider; otherwise the first
/// provider that consumes the fragment wins.
pub fn run_chain(providers: &[&dyn SymbolProvider], cx: &mut ResolutionContext<'_>) -> bool {
    if cx.is_last {
        let accepted = cx.config.accepted_kinds;
        for provider in providers {
            if provider.kinds().intersects(accepted) {
                provider.try_resolve(cx);
            }
        }
        return false;
    }

    for provider in providers {
        if provider.try_resolve(cx) {
            tracing::trace!(provider = provider.name(), text = %cx.text, "resolved");
            return true;
        }
    }
    false
}

/// Shared name matching: offers prefix matches in terminal mode, consumes the first exact
/// match otherwise. `make` builds the token for the candidate at the given position.
pub(crate) fn resolve_by_name<'n, I, F>(cx: &mut ResolutionContext<'_>, names: I, make: F) -> bool
where
    I: IntoIterator<Item = (usize, &'n str)>,
    F: Fn(usize) -> Token,
{
    if cx.is_last {
        for (idx, name) in names {
            if cx.matches_prefix(name) && !cx.offered.contains(name) {
                cx.offer(make(idx));
            }
        }
        return false;
    }

    for (idx, name) in names {
        if name == cx.text {
            return cx.consume(make(idx));
        }
    }
    false
}
