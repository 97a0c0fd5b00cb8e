//! Mutable state shared by the providers during one resolution pass.

use rustc_hash::FxHashSet;

use crate::catalogue::{Catalogue, MemberId, TypeId};
use crate::config::ResolverConfig;
use crate::scope::GraphScope;
use crate::symbol::{SymbolKind, Token};

/// The token a member-access fragment continues from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTarget {
    pub token: Token,
    /// Types bound by a closed generic-argument list (`GetComponent<Rigidbody>`).
    pub generic_types: Vec<TypeId>,
    /// Set when the target was followed by a closed `[...]`.
    pub indexed: bool,
    /// Overload picked from the arguments of a closed call group.
    pub overload: Option<MemberId>,
}

impl AccessTarget {
    pub fn new(token: Token) -> Self {
        Self {
            token,
            generic_types: Vec::new(),
            indexed: false,
            overload: None,
        }
    }
}

/// Owned by exactly one pass; re-primed by [`ResolutionContext::begin_fragment`] per fragment.
#[derive(Debug)]
pub struct ResolutionContext<'a> {
    pub catalogue: &'a Catalogue,
    pub scope: &'a GraphScope,
    pub config: &'a ResolverConfig,
    /// Raw fragment text.
    pub text: String,
    /// Lowercased fragment text, for prefix matching.
    pub lower: String,
    /// True for the fragment being typed.
    pub is_last: bool,
    /// Set when the fragment follows a dot.
    pub target: Option<AccessTarget>,
    /// Previous non-whitespace token in the member path.
    pub previous: Option<Token>,
    pub members: Vec<Token>,
    pub completions: Vec<Token>,
    pub offered: FxHashSet<String>,
    pub is_static: bool,
}

impl<'a> ResolutionContext<'a> {
    pub fn new(catalogue: &'a Catalogue, scope: &'a GraphScope, config: &'a ResolverConfig) -> Self {
        Self {
            catalogue,
            scope,
            config,
            text: String::new(),
            lower: String::new(),
            is_last: false,
            target: None,
            previous: None,
            members: Vec::new(),
            completions: Vec::new(),
            offered: FxHashSet::default(),
            is_static: true,
        }
    }

    pub fn begin_fragment(&mut self, text: &str, is_last: bool, target: Option<AccessTarget>) {
        self.text = text.to_string();
        self.lower = text.to_lowercase();
        self.is_last = is_last;
        self.target = target;
        self.previous = self
            .members
            .iter()
            .rev()
            .find(|token| !token.is_whitespace())
            .cloned();
    }

    /// Case-insensitive prefix test against the current fragment.
    pub fn matches_prefix(&self, name: &str) -> bool {
        name.to_lowercase().starts_with(&self.lower)
    }

    /// Adds a terminal candidate unless its kind is filtered out or its name was offered.
    pub fn offer(&mut self, token: Token) -> bool {
        if !self.config.accepted_kinds.contains(token.kind) {
            return false;
        }
        if !self.offered.insert(token.text.clone()) {
            return false;
        }
        self.completions.push(token);
        true
    }

    /// Appends a consumed token to the member path.
    pub fn consume(&mut self, token: Token) -> bool {
        self.is_static = matches!(token.kind, SymbolKind::Type | SymbolKind::Namespace);
        tracing::trace!(text = %token.text, kind = %token.kind, "consumed");
        self.members.push(token);
        true
    }

    pub fn follows_keyword(&self, keyword: &str) -> bool {
        self.previous
            .as_ref()
            .is_some_and(|token| token.is_keyword(keyword))
    }
}
