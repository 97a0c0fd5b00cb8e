//! Resolved tokens and symbol kinds.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::catalogue::{MemberId, ParamInfo, TypeId};
use crate::tokenizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKind {
    Namespace,
    Keyword,
    Type,
    Field,
    Property,
    Method,
    Constructor,
    Literal,
    Symbol,
    LocalVariable,
    Parameter,
    GraphVariable,
    GraphProperty,
    GraphFunction,
    None,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 15] = [
        SymbolKind::Namespace,
        SymbolKind::Keyword,
        SymbolKind::Type,
        SymbolKind::Field,
        SymbolKind::Property,
        SymbolKind::Method,
        SymbolKind::Constructor,
        SymbolKind::Literal,
        SymbolKind::Symbol,
        SymbolKind::LocalVariable,
        SymbolKind::Parameter,
        SymbolKind::GraphVariable,
        SymbolKind::GraphProperty,
        SymbolKind::GraphFunction,
        SymbolKind::None,
    ];

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    /// Kinds that denote a value (member access continues on the value's type).
    pub fn is_value(self) -> bool {
        matches!(
            self,
            SymbolKind::Field
                | SymbolKind::Property
                | SymbolKind::Literal
                | SymbolKind::LocalVariable
                | SymbolKind::Parameter
                | SymbolKind::GraphVariable
                | SymbolKind::GraphProperty
        )
    }

    /// Kinds that take a parenthesized argument list.
    pub fn is_callable(self) -> bool {
        matches!(
            self,
            SymbolKind::Method | SymbolKind::Constructor | SymbolKind::GraphFunction
        )
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Set of [`SymbolKind`]s, used to filter which kinds a caller accepts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolKindSet(u32);

impl SymbolKindSet {
    pub const EMPTY: SymbolKindSet = SymbolKindSet(0);
    pub const ALL: SymbolKindSet = SymbolKindSet((1 << SymbolKind::ALL.len()) - 1);

    pub fn of(kinds: &[SymbolKind]) -> Self {
        kinds.iter().copied().collect()
    }

    pub fn contains(self, kind: SymbolKind) -> bool {
        self.0 & kind.bit() != 0
    }

    pub fn insert(&mut self, kind: SymbolKind) {
        self.0 |= kind.bit();
    }

    pub fn remove(&mut self, kind: SymbolKind) {
        self.0 &= !kind.bit();
    }

    pub fn union(self, other: SymbolKindSet) -> SymbolKindSet {
        SymbolKindSet(self.0 | other.0)
    }

    pub fn without(mut self, kind: SymbolKind) -> SymbolKindSet {
        self.remove(kind);
        self
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn intersects(self, other: SymbolKindSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn iter(self) -> impl Iterator<Item = SymbolKind> {
        SymbolKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

impl Default for SymbolKindSet {
    fn default() -> Self {
        SymbolKindSet::ALL
    }
}

impl fmt::Debug for SymbolKindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<SymbolKind> for SymbolKindSet {
    fn from_iter<I: IntoIterator<Item = SymbolKind>>(iter: I) -> Self {
        let mut set = SymbolKindSet::EMPTY;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl BitOr for SymbolKind {
    type Output = SymbolKindSet;

    fn bitor(self, rhs: SymbolKind) -> SymbolKindSet {
        SymbolKindSet(self.bit() | rhs.bit())
    }
}

impl BitOr<SymbolKind> for SymbolKindSet {
    type Output = SymbolKindSet;

    fn bitor(self, rhs: SymbolKind) -> SymbolKindSet {
        SymbolKindSet(self.0 | rhs.bit())
    }
}

impl From<SymbolKind> for SymbolKindSet {
    fn from(kind: SymbolKind) -> Self {
        SymbolKindSet(kind.bit())
    }
}

/// Sub-table a keyword token came from. Type keywords resolve to `Type` tokens instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeywordKind {
    /// `if`, `for`, `typeof`, `new`, ...
    Statement,
    /// `true`, `false`, `null`.
    Value,
    /// `this`.
    This,
}

/// Catalogue members sharing one name; more than one entry means an overload group.
///
/// `owner` is the type the lookup ran against (for constructors, the constructed type),
/// which may differ from each overload's declaring type when members are inherited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRef {
    pub owner: TypeId,
    pub name: String,
    pub overloads: Vec<MemberId>,
}

/// What a token resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMember {
    /// Full dotted namespace path.
    Namespace(String),
    Type(TypeId),
    Member(MemberRef),
    /// A value of the given type: locals, parameters, graph variables, literals, `this`.
    Value(TypeId),
    Function {
        return_type: Option<TypeId>,
        params: Vec<ParamInfo>,
    },
}

/// Back-reference into the [`GraphScope`](crate::GraphScope) entry a token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolOrigin {
    Local(usize),
    Parameter(usize),
    Variable(usize),
    Property(usize),
    Function(usize),
    This,
}

/// One fragment after resolution: either a consumed path element or a completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub kind: SymbolKind,
    pub keyword_kind: Option<KeywordKind>,
    pub member_ref: Option<ResolvedMember>,
    pub origin: Option<SymbolOrigin>,
    pub parameter_args: Option<Vec<Token>>,
    pub generic_args: Option<Vec<Token>>,
    pub indexer_args: Option<Vec<Token>>,
}

impl Token {
    pub fn new(text: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            text: text.into(),
            kind,
            keyword_kind: None,
            member_ref: None,
            origin: None,
            parameter_args: None,
            generic_args: None,
            indexer_args: None,
        }
    }

    pub fn symbol(text: impl Into<String>) -> Self {
        Self::new(text, SymbolKind::Symbol)
    }

    /// A fragment nothing could resolve; member access off it is a dead end.
    pub fn unresolved(text: impl Into<String>) -> Self {
        Self::new(text, SymbolKind::None)
    }

    pub fn keyword(text: impl Into<String>, keyword_kind: KeywordKind) -> Self {
        let mut token = Self::new(text, SymbolKind::Keyword);
        token.keyword_kind = Some(keyword_kind);
        token
    }

    pub fn with_member(mut self, member: ResolvedMember) -> Self {
        self.member_ref = Some(member);
        self
    }

    pub fn with_origin(mut self, origin: SymbolOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn is_dot(&self) -> bool {
        self.text == "."
    }

    pub fn is_symbol(&self) -> bool {
        self.kind == SymbolKind::Symbol
    }

    pub fn is_whitespace(&self) -> bool {
        tokenizer::is_whitespace(&self.text)
    }

    /// A name token: neither punctuation/operator nor whitespace.
    pub fn is_name(&self) -> bool {
        !self.is_symbol() && !self.is_whitespace()
    }

    pub fn is_keyword(&self, text: &str) -> bool {
        self.kind == SymbolKind::Keyword && self.text == text
    }

    pub fn member(&self) -> Option<&MemberRef> {
        match &self.member_ref {
            Some(ResolvedMember::Member(member)) => Some(member),
            _ => None,
        }
    }

    /// Number of overloads behind a method/constructor token (1 for plain members, 0 if none).
    pub fn overload_count(&self) -> usize {
        self.member().map_or(0, |m| m.overloads.len())
    }

    /// Value type for value tokens (`Value` member references).
    pub fn value_type(&self) -> Option<TypeId> {
        match self.member_ref {
            Some(ResolvedMember::Value(ty)) => Some(ty),
            _ => None,
        }
    }

    /// Moves every argument group out of the token, leaving it flat.
    fn take_groups(&mut self) -> Vec<Token> {
        let mut nested = Vec::new();
        for group in [
            &mut self.generic_args,
            &mut self.parameter_args,
            &mut self.indexer_args,
        ] {
            nested.extend(group.take().into_iter().flatten());
        }
        nested
    }
}

/// Trees can nest as deep as the input (`Abs(Abs(Abs(...`); drop them without recursing.
impl Drop for Token {
    fn drop(&mut self) {
        let mut nested = self.take_groups();
        while let Some(mut token) = nested.pop() {
            nested.extend(token.take_groups());
        }
    }
}
