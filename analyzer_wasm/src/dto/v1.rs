use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ----------------------------
// Request
// ----------------------------

/// Everything `complete` needs besides the source text.
///
/// Type names are primitive keywords (`float`), `System` runtime names (`System.Single`)
/// or the full name of a type declared in `types`.
#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionRequest {
    pub types: Vec<TypeDecl>,
    pub scope: ScopeDecl,
    pub config: ConfigDecl,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TypeDecl {
    pub namespace: String,
    pub name: String,
    pub generic_arity: u8,
    pub base: Option<String>,
    /// Full name of the enclosing type for nested types; it must be declared earlier.
    pub declaring: Option<String>,
    pub members: Vec<MemberDecl>,
}

#[derive(Deserialize, TS, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberKindDecl {
    #[default]
    Field,
    Property,
    Method,
    Constructor,
    Indexer,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct MemberDecl {
    pub name: String,
    pub kind: MemberKindDecl,
    pub is_static: bool,
    /// Value/return type; `None` means `void`. Ignored for constructors.
    #[serde(rename = "type")]
    pub ty: Option<String>,
    /// Returns the n-th generic argument instead of `type` (`T GetComponent<T>()`).
    pub returns_generic_arg: Option<u8>,
    pub generic_arity: u8,
    pub params: Vec<ParamDecl>,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ParamDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SymbolDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FunctionDecl {
    pub name: String,
    pub returns: Option<String>,
    pub params: Vec<ParamDecl>,
}

#[derive(Deserialize, TS, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeDecl {
    pub locals: Vec<SymbolDecl>,
    pub parameters: Vec<SymbolDecl>,
    pub variables: Vec<SymbolDecl>,
    pub properties: Vec<SymbolDecl>,
    pub functions: Vec<FunctionDecl>,
    pub this_type: Option<String>,
}

#[derive(Deserialize, TS, Clone, Debug, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigDecl {
    pub type_keywords: bool,
    pub statement_keywords: bool,
    pub value_keywords: bool,
    /// `None` accepts every kind.
    pub accepted_kinds: Option<Vec<SymbolKind>>,
    pub max_items: Option<usize>,
}

impl Default for ConfigDecl {
    fn default() -> Self {
        Self {
            type_keywords: true,
            statement_keywords: true,
            value_keywords: true,
            accepted_kinds: None,
            max_items: None,
        }
    }
}

// ----------------------------
// Result
// ----------------------------

/// JS/editor-facing span in UTF-16 code units.
///
/// Ranges are half-open `[start, end)`; `end` is exclusive.
#[derive(Serialize, Deserialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

#[derive(Serialize, Deserialize, TS, Clone, Copy, Debug, PartialEq, Eq)]
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

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: SymbolKind,
    pub detail: Option<String>,
    pub insert_text: String,
}

#[derive(Serialize, TS, Clone, Debug, PartialEq, Eq)]
pub struct PathToken {
    pub text: String,
    pub kind: SymbolKind,
}

#[derive(Serialize, TS, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
    /// Member path before the completed fragment, whitespace excluded.
    pub path: Vec<PathToken>,
    /// Range the chosen item replaces.
    pub replace: Option<Span>,
    /// Set when the request could not be used; `items` is then empty.
    pub error: Option<String>,
}
