//! Expression completion analyzer.
//!
//! Pipeline: tokenize → resolve (member path + terminal completions) → structure.
//! All spans are UTF-8 byte offsets into the original input, using `[start, end)`.
//! UTF-16 conversion for editors happens in `analyzer_wasm`.

mod catalogue;
mod config;
mod context;
mod overload;
pub mod providers;
mod resolver;
mod scope;
mod span;
mod structure;
mod symbol;
pub mod tokenizer;

#[cfg(test)]
mod tests;

pub use catalogue::{
    Catalogue, CatalogueBuilder, MemberId, MemberInfo, MemberKind, ParamInfo, Primitive,
    SYSTEM_NAMESPACE, TypeBuilder, TypeId, TypeInfo, TypeRef,
};
pub use config::ResolverConfig;
pub use context::{AccessTarget, ResolutionContext};
pub use overload::{
    argument_type, overload_value_type, select_overload, select_overload_by_types, token_overload,
    token_value_type,
};
pub use resolver::{BracketKind, Evaluation, evaluate, evaluate_cancellable};
pub use scope::{GraphFunction, GraphScope, ScopeSymbol};
pub use span::Span;
pub use structure::{
    GroupScan, generic_group, indexer_group, parameter_group, render_tree, split_arguments,
    structure,
};
pub use symbol::{
    KeywordKind, MemberRef, ResolvedMember, SymbolKind, SymbolKindSet, SymbolOrigin, Token,
};
pub use tokenizer::tokenize;
