use super::{SymbolProvider, resolve_by_name};
use crate::catalogue::{Catalogue, MemberId, TypeId};
use crate::context::ResolutionContext;
use crate::symbol::{MemberRef, ResolvedMember, SymbolKind, SymbolKindSet, Token};

/// Top-level catalogue types by simple name. A type consumed right after `new` becomes a
/// constructor token.
pub struct TypeProvider;

impl SymbolProvider for TypeProvider {
    fn name(&self) -> &'static str {
        "types"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Type | SymbolKind::Constructor
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let catalogue = cx.catalogue;
        let constructs = !cx.is_last && cx.follows_keyword("new");
        let names = catalogue
            .types()
            .filter(|(_, info)| info.declaring.is_none())
            .map(|(id, info)| (id.0 as usize, info.name.as_str()));

        resolve_by_name(cx, names, |idx| {
            let id = TypeId(idx as u32);
            if constructs {
                constructor_token(type_name(catalogue, id), id, catalogue.constructors(id))
            } else {
                Token::new(type_name(catalogue, id), SymbolKind::Type)
                    .with_member(ResolvedMember::Type(id))
            }
        })
    }
}

fn type_name(catalogue: &Catalogue, id: TypeId) -> String {
    catalogue
        .get(id)
        .map(|info| info.name.clone())
        .unwrap_or_default()
}

pub(crate) fn constructor_token(name: String, owner: TypeId, overloads: Vec<MemberId>) -> Token {
    let member = MemberRef {
        owner,
        name: name.clone(),
        overloads,
    };
    Token::new(name, SymbolKind::Constructor).with_member(ResolvedMember::Member(member))
}

/// Root namespace segments. Deeper segments are reached through member access.
pub struct NamespaceProvider;

impl SymbolProvider for NamespaceProvider {
    fn name(&self) -> &'static str {
        "namespaces"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Namespace.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let catalogue = cx.catalogue;
        let roots: Vec<&str> = catalogue.root_namespaces().collect();
        let names = roots.iter().enumerate().map(|(idx, name)| (idx, *name));

        resolve_by_name(cx, names, |idx| namespace_token(roots[idx], roots[idx]))
    }
}

/// A namespace segment token; `path` is the full dotted path it denotes.
pub(crate) fn namespace_token(segment: &str, path: &str) -> Token {
    Token::new(segment, SymbolKind::Namespace)
        .with_member(ResolvedMember::Namespace(path.to_string()))
}
