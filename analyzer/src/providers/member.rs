use indexmap::IndexMap;

use super::keyword::keyword_access_type;
use super::types::{constructor_token, namespace_token};
use super::{SymbolProvider, resolve_by_name};
use crate::catalogue::{Catalogue, MemberId, MemberInfo, MemberKind, TypeId, TypeRef};
use crate::context::{AccessTarget, ResolutionContext};
use crate::overload::overload_value_type;
use crate::symbol::{MemberRef, ResolvedMember, SymbolKind, SymbolKindSet, Token};

/// Members of the access target: the token before the dot, or the pending member left by
/// a closed bracket.
pub struct MemberProvider;

impl SymbolProvider for MemberProvider {
    fn name(&self) -> &'static str {
        "members"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::Field
            | SymbolKind::Property
            | SymbolKind::Method
            | SymbolKind::Type
            | SymbolKind::Namespace
            | SymbolKind::Constructor
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let Some(target) = cx.target.clone() else {
            return false;
        };

        let candidates = match access(cx, &target) {
            Access::Namespace(path) => namespace_members(cx, &path),
            Access::Type { ty, is_static } => {
                cx.is_static = is_static;
                type_members(cx.catalogue, ty, is_static)
            }
            Access::DeadEnd => {
                tracing::trace!(target = %target.token.text, "member access dead end");
                return false;
            }
        };

        let names = candidates
            .iter()
            .enumerate()
            .map(|(idx, token)| (idx, token.text.as_str()));
        resolve_by_name(cx, names, |idx| candidates[idx].clone())
    }
}

enum Access {
    Namespace(String),
    Type { ty: TypeId, is_static: bool },
    DeadEnd,
}

fn access(cx: &ResolutionContext<'_>, target: &AccessTarget) -> Access {
    let catalogue = cx.catalogue;
    let token = &target.token;

    let declared = match token.kind {
        SymbolKind::Namespace => {
            return match &token.member_ref {
                Some(ResolvedMember::Namespace(path)) => Access::Namespace(path.clone()),
                _ => Access::DeadEnd,
            };
        }
        SymbolKind::Type if !target.indexed => {
            return match token.member_ref {
                Some(ResolvedMember::Type(ty)) => Access::Type {
                    ty,
                    is_static: true,
                },
                _ => Access::DeadEnd,
            };
        }
        SymbolKind::Keyword => keyword_access_type(catalogue, cx.scope, token),
        SymbolKind::Constructor => token.member().map(|member| member.owner),
        SymbolKind::Field | SymbolKind::Property | SymbolKind::Method => token
            .member()
            .and_then(|member| {
                member_value_type(catalogue, member, target.overload, &target.generic_types)
            }),
        SymbolKind::GraphFunction => match &token.member_ref {
            Some(ResolvedMember::Function { return_type, .. }) => *return_type,
            _ => None,
        },
        _ => token.value_type(),
    };

    let ty = if target.indexed {
        declared.and_then(|ty| catalogue.indexer_type(ty))
    } else {
        declared
    };
    match ty {
        Some(ty) => Access::Type {
            ty,
            is_static: false,
        },
        None => Access::DeadEnd,
    }
}

/// Value type of a member token: the field/property type or the return type of `overload`
/// (the first overload when `None`), with generic method arguments substituted from
/// `generic_types`.
pub(crate) fn member_value_type(
    catalogue: &Catalogue,
    member: &MemberRef,
    overload: Option<MemberId>,
    generic_types: &[TypeId],
) -> Option<TypeId> {
    let overload = overload.or_else(|| member.overloads.first().copied())?;
    overload_value_type(catalogue, overload, generic_types)
}

/// Value a closed call group produces: the selected overload's return type for methods,
/// the constructed type for constructors, the declared return type for graph functions.
pub(crate) fn call_value_type(catalogue: &Catalogue, target: &AccessTarget) -> Option<TypeId> {
    let token = &target.token;
    match token.kind {
        SymbolKind::Method => token.member().and_then(|member| {
            member_value_type(catalogue, member, target.overload, &target.generic_types)
        }),
        SymbolKind::Constructor => token.member().map(|member| member.owner),
        SymbolKind::GraphFunction => match &token.member_ref {
            Some(ResolvedMember::Function { return_type, .. }) => *return_type,
            _ => None,
        },
        _ => None,
    }
}

fn type_members(catalogue: &Catalogue, ty: TypeId, is_static: bool) -> Vec<Token> {
    let mut groups: IndexMap<&str, Vec<(MemberId, &MemberInfo)>> = IndexMap::new();
    for (id, info) in catalogue.members(ty) {
        let visible = info.kind != MemberKind::Constructor
            && !info.is_indexer
            && !info.is_synthesized()
            && info.is_static == is_static;
        if visible {
            groups.entry(info.name.as_str()).or_default().push((id, info));
        }
    }

    groups
        .into_iter()
        .filter_map(|(name, overloads)| {
            let (_, first) = overloads.first()?;
            let kind = match first.kind {
                MemberKind::Field => SymbolKind::Field,
                MemberKind::Property => SymbolKind::Property,
                MemberKind::Method => SymbolKind::Method,
                MemberKind::NestedType => {
                    let TypeRef::Type(nested) = first.ty else {
                        return None;
                    };
                    return Some(
                        Token::new(name, SymbolKind::Type).with_member(ResolvedMember::Type(nested)),
                    );
                }
                MemberKind::Constructor => return None,
            };
            let member = MemberRef {
                owner: ty,
                name: name.to_string(),
                overloads: overloads.into_iter().map(|(id, _)| id).collect(),
            };
            Some(Token::new(name, kind).with_member(ResolvedMember::Member(member)))
        })
        .collect()
}

fn namespace_members(cx: &ResolutionContext<'_>, path: &str) -> Vec<Token> {
    let catalogue = cx.catalogue;
    let constructs = !cx.is_last && namespace_chain_follows_new(cx);

    let mut out: Vec<Token> = catalogue
        .child_namespaces(path)
        .map(|segment| namespace_token(segment, &format!("{path}.{segment}")))
        .collect();

    for id in catalogue.types_in(path) {
        let Some(info) = catalogue.get(*id) else {
            continue;
        };
        out.push(if constructs {
            constructor_token(info.name.clone(), *id, catalogue.constructors(*id))
        } else {
            Token::new(info.name.clone(), SymbolKind::Type).with_member(ResolvedMember::Type(*id))
        });
    }
    out
}

/// `new A.B.` : the namespace chain ending at the current dot starts right after `new`.
fn namespace_chain_follows_new(cx: &ResolutionContext<'_>) -> bool {
    cx.members
        .iter()
        .rev()
        .filter(|token| !token.is_whitespace())
        .find(|token| !token.is_dot() && token.kind != SymbolKind::Namespace)
        .is_some_and(|token| token.is_keyword("new"))
}
