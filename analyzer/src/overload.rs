//! Overload selection for structured call tokens.

use crate::catalogue::{Catalogue, MemberId, TypeId, TypeRef};
use crate::providers::member_value_type;
use crate::structure::split_arguments;
use crate::symbol::{MemberRef, ResolvedMember, SymbolKind, Token};

/// Picks the overload of `member` that fits `arguments` (as produced by
/// [`split_arguments`](crate::split_arguments)).
///
/// Candidates must take exactly as many parameters as there are arguments. Among those whose
/// parameter types accept every argument with a known type, the one with the most exact type
/// matches wins (earliest on ties); otherwise the first arity match. `None` when no overload
/// has the right arity.
pub fn select_overload(
    catalogue: &Catalogue,
    member: &MemberRef,
    arguments: &[Vec<Token>],
) -> Option<MemberId> {
    let arg_types: Vec<Option<TypeId>> = arguments
        .iter()
        .map(|arg| argument_type(catalogue, arg))
        .collect();
    select_overload_by_types(catalogue, member, &arg_types)
}

/// [`select_overload`] over already-known argument types (`None` for unknown).
pub fn select_overload_by_types(
    catalogue: &Catalogue,
    member: &MemberRef,
    arg_types: &[Option<TypeId>],
) -> Option<MemberId> {
    let arity_matches: Vec<MemberId> = member
        .overloads
        .iter()
        .copied()
        .filter(|id| {
            catalogue
                .member(*id)
                .is_some_and(|info| info.params.len() == arg_types.len())
        })
        .collect();

    let mut best: Option<(MemberId, usize)> = None;
    for id in &arity_matches {
        let Some(info) = catalogue.member(*id) else {
            continue;
        };
        let mut exact = 0;
        let fits = info.params.iter().zip(arg_types).all(|(param, arg)| match arg {
            Some(ty) if *ty == param.ty => {
                exact += 1;
                true
            }
            Some(ty) => catalogue.is_assignable(*ty, param.ty),
            None => true,
        });
        if fits && best.is_none_or(|(_, score)| exact > score) {
            best = Some((*id, exact));
        }
    }

    let selected = best
        .map(|(id, _)| id)
        .or_else(|| arity_matches.first().copied());
    tracing::trace!(
        member = %member.name,
        arguments = arg_types.len(),
        selected = ?selected,
        "overload selection"
    );
    selected
}

/// Static type of one argument. Known for single values and plain member chains
/// (`a.b.c`); anything with operators is unknown.
pub fn argument_type(catalogue: &Catalogue, argument: &[Token]) -> Option<TypeId> {
    let plain_chain = argument
        .iter()
        .all(|token| token.is_dot() || token.is_name());
    if !plain_chain {
        return None;
    }
    token_value_type(catalogue, argument.last()?)
}

/// Value type of one overload, with generic method arguments substituted from
/// `generic_types`.
pub fn overload_value_type(
    catalogue: &Catalogue,
    overload: MemberId,
    generic_types: &[TypeId],
) -> Option<TypeId> {
    match catalogue.member(overload)?.ty {
        TypeRef::Type(ty) => Some(ty),
        TypeRef::GenericArg(idx) => generic_types.get(idx as usize).copied(),
    }
}

/// The overload a structured member token stands for: the one its call arguments select,
/// or the first one when it is not called or no overload fits.
pub fn token_overload(catalogue: &Catalogue, token: &Token) -> Option<MemberId> {
    let member = token.member()?;
    token
        .parameter_args
        .as_deref()
        .and_then(|group| select_overload(catalogue, member, &split_arguments(group)))
        .or_else(|| member.overloads.first().copied())
}

/// Type of the value a token evaluates to, if it denotes a value. Calls evaluate to the
/// return type of the selected overload; indexed tokens to the indexer's element type.
pub fn token_value_type(catalogue: &Catalogue, token: &Token) -> Option<TypeId> {
    let declared = match (&token.member_ref, token.kind) {
        (Some(ResolvedMember::Value(ty)), _) => Some(*ty),
        (Some(ResolvedMember::Member(member)), SymbolKind::Constructor) => Some(member.owner),
        (Some(ResolvedMember::Member(member)), _) => {
            let generic_types: Vec<TypeId> = token
                .generic_args
                .iter()
                .flatten()
                .filter_map(|arg| match arg.member_ref {
                    Some(ResolvedMember::Type(ty)) => Some(ty),
                    _ => None,
                })
                .collect();
            member_value_type(
                catalogue,
                member,
                token_overload(catalogue, token),
                &generic_types,
            )
        }
        (Some(ResolvedMember::Function { return_type, .. }), _) => *return_type,
        _ => None,
    };

    if token.indexer_args.is_some() {
        declared.and_then(|ty| catalogue.indexer_type(ty))
    } else {
        declared
    }
}
