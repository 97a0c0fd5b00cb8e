use analyzer::{
    Catalogue, KeywordKind, MemberId, MemberRef, ResolvedMember, SymbolKind, SymbolOrigin, Token,
    TypeId, overload_value_type, render_tree, select_overload, split_arguments, token_value_type,
};

use crate::{EvalError, Value, literal_value};

/// Deepest argument-group nesting [`to_member_reference`] converts. Conversion recurses once
/// per level.
pub const MAX_NESTING: usize = 64;

/// Where a member chain starts.
#[derive(Debug, Clone, PartialEq)]
pub enum Root {
    /// Static access through a type name (also the constructed type of `new T(..)`).
    Type(TypeId),
    This(TypeId),
    /// A symbol declared by the edited graph.
    Symbol {
        name: String,
        kind: SymbolKind,
        origin: Option<SymbolOrigin>,
        /// Declared type; for graph functions, the return type.
        ty: Option<TypeId>,
        arguments: Option<Vec<Argument>>,
        indexer: Option<Vec<Argument>>,
    },
    Literal(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Value(Value),
    Reference(MemberReference),
}

/// One `.name` step of a chain, with its call and indexer groups.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberItem {
    pub name: String,
    pub kind: SymbolKind,
    pub member: MemberRef,
    /// The overload chosen from the call arguments, or the first one for plain member access.
    pub overload: Option<MemberId>,
    pub generic_types: Vec<TypeId>,
    /// `None` when the member is not called.
    pub arguments: Option<Vec<Argument>>,
    pub indexer: Option<Vec<Argument>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberReference {
    pub root: Root,
    /// Type the first item is looked up on.
    pub target_type: Option<TypeId>,
    pub is_static: bool,
    pub items: Vec<MemberItem>,
    /// Type of the value the whole chain produces. `None` for a bare type name.
    pub value_type: Option<TypeId>,
}

/// Converts a structured tree (see [`analyzer::structure`]) into a [`MemberReference`].
///
/// Leading `new` and namespace qualifiers are skipped. A trailing `.` is ignored so that
/// the path of an in-progress completion converts as well. Trees nested deeper than
/// [`MAX_NESTING`] are rejected with [`EvalError::TooDeep`].
pub fn to_member_reference(
    tree: &[Token],
    catalogue: &Catalogue,
) -> Result<MemberReference, EvalError> {
    if nesting_depth(tree) > MAX_NESTING {
        return Err(EvalError::TooDeep { limit: MAX_NESTING });
    }
    convert_reference(tree, catalogue)
}

/// Deepest argument-group nesting below `tree`, without recursing.
fn nesting_depth(tree: &[Token]) -> usize {
    let mut deepest = 0;
    let mut levels: Vec<(&[Token], usize)> = vec![(tree, 0)];
    while let Some((level, depth)) = levels.pop() {
        deepest = deepest.max(depth);
        for token in level {
            let groups = [
                &token.generic_args,
                &token.parameter_args,
                &token.indexer_args,
            ];
            for group in groups.into_iter().flatten() {
                levels.push((group.as_slice(), depth + 1));
            }
        }
    }
    deepest
}

fn convert_reference(
    tree: &[Token],
    catalogue: &Catalogue,
) -> Result<MemberReference, EvalError> {
    let tokens: Vec<&Token> = tree.iter().filter(|token| !token.is_whitespace()).collect();
    let Some(last) = tokens.last() else {
        return Err(EvalError::EmptyExpression);
    };

    let mut start = 0;
    while let Some(token) = tokens.get(start) {
        let qualifier = (start == 0 && token.is_keyword("new"))
            || token.kind == SymbolKind::Namespace
            || (token.is_dot() && start > 0 && tokens[start - 1].kind == SymbolKind::Namespace);
        if !qualifier {
            break;
        }
        start += 1;
    }
    let Some(head) = tokens.get(start) else {
        return Err(EvalError::UnsupportedToken(last.text.clone()));
    };

    let (mut root, mut items) = convert_root(head, catalogue)?;
    let target_type = match &root {
        Root::Type(ty) | Root::This(ty) => Some(*ty),
        Root::Symbol { .. } | Root::Literal(_) => token_value_type(catalogue, head),
    };

    let mut tail = *head;
    let mut tail_is_item = false;
    let mut rest = tokens[start + 1..].iter();
    while let Some(token) = rest.next() {
        if !token.is_dot() {
            return Err(EvalError::UnsupportedToken(token.text.clone()));
        }
        let Some(next) = rest.next() else {
            break;
        };
        match (next.kind, &next.member_ref) {
            (SymbolKind::None, _) => return Err(EvalError::UnresolvedSymbol(next.text.clone())),
            (SymbolKind::Type, Some(ResolvedMember::Type(nested)))
                if items.is_empty() && matches!(root, Root::Type(_)) =>
            {
                root = Root::Type(*nested);
                tail_is_item = false;
            }
            (SymbolKind::Field | SymbolKind::Property | SymbolKind::Method, _) => {
                items.push(member_item(next, catalogue)?);
                tail_is_item = true;
            }
            _ => return Err(EvalError::UnsupportedToken(next.text.clone())),
        }
        tail = *next;
    }

    let is_static = matches!(root, Root::Type(_));
    let target_type = match &root {
        Root::Type(ty) => Some(*ty),
        _ => target_type,
    };
    let value_type = match items.last().filter(|_| tail_is_item) {
        Some(item) => item_value_type(item, catalogue),
        None => token_value_type(catalogue, tail),
    };
    tracing::debug!(
        items = items.len(),
        is_static,
        "member reference built"
    );

    Ok(MemberReference {
        root,
        target_type,
        is_static,
        items,
        value_type,
    })
}

fn convert_root(head: &Token, catalogue: &Catalogue) -> Result<(Root, Vec<MemberItem>), EvalError> {
    let root = match head.kind {
        SymbolKind::Type => match head.member_ref {
            Some(ResolvedMember::Type(ty)) => Root::Type(ty),
            _ => return Err(EvalError::UnresolvedSymbol(head.text.clone())),
        },
        SymbolKind::Constructor => {
            let item = member_item(head, catalogue)?;
            return Ok((Root::Type(item.member.owner), vec![item]));
        }
        SymbolKind::Keyword => match head.keyword_kind {
            Some(KeywordKind::This) => match head.value_type() {
                Some(ty) => Root::This(ty),
                None => return Err(EvalError::UnresolvedSymbol(head.text.clone())),
            },
            Some(KeywordKind::Value) => Root::Literal(literal_value(head)?),
            _ => return Err(EvalError::UnsupportedToken(head.text.clone())),
        },
        SymbolKind::Literal => Root::Literal(literal_value(head)?),
        SymbolKind::LocalVariable
        | SymbolKind::Parameter
        | SymbolKind::GraphVariable
        | SymbolKind::GraphProperty
        | SymbolKind::GraphFunction => scope_root(head, catalogue)?,
        SymbolKind::None => return Err(EvalError::UnresolvedSymbol(head.text.clone())),
        _ => return Err(EvalError::UnsupportedToken(head.text.clone())),
    };
    Ok((root, Vec::new()))
}

fn scope_root(head: &Token, catalogue: &Catalogue) -> Result<Root, EvalError> {
    let (ty, params) = match &head.member_ref {
        Some(ResolvedMember::Value(ty)) => (Some(*ty), None),
        Some(ResolvedMember::Function {
            return_type,
            params,
        }) => (*return_type, Some(params.len())),
        _ => return Err(EvalError::UnresolvedSymbol(head.text.clone())),
    };

    let arguments = match (&head.parameter_args, params) {
        (Some(group), Some(arity)) => {
            let args = split_arguments(group);
            if args.len() != arity {
                return Err(EvalError::NoMatchingOverload {
                    name: head.text.clone(),
                    arity: args.len(),
                });
            }
            Some(convert_arguments(&args, catalogue)?)
        }
        (Some(_), None) => return Err(EvalError::UnsupportedToken(head.text.clone())),
        (None, _) => None,
    };

    Ok(Root::Symbol {
        name: head.text.clone(),
        kind: head.kind,
        origin: head.origin,
        ty,
        arguments,
        indexer: convert_indexer(head, catalogue)?,
    })
}

fn member_item(token: &Token, catalogue: &Catalogue) -> Result<MemberItem, EvalError> {
    let member = token
        .member()
        .cloned()
        .ok_or_else(|| EvalError::UnresolvedSymbol(token.text.clone()))?;

    let generic_types = token
        .generic_args
        .iter()
        .flatten()
        .filter_map(|arg| match arg.member_ref {
            Some(ResolvedMember::Type(ty)) => Some(ty),
            _ => None,
        })
        .collect();

    let (overload, arguments) = match &token.parameter_args {
        Some(group) => {
            let args = split_arguments(group);
            let overload = select_overload(catalogue, &member, &args).ok_or_else(|| {
                EvalError::NoMatchingOverload {
                    name: member.name.clone(),
                    arity: args.len(),
                }
            })?;
            (Some(overload), Some(convert_arguments(&args, catalogue)?))
        }
        None => (member.overloads.first().copied(), None),
    };

    Ok(MemberItem {
        name: token.text.clone(),
        kind: token.kind,
        member,
        overload,
        generic_types,
        arguments,
        indexer: convert_indexer(token, catalogue)?,
    })
}

/// Value an item produces: its selected overload's type, or the indexer element type when
/// the item is indexed.
fn item_value_type(item: &MemberItem, catalogue: &Catalogue) -> Option<TypeId> {
    let ty = overload_value_type(catalogue, item.overload?, &item.generic_types)?;
    match item.indexer {
        Some(_) => catalogue.indexer_type(ty),
        None => Some(ty),
    }
}

fn convert_indexer(token: &Token, catalogue: &Catalogue) -> Result<Option<Vec<Argument>>, EvalError> {
    token
        .indexer_args
        .as_ref()
        .map(|group| convert_arguments(&split_arguments(group), catalogue))
        .transpose()
}

fn convert_arguments(args: &[Vec<Token>], catalogue: &Catalogue) -> Result<Vec<Argument>, EvalError> {
    args.iter().map(|arg| convert_argument(arg, catalogue)).collect()
}

fn convert_argument(arg: &[Token], catalogue: &Catalogue) -> Result<Argument, EvalError> {
    match arg {
        [] => Err(EvalError::UnsupportedArgument(String::new())),
        [single] if is_literal(single) && single.indexer_args.is_none() => {
            literal_value(single).map(Argument::Value)
        }
        _ if arg.iter().all(|token| token.is_dot() || token.is_name()) => {
            convert_reference(arg, catalogue).map(Argument::Reference)
        }
        _ => Err(EvalError::UnsupportedArgument(render_tree(arg))),
    }
}

fn is_literal(token: &Token) -> bool {
    token.kind == SymbolKind::Literal
        || (token.kind == SymbolKind::Keyword && token.keyword_kind == Some(KeywordKind::Value))
}
