use analyzer::{
    Catalogue, MemberRef, ParamInfo, ResolvedMember, SymbolKind, Token, token_value_type,
};

pub(crate) fn describe(token: &Token, catalogue: &Catalogue) -> Option<String> {
    match (&token.member_ref, token.kind) {
        (Some(ResolvedMember::Namespace(path)), _) => Some(format!("namespace {path}")),
        (Some(ResolvedMember::Type(ty)), _) => catalogue.get(*ty).map(|info| info.full_name()),
        (Some(ResolvedMember::Member(member)), SymbolKind::Method | SymbolKind::Constructor) => {
            call_detail(catalogue, member)
        }
        (Some(ResolvedMember::Member(_)), _) => token_value_type(catalogue, token)
            .map(|ty| format!("{} {}", catalogue.display_name(ty), token.text)),
        (Some(ResolvedMember::Value(ty)), SymbolKind::Literal) => Some(catalogue.display_name(*ty)),
        (Some(ResolvedMember::Value(ty)), _) => {
            Some(format!("{} {}", catalogue.display_name(*ty), token.text))
        }
        (
            Some(ResolvedMember::Function {
                return_type,
                params,
            }),
            _,
        ) => {
            let ret = return_type
                .map_or_else(|| "void".to_string(), |ty| catalogue.display_name(ty));
            Some(format!("{ret} {}", signature(catalogue, &token.text, params)))
        }
        (None, _) => None,
    }
}

/// `Name<T>(p1, p2) +N overload(s)`, rendered from the first overload.
fn call_detail(catalogue: &Catalogue, member: &MemberRef) -> Option<String> {
    let first = catalogue.member(*member.overloads.first()?)?;
    let name = match first.generic_arity {
        0 => member.name.clone(),
        1 => format!("{}<T>", member.name),
        n => {
            let params: Vec<String> = (1..=n).map(|i| format!("T{i}")).collect();
            format!("{}<{}>", member.name, params.join(", "))
        }
    };

    let mut detail = signature(catalogue, &name, &first.params);
    match member.overloads.len() {
        0 | 1 => {}
        2 => detail.push_str(" +1 overload"),
        n => detail.push_str(&format!(" +{} overloads", n - 1)),
    }
    Some(detail)
}

fn signature(catalogue: &Catalogue, name: &str, params: &[ParamInfo]) -> String {
    let params: Vec<String> = params
        .iter()
        .map(|param| catalogue.display_name(param.ty))
        .collect();
    format!("{name}({})", params.join(", "))
}
