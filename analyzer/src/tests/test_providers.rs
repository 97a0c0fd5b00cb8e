use super::completion_dsl::t;
use crate::providers::{
    STATEMENT_KEYWORDS, VALUE_KEYWORDS, integer_suffix_len, literal_primitive,
};
use crate::{GraphScope, KeywordKind, Primitive, ResolvedMember, SymbolKind, SymbolKindSet};

// ----------------------------
// Literals
// ----------------------------

#[test]
fn test_literal_primitive_suffixes() {
    assert_eq!(literal_primitive("42"), Some(Primitive::Int));
    assert_eq!(literal_primitive("1.5f"), Some(Primitive::Float));
    assert_eq!(literal_primitive("1.5F"), Some(Primitive::Float));
    assert_eq!(literal_primitive("2d"), Some(Primitive::Double));
    assert_eq!(literal_primitive("3.25"), Some(Primitive::Double));
    assert_eq!(literal_primitive("9m"), Some(Primitive::Decimal));
    assert_eq!(literal_primitive("7u"), Some(Primitive::UInt));
    assert_eq!(literal_primitive("7L"), Some(Primitive::Long));
    assert_eq!(literal_primitive("\"text"), Some(Primitive::String));
    assert_eq!(literal_primitive("count"), None);
    assert_eq!(literal_primitive(""), None);
}

#[test]
fn test_hex_and_two_letter_suffixes() {
    assert_eq!(literal_primitive("0x1F"), Some(Primitive::Int));
    assert_eq!(literal_primitive("0xFD"), Some(Primitive::Int));
    assert_eq!(literal_primitive("0x1Fu"), Some(Primitive::UInt));
    assert_eq!(literal_primitive("0XffL"), Some(Primitive::Long));
    assert_eq!(literal_primitive("10UL"), Some(Primitive::ULong));
    assert_eq!(literal_primitive("10lu"), Some(Primitive::ULong));
    assert_eq!(literal_primitive("0x10uL"), Some(Primitive::ULong));

    assert_eq!(integer_suffix_len("10UL"), 2);
    assert_eq!(integer_suffix_len("10Lu"), 2);
    assert_eq!(integer_suffix_len("10u"), 1);
    assert_eq!(integer_suffix_len("0x1F"), 0);
}

#[test]
fn test_escaped_quote_does_not_close_string_literal() {
    let mut test = t(r#""a\""#);
    test.completion(r#""a\"""#);

    let mut test = t(r#""a\\""#);
    test.completion(r#""a\\""#);
}

#[test]
fn test_string_literal_completion_closes_quote() {
    let mut test = t(r#""Main Cam"#);
    let token = test.completion(r#""Main Cam""#);
    assert_eq!(token.kind, SymbolKind::Literal);
    assert_eq!(
        token.value_type(),
        Some(test.fixture().catalogue.primitive(Primitive::String))
    );
}

#[test]
fn test_numeric_literal_completion_type() {
    let cases = [
        ("42", Primitive::Int),
        ("42u", Primitive::UInt),
        ("3.0", Primitive::Double),
        ("2m", Primitive::Decimal),
        ("7L", Primitive::Long),
    ];
    for (input, primitive) in cases {
        let mut test = t(input);
        let token = test.completion(input);
        assert_eq!(token.kind, SymbolKind::Literal, "input: {input}");
        assert_eq!(
            token.value_type(),
            Some(test.fixture().catalogue.primitive(primitive)),
            "input: {input}"
        );
    }
}

// ----------------------------
// Keywords
// ----------------------------

#[test]
fn test_keyword_tables_are_disjoint() {
    for keyword in VALUE_KEYWORDS {
        assert!(!STATEMENT_KEYWORDS.contains(keyword));
        assert!(Primitive::from_keyword(keyword).is_none());
    }
}

#[test]
fn test_value_keyword_completion() {
    t("tr")
        .expect_contains(&["true", "Transform"])
        .expect_kind("true", SymbolKind::Keyword);

    let token = t("fal").completion("false");
    assert_eq!(token.keyword_kind, Some(KeywordKind::Value));
}

#[test]
fn test_type_keyword_resolves_to_primitive() {
    let mut test = t("flo");
    let token = test.completion("float");
    assert_eq!(token.kind, SymbolKind::Type);
    assert_eq!(token.keyword_kind, None);
    assert_eq!(
        token.member_ref,
        Some(ResolvedMember::Type(
            test.fixture().catalogue.primitive(Primitive::Float)
        ))
    );
    test.expect_labels(&["float"]);
}

#[test]
fn test_keyword_tables_toggle() {
    t("flo")
        .config(|c| c.type_keywords = false)
        .expect_empty();
    t("typeo")
        .expect_labels(&["typeof"])
        .config(|c| c.statement_keywords = false)
        .expect_empty();
    t("nul")
        .config(|c| c.value_keywords = false)
        .expect_empty();
}

#[test]
fn test_this_requires_owner_type() {
    t("thi")
        .expect_labels(&["this"])
        .no_scope()
        .expect_empty();
}

// ----------------------------
// Graph scope
// ----------------------------

#[test]
fn test_scope_symbol_kinds() {
    t("sp")
        .expect_labels(&["Spawn", "speed"])
        .expect_kind("Spawn", SymbolKind::GraphFunction)
        .expect_kind("speed", SymbolKind::GraphVariable);
    t("ta")
        .expect_labels(&["target"])
        .expect_kind("target", SymbolKind::Parameter);
    t("bo")
        .expect_labels(&["body", "bool", "Boolean"])
        .expect_kind("body", SymbolKind::GraphProperty)
        .expect_kind("bool", SymbolKind::Type)
        .expect_kind("Boolean", SymbolKind::Type);
}

#[test]
fn test_earlier_provider_wins_duplicate_names() {
    let test = t("cou");
    let int = test.fixture().int;
    let float = test.fixture().float;
    let mut test = test.scope(
        GraphScope::default()
            .with_local("count", int)
            .with_variable("count", float),
    );

    let token = test.completion("count");
    assert_eq!(token.kind, SymbolKind::LocalVariable);
    test.expect_labels(&["count"]);
}

#[test]
fn test_accepted_kinds_filter() {
    t("")
        .config(|c| c.accepted_kinds = SymbolKind::LocalVariable.into())
        .expect_labels(&["count", "position"]);
    t("position.")
        .config(|c| c.accepted_kinds = SymbolKindSet::of(&[SymbolKind::Field]))
        .expect_labels(&["x", "y", "z"]);
}

// ----------------------------
// Types and namespaces
// ----------------------------

#[test]
fn test_root_namespace_completion() {
    t("Uni")
        .expect_labels(&["UnityEngine"])
        .expect_kind("UnityEngine", SymbolKind::Namespace);
}

#[test]
fn test_namespace_members() {
    t("System.")
        .expect_contains(&["Collections", "Int32", "Single"])
        .expect_kind("Collections", SymbolKind::Namespace)
        .expect_not_contains(&["List"]);
    t("System.Collections.Generic.")
        .expect_labels(&["List"])
        .expect_kind("List", SymbolKind::Type);
}

#[test]
fn test_nested_type_only_through_declaring_type() {
    t("Force").expect_empty();
    t("Rigidbody.")
        .expect_labels(&["ForceMode"])
        .expect_kind("ForceMode", SymbolKind::Type);
}

#[test]
fn test_new_turns_type_into_constructor() {
    let mut test = t("new Vector3(");
    let path = test.path();
    assert_eq!(path[1].kind, SymbolKind::Constructor);
    assert_eq!(path[1].overload_count(), 2);

    t("new UnityEngine.GameObject(").expect_path(&[
        ("new", SymbolKind::Keyword),
        ("UnityEngine", SymbolKind::Namespace),
        (".", SymbolKind::Symbol),
        ("GameObject", SymbolKind::Constructor),
        ("(", SymbolKind::Symbol),
    ]);
}

// ----------------------------
// Members
// ----------------------------

#[test]
fn test_type_member_access_is_static_only() {
    t("Vector3.")
        .expect_labels(&["Distance", "one", "zero"])
        .expect_kind("zero", SymbolKind::Property)
        .expect_kind("Distance", SymbolKind::Method);
}

#[test]
fn test_value_member_access_is_instance_only() {
    t("position.")
        .expect_labels(&["magnitude", "Normalize", "x", "y", "z"])
        .expect_kind("x", SymbolKind::Field);
}

#[test]
fn test_synthesized_and_special_members_are_hidden() {
    t("Vector3.")
        .expect_not_contains(&["op_Addition", ".ctor"]);
    t("position.get")
        .expect_empty();
    t("target.")
        .expect_not_contains(&["Item", "Find"]);
}

#[test]
fn test_overloads_collapse_into_one_candidate() {
    let token = t("Mathf.Ma").completion("Max");
    assert_eq!(token.kind, SymbolKind::Method);
    assert_eq!(token.overload_count(), 2);
}

#[test]
fn test_inherited_members() {
    t("body.")
        .expect_contains(&["velocity", "mass", "gameObject", "GetComponent"])
        .expect_not_contains(&["ForceMode"]);
}

#[test]
fn test_keyword_member_access() {
    t("this.").expect_labels(&["gameObject", "GetComponent", "transform"]);
    t("true.").expect_empty();
    t("null.").expect_empty();
    t("typeof.").expect_empty();
}

#[test]
fn test_unknown_target_is_dead_end() {
    t("missing.").expect_empty();
    t("missing.x.").expect_empty();
    t("this.").no_scope().expect_empty();
}
