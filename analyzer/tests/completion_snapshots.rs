use analyzer::{
    Catalogue, GraphScope, Primitive, ResolverConfig, evaluate, render_tree, structure,
};

struct Setup {
    catalogue: Catalogue,
    scope: GraphScope,
}

fn setup() -> Setup {
    let mut b = Catalogue::builder();
    let float = b.primitive(Primitive::Float);
    let vector3 = b.add_type("UnityEngine", "Vector3");
    let mathf = b.add_type("UnityEngine", "Mathf");

    b.type_mut(vector3)
        .field("x", float)
        .field("y", float)
        .field("z", float)
        .static_property("zero", vector3)
        .static_method("Distance", float, &[("a", vector3), ("b", vector3)]);
    b.type_mut(mathf)
        .static_method("Max", float, &[("a", float), ("b", float)])
        .static_method("Max", float, &[("a", float), ("b", float), ("c", float)]);

    Setup {
        catalogue: b.build(),
        scope: GraphScope::default()
            .with_local("position", vector3)
            .with_variable("speed", float),
    }
}

fn completions(input: &str) -> String {
    let Setup { catalogue, scope } = setup();
    let out = evaluate(input, &catalogue, &scope, &ResolverConfig::default());
    out.completions
        .iter()
        .map(|token| format!("{}: {}", token.text, token.kind))
        .collect::<Vec<_>>()
        .join("\n")
}

fn tree(input: &str) -> String {
    let Setup { catalogue, scope } = setup();
    let out = evaluate(input, &catalogue, &scope, &ResolverConfig::default());
    render_tree(&structure(&out.path))
}

#[test]
fn instance_member_completions() {
    insta::assert_snapshot!(completions("position."), @r"
    x: Field
    y: Field
    z: Field
    ");
}

#[test]
fn static_member_completions() {
    insta::assert_snapshot!(completions("Vector3."), @r"
    Distance: Method
    zero: Property
    ");
}

#[test]
fn graph_symbol_completions() {
    insta::assert_snapshot!(completions("sp"), @"speed: GraphVariable");
}

#[test]
fn structured_call_tree() {
    insta::assert_snapshot!(
        tree("Mathf.Max(position.x, Vector3.Distance(position, Vector3.zero))"),
        @"Mathf . Max(position . x , Vector3 . Distance(position , Vector3 . zero))"
    );
}
