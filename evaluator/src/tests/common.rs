use analyzer::{
    Catalogue, GraphFunction, GraphScope, ParamInfo, Primitive, ResolverConfig, Token, TypeId,
    TypeRef, evaluate, structure,
};

pub struct Fixture {
    pub catalogue: Catalogue,
    pub scope: GraphScope,
    pub float: TypeId,
    pub int: TypeId,
    pub vector3: TypeId,
    pub mathf: TypeId,
    pub component: TypeId,
    pub transform: TypeId,
    pub rigidbody: TypeId,
    pub force_mode: TypeId,
    pub game_object: TypeId,
}

pub fn fixture() -> Fixture {
    let mut b = Catalogue::builder();
    let float = b.primitive(Primitive::Float);
    let int = b.primitive(Primitive::Int);
    let string = b.primitive(Primitive::String);
    let object = b.primitive(Primitive::Object);

    let vector3 = b.add_type("UnityEngine", "Vector3");
    let mathf = b.add_type("UnityEngine", "Mathf");
    let component = b.add_type("UnityEngine", "Component");
    let transform = b.add_type("UnityEngine", "Transform");
    let rigidbody = b.add_type("UnityEngine", "Rigidbody");
    let game_object = b.add_type("UnityEngine", "GameObject");
    let list = b.add_generic_type("System.Collections.Generic", "List", 1);
    b.set_base(transform, component);
    b.set_base(rigidbody, component);

    b.type_mut(vector3)
        .field("x", float)
        .field("y", float)
        .field("z", float)
        .static_property("zero", vector3)
        .constructor(&[("x", float), ("y", float), ("z", float)]);
    b.type_mut(mathf)
        .static_method("Max", float, &[("a", float), ("b", float)])
        .static_method("Max", float, &[("a", float), ("b", float), ("c", float)])
        .static_method("Abs", float, &[("f", float)])
        .static_method("Abs", int, &[("value", int)]);
    b.type_mut(component)
        .property("transform", transform)
        .generic_method("GetComponent", 1, TypeRef::GenericArg(0), &[]);
    b.type_mut(transform).property("position", vector3);
    b.type_mut(rigidbody).property("mass", float);
    let force_mode = b.add_nested_type(rigidbody, "ForceMode");
    b.type_mut(game_object).property("transform", transform);
    b.type_mut(list)
        .property("Count", int)
        .indexer(object, &[("index", int)]);

    let scope = GraphScope::default()
        .with_local("count", int)
        .with_local("items", list)
        .with_parameter("target", game_object)
        .with_variable("speed", float)
        .with_function(GraphFunction {
            name: "Spawn".to_string(),
            return_type: Some(game_object),
            params: vec![ParamInfo::new("name", string)],
        })
        .with_this(component);

    Fixture {
        catalogue: b.build(),
        scope,
        float,
        int,
        vector3,
        mathf,
        component,
        transform,
        rigidbody,
        force_mode,
        game_object,
    }
}

impl Fixture {
    /// Structured tree of the member path typed so far.
    pub fn tree(&self, input: &str) -> Vec<Token> {
        let out = evaluate(input, &self.catalogue, &self.scope, &ResolverConfig::default());
        structure(&out.path)
    }
}
