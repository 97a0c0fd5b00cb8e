use crate::{
    Catalogue, GraphFunction, GraphScope, ParamInfo, Primitive, TypeId, TypeRef,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Small Unity-flavoured catalogue shared by the analyzer tests.
pub struct Fixture {
    pub catalogue: Catalogue,
    pub float: TypeId,
    pub int: TypeId,
    pub string: TypeId,
    pub vector3: TypeId,
    pub mathf: TypeId,
    pub component: TypeId,
    pub transform: TypeId,
    pub rigidbody: TypeId,
    pub force_mode: TypeId,
    pub game_object: TypeId,
    pub list: TypeId,
}

pub fn fixture() -> Fixture {
    let mut b = Catalogue::builder();
    let float = b.primitive(Primitive::Float);
    let int = b.primitive(Primitive::Int);
    let bool_ty = b.primitive(Primitive::Bool);
    let string = b.primitive(Primitive::String);
    let object = b.primitive(Primitive::Object);
    let void = b.primitive(Primitive::Void);

    let vector3 = b.add_type("UnityEngine", "Vector3");
    let mathf = b.add_type("UnityEngine", "Mathf");
    let component = b.add_type("UnityEngine", "Component");
    let transform = b.add_type("UnityEngine", "Transform");
    let rigidbody = b.add_type("UnityEngine", "Rigidbody");
    let game_object = b.add_type("UnityEngine", "GameObject");
    let list = b.add_generic_type("System.Collections.Generic", "List", 1);
    b.set_base(transform, component);
    b.set_base(rigidbody, component);

    b.type_mut(object)
        .method("ToString", string, &[])
        .method("GetHashCode", int, &[]);

    b.type_mut(int).method("CompareTo", int, &[("value", int)]);

    b.type_mut(vector3)
        .field("x", float)
        .field("y", float)
        .field("z", float)
        .property("magnitude", float)
        .method("get_magnitude", float, &[])
        .method("Normalize", void, &[])
        .static_property("zero", vector3)
        .static_property("one", vector3)
        .static_method("Distance", float, &[("a", vector3), ("b", vector3)])
        .static_method("op_Addition", vector3, &[("a", vector3), ("b", vector3)])
        .constructor(&[("x", float), ("y", float), ("z", float)])
        .constructor(&[("x", float), ("y", float)]);

    b.type_mut(mathf)
        .static_field("PI", float)
        .static_method("Max", float, &[("a", float), ("b", float)])
        .static_method("Max", float, &[("a", float), ("b", float), ("c", float)])
        .static_method("Abs", float, &[("f", float)])
        .static_method("Abs", int, &[("value", int)]);

    b.type_mut(component)
        .property("gameObject", game_object)
        .property("transform", transform)
        .generic_method("GetComponent", 1, TypeRef::GenericArg(0), &[]);

    b.type_mut(transform)
        .property("position", vector3)
        .method("Find", transform, &[("name", string)]);

    b.type_mut(rigidbody)
        .property("velocity", vector3)
        .property("mass", float);
    let force_mode = b.add_nested_type(rigidbody, "ForceMode");

    b.type_mut(game_object)
        .property("transform", transform)
        .generic_method("GetComponent", 1, TypeRef::GenericArg(0), &[])
        .method("SetActive", void, &[("value", bool_ty)])
        .static_method("Find", game_object, &[("name", string)])
        .constructor(&[])
        .constructor(&[("name", string)]);

    b.type_mut(list)
        .property("Count", int)
        .method("Add", void, &[("item", object)])
        .indexer(object, &[("index", int)])
        .constructor(&[]);

    Fixture {
        catalogue: b.build(),
        float,
        int,
        string,
        vector3,
        mathf,
        component,
        transform,
        rigidbody,
        force_mode,
        game_object,
        list,
    }
}

impl Fixture {
    /// Locals, parameters, graph symbols and `this` over the fixture types.
    pub fn scope(&self) -> GraphScope {
        GraphScope::default()
            .with_local("count", self.int)
            .with_local("position", self.vector3)
            .with_parameter("target", self.game_object)
            .with_variable("speed", self.float)
            .with_property("body", self.rigidbody)
            .with_function(GraphFunction {
                name: "Spawn".to_string(),
                return_type: Some(self.game_object),
                params: vec![ParamInfo::new("name", self.string)],
            })
            .with_this(self.component)
    }
}
