use std::sync::Arc;

use analyzer::{
    Catalogue, CatalogueBuilder, GraphFunction, GraphScope, ParamInfo, Primitive, TypeRef,
};

use crate::{CompletionEngine, EngineConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn builder() -> CatalogueBuilder {
    let mut b = Catalogue::builder();
    let float = b.primitive(Primitive::Float);
    let string = b.primitive(Primitive::String);

    let vector3 = b.add_type("UnityEngine", "Vector3");
    let mathf = b.add_type("UnityEngine", "Mathf");
    let component = b.add_type("UnityEngine", "Component");
    let game_object = b.add_type("UnityEngine", "GameObject");

    b.type_mut(vector3)
        .field("x", float)
        .field("y", float)
        .field("z", float)
        .static_property("zero", vector3)
        .static_property("one", vector3)
        .constructor(&[("x", float), ("y", float), ("z", float)]);
    b.type_mut(mathf)
        .static_method("Max", float, &[("a", float), ("b", float)])
        .static_method("Max", float, &[("a", float), ("b", float), ("c", float)])
        .static_method("Min", float, &[("a", float), ("b", float)]);
    b.type_mut(component)
        .property("gameObject", game_object)
        .generic_method("GetComponent", 1, TypeRef::GenericArg(0), &[]);
    b.type_mut(game_object)
        .static_method("Find", game_object, &[("name", string)]);
    b
}

pub fn scope(catalogue: &Catalogue) -> GraphScope {
    let find = |name: &str| catalogue.find_type(name).expect("fixture type");
    GraphScope::default()
        .with_local("position", find("UnityEngine.Vector3"))
        .with_function(GraphFunction {
            name: "Spawn".to_string(),
            return_type: Some(find("UnityEngine.GameObject")),
            params: vec![ParamInfo::new("name", catalogue.primitive(Primitive::String))],
        })
        .with_this(find("UnityEngine.Component"))
}

pub fn engine(config: EngineConfig) -> (CompletionEngine, GraphScope) {
    init_tracing();
    let catalogue = Arc::new(builder().build());
    let scope = scope(&catalogue);
    (CompletionEngine::new(catalogue, config), scope)
}
