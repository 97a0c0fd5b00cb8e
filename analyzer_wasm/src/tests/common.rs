/// Request shared by the converter tests: a small Unity-flavoured catalogue.
pub const REQUEST: &str = r#"{
    "types": [
        {
            "namespace": "UnityEngine",
            "name": "Vector3",
            "members": [
                { "name": "x", "type": "float" },
                { "name": "y", "type": "float" },
                { "name": "z", "type": "float" },
                { "name": "zero", "kind": "Property", "is_static": true, "type": "UnityEngine.Vector3" },
                { "name": "ctor", "kind": "Constructor", "params": [
                    { "name": "x", "type": "float" },
                    { "name": "y", "type": "float" },
                    { "name": "z", "type": "float" }
                ] }
            ]
        },
        {
            "namespace": "UnityEngine",
            "name": "Mathf",
            "members": [
                { "name": "Max", "kind": "Method", "is_static": true, "type": "System.Single", "params": [
                    { "name": "a", "type": "float" },
                    { "name": "b", "type": "float" }
                ] }
            ]
        },
        { "namespace": "UnityEngine", "name": "Component" },
        {
            "namespace": "UnityEngine",
            "name": "Transform",
            "base": "UnityEngine.Component",
            "members": [
                { "name": "position", "kind": "Property", "type": "UnityEngine.Vector3" }
            ]
        },
        {
            "namespace": "UnityEngine",
            "name": "GameObject",
            "members": [
                { "name": "transform", "kind": "Property", "type": "UnityEngine.Transform" },
                { "name": "GetComponent", "kind": "Method", "generic_arity": 1, "returns_generic_arg": 0 }
            ]
        },
        { "namespace": "UnityEngine", "name": "Rigidbody", "base": "UnityEngine.Component" },
        { "name": "ForceMode", "declaring": "UnityEngine.Rigidbody" },
        {
            "namespace": "System.Collections.Generic",
            "name": "List",
            "generic_arity": 1,
            "members": [
                { "name": "Count", "kind": "Property", "type": "int" },
                { "name": "Item", "kind": "Indexer", "type": "object", "params": [
                    { "name": "index", "type": "int" }
                ] }
            ]
        }
    ],
    "scope": {
        "locals": [{ "name": "position", "type": "UnityEngine.Vector3" }],
        "variables": [{ "name": "speed", "type": "float" }],
        "functions": [
            { "name": "Spawn", "returns": "UnityEngine.GameObject", "params": [
                { "name": "name", "type": "string" }
            ] }
        ],
        "this_type": "UnityEngine.Component"
    }
}"#;

pub fn labels(result: &crate::dto::v1::CompletionResult) -> Vec<&str> {
    result.items.iter().map(|item| item.label.as_str()).collect()
}
