//! Per-request symbol scope supplied by the active editing context.

use serde::{Deserialize, Serialize};

use crate::catalogue::{ParamInfo, TypeId};

/// A named, typed symbol declared by the edited graph (local, parameter, variable, property).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeSymbol {
    pub name: String,
    pub ty: TypeId,
}

impl ScopeSymbol {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A function declared by the edited graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphFunction {
    pub name: String,
    pub return_type: Option<TypeId>,
    pub params: Vec<ParamInfo>,
}

/// Everything in scope for one evaluation besides the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphScope {
    pub locals: Vec<ScopeSymbol>,
    pub parameters: Vec<ScopeSymbol>,
    pub variables: Vec<ScopeSymbol>,
    pub properties: Vec<ScopeSymbol>,
    pub functions: Vec<GraphFunction>,
    /// Inherited type of the edited graph; `this` resolves to it.
    pub this_type: Option<TypeId>,
}

impl GraphScope {
    pub fn with_local(mut self, name: &str, ty: TypeId) -> Self {
        self.locals.push(ScopeSymbol::new(name, ty));
        self
    }

    pub fn with_parameter(mut self, name: &str, ty: TypeId) -> Self {
        self.parameters.push(ScopeSymbol::new(name, ty));
        self
    }

    pub fn with_variable(mut self, name: &str, ty: TypeId) -> Self {
        self.variables.push(ScopeSymbol::new(name, ty));
        self
    }

    pub fn with_property(mut self, name: &str, ty: TypeId) -> Self {
        self.properties.push(ScopeSymbol::new(name, ty));
        self
    }

    pub fn with_function(mut self, function: GraphFunction) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_this(mut self, ty: TypeId) -> Self {
        self.this_type = Some(ty);
        self
    }
}
