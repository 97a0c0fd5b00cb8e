use std::collections::HashMap;

use analyzer::{
    Catalogue, CatalogueBuilder, GraphFunction, GraphScope, MemberInfo, MemberKind, ParamInfo,
    Primitive, ResolverConfig, SYSTEM_NAMESPACE, SymbolKindSet, TypeId, TypeRef,
};

use crate::converter::Converter;
use crate::dto::v1::{
    CompletionRequest, ConfigDecl, MemberDecl, MemberKindDecl, ParamDecl, ScopeDecl, TypeDecl,
};

/// A request converted into analyzer inputs.
#[derive(Debug)]
pub struct ParsedRequest {
    pub catalogue: Catalogue,
    pub scope: GraphScope,
    pub config: ResolverConfig,
    pub max_items: Option<usize>,
}

impl Converter {
    /// Parse the JS-provided request JSON. Empty input means an empty request.
    pub fn parse_request(request_json: &str) -> Result<ParsedRequest, String> {
        let request = match request_json.trim() {
            "" => CompletionRequest::default(),
            json => serde_json::from_str::<CompletionRequest>(json)
                .map_err(|err| format!("invalid request JSON: {err}"))?,
        };
        Self::request(request)
    }

    pub fn request(request: CompletionRequest) -> Result<ParsedRequest, String> {
        let mut types = TypeTable::new();
        for decl in &request.types {
            types.declare(decl)?;
        }
        for decl in &request.types {
            types.define(decl)?;
        }
        let scope = types.scope(&request.scope)?;

        Ok(ParsedRequest {
            catalogue: types.builder.build(),
            scope,
            config: resolver_config(&request.config),
            max_items: request.config.max_items,
        })
    }
}

fn resolver_config(config: &ConfigDecl) -> ResolverConfig {
    ResolverConfig {
        type_keywords: config.type_keywords,
        statement_keywords: config.statement_keywords,
        value_keywords: config.value_keywords,
        accepted_kinds: config.accepted_kinds.as_ref().map_or(SymbolKindSet::ALL, |kinds| {
            kinds.iter().map(|kind| analyzer::SymbolKind::from(*kind)).collect()
        }),
    }
}

/// Builder plus the name table used to resolve type references.
struct TypeTable {
    builder: CatalogueBuilder,
    names: HashMap<String, TypeId>,
}

impl TypeTable {
    fn new() -> Self {
        let builder = Catalogue::builder();
        let mut names = HashMap::new();
        for primitive in Primitive::ALL {
            let id = builder.primitive(primitive);
            names.insert(primitive.keyword().to_string(), id);
            names.insert(
                format!("{SYSTEM_NAMESPACE}.{}", primitive.runtime_name()),
                id,
            );
        }
        Self { builder, names }
    }

    fn declare(&mut self, decl: &TypeDecl) -> Result<(), String> {
        if decl.name.is_empty() {
            return Err("type declared without a name".to_string());
        }
        let id = match &decl.declaring {
            Some(outer) => {
                let outer = self.resolve(outer)?;
                self.builder.add_nested_type(outer, &decl.name)
            }
            None => self
                .builder
                .add_generic_type(&decl.namespace, &decl.name, decl.generic_arity),
        };

        let full_name = full_name(decl);
        if self.names.insert(full_name.clone(), id).is_some() {
            return Err(format!("type `{full_name}` declared twice"));
        }
        Ok(())
    }

    fn define(&mut self, decl: &TypeDecl) -> Result<(), String> {
        let id = self.resolve(&full_name(decl))?;
        if let Some(base) = &decl.base {
            let base = self.resolve(base)?;
            self.builder.set_base(id, base);
        }
        for member in &decl.members {
            let info = self.member(id, member)?;
            self.builder.add_member(id, info);
        }
        Ok(())
    }

    fn member(&self, owner: TypeId, decl: &MemberDecl) -> Result<MemberInfo, String> {
        let ty = match (decl.kind, decl.returns_generic_arg, &decl.ty) {
            (MemberKindDecl::Constructor, _, _) => TypeRef::Type(owner),
            (_, Some(index), _) => TypeRef::GenericArg(index),
            (_, None, Some(name)) => TypeRef::Type(self.resolve(name)?),
            (_, None, None) => TypeRef::Type(self.resolve("void")?),
        };
        let (name, kind) = match decl.kind {
            MemberKindDecl::Field => (decl.name.as_str(), MemberKind::Field),
            MemberKindDecl::Property => (decl.name.as_str(), MemberKind::Property),
            MemberKindDecl::Method => (decl.name.as_str(), MemberKind::Method),
            MemberKindDecl::Constructor => (".ctor", MemberKind::Constructor),
            MemberKindDecl::Indexer => ("Item", MemberKind::Property),
        };

        let mut info = MemberInfo::new(name, kind, ty)
            .with_params(self.params(&decl.params)?)
            .with_generic_arity(decl.generic_arity);
        if decl.is_static {
            info = info.with_static();
        }
        if decl.kind == MemberKindDecl::Indexer {
            info = info.as_indexer();
        }
        Ok(info)
    }

    fn params(&self, params: &[ParamDecl]) -> Result<Vec<ParamInfo>, String> {
        params
            .iter()
            .map(|param| {
                self.resolve(&param.ty)
                    .map(|ty| ParamInfo::new(param.name.clone(), ty))
            })
            .collect()
    }

    fn scope(&self, decl: &ScopeDecl) -> Result<GraphScope, String> {
        let mut scope = GraphScope::default();
        for local in &decl.locals {
            scope = scope.with_local(&local.name, self.resolve(&local.ty)?);
        }
        for parameter in &decl.parameters {
            scope = scope.with_parameter(&parameter.name, self.resolve(&parameter.ty)?);
        }
        for variable in &decl.variables {
            scope = scope.with_variable(&variable.name, self.resolve(&variable.ty)?);
        }
        for property in &decl.properties {
            scope = scope.with_property(&property.name, self.resolve(&property.ty)?);
        }
        for function in &decl.functions {
            scope = scope.with_function(GraphFunction {
                name: function.name.clone(),
                return_type: function
                    .returns
                    .as_deref()
                    .map(|name| self.resolve(name))
                    .transpose()?,
                params: self.params(&function.params)?,
            });
        }
        if let Some(this_type) = &decl.this_type {
            scope = scope.with_this(self.resolve(this_type)?);
        }
        Ok(scope)
    }

    fn resolve(&self, name: &str) -> Result<TypeId, String> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| format!("unknown type `{name}`"))
    }
}

fn full_name(decl: &TypeDecl) -> String {
    match (&decl.declaring, decl.namespace.as_str()) {
        (Some(outer), _) => format!("{outer}.{}", decl.name),
        (None, "") => decl.name.clone(),
        (None, namespace) => format!("{namespace}.{}", decl.name),
    }
}
