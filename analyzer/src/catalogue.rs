//! Read-only type catalogue.
//!
//! The catalogue is the engine's view of every visible type: a flat type list indexed by
//! [`TypeId`], a namespace → types multimap, and the set of every namespace prefix.
//! It is built once through [`CatalogueBuilder`] and never mutated afterwards, so concurrent
//! resolution passes can share it behind an `Arc` without locking.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Index of a type in the catalogue's flat type list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeId(pub u32);

/// A member slot: the declaring type plus the member's index in that type's member list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId {
    pub owner: TypeId,
    pub index: u32,
}

/// Built-in types reachable through type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Primitive {
    Bool,
    Byte,
    SByte,
    Char,
    Decimal,
    Double,
    Float,
    Int,
    UInt,
    Long,
    ULong,
    Short,
    UShort,
    Object,
    String,
    Void,
}

impl Primitive {
    pub const ALL: [Primitive; 16] = [
        Primitive::Bool,
        Primitive::Byte,
        Primitive::SByte,
        Primitive::Char,
        Primitive::Decimal,
        Primitive::Double,
        Primitive::Float,
        Primitive::Int,
        Primitive::UInt,
        Primitive::Long,
        Primitive::ULong,
        Primitive::Short,
        Primitive::UShort,
        Primitive::Object,
        Primitive::String,
        Primitive::Void,
    ];

    /// Keyword spelling (`int`, `float`, ...).
    pub fn keyword(self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Byte => "byte",
            Primitive::SByte => "sbyte",
            Primitive::Char => "char",
            Primitive::Decimal => "decimal",
            Primitive::Double => "double",
            Primitive::Float => "float",
            Primitive::Int => "int",
            Primitive::UInt => "uint",
            Primitive::Long => "long",
            Primitive::ULong => "ulong",
            Primitive::Short => "short",
            Primitive::UShort => "ushort",
            Primitive::Object => "object",
            Primitive::String => "string",
            Primitive::Void => "void",
        }
    }

    /// Runtime type name registered in the `System` namespace.
    pub fn runtime_name(self) -> &'static str {
        match self {
            Primitive::Bool => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::SByte => "SByte",
            Primitive::Char => "Char",
            Primitive::Decimal => "Decimal",
            Primitive::Double => "Double",
            Primitive::Float => "Single",
            Primitive::Int => "Int32",
            Primitive::UInt => "UInt32",
            Primitive::Long => "Int64",
            Primitive::ULong => "UInt64",
            Primitive::Short => "Int16",
            Primitive::UShort => "UInt16",
            Primitive::Object => "Object",
            Primitive::String => "String",
            Primitive::Void => "Void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Primitive> {
        Primitive::ALL.into_iter().find(|p| p.keyword() == keyword)
    }

    /// Implicit numeric conversions (`int` → `long`, `float` → `double`, ...).
    pub fn widens_to(self, target: Primitive) -> bool {
        use Primitive::*;

        let targets: &[Primitive] = match self {
            SByte => &[Short, Int, Long, Float, Double, Decimal],
            Byte => &[Short, UShort, Int, UInt, Long, ULong, Float, Double, Decimal],
            Short => &[Int, Long, Float, Double, Decimal],
            UShort => &[Int, UInt, Long, ULong, Float, Double, Decimal],
            Char => &[UShort, Int, UInt, Long, ULong, Float, Double, Decimal],
            Int => &[Long, Float, Double, Decimal],
            UInt => &[Long, ULong, Float, Double, Decimal],
            Long | ULong => &[Float, Double, Decimal],
            Float => &[Double],
            _ => &[],
        };
        targets.contains(&target)
    }
}

pub const SYSTEM_NAMESPACE: &str = "System";

/// The declared type of a member: a concrete type, or the n-th generic argument of a
/// generic method (`T GetComponent<T>()`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Type(TypeId),
    GenericArg(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberKind {
    Field,
    Property,
    Method,
    Constructor,
    NestedType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamInfo {
    pub name: String,
    pub ty: TypeId,
}

impl ParamInfo {
    pub fn new(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// One reflected member.
///
/// `ty` is the field/property type, the method return type, the declaring type for
/// constructors, or the nested type itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub name: String,
    pub kind: MemberKind,
    pub is_static: bool,
    pub ty: TypeRef,
    pub params: Vec<ParamInfo>,
    pub generic_arity: u8,
    pub is_indexer: bool,
}

impl MemberInfo {
    pub fn new(name: impl Into<String>, kind: MemberKind, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            kind,
            is_static: false,
            ty,
            params: Vec::new(),
            generic_arity: 0,
            is_indexer: false,
        }
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_params(mut self, params: Vec<ParamInfo>) -> Self {
        self.params = params;
        self
    }

    pub fn with_generic_arity(mut self, arity: u8) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn as_indexer(mut self) -> Self {
        self.is_indexer = true;
        self
    }

    /// Compiler-generated accessor/operator methods never show up in completions.
    pub fn is_synthesized(&self) -> bool {
        const PREFIXES: [&str; 5] = ["get_", "set_", "op_", "add_", "remove_"];
        self.kind == MemberKind::Method && PREFIXES.iter().any(|p| self.name.starts_with(p))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    pub namespace: String,
    pub generic_arity: u8,
    pub base: Option<TypeId>,
    /// Set for nested types; nested types are reachable only through their declaring type.
    pub declaring: Option<TypeId>,
    pub members: Vec<MemberInfo>,
}

impl TypeInfo {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// Immutable type catalogue. See the module docs.
#[derive(Debug, Clone)]
pub struct Catalogue {
    types: Vec<TypeInfo>,
    namespaces: IndexMap<String, Vec<TypeId>>,
    namespace_paths: IndexSet<String>,
    primitives: Vec<TypeId>,
}

impl Catalogue {
    pub fn builder() -> CatalogueBuilder {
        CatalogueBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeInfo> {
        self.types.get(id.0 as usize)
    }

    /// Every type, in registration order.
    pub fn types(&self) -> impl Iterator<Item = (TypeId, &TypeInfo)> {
        self.types
            .iter()
            .enumerate()
            .map(|(idx, info)| (TypeId(idx as u32), info))
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        self.primitives[primitive as usize]
    }

    pub fn primitive_of(&self, id: TypeId) -> Option<Primitive> {
        Primitive::ALL
            .into_iter()
            .find(|p| self.primitives[*p as usize] == id)
    }

    pub fn find_type(&self, full_name: &str) -> Option<TypeId> {
        let (namespace, name) = full_name.rsplit_once('.').unwrap_or(("", full_name));
        self.types_in(namespace)
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|info| info.name == name))
    }

    /// Types declared directly in `namespace`.
    pub fn types_in(&self, namespace: &str) -> &[TypeId] {
        self.namespaces
            .get(namespace)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn has_namespace(&self, path: &str) -> bool {
        self.namespace_paths.contains(path)
    }

    /// First segments of every namespace (`System`, `UnityEngine`, ...).
    pub fn root_namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespace_paths
            .iter()
            .map(String::as_str)
            .filter(|path| !path.contains('.'))
    }

    /// Segment names directly below `parent` (`Collections` for `System`).
    pub fn child_namespaces<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.namespace_paths.iter().filter_map(move |path| {
            let rest = path.strip_prefix(parent)?.strip_prefix('.')?;
            (!rest.contains('.')).then_some(rest)
        })
    }

    pub fn member(&self, id: MemberId) -> Option<&MemberInfo> {
        self.get(id.owner)?.members.get(id.index as usize)
    }

    /// Members of `id` followed by inherited members, walking the base chain.
    pub fn members(&self, id: TypeId) -> Vec<(MemberId, &MemberInfo)> {
        let mut out = Vec::new();
        let mut current = Some(id);
        let mut visited = Vec::new();

        while let Some(ty) = current {
            if visited.contains(&ty) {
                break;
            }
            visited.push(ty);
            let Some(info) = self.get(ty) else {
                break;
            };
            for (index, member) in info.members.iter().enumerate() {
                let member_id = MemberId {
                    owner: ty,
                    index: index as u32,
                };
                out.push((member_id, member));
            }
            current = info.base;
        }
        out
    }

    pub fn constructors(&self, id: TypeId) -> Vec<MemberId> {
        let Some(info) = self.get(id) else {
            return Vec::new();
        };
        info.members
            .iter()
            .enumerate()
            .filter(|(_, m)| m.kind == MemberKind::Constructor)
            .map(|(index, _)| MemberId {
                owner: id,
                index: index as u32,
            })
            .collect()
    }

    /// Element type produced by indexing a value of type `id`.
    pub fn indexer_type(&self, id: TypeId) -> Option<TypeId> {
        self.members(id)
            .into_iter()
            .find(|(_, m)| m.is_indexer)
            .and_then(|(_, m)| match m.ty {
                TypeRef::Type(ty) => Some(ty),
                TypeRef::GenericArg(_) => None,
            })
    }

    /// Implicit conversion check used by overload selection.
    pub fn is_assignable(&self, from: TypeId, to: TypeId) -> bool {
        if from == to || to == self.primitive(Primitive::Object) {
            return true;
        }
        if let (Some(a), Some(b)) = (self.primitive_of(from), self.primitive_of(to))
            && a.widens_to(b)
        {
            return true;
        }

        let mut current = self.get(from).and_then(|info| info.base);
        let mut steps = 0;
        while let Some(ty) = current {
            if ty == to {
                return true;
            }
            steps += 1;
            if steps > self.types.len() {
                break;
            }
            current = self.get(ty).and_then(|info| info.base);
        }
        false
    }

    /// Short display name: the keyword for primitives, the simple name otherwise.
    pub fn display_name(&self, id: TypeId) -> String {
        if let Some(primitive) = self.primitive_of(id) {
            return primitive.keyword().to_string();
        }
        self.get(id)
            .map(|info| info.name.clone())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// Mutable builder for [`Catalogue`]. Primitive types are registered up front.
#[derive(Debug, Clone)]
pub struct CatalogueBuilder {
    types: Vec<TypeInfo>,
    primitives: Vec<TypeId>,
}

impl Default for CatalogueBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            types: Vec::new(),
            primitives: Vec::new(),
        };
        for primitive in Primitive::ALL {
            let id = builder.add_type(SYSTEM_NAMESPACE, primitive.runtime_name());
            builder.primitives.push(id);
        }
        builder
    }

    pub fn primitive(&self, primitive: Primitive) -> TypeId {
        self.primitives[primitive as usize]
    }

    pub fn add_type(&mut self, namespace: &str, name: &str) -> TypeId {
        self.push_type(TypeInfo {
            name: name.to_string(),
            namespace: namespace.to_string(),
            generic_arity: 0,
            base: None,
            declaring: None,
            members: Vec::new(),
        })
    }

    pub fn add_generic_type(&mut self, namespace: &str, name: &str, arity: u8) -> TypeId {
        let id = self.add_type(namespace, name);
        self.types[id.0 as usize].generic_arity = arity;
        id
    }

    /// Registers `name` as a nested type of `outer`, plus the matching member on `outer`.
    pub fn add_nested_type(&mut self, outer: TypeId, name: &str) -> TypeId {
        let namespace = self.types[outer.0 as usize].namespace.clone();
        let id = self.push_type(TypeInfo {
            name: name.to_string(),
            namespace,
            generic_arity: 0,
            base: None,
            declaring: Some(outer),
            members: Vec::new(),
        });
        self.add_member(
            outer,
            MemberInfo::new(name, MemberKind::NestedType, TypeRef::Type(id)).with_static(),
        );
        id
    }

    pub fn set_base(&mut self, ty: TypeId, base: TypeId) {
        self.types[ty.0 as usize].base = Some(base);
    }

    pub fn add_member(&mut self, ty: TypeId, member: MemberInfo) -> MemberId {
        let members = &mut self.types[ty.0 as usize].members;
        members.push(member);
        MemberId {
            owner: ty,
            index: (members.len() - 1) as u32,
        }
    }

    /// Chained member registration for one type.
    pub fn type_mut(&mut self, id: TypeId) -> TypeBuilder<'_> {
        TypeBuilder { builder: self, id }
    }

    pub fn build(self) -> Catalogue {
        let mut namespaces: IndexMap<String, Vec<TypeId>> = IndexMap::new();
        let mut namespace_paths = IndexSet::new();

        for (idx, info) in self.types.iter().enumerate() {
            if info.declaring.is_some() {
                continue;
            }
            namespaces
                .entry(info.namespace.clone())
                .or_default()
                .push(TypeId(idx as u32));

            let mut path = String::new();
            for segment in info.namespace.split('.').filter(|s| !s.is_empty()) {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(segment);
                namespace_paths.insert(path.clone());
            }
        }

        tracing::debug!(
            types = self.types.len(),
            namespaces = namespace_paths.len(),
            "built type catalogue"
        );

        Catalogue {
            types: self.types,
            namespaces,
            namespace_paths,
            primitives: self.primitives,
        }
    }

    fn push_type(&mut self, info: TypeInfo) -> TypeId {
        self.types.push(info);
        TypeId((self.types.len() - 1) as u32)
    }
}

pub struct TypeBuilder<'a> {
    builder: &'a mut CatalogueBuilder,
    id: TypeId,
}

impl TypeBuilder<'_> {
    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn field(self, name: &str, ty: TypeId) -> Self {
        self.member(MemberInfo::new(name, MemberKind::Field, TypeRef::Type(ty)))
    }

    pub fn static_field(self, name: &str, ty: TypeId) -> Self {
        self.member(MemberInfo::new(name, MemberKind::Field, TypeRef::Type(ty)).with_static())
    }

    pub fn property(self, name: &str, ty: TypeId) -> Self {
        self.member(MemberInfo::new(name, MemberKind::Property, TypeRef::Type(ty)))
    }

    pub fn static_property(self, name: &str, ty: TypeId) -> Self {
        self.member(MemberInfo::new(name, MemberKind::Property, TypeRef::Type(ty)).with_static())
    }

    pub fn method(self, name: &str, ret: TypeId, params: &[(&str, TypeId)]) -> Self {
        self.member(
            MemberInfo::new(name, MemberKind::Method, TypeRef::Type(ret))
                .with_params(param_list(params)),
        )
    }

    pub fn static_method(self, name: &str, ret: TypeId, params: &[(&str, TypeId)]) -> Self {
        self.member(
            MemberInfo::new(name, MemberKind::Method, TypeRef::Type(ret))
                .with_static()
                .with_params(param_list(params)),
        )
    }

    pub fn generic_method(
        self,
        name: &str,
        arity: u8,
        ret: TypeRef,
        params: &[(&str, TypeId)],
    ) -> Self {
        self.member(
            MemberInfo::new(name, MemberKind::Method, ret)
                .with_generic_arity(arity)
                .with_params(param_list(params)),
        )
    }

    pub fn constructor(self, params: &[(&str, TypeId)]) -> Self {
        let id = self.id;
        self.member(
            MemberInfo::new(".ctor", MemberKind::Constructor, TypeRef::Type(id))
                .with_params(param_list(params)),
        )
    }

    pub fn indexer(self, ty: TypeId, params: &[(&str, TypeId)]) -> Self {
        self.member(
            MemberInfo::new("Item", MemberKind::Property, TypeRef::Type(ty))
                .with_params(param_list(params))
                .as_indexer(),
        )
    }

    pub fn member(self, member: MemberInfo) -> Self {
        self.builder.add_member(self.id, member);
        self
    }
}

fn param_list(params: &[(&str, TypeId)]) -> Vec<ParamInfo> {
    params
        .iter()
        .map(|(name, ty)| ParamInfo::new(*name, *ty))
        .collect()
}
