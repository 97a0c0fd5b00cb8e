use super::{SymbolProvider, resolve_by_name};
use crate::context::ResolutionContext;
use crate::scope::{GraphScope, ScopeSymbol};
use crate::symbol::{ResolvedMember, SymbolKind, SymbolKindSet, SymbolOrigin, Token};

/// Which [`GraphScope`] table a [`ScopeSymbolProvider`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeTable {
    Locals,
    Parameters,
    Variables,
    Properties,
}

/// Named, typed symbols declared by the edited graph.
#[derive(Debug, Clone, Copy)]
pub struct ScopeSymbolProvider {
    kind: SymbolKind,
    table: ScopeTable,
}

impl ScopeSymbolProvider {
    pub const LOCALS: ScopeSymbolProvider = ScopeSymbolProvider {
        kind: SymbolKind::LocalVariable,
        table: ScopeTable::Locals,
    };
    pub const PARAMETERS: ScopeSymbolProvider = ScopeSymbolProvider {
        kind: SymbolKind::Parameter,
        table: ScopeTable::Parameters,
    };
    pub const VARIABLES: ScopeSymbolProvider = ScopeSymbolProvider {
        kind: SymbolKind::GraphVariable,
        table: ScopeTable::Variables,
    };
    pub const PROPERTIES: ScopeSymbolProvider = ScopeSymbolProvider {
        kind: SymbolKind::GraphProperty,
        table: ScopeTable::Properties,
    };

    fn symbols<'s>(&self, scope: &'s GraphScope) -> &'s [ScopeSymbol] {
        match self.table {
            ScopeTable::Locals => &scope.locals,
            ScopeTable::Parameters => &scope.parameters,
            ScopeTable::Variables => &scope.variables,
            ScopeTable::Properties => &scope.properties,
        }
    }

    fn origin(&self, idx: usize) -> SymbolOrigin {
        match self.table {
            ScopeTable::Locals => SymbolOrigin::Local(idx),
            ScopeTable::Parameters => SymbolOrigin::Parameter(idx),
            ScopeTable::Variables => SymbolOrigin::Variable(idx),
            ScopeTable::Properties => SymbolOrigin::Property(idx),
        }
    }
}

impl SymbolProvider for ScopeSymbolProvider {
    fn name(&self) -> &'static str {
        match self.table {
            ScopeTable::Locals => "locals",
            ScopeTable::Parameters => "parameters",
            ScopeTable::Variables => "graph variables",
            ScopeTable::Properties => "graph properties",
        }
    }

    fn kinds(&self) -> SymbolKindSet {
        self.kind.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let symbols = self.symbols(cx.scope);
        let names = symbols
            .iter()
            .enumerate()
            .map(|(idx, symbol)| (idx, symbol.name.as_str()));

        resolve_by_name(cx, names, |idx| {
            let symbol = &symbols[idx];
            Token::new(symbol.name.clone(), self.kind)
                .with_member(ResolvedMember::Value(symbol.ty))
                .with_origin(self.origin(idx))
        })
    }
}

/// Functions declared by the edited graph.
pub struct GraphFunctionProvider;

impl SymbolProvider for GraphFunctionProvider {
    fn name(&self) -> &'static str {
        "graph functions"
    }

    fn kinds(&self) -> SymbolKindSet {
        SymbolKind::GraphFunction.into()
    }

    fn try_resolve(&self, cx: &mut ResolutionContext<'_>) -> bool {
        let scope = cx.scope;
        let functions = &scope.functions;
        let names = functions
            .iter()
            .enumerate()
            .map(|(idx, function)| (idx, function.name.as_str()));

        resolve_by_name(cx, names, |idx| {
            let function = &functions[idx];
            Token::new(function.name.clone(), SymbolKind::GraphFunction)
                .with_member(ResolvedMember::Function {
                    return_type: function.return_type,
                    params: function.params.clone(),
                })
                .with_origin(SymbolOrigin::Function(idx))
        })
    }
}
