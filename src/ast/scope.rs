//! Lexical scopes and the declarations they own.
//!
//! All scopes, variables and functions of one program live in a single
//! [`Scopes`] arena and refer to each other through copyable handles. A
//! scope's `owner` is its enclosing scope (`None` only at the root), and every
//! scope is also recorded in its owner's `children`. Dropping the arena drops
//! everything at once.

use std::collections::HashMap;

use tracing::trace;

use crate::{Location, Span};

use super::{
    ast::{Signature, Type},
    statements::Block,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(usize);

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    ty: Type,
    name: String,
    owner: ScopeId,
    location: Location,
}

impl Variable {
    pub fn new(ty: Type, name: impl Into<String>, owner: ScopeId, location: Location) -> Self {
        Variable {
            ty,
            name: name.into(),
            owner,
            location,
        }
    }

    pub fn get_type(&self) -> Type {
        self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scope that declared (and owns) this variable.
    pub fn owner(&self) -> ScopeId {
        self.owner
    }

    pub fn location(&self) -> Location {
        self.location
    }
}

/// A function declaration. Parameters live in `params_scope`; the body
/// block's scope is a child of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    signature: Signature,
    owner: ScopeId,
    params_scope: ScopeId,
    body: Block,
    span: Span,
}

impl Function {
    pub fn new(
        signature: Signature,
        owner: ScopeId,
        params_scope: ScopeId,
        body: Block,
        span: Span,
    ) -> Self {
        Function {
            signature,
            owner,
            params_scope,
            body,
            span,
        }
    }

    pub fn name(&self) -> &str {
        self.signature.name()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn owner(&self) -> ScopeId {
        self.owner
    }

    pub fn params_scope(&self) -> ScopeId {
        self.params_scope
    }

    pub fn body(&self) -> &Block {
        &self.body
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub(crate) fn set_body(&mut self, body: Block, span: Span) {
        self.body = body;
        self.span = span;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    owner: Option<ScopeId>,
    children: Vec<ScopeId>,
    variables: HashMap<String, VariableId>,
    functions: HashMap<String, FunctionId>,
}

impl Scope {
    pub fn owner(&self) -> Option<ScopeId> {
        self.owner
    }

    pub fn children(&self) -> &[ScopeId] {
        &self.children
    }

    /// Looks `name` up in this scope only.
    pub fn get_variable(&self, name: &str) -> Option<VariableId> {
        self.variables.get(name).copied()
    }

    pub fn get_function(&self, name: &str) -> Option<FunctionId> {
        self.functions.get(name).copied()
    }

    /// Variables declared directly in this scope, in declaration order.
    pub fn variables(&self) -> Vec<VariableId> {
        let mut ids: Vec<VariableId> = self.variables.values().copied().collect();
        ids.sort();
        ids
    }

    /// Functions declared directly in this scope, in declaration order.
    pub fn functions(&self) -> Vec<FunctionId> {
        let mut ids: Vec<FunctionId> = self.functions.values().copied().collect();
        ids.sort();
        ids
    }
}

/// Arena of every scope and declaration of a program.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scopes {
    scopes: Vec<Scope>,
    variables: Vec<Variable>,
    functions: Vec<Function>,
}

impl Scopes {
    pub fn new() -> Self {
        Scopes::default()
    }

    /// Creates a scope enclosed by `owner` and registers it as one of the
    /// owner's children.
    pub fn push_scope(&mut self, owner: Option<ScopeId>) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            owner,
            ..Scope::default()
        });

        if let Some(owner) = owner {
            self.scopes[owner.0].children.push(id);
        }

        trace!(scope = id.0, owner = ?owner.map(|o| o.0), "scope created");
        id
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.0]
    }

    pub(crate) fn function_mut(&mut self, id: FunctionId) -> &mut Function {
        &mut self.functions[id.0]
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Declares `variable` in `scope`.
    ///
    /// On a name clash the existing declaration is kept and returned as
    /// `Err`, unless `replace` is set, in which case the new declaration takes
    /// the name over and the old one is no longer reachable from the scope.
    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        variable: Variable,
        replace: bool,
    ) -> Result<VariableId, VariableId> {
        if let Some(existing) = self.scopes[scope.0].get_variable(variable.name()) {
            if !replace {
                return Err(existing);
            }
        }

        let id = VariableId(self.variables.len());
        trace!(scope = scope.0, name = variable.name(), "variable defined");
        self.scopes[scope.0]
            .variables
            .insert(variable.name().to_string(), id);
        self.variables.push(variable);
        Ok(id)
    }

    /// Declares `function` in `scope`, with the same clash rules as
    /// [`Scopes::define_variable`].
    pub fn define_function(
        &mut self,
        scope: ScopeId,
        function: Function,
        replace: bool,
    ) -> Result<FunctionId, FunctionId> {
        if let Some(existing) = self.scopes[scope.0].get_function(function.name()) {
            if !replace {
                return Err(existing);
            }
        }

        let id = FunctionId(self.functions.len());
        trace!(scope = scope.0, name = function.name(), "function defined");
        self.scopes[scope.0]
            .functions
            .insert(function.name().to_string(), id);
        self.functions.push(function);
        Ok(id)
    }

    /// Stores a function that is not visible by name from any scope.
    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let id = FunctionId(self.functions.len());
        self.functions.push(function);
        id
    }

    /// Resolves `name` from `scope` outwards. A miss at the root is `None`.
    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<VariableId> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.0].get_variable(name))
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str) -> Option<FunctionId> {
        self.chain(scope)
            .find_map(|id| self.scopes[id.0].get_function(name))
    }

    /// `scope` followed by each enclosing scope up to the root.
    pub fn chain(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(Some(scope), move |id| self.scopes[id.0].owner)
    }
}
