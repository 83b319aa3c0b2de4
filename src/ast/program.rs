use super::scope::{Function, FunctionId, ScopeId, Scopes, Variable, VariableId};

/// Name of the synthetic function wrapping the top-level statements.
pub const TOP_LEVEL_NAME: &str = "_start";

/// The result of a successful parse: the top-level function plus the arena
/// holding every scope and declaration beneath it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    scopes: Scopes,
    top: FunctionId,
    root: ScopeId,
}

impl Program {
    pub fn new(scopes: Scopes, top: FunctionId, root: ScopeId) -> Self {
        Program { scopes, top, root }
    }

    pub fn top_level(&self) -> &Function {
        self.scopes.function(self.top)
    }

    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    pub fn scopes(&self) -> &Scopes {
        &self.scopes
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        self.scopes.variable(id)
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        self.scopes.function(id)
    }
}
