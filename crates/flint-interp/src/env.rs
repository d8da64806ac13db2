// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Environment for local bindings.

use std::collections::HashMap;

use flint_ast::NodeId;

use crate::value::Value;

/// A scope in the environment.
#[derive(Debug, Default)]
struct Scope {
    bindings: HashMap<NodeId, Value>,
}

/// Local bindings of one call, keyed by the node that declares them.
#[derive(Debug, Default)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Define a binding in the current scope.
    pub fn define(&mut self, id: NodeId, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(id, value);
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.bindings.get(&id))
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Value> {
        self.scopes
            .iter_mut()
            .rev()
            .find_map(|scope| scope.bindings.get_mut(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scopes_are_dropped() {
        let mut env = Environment::new();
        env.define(NodeId(1), Value::Bool(true));
        env.push_scope();
        env.define(NodeId(2), Value::Nil);
        if let Some(v) = env.get_mut(NodeId(1)) {
            *v = Value::Bool(false);
        }
        env.pop_scope();
        assert_eq!(env.get(NodeId(1)), Some(&Value::Bool(false)));
        assert_eq!(env.get(NodeId(2)), None);
    }
}
