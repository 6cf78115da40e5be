//! Namespace management for expression evaluation.
//!
//! Variables and functions named in an expression are resolved by an
//! [`ExprInterpreter`] registered under a namespace. A name without a
//! namespace goes to the configured default namespace.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::ops::OperatorTable;
use crate::core::value::Value;
use crate::utils::error::{FormatError, FormatResult};

/// Resolves the variables and functions of one namespace.
pub trait ExprInterpreter: Send + Sync {
    /// Evaluate `key` to a string.
    ///
    /// `args` is empty for a variable reference (`{{key}}`) and holds the
    /// referenced arguments for a function call (`{{key($0, $1)}}`).
    /// Unknown keys fail with [`FormatError::UnresolvedKey`].
    fn format(&self, key: &str, args: &[Value]) -> FormatResult<String>;
}

/// Adapter turning a closure into an [`ExprInterpreter`].
pub struct FnInterpreter<F>(pub F);

impl<F> ExprInterpreter for FnInterpreter<F>
where
    F: Fn(&str, &[Value]) -> FormatResult<String> + Send + Sync,
{
    fn format(&self, key: &str, args: &[Value]) -> FormatResult<String> {
        (self.0)(key, args)
    }
}

/// Registered interpreters, the default namespace and the operator table.
#[derive(Clone, Default)]
pub struct InterpreterRegistry {
    /// Interpreters by namespace (IndexMap preserves registration order)
    namespaces: IndexMap<String, Arc<dyn ExprInterpreter>>,
    /// Namespace used for unqualified names
    default_namespace: String,
    operators: OperatorTable,
}

impl InterpreterRegistry {
    /// Create a registry with no namespace and the default operators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an interpreter, replacing any previous one for `namespace`.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        interpreter: Arc<dyn ExprInterpreter>,
    ) {
        self.namespaces.insert(namespace.into(), interpreter);
    }

    /// Remove the interpreter of a namespace.
    pub fn unregister(&mut self, namespace: &str) -> Option<Arc<dyn ExprInterpreter>> {
        self.namespaces.shift_remove(namespace)
    }

    /// Set the namespace used for unqualified names.
    pub fn set_default(&mut self, namespace: impl Into<String>) {
        self.default_namespace = namespace.into();
    }

    /// Get the namespace used for unqualified names.
    pub fn default_namespace(&self) -> &str {
        &self.default_namespace
    }

    /// Check if a namespace has an interpreter.
    pub fn contains(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// Registered namespaces in registration order.
    pub fn namespaces(&self) -> impl Iterator<Item = &str> {
        self.namespaces.keys().map(String::as_str)
    }

    /// Find the interpreter for `namespace`, or for the default namespace
    /// when `None` is given.
    pub fn resolve(&self, namespace: Option<&str>) -> FormatResult<&dyn ExprInterpreter> {
        let namespace = namespace.unwrap_or(self.default_namespace.as_str());
        self.namespaces
            .get(namespace)
            .map(|interpreter| interpreter.as_ref())
            .ok_or_else(|| FormatError::unknown_namespace(namespace))
    }

    /// Get the operator table.
    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// Get the operator table mutably.
    pub fn operators_mut(&mut self) -> &mut OperatorTable {
        &mut self.operators
    }
}

impl fmt::Debug for InterpreterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpreterRegistry")
            .field("namespaces", &self.namespaces.keys().collect::<Vec<_>>())
            .field("default_namespace", &self.default_namespace)
            .field("operators", &self.operators)
            .finish()
    }
}
