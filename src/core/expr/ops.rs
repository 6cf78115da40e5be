//! Binary operators on evaluated strings.
//!
//! Every operand of an expression evaluates to a string, so an operator is
//! simply a function joining two strings. `+` concatenates unless it is
//! overridden, e.g. to insert a space for languages that separate words.

use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;

use crate::utils::error::{FormatError, FormatResult};

/// Implementation of a binary operator.
pub type BinaryOperator = Arc<dyn Fn(&str, &str) -> String + Send + Sync>;

/// Symbol of the operator registered by default.
pub const CONCAT: char = '+';

/// Join two strings together (concatenation).
pub fn concat(lhs: &str, rhs: &str) -> String {
    let mut out = String::with_capacity(lhs.len() + rhs.len());
    out.push_str(lhs);
    out.push_str(rhs);
    out
}

/// Build an operator that joins its operands with `separator`.
pub fn join_with(separator: &str) -> impl Fn(&str, &str) -> String + Send + Sync + 'static {
    let separator = separator.to_string();
    move |lhs: &str, rhs: &str| format!("{}{}{}", lhs, separator, rhs)
}

/// Operators available to expressions, keyed by their symbol.
#[derive(Clone)]
pub struct OperatorTable {
    ops: FxHashMap<char, BinaryOperator>,
}

impl OperatorTable {
    /// Create a table holding only the default `+` (concatenation).
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.set(CONCAT, concat);
        table
    }

    /// Create a table without any operator.
    pub fn empty() -> Self {
        Self {
            ops: FxHashMap::default(),
        }
    }

    /// Register or override an operator.
    pub fn set<F>(&mut self, op: char, f: F)
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.ops.insert(op, Arc::new(f));
    }

    /// Remove an operator, returning whether it was registered.
    pub fn remove(&mut self, op: char) -> bool {
        self.ops.remove(&op).is_some()
    }

    /// Look up an operator.
    pub fn get(&self, op: char) -> Option<&BinaryOperator> {
        self.ops.get(&op)
    }

    /// Check if `op` is a registered operator symbol.
    pub fn contains(&self, op: char) -> bool {
        self.ops.contains_key(&op)
    }

    /// Apply the operator `op` to two evaluated operands.
    pub fn apply(&self, op: char, lhs: &str, rhs: &str) -> FormatResult<String> {
        let f = self.get(op).ok_or(FormatError::UnknownOperator(op))?;
        Ok(f(lhs, rhs))
    }

    /// Registered operator symbols, sorted.
    pub fn symbols(&self) -> Vec<char> {
        let mut symbols: Vec<char> = self.ops.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }
}

impl Default for OperatorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OperatorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorTable")
            .field("symbols", &self.symbols())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_concat() {
        let table = OperatorTable::new();
        assert_eq!(table.apply('+', "a", "b").unwrap(), "ab");
        assert_eq!(table.symbols(), vec!['+']);
    }

    #[test]
    fn test_unknown_operator() {
        let table = OperatorTable::new();
        assert_eq!(
            table.apply('-', "a", "b"),
            Err(FormatError::UnknownOperator('-'))
        );
    }

    #[test]
    fn test_join_with_owned_separator() {
        let mut table = OperatorTable::new();
        let separator = String::from(", ");
        table.set('+', join_with(&separator));
        drop(separator);
        assert_eq!(table.apply('+', "a", "b").unwrap(), "a, b");
    }

    #[test]
    fn test_override_and_add() {
        let mut table = OperatorTable::new();
        table.set('+', join_with(" "));
        table.set('|', |a: &str, b: &str| format!("{}|{}", b, a));
        assert_eq!(table.apply('+', "hello", "world").unwrap(), "hello world");
        assert_eq!(table.apply('|', "x", "y").unwrap(), "y|x");
        assert!(table.remove('|'));
        assert!(!table.contains('|'));
    }
}
