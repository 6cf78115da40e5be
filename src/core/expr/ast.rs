//! Expression tree for `{{ ... }}` regions.

use std::fmt;

/// A possibly namespaced name such as `Lang::hello` or `hello`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Namespace, `None` when the default interpreter should be used
    pub namespace: Option<String>,
    /// Variable or function key
    pub key: String,
}

impl Name {
    /// A name resolved through the default namespace.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            namespace: None,
            key: key.into(),
        }
    }

    /// A name bound to an explicit namespace.
    pub fn qualified(namespace: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            key: key.into(),
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}::{}", ns, self.key),
            None => f.write_str(&self.key),
        }
    }
}

/// Reference to a formatting argument, written `$N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamRef(pub usize);

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// An embedded expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Quoted string constant
    Literal(String),
    /// Variable lookup through an interpreter
    Variable(Name),
    /// Function call through an interpreter
    Call { name: Name, params: Vec<ParamRef> },
    /// Binary operation; chains nest to the right
    Binary {
        left: Box<Expr>,
        op: char,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Create a literal expression.
    pub fn literal(text: impl Into<String>) -> Self {
        Expr::Literal(text.into())
    }

    /// Create a binary expression.
    pub fn binary(left: Expr, op: char, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(text) => write!(f, "'{}'", text),
            Expr::Variable(name) => write!(f, "{}", name),
            Expr::Call { name, params } => {
                write!(f, "{}(", name)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                f.write_str(")")
            }
            Expr::Binary { left, op, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}
