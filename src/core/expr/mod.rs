//! Embedded `{{ ... }}` expressions: syntax tree, parser and evaluator.

mod ast;
mod eval;
pub mod ops;
mod parser;
mod scope;

pub use ast::{Expr, Name, ParamRef};
pub use eval::EvalContext;
pub use ops::{BinaryOperator, OperatorTable};
pub use parser::{parse_expr, ExprParser};
pub use scope::{ExprInterpreter, FnInterpreter, InterpreterRegistry};
