//! Expression evaluation.
//!
//! Literals and operators are handled locally. Variables and calls are
//! delegated to the interpreter registered for their namespace.

use log::debug;

use super::ast::{Expr, Name, ParamRef};
use super::scope::InterpreterRegistry;
use crate::core::value::Value;
use crate::utils::error::{FormatError, FormatResult};

/// Everything an expression can see while it is evaluated.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'r, 'v> {
    /// Interpreters and operators
    pub registry: &'r InterpreterRegistry,
    /// Arguments of the formatting call, addressed by `$N`
    pub args: &'v [Value],
}

impl<'r, 'v> EvalContext<'r, 'v> {
    pub fn new(registry: &'r InterpreterRegistry, args: &'v [Value]) -> Self {
        Self { registry, args }
    }

    /// Evaluate an expression to a string.
    pub fn eval(&self, expr: &Expr) -> FormatResult<String> {
        match expr {
            Expr::Literal(text) => Ok(text.clone()),
            Expr::Variable(name) => self.eval_name(name, &[]),
            Expr::Call { name, params } => {
                let args = self.resolve_params(params)?;
                self.eval_name(name, &args)
            }
            Expr::Binary { left, op, right } => {
                // Operator is checked before either side runs
                let operators = self.registry.operators();
                if !operators.contains(*op) {
                    return Err(FormatError::UnknownOperator(*op));
                }
                let lhs = self.eval(left)?;
                let rhs = self.eval(right)?;
                operators.apply(*op, &lhs, &rhs)
            }
        }
    }

    fn eval_name(&self, name: &Name, args: &[Value]) -> FormatResult<String> {
        let interpreter = self.registry.resolve(name.namespace.as_deref())?;
        debug!("evaluating {} with {} argument(s)", name, args.len());
        interpreter.format(&name.key, args)
    }

    fn resolve_params(&self, params: &[ParamRef]) -> FormatResult<Vec<Value>> {
        params
            .iter()
            .map(|&ParamRef(index)| {
                self.args
                    .get(index)
                    .cloned()
                    .ok_or_else(|| FormatError::out_of_range(index, self.args.len()))
            })
            .collect()
    }
}

impl Expr {
    /// Evaluate this expression in `ctx`.
    pub fn eval(&self, ctx: &EvalContext<'_, '_>) -> FormatResult<String> {
        ctx.eval(self)
    }
}
