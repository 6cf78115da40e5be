//! # placefmt
//!
//! Placeholder string formatting with pluggable value formatters and a
//! small embedded expression language.
//!
//! ## Features
//!
//! - **Positional placeholders**: `{}` takes the next argument, `{N}` the
//!   N-th; the two styles cannot be mixed in one pattern
//! - **Value formatters**: `{:%.2f}` (printf), `{:@date}` (time),
//!   `{:*}` (mask), or any formatter registered under a label character
//! - **Expressions**: `{{Lang::hello + ', ' + greet($0)}}` resolves names
//!   through interpreters registered per namespace
//!
//! ## Example
//!
//! ```
//! use placefmt::{placefmt, Engine, Value};
//!
//! assert_eq!(placefmt!("{} + {} = {:%d}", 1, 2, 3), "1 + 2 = 3");
//!
//! let engine = Engine::new()
//!     .with_interpreter_fn("Lang", |key: &str, _args: &[Value]| Ok(key.to_uppercase()))
//!     .with_default_interpreter("Lang");
//! assert_eq!(engine.format("{{hello + ', ' + 'you'}}", &[]), "HELLO, you");
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lazy_static::lazy_static;

pub mod catalog;
pub mod core;
pub mod formatters;
pub mod utils;

// Re-export commonly used items
pub use crate::core::engine::Engine;
pub use crate::core::expr::{ExprInterpreter, FnInterpreter, OperatorTable};
pub use crate::core::pattern::{tokenize, LexState, Lexer, Token};
pub use crate::core::value::Value;
pub use catalog::TableInterpreter;
#[cfg(feature = "catalog")]
pub use catalog::Catalog;
pub use formatters::{FormatterRegistry, ValueFormatter};
pub use utils::error::{ErrorKind, FormatError, FormatResult};

lazy_static! {
    /// Engine behind the free functions of this crate
    static ref GLOBAL_ENGINE: RwLock<Engine> = RwLock::new(Engine::new());
}

fn global_read() -> RwLockReadGuard<'static, Engine> {
    GLOBAL_ENGINE.read().unwrap_or_else(PoisonError::into_inner)
}

fn global_write() -> RwLockWriteGuard<'static, Engine> {
    GLOBAL_ENGINE.write().unwrap_or_else(PoisonError::into_inner)
}

/// Format with the process-wide engine; errors are rendered as the output.
pub fn fmt(pattern: &str, args: &[Value]) -> String {
    global_read().format(pattern, args)
}

/// Format with the process-wide engine.
pub fn try_fmt(pattern: &str, args: &[Value]) -> FormatResult<String> {
    global_read().try_format(pattern, args)
}

/// Run `f` with exclusive access to the process-wide engine.
pub fn with_global_engine<R>(f: impl FnOnce(&mut Engine) -> R) -> R {
    f(&mut global_write())
}

/// Register a formatter factory on the process-wide engine.
pub fn register_formatter<F>(label: char, factory: F)
where
    F: Fn() -> Box<dyn ValueFormatter> + Send + Sync + 'static,
{
    global_write().register_formatter(label, factory);
}

/// Register an interpreter on the process-wide engine.
pub fn register_interpreter<I>(namespace: impl Into<String>, interpreter: I)
where
    I: ExprInterpreter + 'static,
{
    global_write().register_interpreter(namespace, interpreter);
}

/// Register a closure interpreter on the process-wide engine.
pub fn register_interpreter_fn<F>(namespace: impl Into<String>, f: F)
where
    F: Fn(&str, &[Value]) -> FormatResult<String> + Send + Sync + 'static,
{
    global_write().register_interpreter_fn(namespace, f);
}

/// Set the default namespace of the process-wide engine.
pub fn set_default_interpreter(namespace: impl Into<String>) {
    global_write().set_default_interpreter(namespace);
}

/// Register or override an operator on the process-wide engine.
pub fn set_operator<F>(op: char, f: F)
where
    F: Fn(&str, &str) -> String + Send + Sync + 'static,
{
    global_write().set_operator(op, f);
}

/// Format with the process-wide engine, converting each argument with
/// [`Value::from`].
///
/// ```
/// use placefmt::placefmt;
///
/// assert_eq!(placefmt!("{1}-{0}", "a", 'b'), "b-a");
/// assert_eq!(placefmt!("no placeholders"), "no placeholders");
/// ```
#[macro_export]
macro_rules! placefmt {
    ($pattern:expr $(,)?) => {
        $crate::fmt($pattern, &[])
    };
    ($pattern:expr, $($arg:expr),+ $(,)?) => {
        $crate::fmt($pattern, &[$($crate::Value::from($arg)),+])
    };
}
