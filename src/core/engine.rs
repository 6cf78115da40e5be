//! The placeholder engine.
//!
//! An [`Engine`] owns a formatter registry and an interpreter registry and
//! renders patterns against positional arguments:
//!
//! ```
//! use placefmt::{Engine, Value};
//!
//! let engine = Engine::new();
//! let out = engine.format("{1}, {0}!", &[Value::from("world"), Value::from("Hello")]);
//! assert_eq!(out, "Hello, world!");
//!
//! let out = engine.format("pi = {:%.2f}", &[Value::from(3.14159)]);
//! assert_eq!(out, "pi = 3.14");
//! ```

use std::sync::Arc;

use log::{debug, warn};

use super::expr::{parse_expr, EvalContext, ExprInterpreter, FnInterpreter, InterpreterRegistry};
use super::pattern::{LexState, Lexer};
use super::value::Value;
use crate::formatters::{FormatterRegistry, ValueFormatter};
use crate::utils::error::{FormatError, FormatResult};

/// Formatter and interpreter configuration used to render patterns.
#[derive(Debug, Clone)]
pub struct Engine {
    formatters: FormatterRegistry,
    interpreters: InterpreterRegistry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with the built-in formatters and no interpreter.
    pub fn new() -> Self {
        Self {
            formatters: FormatterRegistry::with_builtins(),
            interpreters: InterpreterRegistry::new(),
        }
    }

    /// Create an engine without any formatter or interpreter.
    pub fn bare() -> Self {
        Self {
            formatters: FormatterRegistry::new(),
            interpreters: InterpreterRegistry::new(),
        }
    }

    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    pub fn formatters_mut(&mut self) -> &mut FormatterRegistry {
        &mut self.formatters
    }

    pub fn interpreters(&self) -> &InterpreterRegistry {
        &self.interpreters
    }

    pub fn interpreters_mut(&mut self) -> &mut InterpreterRegistry {
        &mut self.interpreters
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Register a formatter factory under `label`; the last registration wins.
    pub fn register_formatter<F>(&mut self, label: char, factory: F)
    where
        F: Fn() -> Box<dyn ValueFormatter> + Send + Sync + 'static,
    {
        self.formatters.register(label, factory);
    }

    /// Register a `Default`-constructible formatter type under `label`.
    pub fn register_formatter_type<T>(&mut self, label: char)
    where
        T: ValueFormatter + Default + 'static,
    {
        self.formatters.register_type::<T>(label);
    }

    /// Register the interpreter of a namespace.
    pub fn register_interpreter<I>(&mut self, namespace: impl Into<String>, interpreter: I)
    where
        I: ExprInterpreter + 'static,
    {
        self.interpreters.register(namespace, Arc::new(interpreter));
    }

    /// Register a closure as the interpreter of a namespace.
    pub fn register_interpreter_fn<F>(&mut self, namespace: impl Into<String>, f: F)
    where
        F: Fn(&str, &[Value]) -> FormatResult<String> + Send + Sync + 'static,
    {
        self.register_interpreter(namespace, FnInterpreter(f));
    }

    /// Set the namespace used by unqualified names.
    pub fn set_default_interpreter(&mut self, namespace: impl Into<String>) {
        self.interpreters.set_default(namespace);
    }

    /// Register or override a binary operator.
    pub fn set_operator<F>(&mut self, op: char, f: F)
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.interpreters.operators_mut().set(op, f);
    }

    pub fn with_formatter<F>(mut self, label: char, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ValueFormatter> + Send + Sync + 'static,
    {
        self.register_formatter(label, factory);
        self
    }

    pub fn with_interpreter<I>(mut self, namespace: impl Into<String>, interpreter: I) -> Self
    where
        I: ExprInterpreter + 'static,
    {
        self.register_interpreter(namespace, interpreter);
        self
    }

    pub fn with_interpreter_fn<F>(mut self, namespace: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &[Value]) -> FormatResult<String> + Send + Sync + 'static,
    {
        self.register_interpreter_fn(namespace, f);
        self
    }

    pub fn with_default_interpreter(mut self, namespace: impl Into<String>) -> Self {
        self.set_default_interpreter(namespace);
        self
    }

    pub fn with_operator<F>(mut self, op: char, f: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.set_operator(op, f);
        self
    }

    // ------------------------------------------------------------------
    // Formatting
    // ------------------------------------------------------------------

    /// Render a pattern, returning the error message in place of the output
    /// on failure.
    pub fn format(&self, pattern: &str, args: &[Value]) -> String {
        match self.try_format(pattern, args) {
            Ok(out) => out,
            Err(e) => {
                warn!("failed to format {:?}: {}", pattern, e);
                e.to_string()
            }
        }
    }

    /// Render a pattern.
    pub fn try_format(&self, pattern: &str, args: &[Value]) -> FormatResult<String> {
        Placeholders::new(self, args).run(pattern)
    }

    /// Parse and evaluate a single expression, as found between `{{` and `}}`.
    pub fn eval_expr(&self, src: &str, args: &[Value]) -> FormatResult<String> {
        let expr = parse_expr(src, self.interpreters.operators())?;
        debug!("evaluating expression {}", expr);
        EvalContext::new(&self.interpreters, args).eval(&expr)
    }
}

/// How arguments have been selected so far in one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgCursor {
    /// No placeholder consumed an argument yet
    Unused,
    /// `{}` placeholders; holds the next index
    Implicit(usize),
    /// `{N}` placeholders
    Explicit,
}

/// State of one formatting call.
struct Placeholders<'e, 'a> {
    engine: &'e Engine,
    args: &'a [Value],
    cursor: ArgCursor,
    /// Index written in the current placeholder
    explicit: Option<usize>,
    out: String,
}

impl<'e, 'a> Placeholders<'e, 'a> {
    fn new(engine: &'e Engine, args: &'a [Value]) -> Self {
        Self {
            engine,
            args,
            cursor: ArgCursor::Unused,
            explicit: None,
            out: String::new(),
        }
    }

    fn run(mut self, pattern: &str) -> FormatResult<String> {
        self.out.reserve(pattern.len());
        let mut lexer = Lexer::new(pattern);
        let mut last = LexState::Start;

        loop {
            let token = lexer.next_token()?;
            if token.is_end() && last.is_inside_placeholder() {
                return Err(FormatError::UnterminatedPlaceholder);
            }

            // The token text belongs to the state we were in
            match last {
                LexState::Literal => self.out.push_str(token.text),
                LexState::ParseIndex => {
                    let index = token.text.parse::<usize>().map_err(|e| {
                        FormatError::syntax(format!(
                            "invalid argument index {:?}: {}",
                            token.text, e
                        ))
                    })?;
                    self.explicit = Some(index);
                }
                LexState::ParseFormatterSpec => {
                    let formatter = self.engine.formatters.instantiate(token.text)?;
                    let value = self.next_arg()?;
                    self.out.push_str(&formatter.format(value));
                }
                LexState::ExprBody => {
                    let rendered = self.engine.eval_expr(token.text, self.args)?;
                    self.out.push_str(&rendered);
                }
                _ => {}
            }

            if token.state == LexState::PlaceholderEnd {
                // `{}` and `{N}` carry no formatter spec
                if matches!(last, LexState::PlaceholderStart | LexState::ParseIndex) {
                    let value = self.next_arg()?;
                    self.out.push_str(&value.to_string());
                }
                self.explicit = None;
            }

            if token.is_end() {
                return Ok(self.out);
            }
            last = token.state;
        }
    }

    /// Select the argument for the current placeholder.
    fn next_arg(&mut self) -> FormatResult<&'a Value> {
        let (index, cursor) = match (self.explicit, self.cursor) {
            (Some(_), ArgCursor::Implicit(_)) | (None, ArgCursor::Explicit) => {
                return Err(FormatError::MixedIndexing)
            }
            (Some(index), _) => (index, ArgCursor::Explicit),
            (None, ArgCursor::Unused) => (0, ArgCursor::Implicit(1)),
            (None, ArgCursor::Implicit(next)) => (next, ArgCursor::Implicit(next + 1)),
        };

        let value = self
            .args
            .get(index)
            .ok_or_else(|| FormatError::out_of_range(index, self.args.len()))?;
        self.cursor = cursor;
        Ok(value)
    }
}
