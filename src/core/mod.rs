//! Core formatting machinery.
//!
//! ```text
//! pattern ──► pattern::Lexer ──► tokens ──► engine::Engine
//!                                              │
//!                     ┌────────────────────────┴───────────────┐
//!                     ▼                                        ▼
//!           formatters::FormatterRegistry            expr::parse_expr
//!                     │                                        │
//!                     ▼                                        ▼
//!             ValueFormatter::format             EvalContext ──► ExprInterpreter
//! ```

pub mod engine;
pub mod expr;
pub mod pattern;
pub mod value;

pub use engine::Engine;
pub use value::Value;
