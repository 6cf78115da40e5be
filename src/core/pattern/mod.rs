//! Pattern tokenization.

mod lexer;
mod token;

pub use lexer::{tokenize, Lexer};
pub use token::{LexState, Token};
