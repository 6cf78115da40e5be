//! Pattern Lexer
//!
//! Drives the [`LexState`] machine over a pattern and groups the consumed
//! bytes into tokens. The lexer makes exactly one pass over the input.

use log::trace;

use super::token::{LexState, Token};
use crate::utils::error::{FormatError, FormatResult};

/// The pattern lexer
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    state: LexState,
    /// Set once the end token or an error has been produced by the iterator
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given pattern
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            state: LexState::Start,
            finished: false,
        }
    }

    /// Feed the byte at the current position to the state machine.
    ///
    /// Returns the new state together with the byte examined. At the end of
    /// the input (or once `End` was reached) this reports `(End, 0)`.
    pub fn next_byte(&mut self) -> (LexState, u8) {
        if self.state == LexState::End {
            return (LexState::End, 0);
        }
        let Some(&byte) = self.input.as_bytes().get(self.pos) else {
            self.state = LexState::End;
            return (LexState::End, 0);
        };

        let (next, consumed) = self.state.transition(byte);
        if consumed {
            self.pos += 1;
        }
        self.state = next;
        (next, byte)
    }

    /// Read bytes until the state changes or the input ends.
    ///
    /// The returned token holds the span consumed in the state the lexer was
    /// in when the call started, tagged with the state it moved into.
    pub fn next_token(&mut self) -> FormatResult<Token<'a>> {
        let origin = self.state;
        let start = self.pos;

        loop {
            let before = self.pos;
            let (state, _) = self.next_byte();

            if state == LexState::Error {
                return Err(FormatError::invalid_pattern(
                    before,
                    &self.input[start..before],
                ));
            }
            if state != origin || state == LexState::End {
                let token = Token {
                    state,
                    text: &self.input[start..before],
                    offset: start,
                };
                trace!("lexed {} (from {})", token, origin);
                return Ok(token);
            }
        }
    }

    /// Tokenize the whole pattern, including the final end token
    pub fn tokenize(self) -> FormatResult<Vec<Token<'a>>> {
        self.collect()
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = FormatResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_token();
        match &item {
            Ok(token) if !token.is_end() => {}
            _ => self.finished = true,
        }
        Some(item)
    }
}

/// Convenience function to tokenize a pattern
pub fn tokenize(pattern: &str) -> FormatResult<Vec<Token<'_>>> {
    Lexer::new(pattern).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(pattern: &str) -> Vec<(LexState, String)> {
        tokenize(pattern)
            .unwrap()
            .into_iter()
            .map(|t| (t.state, t.text.to_string()))
            .collect()
    }

    #[test]
    fn test_literal_only() {
        assert_eq!(
            states("hello"),
            vec![
                (LexState::Literal, String::new()),
                (LexState::End, "hello".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(states(""), vec![(LexState::End, String::new())]);
    }

    #[test]
    fn test_bare_placeholder() {
        let tokens = states("{}");
        assert_eq!(tokens[0], (LexState::PlaceholderStart, String::new()));
        assert_eq!(tokens[1], (LexState::PlaceholderEnd, String::new()));
        assert_eq!(tokens[2], (LexState::End, String::new()));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_index_and_spec() {
        let tokens = states("a{12:%.2f}b");
        assert_eq!(
            tokens,
            vec![
                (LexState::Literal, String::new()),
                (LexState::PlaceholderStart, "a".to_string()),
                (LexState::ParseIndex, String::new()),
                (LexState::ParseFormatterSpec, "12".to_string()),
                (LexState::PlaceholderEnd, "%.2f".to_string()),
                (LexState::Start, String::new()),
                (LexState::Literal, String::new()),
                (LexState::End, "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_expression_body() {
        let tokens = states("{{ns::key}}");
        assert_eq!(tokens[1], (LexState::ExprBody, String::new()));
        assert_eq!(tokens[2], (LexState::ExprBodyEnd, "ns::key".to_string()));
        assert_eq!(tokens[3], (LexState::PlaceholderEnd, String::new()));
    }

    #[test]
    fn test_token_offsets() {
        let tokens = tokenize("ab{0}").unwrap();
        let index = tokens
            .iter()
            .find(|t| t.state == LexState::PlaceholderEnd)
            .unwrap();
        assert_eq!(index.text, "0");
        assert_eq!(index.offset, 3);
    }

    #[test]
    fn test_error_state() {
        let err = tokenize("x{?}").unwrap_err();
        assert_eq!(err, FormatError::invalid_pattern(2, ""));

        let err = tokenize("{{a}b").unwrap_err();
        assert!(matches!(err, FormatError::InvalidPattern { .. }));
    }

    #[test]
    fn test_nul_terminates() {
        let tokens = states("ab\0cd");
        assert_eq!(tokens.last().unwrap(), &(LexState::End, "ab".to_string()));
    }

    #[test]
    fn test_malformed_index_reaches_end() {
        let tokens = states("{0x}");
        assert_eq!(tokens.last().unwrap(), &(LexState::End, "0".to_string()));
    }

    #[test]
    fn test_end_is_sticky() {
        let mut lexer = Lexer::new("a");
        while !lexer.next_token().unwrap().is_end() {}
        let token = lexer.next_token().unwrap();
        assert!(token.is_end());
        assert_eq!(token.text, "");
    }

    #[test]
    fn test_multibyte_literal() {
        let tokens = states("你好{}世界");
        assert_eq!(tokens[1], (LexState::PlaceholderStart, "你好".to_string()));
        assert_eq!(tokens.last().unwrap(), &(LexState::End, "世界".to_string()));
    }
}
