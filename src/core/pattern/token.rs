//! Lexer states and tokens for format patterns.
//!
//! A pattern is consumed byte by byte by a small deterministic state machine.
//! A [`Token`] is the span consumed while the machine stayed in one state,
//! tagged with the state the machine moved into when the span ended.

use std::fmt;

use serde::Serialize;

/// State of the pattern lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LexState {
    /// Between placeholders, before any byte of the next segment
    Start,
    /// Verbatim text
    Literal,
    /// Just read `{`
    PlaceholderStart,
    /// Reading the digits of an explicit argument index
    ParseIndex,
    /// Reading the formatter spec after `:`
    ParseFormatterSpec,
    /// Just read the closing `}` of a placeholder
    PlaceholderEnd,
    /// Inside `{{ ... }}`
    ExprBody,
    /// Read the first `}` closing an expression
    ExprBodyEnd,
    /// End of input (terminal)
    End,
    /// Malformed pattern
    Error,
}

impl LexState {
    /// Compute the state that follows `self` on `byte`.
    ///
    /// The returned flag tells whether the byte was consumed. When it was not,
    /// the same byte is examined again from the new state.
    pub fn transition(self, byte: u8) -> (LexState, bool) {
        use LexState::*;

        if byte == 0 {
            return (End, false);
        }

        match self {
            Start => match byte {
                b'{' => (PlaceholderStart, true),
                _ => (Literal, false),
            },
            Literal => match byte {
                b'{' => (PlaceholderStart, true),
                _ => (Literal, true),
            },
            PlaceholderStart => match byte {
                b'0'..=b'9' => (ParseIndex, false),
                b':' => (ParseFormatterSpec, true),
                b'}' => (PlaceholderEnd, true),
                b'{' => (ExprBody, true),
                _ => (Error, false),
            },
            ParseIndex => match byte {
                b'0'..=b'9' => (ParseIndex, true),
                b':' => (ParseFormatterSpec, true),
                b'}' => (PlaceholderEnd, true),
                _ => (End, false),
            },
            ParseFormatterSpec => match byte {
                b'}' => (PlaceholderEnd, true),
                _ => (ParseFormatterSpec, true),
            },
            PlaceholderEnd => (Start, false),
            ExprBody => match byte {
                b'}' => (ExprBodyEnd, true),
                _ => (ExprBody, true),
            },
            ExprBodyEnd => match byte {
                b'}' => (PlaceholderEnd, true),
                _ => (Error, false),
            },
            End => (End, false),
            Error => (Error, false),
        }
    }

    /// Returns true while a placeholder or expression is still open.
    pub fn is_inside_placeholder(&self) -> bool {
        matches!(
            self,
            LexState::PlaceholderStart
                | LexState::ParseIndex
                | LexState::ParseFormatterSpec
                | LexState::ExprBody
                | LexState::ExprBodyEnd
        )
    }

    /// Short lowercase name of the state.
    pub fn name(&self) -> &'static str {
        match self {
            LexState::Start => "start",
            LexState::Literal => "literal",
            LexState::PlaceholderStart => "placeholder_start",
            LexState::ParseIndex => "parse_index",
            LexState::ParseFormatterSpec => "parse_formatter_spec",
            LexState::PlaceholderEnd => "placeholder_end",
            LexState::ExprBody => "expr_body",
            LexState::ExprBodyEnd => "expr_body_end",
            LexState::End => "end",
            LexState::Error => "error",
        }
    }
}

impl fmt::Display for LexState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A span of the pattern consumed in one lexer state.
///
/// `state` is the state the lexer moved into after the span, so the meaning of
/// `text` is given by the state the lexer was in *before* this token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    /// State entered after the span
    pub state: LexState,
    /// Consumed text
    pub text: &'a str,
    /// Byte offset of `text` in the pattern
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Returns true if this token ends the stream
    pub fn is_end(&self) -> bool {
        self.state == LexState::End
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {}", self.text, self.state)
    }
}
