//! Recursive-descent parser for embedded expressions.
//!
//! Grammar (whitespace may separate any two tokens):
//!
//! ```text
//! expr     := binary | call | variable | literal
//! unit     := call | variable | literal
//! binary   := unit OP expr            (right-associative)
//! call     := name '(' [param (',' param)*] ')'
//! variable := name                    (not followed by '(')
//! name     := label ['::' label]
//! label    := [letter digit '_' '.']+
//! param    := '$' digit+
//! literal  := '\'' [^']* '\''
//! ```
//!
//! Alternatives are tried in order and the cursor is reset after each
//! mismatch. Running out of input is different: once a production has
//! started and the input ends, no other alternative can succeed, so the
//! end-of-input failure is returned immediately.

use super::ast::{Expr, Name, ParamRef};
use super::ops::OperatorTable;
use crate::utils::error::{FormatError, FormatResult};

/// Why a production did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseFailure {
    /// The input does not fit this production
    Mismatch { at: usize, message: String },
    /// The input ended while `expected` was still required
    EndOfInput { expected: &'static str },
}

type ParseResult<T> = Result<T, ParseFailure>;

type Production<'a, 'o> = fn(&mut ExprParser<'a, 'o>) -> ParseResult<Expr>;

fn is_label_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}

/// Parser over one expression source.
pub struct ExprParser<'a, 'o> {
    src: &'a str,
    pos: usize,
    operators: &'o OperatorTable,
    /// Furthest failure after the left operand of a binary expression
    binary_failure: Option<(usize, String)>,
}

impl<'a, 'o> ExprParser<'a, 'o> {
    /// Create a parser recognising the operators of `operators`.
    pub fn new(src: &'a str, operators: &'o OperatorTable) -> Self {
        Self {
            src,
            pos: 0,
            operators,
            binary_failure: None,
        }
    }

    /// Parse the whole source as a single expression.
    pub fn parse(mut self) -> FormatResult<Expr> {
        let expr = match self.parse_expr() {
            Ok(expr) => expr,
            Err(failure) => return Err(self.describe(failure)),
        };

        self.skip_ws();
        if let Some(c) = self.peek() {
            // The operand parsed, but the operator or right side after it did not
            if let Some((at, message)) = self.binary_failure.take() {
                if at >= self.pos {
                    return Err(self.describe(ParseFailure::Mismatch { at, message }));
                }
            }
            return Err(FormatError::syntax(format!(
                "unexpected {:?} at offset {} in expression {:?}",
                c, self.pos, self.src
            )));
        }
        Ok(expr)
    }

    fn describe(&self, failure: ParseFailure) -> FormatError {
        match failure {
            ParseFailure::Mismatch { message, .. } => {
                FormatError::syntax(format!("{} in expression {:?}", message, self.src))
            }
            ParseFailure::EndOfInput { .. } if self.src.trim().is_empty() => {
                FormatError::syntax("empty expression")
            }
            ParseFailure::EndOfInput { expected } => FormatError::syntax(format!(
                "unexpected end of expression {:?}, expected {}",
                self.src, expected
            )),
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn mismatch<T>(&self, message: impl Into<String>) -> ParseResult<T> {
        Err(ParseFailure::Mismatch {
            at: self.pos,
            message: message.into(),
        })
    }

    /// Consume `want` after optional whitespace.
    fn expect_char(&mut self, want: char, expected: &'static str) -> ParseResult<()> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == want => {
                self.bump();
                Ok(())
            }
            Some(c) => self.mismatch(format!("expected {}, found {:?}", expected, c)),
            None => Err(ParseFailure::EndOfInput { expected }),
        }
    }

    /// Try each production from the same starting point.
    ///
    /// Returns the first success. End of input stops the search. When every
    /// production mismatches, the failure that got furthest is reported.
    fn first_match(&mut self, productions: &[Production<'a, 'o>]) -> ParseResult<Expr> {
        let start = self.pos;
        let mut best: Option<ParseFailure> = None;

        for production in productions {
            match production(self) {
                Ok(expr) => return Ok(expr),
                Err(eof @ ParseFailure::EndOfInput { .. }) => return Err(eof),
                Err(failure) => {
                    self.pos = start;
                    best = match (best, failure) {
                        (
                            Some(ParseFailure::Mismatch {
                                at: best_at,
                                message,
                            }),
                            ParseFailure::Mismatch { at, .. },
                        ) if best_at >= at => Some(ParseFailure::Mismatch {
                            at: best_at,
                            message,
                        }),
                        (_, failure) => Some(failure),
                    };
                }
            }
        }

        Err(best.unwrap_or(ParseFailure::EndOfInput {
            expected: "expression",
        }))
    }

    // ------------------------------------------------------------------
    // Productions
    // ------------------------------------------------------------------

    fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.skip_ws();
        if self.peek().is_none() {
            return Err(ParseFailure::EndOfInput {
                expected: "expression",
            });
        }
        self.first_match(&[
            Self::parse_binary,
            Self::parse_call,
            Self::parse_variable,
            Self::parse_literal,
        ])
    }

    /// Left operand of a binary expression; never itself binary.
    fn parse_unit(&mut self) -> ParseResult<Expr> {
        self.skip_ws();
        if self.peek().is_none() {
            return Err(ParseFailure::EndOfInput {
                expected: "expression",
            });
        }
        self.first_match(&[Self::parse_call, Self::parse_variable, Self::parse_literal])
    }

    fn parse_binary(&mut self) -> ParseResult<Expr> {
        let left = self.parse_unit()?;
        match self.parse_binary_tail() {
            Ok((op, right)) => Ok(Expr::binary(left, op, right)),
            Err(failure) => {
                self.note_binary_failure(&failure);
                Err(failure)
            }
        }
    }

    fn parse_binary_tail(&mut self) -> ParseResult<(char, Expr)> {
        self.skip_ws();
        let op = match self.peek() {
            Some(c) if self.operators.contains(c) => c,
            Some(c) => return self.mismatch(format!("invalid operator {:?}", c)),
            None => return self.mismatch("missing operator"),
        };
        self.bump();

        let right = self.parse_expr()?;
        Ok((op, right))
    }

    fn note_binary_failure(&mut self, failure: &ParseFailure) {
        if let ParseFailure::Mismatch { at, message } = failure {
            let further = match &self.binary_failure {
                Some((best, _)) => at > best,
                None => true,
            };
            if further {
                self.binary_failure = Some((*at, message.clone()));
            }
        }
    }

    fn parse_call(&mut self) -> ParseResult<Expr> {
        let name = self.parse_name()?;

        // A missing '(' only means this is not a call
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.bump();
            }
            Some(c) => return self.mismatch(format!("expected '(', found {:?}", c)),
            None => return self.mismatch("missing '('"),
        }

        let mut params = Vec::new();
        self.skip_ws();
        if self.peek() == Some(')') {
            self.bump();
            return Ok(Expr::Call { name, params });
        }

        loop {
            params.push(self.parse_param()?);
            self.skip_ws();
            match self.bump() {
                Some(',') => continue,
                Some(')') => break,
                Some(c) => {
                    self.pos -= c.len_utf8();
                    return self.mismatch(format!("expected ',' or ')', found {:?}", c));
                }
                None => {
                    return Err(ParseFailure::EndOfInput {
                        expected: "',' or ')'",
                    })
                }
            }
        }

        Ok(Expr::Call { name, params })
    }

    fn parse_variable(&mut self) -> ParseResult<Expr> {
        let name = self.parse_name()?;

        let after = self.pos;
        self.skip_ws();
        if self.peek() == Some('(') {
            return self.mismatch("unexpected '('");
        }
        self.pos = after;

        Ok(Expr::Variable(name))
    }

    fn parse_literal(&mut self) -> ParseResult<Expr> {
        self.expect_char('\'', "string literal")?;

        let start = self.pos;
        match self.src[start..].find('\'') {
            Some(len) => {
                self.pos = start + len + 1;
                Ok(Expr::literal(&self.src[start..start + len]))
            }
            None => {
                self.pos = self.src.len();
                Err(ParseFailure::EndOfInput {
                    expected: "closing quote",
                })
            }
        }
    }

    fn parse_name(&mut self) -> ParseResult<Name> {
        let first = self.parse_label()?;

        let after = self.pos;
        self.skip_ws();
        if !self.src[self.pos..].starts_with("::") {
            self.pos = after;
            return Ok(Name::new(first));
        }
        self.pos += 2;

        self.skip_ws();
        if self.peek().is_none() {
            return Err(ParseFailure::EndOfInput {
                expected: "name after '::'",
            });
        }
        let key = self.parse_label()?;
        Ok(Name::qualified(first, key))
    }

    fn parse_label(&mut self) -> ParseResult<String> {
        self.skip_ws();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if is_label_char(c) {
                self.bump();
            } else {
                break;
            }
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => self.mismatch(format!("empty label before {:?}", c)),
                None => self.mismatch("empty label"),
            };
        }
        Ok(self.src[start..self.pos].to_string())
    }

    fn parse_param(&mut self) -> ParseResult<ParamRef> {
        self.expect_char('$', "argument reference like $0")?;

        let start = self.pos;
        while matches!(self.peek(), Some('0'..='9')) {
            self.bump();
        }
        let digits = &self.src[start..self.pos];

        if digits.is_empty() {
            return match self.peek() {
                Some(c) => self.mismatch(format!(
                    "expected argument index after '$', found {:?}",
                    c
                )),
                None => Err(ParseFailure::EndOfInput {
                    expected: "argument index",
                }),
            };
        }
        match digits.parse::<usize>() {
            Ok(index) => Ok(ParamRef(index)),
            Err(_) => self.mismatch(format!("argument index {} is too large", digits)),
        }
    }
}

/// Parse an expression source with the given operator set.
pub fn parse_expr(src: &str, operators: &OperatorTable) -> FormatResult<Expr> {
    ExprParser::new(src, operators).parse()
}
