//! printf-style formatter (`%`).
//!
//! Spec grammar: `flags* width? (.precision)? verb?`
//!
//! | Verb      | Meaning                                   |
//! |-----------|-------------------------------------------|
//! | `v`       | generic rendering (default)               |
//! | `s`       | string, precision truncates               |
//! | `q`       | double-quoted, escaped string             |
//! | `d`       | decimal integer                           |
//! | `f` `F`   | fixed-point float, precision defaults to 6 |
//! | `e` `E`   | scientific notation                       |
//! | `x` `X`   | hexadecimal integer or string bytes       |
//! | `o` `b`   | octal and binary integer                  |
//! | `t`       | boolean                                   |
//! | `c`       | character from a code point               |
//!
//! Flags: `-` left-justify, `+` always sign, ` ` space for positive,
//! `0` zero padding, `#` alternate form (`0x`, `0`, `0b` prefixes).
//! A verb that does not apply to the argument falls back to `v`.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::{ValueFormatter, MAX_FIELD_WIDTH};
use crate::core::value::Value;
use crate::utils::error::{FormatError, FormatResult};

lazy_static! {
    static ref SPEC_RE: Regex = Regex::new(concat!(
        r"^(?P<flags>[-+ 0#]*)",
        r"(?P<width>\d+)?",
        r"(?:\.(?P<precision>\d*))?",
        r"(?P<verb>[vsqdfFeExXobtc])?$",
    ))
    .expect("printf spec pattern compiles");
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Flags {
    minus: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alt: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintfFormatter {
    flags: Flags,
    width: Option<usize>,
    precision: Option<usize>,
    verb: char,
}

impl Default for PrintfFormatter {
    fn default() -> Self {
        Self {
            flags: Flags::default(),
            width: None,
            precision: None,
            verb: 'v',
        }
    }
}

/// Pieces of a rendered number, kept apart so zero padding lands between
/// the sign/prefix and the digits.
struct Numeric {
    negative: bool,
    prefix: &'static str,
    digits: String,
}

impl PrintfFormatter {
    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        }
    }

    fn pad(&self, body: String) -> String {
        let Some(width) = self.width else {
            return body;
        };
        let len = body.chars().count();
        if len >= width {
            return body;
        }
        let fill = " ".repeat(width - len);
        if self.flags.minus {
            body + &fill
        } else {
            fill + &body
        }
    }

    fn pad_numeric(&self, num: Numeric) -> String {
        let head = format!("{}{}", self.sign(num.negative), num.prefix);
        match self.width {
            Some(width) if self.flags.zero && !self.flags.minus => {
                let len = head.len() + num.digits.len();
                let zeros = "0".repeat(width.saturating_sub(len));
                format!("{}{}{}", head, zeros, num.digits)
            }
            _ => self.pad(head + &num.digits),
        }
    }

    fn integer(&self, value: &Value, radix: u32) -> Option<Numeric> {
        let (negative, magnitude) = match value {
            Value::Int(i) => (*i < 0, i.unsigned_abs()),
            Value::UInt(u) => (false, *u),
            _ => return None,
        };
        let (digits, prefix) = match radix {
            16 if self.verb == 'X' => (format!("{:X}", magnitude), "0X"),
            16 => (format!("{:x}", magnitude), "0x"),
            8 => (format!("{:o}", magnitude), "0"),
            2 => (format!("{:b}", magnitude), "0b"),
            _ => (magnitude.to_string(), ""),
        };
        let prefix = if self.flags.alt { prefix } else { "" };
        Some(Numeric {
            negative,
            prefix,
            digits,
        })
    }

    fn float(&self, value: &Value) -> Option<Numeric> {
        let f = match value {
            Value::Float(f) => *f,
            Value::Int(_) | Value::UInt(_) => value.as_f64()?,
            _ => return None,
        };
        let precision = self.precision.unwrap_or(6);
        let digits = match self.verb {
            'e' | 'E' => {
                let s = c_exponent(f.abs(), precision);
                if self.verb == 'E' {
                    s.to_uppercase()
                } else {
                    s
                }
            }
            'F' => format!("{:.*}", precision, f.abs()).to_uppercase(),
            _ => format!("{:.*}", precision, f.abs()),
        };
        Some(Numeric {
            negative: f.is_sign_negative() && !f.is_nan(),
            prefix: "",
            digits,
        })
    }

    fn string(&self, s: &str) -> String {
        match self.precision {
            Some(precision) => s.chars().take(precision).collect(),
            None => s.to_string(),
        }
    }

    fn generic(&self, value: &Value) -> String {
        match value {
            // A precision on a plain float still means fixed digits
            Value::Float(_) if self.precision.is_some() => self
                .float(value)
                .map(|num| self.pad_numeric(num))
                .unwrap_or_default(),
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => {
                let s = value.to_string();
                let (negative, digits) = match s.strip_prefix('-') {
                    Some(rest) => (true, rest.to_string()),
                    None => (false, s),
                };
                self.pad_numeric(Numeric {
                    negative,
                    prefix: "",
                    digits,
                })
            }
            other => self.pad(self.string(&other.to_string())),
        }
    }

    fn render(&self, value: &Value) -> Option<String> {
        let out = match self.verb {
            'v' => self.generic(value),
            's' => self.pad(self.string(&value.to_string())),
            'q' => self.pad(format!("{:?}", self.string(&value.to_string()))),
            'd' => self.pad_numeric(self.integer(value, 10)?),
            'o' => self.pad_numeric(self.integer(value, 8)?),
            'b' => self.pad_numeric(self.integer(value, 2)?),
            'x' | 'X' => match value {
                Value::Str(s) => {
                    let hex: String = s.bytes().map(|b| format!("{:02x}", b)).collect();
                    let hex = if self.verb == 'X' { hex.to_uppercase() } else { hex };
                    self.pad(hex)
                }
                _ => self.pad_numeric(self.integer(value, 16)?),
            },
            'f' | 'F' | 'e' | 'E' => self.pad_numeric(self.float(value)?),
            't' => match value {
                Value::Bool(b) => self.pad(b.to_string()),
                _ => return None,
            },
            'c' => {
                let code = u32::try_from(value.as_i64().filter(|_| value.is_integer())?).ok()?;
                self.pad(char::from_u32(code)?.to_string())
            }
            _ => return None,
        };
        Some(out)
    }
}

/// Render `f` in scientific notation with a signed, at least two digit
/// exponent (`1.500000e+03`).
fn c_exponent(f: f64, precision: usize) -> String {
    let s = format!("{:.*e}", precision, f);
    match s.split_once('e') {
        Some((mantissa, exp)) => match exp.parse::<i32>() {
            Ok(exp) => format!("{}e{:+03}", mantissa, exp),
            Err(_) => s,
        },
        None => s,
    }
}

impl ValueFormatter for PrintfFormatter {
    fn parse(&mut self, spec: &str) -> FormatResult<()> {
        let caps = SPEC_RE.captures(spec).ok_or_else(|| {
            FormatError::formatter_spec(spec, "expected [flags][width][.precision][verb]")
        })?;

        let mut flags = Flags::default();
        if let Some(m) = caps.name("flags") {
            for c in m.as_str().chars() {
                match c {
                    '-' => flags.minus = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    '0' => flags.zero = true,
                    '#' => flags.alt = true,
                    _ => {}
                }
            }
        }

        let number = |name: &str| -> FormatResult<Option<usize>> {
            match caps.name(name) {
                // A bare '.' means precision zero
                Some(m) if m.as_str().is_empty() => Ok(Some(0)),
                Some(m) => {
                    let n = m
                        .as_str()
                        .parse::<usize>()
                        .map_err(|e| FormatError::formatter_spec(spec, e.to_string()))?;
                    if n > MAX_FIELD_WIDTH {
                        return Err(FormatError::formatter_spec(
                            spec,
                            format!("{} {} exceeds {}", name, n, MAX_FIELD_WIDTH),
                        ));
                    }
                    Ok(Some(n))
                }
                None => Ok(None),
            }
        };

        self.flags = flags;
        self.width = number("width")?;
        self.precision = number("precision")?;
        self.verb = caps
            .name("verb")
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or('v');
        Ok(())
    }

    fn format(&self, value: &Value) -> String {
        match self.render(value) {
            Some(out) => out,
            None => {
                debug!("verb %{} does not apply to {}, using %v", self.verb, value.type_name());
                self.generic(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    fn printf(spec: &str, value: impl Into<Value>) -> String {
        let mut formatter = PrintfFormatter::default();
        formatter.parse(spec).unwrap();
        formatter.format(&value.into())
    }

    #[test]
    fn test_floats() {
        assert_eq!(printf(".2f", 3.1415926), "3.14");
        assert_eq!(printf("f", 1.5), "1.500000");
        assert_eq!(printf("8.3f", -2.5), "  -2.500");
        assert_eq!(printf("08.3f", -2.5), "-002.500");
        assert_eq!(printf("+.1f", 2.0), "+2.0");
        assert_eq!(printf(".2", 2.0), "2.00");
        assert_eq!(printf(".0f", 7.0), "7");
        assert_eq!(printf(".1f", 3), "3.0");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(printf("e", 1500.0), "1.500000e+03");
        assert_eq!(printf(".2E", 0.000123), "1.23E-04");
    }

    #[test]
    fn test_integers() {
        assert_eq!(printf("d", 42), "42");
        assert_eq!(printf("5d", 42), "   42");
        assert_eq!(printf("-5d", 42), "42   ");
        assert_eq!(printf("05d", -42), "-0042");
        assert_eq!(printf("x", 255), "ff");
        assert_eq!(printf("#X", 255), "0XFF");
        assert_eq!(printf("#o", 8), "010");
        assert_eq!(printf("b", 5), "101");
        assert_eq!(printf("c", 65), "A");
        assert_eq!(printf("d", u64::MAX), "18446744073709551615");
    }

    #[test]
    fn test_strings() {
        assert_eq!(printf("s", "hello"), "hello");
        assert_eq!(printf(".3s", "hello"), "hel");
        assert_eq!(printf("-7s", "hi"), "hi     ");
        assert_eq!(printf("7s", "hi"), "     hi");
        assert_eq!(printf("q", "a\"b"), "\"a\\\"b\"");
        assert_eq!(printf("x", "hi"), "6869");
        assert_eq!(printf("t", true), "true");
    }

    #[test]
    fn test_generic_and_fallback() {
        assert_eq!(printf("", 7), "7");
        assert_eq!(printf("v", "text"), "text");
        assert_eq!(printf("d", "text"), "text");
        assert_eq!(printf("t", 1), "1");
        assert_eq!(printf("f", "x"), "x");
    }

    #[test]
    fn test_width_and_precision_limits() {
        assert_eq!(printf("65535d", 1).len(), MAX_FIELD_WIDTH);
        assert_eq!(printf(".1000f", 1.5).len(), 1002);

        let specs = [
            ".70000f",
            ".65536e",
            "65536d",
            "18446744073709551615d",
            ".99999999999999999999s",
        ];
        for spec in specs {
            let err = PrintfFormatter::default().parse(spec).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::FormatterSpec, "{}", spec);
        }
    }

    #[test]
    fn test_malformed_spec() {
        for spec in ["z", ".2q5", "5.2.1f", "%d"] {
            let err = PrintfFormatter::default().parse(spec).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::FormatterSpec, "{}", spec);
        }
    }
}
