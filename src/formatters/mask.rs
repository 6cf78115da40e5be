//! Mask formatter (`*`), hides a value behind repeated mask characters.
//!
//! | Spec    | Output for `"secret"` |
//! |---------|-----------------------|
//! | (empty) | `******`              |
//! | `#`     | `######`              |
//! | `x3`    | `xxx`                 |

use super::{ValueFormatter, MAX_FIELD_WIDTH};
use crate::core::value::Value;
use crate::utils::error::{FormatError, FormatResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskFormatter {
    mask: char,
    /// Fixed output length; `None` repeats once per character of the value
    length: Option<usize>,
}

impl Default for MaskFormatter {
    fn default() -> Self {
        Self {
            mask: '*',
            length: None,
        }
    }
}

impl ValueFormatter for MaskFormatter {
    fn parse(&mut self, spec: &str) -> FormatResult<()> {
        let mut chars = spec.chars();
        let Some(mask) = chars.next() else {
            *self = Self::default();
            return Ok(());
        };
        self.mask = mask;

        let length = chars.as_str();
        self.length = if length.is_empty() {
            None
        } else {
            let n = length
                .parse::<usize>()
                .map_err(|e| FormatError::formatter_spec(spec, e.to_string()))?;
            if n > MAX_FIELD_WIDTH {
                return Err(FormatError::formatter_spec(
                    spec,
                    format!("length {} exceeds {}", n, MAX_FIELD_WIDTH),
                ));
            }
            // Zero means "as long as the value"
            (n > 0).then_some(n)
        };
        Ok(())
    }

    fn format(&self, value: &Value) -> String {
        let length = self
            .length
            .unwrap_or_else(|| value.to_string().chars().count());
        std::iter::repeat(self.mask).take(length).collect()
    }
}
