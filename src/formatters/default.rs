//! Pass-through formatter.

use super::ValueFormatter;
use crate::core::value::Value;
use crate::utils::error::FormatResult;

/// Renders values with their generic string conversion and ignores its spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl ValueFormatter for DefaultFormatter {
    fn parse(&mut self, _spec: &str) -> FormatResult<()> {
        Ok(())
    }

    fn format(&self, value: &Value) -> String {
        value.to_string()
    }
}
