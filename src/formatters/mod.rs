//! Value formatters.
//!
//! A placeholder such as `{:%.2f}` selects a formatter by the first
//! character of its spec (the label, `%` here) and hands it the rest of the
//! spec (`.2f`). A fresh formatter instance is built from the registered
//! factory for every placeholder occurrence.

pub mod default;
pub mod mask;
pub mod printf;
pub mod time;

use std::fmt;
use std::sync::Arc;

use fxhash::FxHashMap;
use log::debug;

use crate::core::value::Value;
use crate::utils::error::FormatResult;

pub use default::DefaultFormatter;
pub use mask::MaskFormatter;
pub use printf::PrintfFormatter;
pub use time::TimeFormatter;

/// Label of the printf-style formatter.
pub const PRINTF_LABEL: char = '%';
/// Label of the time formatter.
pub const TIME_LABEL: char = '@';
/// Label of the mask formatter.
pub const MASK_LABEL: char = '*';

/// Largest width, precision or length a formatter spec may ask for.
pub const MAX_FIELD_WIDTH: usize = u16::MAX as usize;

/// Renders one argument for one placeholder.
pub trait ValueFormatter {
    /// Configure this instance from the spec that follows the label.
    ///
    /// Fails with [`FormatError::FormatterSpec`](crate::FormatError::FormatterSpec)
    /// when the spec is malformed.
    fn parse(&mut self, spec: &str) -> FormatResult<()>;

    /// Render a value.
    fn format(&self, value: &Value) -> String;
}

/// Builds fresh formatter instances.
pub type FormatterFactory = Arc<dyn Fn() -> Box<dyn ValueFormatter> + Send + Sync>;

/// Formatter factories keyed by label.
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    factories: FxHashMap<char, FormatterFactory>,
}

impl FormatterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in formatters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register a factory, replacing any previous one for `label`.
    pub fn register<F>(&mut self, label: char, factory: F)
    where
        F: Fn() -> Box<dyn ValueFormatter> + Send + Sync + 'static,
    {
        self.factories.insert(label, Arc::new(factory));
    }

    /// Register a formatter type built with `Default::default()`.
    pub fn register_type<T>(&mut self, label: char)
    where
        T: ValueFormatter + Default + 'static,
    {
        self.register(label, || Box::new(T::default()) as Box<dyn ValueFormatter>);
    }

    /// Remove the factory of a label.
    pub fn unregister(&mut self, label: char) -> bool {
        self.factories.remove(&label).is_some()
    }

    /// Check if a label is registered.
    pub fn contains(&self, label: char) -> bool {
        self.factories.contains_key(&label)
    }

    /// Registered labels, sorted.
    pub fn labels(&self) -> Vec<char> {
        let mut labels: Vec<char> = self.factories.keys().copied().collect();
        labels.sort_unstable();
        labels
    }

    /// Build a fresh formatter for `label`.
    pub fn create(&self, label: char) -> Option<Box<dyn ValueFormatter>> {
        self.factories.get(&label).map(|factory| factory())
    }

    /// Build and configure the formatter selected by a full placeholder spec.
    ///
    /// An empty spec or an unregistered label yields a [`DefaultFormatter`].
    pub fn instantiate(&self, spec: &str) -> FormatResult<Box<dyn ValueFormatter>> {
        let mut chars = spec.chars();
        let Some(label) = chars.next() else {
            return Ok(Box::new(DefaultFormatter));
        };
        let rest = chars.as_str();

        let mut formatter = match self.create(label) {
            Some(formatter) => formatter,
            None => {
                debug!("no formatter for label {:?}, using default", label);
                Box::new(DefaultFormatter)
            }
        };
        formatter.parse(rest)?;
        Ok(formatter)
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("labels", &self.labels())
            .finish()
    }
}

/// Register the printf, time and mask formatters.
pub fn register_builtins(registry: &mut FormatterRegistry) {
    registry.register_type::<PrintfFormatter>(PRINTF_LABEL);
    registry.register_type::<TimeFormatter>(TIME_LABEL);
    registry.register_type::<MaskFormatter>(MASK_LABEL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ErrorKind, FormatError};

    struct Upper;

    impl ValueFormatter for Upper {
        fn parse(&mut self, spec: &str) -> FormatResult<()> {
            if spec.is_empty() {
                Ok(())
            } else {
                Err(FormatError::formatter_spec(spec, "takes no options"))
            }
        }

        fn format(&self, value: &Value) -> String {
            value.to_string().to_uppercase()
        }
    }

    #[test]
    fn test_builtin_labels() {
        let registry = FormatterRegistry::with_builtins();
        assert_eq!(registry.labels(), vec!['%', '*', '@']);
        assert!(FormatterRegistry::new().labels().is_empty());
    }

    #[test]
    fn test_instantiate_registered() {
        let mut registry = FormatterRegistry::new();
        registry.register('^', || Box::new(Upper) as Box<dyn ValueFormatter>);

        let formatter = registry.instantiate("^").unwrap();
        assert_eq!(formatter.format(&Value::from("abc")), "ABC");

        let err = registry.instantiate("^x").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::FormatterSpec);
    }

    #[test]
    fn test_instantiate_fallback() {
        let registry = FormatterRegistry::new();
        let formatter = registry.instantiate("").unwrap();
        assert_eq!(formatter.format(&Value::from(42)), "42");

        let formatter = registry.instantiate("?whatever").unwrap();
        assert_eq!(formatter.format(&Value::from("x")), "x");
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = FormatterRegistry::with_builtins();
        registry.register_type::<DefaultFormatter>('*');
        let formatter = registry.instantiate("*").unwrap();
        assert_eq!(formatter.format(&Value::from("secret")), "secret");
    }
}
