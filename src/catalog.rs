//! Table-backed interpreters and catalog files.
//!
//! A catalog maps namespaces to key → template tables, typically one
//! namespace per language:
//!
//! ```toml
//! default_namespace = "en"
//! join = " "
//!
//! [namespaces.en]
//! hello = "Hello"
//! greet = "Nice to meet you, {}"
//! ```

use indexmap::IndexMap;

use crate::core::engine::Engine;
use crate::core::expr::ExprInterpreter;
use crate::core::value::Value;
use crate::utils::error::{FormatError, FormatResult};

#[cfg(feature = "catalog")]
use serde::{Deserialize, Serialize};

/// An interpreter answering keys from a fixed table of templates.
///
/// Called with arguments, the template is rendered with `{}` / `{N}`
/// placeholders bound to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableInterpreter {
    entries: IndexMap<String, String>,
}

impl TableInterpreter {
    pub fn new(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.insert(key, template);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for TableInterpreter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ExprInterpreter for TableInterpreter {
    fn format(&self, key: &str, args: &[Value]) -> FormatResult<String> {
        let template = self.get(key).ok_or_else(|| FormatError::unresolved(key))?;
        if args.is_empty() {
            return Ok(template.to_string());
        }
        Engine::bare().try_format(template, args)
    }
}

/// Namespaced template tables loaded from TOML.
#[cfg(feature = "catalog")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Namespace used by unqualified names
    pub default_namespace: Option<String>,
    /// Separator the `+` operator inserts between its operands
    pub join: Option<String>,
    pub namespaces: IndexMap<String, IndexMap<String, String>>,
}

#[cfg(feature = "catalog")]
impl Catalog {
    /// Parse a catalog from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    /// Register the catalog's namespaces and settings on an engine.
    pub fn apply(&self, engine: &mut Engine) {
        for (namespace, entries) in &self.namespaces {
            log::debug!("registering catalog namespace {} ({} keys)", namespace, entries.len());
            engine.register_interpreter(namespace.as_str(), TableInterpreter::new(entries.clone()));
        }
        if let Some(namespace) = &self.default_namespace {
            engine.set_default_interpreter(namespace.as_str());
        }
        if let Some(separator) = &self.join {
            engine.set_operator('+', crate::core::expr::ops::join_with(separator.as_str()));
        }
    }
}
