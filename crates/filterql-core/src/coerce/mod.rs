//! Module: coerce
//! Responsibility: converting raw parameter values into the typed values a
//! field's attribute requires.
//! Boundary: the binder calls in here once per parameter occurrence.

mod builtin;
mod date;


use crate::value::{TypeKey, Value};
use parking_lot::RwLock;
use std::{collections::HashMap, fmt, sync::Arc};
use thiserror::Error as ThisError;

// re-exports
pub use builtin::*;
pub use date::DateParser;

///
/// ValueParser
///
/// Converts one raw value into a typed value.
///
/// Implemented by the built-in parsers, by anything registered in a
/// [`CoercionRegistry`], and by field-level custom parsers. Plain closures
/// of the right shape implement it too.
///

pub trait ValueParser: Send + Sync {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError>;
}

impl<F> ValueParser for F
where
    F: Fn(&Value) -> Result<Value, CoercionError> + Send + Sync,
{
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        self(value)
    }
}

/// Shared handle to a parser.
pub type SharedParser = Arc<dyn ValueParser>;

///
/// CoercionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CoercionError {
    #[error("parameter cannot be null")]
    NullValue,

    #[error("no value parser registered for type: {key}")]
    NoParser { key: String },

    #[error("could not parse '{value}' as {target}")]
    Invalid { value: String, target: String },

    #[error("{message}")]
    Custom { message: String },
}

impl CoercionError {
    /// Construct an `Invalid` error for a raw value and a target name.
    pub fn invalid(value: &Value, target: impl Into<String>) -> Self {
        let value = value
            .scalar_text()
            .map_or_else(|| value.to_string(), |text| text.into_owned());

        Self::Invalid {
            value,
            target: target.into(),
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom {
            message: message.into(),
        }
    }
}

///
/// CoercionRegistry
///
/// Mutable table from `TypeKey` to parser, shared by every compilation that
/// holds a clone of the handle. Registration and removal take effect for
/// all subsequent lookups, including lookups from compilations already in
/// flight; callers needing a stable view must serialize mutation against
/// compilation themselves.
///

#[derive(Clone)]
pub struct CoercionRegistry {
    parsers: Arc<RwLock<HashMap<TypeKey, SharedParser>>>,
    dates: DateParser,
}

impl CoercionRegistry {
    /// Registry seeded with a parser for every builtin key.
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        {
            let mut parsers = registry.parsers.write();
            for key in TypeKey::BUILTIN {
                if let Some(parser) = builtin_parser(&key, &registry.dates) {
                    parsers.insert(key, parser);
                }
            }
        }

        registry
    }

    /// Registry with no parsers at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsers: Arc::new(RwLock::new(HashMap::new())),
            dates: DateParser::default(),
        }
    }

    /// The date parser `new` seeds for `TypeKey::Date`.
    ///
    /// Formats added here apply to date coercion for as long as that parser
    /// stays registered. A registry from `empty` has not registered it.
    #[must_use]
    pub const fn date_parser(&self) -> &DateParser {
        &self.dates
    }

    /// Bind `parser` to `key`, returning the parser it replaced.
    pub fn register_parser<P>(&self, key: TypeKey, parser: P) -> Option<SharedParser>
    where
        P: ValueParser + 'static,
    {
        self.register_shared(key, Arc::new(parser))
    }

    pub fn register_shared(&self, key: TypeKey, parser: SharedParser) -> Option<SharedParser> {
        tracing::debug!(key = %key, "registering value parser");
        self.parsers.write().insert(key, parser)
    }

    /// Remove the binding for `key`. Returns whether one existed.
    pub fn unregister_parser(&self, key: &TypeKey) -> bool {
        tracing::debug!(key = %key, "unregistering value parser");
        self.parsers.write().remove(key).is_some()
    }

    #[must_use]
    pub fn contains(&self, key: &TypeKey) -> bool {
        self.parsers.read().contains_key(key)
    }

    #[must_use]
    pub fn parser(&self, key: &TypeKey) -> Option<SharedParser> {
        self.parsers.read().get(key).cloned()
    }

    /// Registered keys in canonical order.
    #[must_use]
    pub fn keys(&self) -> Vec<TypeKey> {
        let mut keys: Vec<_> = self.parsers.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Coerce `value` to `target`.
    ///
    /// A value that already carries `target`'s key is returned unchanged.
    /// `target == None` means the attribute has no scalar type. Only a
    /// field parser can handle such values, so the registry refuses them.
    pub fn coerce(&self, target: Option<&TypeKey>, value: &Value) -> Result<Value, CoercionError> {
        if value.is_null() {
            return Err(CoercionError::NullValue);
        }

        let Some(target) = target else {
            return Err(CoercionError::NoParser {
                key: "structured attribute".to_string(),
            });
        };

        if value.satisfies(target) {
            return Ok(value.clone());
        }

        // Lock is released before the parser runs; parsers may be slow or
        // may consult the registry themselves.
        let parser = self.parser(target).ok_or_else(|| CoercionError::NoParser {
            key: target.to_string(),
        })?;

        parser.parse(value)
    }
}

impl Default for CoercionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CoercionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoercionRegistry")
            .field("keys", &self.keys())
            .finish()
    }
}
