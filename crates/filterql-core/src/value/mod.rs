mod key;


use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use std::{borrow::Cow, fmt};
use uuid::Uuid;

// re-exports
pub use key::TypeKey;

///
/// Value
///
/// Runtime value carried by parameters and compiled predicates.
///
/// Raw parameter values arrive as any variant; after coercion a value is
/// always the variant matching its field's `TypeKey`. `Null` and `List`
/// never have a key of their own.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Char(char),
    Text(String),
    Date(NaiveDateTime),
    Uuid(Uuid),
    List(Vec<Self>),
}

impl Value {
    /// Canonical type key of this value, if it is a keyed scalar.
    #[must_use]
    pub fn type_key(&self) -> Option<TypeKey> {
        let key = match self {
            Self::Bool(_) => TypeKey::Bool,
            Self::Byte(_) => TypeKey::Byte,
            Self::Short(_) => TypeKey::Short,
            Self::Int(_) => TypeKey::Int,
            Self::Long(_) => TypeKey::Long,
            Self::Float(_) => TypeKey::Float,
            Self::Double(_) => TypeKey::Double,
            Self::Decimal(_) => TypeKey::Decimal,
            Self::Char(_) => TypeKey::Char,
            Self::Text(_) => TypeKey::Text,
            Self::Date(_) => TypeKey::Date,
            Self::Uuid(_) => TypeKey::Uuid,
            Self::Null | Self::List(_) => return None,
        };

        Some(key)
    }

    /// True when the value already satisfies `key` and needs no coercion.
    #[must_use]
    pub fn satisfies(&self, key: &TypeKey) -> bool {
        self.type_key().as_ref() == Some(key)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }

    /// Plain textual form of a scalar, as parsers consume it.
    ///
    /// Returns `None` for `Null` and `List`.
    #[must_use]
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        let text = match self {
            Self::Text(text) => return Some(Cow::Borrowed(text)),
            Self::Bool(v) => v.to_string(),
            Self::Byte(v) => v.to_string(),
            Self::Short(v) => v.to_string(),
            Self::Int(v) => v.to_string(),
            Self::Long(v) => v.to_string(),
            Self::Float(v) => v.to_string(),
            Self::Double(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Char(v) => v.to_string(),
            Self::Date(v) => v.format(DATE_DISPLAY_FORMAT).to_string(),
            Self::Uuid(v) => v.to_string(),
            Self::Null | Self::List(_) => return None,
        };

        Some(Cow::Owned(text))
    }
}

const DATE_DISPLAY_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "NULL"),
            Self::Text(text) => write!(f, "'{}'", text.replace('\'', "''")),
            Self::Char(c) => write!(f, "'{c}'"),
            Self::Date(date) => write!(f, "'{}'", date.format(DATE_DISPLAY_FORMAT)),
            Self::Uuid(uuid) => write!(f, "'{uuid}'"),
            Self::List(values) => {
                write!(f, "(")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value}")?;
                }
                write!(f, ")")
            }
            other => match other.scalar_text() {
                Some(text) => write!(f, "{text}"),
                None => Ok(()),
            },
        }
    }
}

///
/// Conversions
///

macro_rules! impl_from_scalar {
    ( $( $ty:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_scalar! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
    char => Char,
    String => Text,
    NaiveDateTime => Date,
    Uuid => Uuid,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// JSON numbers become `Long` when integral and `Double` otherwise.
/// Objects have no scalar meaning and are kept as their JSON text.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Self::Null,
            Json::Bool(v) => Self::Bool(v),
            Json::Number(n) => n
                .as_i64()
                .map_or_else(|| n.as_f64().map_or(Self::Null, Self::Double), Self::Long),
            Json::String(s) => Self::Text(s),
            Json::Array(values) => Self::List(values.into_iter().map(Into::into).collect()),
            object @ Json::Object(_) => Self::Text(object.to_string()),
        }
    }
}
