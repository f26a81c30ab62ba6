use std::{fmt, str::FromStr};

///
/// TypeKey
///
/// Canonical key for a coercion target. Schema scalars declare one, the
/// coercion registry is indexed by it, and every coerced `Value` reports it.
///
/// `Custom` keys let embedding applications introduce their own targets;
/// values for them can only be produced by a parser registered under the
/// same key.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum TypeKey {
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Decimal,
    Char,
    Text,
    Date,
    Uuid,
    Custom(String),
}

// Every accepted spelling, canonical name first per key.
const ALIASES: &[(&str, TypeKey)] = &[
    ("boolean", TypeKey::Bool),
    ("bool", TypeKey::Bool),
    ("byte", TypeKey::Byte),
    ("i8", TypeKey::Byte),
    ("short", TypeKey::Short),
    ("i16", TypeKey::Short),
    ("int", TypeKey::Int),
    ("integer", TypeKey::Int),
    ("i32", TypeKey::Int),
    ("long", TypeKey::Long),
    ("i64", TypeKey::Long),
    ("float", TypeKey::Float),
    ("f32", TypeKey::Float),
    ("double", TypeKey::Double),
    ("f64", TypeKey::Double),
    ("decimal", TypeKey::Decimal),
    ("bigdecimal", TypeKey::Decimal),
    ("char", TypeKey::Char),
    ("character", TypeKey::Char),
    ("string", TypeKey::Text),
    ("text", TypeKey::Text),
    ("date", TypeKey::Date),
    ("datetime", TypeKey::Date),
    ("uuid", TypeKey::Uuid),
];

impl TypeKey {
    /// Keys with a parser in the default coercion registry.
    pub const BUILTIN: [Self; 12] = [
        Self::Bool,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Char,
        Self::Text,
        Self::Date,
        Self::Uuid,
    ];

    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Bool => "boolean",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Char => "char",
            Self::Text => "string",
            Self::Date => "date",
            Self::Uuid => "uuid",
            Self::Custom(name) => name,
        }
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown names parse as `Custom`, so this never fails.
impl FromStr for TypeKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        let key = ALIASES
            .iter()
            .find(|(alias, _)| *alias == lowered)
            .map_or_else(|| Self::Custom(s.trim().to_string()), |(_, key)| key.clone());

        Ok(key)
    }
}
