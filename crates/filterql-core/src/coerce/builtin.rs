use crate::{
    coerce::{CoercionError, DateParser, SharedParser, ValueParser},
    value::{TypeKey, Value},
};
use rust_decimal::Decimal;
use std::{borrow::Cow, str::FromStr, sync::Arc};
use uuid::Uuid;

/// Default parser for a builtin key; `None` for custom keys. `Date` gets a
/// clone of `dates`.
pub(crate) fn builtin_parser(key: &TypeKey, dates: &DateParser) -> Option<SharedParser> {
    let parser: SharedParser = match key {
        TypeKey::Bool => Arc::new(BoolParser),
        TypeKey::Byte => Arc::new(ByteParser),
        TypeKey::Short => Arc::new(ShortParser),
        TypeKey::Int => Arc::new(IntParser),
        TypeKey::Long => Arc::new(LongParser),
        TypeKey::Float => Arc::new(FloatParser),
        TypeKey::Double => Arc::new(DoubleParser),
        TypeKey::Decimal => Arc::new(DecimalParser),
        TypeKey::Char => Arc::new(CharParser),
        TypeKey::Text => Arc::new(TextParser),
        TypeKey::Date => Arc::new(dates.clone()),
        TypeKey::Uuid => Arc::new(UuidParser),
        TypeKey::Custom(_) => return None,
    };

    Some(parser)
}

/// Scalar text of `value`, rejecting null, lists, and blank text.
pub(crate) fn non_blank_text<'a>(
    value: &'a Value,
    target: &str,
) -> Result<Cow<'a, str>, CoercionError> {
    if value.is_null() {
        return Err(CoercionError::NullValue);
    }

    match value.scalar_text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(CoercionError::invalid(value, target)),
    }
}

// Parsers that go through the value's text form and `FromStr`.
macro_rules! from_str_parsers {
    ( $( $(#[$doc:meta])* $name:ident => $ty:ty, $variant:ident, $target:literal; )* ) => {
        $(
            $(#[$doc])*
            #[derive(Clone, Copy, Debug, Default)]
            pub struct $name;

            impl ValueParser for $name {
                fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
                    if let Value::$variant(_) = value {
                        return Ok(value.clone());
                    }

                    let text = non_blank_text(value, $target)?;
                    <$ty>::from_str(&text)
                        .map(Value::$variant)
                        .map_err(|_| CoercionError::invalid(value, $target))
                }
            }
        )*
    };
}

from_str_parsers! {
    /// 8-bit signed integers.
    ByteParser => i8, Byte, "byte";
    /// 16-bit signed integers.
    ShortParser => i16, Short, "short";
    /// 32-bit signed integers.
    IntParser => i32, Int, "integer";
    /// 64-bit signed integers.
    LongParser => i64, Long, "long";
    FloatParser => f32, Float, "float";
    DoubleParser => f64, Double, "double";
    /// Arbitrary-precision decimals.
    DecimalParser => Decimal, Decimal, "decimal";
    UuidParser => Uuid, Uuid, "UUID";
}

///
/// BoolParser
/// Accepts `true` / `false` in any case.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct BoolParser;

impl ValueParser for BoolParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        if let Value::Bool(_) = value {
            return Ok(value.clone());
        }

        let text = non_blank_text(value, "boolean")?;
        if text.eq_ignore_ascii_case("true") {
            Ok(Value::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Ok(Value::Bool(false))
        } else {
            Err(CoercionError::invalid(value, "boolean"))
        }
    }
}

///
/// CharParser
/// First character of any non-blank text.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CharParser;

impl ValueParser for CharParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        if let Value::Char(_) = value {
            return Ok(value.clone());
        }

        let text = non_blank_text(value, "character")?;
        text.chars()
            .next()
            .map(Value::Char)
            .ok_or_else(|| CoercionError::invalid(value, "character"))
    }
}

///
/// TextParser
/// Any scalar rendered as text.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TextParser;

impl ValueParser for TextParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        if value.is_null() {
            return Err(CoercionError::NullValue);
        }

        value
            .scalar_text()
            .map(|text| Value::Text(text.into_owned()))
            .ok_or_else(|| CoercionError::invalid(value, "string"))
    }
}
