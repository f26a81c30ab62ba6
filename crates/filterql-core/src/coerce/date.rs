use crate::{
    coerce::{CoercionError, ValueParser, builtin::non_blank_text},
    value::Value,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use parking_lot::RwLock;
use std::sync::Arc;

/// Formats tried by a default `DateParser`, in order.
pub const DEFAULT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

///
/// DateParser
///
/// Parses text into `Value::Date` by trying each registered `chrono`
/// format in registration order. Date-only formats yield midnight.
///
/// Clones share one format list, so a handle kept by the application can
/// add or remove formats after the parser has been registered. The parser
/// a `CoercionRegistry` seeds is reachable through
/// `CoercionRegistry::date_parser`.
///

#[derive(Clone, Debug)]
pub struct DateParser {
    formats: Arc<RwLock<Vec<String>>>,
}

impl DateParser {
    #[must_use]
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: Arc::new(RwLock::new(formats.into_iter().map(Into::into).collect())),
        }
    }

    /// Append a format. Registering an existing format is a no-op.
    pub fn register_format(&self, format: impl Into<String>) {
        let format = format.into();
        let mut formats = self.formats.write();
        if !formats.contains(&format) {
            formats.push(format);
        }
    }

    pub fn unregister_format(&self, format: &str) -> bool {
        let mut formats = self.formats.write();
        let before = formats.len();
        formats.retain(|f| f != format);

        formats.len() != before
    }

    pub fn unregister_formats(&self) {
        self.formats.write().clear();
    }

    #[must_use]
    pub fn formats(&self) -> Vec<String> {
        self.formats.read().clone()
    }

    fn parse_text(&self, text: &str) -> Option<NaiveDateTime> {
        self.formats.read().iter().find_map(|format| {
            NaiveDateTime::parse_from_str(text, format)
                .ok()
                .or_else(|| {
                    NaiveDate::parse_from_str(text, format)
                        .ok()
                        .map(|date| date.and_time(NaiveTime::MIN))
                })
        })
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::with_formats(DEFAULT_DATE_FORMATS)
    }
}

impl ValueParser for DateParser {
    fn parse(&self, value: &Value) -> Result<Value, CoercionError> {
        if let Value::Date(_) = value {
            return Ok(value.clone());
        }

        let text = non_blank_text(value, "date")?;
        self.parse_text(&text)
            .map(Value::Date)
            .ok_or_else(|| CoercionError::invalid(value, "date"))
    }
}
