use derive_more::Display;
use filterql_core::error::{ErrorKind as CoreErrorKind, FilterError};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<FilterError> for Error {
    fn from(err: FilterError) -> Self {
        let (kind, origin) = match err.kind() {
            CoreErrorKind::Syntax => (ErrorKind::Syntax, ErrorOrigin::Parser),

            CoreErrorKind::UnknownField => (ErrorKind::UnknownField, ErrorOrigin::Binder),
            CoreErrorKind::ParameterNotBound => {
                (ErrorKind::ParameterNotBound, ErrorOrigin::Binder)
            }
            CoreErrorKind::ValueCoercion => (ErrorKind::ValueCoercion, ErrorOrigin::Binder),
            CoreErrorKind::TypeMismatch => (ErrorKind::TypeMismatch, ErrorOrigin::Binder),
            CoreErrorKind::ExpressionLimitExceeded => {
                (ErrorKind::ExpressionLimitExceeded, ErrorOrigin::Binder)
            }

            CoreErrorKind::UnknownAttribute => (ErrorKind::UnknownAttribute, ErrorOrigin::Schema),
            CoreErrorKind::DuplicateField => (ErrorKind::DuplicateField, ErrorOrigin::Schema),

            CoreErrorKind::DuplicateParameter => {
                (ErrorKind::DuplicateParameter, ErrorOrigin::Query)
            }
            CoreErrorKind::InvalidOrder => (ErrorKind::InvalidOrder, ErrorOrigin::Query),
            CoreErrorKind::InvalidPagination => (ErrorKind::InvalidPagination, ErrorOrigin::Query),
        };

        Self::new(kind, origin, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers. Every kind is a caller input error;
/// none is retryable.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Filter text does not follow the grammar.
    Syntax,

    UnknownField,

    /// A field path names an attribute or type the schema does not have.
    UnknownAttribute,

    ParameterNotBound,
    DuplicateParameter,
    DuplicateField,

    /// A parameter value could not be converted to its field's type.
    ValueCoercion,

    /// A parameter has the wrong shape for its operator (`IN` needs a list).
    TypeMismatch,

    ExpressionLimitExceeded,
    InvalidOrder,
    InvalidPagination,
}

///
/// ErrorOrigin
/// Compilation stage that raised the error.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorOrigin {
    Parser,
    Binder,
    Schema,
    Query,
}
