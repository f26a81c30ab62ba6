use crate::{coerce::CoercionError, parse::Position};
use std::fmt;
use thiserror::Error as ThisError;

///
/// FilterError
///
/// Every failure the compiler can report. All variants are user or
/// configuration input errors; none are retryable, and any of them aborts
/// the compilation that raised it.
///

#[derive(Debug, ThisError)]
pub enum FilterError {
    #[error("failed to parse query at line {position}: {message}")]
    Syntax { position: Position, message: String },

    #[error("field '{field}' does not exist")]
    UnknownField { field: String },

    #[error("unknown attribute '{attribute}' on '{owner}'")]
    UnknownAttribute { owner: String, attribute: String },

    #[error("unknown schema type '{name}'")]
    UnknownType { name: String },

    #[error("parameter '{parameter}' not found in the bound parameters")]
    ParameterNotBound { parameter: String },

    #[error("parameter '{parameter}' has already been set")]
    DuplicateParameter { parameter: String },

    #[error("field '{field}' has already been registered")]
    DuplicateField { field: String },

    #[error("error parsing parameter '{parameter}': {source}")]
    ValueCoercion {
        parameter: String,
        #[source]
        source: CoercionError,
    },

    #[error("parameter '{parameter}' must be {expected}")]
    TypeMismatch {
        parameter: String,
        expected: &'static str,
    },

    #[error("exceeded maximum number of expressions; number of expressions can not exceed {limit}")]
    ExpressionLimitExceeded { limit: usize },

    #[error("{0}")]
    InvalidOrder(#[from] OrderError),

    #[error("invalid pagination (limit {limit}, offset {offset}): values must not be negative")]
    InvalidPagination { limit: i64, offset: i64 },
}

impl FilterError {
    /// Stable classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::UnknownField { .. } => ErrorKind::UnknownField,
            Self::UnknownAttribute { .. } | Self::UnknownType { .. } => ErrorKind::UnknownAttribute,
            Self::ParameterNotBound { .. } => ErrorKind::ParameterNotBound,
            Self::DuplicateParameter { .. } => ErrorKind::DuplicateParameter,
            Self::DuplicateField { .. } => ErrorKind::DuplicateField,
            Self::ValueCoercion { .. } => ErrorKind::ValueCoercion,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ExpressionLimitExceeded { .. } => ErrorKind::ExpressionLimitExceeded,
            Self::InvalidOrder(_) => ErrorKind::InvalidOrder,
            Self::InvalidPagination { .. } => ErrorKind::InvalidPagination,
        }
    }

    pub(crate) fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField {
            field: field.into(),
        }
    }

    pub(crate) fn coercion(parameter: impl Into<String>, source: CoercionError) -> Self {
        Self::ValueCoercion {
            parameter: parameter.into(),
            source,
        }
    }
}

///
/// OrderError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum OrderError {
    #[error("order direction must be asc or desc, got '{direction}'")]
    UnknownDirection { direction: String },

    #[error("order field '{field}' does not exist")]
    UnknownField { field: String },

    #[error("field '{field}' is not orderable")]
    NotOrderable { field: String },
}

///
/// ErrorKind
/// Error taxonomy exposed to embedding applications.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    Syntax,
    UnknownField,
    UnknownAttribute,
    ParameterNotBound,
    DuplicateParameter,
    DuplicateField,
    ValueCoercion,
    TypeMismatch,
    ExpressionLimitExceeded,
    InvalidOrder,
    InvalidPagination,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Syntax => "syntax",
            Self::UnknownField => "unknown_field",
            Self::UnknownAttribute => "unknown_attribute",
            Self::ParameterNotBound => "parameter_not_bound",
            Self::DuplicateParameter => "duplicate_parameter",
            Self::DuplicateField => "duplicate_field",
            Self::ValueCoercion => "value_coercion",
            Self::TypeMismatch => "type_mismatch",
            Self::ExpressionLimitExceeded => "expression_limit_exceeded",
            Self::InvalidOrder => "invalid_order",
            Self::InvalidPagination => "invalid_pagination",
        };
        write!(f, "{label}")
    }
}
