//! Module: compile
//! Responsibility: binding a parsed filter to fields, parameters and coerced
//! values, producing a `Predicate`.
//! Does not own: predefined expressions, ordering, or pagination; those are
//! merged in `query`.

mod binder;


use crate::{
    coerce::CoercionRegistry, error::FilterError, field::FieldRegistry, parse,
    predicate::Predicate, value::Value,
};
use derive_more::{Deref, IntoIterator};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// re-exports
pub use binder::Binder;

///
/// ExpressionLimit
///
/// Cap on the number of predicates one filter may compile to. Every leaf
/// and every AND/OR group counts once; the `NOT` of a negated form does
/// not. Serialized as an optional integer, `null` meaning unbounded.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum ExpressionLimit {
    #[default]
    Unbounded,
    Max(usize),
}

impl ExpressionLimit {
    #[must_use]
    pub const fn max(self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Max(max) => Some(max),
        }
    }

    /// True when `count` predicates is more than this limit allows.
    #[must_use]
    pub const fn exceeded_by(self, count: usize) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Max(max) => count > max,
        }
    }
}

impl From<Option<usize>> for ExpressionLimit {
    fn from(max: Option<usize>) -> Self {
        max.map_or(Self::Unbounded, Self::Max)
    }
}

impl From<ExpressionLimit> for Option<usize> {
    fn from(limit: ExpressionLimit) -> Self {
        limit.max()
    }
}

///
/// Parameters
/// Raw parameter values by name, as bound before compilation.
///

#[derive(Clone, Debug, Default, Deref, IntoIterator, PartialEq)]
pub struct Parameters(#[into_iterator(owned, ref)] BTreeMap<String, Value>);

impl Parameters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` once; a second binding of the same name is rejected.
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Result<(), FilterError> {
        let name = name.into();
        if self.0.contains_key(&name) {
            return Err(FilterError::DuplicateParameter { parameter: name });
        }

        self.0.insert(name, value.into());

        Ok(())
    }
}

/// Compile optional filter text into a predicate.
///
/// `None` means no filter and yields `Ok(None)`. Empty text is not the same
/// thing and fails to parse.
pub fn compile_filter(
    text: Option<&str>,
    fields: &FieldRegistry,
    parameters: &Parameters,
    coercions: &CoercionRegistry,
    limit: ExpressionLimit,
) -> Result<Option<Predicate>, FilterError> {
    let Some(text) = text else {
        return Ok(None);
    };

    let expr = parse::parse(text)?;
    let mut binder = Binder::new(fields, parameters, coercions, limit);
    let predicate = binder.bind(&expr)?;

    tracing::debug!(
        root = fields.root(),
        predicates = binder.emitted(),
        "compiled filter"
    );

    Ok(Some(predicate))
}
