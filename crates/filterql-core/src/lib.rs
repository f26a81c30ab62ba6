//! Core compiler for filterql: the filter grammar, schema path resolution,
//! value coercion, and the binder that turns filter text into a
//! backend-neutral predicate tree.
#![warn(unreachable_pub)]

pub mod coerce;
pub mod compile;
pub mod config;
pub mod error;
pub mod field;
pub mod parse;
pub mod predicate;
pub mod query;
pub mod schema;
pub mod value;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use error::FilterError;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No binders, lexers, or resolver internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        coerce::{CoercionRegistry, ValueParser},
        field::{FieldKind, FieldRegistry, FieldSpec},
        predicate::{CompareOp, ExpressionBuilder, Predicate},
        query::{FilterQuery, OrderDirection, Pagination, QueryProvider},
        schema::{EntityModel, Schema},
        value::{TypeKey, Value},
    };
}
