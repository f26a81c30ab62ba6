//! ## Crate layout
//! - `core`: the filter grammar, schema path resolution, value coercion,
//!   and the compiler that produces backend-neutral predicate trees.
//! - `error`: the public error type with a stable, serializable taxonomy.
//!
//! The `prelude` module carries the vocabulary an embedding service needs
//! to declare fields, build queries, and hand compiled predicates to its
//! storage backend.

pub use filterql_core as core;

pub mod error;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, ErrorKind, ErrorOrigin};

/// Result alias for facade-level calls.
pub type Result<T> = std::result::Result<T, Error>;

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        compile::ExpressionLimit,
        config::CompilerConfig,
        prelude::*,
        query::{CompiledCount, CompiledQuery, OrderSpec},
        schema::{JoinParent, JoinSet, ResolvedPath},
    };
    pub use crate::{Error, ErrorKind, ErrorOrigin};
}
