//! Compiler settings shared by every query a provider creates.

use crate::compile::ExpressionLimit;
use serde::{Deserialize, Serialize};

///
/// CompilerConfig
///
/// `max_expressions` caps the predicates a single filter may compile to.
/// `distinct` is the default projection for row queries; counts choose
/// their own at call time.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerConfig {
    pub max_expressions: ExpressionLimit,
    pub distinct: bool,
}

impl CompilerConfig {
    pub const DEFAULT: Self = Self {
        max_expressions: ExpressionLimit::Unbounded,
        distinct: true,
    };

    #[must_use]
    pub const fn with_max_expressions(mut self, max: usize) -> Self {
        self.max_expressions = ExpressionLimit::Max(max);
        self
    }

    #[must_use]
    pub const fn with_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Load settings from JSON; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
