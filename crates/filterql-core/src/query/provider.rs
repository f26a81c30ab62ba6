use crate::{
    coerce::CoercionRegistry, config::CompilerConfig, field::FieldRegistry, query::FilterQuery,
};
use std::sync::Arc;

///
/// QueryProvider
///
/// Long-lived entry point for one root type. Holds the read-only field
/// registry, the coercion registry handle and compiler settings, and hands
/// out fresh `FilterQuery` instances that share them.
///

#[derive(Clone, Debug)]
pub struct QueryProvider {
    fields: Arc<FieldRegistry>,
    coercions: CoercionRegistry,
    config: CompilerConfig,
}

impl QueryProvider {
    #[must_use]
    pub fn new(fields: FieldRegistry, coercions: CoercionRegistry) -> Self {
        Self {
            fields: Arc::new(fields),
            coercions,
            config: CompilerConfig::DEFAULT,
        }
    }

    #[must_use]
    pub const fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn fields(&self) -> &FieldRegistry {
        &self.fields
    }

    /// The coercion registry handle; parsers registered through it are seen
    /// by every query this provider creates.
    #[must_use]
    pub const fn coercions(&self) -> &CoercionRegistry {
        &self.coercions
    }

    #[must_use]
    pub const fn config(&self) -> &CompilerConfig {
        &self.config
    }

    /// New query over optional filter text. `None` means no filter.
    #[must_use]
    pub fn create_query(&self, text: Option<&str>) -> FilterQuery {
        tracing::trace!(root = self.fields.root(), ?text, "creating query");

        FilterQuery::new(
            Arc::clone(&self.fields),
            self.coercions.clone(),
            self.config.max_expressions,
            text,
            self.config.distinct,
        )
    }

    #[must_use]
    pub fn query(&self, text: &str) -> FilterQuery {
        self.create_query(Some(text))
    }

    /// Query with no filter text; only predefined expressions restrict it.
    #[must_use]
    pub fn unfiltered(&self) -> FilterQuery {
        self.create_query(None)
    }
}
