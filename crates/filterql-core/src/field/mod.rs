//! Module: field
//! Responsibility: the named, queryable fields a provider exposes, each bound
//! to a resolved schema path.
//! Boundary: built once per provider through `FieldRegistryBuilder`; read-only
//! and shareable afterwards.


use crate::{
    coerce::{SharedParser, ValueParser},
    error::FilterError,
    schema::{JoinSet, PathResolver, ResolvedPath, Schema},
};
use std::{collections::BTreeMap, fmt, sync::Arc};

///
/// FieldKind
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FieldKind {
    #[default]
    Simple,
    Orderable,
}

///
/// Field
///

#[derive(Clone)]
pub struct Field {
    pub name: String,
    pub attribute: String,
    pub path: ResolvedPath,
    pub kind: FieldKind,
    /// Field-level parser; when set it replaces registry coercion entirely.
    pub parser: Option<SharedParser>,
}

impl Field {
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        matches!(self.kind, FieldKind::Orderable)
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("attribute", &self.attribute)
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("parser", &self.parser.is_some())
            .finish()
    }
}

///
/// FieldSpec
///
/// Declarative registration request. The field is named after its
/// attribute path unless an alias is given.
///

#[derive(Clone)]
pub struct FieldSpec {
    attribute: String,
    alias: Option<String>,
    kind: FieldKind,
    parser: Option<SharedParser>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            alias: None,
            kind: FieldKind::Simple,
            parser: None,
        }
    }

    /// Shorthand for `FieldSpec::new(attribute).orderable()`.
    #[must_use]
    pub fn orderable_field(attribute: impl Into<String>) -> Self {
        Self::new(attribute).orderable()
    }

    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub const fn orderable(mut self) -> Self {
        self.kind = FieldKind::Orderable;
        self
    }

    #[must_use]
    pub fn parser<P: ValueParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Some(Arc::new(parser));
        self
    }

    #[must_use]
    pub fn shared_parser(mut self, parser: SharedParser) -> Self {
        self.parser = Some(parser);
        self
    }

    fn name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.attribute)
    }
}

///
/// FieldRegistry
///
/// Name → field map for one root schema type, plus the joins its fields
/// resolved through.
///

#[derive(Clone, Debug)]
pub struct FieldRegistry {
    root: String,
    fields: BTreeMap<String, Field>,
    joins: JoinSet,
}

impl FieldRegistry {
    pub fn builder<'a>(
        schema: &'a Schema,
        root: impl Into<String>,
    ) -> Result<FieldRegistryBuilder<'a>, FilterError> {
        let root = root.into();
        schema.require(&root)?;

        Ok(FieldRegistryBuilder {
            schema,
            registry: Self {
                root,
                fields: BTreeMap::new(),
                joins: JoinSet::default(),
            },
        })
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn get(&self, name: &str) -> Result<&Field, FilterError> {
        self.find(name)
            .ok_or_else(|| FilterError::unknown_field(name))
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    #[must_use]
    pub const fn joins(&self) -> &JoinSet {
        &self.joins
    }

    /// Fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

///
/// FieldRegistryBuilder
///

pub struct FieldRegistryBuilder<'a> {
    schema: &'a Schema,
    registry: FieldRegistry,
}

impl FieldRegistryBuilder<'_> {
    /// Register `name` over `attribute_path`, resolving the path now.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        attribute_path: impl Into<String>,
        kind: FieldKind,
        parser: Option<SharedParser>,
    ) -> Result<&Field, FilterError> {
        let name = name.into();
        let attribute = attribute_path.into();

        if self.registry.fields.contains_key(&name) {
            return Err(FilterError::DuplicateField { field: name });
        }

        let registry = &mut self.registry;
        let path = PathResolver::new(self.schema, &registry.root, &mut registry.joins)?
            .resolve(&attribute)?;

        tracing::debug!(field = %name, %attribute, %path, ?kind, "registering field");

        let field = Field {
            name: name.clone(),
            attribute,
            path,
            kind,
            parser,
        };

        Ok(registry.fields.entry(name).or_insert(field))
    }

    pub fn add_field(&mut self, spec: FieldSpec) -> Result<&Field, FilterError> {
        let name = spec.name().to_string();
        self.register(name, spec.attribute, spec.kind, spec.parser)
    }

    /// Register every spec, stopping at the first failure.
    pub fn add_fields<I>(&mut self, specs: I) -> Result<&mut Self, FilterError>
    where
        I: IntoIterator<Item = FieldSpec>,
    {
        for spec in specs {
            self.add_field(spec)?;
        }

        Ok(self)
    }

    /// Chaining form of `add_field`.
    pub fn field(mut self, spec: FieldSpec) -> Result<Self, FilterError> {
        self.add_field(spec)?;
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> FieldRegistry {
        self.registry
    }
}
