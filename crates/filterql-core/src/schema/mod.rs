//! Module: schema
//! Responsibility: the declared type graph that filter fields resolve against.
//! Does not own: field naming or parsing; see `field`.

pub mod path;


use crate::{error::FilterError, value::TypeKey};
use std::collections::BTreeMap;

// re-exports
pub use path::{Join, JoinId, JoinParent, JoinSet, PathResolver, ResolvedPath};

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cardinality {
    One,
    Many,
}

///
/// AttributeKind
///
/// What a single attribute of a schema type points at.
///
/// - `Scalar`: a terminal value with a coercion key
/// - `Relation`: another schema type reached through a join
/// - `Embedded`: another schema type stored inline, reached without a join
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeKind {
    Scalar(TypeKey),
    Relation {
        target: String,
        cardinality: Cardinality,
    },
    Embedded {
        target: String,
    },
}

///
/// AttributeModel
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeModel {
    pub name: String,
    pub kind: AttributeKind,
}

///
/// EntityModel
///
/// A named schema type: an entity reachable through relations, or an
/// embeddable reachable inline. Attribute order is declaration order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EntityModel {
    pub name: String,
    pub attributes: Vec<AttributeModel>,
}

impl EntityModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        self.attributes.push(AttributeModel {
            name: name.into(),
            kind,
        });
        self
    }

    #[must_use]
    pub fn scalar(self, name: impl Into<String>, key: TypeKey) -> Self {
        self.attribute(name, AttributeKind::Scalar(key))
    }

    /// Single-valued association.
    #[must_use]
    pub fn relation_one(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.attribute(
            name,
            AttributeKind::Relation {
                target: target.into(),
                cardinality: Cardinality::One,
            },
        )
    }

    /// Collection-valued association.
    #[must_use]
    pub fn relation_many(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.attribute(
            name,
            AttributeKind::Relation {
                target: target.into(),
                cardinality: Cardinality::Many,
            },
        )
    }

    #[must_use]
    pub fn embedded(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.attribute(
            name,
            AttributeKind::Embedded {
                target: target.into(),
            },
        )
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

///
/// Schema
///
/// All schema types by name. Built once, then only read.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Schema {
    types: BTreeMap<String, EntityModel>,
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a type.
    #[must_use]
    pub fn with_type(mut self, model: EntityModel) -> Self {
        self.types.insert(model.name.clone(), model);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityModel> {
        self.types.get(name)
    }

    pub fn require(&self, name: &str) -> Result<&EntityModel, FilterError> {
        self.get(name).ok_or_else(|| FilterError::UnknownType {
            name: name.to_string(),
        })
    }

    pub fn types(&self) -> impl Iterator<Item = &EntityModel> {
        self.types.values()
    }
}
