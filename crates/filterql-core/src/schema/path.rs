//! Module: schema::path
//! Responsibility: resolving dotted attribute paths against the schema graph
//! and owning the joins those paths cross.
//! Boundary: joins are keyed by (parent, relation), never by path text, so
//! any two paths that share a relation prefix share its join.

use crate::{
    error::FilterError,
    schema::{AttributeKind, Cardinality, EntityModel, Schema},
    value::TypeKey,
};
use derive_more::{Deref, IntoIterator};
use std::fmt;

///
/// JoinId
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct JoinId(usize);

impl JoinId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for JoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "j{}", self.0)
    }
}

///
/// JoinParent
/// Where a join (or a resolved path) starts from.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum JoinParent {
    Root,
    Join(JoinId),
}

impl fmt::Display for JoinParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("root"),
            Self::Join(id) => write!(f, "{id}"),
        }
    }
}

///
/// Join
///
/// One traversal edge across a relation. Joins never filter rows on their
/// own: a backend builds every join as an outer join.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Join {
    pub id: JoinId,
    pub parent: JoinParent,
    /// Attribute path from `parent` to the relation, e.g. `teacher` or
    /// `details.reviewer` when the relation sits inside an embedded value.
    pub relation: String,
    pub source: String,
    pub target: String,
    pub cardinality: Cardinality,
}

///
/// JoinSet
///
/// Joins in creation order. A join's parent always precedes it.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct JoinSet(#[into_iterator(owned, ref)] Vec<Join>);

impl JoinSet {
    #[must_use]
    pub fn get(&self, id: JoinId) -> Option<&Join> {
        self.0.get(id.0)
    }

    #[must_use]
    pub fn find(&self, parent: JoinParent, relation: &str) -> Option<JoinId> {
        self.0
            .iter()
            .find(|join| join.parent == parent && join.relation == relation)
            .map(|join| join.id)
    }

    fn push(
        &mut self,
        parent: JoinParent,
        relation: String,
        source: &str,
        target: &str,
        cardinality: Cardinality,
    ) -> JoinId {
        let id = JoinId(self.0.len());
        self.0.push(Join {
            id,
            parent,
            relation,
            source: source.to_string(),
            target: target.to_string(),
            cardinality,
        });

        id
    }

    fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }
}

///
/// ResolvedPath
///
/// A concrete attribute location: the join (or root) it starts from, the
/// inline attribute steps taken from there, and the terminal scalar type.
///
/// `value_type` is `None` when the path ends on a relation or an embedded
/// value; such paths support null checks but have no registry coercion.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ResolvedPath {
    pub source: JoinParent,
    pub attributes: Vec<String>,
    pub value_type: Option<TypeKey>,
}

impl fmt::Display for ResolvedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        for attribute in &self.attributes {
            write!(f, ".{attribute}")?;
        }

        Ok(())
    }
}

///
/// PathResolver
///
/// Resolves paths from one root type, recording joins into a `JoinSet`.
/// A failed resolution leaves the join set exactly as it was.
///

pub struct PathResolver<'a> {
    schema: &'a Schema,
    root: &'a EntityModel,
    joins: &'a mut JoinSet,
}

impl<'a> PathResolver<'a> {
    pub fn new(schema: &'a Schema, root: &str, joins: &'a mut JoinSet) -> Result<Self, FilterError> {
        let root = schema.require(root)?;

        Ok(Self {
            schema,
            root,
            joins,
        })
    }

    pub fn resolve(&mut self, path: &str) -> Result<ResolvedPath, FilterError> {
        let checkpoint = self.joins.len();
        let resolved = self.traverse(path);
        if resolved.is_err() {
            self.joins.truncate(checkpoint);
        }

        resolved
    }

    fn traverse(&mut self, path: &str) -> Result<ResolvedPath, FilterError> {
        let schema = self.schema;
        let mut current = self.root;
        let mut source = JoinParent::Root;
        let mut attributes: Vec<String> = Vec::new();
        let mut value_type = None;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let attribute = current
                .get(segment)
                .ok_or_else(|| unknown_attribute(&current.name, segment))?;

            match &attribute.kind {
                AttributeKind::Scalar(key) => {
                    if let Some(next) = segments.peek() {
                        return Err(unknown_attribute(
                            &format!("{}.{}", current.name, segment),
                            next,
                        ));
                    }
                    attributes.push(segment.to_string());
                    value_type = Some(key.clone());
                }

                AttributeKind::Embedded { target } => {
                    attributes.push(segment.to_string());
                    current = schema.require(target)?;
                }

                AttributeKind::Relation {
                    target,
                    cardinality,
                } => {
                    attributes.push(segment.to_string());
                    let relation = attributes.join(".");
                    attributes.clear();

                    let target = schema.require(target)?;
                    let id = match self.joins.find(source, &relation) {
                        Some(id) => {
                            tracing::trace!(%id, %relation, "reusing join");
                            id
                        }
                        None => {
                            let id = self.joins.push(
                                source,
                                relation,
                                &current.name,
                                &target.name,
                                *cardinality,
                            );
                            tracing::debug!(
                                %id,
                                source = %current.name,
                                target = %target.name,
                                "creating join"
                            );
                            id
                        }
                    };

                    source = JoinParent::Join(id);
                    current = target;
                }
            }
        }

        Ok(ResolvedPath {
            source,
            attributes,
            value_type,
        })
    }
}

fn unknown_attribute(owner: &str, attribute: &str) -> FilterError {
    FilterError::UnknownAttribute {
        owner: owner.to_string(),
        attribute: attribute.to_string(),
    }
}
