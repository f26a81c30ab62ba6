//! Syntactic filter tree produced by the parser.
//!
//! Field and parameter names are carried verbatim together with the position
//! they were read at; nothing here is resolved against a field registry.

use super::token::Position;
use crate::predicate::CompareOp;
use std::fmt;

///
/// FieldRef
/// Dotted field name as written in the filter text.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldRef {
    pub name: String,
    pub position: Position,
}

///
/// ParamRef
/// `:name` placeholder; `name` excludes the colon.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParamRef {
    pub name: String,
    pub position: Position,
}

///
/// LogicalOp
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogicalOp {
    And,
    Or,
}

impl fmt::Display for LogicalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::Or => "OR",
        })
    }
}

///
/// FilterExpr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterExpr {
    Comparison {
        field: FieldRef,
        op: CompareOp,
        param: ParamRef,
    },
    Between {
        field: FieldRef,
        low: ParamRef,
        high: ParamRef,
        negated: bool,
    },
    In {
        field: FieldRef,
        param: ParamRef,
        negated: bool,
    },
    NullCheck {
        field: FieldRef,
        negated: bool,
    },
    Like {
        field: FieldRef,
        param: ParamRef,
        negated: bool,
    },

    /// Operands of one operator group, left to right. Always two or more.
    Binary {
        op: LogicalOp,
        children: Vec<Self>,
    },
}

impl FilterExpr {
    /// Number of nodes in this tree, counting every leaf and group.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::Binary { children, .. } => 1 + children.iter().map(Self::node_count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Parameter names referenced by this tree, in source order.
    #[must_use]
    pub fn parameters(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_parameters(&mut out);

        out
    }

    fn collect_parameters<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Comparison { param, .. } | Self::In { param, .. } | Self::Like { param, .. } => {
                out.push(&param.name);
            }
            Self::Between { low, high, .. } => {
                out.push(&low.name);
                out.push(&high.name);
            }
            Self::NullCheck { .. } => {}
            Self::Binary { children, .. } => {
                for child in children {
                    child.collect_parameters(out);
                }
            }
        }
    }
}
