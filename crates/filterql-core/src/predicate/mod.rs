//! Module: predicate
//! Responsibility: the backend-neutral predicate tree emitted by compilation.
//! Does not own: evaluation. Backends consume the tree through
//! `ExpressionBuilder`.

mod builder;


use crate::{schema::ResolvedPath, value::Value};
use std::{
    fmt,
    ops::{BitAnd, BitOr},
};

// re-exports
pub use builder::ExpressionBuilder;

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// Predicate
///
/// Fields are replaced by resolved paths and parameters by coerced values.
/// Negated filter forms appear as `Not` around the positive predicate.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Compare {
        path: ResolvedPath,
        op: CompareOp,
        value: Value,
    },
    Between {
        path: ResolvedPath,
        low: Value,
        high: Value,
    },
    In {
        path: ResolvedPath,
        values: Vec<Value>,
    },
    IsNull {
        path: ResolvedPath,
    },
    Like {
        path: ResolvedPath,
        pattern: String,
    },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn compare(path: ResolvedPath, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare {
            path,
            op,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn eq(path: ResolvedPath, value: impl Into<Value>) -> Self {
        Self::compare(path, CompareOp::Eq, value)
    }

    #[must_use]
    pub fn ne(path: ResolvedPath, value: impl Into<Value>) -> Self {
        Self::compare(path, CompareOp::Ne, value)
    }

    #[must_use]
    pub fn between(path: ResolvedPath, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Between {
            path,
            low: low.into(),
            high: high.into(),
        }
    }

    #[must_use]
    pub const fn in_list(path: ResolvedPath, values: Vec<Value>) -> Self {
        Self::In { path, values }
    }

    #[must_use]
    pub const fn is_null(path: ResolvedPath) -> Self {
        Self::IsNull { path }
    }

    #[must_use]
    pub fn like(path: ResolvedPath, pattern: impl Into<String>) -> Self {
        Self::Like {
            path,
            pattern: pattern.into(),
        }
    }

    /// Number of predicates in this tree, counting every node.
    #[must_use]
    pub fn node_count(&self) -> usize {
        match self {
            Self::And(children) | Self::Or(children) => {
                1 + children.iter().map(Self::node_count).sum::<usize>()
            }
            Self::Not(inner) => 1 + inner.node_count(),
            _ => 1,
        }
    }

    /// Hand this tree to a backend, bottom-up.
    pub fn lower<B: ExpressionBuilder + ?Sized>(&self, builder: &mut B) -> B::Expr {
        match self {
            Self::And(children) => {
                let operands = children.iter().map(|child| child.lower(builder)).collect();
                builder.and(operands)
            }
            Self::Or(children) => {
                let operands = children.iter().map(|child| child.lower(builder)).collect();
                builder.or(operands)
            }
            Self::Not(inner) => {
                let operand = inner.lower(builder);
                builder.not(operand)
            }
            Self::Compare { path, op, value } => builder.compare(path, *op, value),
            Self::Between { path, low, high } => builder.between(path, low, high),
            Self::In { path, values } => builder.in_list(path, values),
            Self::IsNull { path } => builder.is_null(path),
            Self::Like { path, pattern } => builder.like(path, pattern),
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitAnd for &Predicate {
    type Output = Predicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        Predicate::And(vec![self.clone(), rhs.clone()])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

impl BitOr for &Predicate {
    type Output = Predicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        Predicate::Or(vec![self.clone(), rhs.clone()])
    }
}

///
/// Display
///
/// Readable infix form. Groups are always parenthesised so the rendered
/// text shows the tree shape exactly.
///

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And(children) => write_group(f, "AND", "TRUE", children),
            Self::Or(children) => write_group(f, "OR", "FALSE", children),
            Self::Not(inner) => match inner.as_ref() {
                Self::And(_) | Self::Or(_) => write!(f, "NOT {inner}"),
                _ => write!(f, "NOT ({inner})"),
            },
            Self::Compare { path, op, value } => write!(f, "{path} {op} {value}"),
            Self::Between { path, low, high } => write!(f, "{path} BETWEEN {low} AND {high}"),
            Self::In { path, values } => {
                write!(f, "{path} IN ")?;
                write_list(f, values)
            }
            Self::IsNull { path } => write!(f, "{path} IS NULL"),
            Self::Like { path, pattern } => {
                write!(f, "{path} LIKE '{}'", pattern.replace('\'', "''"))
            }
        }
    }
}

fn write_group(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    empty: &str,
    children: &[Predicate],
) -> fmt::Result {
    if children.is_empty() {
        return f.write_str(empty);
    }

    f.write_str("(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {keyword} ")?;
        }
        write!(f, "{child}")?;
    }
    f.write_str(")")
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    f.write_str("(")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{value}")?;
    }
    f.write_str(")")
}
