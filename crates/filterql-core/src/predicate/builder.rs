use crate::{predicate::CompareOp, schema::ResolvedPath, value::Value};

///
/// ExpressionBuilder
///
/// The primitives a query backend provides for building native expressions.
/// `Predicate::lower` drives a builder bottom-up, so combinators receive
/// operands that were already built.
///

pub trait ExpressionBuilder {
    type Expr;

    fn compare(&mut self, path: &ResolvedPath, op: CompareOp, value: &Value) -> Self::Expr;

    fn between(&mut self, path: &ResolvedPath, low: &Value, high: &Value) -> Self::Expr;

    fn in_list(&mut self, path: &ResolvedPath, values: &[Value]) -> Self::Expr;

    fn is_null(&mut self, path: &ResolvedPath) -> Self::Expr;

    fn like(&mut self, path: &ResolvedPath, pattern: &str) -> Self::Expr;

    fn and(&mut self, operands: Vec<Self::Expr>) -> Self::Expr;

    fn or(&mut self, operands: Vec<Self::Expr>) -> Self::Expr;

    fn not(&mut self, operand: Self::Expr) -> Self::Expr;
}
