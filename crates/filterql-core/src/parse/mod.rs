//! Module: parse
//! Responsibility: turning filter text into a `FilterExpr` tree.
//! Does not own: field or parameter resolution; the tree is purely syntactic.
//!
//! Grammar (lowest precedence first):
//!
//! ```text
//! query      := expr EOF
//! expr       := orExpr
//! orExpr     := andExpr (OR andExpr)*
//! andExpr    := term (AND term)*
//! term       := comparison | between | in | nullCheck | like | '(' expr ')'
//! comparison := field op param
//! between    := field [NOT] BETWEEN param AND param
//! in         := field [NOT] IN param
//! nullCheck  := field IS [NOT] NULL
//! like       := field [NOT] LIKE param
//! field      := IDENT ('.' IDENT)*
//! param      := ':' IDENT
//! ```

pub mod ast;
mod lexer;
mod parser;
mod token;

#[cfg(test)]
mod tests;

pub use ast::{FieldRef, FilterExpr, LogicalOp, ParamRef};
pub use lexer::tokenize;
pub use parser::parse;
pub use token::{Position, Token, TokenKind};
