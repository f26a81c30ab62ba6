use super::{
    ast::{FieldRef, FilterExpr, LogicalOp, ParamRef},
    lexer::tokenize,
    token::{Position, Token, TokenKind},
};
use crate::{error::FilterError, predicate::CompareOp};

// Parenthesised groups deeper than this are rejected instead of recursing further.
const MAX_NESTING: usize = 64;

/// Parse filter text into a `FilterExpr`.
///
/// Fails on the first lexical or grammar violation; there is no recovery and
/// no partial tree.
pub fn parse(text: &str) -> Result<FilterExpr, FilterError> {
    let tokens = tokenize(text)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };

    let expr = parser.expr()?;
    parser.expect_end()?;

    Ok(expr)
}

///
/// Parser
///

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> &Token {
        // tokenize always terminates the stream with Eof, and the cursor never moves past it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }

        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.bump();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> FilterError {
        let token = self.peek();

        FilterError::syntax(
            token.position,
            format!("unexpected {}, expected {expected}", token.kind),
        )
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Position, FilterError> {
        if &self.peek().kind == kind {
            Ok(self.bump().position)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_end(&self) -> Result<(), FilterError> {
        match self.peek().kind {
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of input")),
        }
    }

    fn ident(&mut self, expected: &str) -> Result<(String, Position), FilterError> {
        match &self.peek().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let position = self.bump().position;

                Ok((name, position))
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    // expr := orExpr
    fn expr(&mut self) -> Result<FilterExpr, FilterError> {
        self.or_expr()
    }

    // orExpr := andExpr (OR andExpr)*
    fn or_expr(&mut self) -> Result<FilterExpr, FilterError> {
        let mut children = vec![self.and_expr()?];
        while self.eat(&TokenKind::Or) {
            children.push(self.and_expr()?);
        }

        Ok(Self::group(LogicalOp::Or, children))
    }

    // andExpr := term (AND term)*
    fn and_expr(&mut self) -> Result<FilterExpr, FilterError> {
        let mut children = vec![self.term()?];
        while self.eat(&TokenKind::And) {
            children.push(self.term()?);
        }

        Ok(Self::group(LogicalOp::And, children))
    }

    // A lone operand is returned as-is rather than wrapped.
    fn group(op: LogicalOp, mut children: Vec<FilterExpr>) -> FilterExpr {
        if children.len() == 1 {
            children.remove(0)
        } else {
            FilterExpr::Binary { op, children }
        }
    }

    fn term(&mut self) -> Result<FilterExpr, FilterError> {
        if self.peek().kind == TokenKind::LParen {
            let open = self.bump().position;
            if self.depth >= MAX_NESTING {
                return Err(FilterError::syntax(
                    open,
                    format!("expression nested deeper than {MAX_NESTING} levels"),
                ));
            }

            self.depth += 1;
            let inner = self.expr()?;
            self.depth -= 1;
            self.expect(&TokenKind::RParen, "')'")?;

            return Ok(inner);
        }

        let field = self.field()?;
        let token = self.bump();

        let expr = match token.kind {
            TokenKind::Eq => self.comparison(field, CompareOp::Eq)?,
            TokenKind::NotEq => self.comparison(field, CompareOp::Ne)?,
            TokenKind::Lt => self.comparison(field, CompareOp::Lt)?,
            TokenKind::Lte => self.comparison(field, CompareOp::Lte)?,
            TokenKind::Gt => self.comparison(field, CompareOp::Gt)?,
            TokenKind::Gte => self.comparison(field, CompareOp::Gte)?,
            TokenKind::Is => {
                let negated = self.eat(&TokenKind::Not);
                self.expect(&TokenKind::Null, "NULL")?;

                FilterExpr::NullCheck { field, negated }
            }
            TokenKind::Not => {
                let keyword = self.bump();
                self.negatable(field, &keyword, true)?
            }
            _ => self.negatable(field, &token, false)?,
        };

        Ok(expr)
    }

    // BETWEEN, IN and LIKE, each optionally preceded by NOT.
    fn negatable(
        &mut self,
        field: FieldRef,
        keyword: &Token,
        negated: bool,
    ) -> Result<FilterExpr, FilterError> {
        match keyword.kind {
            TokenKind::Between => {
                let low = self.param()?;
                self.expect(&TokenKind::And, "AND")?;
                let high = self.param()?;

                Ok(FilterExpr::Between {
                    field,
                    low,
                    high,
                    negated,
                })
            }
            TokenKind::In => Ok(FilterExpr::In {
                field,
                param: self.param()?,
                negated,
            }),
            TokenKind::Like => Ok(FilterExpr::Like {
                field,
                param: self.param()?,
                negated,
            }),
            _ => {
                let expected = if negated {
                    "BETWEEN, IN or LIKE after NOT"
                } else {
                    "a comparison operator"
                };

                Err(FilterError::syntax(
                    keyword.position,
                    format!("unexpected {}, expected {expected}", keyword.kind),
                ))
            }
        }
    }

    fn comparison(&mut self, field: FieldRef, op: CompareOp) -> Result<FilterExpr, FilterError> {
        Ok(FilterExpr::Comparison {
            field,
            op,
            param: self.param()?,
        })
    }

    // field := IDENT ('.' IDENT)*
    fn field(&mut self) -> Result<FieldRef, FilterError> {
        let (mut name, position) = self.ident("a field name or '('")?;
        while self.eat(&TokenKind::Dot) {
            let (segment, _) = self.ident("an attribute name after '.'")?;
            name.push('.');
            name.push_str(&segment);
        }

        Ok(FieldRef { name, position })
    }

    // param := ':' IDENT
    fn param(&mut self) -> Result<ParamRef, FilterError> {
        let position = self.expect(&TokenKind::Colon, "a parameter such as ':name'")?;
        let (name, _) = self.ident("a parameter name after ':'")?;

        Ok(ParamRef { name, position })
    }
}
