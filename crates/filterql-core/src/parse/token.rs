use std::fmt;

///
/// Position
/// 1-based line, 0-based column, counted in characters.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

///
/// TokenKind
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Colon,
    Dot,
    LParen,
    RParen,

    // comparison operators
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,

    // keywords
    And,
    Or,
    Not,
    Between,
    In,
    Is,
    Null,
    Like,

    Eof,
}

impl TokenKind {
    /// Keyword for `word`, matched case-insensitively.
    pub(crate) fn keyword(word: &str) -> Option<Self> {
        const KEYWORDS: [(&str, TokenKind); 8] = [
            ("AND", TokenKind::And),
            ("OR", TokenKind::Or),
            ("NOT", TokenKind::Not),
            ("BETWEEN", TokenKind::Between),
            ("IN", TokenKind::In),
            ("IS", TokenKind::Is),
            ("NULL", TokenKind::Null),
            ("LIKE", TokenKind::Like),
        ];

        KEYWORDS
            .iter()
            .find(|(text, _)| text.eq_ignore_ascii_case(word))
            .map(|(_, kind)| kind.clone())
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Ident(name) => return write!(f, "'{name}'"),
            Self::Eof => return f.write_str("<EOF>"),
            Self::Colon => ":",
            Self::Dot => ".",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Between => "BETWEEN",
            Self::In => "IN",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::Like => "LIKE",
        };

        write!(f, "'{text}'")
    }
}

///
/// Token
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}
