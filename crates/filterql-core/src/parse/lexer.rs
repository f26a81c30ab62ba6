use super::token::{Position, Token, TokenKind};
use crate::error::FilterError;
use std::{iter::Peekable, str::Chars};

///
/// Cursor
/// Character cursor that tracks the source position of the next character.
///

struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
    position: Position,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars().peekable(),
            position: Position::default(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 0;
        } else {
            self.position.column += 1;
        }

        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    // Reads the rest of an identifier whose first character is already read.
    fn word(&mut self, first: char) -> String {
        let mut word = String::from(first);
        while let Some(next) = self.peek().filter(|&n| is_ident_part(n)) {
            word.push(next);
            self.bump();
        }

        word
    }

    // Consumes the body of a block comment whose opening `/*` is already read.
    fn skip_comment(&mut self, start: Position) -> Result<(), FilterError> {
        while let Some(ch) = self.bump() {
            if ch == '*' && self.eat('/') {
                return Ok(());
            }
        }

        Err(FilterError::syntax(start, "unterminated comment"))
    }
}

/// Split filter text into tokens. The last token is always `Eof`.
///
/// Whitespace and `/* ... */` comments (including `/** ... */`) separate
/// tokens and are otherwise ignored.
pub fn tokenize(text: &str) -> Result<Vec<Token>, FilterError> {
    let mut cursor = Cursor::new(text);
    let mut tokens = Vec::new();

    loop {
        let position = cursor.position;
        let Some(ch) = cursor.bump() else {
            tokens.push(Token {
                kind: TokenKind::Eof,
                position,
            });
            return Ok(tokens);
        };

        let kind = match ch {
            c if c.is_whitespace() => continue,
            '/' if cursor.eat('*') => {
                cursor.skip_comment(position)?;
                continue;
            }
            ':' => {
                tokens.push(Token {
                    kind: TokenKind::Colon,
                    position,
                });

                // parameter names may start with a digit and never read as keywords
                let start = cursor.position;
                if let Some(first) = cursor.peek().filter(|&c| is_ident_part(c)) {
                    cursor.bump();
                    tokens.push(Token {
                        kind: TokenKind::Ident(cursor.word(first)),
                        position: start,
                    });
                }
                continue;
            }
            '.' => TokenKind::Dot,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '=' => TokenKind::Eq,
            '!' if cursor.eat('=') => TokenKind::NotEq,
            '<' if cursor.eat('=') => TokenKind::Lte,
            '<' if cursor.eat('>') => TokenKind::NotEq,
            '<' => TokenKind::Lt,
            '>' if cursor.eat('=') => TokenKind::Gte,
            '>' => TokenKind::Gt,
            c if is_ident_start(c) => {
                let word = cursor.word(c);
                TokenKind::keyword(&word).unwrap_or(TokenKind::Ident(word))
            }
            other => {
                return Err(FilterError::syntax(
                    position,
                    format!("unexpected character '{other}'"),
                ));
            }
        };

        tokens.push(Token { kind, position });
    }
}

const fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

const fn is_ident_part(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
