//! Lexer (tokenizer) for minic source code
//!
//! The [`Tokenizer`] holds exactly one token of lookahead. The parser reads it
//! with [`Tokenizer::next`] and moves on with [`Tokenizer::advance`]; nothing
//! else mutates the cursor. Comments are removed beforehand by
//! [`super::preprocess::strip_comments`].

use super::ast::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Token kinds, with the lexeme for literals and identifiers.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Int(i64),
    Str(String),

    // Identifiers
    Ident(String),

    // Keywords
    If,
    Else,
    While,
    Scanf,
    Printf,
    IntType,
    StrType,
    Void,
    Return,

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Gt,    // >

    // Logical
    AndAnd, // &&
    OrOr,   // ||
    Bang,   // !

    // Assignment
    Assign, // =

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }
    Semicolon, // ;
    Comma,     // ,

    // End of file
    Eof,
}

impl TokenKind {
    /// Whether this token starts a variable type (`int` or `str`)
    pub fn is_var_type(&self) -> bool {
        matches!(self, TokenKind::IntType | TokenKind::StrType)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Int(n) => write!(f, "int literal {}", n),
            TokenKind::Str(s) => write!(f, "string literal \"{}\"", s),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::While => write!(f, "'while'"),
            TokenKind::Scanf => write!(f, "'scanf'"),
            TokenKind::Printf => write!(f, "'printf'"),
            TokenKind::IntType => write!(f, "'int'"),
            TokenKind::StrType => write!(f, "'str'"),
            TokenKind::Void => write!(f, "'void'"),
            TokenKind::Return => write!(f, "'return'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::AndAnd => write!(f, "'&&'"),
            TokenKind::OrOr => write!(f, "'||'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A token with the location of its first character
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("Invalid character '{ch}' at {location}")]
    InvalidCharacter { ch: char, location: SourceLocation },

    #[error("Unterminated string literal starting at {location}")]
    UnterminatedString { location: SourceLocation },

    #[error("Integer literal {literal} is too large at {location}")]
    IntegerTooLarge {
        literal: String,
        location: SourceLocation,
    },
}

impl LexError {
    pub fn location(&self) -> SourceLocation {
        match self {
            LexError::InvalidCharacter { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::IntegerTooLarge { location, .. } => *location,
        }
    }
}

/// Pull-based tokenizer with a single token of lookahead
pub struct Tokenizer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    next: Token,
}

impl Tokenizer {
    /// Create a tokenizer and scan the first token.
    pub fn new(input: &str) -> Result<Self, LexError> {
        let mut tokenizer = Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            next: Token {
                kind: TokenKind::Eof,
                location: SourceLocation::new(1, 1),
            },
        };
        tokenizer.advance()?;
        Ok(tokenizer)
    }

    /// The lookahead: the next unconsumed token, or `Eof`.
    pub fn next(&self) -> &Token {
        &self.next
    }

    /// Scan the following token into the lookahead slot.
    pub fn advance(&mut self) -> Result<(), LexError> {
        self.skip_whitespace();
        let loc = self.current_location();

        let Some(ch) = self.bump() else {
            self.next = Token {
                kind: TokenKind::Eof,
                location: loc,
            };
            return Ok(());
        };

        let kind = match ch {
            '"' => self.string_literal(loc)?,
            '0'..='9' => self.number_literal(ch, loc)?,
            'a'..='z' | 'A'..='Z' => self.identifier_or_keyword(ch),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            '=' => {
                if self.eat('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '&' if self.eat('&') => TokenKind::AndAnd,
            '|' if self.eat('|') => TokenKind::OrOr,

            _ => return Err(LexError::InvalidCharacter { ch, location: loc }),
        };

        self.next = Token {
            kind,
            location: loc,
        };
        Ok(())
    }

    /// Scan a string literal; the contents are taken verbatim.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.bump() {
            if ch == '"' {
                return Ok(TokenKind::Str(string));
            }
            string.push(ch);
        }

        Err(LexError::UnterminatedString { location: loc })
    }

    /// Scan an unsigned integer literal (maximal run of digits)
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            num_str.push(ch);
            self.bump();
        }

        num_str
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| LexError::IntegerTooLarge {
                literal: num_str,
                location: loc,
            })
    }

    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            ident.push(ch);
            self.bump();
        }

        match ident.as_str() {
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "scanf" => TokenKind::Scanf,
            "printf" => TokenKind::Printf,
            "int" => TokenKind::IntType,
            "str" => TokenKind::StrType,
            "void" => TokenKind::Void,
            "return" => TokenKind::Return,
            _ => TokenKind::Ident(ident),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.bump();
        }
    }

    /// Consume `expected` if it is the next character
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
