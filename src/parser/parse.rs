//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the program / function entry
//! points.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive descent parser with one token of lookahead,
//! pulled on demand from the [`Tokenizer`]:
//! - This module: Parser struct, helper methods, functions and parameters
//! - `statements`: statements and blocks
//! - `expressions`: `relExpr`, `expr`, `term` and `factor`
//!
//! There is no error recovery: the first mismatch aborts the parse. Nesting
//! is capped at [`MAX_NESTING_DEPTH`] so deeply nested input fails with a
//! syntax error instead of exhausting the stack.

use crate::parser::ast::*;
use crate::parser::constants::MAX_NESTING_DEPTH;
use crate::parser::lexer::{LexError, Token, TokenKind, Tokenizer};
use crate::parser::preprocess::strip_comments;
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("Lexical error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error at {location}: {message}")]
    Syntax {
        message: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location(),
            ParseError::Syntax { location, .. } => *location,
        }
    }
}

/// Strip comments from `source` and parse it into a [`Program`].
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let filtered = strip_comments(source);
    Parser::new(&filtered)?.parse_program()
}

/// Recursive descent parser for minic
pub struct Parser {
    pub(crate) tokenizer: Tokenizer,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokenizer: Tokenizer::new(source)?,
            depth: 0,
        })
    }

    /// Parse the entire program: `function*`, followed by an implicit `main()` call
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut functions = Vec::new();

        while !self.is_at_end() {
            functions.push(self.parse_function_declaration()?);
        }

        debug!(functions = functions.len(), "parsed program");
        Ok(Program::new(functions, self.current_location()))
    }

    /// Parse function declaration: type name(params) { body }
    fn parse_function_declaration(&mut self) -> Result<FunctionDecl, ParseError> {
        let location = self.current_location();
        let return_type = if self.match_token(&TokenKind::Void)? {
            ReturnType::Void
        } else if self.peek().is_var_type() {
            self.parse_var_type()?.into()
        } else {
            return Err(self.error("Expected function return type at top level"));
        };

        let name = self.expect_identifier()?;
        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        self.expect_lbrace("before function body")?;
        let body = self.parse_block_statements()?;
        self.expect_rbrace("after function body")?;

        Ok(FunctionDecl {
            name,
            return_type,
            params,
            body,
            location,
        })
    }

    /// Parse parameter list: (type name, type name, ...)
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let param_type = self.parse_var_type()?;
            let name = self.expect_identifier()?;
            params.push(Param { name, param_type });

            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a variable type keyword: `int` or `str`
    pub(crate) fn parse_var_type(&mut self) -> Result<VarType, ParseError> {
        let var_type = match self.peek() {
            TokenKind::IntType => VarType::Int,
            TokenKind::StrType => VarType::Str,
            _ => return Err(self.error("Expected type")),
        };
        self.advance()?;
        Ok(var_type)
    }

    // ===== Helper methods =====

    /// Go one nesting level deeper, failing once the limit is reached
    pub(crate) fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(&format!("Nesting deeper than {} levels", MAX_NESTING_DEPTH)));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nesting(&mut self, levels: usize) {
        self.depth -= levels;
    }

    /// Run `f` one nesting level deeper
    pub(crate) fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.enter_nesting()?;
        let result = f(self);
        self.exit_nesting(1);
        result
    }

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.tokenizer.next().kind
    }

    pub(crate) fn peek_token(&self) -> &Token {
        self.tokenizer.next()
    }

    pub(crate) fn advance(&mut self) -> Result<(), ParseError> {
        self.tokenizer.advance()?;
        Ok(())
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.tokenizer.next().location
    }

    /// Compare token kinds ignoring payloads
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    pub(crate) fn match_token(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Build a syntax error that names the offending lookahead token
    pub(crate) fn error(&self, message: &str) -> ParseError {
        ParseError::Syntax {
            message: format!("{}, found {}", message, self.peek_token()),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, kind: &TokenKind, message: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.error(message))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::LParen, &format!("Expected '(' {ctx}"))
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::RParen, &format!("Expected ')' {ctx}"))
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::LBrace, &format!("Expected '{{' {ctx}"))
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::RBrace, &format!("Expected '}}' {ctx}"))
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<(), ParseError> {
        self.expect_token(&TokenKind::Semicolon, &format!("Expected ';' {ctx}"))
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = self.peek() {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.error("Expected identifier"))
        }
    }
}
