//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement   ::= ';' | block | declaration | print | if | while
//!               | return | IDENT '=' relExpr ';' | IDENT '(' args ')' ';'
//! block       ::= '{' statement* '}'
//! declaration ::= TYPE IDENT ['=' relExpr] (',' IDENT ['=' relExpr])* ';'
//! print       ::= 'printf' '(' relExpr ')' ';'
//! if          ::= 'if' '(' relExpr ')' statement ['else' statement]
//! while       ::= 'while' '(' relExpr ')' statement
//! return      ::= 'return' relExpr ';'
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse block statements (inside braces, excluding the braces themselves)
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement, one nesting level below the enclosing one
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_kind)
    }

    fn parse_statement_kind(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        match self.peek() {
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(Stmt::NoOp(loc))
            }
            TokenKind::LBrace => {
                self.advance()?;
                let statements = self.parse_block_statements()?;
                self.expect_rbrace("after block")?;
                Ok(Stmt::Block {
                    statements,
                    location: loc,
                })
            }
            TokenKind::IntType | TokenKind::StrType => self.parse_declaration(),
            TokenKind::Printf => self.parse_print_statement(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Ident(_) => self.parse_assignment_or_call(),
            _ => Err(self.error("Expected statement")),
        }
    }

    /// Parse declaration: type name [= init] (, name [= init])* ;
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        let var_type = self.parse_var_type()?;

        let mut declarators = Vec::new();
        loop {
            let decl_loc = self.current_location();
            let name = self.expect_identifier()?;
            let init = if self.match_token(&TokenKind::Assign)? {
                Some(self.parse_rel_expression()?)
            } else {
                None
            };
            declarators.push(Declarator {
                name,
                init,
                location: decl_loc,
            });

            if !self.match_token(&TokenKind::Comma)? {
                break;
            }
        }

        self.expect_semicolon("after declaration")?;

        Ok(Stmt::Declaration {
            var_type,
            declarators,
            location,
        })
    }

    /// Parse print statement
    fn parse_print_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance()?; // consume 'printf'

        self.expect_lparen("after 'printf'")?;
        let expr = self.parse_rel_expression()?;
        self.expect_rparen("after printf argument")?;
        self.expect_semicolon("after printf")?;

        Ok(Stmt::Print { expr, location })
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance()?; // consume 'if'

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_rel_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(&TokenKind::Else)? {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance()?; // consume 'while'

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_rel_expression()?;
        self.expect_rparen("after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.advance()?; // consume 'return'

        let expr = self.parse_rel_expression()?;
        self.expect_semicolon("after return")?;

        Ok(Stmt::Return { expr, location })
    }

    /// `x = expr;` or `f(args);`, decided by the token after the identifier
    fn parse_assignment_or_call(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;

        if self.check(&TokenKind::LParen) {
            let call = self.parse_call_arguments(name, location)?;
            self.expect_semicolon("after function call")?;
            return Ok(Stmt::Call(call));
        }

        self.expect_token(&TokenKind::Assign, "Expected '=' or '(' after identifier")?;
        let value = self.parse_rel_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Stmt::Assignment {
            name,
            value,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse, ParseError};

    fn main_body(source: &str) -> Vec<Stmt> {
        let program = parse(&format!("int main() {{ {} }}", source)).unwrap();
        program.functions.into_iter().next().unwrap().body
    }

    #[test]
    fn test_parse_declaration_list() {
        let body = main_body("int a, b = 2, c;");

        match &body[0] {
            Stmt::Declaration {
                var_type,
                declarators,
                ..
            } => {
                assert_eq!(*var_type, VarType::Int);
                let names: Vec<_> = declarators.iter().map(|d| d.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c"]);
                assert!(declarators[0].init.is_none());
                assert!(matches!(declarators[1].init, Some(Expr::IntLiteral(2, _))));
            }
            other => panic!("Expected declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_if_else() {
        let body = main_body("if (1 < 2) printf(1); else { printf(2); }");

        match &body[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert!(matches!(**then_branch, Stmt::Print { .. }));
                assert!(matches!(else_branch.as_deref(), Some(Stmt::Block { .. })));
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_and_noop() {
        let body = main_body("while (x > 0) x = x - 1; ;");

        assert!(matches!(body[0], Stmt::While { .. }));
        assert!(matches!(body[1], Stmt::NoOp(_)));
    }

    #[test]
    fn test_call_statement_vs_assignment() {
        let body = main_body("f(1, 2); x = f();");

        assert!(matches!(
            &body[0],
            Stmt::Call(Expr::FunctionCall { name, args, .. }) if name == "f" && args.len() == 2
        ));
        assert!(matches!(
            &body[1],
            Stmt::Assignment { value: Expr::FunctionCall { .. }, .. }
        ));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("int main() { printf(1) }").unwrap_err();
        match err {
            ParseError::Syntax { message, .. } => {
                assert!(message.contains("Expected ';' after printf"), "{}", message)
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("int main() { printf(1);").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn test_declaration_needs_identifier() {
        assert!(parse("int main() { int ; }").is_err());
    }

    #[test]
    fn test_bare_identifier_is_not_a_statement() {
        assert!(parse("int main() { x; }").is_err());
    }
}
