//! Expression parsing implementation
//!
//! Precedence, highest to lowest:
//!
//! ```text
//! factor  ::= IDENT ['(' args ')'] | NUMBER | STRING | ('+'|'-'|'!') factor
//!           | 'scanf' '(' ')' | '(' relExpr ')'
//! term    ::= factor (('*'|'/'|'&&') factor)*
//! expr    ::= term (('+'|'-'|'||') term)*
//! relExpr ::= expr [('>'|'<'|'=='|'!=') expr]
//! ```
//!
//! Binary levels are left-associative. A relational expression holds at most
//! one comparison, so `a < b < c` is a syntax error. Every factor and every
//! operator of a chain counts as one nesting level, since each deepens the
//! tree that later passes walk recursively.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse relational expression (top-level entry point)
    pub(crate) fn parse_rel_expression(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_expression()?;

        let op = match self.peek() {
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Gt => BinOp::Gt,
            _ => return Ok(left),
        };
        let location = self.current_location();
        self.advance()?;
        let right = self.parse_expression()?;

        Ok(Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        })
    }

    /// Parse `+`, `-` and `||`
    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;
        let mut operators = 0;

        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::OrOr => BinOp::Or,
                _ => break,
            };
            self.enter_nesting()?;
            operators += 1;
            let location = self.current_location();
            self.advance()?;
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        self.exit_nesting(operators);
        Ok(left)
    }

    /// Parse `*`, `/` and `&&`
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;
        let mut operators = 0;

        loop {
            let op = match self.peek() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::AndAnd => BinOp::And,
                _ => break,
            };
            self.enter_nesting()?;
            operators += 1;
            let location = self.current_location();
            self.advance()?;
            let right = self.parse_factor()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
                location,
            };
        }

        self.exit_nesting(operators);
        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_operand)
    }

    /// Literal, variable, call, `scanf()`, unary operator or parenthesised expression
    fn parse_operand(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();

        match self.peek() {
            TokenKind::Int(n) => {
                let n = *n;
                self.advance()?;
                Ok(Expr::IntLiteral(n, location))
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance()?;
                Ok(Expr::StringLiteral(s, location))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance()?;
                if self.check(&TokenKind::LParen) {
                    self.parse_call_arguments(name, location)
                } else {
                    Ok(Expr::Variable(name, location))
                }
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::Bang => {
                let op = match self.peek() {
                    TokenKind::Plus => UnOp::Plus,
                    TokenKind::Minus => UnOp::Neg,
                    _ => UnOp::Not,
                };
                self.advance()?;
                let operand = self.parse_factor()?;
                Ok(Expr::UnaryOp {
                    op,
                    operand: Box::new(operand),
                    location,
                })
            }
            TokenKind::Scanf => {
                self.advance()?;
                self.expect_lparen("after 'scanf'")?;
                self.expect_rparen("after 'scanf('")?;
                Ok(Expr::ScanInput(location))
            }
            TokenKind::LParen => {
                self.advance()?;
                let expr = self.parse_rel_expression()?;
                self.expect_rparen("after expression")?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }

    /// Parse `'(' (relExpr (',' relExpr)*)? ')'` after a function name
    pub(crate) fn parse_call_arguments(
        &mut self,
        name: String,
        location: SourceLocation,
    ) -> Result<Expr, ParseError> {
        self.expect_lparen("before arguments")?;

        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_rel_expression()?);
                if !self.match_token(&TokenKind::Comma)? {
                    break;
                }
            }
        }

        self.expect_rparen("after arguments")?;

        Ok(Expr::FunctionCall {
            name,
            args,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse, ParseError};

    fn parse_expr(source: &str) -> Result<Expr, ParseError> {
        let program = parse(&format!("int main() {{ printf({}); }}", source))?;
        match program.functions.into_iter().next().unwrap().body.remove(0) {
            Stmt::Print { expr, .. } => Ok(expr),
            other => panic!("Expected print, got {:?}", other),
        }
    }

    fn op_of(expr: &Expr) -> BinOp {
        match expr {
            Expr::BinaryOp { op, .. } => *op,
            other => panic!("Expected binary op, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let expr = parse_expr("1 + 2 * 3").unwrap();

        assert_eq!(op_of(&expr), BinOp::Add);
        match expr {
            Expr::BinaryOp { left, right, .. } => {
                assert!(matches!(*left, Expr::IntLiteral(1, _)));
                assert_eq!(op_of(&right), BinOp::Mul);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_left_associative() {
        let expr = parse_expr("10 - 4 - 3").unwrap();

        match expr {
            Expr::BinaryOp { op, left, right, .. } => {
                assert_eq!(op, BinOp::Sub);
                assert_eq!(op_of(&left), BinOp::Sub);
                assert!(matches!(*right, Expr::IntLiteral(3, _)));
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_logical_levels() {
        // && sits with '*', || sits with '+'
        let expr = parse_expr("a || b && c").unwrap();
        assert_eq!(op_of(&expr), BinOp::Or);
    }

    #[test]
    fn test_relational_is_lowest() {
        let expr = parse_expr("1 + 2 == 3").unwrap();
        assert_eq!(op_of(&expr), BinOp::Eq);
    }

    #[test]
    fn test_relational_does_not_chain() {
        assert!(parse_expr("1 < 2 < 3").is_err());
        assert!(parse_expr("(1 < 2) == (3 > 2)").is_ok());
    }

    #[test]
    fn test_stacked_unary() {
        let expr = parse_expr("-!-x").unwrap();

        match expr {
            Expr::UnaryOp { op, operand, .. } => {
                assert_eq!(op, UnOp::Neg);
                assert!(matches!(*operand, Expr::UnaryOp { op: UnOp::Not, .. }));
            }
            other => panic!("Expected unary op, got {:?}", other),
        }
    }

    #[test]
    fn test_call_and_scanf() {
        let expr = parse_expr("add(scanf(), 2)").unwrap();

        match expr {
            Expr::FunctionCall { name, args, .. } => {
                assert_eq!(name, "add");
                assert!(matches!(args[0], Expr::ScanInput(_)));
                assert!(matches!(args[1], Expr::IntLiteral(2, _)));
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_operand() {
        assert!(parse_expr("1 +").is_err());
        assert!(parse_expr("").is_err());
    }
}
