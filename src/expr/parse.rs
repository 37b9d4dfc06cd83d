//! Lexer and recursive-descent parser for [`Expr`].
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! sum     := product (('+' | '-') product)*
//! product := unary (('*' | '/') unary | <implicit> unary)*
//! unary   := ('-' | '+') unary | power
//! power   := primary ('^' unary)?
//! primary := number | name | name '(' sum ')' | '(' sum ')'
//! ```

use std::sync::Arc;

use super::{BinOp, Constant, Expr, ExprError, Func};

/// Deepest nesting of parentheses, calls, signs and exponents.
pub(super) const MAX_DEPTH: usize = 256;

/// Longest accepted token stream. Binary chains build left-deep trees, and
/// evaluation, derivation and dropping all recurse over that depth.
pub(super) const MAX_TOKENS: usize = 2048;

#[derive(Debug, Clone, PartialEq)]
enum TokenKind {
    Number(f64),
    Name(String),
    Op(char),
    LParen,
    RParen,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: TokenKind,
    pos: usize,
}

impl Token {
    fn text(&self) -> String {
        match &self.kind {
            TokenKind::Number(n) => n.to_string(),
            TokenKind::Name(name) => name.clone(),
            TokenKind::Op(c) => c.to_string(),
            TokenKind::LParen => "(".to_string(),
            TokenKind::RParen => ")".to_string(),
        }
    }
}

pub(super) fn parse(text: &str) -> Result<Expr, ExprError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExprError::Empty);
    }
    if tokens.len() > MAX_TOKENS {
        return Err(ExprError::TooLong(MAX_TOKENS));
    }
    let mut parser = Parser {
        tokens,
        index: 0,
        depth: 0,
    };
    let expr = parser.sum()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(ExprError::UnexpectedToken {
            found: token.text(),
            pos: token.pos,
        }),
    }
}

fn tokenize(text: &str) -> Result<Vec<Token>, ExprError> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        let start = i;
        let kind = if c.is_ascii_digit() || c == '.' {
            i = scan_number(bytes, i);
            let literal = &text[start..i];
            let value = literal
                .parse::<f64>()
                .map_err(|_| ExprError::InvalidNumber(literal.to_string()))?;
            TokenKind::Number(value)
        } else if c.is_ascii_alphabetic() || c == '_' {
            while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
                i += 1;
            }
            TokenKind::Name(text[start..i].to_string())
        } else {
            i += 1;
            match c {
                '+' | '-' | '*' | '/' | '^' => TokenKind::Op(c),
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => {
                    let ch = text[start..].chars().next().unwrap_or(c);
                    return Err(ExprError::UnexpectedChar { ch, pos: start });
                }
            }
        };
        tokens.push(Token { kind, pos: start });
    }
    Ok(tokens)
}

fn scan_number(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
        i += 1;
    }
    // Exponent only when digits follow, so `2e` stays `2 * e`.
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            return j;
        }
    }
    i
}

struct Parser {
    tokens: Vec<Token>,
    index: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned();
        if token.is_some() {
            self.index += 1;
        }
        token
    }

    fn eat_op(&mut self, ops: &[char]) -> Option<char> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Op(c),
                ..
            }) if ops.contains(c) => {
                let c = *c;
                self.index += 1;
                Some(c)
            }
            _ => None,
        }
    }

    fn sum(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.product()?;
        while let Some(op) = self.eat_op(&['+', '-']) {
            let right = self.product()?;
            let op = if op == '+' { BinOp::Add } else { BinOp::Sub };
            left = Expr::Binary(op, Arc::new(left), Arc::new(right));
        }
        Ok(left)
    }

    fn product(&mut self) -> Result<Expr, ExprError> {
        let mut left = self.unary()?;
        loop {
            let op = if let Some(op) = self.eat_op(&['*', '/']) {
                if op == '*' { BinOp::Mul } else { BinOp::Div }
            } else if self.starts_implicit_factor() {
                BinOp::Mul
            } else {
                break;
            };
            let right = self.unary()?;
            left = Expr::Binary(op, Arc::new(left), Arc::new(right));
        }
        Ok(left)
    }

    fn starts_implicit_factor(&self) -> bool {
        matches!(
            self.peek().map(|token| &token.kind),
            Some(TokenKind::Number(_) | TokenKind::Name(_) | TokenKind::LParen)
        )
    }

    // Every nested sub-expression passes through here, so this is where
    // recursion depth is bounded.
    fn unary(&mut self) -> Result<Expr, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep(MAX_DEPTH));
        }
        self.depth += 1;
        let result = match self.eat_op(&['-', '+']) {
            Some('-') => self.unary().map(|inner| Expr::Neg(Arc::new(inner))),
            Some(_) => self.unary(),
            None => self.power(),
        };
        self.depth -= 1;
        result
    }

    fn power(&mut self) -> Result<Expr, ExprError> {
        let base = self.primary()?;
        if self.eat_op(&['^']).is_some() {
            let exponent = self.unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Arc::new(base), Arc::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.next().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Num(value)),
            TokenKind::LParen => {
                let inner = self.sum()?;
                self.expect_rparen()?;
                Ok(inner)
            }
            TokenKind::Name(name) => {
                if matches!(self.peek().map(|t| &t.kind), Some(TokenKind::LParen)) {
                    let func =
                        Func::from_name(&name).ok_or(ExprError::UnknownFunction(name))?;
                    self.index += 1;
                    let arg = self.sum()?;
                    self.expect_rparen()?;
                    return Ok(Expr::Call(func, Arc::new(arg)));
                }
                match Constant::from_name(&name) {
                    Some(constant) => Ok(Expr::Const(constant)),
                    None => Ok(Expr::Var(Arc::from(name.as_str()))),
                }
            }
            TokenKind::Op(_) | TokenKind::RParen => Err(ExprError::UnexpectedToken {
                found: token.text(),
                pos: token.pos,
            }),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ExprError> {
        match self.next() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            Some(token) => Err(ExprError::UnexpectedToken {
                found: token.text(),
                pos: token.pos,
            }),
            None => Err(ExprError::UnexpectedEnd),
        }
    }
}
