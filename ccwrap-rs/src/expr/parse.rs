//! Expression lexer, AST and parser.
//!
//! Operator precedence (lowest → highest):
//!   ternary  →  or  →  and  →  comparison  →  unary  →  primary
//!
//! `&&` and `||` are left-associative, the ternary operator is
//! right-associative, and comparisons do not associate at all (`a < b < c` is
//! rejected rather than comparing a boolean with a version).

use std::fmt;

use crate::error::ParseError;
use crate::version::Version;

use super::value::Value;

// ── Token ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // Literals
    Int(u64),
    Str(String),
    Ident(String),

    // Comparison
    Eq, // ==
    Ne, // !=
    Lt,
    Le,
    Gt,
    Ge,

    // Logical
    Bang,
    And, // &&
    Or,  // ||

    // Misc
    Dot,
    Comma,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Question,
    Colon,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let punct = match self {
            Token::Int(n) => return write!(f, "integer `{n}`"),
            Token::Str(s) => return write!(f, "string {s:?}"),
            Token::Ident(name) => return write!(f, "identifier `{name}`"),
            Token::Eof => return f.write_str("end of input"),
            Token::Eq => "==",
            Token::Ne => "!=",
            Token::Lt => "<",
            Token::Le => "<=",
            Token::Gt => ">",
            Token::Ge => ">=",
            Token::Bang => "!",
            Token::And => "&&",
            Token::Or => "||",
            Token::Dot => ".",
            Token::Comma => ",",
            Token::LBracket => "[",
            Token::RBracket => "]",
            Token::LParen => "(",
            Token::RParen => ")",
            Token::Question => "?",
            Token::Colon => ":",
        };
        write!(f, "`{punct}`")
    }
}

/// A token together with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Spanned {
    token: Token,
    offset: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────────

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Lexer { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\n' | '\r')) {
            self.pos += 1;
        }
    }

    fn read_int(&mut self, start: usize) -> Result<Token, ParseError> {
        while matches!(self.peek(), Some('0'..='9')) {
            self.pos += 1;
        }
        let text = &self.src[start..self.pos];
        text.parse()
            .map(Token::Int)
            .map_err(|_| ParseError::IntegerOverflow {
                text: text.to_owned(),
                offset: start,
            })
    }

    fn read_string(&mut self, quote: char, start: usize) -> Result<Token, ParseError> {
        let mut s = String::new();
        loop {
            let escape_at = self.pos;
            match self.advance() {
                None | Some('\n') => return Err(ParseError::UnterminatedString { offset: start }),
                Some('\\') => match self.advance() {
                    Some('n') => s.push('\n'),
                    Some('t') => s.push('\t'),
                    Some('r') => s.push('\r'),
                    Some('0') => s.push('\0'),
                    Some(c @ ('\\' | '\'' | '"')) => s.push(c),
                    Some(c) => {
                        return Err(ParseError::InvalidEscape {
                            ch: c,
                            offset: escape_at,
                        })
                    }
                    None => return Err(ParseError::UnterminatedString { offset: start }),
                },
                Some(c) if c == quote => break,
                Some(c) => s.push(c),
            }
        }
        if s.is_empty() {
            return Err(ParseError::EmptyString { offset: start });
        }
        Ok(Token::Str(s))
    }

    fn read_ident(&mut self, start: usize) -> Token {
        while matches!(
            self.peek(),
            Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_')
        ) {
            self.pos += 1;
        }
        Token::Ident(self.src[start..self.pos].to_owned())
    }

    /// `first` has already been consumed; `second` must follow it.
    fn expect_pair(&mut self, first: char, second: char, tok: Token, start: usize) -> Result<Token, ParseError> {
        if self.eat(second) {
            Ok(tok)
        } else {
            Err(ParseError::UnexpectedChar { ch: first, offset: start })
        }
    }

    fn next_token(&mut self) -> Result<Spanned, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let ch = match self.advance() {
            None => {
                return Ok(Spanned {
                    token: Token::Eof,
                    offset: start,
                })
            }
            Some(c) => c,
        };

        let token = match ch {
            '0'..='9' => self.read_int(start)?,
            '"' => self.read_string('"', start)?,
            '\'' => self.read_string('\'', start)?,
            'a'..='z' | 'A'..='Z' | '_' => self.read_ident(start),
            '!' => {
                if self.eat('=') {
                    Token::Ne
                } else {
                    Token::Bang
                }
            }
            '<' => {
                if self.eat('=') {
                    Token::Le
                } else {
                    Token::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    Token::Ge
                } else {
                    Token::Gt
                }
            }
            '=' => self.expect_pair('=', '=', Token::Eq, start)?,
            '&' => self.expect_pair('&', '&', Token::And, start)?,
            '|' => self.expect_pair('|', '|', Token::Or, start)?,
            '.' => Token::Dot,
            ',' => Token::Comma,
            '[' => Token::LBracket,
            ']' => Token::RBracket,
            '(' => Token::LParen,
            ')' => Token::RParen,
            '?' => Token::Question,
            ':' => Token::Colon,
            c => return Err(ParseError::UnexpectedChar { ch: c, offset: start }),
        };
        Ok(Spanned {
            token,
            offset: start,
        })
    }

    fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let t = self.next_token()?;
            let done = matches!(t.token, Token::Eof);
            tokens.push(t);
            if done {
                break;
            }
        }
        Ok(tokens)
    }
}

// ── AST ───────────────────────────────────────────────────────────────────────

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }

    fn comparison(token: &Token) -> Option<BinOp> {
        Some(match token {
            Token::Eq => BinOp::Eq,
            Token::Ne => BinOp::Ne,
            Token::Lt => BinOp::Lt,
            Token::Le => BinOp::Le,
            Token::Gt => BinOp::Gt,
            Token::Ge => BinOp::Ge,
            _ => return None,
        })
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed expression.
///
/// Literals only ever hold versions, strings and string arrays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Value),
    Var(String),
    Not(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// `cond ? then : otherwise`; `otherwise` is `None` when the `:` branch
    /// is omitted.
    Ternary(Box<Expr>, Box<Expr>, Option<Box<Expr>>),
}

// ── Parser ────────────────────────────────────────────────────────────────────

const EXPECTED_OPERAND: &str = "a version number, string, array, identifier or `(`";

/// Deepest nesting of `!`, `(`, `?` and `&&`/`||` chains the parser accepts.
pub const MAX_DEPTH: usize = 256;

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .map(|t| &t.token)
            .unwrap_or(&Token::Eof)
    }

    fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or(self.tokens.last())
            .map_or(0, |t| t.offset)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == expected {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::Unexpected {
            found: self.peek().to_string(),
            expected,
            offset: self.offset(),
        }
    }

    /// Go one level deeper. Callers restore `depth` once the nested part is
    /// parsed; on error the parse is abandoned, so no restore is needed.
    fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                offset: self.offset(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    // ── Grammar ───────────────────────────────────────────────────────────────

    fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_ternary()
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_or()?;
        if self.peek() != &Token::Question {
            return Ok(cond);
        }
        self.descend()?;
        self.pos += 1;
        let then = self.parse_ternary()?;
        let otherwise = if self.eat(&Token::Colon) {
            Some(Box::new(self.parse_ternary()?))
        } else {
            None
        };
        self.depth -= 1;
        Ok(Expr::Ternary(Box::new(cond), Box::new(then), otherwise))
    }

    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_and()?;
        let depth = self.depth;
        // Each operator in a chain adds a level to the left-leaning tree.
        while self.peek() == &Token::Or {
            self.descend()?;
            self.pos += 1;
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinOp::Or, Box::new(lhs), Box::new(rhs));
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_comparison()?;
        let depth = self.depth;
        while self.peek() == &Token::And {
            self.descend()?;
            self.pos += 1;
            let rhs = self.parse_comparison()?;
            lhs = Expr::Binary(BinOp::And, Box::new(lhs), Box::new(rhs));
        }
        self.depth = depth;
        Ok(lhs)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.parse_unary()?;
        let Some(op) = BinOp::comparison(self.peek()) else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.parse_unary()?;
        if let Some(op) = BinOp::comparison(self.peek()) {
            return Err(ParseError::ChainedComparison {
                op,
                offset: self.offset(),
            });
        }
        Ok(Expr::Binary(op, Box::new(lhs), Box::new(rhs)))
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.peek() == &Token::Bang {
            self.descend()?;
            self.pos += 1;
            let operand = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Not(Box::new(operand)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Int(_) => self.parse_version(),
            Token::LBracket => self.parse_array(),
            Token::Str(s) => {
                let literal = Expr::Literal(Value::Str(s.clone()));
                self.pos += 1;
                Ok(literal)
            }
            Token::Ident(name) => {
                let var = Expr::Var(name.clone());
                self.pos += 1;
                Ok(var)
            }
            Token::LParen => {
                self.descend()?;
                self.pos += 1;
                let inner = self.parse_expr()?;
                if !self.eat(&Token::RParen) {
                    return Err(self.unexpected("`)`"));
                }
                self.depth -= 1;
                Ok(inner)
            }
            _ => Err(self.unexpected(EXPECTED_OPERAND)),
        }
    }

    fn parse_version(&mut self) -> Result<Expr, ParseError> {
        let mut components = Vec::new();
        loop {
            match self.peek() {
                Token::Int(n) => {
                    components.push(*n);
                    self.pos += 1;
                }
                _ => return Err(self.unexpected("an integer (version number component)")),
            }
            if !self.eat(&Token::Dot) {
                break;
            }
        }
        Ok(Expr::Literal(Value::Version(Version::new(components))))
    }

    fn parse_array(&mut self) -> Result<Expr, ParseError> {
        self.pos += 1; // `[`
        let mut items = Vec::new();
        if self.eat(&Token::RBracket) {
            return Ok(Expr::Literal(Value::List(items)));
        }
        loop {
            match self.peek() {
                Token::Str(s) => {
                    items.push(s.clone());
                    self.pos += 1;
                }
                _ => return Err(self.unexpected("a string (array element)")),
            }
            if self.eat(&Token::RBracket) {
                break;
            }
            if !self.eat(&Token::Comma) {
                return Err(self.unexpected("`,` or `]`"));
            }
        }
        Ok(Expr::Literal(Value::List(items)))
    }
}

/// Parse an expression string into an AST.
///
/// The whole input must form a single expression.
pub fn parse_expr(src: &str) -> Result<Expr, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    if parser.peek() != &Token::Eof {
        return Err(parser.unexpected("an operator or end of input"));
    }
    Ok(expr)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
