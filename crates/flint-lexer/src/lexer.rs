// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The lexer implementation using logos.

use logos::Logos;
use num_bigint::BigInt;
use thiserror::Error;

use flint_ast::token::{Token, TokenKind};
use flint_ast::Span;

/// Raw token type for logos - literal values are parsed in a second pass.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t]+")]
enum RawToken {
    // === Keywords ===
    #[token("fun")]
    Fun,
    #[token("let")]
    Let,
    #[token("var")]
    Var,
    #[token("resource")]
    Resource,
    #[token("struct")]
    Struct,
    #[token("interface")]
    Interface,
    #[token("init")]
    Init,
    #[token("create")]
    Create,
    #[token("destroy")]
    Destroy,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("as")]
    As,
    #[token("nil")]
    Nil,
    #[token("self")]
    SelfKw,
    #[token("storage")]
    Storage,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // === Operators (longest match wins) ===
    #[token("<->")]
    Swap,
    #[token("<-")]
    Move,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("@")]
    At,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semi,

    // === Newline (statement separator) ===
    #[token("\n")]
    #[token("\r\n")]
    Newline,

    // === Comments ===
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // === Literals ===
    #[regex(r"0x[0-9a-fA-F_]+")]
    HexInt,
    #[regex(r"0b[01_]+")]
    BinInt,
    #[regex(r"0o[0-7_]+")]
    OctInt,
    #[regex(r"[0-9][0-9_]*")]
    DecInt,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    // === Identifier (after keywords) ===
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip block comments, handling nesting.
fn block_comment(lexer: &mut logos::Lexer<RawToken>) -> logos::Skip {
    let mut depth = 1;
    let mut chars = lexer.remainder().chars().peekable();
    let mut consumed = 0;

    while depth > 0 {
        match chars.next() {
            Some('/') if chars.peek() == Some(&'*') => {
                chars.next();
                consumed += 2;
                depth += 1;
            }
            Some('*') if chars.peek() == Some(&'/') => {
                chars.next();
                consumed += 2;
                depth -= 1;
            }
            Some(c) => consumed += c.len_utf8(),
            None => break,
        }
    }

    lexer.bump(consumed);
    logos::Skip
}

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// The lexer for Flint source code.
pub struct Lexer<'a> {
    source: &'a str,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source, errors: Vec::new() }
    }

    /// Tokenize the entire source, collecting multiple errors.
    pub fn tokenize(&mut self) -> LexResult {
        let mut tokens = Vec::new();
        let mut raw = RawToken::lexer(self.source);

        while let Some(result) = raw.next() {
            if self.errors.len() >= MAX_ERRORS {
                break;
            }

            let span = raw.span();
            let kind = match result {
                Ok(token) => match convert_token(token, raw.slice(), span.start, span.end) {
                    Ok(kind) => kind,
                    Err(e) => {
                        self.errors.push(e);
                        continue;
                    }
                },
                Err(()) => {
                    let ch = self.source[span.start..].chars().next().unwrap_or('?');
                    self.errors.push(LexError::unexpected_char(ch, span.start));
                    continue;
                }
            };

            tokens.push(Token { kind, span: Span::new(span.start, span.end) });
        }

        tokens.push(Token {
            kind: TokenKind::Eof,
            span: Span::new(self.source.len(), self.source.len()),
        });

        LexResult { tokens, errors: std::mem::take(&mut self.errors) }
    }
}

/// Convert a raw logos token to a `TokenKind`, parsing literal values.
fn convert_token(raw: RawToken, slice: &str, start: usize, end: usize) -> Result<TokenKind, LexError> {
    Ok(match raw {
        RawToken::Fun => TokenKind::Fun,
        RawToken::Let => TokenKind::Let,
        RawToken::Var => TokenKind::Var,
        RawToken::Resource => TokenKind::Resource,
        RawToken::Struct => TokenKind::Struct,
        RawToken::Interface => TokenKind::Interface,
        RawToken::Init => TokenKind::Init,
        RawToken::Create => TokenKind::Create,
        RawToken::Destroy => TokenKind::Destroy,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::As => TokenKind::As,
        RawToken::Nil => TokenKind::Nil,
        RawToken::SelfKw => TokenKind::SelfKw,
        RawToken::Storage => TokenKind::Storage,
        RawToken::True => TokenKind::Bool(true),
        RawToken::False => TokenKind::Bool(false),

        RawToken::Swap => TokenKind::Swap,
        RawToken::Move => TokenKind::Move,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::BangEq => TokenKind::BangEq,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Eq => TokenKind::Eq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::At => TokenKind::At,
        RawToken::Question => TokenKind::Question,
        RawToken::Dot => TokenKind::Dot,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Semi => TokenKind::Semi,

        RawToken::Newline => TokenKind::Newline,

        RawToken::DecInt => TokenKind::Int(parse_int(slice, 10, start, end)?),
        RawToken::HexInt => TokenKind::Int(parse_int(&slice[2..], 16, start, end)?),
        RawToken::BinInt => TokenKind::Int(parse_int(&slice[2..], 2, start, end)?),
        RawToken::OctInt => TokenKind::Int(parse_int(&slice[2..], 8, start, end)?),

        RawToken::String => {
            let inner = &slice[1..slice.len() - 1];
            TokenKind::String(parse_string(inner, start)?)
        }

        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        // Skipped by logos; never produced.
        RawToken::LineComment | RawToken::BlockComment => {
            return Err(LexError::unexpected_char('/', start));
        }
    })
}

/// Parse digits (with `_` separators) in the given radix. Literals are
/// arbitrary precision; range checks happen once the literal's kind is known.
fn parse_int(digits: &str, radix: u32, start: usize, end: usize) -> Result<BigInt, LexError> {
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return Err(LexError::invalid_number(start, end));
    }
    BigInt::parse_bytes(cleaned.as_bytes(), radix).ok_or_else(|| LexError::invalid_number(start, end))
}

fn parse_string(s: &str, pos: usize) -> Result<String, LexError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            result.push(parse_escape(&mut chars, pos)?);
        } else {
            result.push(c);
        }
    }
    Ok(result)
}

fn parse_escape(chars: &mut impl Iterator<Item = char>, pos: usize) -> Result<char, LexError> {
    match chars.next() {
        Some('n') => Ok('\n'),
        Some('r') => Ok('\r'),
        Some('t') => Ok('\t'),
        Some('\\') => Ok('\\'),
        Some('0') => Ok('\0'),
        Some('"') => Ok('"'),
        _ => Err(LexError::invalid_escape(pos)),
    }
}

/// Result of lexing: tokens plus any errors found.
#[derive(Debug)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl LexResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A lexer error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LexError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl LexError {
    fn unexpected_char(ch: char, pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + ch.len_utf8()),
            message: format!("unexpected character '{}'", ch),
            hint: None,
        }
    }

    fn invalid_escape(pos: usize) -> Self {
        Self {
            span: Span::new(pos, pos + 1),
            message: "invalid escape sequence".to_string(),
            hint: Some("valid: \\n \\r \\t \\\\ \\0 \\\"".to_string()),
        }
    }

    fn invalid_number(start: usize, end: usize) -> Self {
        Self {
            span: Span::new(start, end),
            message: "invalid number".to_string(),
            hint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let result = Lexer::new(src).tokenize();
        assert!(result.is_ok(), "lex errors: {:?}", result.errors);
        result.tokens.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn transfer_operators_use_longest_match() {
        assert_eq!(
            kinds("a <-> b <- c <= d < e"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Swap,
                TokenKind::Ident("b".into()),
                TokenKind::Move,
                TokenKind::Ident("c".into()),
                TokenKind::LtEq,
                TokenKind::Ident("d".into()),
                TokenKind::Lt,
                TokenKind::Ident("e".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn integer_literals_are_arbitrary_precision() {
        let max_u256 = "115792089237316195423570985008687907853269984665640564039457584007913129639935";
        let toks = kinds(max_u256);
        assert_eq!(toks[0], TokenKind::Int(BigInt::parse_bytes(max_u256.as_bytes(), 10).unwrap()));

        assert_eq!(kinds("0xff")[0], TokenKind::Int(BigInt::from(255)));
        assert_eq!(kinds("0b1000_0000")[0], TokenKind::Int(BigInt::from(128)));
        assert_eq!(kinds("0o17")[0], TokenKind::Int(BigInt::from(15)));
        assert_eq!(kinds("1_000")[0], TokenKind::Int(BigInt::from(1000)));
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(
            kinds("resource interface RI {}"),
            vec![
                TokenKind::Resource,
                TokenKind::Interface,
                TokenKind::Ident("RI".into()),
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Eof,
            ]
        );
        assert_eq!(kinds("selfish")[0], TokenKind::Ident("selfish".into()));
        assert_eq!(kinds("self")[0], TokenKind::SelfKw);
    }

    #[test]
    fn comments_are_skipped() {
        assert_eq!(
            kinds("a /* outer /* inner */ */ // trailing\nb"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::Newline,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds(r#""a\n\"b\"""#)[0], TokenKind::String("a\n\"b\"".into()));
    }

    #[test]
    fn unexpected_characters_are_collected() {
        let result = Lexer::new("let x = $ + #").tokenize();
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0].span, Span::new(8, 9));
        // Lexing continues past the bad characters.
        assert!(result.tokens.iter().any(|t| t.kind == TokenKind::Plus));
    }
}
