// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Token definitions for the lexer.

use num_bigint::BigInt;

use crate::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    /// Integer literal; its kind is decided by the elaborator.
    Int(BigInt),
    String(String),
    Bool(bool),

    // Identifier
    Ident(String),

    // Keywords
    Fun,
    Let,
    Var,
    Resource,
    Struct,
    Interface,
    Init,
    Create,
    Destroy,
    Return,
    If,
    Else,
    While,
    Break,
    Continue,
    As,
    Nil,
    SelfKw,
    Storage,

    // Transfer operators
    /// `<-`
    Move,
    /// `<->`
    Swap,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Bang,
    Eq,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    AmpAmp,
    PipePipe,
    At,
    Question,
    Dot,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semi,

    // Special
    Newline,
    Eof,
}

impl TokenKind {
    /// User-facing name for error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "a number",
            TokenKind::String(_) => "a string",
            TokenKind::Bool(_) => "'true' or 'false'",
            TokenKind::Ident(_) => "a name",

            TokenKind::Fun => "'fun'",
            TokenKind::Let => "'let'",
            TokenKind::Var => "'var'",
            TokenKind::Resource => "'resource'",
            TokenKind::Struct => "'struct'",
            TokenKind::Interface => "'interface'",
            TokenKind::Init => "'init'",
            TokenKind::Create => "'create'",
            TokenKind::Destroy => "'destroy'",
            TokenKind::Return => "'return'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Break => "'break'",
            TokenKind::Continue => "'continue'",
            TokenKind::As => "'as'",
            TokenKind::Nil => "'nil'",
            TokenKind::SelfKw => "'self'",
            TokenKind::Storage => "'storage'",

            TokenKind::Move => "'<-'",
            TokenKind::Swap => "'<->'",

            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Amp => "'&'",
            TokenKind::Pipe => "'|'",
            TokenKind::Caret => "'^'",
            TokenKind::Bang => "'!'",
            TokenKind::Eq => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Lt => "'<'",
            TokenKind::LtEq => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::GtEq => "'>='",
            TokenKind::AmpAmp => "'&&'",
            TokenKind::PipePipe => "'||'",
            TokenKind::At => "'@'",
            TokenKind::Question => "'?'",
            TokenKind::Dot => "'.'",

            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Colon => "':'",
            TokenKind::Semi => "';'",

            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of file",
        }
    }
}
