// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! The parser implementation using Pratt parsing for expressions.

use thiserror::Error;

use flint_ast::decl::{
    CompositeDecl, CompositeKind, Decl, DeclKind, FieldDecl, FunDecl, FunSig, GlobalDecl,
    InterfaceDecl, Param,
};
use flint_ast::expr::{BinOp, Expr, ExprKind, UnaryOp};
use flint_ast::stmt::{Condition, Stmt, StmtKind, VariableKind};
use flint_ast::token::{Token, TokenKind};
use flint_ast::ty::{TypeExpr, TypeExprKind};
use flint_ast::{NodeId, Span, Transfer};

/// Maximum number of errors to collect before stopping.
const MAX_ERRORS: usize = 20;

/// Binding power of `as` casts.
const CAST_BP: u8 = 19;
/// Binding power of prefix operators (`-`, `!`, `<-`, `&`).
const PREFIX_BP: u8 = 20;
/// Binding power of postfix operators (call, index, member).
const POSTFIX_BP: u8 = 21;

/// The parser for Flint source code.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    /// Collected errors during parsing
    errors: Vec<ParseError>,
    /// Counter for generating unique NodeIds
    next_node_id: u32,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map_or(true, |t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token { kind: TokenKind::Eof, span: Span::new(end, end) });
        }
        Self { tokens, pos: 0, errors: Vec::new(), next_node_id: 0 }
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    /// Record error, return if should continue.
    fn record_error(&mut self, error: ParseError) -> bool {
        self.errors.push(error);
        self.errors.len() < MAX_ERRORS
    }

    /// Skip to next declaration after error.
    fn synchronize(&mut self) {
        let mut brace_depth = 0;

        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => {
                    brace_depth += 1;
                    self.advance();
                }
                TokenKind::RBrace => {
                    self.advance();
                    if brace_depth > 0 {
                        brace_depth -= 1;
                        if brace_depth == 0 {
                            self.skip_newlines();
                            return;
                        }
                    }
                }
                TokenKind::Fun | TokenKind::Resource | TokenKind::Struct
                | TokenKind::Let | TokenKind::Var
                    if brace_depth == 0 && self.at_line_start() =>
                {
                    return;
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // =========================================================================
    // Token Navigation
    // =========================================================================

    fn current(&self) -> &Token {
        // The token stream always ends with Eof.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek(&self, n: usize) -> &TokenKind {
        self.tokens.get(self.pos + n).map(|t| &t.kind).unwrap_or(&TokenKind::Eof)
    }

    fn at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || matches!(self.tokens[self.pos - 1].kind, TokenKind::Newline | TokenKind::Semi | TokenKind::RBrace)
    }

    fn advance(&mut self) -> &Token {
        if !self.at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> usize {
        self.tokens.get(self.pos.wrapping_sub(1)).map(|t| t.span.end).unwrap_or(0)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_expected(kind.display_name()))
        }
    }

    fn error_expected(&self, expected: &str) -> ParseError {
        ParseError::expected(expected, self.current_kind(), self.current().span)
    }

    fn skip_newlines(&mut self) {
        while self.check(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn skip_separators(&mut self) {
        while self.check(&TokenKind::Newline) || self.check(&TokenKind::Semi) {
            self.advance();
        }
    }

    fn expect_terminator(&mut self) -> Result<(), ParseError> {
        if self.check(&TokenKind::Newline) || self.check(&TokenKind::Semi) {
            self.advance();
            self.skip_newlines();
            Ok(())
        } else if self.check(&TokenKind::Eof) || self.check(&TokenKind::RBrace) {
            Ok(())
        } else {
            Err(self.error_expected("newline or ';'"))
        }
    }

    fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.error_expected("a name")),
        }
    }

    /// A `.` on the next non-empty line continues a member chain.
    fn peek_past_newlines_is_dot(&self) -> bool {
        let mut i = self.pos;
        while let Some(tok) = self.tokens.get(i) {
            match tok.kind {
                TokenKind::Newline => i += 1,
                TokenKind::Dot => return true,
                _ => return false,
            }
        }
        false
    }

    fn peek_past_newlines_is_else(&self) -> bool {
        let mut i = self.pos;
        while let Some(tok) = self.tokens.get(i) {
            match tok.kind {
                TokenKind::Newline => i += 1,
                TokenKind::Else => return true,
                _ => return false,
            }
        }
        false
    }

    fn parse_transfer(&mut self) -> Result<Transfer, ParseError> {
        if self.match_token(&TokenKind::Eq) {
            Ok(Transfer::Copy)
        } else if self.match_token(&TokenKind::Move) {
            Ok(Transfer::Move)
        } else {
            Err(self.error_expected("'=' or '<-'"))
        }
    }

    fn parse_variable_kind(&mut self) -> Result<VariableKind, ParseError> {
        if self.match_token(&TokenKind::Let) {
            Ok(VariableKind::Constant)
        } else if self.match_token(&TokenKind::Var) {
            Ok(VariableKind::Variable)
        } else {
            Err(self.error_expected("'let' or 'var'"))
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn parse(&mut self) -> ParseResult {
        let mut decls = Vec::new();
        self.skip_separators();

        while !self.at_end() {
            match self.parse_decl() {
                Ok(decl) => decls.push(decl),
                Err(e) => {
                    if !self.record_error(e) {
                        break;
                    }
                    self.synchronize();
                }
            }
            self.skip_separators();
        }

        ParseResult {
            decls,
            errors: std::mem::take(&mut self.errors),
        }
    }

    fn parse_decl(&mut self) -> Result<Decl, ParseError> {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::Fun => DeclKind::Fun(self.parse_fun_decl()?),
            TokenKind::Resource | TokenKind::Struct => {
                if matches!(self.peek(1), TokenKind::Interface) {
                    DeclKind::Interface(self.parse_interface_decl()?)
                } else {
                    DeclKind::Composite(self.parse_composite_decl()?)
                }
            }
            TokenKind::Let | TokenKind::Var => {
                let global = self.parse_global_decl()?;
                self.expect_terminator()?;
                DeclKind::Global(global)
            }
            _ => return Err(self.error_expected("declaration (fun, resource, struct, let, var)")),
        };

        Ok(Decl { id: self.next_id(), kind, span: Span::new(start, self.prev_end()) })
    }

    fn parse_composite_kind(&mut self) -> Result<CompositeKind, ParseError> {
        if self.match_token(&TokenKind::Resource) {
            Ok(CompositeKind::Resource)
        } else if self.match_token(&TokenKind::Struct) {
            Ok(CompositeKind::Structure)
        } else {
            Err(self.error_expected("'resource' or 'struct'"))
        }
    }

    fn parse_composite_decl(&mut self) -> Result<CompositeDecl, ParseError> {
        let kind = self.parse_composite_kind()?;
        let (name, name_span) = self.expect_ident()?;

        let mut conformances = Vec::new();
        if self.match_token(&TokenKind::Colon) {
            loop {
                conformances.push(self.expect_ident()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }

        self.expect(&TokenKind::LBrace)?;
        self.skip_separators();

        let mut fields = Vec::new();
        let mut init = None;
        let mut methods = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.current_kind() {
                TokenKind::Let | TokenKind::Var => {
                    fields.push(self.parse_field_decl()?);
                    self.expect_terminator()?;
                }
                TokenKind::Init => {
                    let start = self.advance().span.start;
                    let params = self.parse_params()?;
                    let body = self.parse_block_body()?;
                    if init.is_some() {
                        return Err(ParseError {
                            span: Span::new(start, self.prev_end()),
                            message: format!("'{}' declares more than one initializer", name),
                            hint: Some("merge the initializers into one 'init'".to_string()),
                        });
                    }
                    init = Some(FunDecl {
                        name: "init".to_string(),
                        name_span: Span::new(start, start + 4),
                        params,
                        ret: None,
                        body,
                        span: Span::new(start, self.prev_end()),
                    });
                }
                TokenKind::Fun => methods.push(self.parse_fun_decl()?),
                _ => return Err(self.error_expected("member (let, var, init, fun)")),
            }
            self.skip_separators();
        }

        self.expect(&TokenKind::RBrace)?;

        Ok(CompositeDecl { kind, name, name_span, conformances, fields, init, methods })
    }

    fn parse_interface_decl(&mut self) -> Result<InterfaceDecl, ParseError> {
        let kind = self.parse_composite_kind()?;
        self.expect(&TokenKind::Interface)?;
        let (name, name_span) = self.expect_ident()?;

        self.expect(&TokenKind::LBrace)?;
        self.skip_separators();

        let mut fields = Vec::new();
        let mut methods = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.current_kind() {
                TokenKind::Let | TokenKind::Var => fields.push(self.parse_field_decl()?),
                TokenKind::Fun => methods.push(self.parse_fun_sig()?),
                _ => return Err(self.error_expected("member (let, var, fun)")),
            }
            self.expect_terminator()?;
            self.skip_separators();
        }

        self.expect(&TokenKind::RBrace)?;

        Ok(InterfaceDecl { kind, name, name_span, fields, methods })
    }

    fn parse_field_decl(&mut self) -> Result<FieldDecl, ParseError> {
        let start = self.current().span.start;
        let kind = self.parse_variable_kind()?;
        let (name, _) = self.expect_ident()?;
        self.expect(&TokenKind::Colon)?;
        let ty = self.parse_type()?;
        Ok(FieldDecl { kind, name, ty, span: Span::new(start, self.prev_end()) })
    }

    fn parse_fun_sig(&mut self) -> Result<FunSig, ParseError> {
        let start = self.current().span.start;
        self.expect(&TokenKind::Fun)?;
        let (name, name_span) = self.expect_ident()?;
        let params = self.parse_params()?;
        let ret = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
        Ok(FunSig { name, name_span, params, ret, span: Span::new(start, self.prev_end()) })
    }

    fn parse_fun_decl(&mut self) -> Result<FunDecl, ParseError> {
        let FunSig { name, name_span, params, ret, span } = self.parse_fun_sig()?;
        let body = self.parse_block_body()?;
        Ok(FunDecl { name, name_span, params, ret, body, span: Span::new(span.start, self.prev_end()) })
    }

    /// Parse `(label? name: Type, ...)`.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let mut params = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.at_end() {
            let start = self.current().span.start;
            let label = match (self.current_kind(), self.peek(1)) {
                (TokenKind::Ident(label), TokenKind::Ident(_)) => Some(label.clone()),
                _ => None,
            };
            if label.is_some() {
                self.advance();
            }
            let (name, _) = self.expect_ident()?;
            self.expect(&TokenKind::Colon)?;
            let ty = self.parse_type()?;
            params.push(Param {
                id: self.next_id(),
                label,
                name,
                ty,
                span: Span::new(start, self.prev_end()),
            });

            self.skip_newlines();
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }

        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    fn parse_global_decl(&mut self) -> Result<GlobalDecl, ParseError> {
        let kind = self.parse_variable_kind()?;
        let (name, name_span) = self.expect_ident()?;
        let ty = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
        let transfer = self.parse_transfer()?;
        let init = self.parse_expr()?;
        Ok(GlobalDecl { kind, name, name_span, ty, transfer, init })
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Parse `@? base ?*`.
    fn parse_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        if self.match_token(&TokenKind::At) {
            let inner = self.parse_unannotated_type()?;
            return Ok(TypeExpr {
                kind: TypeExprKind::Resource(Box::new(inner)),
                span: Span::new(start, self.prev_end()),
            });
        }
        self.parse_unannotated_type()
    }

    fn parse_unannotated_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let mut ty = self.parse_base_type()?;
        while self.match_token(&TokenKind::Question) {
            ty = TypeExpr {
                kind: TypeExprKind::Optional(Box::new(ty)),
                span: Span::new(start, self.prev_end()),
            };
        }
        Ok(ty)
    }

    fn parse_base_type(&mut self) -> Result<TypeExpr, ParseError> {
        let start = self.current().span.start;
        let kind = match self.current_kind().clone() {
            TokenKind::Ident(name) => {
                self.advance();
                TypeExprKind::Named(name)
            }
            TokenKind::LBracket => {
                self.advance();
                let elem = self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                TypeExprKind::Array(Box::new(elem))
            }
            TokenKind::Amp => {
                self.advance();
                TypeExprKind::Reference(Box::new(self.parse_type()?))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(&TokenKind::RParen)?;
                return Ok(TypeExpr { kind: inner.kind, span: Span::new(start, self.prev_end()) });
            }
            _ => return Err(self.error_expected("type")),
        };
        Ok(TypeExpr { kind, span: Span::new(start, self.prev_end()) })
    }

    // =========================================================================
    // Statements
    // =========================================================================

    /// Parse a block body `{ stmt* }`.
    fn parse_block_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(&TokenKind::LBrace)?;
        self.skip_separators();

        let mut stmts = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_stmt() {
                Ok(stmt) => stmts.push(stmt),
                Err(e) => {
                    if !self.record_error(e) {
                        self.skip_to_closing_brace();
                        break;
                    }
                    self.synchronize_in_block();
                }
            }
            self.skip_separators();
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(stmts)
    }

    /// Synchronize within a block - skip to the next statement boundary.
    fn synchronize_in_block(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            match self.current_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::RBrace => depth -= 1,
                TokenKind::Newline | TokenKind::Semi if depth == 0 => {
                    self.advance();
                    self.skip_separators();
                    return;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip to the closing brace of a block.
    fn skip_to_closing_brace(&mut self) {
        let mut depth = 1;
        while !self.at_end() && depth > 0 {
            match self.current_kind() {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => depth -= 1,
                _ => {}
            }
            if depth > 0 {
                self.advance();
            }
        }
    }

    /// Parse a statement.
    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current().span.start;

        let kind = match self.current_kind() {
            TokenKind::Let | TokenKind::Var => {
                let kind = self.parse_let_stmt()?;
                self.expect_terminator()?;
                kind
            }
            TokenKind::If => {
                let kind = self.parse_if_stmt()?;
                self.expect_terminator()?;
                kind
            }
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expr()?;
                let body = self.parse_block_body()?;
                self.expect_terminator()?;
                StmtKind::While { cond, body }
            }
            TokenKind::Break => {
                self.advance();
                self.expect_terminator()?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                self.expect_terminator()?;
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.is_expr_start() { Some(self.parse_expr()?) } else { None };
                self.expect_terminator()?;
                StmtKind::Return(value)
            }
            TokenKind::Destroy => {
                self.advance();
                let value = self.parse_expr()?;
                self.expect_terminator()?;
                StmtKind::Destroy(value)
            }
            _ => {
                let expr = self.parse_expr()?;

                let kind = if self.match_token(&TokenKind::Eq) {
                    let value = self.parse_expr()?;
                    StmtKind::Assign { target: expr, transfer: Transfer::Copy, value }
                } else if self.match_token(&TokenKind::Move) {
                    let value = self.parse_expr()?;
                    StmtKind::Assign { target: expr, transfer: Transfer::Move, value }
                } else if self.match_token(&TokenKind::Swap) {
                    let right = self.parse_expr()?;
                    StmtKind::Swap { left: expr, right }
                } else {
                    StmtKind::Expr(expr)
                };
                self.expect_terminator()?;
                kind
            }
        };

        // Terminators have been consumed; the statement ends at the last
        // non-separator token.
        let mut end_pos = self.pos;
        while end_pos > 0
            && matches!(self.tokens[end_pos - 1].kind, TokenKind::Newline | TokenKind::Semi)
        {
            end_pos -= 1;
        }
        let end = if end_pos > 0 { self.tokens[end_pos - 1].span.end } else { start };
        Ok(Stmt { id: self.next_id(), kind, span: Span::new(start, end.max(start)) })
    }

    fn parse_let_stmt(&mut self) -> Result<StmtKind, ParseError> {
        let kind = self.parse_variable_kind()?;
        let (name, name_span) = self.expect_ident()?;
        let ty = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
        let transfer = self.parse_transfer()?;
        let init = self.parse_expr()?;
        Ok(StmtKind::Let { kind, name, name_span, ty, transfer, init })
    }

    /// Parse `if cond { } else { }`, nesting `else if` chains.
    fn parse_if_stmt(&mut self) -> Result<StmtKind, ParseError> {
        self.expect(&TokenKind::If)?;

        let cond = if matches!(self.current_kind(), TokenKind::Let | TokenKind::Var) {
            let kind = self.parse_variable_kind()?;
            let (name, name_span) = self.expect_ident()?;
            let ty = if self.match_token(&TokenKind::Colon) { Some(self.parse_type()?) } else { None };
            let transfer = self.parse_transfer()?;
            let value = self.parse_expr()?;
            Condition::Let { kind, name, name_span, ty, transfer, value }
        } else {
            Condition::Expr(self.parse_expr()?)
        };

        let then_branch = self.parse_block_body()?;

        let else_branch = if self.peek_past_newlines_is_else() {
            self.skip_newlines();
            self.advance();
            if self.check(&TokenKind::If) {
                let start = self.current().span.start;
                let nested = self.parse_if_stmt()?;
                let span = Span::new(start, self.prev_end());
                Some(vec![Stmt { id: self.next_id(), kind: nested, span }])
            } else {
                Some(self.parse_block_body()?)
            }
        } else {
            None
        };

        Ok(StmtKind::If { cond, then_branch, else_branch })
    }

    fn is_expr_start(&self) -> bool {
        !matches!(
            self.current_kind(),
            TokenKind::Newline | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        )
    }

    // =========================================================================
    // Expressions (Pratt parser)
    // =========================================================================

    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_bp(0)
    }

    fn parse_expr_bp(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let start = self.current().span.start;
        let mut lhs = self.parse_prefix()?;

        loop {
            if self.check(&TokenKind::Newline) && self.peek_past_newlines_is_dot() {
                self.skip_newlines();
            }

            if self.is_postfix() {
                if POSTFIX_BP < min_bp {
                    break;
                }
                lhs = self.parse_postfix(lhs, start)?;
                continue;
            }

            if self.check(&TokenKind::As) {
                if CAST_BP < min_bp {
                    break;
                }
                self.advance();
                let ty = self.parse_type()?;
                lhs = Expr {
                    id: self.next_id(),
                    kind: ExprKind::Cast { expr: Box::new(lhs), ty },
                    span: Span::new(start, self.prev_end()),
                };
                continue;
            }

            if let Some((l_bp, r_bp)) = self.infix_bp() {
                if l_bp < min_bp {
                    break;
                }
                let op = self.parse_binop()?;
                self.skip_newlines();
                let rhs = self.parse_expr_bp(r_bp)?;
                let end = rhs.span.end;
                lhs = Expr {
                    id: self.next_id(),
                    kind: ExprKind::Binary { op, left: Box::new(lhs), right: Box::new(rhs) },
                    span: Span::new(start, end),
                };
                continue;
            }

            break;
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ParseError> {
        let start = self.current().span.start;

        let kind = match self.current_kind().clone() {
            TokenKind::Int(n) => {
                self.advance();
                ExprKind::Int(n)
            }
            TokenKind::Bool(b) => {
                self.advance();
                ExprKind::Bool(b)
            }
            TokenKind::String(s) => {
                self.advance();
                ExprKind::String(s)
            }
            TokenKind::Nil => {
                self.advance();
                ExprKind::Nil
            }
            TokenKind::SelfKw => {
                self.advance();
                ExprKind::SelfRef
            }
            TokenKind::Ident(name) => {
                self.advance();
                ExprKind::Ident(name)
            }
            TokenKind::Minus => {
                self.advance();
                // `-literal` is a literal of its own so that `-128` fits Int8.
                if let TokenKind::Int(n) = self.current_kind().clone() {
                    self.advance();
                    ExprKind::Int(-n)
                } else {
                    let operand = self.parse_expr_bp(PREFIX_BP)?;
                    ExprKind::Unary { op: UnaryOp::Neg, operand: Box::new(operand) }
                }
            }
            TokenKind::Bang => {
                self.advance();
                let operand = self.parse_expr_bp(PREFIX_BP)?;
                ExprKind::Unary { op: UnaryOp::Not, operand: Box::new(operand) }
            }
            TokenKind::Move => {
                self.advance();
                let operand = self.parse_expr_bp(PREFIX_BP)?;
                ExprKind::Move(Box::new(operand))
            }
            TokenKind::Amp => {
                self.advance();
                let operand = self.parse_expr_bp(PREFIX_BP)?;
                self.expect(&TokenKind::As)?;
                let ty = self.parse_type()?;
                ExprKind::Reference { expr: Box::new(operand), ty }
            }
            TokenKind::Create => {
                self.advance();
                let (name, _) = self.expect_ident()?;
                let args = self.parse_args()?;
                ExprKind::Create { name, args }
            }
            TokenKind::Storage => {
                self.advance();
                self.expect(&TokenKind::LBracket)?;
                let ty = self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                ExprKind::StorageIndex(ty)
            }
            TokenKind::LBracket => {
                self.advance();
                self.skip_newlines();
                let mut elems = Vec::new();
                while !self.check(&TokenKind::RBracket) && !self.at_end() {
                    elems.push(self.parse_expr()?);
                    self.skip_newlines();
                    if !self.match_token(&TokenKind::Comma) {
                        break;
                    }
                    self.skip_newlines();
                }
                self.expect(&TokenKind::RBracket)?;
                ExprKind::Array(elems)
            }
            TokenKind::LParen => {
                self.advance();
                self.skip_newlines();
                let inner = self.parse_expr()?;
                self.skip_newlines();
                self.expect(&TokenKind::RParen)?;
                // Parentheses only group; keep the inner node and widen its span.
                return Ok(Expr { span: Span::new(start, self.prev_end()), ..inner });
            }
            _ => return Err(self.error_expected("expression")),
        };

        Ok(Expr { id: self.next_id(), kind, span: Span::new(start, self.prev_end()) })
    }

    fn is_postfix(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Dot | TokenKind::LParen | TokenKind::LBracket)
    }

    fn parse_postfix(&mut self, lhs: Expr, start: usize) -> Result<Expr, ParseError> {
        let kind = match self.current_kind() {
            TokenKind::Dot => {
                self.advance();
                let (name, _) = self.expect_ident()?;
                if self.check(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    ExprKind::MethodCall { object: Box::new(lhs), method: name, args }
                } else {
                    ExprKind::Field { object: Box::new(lhs), field: name }
                }
            }
            TokenKind::LParen => {
                let args = self.parse_args()?;
                ExprKind::Call { func: Box::new(lhs), args }
            }
            TokenKind::LBracket => {
                self.advance();
                self.skip_newlines();
                let index = self.parse_expr()?;
                self.skip_newlines();
                self.expect(&TokenKind::RBracket)?;
                ExprKind::Index { object: Box::new(lhs), index: Box::new(index) }
            }
            _ => return Err(self.error_expected("'.', '(' or '['")),
        };
        Ok(Expr { id: self.next_id(), kind, span: Span::new(start, self.prev_end()) })
    }

    /// Parse `(label: expr, ...)`. Argument labels are accepted and dropped.
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LParen)?;
        self.skip_newlines();

        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) && !self.at_end() {
            if matches!(self.current_kind(), TokenKind::Ident(_)) && matches!(self.peek(1), TokenKind::Colon) {
                self.advance();
                self.advance();
            }
            args.push(self.parse_expr()?);
            self.skip_newlines();
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }

        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    // =========================================================================
    // Operator Precedence
    // =========================================================================

    fn infix_bp(&self) -> Option<(u8, u8)> {
        Some(match self.current_kind() {
            TokenKind::PipePipe => (1, 2),
            TokenKind::AmpAmp => (3, 4),
            TokenKind::EqEq | TokenKind::BangEq => (5, 6),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq => (7, 8),
            TokenKind::Pipe => (9, 10),
            TokenKind::Caret => (11, 12),
            TokenKind::Amp => (13, 14),
            TokenKind::Plus | TokenKind::Minus => (15, 16),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (17, 18),
            _ => return None,
        })
    }

    fn parse_binop(&mut self) -> Result<BinOp, ParseError> {
        let op = match self.current_kind() {
            TokenKind::PipePipe => BinOp::Or,
            TokenKind::AmpAmp => BinOp::And,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::BangEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::LtEq => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::GtEq => BinOp::Ge,
            TokenKind::Pipe => BinOp::BitOr,
            TokenKind::Caret => BinOp::BitXor,
            TokenKind::Amp => BinOp::BitAnd,
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::Percent => BinOp::Mod,
            _ => return Err(self.error_expected("operator like '+' or '-'")),
        };
        self.advance();
        Ok(op)
    }
}

/// Result of parsing: declarations plus any errors found.
#[derive(Debug)]
pub struct ParseResult {
    pub decls: Vec<Decl>,
    pub errors: Vec<ParseError>,
}

impl ParseResult {
    /// Returns true if parsing completed without errors.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A parser error with location and friendly message.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub span: Span,
    pub message: String,
    pub hint: Option<String>,
}

impl ParseError {
    fn expected(expected: &str, found: &TokenKind, span: Span) -> Self {
        let message = format_expected_message(expected, found);
        let hint = crate::hints::for_expected(expected, found).map(String::from);
        Self { span, message, hint }
    }
}

/// Format a user-friendly "expected X, found Y" message.
fn format_expected_message(expected: &str, found: &TokenKind) -> String {
    match expected {
        "newline or ';'" => "expected ';' or newline after statement".to_string(),
        "'{'" => format!("expected '{{' to start block, found {}", found.display_name()),
        "'}'" => format!("expected '}}' to close block, found {}", found.display_name()),
        "')'" if matches!(found, TokenKind::Eof) => "unclosed '(' - missing ')'".to_string(),
        "']'" if matches!(found, TokenKind::Eof) => "unclosed '[' - missing ']'".to_string(),
        "a name" => format!("expected name, found {}", found.display_name()),
        s if s.starts_with("declaration (") => {
            format!("expected declaration, found {}", found.display_name())
        }
        _ => format!("expected {}, found {}", expected, found.display_name()),
    }
}
