// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Parser for the Flint language.
//!
//! Transforms a token stream into an abstract syntax tree.

mod hints;
mod parser;

pub use parser::{ParseError, ParseResult, Parser};

#[cfg(test)]
mod tests {
    use super::*;
    use flint_ast::decl::{CompositeKind, DeclKind};
    use flint_ast::expr::{BinOp, ExprKind};
    use flint_ast::stmt::{Condition, StmtKind, VariableKind};
    use flint_ast::ty::TypeExprKind;
    use flint_ast::Transfer;
    use num_bigint::BigInt;

    fn parse(src: &str) -> ParseResult {
        let lex_result = flint_lexer::Lexer::new(src).tokenize();
        assert!(lex_result.is_ok(), "Lex errors: {:?}", lex_result.errors);
        Parser::new(lex_result.tokens).parse()
    }

    fn parse_ok(src: &str) -> ParseResult {
        let result = parse(src);
        assert!(result.is_ok(), "Parse errors: {:?}", result.errors);
        result
    }

    #[test]
    fn parse_resource_with_conformances_and_members() {
        let result = parse_ok(
            r#"
            resource R: RI, RJ {
                let id: Int
                var inner: @S?

                init(id: Int, inner: @S?) {
                    self.id = id
                    self.inner <- inner
                }

                fun get(): Int { return self.id }
            }
            "#,
        );
        assert_eq!(result.decls.len(), 1);

        let DeclKind::Composite(ref decl) = result.decls[0].kind else {
            panic!("Expected composite declaration");
        };
        assert_eq!(decl.kind, CompositeKind::Resource);
        assert_eq!(decl.name, "R");
        let names: Vec<_> = decl.conformances.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["RI", "RJ"]);
        assert_eq!(decl.fields.len(), 2);
        assert_eq!(decl.fields[1].kind, VariableKind::Variable);
        assert!(decl.fields[1].ty.is_resource_annotated());
        assert_eq!(decl.fields[1].ty.to_string(), "@S?");

        let init = decl.init.as_ref().expect("init");
        assert_eq!(init.params.len(), 2);
        assert!(matches!(
            init.body[1].kind,
            StmtKind::Assign { transfer: Transfer::Move, .. }
        ));
        assert_eq!(decl.methods.len(), 1);
        assert_eq!(decl.methods[0].ret.as_ref().map(|t| t.to_string()), Some("Int".to_string()));
    }

    #[test]
    fn parse_interfaces() {
        let result = parse_ok(
            "resource interface RI {\n  let x: Int\n  fun foo(a: Int): Int\n}\nstruct interface SI {}",
        );
        assert_eq!(result.decls.len(), 2);
        let DeclKind::Interface(ref ri) = result.decls[0].kind else {
            panic!("Expected interface declaration");
        };
        assert_eq!(ri.kind, CompositeKind::Resource);
        assert_eq!(ri.fields.len(), 1);
        assert_eq!(ri.methods.len(), 1);
        assert!(matches!(result.decls[1].kind, DeclKind::Interface(ref si) if si.kind == CompositeKind::Structure));
    }

    #[test]
    fn parse_reference_expression() {
        let result = parse_ok("let ref = &storage[R] as RI\nlet ref2: &RI = ref");
        let DeclKind::Global(ref global) = result.decls[0].kind else {
            panic!("Expected global declaration");
        };
        let ExprKind::Reference { ref expr, ref ty } = global.init.kind else {
            panic!("Expected reference expression, got {:?}", global.init.kind);
        };
        assert!(matches!(expr.kind, ExprKind::StorageIndex(_)));
        assert_eq!(ty.to_string(), "RI");

        let DeclKind::Global(ref global2) = result.decls[1].kind else {
            panic!("Expected global declaration");
        };
        assert!(matches!(
            global2.ty.as_ref().map(|t| &t.kind),
            Some(TypeExprKind::Reference(_))
        ));
    }

    #[test]
    fn parse_nested_types() {
        let result = parse_ok("fun test(r: &[&R], s: @[R]?, t: Int??) {}");
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        let rendered: Vec<_> = f.params.iter().map(|p| p.ty.to_string()).collect();
        assert_eq!(rendered, vec!["&[&R]", "@[R]?", "Int??"]);
    }

    #[test]
    fn parse_labels_are_ignored() {
        let result = parse_ok("fun f(from a: Int) { g(x: 1, 2) }");
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        assert_eq!(f.params[0].label.as_deref(), Some("from"));
        assert_eq!(f.params[0].name, "a");
        let StmtKind::Expr(ref call) = f.body[0].kind else {
            panic!("Expected call statement");
        };
        let ExprKind::Call { ref args, .. } = call.kind else {
            panic!("Expected call");
        };
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn parse_transfers_and_swap() {
        let result = parse_ok(
            "fun f() {\n  let r <- create R()\n  storage[R] <-> r\n  x <- <-y\n  destroy r\n}",
        );
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        assert!(matches!(
            f.body[0].kind,
            StmtKind::Let { transfer: Transfer::Move, init: flint_ast::expr::Expr { kind: ExprKind::Create { .. }, .. }, .. }
        ));
        assert!(matches!(f.body[1].kind, StmtKind::Swap { .. }));
        let StmtKind::Assign { transfer: Transfer::Move, ref value, .. } = f.body[2].kind else {
            panic!("Expected move assignment");
        };
        assert!(value.is_move());
        assert!(matches!(f.body[3].kind, StmtKind::Destroy(_)));
    }

    #[test]
    fn parse_negative_literals_fold() {
        let result = parse_ok("let x: Int8 = -128\nlet y = 1 - -1");
        let DeclKind::Global(ref x) = result.decls[0].kind else {
            panic!("Expected global");
        };
        assert!(matches!(x.init.kind, ExprKind::Int(ref n) if *n == BigInt::from(-128)));

        let DeclKind::Global(ref y) = result.decls[1].kind else {
            panic!("Expected global");
        };
        let ExprKind::Binary { op: BinOp::Sub, ref right, .. } = y.init.kind else {
            panic!("Expected subtraction");
        };
        assert!(matches!(right.kind, ExprKind::Int(ref n) if *n == BigInt::from(-1)));
    }

    #[test]
    fn parse_precedence() {
        let result = parse_ok("let x = 1 + 2 * 3 == 7 && true");
        let DeclKind::Global(ref x) = result.decls[0].kind else {
            panic!("Expected global");
        };
        let ExprKind::Binary { op: BinOp::And, ref left, .. } = x.init.kind else {
            panic!("Expected '&&' at the root");
        };
        let ExprKind::Binary { op: BinOp::Eq, ref left, .. } = left.kind else {
            panic!("Expected '=='");
        };
        assert!(matches!(left.kind, ExprKind::Binary { op: BinOp::Add, .. }));
    }

    #[test]
    fn parse_cast_binds_looser_than_member_access() {
        let result = parse_ok("let x = a.b as Int8");
        let DeclKind::Global(ref x) = result.decls[0].kind else {
            panic!("Expected global");
        };
        let ExprKind::Cast { ref expr, ref ty } = x.init.kind else {
            panic!("Expected cast");
        };
        assert!(matches!(expr.kind, ExprKind::Field { .. }));
        assert_eq!(ty.to_string(), "Int8");
    }

    #[test]
    fn parse_if_let_and_else_if() {
        let result = parse_ok(
            "fun f() {\n  if let y <- x {\n    destroy y\n  } else if true {\n  }\n  else {\n  }\n}",
        );
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        let StmtKind::If { ref cond, ref else_branch, .. } = f.body[0].kind else {
            panic!("Expected if statement");
        };
        assert!(matches!(cond, Condition::Let { transfer: Transfer::Move, kind: VariableKind::Constant, .. }));
        let else_branch = else_branch.as_ref().expect("else branch");
        assert_eq!(else_branch.len(), 1);
        assert!(matches!(
            else_branch[0].kind,
            StmtKind::If { else_branch: Some(_), .. }
        ));
    }

    #[test]
    fn parse_while_with_break_and_continue() {
        let result = parse_ok("fun f() {\n  while i < 10 { if i == 5 { break }; continue }\n}");
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        let StmtKind::While { ref body, .. } = f.body[0].kind else {
            panic!("Expected while");
        };
        assert_eq!(body.len(), 2);
        assert!(matches!(body[1].kind, StmtKind::Continue));
    }

    #[test]
    fn parse_member_chain_across_lines() {
        let result = parse_ok("fun f() {\n  xs\n    .append(<-r)\n}");
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        assert_eq!(f.body.len(), 1);
        let StmtKind::Expr(ref e) = f.body[0].kind else {
            panic!("Expected expression statement");
        };
        assert!(matches!(e.kind, ExprKind::MethodCall { ref method, .. } if method == "append"));
    }

    #[test]
    fn recovers_after_bad_statement() {
        let result = parse("fun f() {\n  let = 1\n  let y = 2\n}\nfun g() {}");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].message.contains("expected name"));
        assert_eq!(result.decls.len(), 2);
    }

    #[test]
    fn missing_transfer_has_hint() {
        let result = parse("let x 1");
        assert!(!result.is_ok());
        assert!(result.errors[0].hint.as_deref().unwrap_or("").contains("<-"));
    }

    #[test]
    fn node_ids_are_unique() {
        let result = parse_ok("fun f(a: Int): Int { let b = a + 1\n return b * 2 }");
        let mut ids = Vec::new();
        let DeclKind::Fun(ref f) = result.decls[0].kind else {
            panic!("Expected function");
        };
        ids.push(f.params[0].id);
        for stmt in &f.body {
            ids.push(stmt.id);
        }
        ids.push(result.decls[0].id);
        let mut sorted = ids.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }
}
