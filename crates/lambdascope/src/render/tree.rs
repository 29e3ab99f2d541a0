//! ASCII views of formulas and tableau rule applications

use crate::parser::ast::{Ast, BinOpKind, QuantKind};
use crate::tableau::{RuleApplication, RuleClass};
use std::fmt::Write;

/// Indented ASCII tree of an AST with symbolic node labels.
pub fn visualize_expression_tree(ast: &Ast) -> String {
    let mut out = String::new();
    walk(ast, 0, &mut out);
    out
}

fn walk(ast: &Ast, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    match ast {
        Ast::Var(n) => {
            let _ = writeln!(out, "{}VAR {}", pad, n);
        }
        Ast::Ident(n) => {
            let _ = writeln!(out, "{}IDENT {}", pad, n);
        }
        Ast::TypedVar { var, ty } => {
            let _ = writeln!(out, "{}TYPED {}:{}", pad, var, ty);
        }
        Ast::Not(inner) => {
            let _ = writeln!(out, "{}NOT (¬)", pad);
            walk(inner, depth + 1, out);
        }
        Ast::BinOp { op, left, right } => {
            let _ = writeln!(out, "{}{} ({})", pad, op_label(*op), op.symbol());
            walk(left, depth + 1, out);
            walk(right, depth + 1, out);
        }
        Ast::Quant { q, var, body } => {
            let _ = writeln!(out, "{}{} ({}) {}", pad, quant_label(*q), q.symbol(), var);
            walk(body, depth + 1, out);
        }
        Ast::Lambda { var, body } => {
            let _ = writeln!(out, "{}LAMBDA (λ) {}", pad, var);
            walk(body, depth + 1, out);
        }
        Ast::App { fun, arg } => {
            let _ = writeln!(out, "{}APPLY", pad);
            walk(fun, depth + 1, out);
            walk(arg, depth + 1, out);
        }
        Ast::Marker { kind, original } => {
            let _ = writeln!(out, "{}MARKER {}", pad, kind.label());
            walk(original, depth + 1, out);
        }
    }
}

fn op_label(op: BinOpKind) -> &'static str {
    match op {
        BinOpKind::And => "AND",
        BinOpKind::Or => "OR",
        BinOpKind::Implies => "IMPLIES",
        BinOpKind::Iff => "IFF",
        BinOpKind::Eq => "EQUALS",
        BinOpKind::Plus => "PLUS",
        BinOpKind::Times => "TIMES",
        BinOpKind::Compose => "COMPOSE",
    }
}

fn quant_label(q: QuantKind) -> &'static str {
    match q {
        QuantKind::Forall => "FORALL",
        QuantKind::Exists => "EXISTS",
        QuantKind::ExistsUnique => "EXISTS-UNIQUE",
    }
}

/// One ASCII block per tableau rule application. The rule family is always
/// visible; β blocks show both branch sides.
pub fn build_tree_node(application: &RuleApplication) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "[{}] {}",
        application.class.glyph(),
        application.name
    );
    let _ = writeln!(out, "  on:  {}", application.principal);
    match application.class {
        RuleClass::Beta => {
            if let [left, right] = application.produced.as_slice() {
                let _ = writeln!(out, "  left:  {}", left);
                let _ = writeln!(out, "  right: {}", right);
            }
        }
        _ => {
            for produced in &application.produced {
                let _ = writeln!(out, "  add: {}", produced);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    #[test]
    fn test_expression_tree_layout() {
        let ast = parse_expression("¬(P ∧ Q)").unwrap();
        let tree = visualize_expression_tree(&ast);
        let lines: Vec<&str> = tree.lines().collect();
        assert_eq!(lines[0], "NOT (¬)");
        assert_eq!(lines[1], "  AND (∧)");
        assert_eq!(lines[2], "    VAR P");
        assert_eq!(lines[3], "    VAR Q");
    }

    #[test]
    fn test_rule_block_distinguishes_families() {
        let alpha = RuleApplication {
            class: RuleClass::Alpha,
            name: "∧",
            principal: "(P ∧ Q)".into(),
            produced: vec!["P".into(), "Q".into()],
        };
        let block = build_tree_node(&alpha);
        assert!(block.starts_with("[α] ∧"));
        assert!(block.contains("add: P"));

        let beta = RuleApplication {
            class: RuleClass::Beta,
            name: "∨",
            principal: "(P ∨ Q)".into(),
            produced: vec!["P".into(), "Q".into()],
        };
        let block = build_tree_node(&beta);
        assert!(block.starts_with("[β] ∨"));
        assert!(block.contains("left:  P"));
        assert!(block.contains("right: Q"));
    }
}
