//! Abstract syntax for the surface logic
//!
//! `stringify` produces the canonical text form: every binary operator is
//! parenthesized, application prints as `f(x)`, and prover-internal markers
//! print as the formula they annotate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary connectives and operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOpKind {
    And,
    Or,
    Implies,
    Iff,
    Eq,
    Plus,
    Times,
    Compose,
}

impl BinOpKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOpKind::And => "∧",
            BinOpKind::Or => "∨",
            BinOpKind::Implies => "→",
            BinOpKind::Iff => "↔",
            BinOpKind::Eq => "=",
            BinOpKind::Plus => "+",
            BinOpKind::Times => "×",
            BinOpKind::Compose => "∘",
        }
    }
}

/// Quantifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantKind {
    Forall,
    Exists,
    ExistsUnique,
}

impl QuantKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantKind::Forall => "∀",
            QuantKind::Exists => "∃",
            QuantKind::ExistsUnique => "∃!",
        }
    }
}

/// Prover-internal branch annotations recording which quantified formulas
/// have already been instantiated on a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    InstantiatedForall,
    InstantiatedNotForall,
    InstantiatedNotExists,
}

impl MarkerKind {
    pub fn label(&self) -> &'static str {
        match self {
            MarkerKind::InstantiatedForall => "instantiated ∀",
            MarkerKind::InstantiatedNotForall => "instantiated ¬∀",
            MarkerKind::InstantiatedNotExists => "instantiated ¬∃",
        }
    }
}

/// A surface formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ast {
    /// Single uppercase letter.
    Var(String),
    /// Multi-character identifier.
    Ident(String),
    /// `x:τ` binder annotation.
    TypedVar { var: Box<Ast>, ty: Box<Ast> },
    Not(Box<Ast>),
    BinOp {
        op: BinOpKind,
        left: Box<Ast>,
        right: Box<Ast>,
    },
    Quant {
        q: QuantKind,
        var: Box<Ast>,
        body: Box<Ast>,
    },
    Lambda { var: Box<Ast>, body: Box<Ast> },
    App { fun: Box<Ast>, arg: Box<Ast> },
    Marker {
        kind: MarkerKind,
        original: Box<Ast>,
    },
}

impl Ast {
    pub fn not(inner: Ast) -> Ast {
        Ast::Not(Box::new(inner))
    }

    pub fn binop(op: BinOpKind, left: Ast, right: Ast) -> Ast {
        Ast::BinOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn app(fun: Ast, arg: Ast) -> Ast {
        Ast::App {
            fun: Box::new(fun),
            arg: Box::new(arg),
        }
    }

    pub fn quant(q: QuantKind, var: Ast, body: Ast) -> Ast {
        Ast::Quant {
            q,
            var: Box::new(var),
            body: Box::new(body),
        }
    }

    pub fn lambda(var: Ast, body: Ast) -> Ast {
        Ast::Lambda {
            var: Box::new(var),
            body: Box::new(body),
        }
    }

    pub fn marker(kind: MarkerKind, original: Ast) -> Ast {
        Ast::Marker {
            kind,
            original: Box::new(original),
        }
    }

    /// The name of a plain variable or identifier node.
    pub fn name(&self) -> Option<&str> {
        match self {
            Ast::Var(n) | Ast::Ident(n) => Some(n),
            _ => None,
        }
    }

    /// The bound name of a binder position (`x`, or the variable inside
    /// `x:τ`).
    pub fn binder_name(&self) -> Option<&str> {
        match self {
            Ast::Var(n) | Ast::Ident(n) => Some(n),
            Ast::TypedVar { var, .. } => var.binder_name(),
            _ => None,
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self, Ast::Marker { .. })
    }

    /// The annotated formula, with any marker wrapper removed.
    pub fn strip_marker(&self) -> &Ast {
        match self {
            Ast::Marker { original, .. } => original,
            other => other,
        }
    }

    /// Canonical text form.
    pub fn stringify(&self) -> String {
        self.to_string()
    }

    /// Replace free occurrences of `name` by the given node. Does not
    /// descend under a quantifier or lambda that rebinds the same name, and
    /// rewrites every position of a self-application `v(v)`.
    pub fn substitute(&self, name: &str, replacement: &Ast) -> Ast {
        match self {
            Ast::Var(n) | Ast::Ident(n) if n == name => replacement.clone(),
            Ast::Var(_) | Ast::Ident(_) | Ast::TypedVar { .. } => self.clone(),
            Ast::Not(inner) => Ast::not(inner.substitute(name, replacement)),
            Ast::BinOp { op, left, right } => Ast::binop(
                *op,
                left.substitute(name, replacement),
                right.substitute(name, replacement),
            ),
            Ast::Quant { q, var, body } => {
                if var.binder_name() == Some(name) {
                    self.clone()
                } else {
                    Ast::Quant {
                        q: *q,
                        var: var.clone(),
                        body: Box::new(body.substitute(name, replacement)),
                    }
                }
            }
            Ast::Lambda { var, body } => {
                if var.binder_name() == Some(name) {
                    self.clone()
                } else {
                    Ast::Lambda {
                        var: var.clone(),
                        body: Box::new(body.substitute(name, replacement)),
                    }
                }
            }
            Ast::App { fun, arg } => Ast::app(
                fun.substitute(name, replacement),
                arg.substitute(name, replacement),
            ),
            // markers are identity keys for instantiation bookkeeping
            Ast::Marker { .. } => self.clone(),
        }
    }
}

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ast::Var(n) | Ast::Ident(n) => write!(f, "{}", n),
            Ast::TypedVar { var, ty } => write!(f, "{}:{}", var, ty),
            Ast::Not(inner) => write!(f, "¬{}", inner),
            Ast::BinOp { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
            Ast::Quant { q, var, body } => write!(f, "{}{}. {}", q.symbol(), var, body),
            Ast::Lambda { var, body } => write!(f, "λ{}. {}", var, body),
            Ast::App { fun, arg } => write!(f, "{}({})", fun, arg),
            Ast::Marker { original, .. } => write!(f, "{}", original),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stringify_parenthesizes_operators() {
        let ast = Ast::binop(
            BinOpKind::Iff,
            Ast::not(Ast::binop(
                BinOpKind::And,
                Ast::Var("P".into()),
                Ast::Var("Q".into()),
            )),
            Ast::binop(
                BinOpKind::Or,
                Ast::not(Ast::Var("P".into())),
                Ast::not(Ast::Var("Q".into())),
            ),
        );
        assert_eq!(ast.stringify(), "(¬(P ∧ Q) ↔ (¬P ∨ ¬Q))");
    }

    #[test]
    fn test_stringify_quantifier_and_application() {
        let ast = Ast::quant(
            QuantKind::Forall,
            Ast::Ident("x".into()),
            Ast::app(Ast::Var("P".into()), Ast::Ident("x".into())),
        );
        assert_eq!(ast.stringify(), "∀x. P(x)");
    }

    #[test]
    fn test_marker_prints_as_original() {
        let original = Ast::Var("P".into());
        let marker = Ast::marker(MarkerKind::InstantiatedForall, original.clone());
        assert_eq!(marker.stringify(), "P");
        assert_eq!(marker.strip_marker(), &original);
    }

    #[test]
    fn test_substitute_free_occurrences() {
        // x(x) with x ↦ c rewrites both positions
        let selfapp = Ast::app(Ast::Ident("x".into()), Ast::Ident("x".into()));
        let result = selfapp.substitute("x", &Ast::Ident("c_1".into()));
        assert_eq!(result.stringify(), "c_1(c_1)");
    }

    #[test]
    fn test_substitute_respects_shadowing() {
        // ∀x. P(x) has no free x
        let inner = Ast::quant(
            QuantKind::Forall,
            Ast::Ident("x".into()),
            Ast::app(Ast::Var("P".into()), Ast::Ident("x".into())),
        );
        let formula = Ast::binop(
            BinOpKind::And,
            Ast::app(Ast::Var("P".into()), Ast::Ident("x".into())),
            inner.clone(),
        );
        let result = formula.substitute("x", &Ast::Ident("c_1".into()));
        assert_eq!(result.stringify(), "(P(c_1) ∧ ∀x. P(x))");
    }

    #[test]
    fn test_substitute_under_different_binder() {
        let formula = Ast::quant(
            QuantKind::Exists,
            Ast::Ident("y".into()),
            Ast::app(Ast::Var("R".into()), Ast::Ident("x".into())),
        );
        let result = formula.substitute("x", &Ast::Ident("a".into()));
        assert_eq!(result.stringify(), "∃y. R(a)");
    }
}
