//! Expansion rule selection
//!
//! α rules extend a branch without forking, β rules fork it, γ rules
//! instantiate a universal with a fresh `c_<k>` constant and mark the
//! branch (the original formula stays), δ rules skolemize an existential
//! and consume it. Equalities and their negations are atomic.

use super::branch::Branch;
use crate::parser::ast::{Ast, BinOpKind, MarkerKind, QuantKind};
use serde::Serialize;

/// The four tableau rule families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleClass {
    Alpha,
    Beta,
    Gamma,
    Delta,
}

impl RuleClass {
    pub fn glyph(&self) -> &'static str {
        match self {
            RuleClass::Alpha => "α",
            RuleClass::Beta => "β",
            RuleClass::Gamma => "γ",
            RuleClass::Delta => "δ",
        }
    }
}

/// What applying a rule does to the branch.
#[derive(Debug, Clone)]
pub enum ExpansionResult {
    /// Add formulas; `consume` removes the principal formula first.
    Extend { add: Vec<Ast>, consume: bool },
    /// Fork the branch, replacing the principal formula per side.
    Split { left: Ast, right: Ast },
}

/// A selected rule application, before it is applied.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub class: RuleClass,
    pub name: &'static str,
    pub result: ExpansionResult,
}

/// Pick the rule for a formula on the given branch, if any applies.
pub fn expansion_for(formula: &Ast, branch: &Branch) -> Option<Expansion> {
    match formula {
        Ast::BinOp {
            op: BinOpKind::And,
            left,
            right,
        } => Some(alpha("∧", vec![(**left).clone(), (**right).clone()])),

        Ast::BinOp {
            op: BinOpKind::Or,
            left,
            right,
        } => Some(beta("∨", (**left).clone(), (**right).clone())),

        Ast::BinOp {
            op: BinOpKind::Implies,
            left,
            right,
        } => Some(beta(
            "→",
            Ast::not((**left).clone()),
            (**right).clone(),
        )),

        Ast::BinOp {
            op: BinOpKind::Iff,
            left,
            right,
        } => Some(beta(
            "↔",
            Ast::binop(BinOpKind::And, (**left).clone(), (**right).clone()),
            Ast::binop(
                BinOpKind::And,
                Ast::not((**left).clone()),
                Ast::not((**right).clone()),
            ),
        )),

        Ast::Quant {
            q: QuantKind::Forall,
            var,
            body,
        } => gamma_universal(formula, var, body, false, branch),

        Ast::Quant {
            q: QuantKind::Exists | QuantKind::ExistsUnique,
            var,
            body,
        } => delta_existential(var, body, false, branch),

        Ast::Not(inner) => match inner.as_ref() {
            Ast::Not(a) => Some(alpha("¬¬", vec![(**a).clone()])),

            Ast::BinOp {
                op: BinOpKind::Or,
                left,
                right,
            } => Some(alpha(
                "¬∨",
                vec![Ast::not((**left).clone()), Ast::not((**right).clone())],
            )),

            Ast::BinOp {
                op: BinOpKind::Implies,
                left,
                right,
            } => Some(alpha(
                "¬→",
                vec![(**left).clone(), Ast::not((**right).clone())],
            )),

            Ast::BinOp {
                op: BinOpKind::And,
                left,
                right,
            } => Some(beta(
                "¬∧",
                Ast::not((**left).clone()),
                Ast::not((**right).clone()),
            )),

            Ast::BinOp {
                op: BinOpKind::Iff,
                left,
                right,
            } => Some(beta(
                "¬↔",
                Ast::binop(
                    BinOpKind::And,
                    (**left).clone(),
                    Ast::not((**right).clone()),
                ),
                Ast::binop(
                    BinOpKind::And,
                    Ast::not((**left).clone()),
                    (**right).clone(),
                ),
            )),

            Ast::Quant {
                q: QuantKind::Exists,
                var,
                body,
            } => gamma_universal(formula, var, body, true, branch),

            Ast::Quant {
                q: QuantKind::Forall,
                var,
                body,
            } => delta_existential(var, body, true, branch),

            _ => None,
        },

        _ => None,
    }
}

fn alpha(name: &'static str, add: Vec<Ast>) -> Expansion {
    Expansion {
        class: RuleClass::Alpha,
        name,
        result: ExpansionResult::Extend { add, consume: true },
    }
}

fn beta(name: &'static str, left: Ast, right: Ast) -> Expansion {
    Expansion {
        class: RuleClass::Beta,
        name,
        result: ExpansionResult::Split { left, right },
    }
}

/// γ: instantiate `∀x. P` (or `¬∃x. P`, read as a universal over `¬P`)
/// with a fresh `c_<k>`, once per branch.
fn gamma_universal(
    principal: &Ast,
    var: &Ast,
    body: &Ast,
    negated: bool,
    branch: &Branch,
) -> Option<Expansion> {
    let kind = if negated {
        MarkerKind::InstantiatedNotExists
    } else {
        MarkerKind::InstantiatedForall
    };
    if branch.has_marker(kind, principal) {
        return None;
    }
    let name = var.binder_name()?;
    let witness = Ast::Ident(format!("c_{}", branch.next_constant_index()));
    let mut instantiated = body.substitute(name, &witness);
    if negated {
        instantiated = Ast::not(instantiated);
    }
    Some(Expansion {
        class: RuleClass::Gamma,
        name: if negated { "¬∃" } else { "∀" },
        result: ExpansionResult::Extend {
            add: vec![instantiated, Ast::marker(kind, principal.clone())],
            consume: false,
        },
    })
}

/// δ: skolemize `∃x. P`, `∃!x. P` (treated like `∃` — the uniqueness half
/// never feeds a closure rule), or `¬∀x. P`, consuming the formula.
fn delta_existential(
    var: &Ast,
    body: &Ast,
    negated: bool,
    branch: &Branch,
) -> Option<Expansion> {
    let name = var.binder_name()?;
    let witness = Ast::Ident(format!(
        "{}_sk_{}",
        name,
        branch.constants().len() + 1
    ));
    let mut instantiated = body.substitute(name, &witness);
    if negated {
        instantiated = Ast::not(instantiated);
    }
    Some(Expansion {
        class: RuleClass::Delta,
        name: if negated { "¬∀" } else { "∃" },
        result: ExpansionResult::Extend {
            add: vec![instantiated],
            consume: true,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn f(s: &str) -> Ast {
        parse_expression(s).unwrap()
    }

    fn empty_branch() -> Branch {
        Branch::new(vec![])
    }

    #[test]
    fn test_alpha_rules() {
        let exp = expansion_for(&f("P ∧ Q"), &empty_branch()).unwrap();
        assert_eq!(exp.class, RuleClass::Alpha);
        match exp.result {
            ExpansionResult::Extend { add, consume } => {
                assert!(consume);
                assert_eq!(add.len(), 2);
            }
            _ => panic!("expected extend"),
        }

        assert!(matches!(
            expansion_for(&f("¬¬P"), &empty_branch()).unwrap().class,
            RuleClass::Alpha
        ));
        assert!(matches!(
            expansion_for(&f("¬(P ∨ Q)"), &empty_branch()).unwrap().class,
            RuleClass::Alpha
        ));
        assert!(matches!(
            expansion_for(&f("¬(P → Q)"), &empty_branch()).unwrap().class,
            RuleClass::Alpha
        ));
    }

    #[test]
    fn test_beta_rules() {
        for s in ["P ∨ Q", "P → Q", "¬(P ∧ Q)", "P ↔ Q", "¬(P ↔ Q)"] {
            let exp = expansion_for(&f(s), &empty_branch()).unwrap();
            assert_eq!(exp.class, RuleClass::Beta, "{} should fork", s);
        }
    }

    #[test]
    fn test_gamma_adds_marker_and_keeps_original() {
        let formula = f("∀x. P x");
        let exp = expansion_for(&formula, &empty_branch()).unwrap();
        assert_eq!(exp.class, RuleClass::Gamma);
        match exp.result {
            ExpansionResult::Extend { add, consume } => {
                assert!(!consume);
                assert_eq!(add[0].stringify(), "P(c_1)");
                assert!(add[1].is_marker());
            }
            _ => panic!("expected extend"),
        }
    }

    #[test]
    fn test_gamma_runs_once_per_branch() {
        let formula = f("∀x. P x");
        let exp = expansion_for(&formula, &empty_branch()).unwrap();
        let ExpansionResult::Extend { add, .. } = exp.result else {
            panic!("expected extend");
        };
        let mut branch = Branch::new(vec![formula.clone()]);
        for a in add {
            branch.push(a);
        }
        assert!(expansion_for(&formula, &branch).is_none());
    }

    #[test]
    fn test_gamma_witness_skips_existing_constants() {
        let branch = Branch::new(vec![f("P c_3")]);
        let exp = expansion_for(&f("∀x. Q x"), &branch).unwrap();
        let ExpansionResult::Extend { add, .. } = exp.result else {
            panic!("expected extend");
        };
        assert_eq!(add[0].stringify(), "Q(c_4)");
    }

    #[test]
    fn test_delta_skolemizes_and_consumes() {
        let exp = expansion_for(&f("∃x. P x"), &empty_branch()).unwrap();
        assert_eq!(exp.class, RuleClass::Delta);
        match exp.result {
            ExpansionResult::Extend { add, consume } => {
                assert!(consume);
                assert_eq!(add[0].stringify(), "P(x_sk_1)");
            }
            _ => panic!("expected extend"),
        }

        // the Skolem counter includes constants already on the branch
        let branch = Branch::new(vec![f("P c_1")]);
        let exp = expansion_for(&f("¬(∀x. Q x)"), &branch).unwrap();
        assert_eq!(exp.class, RuleClass::Delta);
        let ExpansionResult::Extend { add, .. } = exp.result else {
            panic!("expected extend");
        };
        assert_eq!(add[0].stringify(), "¬Q(x_sk_2)");
    }

    #[test]
    fn test_atoms_and_equality_do_not_expand() {
        for s in ["P", "P x", "x = y", "¬(x = y)", "λx. P x"] {
            assert!(
                expansion_for(&f(s), &empty_branch()).is_none(),
                "{} should be atomic",
                s
            );
        }
    }
}
