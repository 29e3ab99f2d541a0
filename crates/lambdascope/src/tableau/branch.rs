//! Tableau branches and closure detection

use crate::parser::ast::{Ast, BinOpKind, MarkerKind};
use indexmap::IndexSet;
use serde::Serialize;

/// One branch of the tableau: a list of formulas plus the instantiation
/// markers accumulated on it. Branches are cloned whenever the tableau
/// forks; nothing is shared.
#[derive(Debug, Clone, Serialize)]
pub struct Branch {
    formulas: Vec<Ast>,
    closed: bool,
}

impl Branch {
    pub fn new(formulas: Vec<Ast>) -> Self {
        let mut branch = Branch {
            formulas,
            closed: false,
        };
        branch.closed = branch.detect_closure();
        branch
    }

    pub fn formulas(&self) -> &[Ast] {
        &self.formulas
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn remove(&mut self, index: usize) -> Ast {
        self.formulas.remove(index)
    }

    /// Append a formula and re-check closure.
    pub fn push(&mut self, formula: Ast) {
        self.formulas.push(formula);
        if !self.closed {
            self.closed = self.detect_closure();
        }
    }

    /// Whether this universal (or negated existential) has already been
    /// instantiated here.
    pub fn has_marker(&self, kind: MarkerKind, original: &Ast) -> bool {
        self.formulas.iter().any(|f| match f {
            Ast::Marker {
                kind: k,
                original: o,
            } => *k == kind && **o == *original,
            _ => false,
        })
    }

    /// Names of the constants introduced on this branch: `c_<k>` witnesses
    /// and Skolem constants (names containing `_sk_`).
    pub fn constants(&self) -> Vec<String> {
        let mut out: IndexSet<String> = IndexSet::new();
        for f in &self.formulas {
            collect_constants(f, &mut out);
        }
        out.into_iter().collect()
    }

    /// Index for the next fresh `c_<k>` constant: one above the largest
    /// already present.
    pub fn next_constant_index(&self) -> usize {
        let mut max = 0usize;
        for name in self.constants() {
            if let Some(k) = parse_c_index(&name) {
                max = max.max(k);
            }
        }
        max + 1
    }

    /// A branch closes on a complementary pair, on a biconditional with
    /// directly complementary sides, or on the Russell pattern: a
    /// biconditional (possibly under one negation) whose right side negates
    /// a self-application of a Skolem-named expression.
    fn detect_closure(&self) -> bool {
        let formulas: Vec<&Ast> = self
            .formulas
            .iter()
            .filter(|f| !f.is_marker())
            .collect();

        for f in &formulas {
            if let Ast::Not(inner) = f {
                if formulas.iter().any(|g| **g == **inner) {
                    return true;
                }
            }
            if let Ast::BinOp {
                op: BinOpKind::Iff,
                left,
                right,
            } = f
            {
                if complementary(left, right) {
                    return true;
                }
            }
            if russell_pattern(f) {
                return true;
            }
        }
        false
    }
}

fn complementary(a: &Ast, b: &Ast) -> bool {
    match (a, b) {
        (_, Ast::Not(n)) if **n == *a => true,
        (Ast::Not(n), _) if **n == *b => true,
        _ => false,
    }
}

/// `s ↔ ¬(v v)` — possibly under one outer negation — where both positions
/// of the self-application agree and its printed form carries a Skolem
/// name. This is string-keyed on purpose: the `_sk_` substring is what
/// identifies a paradox witness.
fn russell_pattern(f: &Ast) -> bool {
    let core = match f {
        Ast::Not(inner) => inner.as_ref(),
        other => other,
    };
    if let Ast::BinOp {
        op: BinOpKind::Iff,
        right,
        ..
    } = core
    {
        if let Ast::Not(neg) = right.as_ref() {
            if let Ast::App { fun, arg } = neg.as_ref() {
                return fun.stringify() == arg.stringify()
                    && neg.stringify().contains("_sk_");
            }
        }
    }
    false
}

fn collect_constants(ast: &Ast, out: &mut IndexSet<String>) {
    match ast {
        Ast::Var(n) | Ast::Ident(n) => {
            if parse_c_index(n).is_some() || n.contains("_sk_") {
                out.insert(n.clone());
            }
        }
        Ast::TypedVar { var, ty } => {
            collect_constants(var, out);
            collect_constants(ty, out);
        }
        Ast::Not(a) => collect_constants(a, out),
        Ast::BinOp { left, right, .. } => {
            collect_constants(left, out);
            collect_constants(right, out);
        }
        Ast::Quant { var, body, .. } | Ast::Lambda { var, body } => {
            collect_constants(var, out);
            collect_constants(body, out);
        }
        Ast::App { fun, arg } => {
            collect_constants(fun, out);
            collect_constants(arg, out);
        }
        Ast::Marker { original, .. } => collect_constants(original, out),
    }
}

fn parse_c_index(name: &str) -> Option<usize> {
    name.strip_prefix("c_")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expression;

    fn f(s: &str) -> Ast {
        parse_expression(s).unwrap()
    }

    #[test]
    fn test_complementary_pair_closes() {
        let branch = Branch::new(vec![f("P"), f("Q"), f("¬P")]);
        assert!(branch.is_closed());
        assert!(!Branch::new(vec![f("P"), f("Q")]).is_closed());
    }

    #[test]
    fn test_double_negation_is_not_complementary() {
        // ¬¬P and ¬P are complementary; ¬¬P and P are not (yet)
        let branch = Branch::new(vec![f("¬¬P"), f("¬P")]);
        assert!(branch.is_closed());
        let open = Branch::new(vec![f("¬¬P"), f("Q")]);
        assert!(!open.is_closed());
    }

    #[test]
    fn test_biconditional_self_contradiction_closes() {
        let branch = Branch::new(vec![f("P ↔ ¬P")]);
        assert!(branch.is_closed());
        assert!(!Branch::new(vec![f("P ↔ ¬Q")]).is_closed());
    }

    #[test]
    fn test_russell_pattern_closes() {
        let plain = Branch::new(vec![f("R_sk_1 R_sk_1 ↔ ¬(R_sk_1 R_sk_1)")]);
        assert!(plain.is_closed());

        // one outer negation still fires the paradox closure
        let negated = Branch::new(vec![f("¬(c_1 x_sk_2 ↔ ¬(x_sk_2 x_sk_2))")]);
        assert!(negated.is_closed());

        // without a Skolem name the negated form stays open
        let no_skolem = Branch::new(vec![f("¬(c_1 c_2 ↔ ¬(c_2 c_2))")]);
        assert!(!no_skolem.is_closed());
    }

    #[test]
    fn test_constant_tracking() {
        let branch = Branch::new(vec![f("P c_1 ∧ Q x_sk_2")]);
        assert_eq!(branch.constants(), vec!["c_1".to_string(), "x_sk_2".to_string()]);
        assert_eq!(branch.next_constant_index(), 2);
        assert_eq!(Branch::new(vec![f("P")]).next_constant_index(), 1);
    }
}
