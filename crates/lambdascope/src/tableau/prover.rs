//! Refutation driver and classification

use super::branch::Branch;
use super::rules::{expansion_for, Expansion, ExpansionResult, RuleClass};
use crate::parser::ast::Ast;
use log::debug;
use serde::Serialize;
use std::fmt;

/// Expansion steps allowed per refutation attempt.
pub const STEP_BUDGET: usize = 20;

/// Classification of a formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Tautology,
    Contradiction,
    Contingent,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Tautology => write!(f, "tautology"),
            Verdict::Contradiction => write!(f, "contradiction"),
            Verdict::Contingent => write!(f, "contingent"),
        }
    }
}

/// One applied rule, recorded for rendering and step reports.
#[derive(Debug, Clone, Serialize)]
pub struct RuleApplication {
    pub class: RuleClass,
    pub name: &'static str,
    pub principal: String,
    pub produced: Vec<String>,
}

/// Outcome of a classification run.
#[derive(Debug, Clone, Serialize)]
pub struct TableauReport {
    pub verdict: Verdict,
    pub steps_used: usize,
    pub applications: Vec<RuleApplication>,
}

/// Classify a formula by refuting its negation, then itself.
pub fn prove(ast: &Ast) -> TableauReport {
    let mut applications = Vec::new();

    debug!("refuting ¬({})", ast);
    let (closed, steps_neg) = refute(Ast::not(ast.clone()), &mut applications);
    if closed {
        return TableauReport {
            verdict: Verdict::Tautology,
            steps_used: steps_neg,
            applications,
        };
    }

    debug!("refuting {}", ast);
    let (closed, steps_pos) = refute(ast.clone(), &mut applications);
    if closed {
        return TableauReport {
            verdict: Verdict::Contradiction,
            steps_used: steps_pos,
            applications,
        };
    }

    TableauReport {
        verdict: Verdict::Contingent,
        steps_used: steps_neg + steps_pos,
        applications,
    }
}

/// Run one refutation attempt. Returns whether every branch closed and how
/// many expansion steps it took.
fn refute(root: Ast, log: &mut Vec<RuleApplication>) -> (bool, usize) {
    let mut branches = vec![Branch::new(vec![root])];
    let mut steps = 0;

    loop {
        if branches.iter().all(Branch::is_closed) {
            return (true, steps);
        }
        if steps >= STEP_BUDGET {
            debug!("step budget exhausted after {} expansions", steps);
            return (false, steps);
        }
        let Some((bi, fi, expansion)) = next_expansion(&branches) else {
            return (false, steps);
        };
        steps += 1;
        apply_expansion(&mut branches, bi, fi, expansion, log);
    }
}

/// First open branch, first expandable formula on it.
fn next_expansion(branches: &[Branch]) -> Option<(usize, usize, Expansion)> {
    for (bi, branch) in branches.iter().enumerate() {
        if branch.is_closed() {
            continue;
        }
        for (fi, formula) in branch.formulas().iter().enumerate() {
            if let Some(expansion) = expansion_for(formula, branch) {
                return Some((bi, fi, expansion));
            }
        }
    }
    None
}

fn apply_expansion(
    branches: &mut Vec<Branch>,
    bi: usize,
    fi: usize,
    expansion: Expansion,
    log: &mut Vec<RuleApplication>,
) {
    let principal = branches[bi].formulas()[fi].clone();
    debug!(
        "{}-rule {} on branch {}: {}",
        expansion.class.glyph(),
        expansion.name,
        bi,
        principal
    );

    let produced;
    match expansion.result {
        ExpansionResult::Extend { add, consume } => {
            produced = add
                .iter()
                .filter(|a| !a.is_marker())
                .map(Ast::stringify)
                .collect();
            let branch = &mut branches[bi];
            if consume {
                branch.remove(fi);
            }
            for formula in add {
                branch.push(formula);
            }
        }
        ExpansionResult::Split { left, right } => {
            produced = vec![left.stringify(), right.stringify()];
            let mut right_branch = branches[bi].clone();
            branches[bi].remove(fi);
            branches[bi].push(left);
            right_branch.remove(fi);
            right_branch.push(right);
            branches.insert(bi + 1, right_branch);
        }
    }

    log.push(RuleApplication {
        class: expansion.class,
        name: expansion.name,
        principal: principal.stringify(),
        produced,
    });
}
