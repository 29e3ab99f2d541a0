//! Depth-bounded pre-unification core
//!
//! Works through a FIFO list of equations, picking a rule from the shape of
//! the two head atoms: rigid pairs decompose or clash, flex–flex pairs are
//! parked in a residual list, a bare variable binds its partner outright,
//! and flex–rigid pairs branch over the imitation/projection bindings. The
//! search is semi-decidable by nature; the depth budget, decremented at each
//! branch point, is what keeps a call finite. Branches that run out of depth
//! are counted, not reported as errors.

use super::bindings::{self, BindingKind};
use crate::hol::{Decl, Sub, SubstList, Term};
use log::{debug, warn};
use serde::Serialize;
use std::collections::VecDeque;

/// A pair of terms to be made equal.
pub type Equation = (Term, Term);

/// One unifier: a substitution plus the flex–flex pairs it leaves open.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub substitutions: Vec<Sub>,
    pub flex_pairs: Vec<Equation>,
}

/// Everything a unification run produced.
#[derive(Debug, Clone, Serialize)]
pub struct UnifyOutcome {
    pub solutions: Vec<Solution>,
    /// How many branches were abandoned because the depth budget ran out.
    /// Non-zero means deeper search might find more solutions.
    pub max_depth_reached: usize,
}

/// Search controls.
#[derive(Debug, Clone)]
pub struct UnifyOptions {
    /// Collect every solution within the budget, or stop at the first.
    pub find_all: bool,
    /// Branching depth budget.
    pub max_depth: usize,
}

impl Default for UnifyOptions {
    fn default() -> Self {
        UnifyOptions {
            find_all: true,
            max_depth: 10,
        }
    }
}

/// Unify a list of equations.
pub fn unify(eqs: &[Equation], options: &UnifyOptions) -> UnifyOutcome {
    let mut search = Search {
        solutions: Vec::new(),
        max_depth_hits: 0,
        find_all: options.find_all,
    };
    solve(
        eqs.iter().cloned().collect(),
        SubstList::new(),
        Vec::new(),
        options.max_depth,
        &mut search,
    );
    debug!(
        "unification finished: {} solution(s), {} depth-limited branch(es)",
        search.solutions.len(),
        search.max_depth_hits
    );
    UnifyOutcome {
        solutions: search.solutions,
        max_depth_reached: search.max_depth_hits,
    }
}

/// Unify a single pair under the default options.
pub fn unify_pair(left: &Term, right: &Term) -> UnifyOutcome {
    unify(
        &[(left.clone(), right.clone())],
        &UnifyOptions::default(),
    )
}

struct Search {
    solutions: Vec<Solution>,
    max_depth_hits: usize,
    find_all: bool,
}

impl Search {
    fn satisfied(&self) -> bool {
        !self.find_all && !self.solutions.is_empty()
    }
}

fn solve(
    mut eqs: VecDeque<Equation>,
    mut subst: SubstList,
    mut flex: Vec<Equation>,
    depth: usize,
    search: &mut Search,
) {
    loop {
        if search.satisfied() {
            return;
        }
        let Some((l, r)) = eqs.pop_front() else {
            search.solutions.push(Solution {
                substitutions: subst.into_vec(),
                flex_pairs: flex,
            });
            return;
        };

        if l == r {
            continue;
        }
        if l.ty() != r.ty() {
            debug!("pruned: type mismatch {} vs {}", l.ty(), r.ty());
            return;
        }

        match (l.head().clone(), r.head().clone()) {
            (Decl::Const(a), Decl::Const(b)) => {
                if a != b {
                    debug!("pruned: constant clash {} vs {}", a, b);
                    return;
                }
                if !decompose(&l, &r, &mut eqs) {
                    return;
                }
            }
            (Decl::Bound(a), Decl::Bound(b)) => {
                // same binder positionally: equal offset from the top index
                if l.max_num() - a.index != r.max_num() - b.index {
                    debug!("pruned: bound variables at different depths");
                    return;
                }
                if !decompose(&l, &r, &mut eqs) {
                    return;
                }
            }
            (lh, rh) if lh.is_free() && rh.is_free() => {
                flex.push((l, r));
            }
            _ if l.is_bare_var() || r.is_bare_var() => {
                let (var_side, other) = if l.is_bare_var() { (&l, &r) } else { (&r, &l) };
                let v = var_side
                    .head()
                    .as_free()
                    .expect("bare variable has a free head")
                    .clone();
                if other.contains_free(&v) {
                    debug!("pruned: occurs check on {}", v);
                    return;
                }
                let Ok(sub) = Sub::new(v, other.clone()) else {
                    return;
                };
                apply_binding(&sub, &mut eqs, &mut flex);
                subst.add(sub);
            }
            (lh, rh) if lh.is_free() || rh.is_free() => {
                let (flex_side, rigid_side) = if lh.is_free() { (&l, &r) } else { (&r, &l) };
                branch(
                    flex_side, rigid_side, &l, &r, &eqs, &subst, &flex, depth, search,
                );
                return;
            }
            _ => {
                debug!("pruned: no applicable rule");
                return;
            }
        }
    }
}

/// Push one subproblem per argument pair, each argument re-wrapped in its
/// side's outer binders. Arities agree because the types do.
fn decompose(l: &Term, r: &Term, eqs: &mut VecDeque<Equation>) -> bool {
    for (la, ra) in l.args().iter().zip(r.args()) {
        let left = Term::wrap_binders(l.bvars(), la);
        let right = Term::wrap_binders(r.bvars(), ra);
        match (left, right) {
            (Ok(left), Ok(right)) => eqs.push_back((left, right)),
            (Err(e), _) | (_, Err(e)) => {
                warn!("pruned: decomposition failed: {}", e);
                return false;
            }
        }
    }
    true
}

/// Branch over the candidate bindings at a flex–rigid or flex–bound pair:
/// imitation then projections against a constant, projections only against a
/// bound variable.
#[allow(clippy::too_many_arguments)]
fn branch(
    flex_side: &Term,
    rigid_side: &Term,
    l: &Term,
    r: &Term,
    eqs: &VecDeque<Equation>,
    subst: &SubstList,
    flex: &[Equation],
    depth: usize,
    search: &mut Search,
) {
    let kinds: &[BindingKind] = match rigid_side.head() {
        Decl::Const(_) => &[BindingKind::Imitation, BindingKind::Projection],
        Decl::Bound(_) => &[BindingKind::Projection],
        Decl::Free(_) => return,
    };
    if depth == 0 {
        debug!("branch abandoned: depth budget exhausted");
        search.max_depth_hits += 1;
        return;
    }
    let fv = flex_side
        .head()
        .as_free()
        .expect("flex side has a free head")
        .clone();
    let candidates = match bindings::generate(&fv, rigid_side.head(), kinds) {
        Ok(c) => c,
        Err(e) => {
            warn!("pruned: binding generation failed: {}", e);
            return;
        }
    };
    for cand in candidates {
        if search.satisfied() {
            return;
        }
        let mut branch_eqs: VecDeque<Equation> = VecDeque::with_capacity(eqs.len() + 1);
        branch_eqs.push_back((l.clone(), r.clone()));
        branch_eqs.extend(eqs.iter().cloned());
        let mut branch_flex = flex.to_vec();
        apply_binding(&cand, &mut branch_eqs, &mut branch_flex);
        let mut branch_subst = subst.clone();
        branch_subst.add(cand);
        solve(branch_eqs, branch_subst, branch_flex, depth - 1, search);
    }
}

/// Rewrite the pending equations and the flex residual with a fresh binding.
/// Residual pairs that stop being flex–flex wake up and rejoin the queue.
fn apply_binding(sub: &Sub, eqs: &mut VecDeque<Equation>, flex: &mut Vec<Equation>) {
    for (l, r) in eqs.iter_mut() {
        *l = sub.apply(l);
        *r = sub.apply(r);
    }
    let mut still_flex = Vec::with_capacity(flex.len());
    for (l, r) in flex.drain(..) {
        let l = sub.apply(&l);
        let r = sub.apply(&r);
        if l.is_flex() && r.is_flex() {
            still_flex.push((l, r));
        } else {
            eqs.push_back((l, r));
        }
    }
    *flex = still_flex;
}
