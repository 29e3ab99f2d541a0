//! βη-long terms and the term builder
//!
//! A term denotes `λ bvars . head(args)` and is kept β-normal and η-long by
//! every constructor. Bound variables carry absolute indices: the indices a
//! node binds form a contiguous range starting one above everything bound
//! inside its arguments, listed outermost-first (descending). Under that
//! canonical numbering, α-equivalent terms are structurally equal, so the
//! derived `PartialEq` is term equality.

use super::types::{BoundVar, Constant, Decl, FreeVar, Type};
use crate::error::{Result, ScopeError};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Hard ceiling on the number of bound-variable indices a term may use.
const INDEX_LIMIT: usize = 1_000_000_000;

/// An immutable term in β-normal, η-long form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    bvars: Vec<BoundVar>,
    head: Decl,
    args: Vec<Term>,
    ty: Type,
    fvars: Vec<FreeVar>,
    max_num: usize,
}

impl Term {
    /// Build an η-long term whose head is the given declaration. A head of
    /// arity `n` is applied to `n` fresh helper variables and wrapped in `n`
    /// abstractions, so the term's type equals the declaration's type.
    pub fn of_decl(decl: Decl) -> Term {
        let ty = decl.ty().clone();
        if ty.is_base() {
            return assemble(Vec::new(), decl, Vec::new());
        }
        let helpers: Vec<FreeVar> = ty
            .args()
            .iter()
            .map(|arg_ty| FreeVar::fresh_helper(arg_ty.clone()))
            .collect();
        let args = helpers
            .iter()
            .map(|h| Term::of_decl(Decl::Free(h.clone())))
            .collect();
        let mut term = assemble(Vec::new(), decl, args);
        for h in helpers.iter().rev() {
            term = term
                .abstract_over(h)
                .expect("fresh helper variables cannot be captured");
        }
        term
    }

    /// η-long term for a named free variable.
    pub fn free_var(name: impl Into<String>, ty: Type) -> Term {
        Term::of_decl(Decl::Free(FreeVar::new(name, ty)))
    }

    /// η-long term for a constant.
    pub fn constant(name: impl Into<String>, ty: Type) -> Term {
        Term::of_decl(Decl::Const(Constant::new(name, ty)))
    }

    pub fn bvars(&self) -> &[BoundVar] {
        &self.bvars
    }

    pub fn head(&self) -> &Decl {
        &self.head
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Free variables occurring anywhere in the term, first occurrence first.
    pub fn fvars(&self) -> &[FreeVar] {
        &self.fvars
    }

    /// Largest index bound at this node or inside its arguments.
    pub fn max_num(&self) -> usize {
        self.max_num
    }

    /// Whether the head is a free variable.
    pub fn is_flex(&self) -> bool {
        self.head.is_free()
    }

    /// Whether the term is exactly a free-variable leaf: no binders, no
    /// arguments. Only such terms are eligible for direct binding during
    /// unification.
    pub fn is_bare_var(&self) -> bool {
        self.bvars.is_empty() && self.args.is_empty() && self.head.is_free()
    }

    pub fn contains_free(&self, v: &FreeVar) -> bool {
        self.fvars.contains(v)
    }

    /// Apply this term to an argument, β-reducing and re-canonicalizing.
    ///
    /// The argument's type must equal the first argument type of this term's
    /// type. Both operands' binder indices are made globally distinct before
    /// substitution, so no renaming during reduction can capture.
    pub fn apply(&self, arg: &Term) -> Result<Term> {
        let expected = self
            .ty
            .args()
            .first()
            .ok_or_else(|| ScopeError::NotAFunction(self.ty.clone()))?;
        if expected != arg.ty() {
            return Err(ScopeError::TypeMismatch {
                expected: expected.clone(),
                found: arg.ty().clone(),
            });
        }
        let mut next = INDEX_LIMIT;
        let l = uniquify(self, &mut next)?;
        let r = uniquify(arg, &mut next)?;
        let binder = l.bvars.first().cloned().expect("η-long term binds its arguments");
        let body = assemble(l.bvars[1..].to_vec(), l.head, l.args);
        Ok(renumber(&replace_bound(&body, binder.index, &r)))
    }

    /// Abstract the free variable `v`, producing `λv. self` with `v` turned
    /// into a fresh bound variable. Vacuous if `v` does not occur.
    pub fn abstract_over(&self, v: &FreeVar) -> Result<Term> {
        let k = self.max_num + 1;
        let b = BoundVar::new(k, v.ty.clone());
        let body = if self.contains_free(v) {
            replace_free(self, v, &b, k)?
        } else {
            self.clone()
        };
        let mut bvars = Vec::with_capacity(body.bvars.len() + 1);
        bvars.push(b);
        bvars.extend(body.bvars);
        Ok(assemble(bvars, body.head, body.args))
    }

    /// Shift this node's binder indices so the smallest is one above the
    /// largest index bound inside the arguments. The arguments must already
    /// be canonical; use [`Term::adjust_all_bound_vars`] otherwise.
    pub fn adjust_outer_bound_vars(&self) -> Term {
        if self.bvars.is_empty() {
            return self.clone();
        }
        let base = self.args.iter().map(|a| a.max_num).max().unwrap_or(0);
        let min = self
            .bvars
            .iter()
            .map(|b| b.index)
            .min()
            .expect("non-empty binder list");
        if min == base + 1 {
            return self.clone();
        }
        let map: HashMap<usize, usize> = self
            .bvars
            .iter()
            .map(|b| (b.index, b.index - min + base + 1))
            .collect();
        let bvars = self
            .bvars
            .iter()
            .map(|b| BoundVar::new(map[&b.index], b.ty.clone()))
            .collect();
        let head = remap_head(&self.head, &map);
        let args = self.args.iter().map(|a| remap_free(a, &map)).collect();
        assemble(bvars, head, args)
    }

    /// Globally rename every bound index into a fresh high range, then
    /// renumber bottom-up so the contiguity invariant holds at every node.
    /// Rejects terms that would need more than 10⁹ indices.
    pub fn adjust_all_bound_vars(&self) -> Result<Term> {
        let mut next = INDEX_LIMIT;
        let lifted = uniquify(self, &mut next)?;
        Ok(renumber(&lifted))
    }

    /// Wrap a term in the given outer binders (which may be referenced free
    /// inside it) and re-canonicalize. Used when decomposing an application
    /// into per-argument subproblems.
    pub(crate) fn wrap_binders(outer: &[BoundVar], inner: &Term) -> Result<Term> {
        let mut bvars = outer.to_vec();
        bvars.extend(inner.bvars.iter().cloned());
        let raw = assemble(bvars, inner.head.clone(), inner.args.clone());
        raw.adjust_all_bound_vars()
    }
}

/// Raw constructor: recomputes the type, free-variable set, and max index
/// from the parts. Performs no normalization.
fn assemble(bvars: Vec<BoundVar>, head: Decl, args: Vec<Term>) -> Term {
    let head_ty = head.ty();
    debug_assert!(args.len() <= head_ty.arity(), "over-applied head");
    let bvar_tys = bvars.iter().map(|b| b.ty.clone()).collect();
    let ty = Type::func(bvar_tys, head_ty.consumed(args.len()));

    let mut fv: IndexSet<FreeVar> = IndexSet::new();
    if let Decl::Free(v) = &head {
        fv.insert(v.clone());
    }
    for arg in &args {
        for v in &arg.fvars {
            fv.insert(v.clone());
        }
    }

    let max_num = bvars
        .iter()
        .map(|b| b.index)
        .chain(args.iter().map(|a| a.max_num))
        .max()
        .unwrap_or(0);

    Term {
        bvars,
        head,
        args,
        ty,
        fvars: fv.into_iter().collect(),
        max_num,
    }
}

/// Rebuild a term with every binder index replaced by a fresh one above
/// `INDEX_LIMIT`. Occurrences are resolved through the nearest enclosing
/// binder, so duplicate indices in sibling subtrees stay independent.
fn uniquify(term: &Term, next: &mut usize) -> Result<Term> {
    fn walk(
        term: &Term,
        next: &mut usize,
        scope: &mut HashMap<usize, usize>,
    ) -> Result<Term> {
        let mut saved = Vec::with_capacity(term.bvars.len());
        let mut bvars = Vec::with_capacity(term.bvars.len());
        for b in &term.bvars {
            *next += 1;
            if *next > 2 * INDEX_LIMIT {
                return Err(ScopeError::IndexOverflow(INDEX_LIMIT));
            }
            bvars.push(BoundVar::new(*next, b.ty.clone()));
            saved.push((b.index, scope.insert(b.index, *next)));
        }
        let head = match &term.head {
            Decl::Bound(b) => match scope.get(&b.index) {
                Some(&fresh) => Decl::Bound(BoundVar::new(fresh, b.ty.clone())),
                None => term.head.clone(),
            },
            other => other.clone(),
        };
        let mut args = Vec::with_capacity(term.args.len());
        for a in &term.args {
            args.push(walk(a, next, scope)?);
        }
        for (old, prev) in saved.into_iter().rev() {
            match prev {
                Some(p) => {
                    scope.insert(old, p);
                }
                None => {
                    scope.remove(&old);
                }
            }
        }
        Ok(assemble(bvars, head, args))
    }
    walk(term, next, &mut HashMap::new())
}

/// Bottom-up renumbering into canonical contiguous indices. Requires all
/// binder indices to be globally distinct (see [`uniquify`]).
fn renumber(term: &Term) -> Term {
    let args: Vec<Term> = term.args.iter().map(renumber).collect();
    let base = args.iter().map(|a| a.max_num).max().unwrap_or(0);
    let n = term.bvars.len();
    if n == 0 {
        return assemble(Vec::new(), term.head.clone(), args);
    }
    let map: HashMap<usize, usize> = term
        .bvars
        .iter()
        .enumerate()
        .map(|(i, b)| (b.index, base + n - i))
        .collect();
    let bvars = term
        .bvars
        .iter()
        .enumerate()
        .map(|(i, b)| BoundVar::new(base + n - i, b.ty.clone()))
        .collect();
    let head = remap_head(&term.head, &map);
    let args = args.into_iter().map(|a| remap_free(&a, &map)).collect();
    assemble(bvars, head, args)
}

fn remap_head(head: &Decl, map: &HashMap<usize, usize>) -> Decl {
    match head {
        Decl::Bound(b) => match map.get(&b.index) {
            Some(&idx) => Decl::Bound(BoundVar::new(idx, b.ty.clone())),
            None => head.clone(),
        },
        other => other.clone(),
    }
}

/// Remap free occurrences of the given indices throughout a term. Binder
/// lists are untouched; callers guarantee the keys are never rebound below.
fn remap_free(term: &Term, map: &HashMap<usize, usize>) -> Term {
    let head = remap_head(&term.head, map);
    let args = term.args.iter().map(|a| remap_free(a, map)).collect();
    assemble(term.bvars.clone(), head, args)
}

/// Substitute `r` for the bound variable `k` throughout a term, contracting
/// any β-redex this creates in head position. All binder indices across the
/// term and `r` must be globally distinct.
fn replace_bound(term: &Term, k: usize, r: &Term) -> Term {
    let args: Vec<Term> = term.args.iter().map(|a| replace_bound(a, k, r)).collect();
    match &term.head {
        Decl::Bound(b) if b.index == k => {
            let reduced = beta_apply(r, &args);
            if term.bvars.is_empty() {
                reduced
            } else {
                let mut bvars = term.bvars.clone();
                bvars.extend(reduced.bvars);
                assemble(bvars, reduced.head, reduced.args)
            }
        }
        _ => assemble(term.bvars.clone(), term.head.clone(), args),
    }
}

/// β-contract `f` applied to the given arguments by peeling one binder per
/// argument. `f` is η-long, so the binder count matches the argument count.
fn beta_apply(f: &Term, args: &[Term]) -> Term {
    debug_assert!(f.bvars.len() >= args.len(), "η-long head under-binds");
    let mut body = assemble(f.bvars[args.len()..].to_vec(), f.head.clone(), f.args.clone());
    for (binder, arg) in f.bvars[..args.len()].iter().zip(args) {
        body = replace_bound(&body, binder.index, arg);
    }
    body
}

/// Turn occurrences of the free variable `v` into the bound variable `b`.
/// The new index `k` exceeds every index in the term; meeting a binder at or
/// above it means the caller broke the builder invariants.
fn replace_free(term: &Term, v: &FreeVar, b: &BoundVar, k: usize) -> Result<Term> {
    if term.bvars.iter().any(|bb| bb.index >= k) {
        return Err(ScopeError::Capture(v.to_string()));
    }
    let head = match &term.head {
        Decl::Free(fv) if fv == v => Decl::Bound(b.clone()),
        other => other.clone(),
    };
    let mut args = Vec::with_capacity(term.args.len());
    for a in &term.args {
        args.push(replace_free(a, v, b, k)?);
    }
    Ok(assemble(term.bvars.clone(), head, args))
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.bvars.is_empty() {
            write!(f, "λ")?;
            for (i, b) in self.bvars.iter().enumerate() {
                if i > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", b)?;
            }
            write!(f, ". ")?;
        }
        write!(f, "{}", self.head)?;
        if !self.args.is_empty() {
            write!(f, "(")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", arg)?;
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hol::types::{INDIVIDUAL, PROPOSITION};

    fn i() -> Type {
        Type::base(INDIVIDUAL)
    }

    fn fi() -> Type {
        Type::func(vec![i()], i())
    }

    /// Check the representation invariants at every node.
    fn assert_canonical(t: &Term) {
        // binders are contiguous, descending, starting above the args
        let base = t.args().iter().map(|a| a.max_num()).max().unwrap_or(0);
        let n = t.bvars().len();
        for (idx, b) in t.bvars().iter().enumerate() {
            assert_eq!(b.index, base + n - idx, "binder indices not contiguous in {}", t);
        }
        // max_num is the largest index bound here or below
        let expect_max = if n > 0 { base + n } else { base };
        assert_eq!(t.max_num(), expect_max, "max_num wrong in {}", t);
        for a in t.args() {
            assert_canonical(a);
        }
    }

    #[test]
    fn test_leaf_term() {
        let a = Term::constant("a", i());
        assert!(a.bvars().is_empty());
        assert!(a.args().is_empty());
        assert_eq!(a.ty(), &i());
        assert_eq!(a.max_num(), 0);
    }

    #[test]
    fn test_eta_expansion() {
        let f = Term::constant("f", Type::func(vec![i(), i()], i()));
        // λb2 b1. f(b2, b1)
        assert_eq!(f.bvars().len(), 2);
        assert_eq!(f.bvars()[0].index, 2);
        assert_eq!(f.bvars()[1].index, 1);
        assert_eq!(f.args().len(), 2);
        assert_eq!(f.max_num(), 2);
        assert_canonical(&f);
    }

    #[test]
    fn test_eta_expansion_higher_order() {
        // c : (i → i) → i becomes λb2. c(λb1. b2(b1))
        let c = Term::constant("c", Type::func(vec![fi()], i()));
        assert_eq!(c.bvars().len(), 1);
        assert_eq!(c.bvars()[0].index, 2);
        let arg = &c.args()[0];
        assert_eq!(arg.bvars().len(), 1);
        assert_eq!(arg.bvars()[0].index, 1);
        assert_canonical(&c);
    }

    #[test]
    fn test_apply_beta_reduces() {
        let f = Term::constant("f", Type::func(vec![i(), i()], i()));
        let a = Term::constant("a", i());
        let fa = f.apply(&a).unwrap();
        // λb1. f(a, b1)
        assert_eq!(fa.ty(), &fi());
        assert_eq!(fa.bvars().len(), 1);
        assert_eq!(fa.args()[0], a);
        assert_canonical(&fa);

        let b = Term::constant("b", i());
        let fab = fa.apply(&b).unwrap();
        assert!(fab.ty().is_base());
        assert_eq!(fab.args(), &[a, b]);
        assert_canonical(&fab);
    }

    #[test]
    fn test_apply_type_mismatch() {
        let f = Term::constant("f", fi());
        let g = Term::constant("g", fi());
        assert!(matches!(
            f.apply(&g),
            Err(ScopeError::TypeMismatch { .. })
        ));
        let a = Term::constant("a", i());
        assert!(matches!(a.apply(&a), Err(ScopeError::NotAFunction(_))));
    }

    #[test]
    fn test_identity_application() {
        // (λx. x) a reduces to a
        let x = FreeVar::new("x", i());
        let id = Term::of_decl(Decl::Free(x.clone()))
            .abstract_over(&x)
            .unwrap();
        let a = Term::constant("a", i());
        assert_eq!(id.apply(&a).unwrap(), a);
    }

    #[test]
    fn test_abstraction_binds_all_occurrences() {
        let f = Term::constant("f", Type::func(vec![i(), i()], i()));
        let x = FreeVar::new("x", i());
        let xt = Term::of_decl(Decl::Free(x.clone()));
        let fxx = f.apply(&xt).unwrap().apply(&xt).unwrap();
        assert!(fxx.contains_free(&x));

        let lam = fxx.abstract_over(&x).unwrap();
        assert!(!lam.contains_free(&x));
        assert_eq!(lam.ty(), &fi());
        assert_canonical(&lam);

        // applying it to a yields f(a, a)
        let a = Term::constant("a", i());
        let faa = lam.apply(&a).unwrap();
        let expected = f.apply(&a).unwrap().apply(&a).unwrap();
        assert_eq!(faa, expected);
    }

    #[test]
    fn test_vacuous_abstraction() {
        let a = Term::constant("a", i());
        let x = FreeVar::new("x", i());
        let lam = a.abstract_over(&x).unwrap();
        assert_eq!(lam.ty(), &fi());
        assert_eq!(lam.bvars().len(), 1);
        // the body ignores the binder
        let b = Term::constant("b", i());
        assert_eq!(lam.apply(&b).unwrap(), a);
    }

    #[test]
    fn test_apply_functional_argument() {
        // twice = λg x. g(g(x)); twice(f) = λx. f(f(x))
        let g = FreeVar::new("g", fi());
        let x = FreeVar::new("x", i());
        let gt = Term::of_decl(Decl::Free(g.clone()));
        let xt = Term::of_decl(Decl::Free(x.clone()));
        let body = gt.apply(&gt.apply(&xt).unwrap()).unwrap();
        let twice = body.abstract_over(&x).unwrap().abstract_over(&g).unwrap();
        assert_canonical(&twice);

        let f = Term::constant("f", fi());
        let ff = twice.apply(&f).unwrap();
        let expected = {
            let inner = f.apply(&xt).unwrap();
            f.apply(&inner).unwrap().abstract_over(&x).unwrap()
        };
        assert_eq!(ff, expected);
        assert_canonical(&ff);
    }

    #[test]
    fn test_fvars_tracking() {
        let x = FreeVar::new("x", i());
        let y = FreeVar::new("y", i());
        let f = Term::constant("f", Type::func(vec![i(), i()], i()));
        let t = f
            .apply(&Term::of_decl(Decl::Free(x.clone())))
            .unwrap()
            .apply(&Term::of_decl(Decl::Free(y.clone())))
            .unwrap();
        assert_eq!(t.fvars(), &[x.clone(), y.clone()]);
        let lam = t.abstract_over(&x).unwrap();
        assert_eq!(lam.fvars(), &[y]);
    }

    #[test]
    fn test_adjust_all_is_identity_on_canonical_terms() {
        let p = Term::constant(
            "p",
            Type::func(vec![fi(), i()], Type::base(PROPOSITION)),
        );
        assert_eq!(p.adjust_all_bound_vars().unwrap(), p);
        assert_canonical(&p);
    }

    #[test]
    fn test_display() {
        let f = Term::constant("f", Type::func(vec![i(), i()], i()));
        assert_eq!(f.to_string(), "λb2 b1. f(b2, b1)");
    }
}
