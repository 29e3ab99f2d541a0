//! Imitation and projection bindings for flex–rigid pairs
//!
//! Given a flex head `x : α₁ → … → αₙ → g` facing a rigid atom `y : β`, the
//! imitation binding copies `y` under fresh helper arguments and each
//! projection binding picks one of `x`'s own arguments whose goal type
//! matches. Helpers introduced here are resolved (or discarded) later by the
//! substitution machinery, so they never reach user-visible solutions.

use crate::error::Result;
use crate::hol::{Decl, FreeVar, Sub, Term, Type};
use log::trace;

/// The two Huet binding families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Imitation,
    Projection,
}

/// Generate candidate substitutions for the flex variable, in the order the
/// kinds are requested. Only bindings whose result goal matches the rigid
/// atom's goal are produced.
pub fn generate(flex: &FreeVar, rigid: &Decl, kinds: &[BindingKind]) -> Result<Vec<Sub>> {
    let alpha = &flex.ty;
    let beta = rigid.ty();
    let mut out = Vec::new();

    for kind in kinds {
        match kind {
            BindingKind::Imitation => {
                if !rigid.is_const() || beta.goal() != alpha.goal() {
                    continue;
                }
                let body = Term::of_decl(rigid.clone());
                out.push(build_binding(flex, body, beta.args())?);
            }
            BindingKind::Projection => {
                for (pos, arg_ty) in alpha.args().iter().enumerate() {
                    if arg_ty.goal() != beta.goal() {
                        continue;
                    }
                    out.push(project_binding(flex, pos)?);
                }
            }
        }
    }

    trace!(
        "generated {} binding(s) for {} against {}",
        out.len(),
        flex,
        rigid
    );
    Ok(out)
}

/// `λX₁…Xₙ. head (H₁ X₁…Xₙ) … (Hₘ X₁…Xₙ)` for the given head term and its
/// argument types.
fn build_binding(flex: &FreeVar, head: Term, head_args: &[Type]) -> Result<Sub> {
    let xs: Vec<FreeVar> = flex
        .ty
        .args()
        .iter()
        .map(|t| FreeVar::fresh_helper(t.clone()))
        .collect();
    let x_terms: Vec<Term> = xs
        .iter()
        .map(|x| Term::of_decl(Decl::Free(x.clone())))
        .collect();

    let mut body = head;
    for arg_ty in head_args {
        let h = FreeVar::fresh_helper(Type::func(flex.ty.args().to_vec(), arg_ty.clone()));
        let mut applied = Term::of_decl(Decl::Free(h));
        for x in &x_terms {
            applied = applied.apply(x)?;
        }
        body = body.apply(&applied)?;
    }
    for x in xs.iter().rev() {
        body = body.abstract_over(x)?;
    }
    Sub::new(flex.clone(), body)
}

/// The projection binding picking argument `pos` of the flex variable.
fn project_binding(flex: &FreeVar, pos: usize) -> Result<Sub> {
    let xs: Vec<FreeVar> = flex
        .ty
        .args()
        .iter()
        .map(|t| FreeVar::fresh_helper(t.clone()))
        .collect();
    let x_terms: Vec<Term> = xs
        .iter()
        .map(|x| Term::of_decl(Decl::Free(x.clone())))
        .collect();

    let picked_ty = flex.ty.args()[pos].clone();
    let mut body = Term::of_decl(Decl::Free(xs[pos].clone()));
    for arg_ty in picked_ty.args() {
        let h = FreeVar::fresh_helper(Type::func(flex.ty.args().to_vec(), arg_ty.clone()));
        let mut applied = Term::of_decl(Decl::Free(h));
        for x in &x_terms {
            applied = applied.apply(x)?;
        }
        body = body.apply(&applied)?;
    }
    for x in xs.iter().rev() {
        body = body.abstract_over(x)?;
    }
    Sub::new(flex.clone(), body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hol::{Constant, Type, INDIVIDUAL};

    fn i() -> Type {
        Type::base(INDIVIDUAL)
    }

    #[test]
    fn test_imitation_copies_rigid_head() {
        // x : i → i → i against f : i → i → i
        let rel = Type::func(vec![i(), i()], i());
        let x = FreeVar::new("x", rel.clone());
        let f = Decl::Const(Constant::new("f", rel.clone()));

        let subs = generate(&x, &f, &[BindingKind::Imitation]).unwrap();
        assert_eq!(subs.len(), 1);
        let rhs = &subs[0].term;
        assert_eq!(rhs.ty(), &rel);
        assert_eq!(rhs.bvars().len(), 2);
        assert!(matches!(rhs.head(), Decl::Const(c) if c.name == "f"));
        // each copied argument is a helper applied to both binders
        for arg in rhs.args() {
            assert!(arg.is_flex());
            assert_eq!(arg.args().len(), 2);
        }
    }

    #[test]
    fn test_projections_pick_matching_arguments() {
        let rel = Type::func(vec![i(), i()], i());
        let x = FreeVar::new("x", rel.clone());
        let a = Decl::Const(Constant::new("a", i()));

        let subs = generate(&x, &a, &[BindingKind::Projection]).unwrap();
        assert_eq!(subs.len(), 2);
        for (pos, sub) in subs.iter().enumerate() {
            let rhs = &sub.term;
            assert_eq!(rhs.ty(), &rel);
            // λb2 b1. b2 for the first projection, λb2 b1. b1 for the second
            let expect = rhs.bvars()[pos].index;
            assert!(matches!(rhs.head(), Decl::Bound(b) if b.index == expect));
        }
    }

    #[test]
    fn test_goal_filter_excludes_projections() {
        // x : (i → o) with an o-goaled rigid head: the i-typed argument
        // cannot be projected
        let o = Type::base("o");
        let x = FreeVar::new("x", Type::func(vec![i()], o.clone()));
        let p = Decl::Const(Constant::new("p", o));
        let subs = generate(&x, &p, &[BindingKind::Projection]).unwrap();
        assert!(subs.is_empty());
    }

    #[test]
    fn test_enumeration_order_is_imitation_first() {
        let rel = Type::func(vec![i(), i()], i());
        let x = FreeVar::new("x", rel.clone());
        let f = Decl::Const(Constant::new("f", rel));
        let subs = generate(&x, &f, &[BindingKind::Imitation, BindingKind::Projection]).unwrap();
        assert_eq!(subs.len(), 3);
        assert!(subs[0].term.head().is_const());
        assert!(subs[1].term.head().is_bound());
        assert!(subs[2].term.head().is_bound());
    }
}
