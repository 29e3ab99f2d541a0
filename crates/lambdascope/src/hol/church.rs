//! Church numerals and arithmetic combinators
//!
//! Used as algebraic problem builders for the unification engine and as
//! ready-made examples of higher-order terms. Everything here goes through
//! the term builder, so the results are canonical βη-long terms and numeral
//! arithmetic can be checked with plain structural equality.

use super::term::Term;
use super::types::{Decl, FreeVar, Type, INDIVIDUAL};
use crate::error::Result;

/// The numeral type `(i → i) → i → i`.
pub fn numeral_type() -> Type {
    let i = Type::base(INDIVIDUAL);
    let fi = Type::func(vec![i.clone()], i.clone());
    Type::func(vec![fi, i.clone()], i)
}

/// `λf x. fⁿ(x)`.
pub fn numeral(n: usize) -> Term {
    let i = Type::base(INDIVIDUAL);
    let fi = Type::func(vec![i.clone()], i.clone());
    let f = FreeVar::new("f", fi);
    let x = FreeVar::new("x", i);
    let ft = Term::of_decl(Decl::Free(f.clone()));
    let mut body = Term::of_decl(Decl::Free(x.clone()));
    for _ in 0..n {
        body = ft
            .apply(&body)
            .expect("numeral body is well-typed");
    }
    body.abstract_over(&x)
        .and_then(|t| t.abstract_over(&f))
        .expect("numeral abstraction cannot capture")
}

/// `λm f x. f(m f x)`.
pub fn succ_term() -> Term {
    let i = Type::base(INDIVIDUAL);
    let fi = Type::func(vec![i.clone()], i.clone());
    let m = FreeVar::new("m", numeral_type());
    let f = FreeVar::new("f", fi);
    let x = FreeVar::new("x", i);
    let mt = Term::of_decl(Decl::Free(m.clone()));
    let ft = Term::of_decl(Decl::Free(f.clone()));
    let xt = Term::of_decl(Decl::Free(x.clone()));
    let body = (|| -> Result<Term> {
        let mfx = mt.apply(&ft)?.apply(&xt)?;
        ft.apply(&mfx)
    })()
    .expect("successor body is well-typed");
    body.abstract_over(&x)
        .and_then(|t| t.abstract_over(&f))
        .and_then(|t| t.abstract_over(&m))
        .expect("successor abstraction cannot capture")
}

/// `λm n f x. m f (n f x)`.
pub fn plus_term() -> Term {
    let i = Type::base(INDIVIDUAL);
    let fi = Type::func(vec![i.clone()], i.clone());
    let m = FreeVar::new("m", numeral_type());
    let n = FreeVar::new("n", numeral_type());
    let f = FreeVar::new("f", fi);
    let x = FreeVar::new("x", i);
    let mt = Term::of_decl(Decl::Free(m.clone()));
    let nt = Term::of_decl(Decl::Free(n.clone()));
    let ft = Term::of_decl(Decl::Free(f.clone()));
    let xt = Term::of_decl(Decl::Free(x.clone()));
    let body = (|| -> Result<Term> {
        let nfx = nt.apply(&ft)?.apply(&xt)?;
        mt.apply(&ft)?.apply(&nfx)
    })()
    .expect("addition body is well-typed");
    body.abstract_over(&x)
        .and_then(|t| t.abstract_over(&f))
        .and_then(|t| t.abstract_over(&n))
        .and_then(|t| t.abstract_over(&m))
        .expect("addition abstraction cannot capture")
}

/// `λm n f x. m (n f) x`.
pub fn mult_term() -> Term {
    let i = Type::base(INDIVIDUAL);
    let fi = Type::func(vec![i.clone()], i.clone());
    let m = FreeVar::new("m", numeral_type());
    let n = FreeVar::new("n", numeral_type());
    let f = FreeVar::new("f", fi);
    let x = FreeVar::new("x", i);
    let mt = Term::of_decl(Decl::Free(m.clone()));
    let nt = Term::of_decl(Decl::Free(n.clone()));
    let ft = Term::of_decl(Decl::Free(f.clone()));
    let xt = Term::of_decl(Decl::Free(x.clone()));
    let body = (|| -> Result<Term> {
        let nf = nt.apply(&ft)?;
        mt.apply(&nf)?.apply(&xt)
    })()
    .expect("multiplication body is well-typed");
    body.abstract_over(&x)
        .and_then(|t| t.abstract_over(&f))
        .and_then(|t| t.abstract_over(&n))
        .and_then(|t| t.abstract_over(&m))
        .expect("multiplication abstraction cannot capture")
}

/// Successor of a numeral-typed term.
pub fn succ(t: &Term) -> Result<Term> {
    succ_term().apply(t)
}

/// Sum of two numeral-typed terms.
pub fn plus(a: &Term, b: &Term) -> Result<Term> {
    plus_term().apply(a)?.apply(b)
}

/// Product of two numeral-typed terms.
pub fn mult(a: &Term, b: &Term) -> Result<Term> {
    mult_term().apply(a)?.apply(b)
}
