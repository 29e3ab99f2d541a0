//! Simple types and atomic declarations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Goal atom for individuals.
pub const INDIVIDUAL: &str = "i";
/// Goal atom for propositions.
pub const PROPOSITION: &str = "o";

/// A simple type in curried storage: `α₁ → … → αₙ → goal` is kept as the
/// goal atom plus the argument list `[α₁, …, αₙ]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Type {
    goal: String,
    args: Vec<Type>,
}

impl Type {
    /// A base type such as `i` or `o`.
    pub fn base(goal: impl Into<String>) -> Self {
        Type {
            goal: goal.into(),
            args: Vec::new(),
        }
    }

    /// Extend `result` with extra arguments in front: composing `[β₁,…,βₘ]`
    /// onto `{g, [α₁,…,αₙ]}` yields `{g, [β₁,…,βₘ,α₁,…,αₙ]}`.
    pub fn func(mut args: Vec<Type>, result: Type) -> Self {
        args.extend(result.args);
        Type {
            goal: result.goal,
            args,
        }
    }

    pub fn goal(&self) -> &str {
        &self.goal
    }

    pub fn args(&self) -> &[Type] {
        &self.args
    }

    /// Number of arguments a head of this type expects in η-long form.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_base(&self) -> bool {
        self.args.is_empty()
    }

    /// The type remaining after consuming the first `n` arguments.
    pub fn consumed(&self, n: usize) -> Type {
        Type {
            goal: self.goal.clone(),
            args: self.args[n..].to_vec(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.goal);
        }
        write!(f, "(")?;
        for arg in &self.args {
            write!(f, "{} → ", arg)?;
        }
        write!(f, "{})", self.goal)
    }
}

/// Name of a free variable: either user-supplied or an opaque helper identity
/// allocated for internally-created variables. Helper names never appear in
/// user-visible substitutions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarName {
    Named(String),
    Helper(u64),
}

impl VarName {
    pub fn is_helper(&self) -> bool {
        matches!(self, VarName::Helper(_))
    }
}

impl fmt::Display for VarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarName::Named(name) => write!(f, "{}", name),
            VarName::Helper(id) => write!(f, "?h{}", id),
        }
    }
}

static HELPER_SEQ: AtomicU64 = AtomicU64::new(0);

/// A free variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FreeVar {
    pub name: VarName,
    pub ty: Type,
}

impl FreeVar {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        FreeVar {
            name: VarName::Named(name.into()),
            ty,
        }
    }

    /// A fresh helper variable with an opaque identity.
    pub fn fresh_helper(ty: Type) -> Self {
        FreeVar {
            name: VarName::Helper(HELPER_SEQ.fetch_add(1, Ordering::Relaxed)),
            ty,
        }
    }

    pub fn is_helper(&self) -> bool {
        self.name.is_helper()
    }
}

impl fmt::Display for FreeVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A constant symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constant {
    pub name: String,
    pub ty: Type,
}

impl Constant {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Constant {
            name: name.into(),
            ty,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A bound variable. Indices are absolute within a term (1-based), not
/// relative to the enclosing binder; the term builder keeps each node's
/// binder indices contiguous above everything bound beneath them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundVar {
    pub index: usize,
    pub ty: Type,
}

impl BoundVar {
    pub fn new(index: usize, ty: Type) -> Self {
        BoundVar { index, ty }
    }
}

impl fmt::Display for BoundVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.index)
    }
}

/// An atomic declaration: the head of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decl {
    Free(FreeVar),
    Const(Constant),
    Bound(BoundVar),
}

impl Decl {
    pub fn ty(&self) -> &Type {
        match self {
            Decl::Free(v) => &v.ty,
            Decl::Const(c) => &c.ty,
            Decl::Bound(b) => &b.ty,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self, Decl::Free(_))
    }

    pub fn is_const(&self) -> bool {
        matches!(self, Decl::Const(_))
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Decl::Bound(_))
    }

    pub fn as_free(&self) -> Option<&FreeVar> {
        match self {
            Decl::Free(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Free(v) => write!(f, "{}", v),
            Decl::Const(c) => write!(f, "{}", c),
            Decl::Bound(b) => write!(f, "{}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_composition() {
        let i = Type::base(INDIVIDUAL);
        let o = Type::base(PROPOSITION);

        // i → o
        let pred = Type::func(vec![i.clone()], o.clone());
        assert_eq!(pred.goal(), PROPOSITION);
        assert_eq!(pred.arity(), 1);

        // composing more arguments prepends them: i → (i → o) = {o, [i, i]}
        let rel = Type::func(vec![i.clone()], pred.clone());
        assert_eq!(rel.goal(), PROPOSITION);
        assert_eq!(rel.args(), &[i.clone(), i.clone()]);
    }

    #[test]
    fn test_type_consumed() {
        let i = Type::base(INDIVIDUAL);
        let rel = Type::func(vec![i.clone(), i.clone()], Type::base(PROPOSITION));
        assert_eq!(rel.consumed(1).args(), &[i.clone()]);
        assert!(rel.consumed(2).is_base());
    }

    #[test]
    fn test_helper_identity_is_fresh() {
        let i = Type::base(INDIVIDUAL);
        let a = FreeVar::fresh_helper(i.clone());
        let b = FreeVar::fresh_helper(i);
        assert_ne!(a, b);
        assert!(a.is_helper());
        assert!(!FreeVar::new("x", Type::base(INDIVIDUAL)).is_helper());
    }

    #[test]
    fn test_type_display() {
        let i = Type::base(INDIVIDUAL);
        let fi = Type::func(vec![i.clone()], i.clone());
        let num = Type::func(vec![fi, i.clone()], i);
        assert_eq!(num.to_string(), "((i → i) → i → i)");
    }
}
