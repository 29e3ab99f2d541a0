//! Free-variable substitutions
//!
//! A substitution maps one free variable to a term of the same type.
//! Applying one goes through the term builder — abstract the variable, then
//! apply the replacement — so β/η normalization comes for free. Ordered
//! lists of substitutions are kept idempotent on insertion.

use super::term::Term;
use super::types::FreeVar;
use crate::error::{Result, ScopeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single substitution `fvar ↦ term` with `fvar.ty == term.ty`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sub {
    pub fvar: FreeVar,
    pub term: Term,
}

impl Sub {
    /// Build a substitution, checking that the types line up.
    pub fn new(fvar: FreeVar, term: Term) -> Result<Self> {
        if &fvar.ty != term.ty() {
            return Err(ScopeError::TypeMismatch {
                expected: fvar.ty.clone(),
                found: term.ty().clone(),
            });
        }
        Ok(Sub { fvar, term })
    }

    /// Apply this substitution to a term. A no-op when the variable does not
    /// occur free; otherwise `(λv. t) term`, normalized by the builder.
    pub fn apply(&self, t: &Term) -> Term {
        if !t.contains_free(&self.fvar) {
            return t.clone();
        }
        t.abstract_over(&self.fvar)
            .expect("abstraction over a free variable cannot capture")
            .apply(&self.term)
            .expect("substitution preserves typing")
    }
}

impl fmt::Display for Sub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ↦ {}", self.fvar, self.term)
    }
}

/// An ordered, idempotent list of substitutions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstList(Vec<Sub>);

impl SubstList {
    pub fn new() -> Self {
        SubstList(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sub> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Sub> {
        self.0
    }

    /// Apply all substitutions left to right.
    pub fn apply(&self, t: &Term) -> Term {
        self.0.iter().fold(t.clone(), |acc, s| s.apply(&acc))
    }

    /// Add a substitution: rewrite every existing right-hand side with it
    /// first (keeping the list idempotent), then prepend it — unless its
    /// variable is an opaque helper, in which case only the rewriting stays
    /// and the pair itself is dropped.
    pub fn add(&mut self, new: Sub) {
        for s in &mut self.0 {
            s.term = new.apply(&s.term);
        }
        if !new.fvar.is_helper() {
            self.0.insert(0, new);
        }
    }

    pub fn lookup(&self, v: &FreeVar) -> Option<&Term> {
        self.0.iter().find(|s| &s.fvar == v).map(|s| &s.term)
    }
}

impl From<SubstList> for Vec<Sub> {
    fn from(list: SubstList) -> Vec<Sub> {
        list.0
    }
}
