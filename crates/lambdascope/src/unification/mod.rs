//! Huet-style pre-unification for the simply typed lambda calculus

pub mod bindings;
pub mod huet;


pub use bindings::{generate, BindingKind};
pub use huet::{unify, unify_pair, Equation, Solution, UnifyOptions, UnifyOutcome};
