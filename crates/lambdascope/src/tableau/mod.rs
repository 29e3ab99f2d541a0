//! Semantic-tableau refutation prover over the surface AST
//!
//! Classification runs two refutation attempts: first against the negated
//! formula (success means tautology), then against the formula itself
//! (success means contradiction); anything else is contingent. Universals
//! are instantiated at most once per branch with a fresh constant, which
//! keeps the search finite at the price of completeness: first-order
//! tautologies that need several instantiations of one universal come out
//! contingent.

pub mod branch;
pub mod prover;
pub mod rules;

pub use branch::Branch;
pub use prover::{prove, RuleApplication, TableauReport, Verdict, STEP_BUDGET};
pub use rules::{expansion_for, Expansion, ExpansionResult, RuleClass};
