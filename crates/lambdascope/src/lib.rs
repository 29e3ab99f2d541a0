//! lambdascope: higher-order pre-unification and tableau classification
//!
//! This library provides two engines over a shared simply-typed term model:
//! a Huet-style pre-unification engine for the simply typed lambda calculus,
//! and a semantic-tableau prover that classifies surface formulas as
//! tautology, contradiction, or contingent.

pub mod analysis;
pub mod error;
pub mod export;
pub mod hol;
pub mod json;
pub mod lowering;
pub mod parser;
pub mod render;
pub mod tableau;
pub mod unification;

// Re-export commonly used types
pub use analysis::{analyze, explain, Analysis};
pub use error::{Result, ScopeError};
pub use hol::{
    mult, mult_term, numeral, plus, plus_term, succ, succ_term, BoundVar, Constant, Decl, FreeVar,
    Sub, SubstList, Term, Type, VarName,
};
pub use json::{AnalysisJson, OutcomeJson, SolutionJson, TermJson};
pub use lowering::{lower, HolTerm, HolType};
pub use parser::{parse_expression, Ast, BinOpKind, MarkerKind, QuantKind};
pub use render::{build_tree_node, process_steps, visualize_expression_tree, AnalysisStep};
pub use tableau::{prove, RuleApplication, RuleClass, TableauReport, Verdict};
pub use unification::{unify, unify_pair, Equation, Solution, UnifyOptions, UnifyOutcome};
