//! The simply-typed term model shared by both engines
//!
//! Types, declarations, the βη-long term builder, substitutions, and the
//! Church-numeral helpers used as unification fixtures.

pub mod church;
pub mod substitution;
pub mod term;
pub mod types;

pub use church::{mult, mult_term, numeral, numeral_type, plus, plus_term, succ, succ_term};
pub use substitution::{Sub, SubstList};
pub use term::Term;
pub use types::{BoundVar, Constant, Decl, FreeVar, Type, VarName, INDIVIDUAL, PROPOSITION};
