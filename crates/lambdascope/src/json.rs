//! JSON views of terms, solutions, and analyses
//!
//! The internal representations carry bookkeeping (binder indices, cached
//! free-variable sets, rule tags) that makes their derived serialization a
//! poor wire format. These mirror types flatten everything into stable,
//! readable JSON; `From` impls do the conversion.

use crate::analysis::Analysis;
use crate::hol::{Decl, Sub, Term};
use crate::render::AnalysisStep;
use crate::tableau::Verdict;
use crate::unification::{Solution, UnifyOutcome};
use serde::{Deserialize, Serialize};

/// JSON representation of a term
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TermJson {
    Lambda {
        binders: Vec<String>,
        body: Box<TermJson>,
    },
    FreeVariable {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        args: Vec<TermJson>,
    },
    BoundVariable {
        index: usize,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        args: Vec<TermJson>,
    },
    Constant {
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty", default)]
        args: Vec<TermJson>,
    },
}

impl From<&Term> for TermJson {
    fn from(term: &Term) -> Self {
        let args: Vec<TermJson> = term.args().iter().map(TermJson::from).collect();
        let head = match term.head() {
            Decl::Free(v) => TermJson::FreeVariable {
                name: v.name.to_string(),
                args,
            },
            Decl::Bound(b) => TermJson::BoundVariable {
                index: b.index,
                args,
            },
            Decl::Const(c) => TermJson::Constant {
                name: c.name.clone(),
                args,
            },
        };
        if term.bvars().is_empty() {
            head
        } else {
            TermJson::Lambda {
                binders: term.bvars().iter().map(|b| format!("b{}", b.index)).collect(),
                body: Box::new(head),
            }
        }
    }
}

/// JSON representation of one substitution pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubJson {
    pub variable: String,
    pub term: TermJson,
    /// Pretty-printed form, for humans reading the file
    pub rendered: String,
}

impl From<&Sub> for SubJson {
    fn from(sub: &Sub) -> Self {
        SubJson {
            variable: sub.fvar.name.to_string(),
            term: TermJson::from(&sub.term),
            rendered: sub.to_string(),
        }
    }
}

/// JSON representation of one unification solution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionJson {
    pub substitutions: Vec<SubJson>,
    pub flex_pairs: Vec<(TermJson, TermJson)>,
}

impl From<&Solution> for SolutionJson {
    fn from(solution: &Solution) -> Self {
        SolutionJson {
            substitutions: solution.substitutions.iter().map(SubJson::from).collect(),
            flex_pairs: solution
                .flex_pairs
                .iter()
                .map(|(l, r)| (TermJson::from(l), TermJson::from(r)))
                .collect(),
        }
    }
}

/// JSON representation of a whole unification run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeJson {
    pub solutions: Vec<SolutionJson>,
    pub max_depth_reached: usize,
}

impl From<&UnifyOutcome> for OutcomeJson {
    fn from(outcome: &UnifyOutcome) -> Self {
        OutcomeJson {
            solutions: outcome.solutions.iter().map(SolutionJson::from).collect(),
            max_depth_reached: outcome.max_depth_reached,
        }
    }
}

/// JSON representation of a step record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepJson {
    pub step: usize,
    pub description: String,
    pub formula: String,
}

impl From<&AnalysisStep> for StepJson {
    fn from(step: &AnalysisStep) -> Self {
        StepJson {
            step: step.step,
            description: step.description.clone(),
            formula: step.formula.clone(),
        }
    }
}

/// JSON representation of a full analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisJson {
    pub expression: String,
    pub parsed: String,
    pub hol: String,
    pub verdict: String,
    pub steps: Vec<StepJson>,
    pub proof_tree: Vec<String>,
}

impl From<&Analysis> for AnalysisJson {
    fn from(analysis: &Analysis) -> Self {
        let verdict = match analysis.verdict {
            Verdict::Tautology => "tautology",
            Verdict::Contradiction => "contradiction",
            Verdict::Contingent => "contingent",
        };
        AnalysisJson {
            expression: analysis.expression.clone(),
            parsed: analysis.parsed.stringify(),
            hol: analysis.hol.to_string(),
            verdict: verdict.to_string(),
            steps: analysis.steps.iter().map(StepJson::from).collect(),
            proof_tree: analysis.proof_tree.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::hol::{numeral, numeral_type, succ, Type};
    use crate::unification::unify_pair;

    #[test]
    fn test_term_json_shape() {
        let two = numeral(2);
        let json = serde_json::to_value(TermJson::from(&two)).unwrap();
        assert_eq!(json["kind"], "Lambda");
        assert_eq!(json["binders"][0], "b2");
        assert_eq!(json["body"]["kind"], "BoundVariable");
    }

    #[test]
    fn test_constant_args_are_elided_when_empty() {
        let a = Term::constant("a", Type::base("i"));
        let json = serde_json::to_value(TermJson::from(&a)).unwrap();
        assert_eq!(json["kind"], "Constant");
        assert!(json.get("args").is_none());
    }

    #[test]
    fn test_outcome_json() {
        let x = Term::free_var("x", numeral_type());
        let outcome = unify_pair(&succ(&x).unwrap(), &numeral(2));
        let json = OutcomeJson::from(&outcome);
        assert_eq!(json.solutions.len(), 1);
        assert_eq!(json.solutions[0].substitutions[0].variable, "x");
        assert_eq!(json.max_depth_reached, 0);
        // round-trips through text
        let text = serde_json::to_string(&json).unwrap();
        let back: OutcomeJson = serde_json::from_str(&text).unwrap();
        assert_eq!(back.solutions.len(), 1);
    }

    #[test]
    fn test_analysis_json() {
        let analysis = analyze("P ∨ ¬P").unwrap();
        let json = AnalysisJson::from(&analysis);
        assert_eq!(json.verdict, "tautology");
        assert_eq!(json.parsed, "(P ∨ ¬P)");
        assert!(json.steps.len() >= 2);
    }
}
