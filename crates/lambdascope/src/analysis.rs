//! End-to-end analysis pipeline
//!
//! `analyze` runs parse → lower → prove → render and packages everything a
//! front end needs. A parse failure stops the pipeline; nothing downstream
//! runs on a broken AST.

use crate::error::Result;
use crate::lowering::{lower, HolTerm};
use crate::parser::{parse_expression, Ast};
use crate::render::{build_tree_node, process_steps, visualize_expression_tree, AnalysisStep};
use crate::tableau::{prove, Verdict};
use log::info;
use serde::Serialize;

/// Everything produced for one input expression.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub expression: String,
    pub parsed: Ast,
    pub hol: HolTerm,
    pub verdict: Verdict,
    pub steps: Vec<AnalysisStep>,
    pub proof_tree: Vec<String>,
    pub visualization: String,
}

/// Analyze a surface expression.
pub fn analyze(expression: &str) -> Result<Analysis> {
    let parsed = parse_expression(expression)?;
    info!("parsed: {}", parsed);
    let hol = lower(&parsed);
    let report = prove(&parsed);
    info!("verdict: {} in {} step(s)", report.verdict, report.steps_used);

    let steps = process_steps(&parsed, &hol, &report);
    let proof_tree = report.applications.iter().map(build_tree_node).collect();
    let visualization = visualize_expression_tree(&parsed);

    Ok(Analysis {
        expression: expression.to_string(),
        parsed,
        hol,
        verdict: report.verdict,
        steps,
        proof_tree,
        visualization,
    })
}

/// Fixed educational descriptions for the CLI's `--explain` flag. Unknown
/// concepts get the fallback text.
pub fn explain(concept: &str) -> &'static str {
    match concept {
        "negation" => {
            "Negation (¬): flips a proposition's truth value. ¬P is true exactly when P is false."
        }
        "conjunction" => {
            "Conjunction (∧): P ∧ Q is true when both P and Q are true."
        }
        "disjunction" => {
            "Disjunction (∨): P ∨ Q is true when at least one of P, Q is true."
        }
        "implication" => {
            "Implication (→): P → Q is false only when P is true and Q is false."
        }
        "biconditional" => {
            "Biconditional (↔): P ↔ Q is true when P and Q have the same truth value."
        }
        "equality" => {
            "Equality (=): x = y states that two individuals are the same. The prover treats it as atomic."
        }
        "forall" => {
            "Universal quantifier (∀): ∀x. P(x) states that P holds of every individual."
        }
        "exists" => {
            "Existential quantifier (∃): ∃x. P(x) states that some individual satisfies P."
        }
        "exists_unique" => {
            "Unique existence (∃!): ∃!x. P(x) states that exactly one individual satisfies P."
        }
        "lambda" => {
            "Lambda (λ): λx. t denotes the function sending x to t. Applying it substitutes the argument for x."
        }
        "composition" => {
            "Composition (∘): (f ∘ g)(x) applies g first and then f."
        }
        "addition" => {
            "Addition (+): arithmetic on individuals; on Church numerals, λm n f x. m f (n f x)."
        }
        "multiplication" => {
            "Multiplication (×): arithmetic on individuals; on Church numerals, λm n f x. m (n f) x."
        }
        _ => "No description available for that concept. Try one of: negation, conjunction, \
              disjunction, implication, biconditional, equality, forall, exists, exists_unique, \
              lambda, composition, addition, multiplication.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;

    #[test]
    fn test_analyze_pipeline() {
        let analysis = analyze("¬(P ∧ Q) ↔ (¬P ∨ ¬Q)").unwrap();
        assert_eq!(analysis.verdict, Verdict::Tautology);
        assert!(!analysis.steps.is_empty());
        assert!(!analysis.proof_tree.is_empty());
        assert!(analysis.visualization.contains("IFF (↔)"));
        assert!(!analysis.hol.contains_unknown());
    }

    #[test]
    fn test_analyze_stops_on_parse_error() {
        let err = analyze("P ∧∧ Q").unwrap_err();
        assert!(matches!(err, ScopeError::Parse { .. }));
    }

    #[test]
    fn test_explain_known_and_unknown() {
        assert!(explain("negation").contains("¬"));
        assert!(explain("exists_unique").contains("∃!"));
        assert!(explain("frobnication").contains("No description"));
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = analyze("P → P").unwrap();
        let json = serde_json::to_string(&analysis).unwrap();
        assert!(json.contains("\"verdict\""));
        assert!(json.contains("Tautology"));
    }
}
