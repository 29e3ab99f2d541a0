//! End-to-end tests for the analysis pipeline

use lambdascope::{analyze, explain, parse_expression, ScopeError, Verdict};

#[test]
fn test_stringify_parse_round_trip() {
    // canonical forms survive a parse → stringify cycle verbatim
    for s in [
        "(P ∧ Q)",
        "((P ∨ Q) → R)",
        "¬(P ∧ Q)",
        "(¬P ∨ ¬Q)",
        "∀x. P(x)",
        "∃!x. (P(x) ∧ Q(x))",
        "λx. f(x)",
        "(x = y)",
        "((f ∘ g) + (x × y))",
    ] {
        let ast = parse_expression(s).unwrap();
        assert_eq!(ast.stringify(), s);
    }
}

#[test]
fn test_stringify_is_a_fixed_point() {
    // non-canonical input normalizes once, then stays put
    for s in ["P∧Q", "P x y", "¬ ¬ P", "∀x. P x → Q x"] {
        let once = parse_expression(s).unwrap().stringify();
        let twice = parse_expression(&once).unwrap().stringify();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_analyze_de_morgan() {
    let analysis = analyze("¬(P ∧ Q) ↔ (¬P ∨ ¬Q)").unwrap();
    assert_eq!(analysis.verdict, Verdict::Tautology);
    assert_eq!(analysis.expression, "¬(P ∧ Q) ↔ (¬P ∨ ¬Q)");
    assert_eq!(analysis.parsed.stringify(), "(¬(P ∧ Q) ↔ (¬P ∨ ¬Q))");

    // steps: parse, lowering, then one per rule application
    assert_eq!(analysis.steps.len(), analysis.proof_tree.len() + 2);
    assert!(analysis.steps[0].description.contains("parsed"));
    assert!(analysis.visualization.contains("IFF (↔)"));
    assert!(analysis.proof_tree.iter().any(|b| b.starts_with("[β]")));
}

#[test]
fn test_analyze_russell_paradox() {
    let analysis = analyze("∃R. ∀x. R x ↔ ¬(x x)").unwrap();
    assert_eq!(analysis.verdict, Verdict::Tautology);
    assert!(analysis
        .proof_tree
        .iter()
        .any(|b| b.starts_with("[δ]") && b.contains("_sk_")));
}

#[test]
fn test_parse_errors_stop_the_pipeline() {
    let err = analyze("P ∧ (Q ∨").unwrap_err();
    match err {
        ScopeError::Parse {
            line,
            column,
            remainder,
        } => {
            assert_eq!(line, 1);
            assert!(column >= 1);
            let _ = remainder;
        }
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_analyze_contingent_formula_still_reports() {
    let analysis = analyze("P → Q").unwrap();
    assert_eq!(analysis.verdict, Verdict::Contingent);
    assert!(!analysis.steps.is_empty());
}

#[test]
fn test_explain_covers_all_concepts() {
    for concept in [
        "negation",
        "conjunction",
        "disjunction",
        "implication",
        "biconditional",
        "equality",
        "forall",
        "exists",
        "exists_unique",
        "lambda",
        "composition",
        "addition",
        "multiplication",
    ] {
        let text = explain(concept);
        assert!(!text.contains("No description"), "missing text for {}", concept);
    }
    assert!(explain("paraconsistency").contains("No description"));
}

#[test]
fn test_analysis_json_round_trips_structurally() {
    let analysis = analyze("P ∨ ¬P").unwrap();
    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["verdict"], "Tautology");
    assert!(json["steps"].as_array().unwrap().len() >= 2);
    assert!(json["proof_tree"].as_array().is_some());
}
