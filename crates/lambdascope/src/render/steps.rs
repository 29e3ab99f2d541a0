//! Ordered step records for the analysis pipeline

use crate::lowering::HolTerm;
use crate::parser::ast::Ast;
use crate::tableau::TableauReport;
use serde::Serialize;

/// One record per pipeline phase: parsing, lowering, then one per tableau
/// expansion.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisStep {
    pub step: usize,
    pub description: String,
    pub formula: String,
}

/// Assemble the full step list for an analysis.
pub fn process_steps(ast: &Ast, hol: &HolTerm, report: &TableauReport) -> Vec<AnalysisStep> {
    let mut steps = Vec::with_capacity(report.applications.len() + 2);
    steps.push(AnalysisStep {
        step: 1,
        description: "parsed surface expression".into(),
        formula: ast.stringify(),
    });
    let lowering_note = if hol.contains_unknown() {
        "lowered to higher-order form (with unresolved nodes)"
    } else {
        "lowered to higher-order form"
    };
    steps.push(AnalysisStep {
        step: 2,
        description: lowering_note.into(),
        formula: hol.to_string(),
    });
    for application in &report.applications {
        steps.push(AnalysisStep {
            step: steps.len() + 1,
            description: format!(
                "applied {}-rule {}",
                application.class.glyph(),
                application.name
            ),
            formula: application.principal.clone(),
        });
    }
    steps
}
