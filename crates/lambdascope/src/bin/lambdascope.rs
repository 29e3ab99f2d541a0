//! Command-line front end: analyze a formula or explain a concept.

use clap::Parser;
use lambdascope::{analyze, explain, AnalysisJson};
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "lambdascope",
    about = "Classify higher-order logic formulas with a semantic tableau",
    long_about = "Parses a Unicode logic expression, lowers it to a typed higher-order \
                  form, and classifies it as tautology, contradiction, or contingent \
                  with a semantic-tableau refutation search."
)]
struct Cli {
    /// Formula to analyze, e.g. "¬(P ∧ Q) ↔ (¬P ∨ ¬Q)"
    formula: Option<String>,

    /// Print a short explanation of a logical concept
    #[arg(short = 'e', long = "explain", value_name = "CONCEPT")]
    explain: Option<String>,

    /// Emit the analysis as JSON
    #[arg(long)]
    json: bool,

    /// Print version information
    #[arg(short = 'v', long = "version")]
    version: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.version {
        println!("lambdascope {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if let Some(concept) = &cli.explain {
        println!("{}", explain(concept));
        return ExitCode::SUCCESS;
    }

    let Some(formula) = &cli.formula else {
        eprintln!("error: no formula given (try --help)");
        return ExitCode::from(2);
    };

    match analyze(formula) {
        Ok(analysis) => {
            if cli.json {
                match serde_json::to_string_pretty(&AnalysisJson::from(&analysis)) {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("error: could not serialize analysis: {}", e),
                }
                return ExitCode::SUCCESS;
            }

            println!("Expression: {}", analysis.expression);
            println!("Parsed:     {}", analysis.parsed);
            println!("HOL form:   {}", analysis.hol);
            println!();
            println!("Syntax tree:");
            print!("{}", analysis.visualization);
            println!();
            println!("Verdict: {}", analysis.verdict);
            if !analysis.proof_tree.is_empty() {
                println!();
                println!("Proof tree:");
                for block in &analysis.proof_tree {
                    print!("{}", block);
                }
            }
            println!();
            println!("Steps:");
            for step in &analysis.steps {
                println!("  {}. {} — {}", step.step, step.description, step.formula);
            }
        }
        // a failed analysis is still a completed run: report and exit clean
        Err(e) => println!("error: {}", e),
    }
    ExitCode::SUCCESS
}
