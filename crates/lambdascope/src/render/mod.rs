//! Text rendering: AST trees, tableau rule blocks, and step reports

pub mod steps;
pub mod tree;

pub use steps::{process_steps, AnalysisStep};
pub use tree::{build_tree_node, visualize_expression_tree};
