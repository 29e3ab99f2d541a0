//! Surface language: AST, canonical printing, and the Unicode parser

pub mod ast;
pub mod expr;

pub use ast::{Ast, BinOpKind, MarkerKind, QuantKind};
pub use expr::parse_expression;
