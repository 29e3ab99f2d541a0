//! Lowering the surface AST into a typed higher-order term model
//!
//! Names classify by shape: Skolem constants (`_sk_`) and `c_`-prefixed
//! witnesses are individuals, the predicate letters P–T are `ι → ο`
//! constants, remaining single uppercase letters are propositional
//! variables, multi-letter identifiers are function constants (`ι → ι`) or
//! predicates (`ι → ο`) depending on capitalization. Anything the lowering
//! does not understand becomes an `Unknown` node carrying the original AST;
//! callers report that as a note, not a failure.

use crate::parser::ast::{Ast, BinOpKind, QuantKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple types over `ι` (individuals) and `ο` (propositions).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolType {
    I,
    O,
    Arrow(Box<HolType>, Box<HolType>),
}

impl HolType {
    pub fn arrow(from: HolType, to: HolType) -> HolType {
        HolType::Arrow(Box::new(from), Box::new(to))
    }
}

impl fmt::Display for HolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolType::I => write!(f, "ι"),
            HolType::O => write!(f, "ο"),
            HolType::Arrow(a, b) => write!(f, "({} → {})", a, b),
        }
    }
}

/// A lowered higher-order term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolTerm {
    Const {
        name: String,
        ty: HolType,
    },
    Var {
        name: String,
        ty: HolType,
    },
    App {
        fun: Box<HolTerm>,
        arg: Box<HolTerm>,
    },
    Lam {
        var: String,
        var_ty: Option<HolType>,
        body: Box<HolTerm>,
    },
    Quant {
        q: QuantKind,
        var: String,
        var_ty: Option<HolType>,
        body: Box<HolTerm>,
    },
    /// Lowering fell through; the original AST rides along.
    Unknown {
        ast: Box<Ast>,
    },
}

impl HolTerm {
    fn app(fun: HolTerm, arg: HolTerm) -> HolTerm {
        HolTerm::App {
            fun: Box::new(fun),
            arg: Box::new(arg),
        }
    }

    fn unknown(ast: &Ast) -> HolTerm {
        HolTerm::Unknown {
            ast: Box::new(ast.clone()),
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, HolTerm::Unknown { .. })
    }

    /// Whether any node in the term failed to lower.
    pub fn contains_unknown(&self) -> bool {
        match self {
            HolTerm::Unknown { .. } => true,
            HolTerm::Const { .. } | HolTerm::Var { .. } => false,
            HolTerm::App { fun, arg } => fun.contains_unknown() || arg.contains_unknown(),
            HolTerm::Lam { body, .. } | HolTerm::Quant { body, .. } => body.contains_unknown(),
        }
    }
}

impl fmt::Display for HolTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HolTerm::Const { name, .. } | HolTerm::Var { name, .. } => write!(f, "{}", name),
            HolTerm::App { fun, arg } => write!(f, "({} {})", fun, arg),
            HolTerm::Lam { var, var_ty, body } => match var_ty {
                Some(ty) => write!(f, "λ{}:{}. {}", var, ty, body),
                None => write!(f, "λ{}. {}", var, body),
            },
            HolTerm::Quant {
                q, var, var_ty, body
            } => match var_ty {
                Some(ty) => write!(f, "{}{}:{}. {}", q.symbol(), var, ty, body),
                None => write!(f, "{}{}. {}", q.symbol(), var, body),
            },
            HolTerm::Unknown { ast } => write!(f, "?{}", ast),
        }
    }
}

/// Lower an AST into the higher-order term model. Total: unhandled shapes
/// come back as `Unknown` nodes.
pub fn lower(ast: &Ast) -> HolTerm {
    match ast {
        Ast::Var(name) | Ast::Ident(name) => lower_name(name),

        Ast::TypedVar { var, ty } => {
            let (Some(name), Some(ty_name)) = (var.name(), ty.name()) else {
                return HolTerm::unknown(ast);
            };
            match type_from_name(ty_name) {
                Some(ty) => HolTerm::Var {
                    name: name.to_string(),
                    ty,
                },
                None => HolTerm::unknown(ast),
            }
        }

        Ast::Not(inner) => HolTerm::app(
            HolTerm::Const {
                name: "¬".into(),
                ty: HolType::arrow(HolType::O, HolType::O),
            },
            lower(inner),
        ),

        Ast::BinOp { op, left, right } => {
            let connective = HolTerm::Const {
                name: op.symbol().into(),
                ty: operator_type(*op),
            };
            HolTerm::app(HolTerm::app(connective, lower(left)), lower(right))
        }

        Ast::Quant { q, var, body } => match binder_parts(var) {
            Some((name, var_ty)) => HolTerm::Quant {
                q: *q,
                var: name,
                var_ty,
                body: Box::new(lower(body)),
            },
            None => HolTerm::unknown(ast),
        },

        Ast::Lambda { var, body } => match binder_parts(var) {
            Some((name, var_ty)) => HolTerm::Lam {
                var: name,
                var_ty,
                body: Box::new(lower(body)),
            },
            None => HolTerm::unknown(ast),
        },

        Ast::App { fun, arg } => HolTerm::app(lower(fun), lower(arg)),

        Ast::Marker { .. } => HolTerm::unknown(ast),
    }
}

/// The fixed predicate letters.
const PREDICATE_LETTERS: [char; 5] = ['P', 'Q', 'R', 'S', 'T'];

fn lower_name(name: &str) -> HolTerm {
    if name.contains("_sk_") || name.starts_with("c_") {
        return HolTerm::Const {
            name: name.to_string(),
            ty: HolType::I,
        };
    }
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => {
            return HolTerm::Var {
                name: String::new(),
                ty: HolType::I,
            }
        }
    };
    if chars.next().is_none() {
        // single letter
        if first.is_ascii_uppercase() {
            if PREDICATE_LETTERS.contains(&first) {
                HolTerm::Const {
                    name: name.to_string(),
                    ty: HolType::arrow(HolType::I, HolType::O),
                }
            } else {
                HolTerm::Var {
                    name: name.to_string(),
                    ty: HolType::O,
                }
            }
        } else {
            // an individual variable such as a quantified x
            HolTerm::Var {
                name: name.to_string(),
                ty: HolType::I,
            }
        }
    } else if first.is_uppercase() {
        HolTerm::Const {
            name: name.to_string(),
            ty: HolType::arrow(HolType::I, HolType::O),
        }
    } else {
        HolTerm::Const {
            name: name.to_string(),
            ty: HolType::arrow(HolType::I, HolType::I),
        }
    }
}

fn operator_type(op: BinOpKind) -> HolType {
    let prop2 = || HolType::arrow(HolType::O, HolType::arrow(HolType::O, HolType::O));
    let ind_pred = || HolType::arrow(HolType::I, HolType::arrow(HolType::I, HolType::O));
    let ind_fun = || HolType::arrow(HolType::I, HolType::arrow(HolType::I, HolType::I));
    match op {
        BinOpKind::And | BinOpKind::Or | BinOpKind::Implies | BinOpKind::Iff => prop2(),
        BinOpKind::Eq => ind_pred(),
        BinOpKind::Plus | BinOpKind::Times => ind_fun(),
        BinOpKind::Compose => {
            let fi = HolType::arrow(HolType::I, HolType::I);
            HolType::arrow(fi.clone(), HolType::arrow(fi.clone(), fi))
        }
    }
}

fn binder_parts(var: &Ast) -> Option<(String, Option<HolType>)> {
    match var {
        Ast::Var(n) | Ast::Ident(n) => Some((n.clone(), None)),
        Ast::TypedVar { var, ty } => {
            let name = var.name()?.to_string();
            let ty = ty.name().and_then(type_from_name);
            Some((name, ty))
        }
        _ => None,
    }
}

fn type_from_name(name: &str) -> Option<HolType> {
    match name {
        "ι" | "i" => Some(HolType::I),
        "ο" | "o" => Some(HolType::O),
        _ => None,
    }
}
