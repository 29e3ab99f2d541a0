//! Error types for lambdascope

use crate::hol::Type;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("parse error at line {line}, column {column}: unparsed input starts with {remainder:?}")]
    Parse {
        remainder: String,
        line: usize,
        column: usize,
    },

    #[error("type mismatch in application: function expects {expected}, argument has {found}")]
    TypeMismatch { expected: Type, found: Type },

    #[error("cannot apply a term of base type {0}")]
    NotAFunction(Type),

    #[error("variable capture while abstracting {0}")]
    Capture(String),

    #[error("bound-variable index space exhausted (more than {0} indices required)")]
    IndexOverflow(usize),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ScopeError>;
