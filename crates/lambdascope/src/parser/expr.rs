//! Parser for the Unicode surface language
//!
//! Precedence, lowest binding first: ↔, →, ∨, ∧, =, ∘, +, ×, then negation
//! and application, then atoms. Every infix level folds to the left; this
//! includes →, matching the grammar this language has always used even
//! though implication is conventionally right-associative. Quantified and
//! lambda bodies extend as far right as possible; inside an operator they
//! need parentheses.

use super::ast::{Ast, BinOpKind, QuantKind};
use crate::error::ScopeError;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, multispace0},
    IResult,
};

/// Parse a complete expression, rejecting trailing input.
pub fn parse_expression(input: &str) -> Result<Ast, ScopeError> {
    match expr(input) {
        Ok((rest, ast)) => {
            if rest.trim_start().is_empty() {
                Ok(ast)
            } else {
                Err(position_error(input, rest))
            }
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(position_error(input, e.input)),
        Err(nom::Err::Incomplete(_)) => Err(position_error(input, "")),
    }
}

/// Build a parse error carrying the unparsed remainder and its position.
fn position_error(full: &str, rest: &str) -> ScopeError {
    let consumed = full.len().saturating_sub(rest.len());
    let consumed_text = &full[..consumed];
    let line = consumed_text.matches('\n').count() + 1;
    let column = consumed_text
        .chars()
        .rev()
        .take_while(|&c| c != '\n')
        .count()
        + 1;
    ScopeError::Parse {
        remainder: rest.chars().take(24).collect(),
        line,
        column,
    }
}

fn expr(input: &str) -> IResult<&str, Ast> {
    alt((quantified, lambda, biconditional))(input)
}

fn quantified(input: &str) -> IResult<&str, Ast> {
    let (input, _) = multispace0(input)?;
    // ∃! must be tried before ∃
    let (input, q) = alt((
        nom::combinator::value(QuantKind::ExistsUnique, tag("∃!")),
        nom::combinator::value(QuantKind::Forall, tag("∀")),
        nom::combinator::value(QuantKind::Exists, tag("∃")),
    ))(input)?;
    let (input, var) = binder(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('.')(input)?;
    let (input, body) = expr(input)?;
    Ok((input, Ast::quant(q, var, body)))
}

fn lambda(input: &str) -> IResult<&str, Ast> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('λ')(input)?;
    let (input, var) = binder(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('.')(input)?;
    let (input, body) = expr(input)?;
    Ok((input, Ast::lambda(var, body)))
}

fn binder(input: &str) -> IResult<&str, Ast> {
    alt((typed_variable, name_atom))(input)
}

/// One left-folding infix level.
fn infix_level<'a>(
    input: &'a str,
    next: fn(&'a str) -> IResult<&'a str, Ast>,
    ops: &[(&str, BinOpKind)],
) -> IResult<&'a str, Ast> {
    let (mut input, mut acc) = next(input)?;
    loop {
        let (rest, _) = multispace0(input)?;
        let mut matched = None;
        for (sym, op) in ops {
            if let Ok((r, _)) = tag::<_, _, nom::error::Error<&str>>(*sym)(rest) {
                matched = Some((r, *op));
                break;
            }
        }
        match matched {
            Some((rest, op)) => {
                let (rest, rhs) = next(rest)?;
                acc = Ast::binop(op, acc, rhs);
                input = rest;
            }
            None => return Ok((input, acc)),
        }
    }
}

fn biconditional(input: &str) -> IResult<&str, Ast> {
    infix_level(
        input,
        implication,
        &[("↔", BinOpKind::Iff), ("⇔", BinOpKind::Iff)],
    )
}

fn implication(input: &str) -> IResult<&str, Ast> {
    infix_level(
        input,
        disjunction,
        &[("→", BinOpKind::Implies), ("⇒", BinOpKind::Implies)],
    )
}

fn disjunction(input: &str) -> IResult<&str, Ast> {
    infix_level(input, conjunction, &[("∨", BinOpKind::Or)])
}

fn conjunction(input: &str) -> IResult<&str, Ast> {
    infix_level(input, equality, &[("∧", BinOpKind::And)])
}

fn equality(input: &str) -> IResult<&str, Ast> {
    infix_level(input, composition, &[("=", BinOpKind::Eq)])
}

fn composition(input: &str) -> IResult<&str, Ast> {
    infix_level(input, addition, &[("∘", BinOpKind::Compose)])
}

fn addition(input: &str) -> IResult<&str, Ast> {
    infix_level(input, multiplication, &[("+", BinOpKind::Plus)])
}

fn multiplication(input: &str) -> IResult<&str, Ast> {
    infix_level(
        input,
        term_level,
        &[("×", BinOpKind::Times), ("*", BinOpKind::Times)],
    )
}

fn term_level(input: &str) -> IResult<&str, Ast> {
    alt((negation, application))(input)
}

fn negation(input: &str) -> IResult<&str, Ast> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('¬')(input)?;
    let (input, inner) = term_level(input)?;
    Ok((input, Ast::not(inner)))
}

/// Juxtaposition is left-associative application: `f x y` is `(f x) y`.
fn application(input: &str) -> IResult<&str, Ast> {
    let (mut input, mut acc) = atom(input)?;
    loop {
        match atom(input) {
            Ok((rest, arg)) => {
                acc = Ast::app(acc, arg);
                input = rest;
            }
            Err(_) => return Ok((input, acc)),
        }
    }
}

fn atom(input: &str) -> IResult<&str, Ast> {
    alt((parens, typed_variable, name_atom))(input)
}

fn parens(input: &str) -> IResult<&str, Ast> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    let (input, inner) = expr(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, inner))
}

fn typed_variable(input: &str) -> IResult<&str, Ast> {
    let (input, var) = name_atom(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, ty) = name_atom(input)?;
    Ok((
        input,
        Ast::TypedVar {
            var: Box::new(var),
            ty: Box::new(ty),
        },
    ))
}

/// A name token: a single uppercase ASCII letter is a variable, anything
/// longer (or non-uppercase) is an identifier. Identifier characters are
/// ASCII letters, digits, underscore, and the Greek small letters.
fn name_atom(input: &str) -> IResult<&str, Ast> {
    let (input, _) = multispace0(input)?;
    let (input, name) = take_while1(is_ident_char)(input)?;
    let mut chars = name.chars();
    let first = chars.next().expect("take_while1 yields a character");
    let ast = if chars.next().is_none() && first.is_ascii_uppercase() {
        Ast::Var(name.to_string())
    } else {
        Ast::Ident(name.to_string())
    };
    Ok((input, ast))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('α'..='ω').contains(&c)
}
