//! Problem export in a TPTP-like textual form
//!
//! Each unification problem can be written to `<dir>/<name>.p`: one `thf`
//! type declaration per constant, then a conjecture existentially closing
//! over the free variables and conjoining the equations. Types flatten to
//! `>`-separated `$`-prefixed atoms, bound variables print as `BV_<index>`,
//! free variables as uppercase names, constants single-quoted.

use crate::error::Result;
use crate::hol::{Decl, FreeVar, Term, Type, VarName};
use crate::unification::Equation;
use indexmap::IndexSet;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory for exported problems.
pub const EXPORT_DIR: &str = "exported_problems";

/// Write the equations as a TPTP-like problem file and return its path.
pub fn export_problem(name: &str, eqs: &[Equation], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.p", name));
    fs::write(&path, render_problem(name, eqs))?;
    info!("exported problem to {}", path.display());
    Ok(path)
}

/// Render the problem text without touching the filesystem.
pub fn render_problem(name: &str, eqs: &[Equation]) -> String {
    let mut constants: IndexSet<(String, Type)> = IndexSet::new();
    let mut fvars: IndexSet<FreeVar> = IndexSet::new();
    for (l, r) in eqs {
        collect_constants(l, &mut constants);
        collect_constants(r, &mut constants);
        for v in l.fvars().iter().chain(r.fvars()) {
            fvars.insert(v.clone());
        }
    }

    let mut out = String::new();
    for (i, (cname, ty)) in constants.iter().enumerate() {
        out.push_str(&format!(
            "thf({}_type_{}, type, '{}': {}).\n",
            name,
            i + 1,
            cname,
            flatten_type(ty)
        ));
    }

    let binders: Vec<String> = fvars
        .iter()
        .map(|v| format!("{}: {}", var_name(v), flatten_type(&v.ty)))
        .collect();
    let conjuncts: Vec<String> = eqs
        .iter()
        .map(|(l, r)| format!("({} = {})", render_term(l), render_term(r)))
        .collect();

    out.push_str(&format!("thf({}, conjecture, ", name));
    if binders.is_empty() {
        out.push_str(&format!("( {} )", conjuncts.join(" & ")));
    } else {
        out.push_str(&format!(
            "? [{}] : ( {} )",
            binders.join(", "),
            conjuncts.join(" & ")
        ));
    }
    out.push_str(").\n");
    out
}

/// `α₁ → … → αₙ → g` as `α₁ > … > αₙ > $g`, functional arguments
/// parenthesized.
fn flatten_type(ty: &Type) -> String {
    fn atom(ty: &Type) -> String {
        if ty.is_base() {
            format!("${}", ty.goal())
        } else {
            format!("({})", flatten_type(ty))
        }
    }
    let mut parts: Vec<String> = ty.args().iter().map(atom).collect();
    parts.push(format!("${}", ty.goal()));
    parts.join(" > ")
}

fn render_term(t: &Term) -> String {
    let mut out = String::new();
    if !t.bvars().is_empty() {
        let binders: Vec<String> = t
            .bvars()
            .iter()
            .map(|b| format!("BV_{}: {}", b.index, flatten_type(&b.ty)))
            .collect();
        out.push_str(&format!("^ [{}] : ", binders.join(", ")));
    }
    out.push_str(&head_name(t));
    for arg in t.args() {
        out.push_str(&format!(" @ ({})", render_term(arg)));
    }
    out
}

fn head_name(t: &Term) -> String {
    match t.head() {
        Decl::Free(v) => var_name(v),
        Decl::Const(c) => format!("'{}'", c.name),
        Decl::Bound(b) => format!("BV_{}", b.index),
    }
}

fn var_name(v: &FreeVar) -> String {
    match &v.name {
        VarName::Named(n) => n.to_uppercase(),
        VarName::Helper(id) => format!("H{}", id),
    }
}

fn collect_constants(t: &Term, out: &mut IndexSet<(String, Type)>) {
    if let Decl::Const(c) = t.head() {
        out.insert((c.name.clone(), c.ty.clone()));
    }
    for arg in t.args() {
        collect_constants(arg, out);
    }
}
