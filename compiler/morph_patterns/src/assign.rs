//! Structural assignability ("A fits B").
//!
//! `unknown` is the top of the lattice and `never` the bottom. Literals fit
//! their primitive (`1` fits `number`, `"a"` fits `string`), sequences and
//! applications are covariant per position, composites are width-subtyped
//! (extra keys allowed, optional target fields may be missing), and
//! function parameters are contravariant.
//!
//! Bidirectional assignability is the engine's notion of type equality: it
//! is what `includes` uses to compare elements.

use morph_ir::{Atom, Composite, Declarations, FunctionShape, Prim, Term};

/// Nesting beyond this is treated as "does not fit".
const MAX_DEPTH: usize = 256;

/// Whether `sub` is assignable to `sup`.
pub fn is_assignable(sub: &Term, sup: &Term, decls: &Declarations) -> bool {
    fits(sub, sup, decls, 0)
}

/// Whether `a` and `b` are each assignable to the other.
pub fn mutually_assignable(a: &Term, b: &Term, decls: &Declarations) -> bool {
    is_assignable(a, b, decls) && is_assignable(b, a, decls)
}

fn fits(sub: &Term, sup: &Term, decls: &Declarations, depth: usize) -> bool {
    if depth > MAX_DEPTH {
        return false;
    }
    let sub = decls.resolve(sub);
    let sup = decls.resolve(sup);
    if sub == sup {
        return true;
    }

    match (sub, sup) {
        (_, Term::Atom(Atom::Prim(Prim::Unknown))) | (Term::Atom(Atom::Prim(Prim::Never)), _) => {
            true
        }
        (Term::Atom(a), Term::Atom(Atom::Prim(p))) => atom_fits_prim(a, *p),
        (Term::Text(_), Term::Atom(Atom::Prim(Prim::String))) => true,
        (Term::Seq(xs), Term::Seq(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .zip(ys)
                    .all(|(x, y)| fits(x, y, decls, depth + 1))
        }
        (Term::Composite(a), Term::Composite(b)) => composite_fits(a, b, decls, depth),
        (
            Term::Apply { head: h1, args: a1 },
            Term::Apply { head: h2, args: a2 },
        ) => {
            h1 == h2
                && a1.len() == a2.len()
                && a1
                    .iter()
                    .zip(a2)
                    .all(|(x, y)| fits(x, y, decls, depth + 1))
        }
        (Term::Function(f), Term::Function(g)) => function_fits(f, g, decls, depth),
        _ => false,
    }
}

fn atom_fits_prim(atom: &Atom, prim: Prim) -> bool {
    match (atom, prim) {
        (Atom::Int(_), Prim::Number)
        | (Atom::Bool(_), Prim::Boolean)
        | (Atom::Prim(Prim::Undefined), Prim::Void) => true,
        (Atom::Prim(p), q) => *p == q,
        _ => false,
    }
}

fn composite_fits(sub: &Composite, sup: &Composite, decls: &Declarations, depth: usize) -> bool {
    sup.iter().all(|(key, target)| match sub.get(key.as_str()) {
        Some(field) => {
            (target.is_optional() || !field.is_optional())
                && fits(&field.value, &target.value, decls, depth + 1)
        }
        None => target.is_optional(),
    })
}

fn function_fits(
    sub: &FunctionShape,
    sup: &FunctionShape,
    decls: &Declarations,
    depth: usize,
) -> bool {
    if sub.kind != sup.kind || sub.params.len() > sup.params.len() {
        return false;
    }
    let this_ok = match (&sub.this, &sup.this) {
        (Some(expected), Some(given)) => fits(given, expected, decls, depth + 1),
        _ => true,
    };
    this_ok
        && sub
            .params
            .iter()
            .zip(&sup.params)
            .all(|(mine, theirs)| fits(theirs, mine, decls, depth + 1))
        && fits(&sub.ret, &sup.ret, decls, depth + 1)
}

#[cfg(test)]
mod tests;
