//! Morph IR - term, pattern, template and rule types for the morph engine.
//!
//! This crate is pure data:
//! - [`Term`]: sequences, texts, composites, atoms, applications, function
//!   shapes and references to declared shapes
//! - [`Declarations`]: the host's named shapes, with cycle detection
//! - [`Pattern`]: how to decompose a term and what to capture
//! - [`Template`]: how to build a new term from captures
//! - [`Rule`]: ordered arms plus terminal and recursion policies
//!
//! Matching, rewriting and reduction live in `morph_patterns`.

mod decls;
mod name;
mod pattern;
mod rule;
mod template;
mod term;

pub use decls::{CycleError, Declarations};
pub use name::Name;
pub use pattern::{
    FieldPattern, FieldPresence, FunctionPattern, Pattern, Segment, SeqPattern, TextPattern,
};
pub use rule::{Arm, Recursion, Rule, Terminal};
pub use template::{
    CaseOp, FunctionTemplate, Guard, MapTemplate, ModifierEdit, SeqItem, Template, TextPiece,
    KEY_BINDING, VALUE_BINDING,
};
pub use term::{Atom, Composite, Field, FnKind, FunctionShape, Modifiers, Prim, Term, TermKind};
