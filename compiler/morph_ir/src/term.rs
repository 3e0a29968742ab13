//! Structural terms.
//!
//! A [`Term`] is the only kind of data the engine manipulates. Terms are
//! immutable trees: every rewrite builds a new term, nothing is patched in
//! place. Sharing between terms is by cloning.
//!
//! Self-reference is only possible through [`Term::Ref`], which names a shape
//! in a [`Declarations`](crate::Declarations) table. Cycles are detected there
//! and rejected before any reduction runs.

use std::fmt;
use std::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::Name;

/// Built-in primitive keywords.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Prim {
    String,
    Number,
    Boolean,
    /// Top: every term fits `unknown`. Also the unary placeholder element.
    Unknown,
    /// Bottom: fits everything, nothing but itself fits it. The "unmatched" sentinel.
    Never,
    Undefined,
    Void,
}

impl Prim {
    pub fn as_str(self) -> &'static str {
        match self {
            Prim::String => "string",
            Prim::Number => "number",
            Prim::Boolean => "boolean",
            Prim::Unknown => "unknown",
            Prim::Never => "never",
            Prim::Undefined => "undefined",
            Prim::Void => "void",
        }
    }
}

/// A value with no further structure.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Atom {
    Int(i64),
    Bool(bool),
    Prim(Prim),
    /// Named token with no visible structure (e.g. a nominal class type).
    Opaque(Name),
}

bitflags! {
    /// Per-field modifiers of a composite.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        const READONLY = 1 << 0;
        const OPTIONAL = 1 << 1;
    }
}

/// One entry of a composite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub value: Term,
    pub modifiers: Modifiers,
}

impl Field {
    /// A required, mutable field.
    pub fn plain(value: Term) -> Self {
        Field {
            value,
            modifiers: Modifiers::empty(),
        }
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.modifiers.contains(Modifiers::OPTIONAL)
    }

    #[inline]
    pub fn is_readonly(&self) -> bool {
        self.modifiers.contains(Modifiers::READONLY)
    }
}

/// Key → field mapping with unique keys.
///
/// Iteration follows insertion order. Equality and hashing ignore order: two
/// composites are equal when they have the same keys with equal fields.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Composite {
    fields: Vec<(Name, Field)>,
}

impl Composite {
    pub fn new() -> Self {
        Composite { fields: Vec::new() }
    }

    /// Insert or replace a field. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<Name>, field: Field) {
        let key = key.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = field;
        } else {
            self.fields.push((key, field));
        }
    }

    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, f)| f)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Name, &Field)> {
        self.fields.iter().map(|(k, f)| (k, f))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Name> {
        self.fields.iter().map(|(k, _)| k)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn sorted(&self) -> Vec<&(Name, Field)> {
        let mut entries: Vec<_> = self.fields.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl<K: Into<Name>> FromIterator<(K, Field)> for Composite {
    fn from_iter<I: IntoIterator<Item = (K, Field)>>(iter: I) -> Self {
        let mut composite = Composite::new();
        for (key, field) in iter {
            composite.insert(key, field);
        }
        composite
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields
                .iter()
                .all(|(k, f)| other.get(k.as_str()) == Some(f))
    }
}

impl Eq for Composite {}

impl Hash for Composite {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fields.len().hash(state);
        for (key, field) in self.sorted() {
            key.hash(state);
            field.hash(state);
        }
    }
}

/// Whether a function shape is called or constructed (`new`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FnKind {
    Call,
    Construct,
}

/// A call or construct signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionShape {
    pub kind: FnKind,
    /// Declared receiver type, if any.
    pub this: Option<Term>,
    pub params: Vec<Term>,
    pub ret: Term,
}

/// Coarse classification of a term, used by kind patterns and error messages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TermKind {
    Seq,
    Text,
    Composite,
    Atom,
    Apply,
    Function,
    Ref,
}

impl TermKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TermKind::Seq => "sequence",
            TermKind::Text => "text",
            TermKind::Composite => "composite",
            TermKind::Atom => "atom",
            TermKind::Apply => "application",
            TermKind::Function => "function",
            TermKind::Ref => "reference",
        }
    }
}

/// The uniform data representation manipulated by matching and rewriting.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Term {
    /// Ordered, fixed-length list of terms.
    Seq(Vec<Term>),
    /// Ordered characters; structurally a sequence of one-character texts.
    Text(String),
    Composite(Composite),
    Atom(Atom),
    /// Named head applied to arguments, e.g. `Promise<T>`.
    Apply { head: Name, args: Vec<Term> },
    Function(Box<FunctionShape>),
    /// Reference to a shape declared in a `Declarations` table.
    Ref(Name),
}

// Constructors

impl Term {
    #[inline]
    pub fn int(value: i64) -> Self {
        Term::Atom(Atom::Int(value))
    }

    /// Integer atom from a count. Saturates at `i64::MAX`.
    #[inline]
    pub fn count(value: usize) -> Self {
        Term::int(i64::try_from(value).unwrap_or(i64::MAX))
    }

    #[inline]
    pub fn bool(value: bool) -> Self {
        Term::Atom(Atom::Bool(value))
    }

    #[inline]
    pub fn prim(prim: Prim) -> Self {
        Term::Atom(Atom::Prim(prim))
    }

    #[inline]
    pub fn never() -> Self {
        Term::prim(Prim::Never)
    }

    #[inline]
    pub fn unknown() -> Self {
        Term::prim(Prim::Unknown)
    }

    #[inline]
    pub fn opaque(name: impl Into<Name>) -> Self {
        Term::Atom(Atom::Opaque(name.into()))
    }

    #[inline]
    pub fn text(text: impl Into<String>) -> Self {
        Term::Text(text.into())
    }

    #[inline]
    pub fn seq(items: impl IntoIterator<Item = Term>) -> Self {
        Term::Seq(items.into_iter().collect())
    }

    #[inline]
    pub fn empty_seq() -> Self {
        Term::Seq(Vec::new())
    }

    /// Composite of required, mutable fields.
    pub fn composite<K: Into<Name>>(fields: impl IntoIterator<Item = (K, Term)>) -> Self {
        Term::Composite(
            fields
                .into_iter()
                .map(|(k, v)| (k, Field::plain(v)))
                .collect(),
        )
    }

    pub fn apply(head: impl Into<Name>, args: impl IntoIterator<Item = Term>) -> Self {
        Term::Apply {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }

    /// `(params) => ret`
    pub fn function(params: impl IntoIterator<Item = Term>, ret: Term) -> Self {
        Term::Function(Box::new(FunctionShape {
            kind: FnKind::Call,
            this: None,
            params: params.into_iter().collect(),
            ret,
        }))
    }

    /// `(this: receiver, params) => ret`
    pub fn method(receiver: Term, params: impl IntoIterator<Item = Term>, ret: Term) -> Self {
        Term::Function(Box::new(FunctionShape {
            kind: FnKind::Call,
            this: Some(receiver),
            params: params.into_iter().collect(),
            ret,
        }))
    }

    /// `new (params) => instance`
    pub fn constructor(params: impl IntoIterator<Item = Term>, instance: Term) -> Self {
        Term::Function(Box::new(FunctionShape {
            kind: FnKind::Construct,
            this: None,
            params: params.into_iter().collect(),
            ret: instance,
        }))
    }

    #[inline]
    pub fn reference(name: impl Into<Name>) -> Self {
        Term::Ref(name.into())
    }

    /// A unary number: `n` placeholder elements.
    pub fn unary(n: usize) -> Self {
        Term::Seq(vec![Term::unknown(); n])
    }
}

// Queries

impl Term {
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Seq(_) => TermKind::Seq,
            Term::Text(_) => TermKind::Text,
            Term::Composite(_) => TermKind::Composite,
            Term::Atom(_) => TermKind::Atom,
            Term::Apply { .. } => TermKind::Apply,
            Term::Function(_) => TermKind::Function,
            Term::Ref(_) => TermKind::Ref,
        }
    }

    pub fn as_seq(&self) -> Option<&[Term]> {
        match self {
            Term::Seq(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Term::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Term::Composite(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Atom(Atom::Int(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Term::Atom(Atom::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn is_never(&self) -> bool {
        matches!(self, Term::Atom(Atom::Prim(Prim::Never)))
    }

    /// Element count of a sequence, character count of a text.
    pub fn len(&self) -> Option<usize> {
        match self {
            Term::Seq(items) => Some(items.len()),
            Term::Text(text) => Some(text.chars().count()),
            _ => None,
        }
    }

    /// Number of nodes in the tree. Texts count one node per character.
    ///
    /// Strictly decreases along every shrinking recursion, which is what the
    /// reducer checks for rules declared `Recursion::Shrinking`.
    pub fn size(&self) -> usize {
        match self {
            Term::Seq(items) | Term::Apply { args: items, .. } => {
                1 + items.iter().map(Term::size).sum::<usize>()
            }
            Term::Text(text) => 1 + text.chars().count(),
            Term::Composite(c) => 1 + c.iter().map(|(_, f)| f.value.size()).sum::<usize>(),
            Term::Atom(_) | Term::Ref(_) => 1,
            Term::Function(f) => {
                1 + f.this.as_ref().map_or(0, Term::size)
                    + f.params.iter().map(Term::size).sum::<usize>()
                    + f.ret.size()
            }
        }
    }

    /// Visit every direct child term.
    pub fn for_each_child<'t>(&'t self, mut visit: impl FnMut(&'t Term)) {
        match self {
            Term::Seq(items) | Term::Apply { args: items, .. } => items.iter().for_each(visit),
            Term::Composite(c) => c.iter().for_each(|(_, f)| visit(&f.value)),
            Term::Function(f) => {
                if let Some(this) = &f.this {
                    visit(this);
                }
                f.params.iter().for_each(&mut visit);
                visit(&f.ret);
            }
            Term::Text(_) | Term::Atom(_) | Term::Ref(_) => {}
        }
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl From<Prim> for Term {
    fn from(prim: Prim) -> Self {
        Term::prim(prim)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::int(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::bool(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::text(value)
    }
}

// Display

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Int(n) => write!(f, "{n}"),
            Atom::Bool(b) => write!(f, "{b}"),
            Atom::Prim(p) => f.write_str(p.as_str()),
            Atom::Opaque(name) => write!(f, "{name}"),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Term]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Seq(items) => {
                f.write_str("[")?;
                write_list(f, items)?;
                f.write_str("]")
            }
            Term::Text(text) => write!(f, "{text:?}"),
            Term::Composite(c) => {
                if c.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                for (i, (key, field)) in c.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    if field.is_readonly() {
                        f.write_str("readonly ")?;
                    }
                    let optional = if field.is_optional() { "?" } else { "" };
                    write!(f, "{key}{optional}: {}", field.value)?;
                }
                f.write_str(" }")
            }
            Term::Atom(atom) => write!(f, "{atom}"),
            Term::Apply { head, args } => {
                write!(f, "{head}<")?;
                write_list(f, args)?;
                f.write_str(">")
            }
            Term::Function(shape) => {
                if shape.kind == FnKind::Construct {
                    f.write_str("new ")?;
                }
                f.write_str("(")?;
                if let Some(this) = &shape.this {
                    write!(f, "this: {this}")?;
                    if !shape.params.is_empty() {
                        f.write_str(", ")?;
                    }
                }
                write_list(f, &shape.params)?;
                write!(f, ") => {}", shape.ret)
            }
            Term::Ref(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests;
