//! Rewrite templates.
//!
//! A [`Template`] is an expression over the captures of one match. Evaluating
//! it (in `morph_patterns`) builds a new term: sequences by splicing, texts by
//! concatenation, composites by re-keying entries of a source composite.
//!
//! Two nodes re-enter reduction: [`Template::Reduce`] feeds a term back into
//! the enclosing rule, [`Template::Call`] hands a term to another rule.

use crate::{FnKind, Name, Rule, Term};

/// Capture name bound to the current key while mapping composite entries.
pub const KEY_BINDING: &str = "key";

/// Capture name bound to the current value while mapping composite entries.
pub const VALUE_BINDING: &str = "value";

/// Expression over a capture set that constructs a new term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Template {
    /// The term bound to a capture.
    Capture(Name),
    Literal(Term),
    /// Sequence assembled from elements and spliced sequences.
    Seq(Vec<SeqItem>),
    /// Text concatenated from literal pieces and inserted fragments.
    Text(Vec<TextPiece>),
    /// Case transform of a text fragment.
    Case(CaseOp, Box<Template>),
    /// Length of a sequence or text, as an integer atom.
    Length(Box<Template>),
    Apply { head: Name, args: Vec<Template> },
    Function(Box<FunctionTemplate>),
    /// Entry-wise rebuild of a composite.
    Map(Box<MapTemplate>),
    /// Reduce the built term with the enclosing rule.
    Reduce(Box<Template>),
    /// Reduce the built term with another rule.
    Call(Box<Rule>, Box<Template>),
    /// Fail with an undefined-arithmetic error.
    Undefined(String),
}

/// One item of a sequence template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SeqItem {
    /// A single element.
    Elem(Template),
    /// All elements of a sequence, inline.
    Splice(Template),
}

/// One piece of a text template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextPiece {
    Lit(String),
    /// A text fragment. Integer and boolean atoms are rendered in decimal / `true`/`false`.
    Insert(Template),
}

/// Case transforms available to text templates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CaseOp {
    Upper,
    Lower,
    /// First character upper case, rest unchanged.
    Capitalize,
    /// First character lower case, rest unchanged.
    Uncapitalize,
}

impl CaseOp {
    pub fn apply(self, text: &str) -> String {
        match self {
            CaseOp::Upper => text.to_uppercase(),
            CaseOp::Lower => text.to_lowercase(),
            CaseOp::Capitalize | CaseOp::Uncapitalize => {
                let mut chars = text.chars();
                let Some(first) = chars.next() else {
                    return String::new();
                };
                let mut out = String::with_capacity(text.len());
                if self == CaseOp::Capitalize {
                    out.extend(first.to_uppercase());
                } else {
                    out.extend(first.to_lowercase());
                }
                out.push_str(chars.as_str());
                out
            }
        }
    }
}

/// Template for a call or construct signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionTemplate {
    pub kind: FnKind,
    pub this: Option<Template>,
    /// Must build a sequence.
    pub params: Template,
    pub ret: Template,
}

/// How a modifier flag is edited while mapping entries.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModifierEdit {
    #[default]
    Keep,
    Add,
    Remove,
}

/// Entry-wise rebuild of a composite.
///
/// For every entry of `source`, the key and value are bound to
/// [`KEY_BINDING`] and [`VALUE_BINDING`] on top of the current captures, then:
/// - `filter` (if any) must hold, otherwise the entry is dropped;
/// - `key` (if any) builds the new key; a text keeps the entry under that
///   key, the `never` atom drops it;
/// - `value` builds the new value;
/// - the modifier edits apply to the entry's flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapTemplate {
    pub source: Template,
    pub key: Option<Template>,
    pub filter: Option<Guard>,
    pub value: Template,
    pub readonly: ModifierEdit,
    pub optional: ModifierEdit,
}

impl MapTemplate {
    /// Identity mapping over `source`.
    pub fn over(source: Template) -> Self {
        MapTemplate {
            source,
            key: None,
            filter: None,
            value: Template::capture(VALUE_BINDING),
            readonly: ModifierEdit::Keep,
            optional: ModifierEdit::Keep,
        }
    }
}

/// Condition checked after a pattern matched, before its template runs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Guard {
    /// Both sides assignable to each other.
    Equal(Template, Template),
    /// Left side assignable to right side.
    Fits(Template, Template),
    Not(Box<Guard>),
    All(Vec<Guard>),
}

// Builders

impl Template {
    pub fn capture(name: impl Into<Name>) -> Self {
        Template::Capture(name.into())
    }

    pub fn lit(term: impl Into<Term>) -> Self {
        Template::Literal(term.into())
    }

    pub fn seq(items: impl IntoIterator<Item = SeqItem>) -> Self {
        Template::Seq(items.into_iter().collect())
    }

    pub fn text(pieces: impl IntoIterator<Item = TextPiece>) -> Self {
        Template::Text(pieces.into_iter().collect())
    }

    pub fn apply(head: impl Into<Name>, args: impl IntoIterator<Item = Template>) -> Self {
        Template::Apply {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn case(op: CaseOp, inner: Template) -> Self {
        Template::Case(op, Box::new(inner))
    }

    pub fn length(inner: Template) -> Self {
        Template::Length(Box::new(inner))
    }

    pub fn map(map: MapTemplate) -> Self {
        Template::Map(Box::new(map))
    }

    pub fn reduce(inner: Template) -> Self {
        Template::Reduce(Box::new(inner))
    }

    pub fn call(rule: Rule, inner: Template) -> Self {
        Template::Call(Box::new(rule), Box::new(inner))
    }

    pub fn undefined(reason: impl Into<String>) -> Self {
        Template::Undefined(reason.into())
    }

    /// Whether this template (outside nested rules) re-enters its own rule.
    pub fn reduces_self(&self) -> bool {
        match self {
            Template::Reduce(_) => true,
            Template::Capture(_) | Template::Literal(_) | Template::Undefined(_) => false,
            Template::Seq(items) => items.iter().any(|item| match item {
                SeqItem::Elem(t) | SeqItem::Splice(t) => t.reduces_self(),
            }),
            Template::Text(pieces) => pieces.iter().any(|piece| match piece {
                TextPiece::Lit(_) => false,
                TextPiece::Insert(t) => t.reduces_self(),
            }),
            Template::Case(_, inner) | Template::Length(inner) | Template::Call(_, inner) => {
                inner.reduces_self()
            }
            Template::Apply { args, .. } => args.iter().any(Template::reduces_self),
            Template::Function(f) => {
                f.this.as_ref().is_some_and(Template::reduces_self)
                    || f.params.reduces_self()
                    || f.ret.reduces_self()
            }
            Template::Map(map) => {
                map.source.reduces_self()
                    || map.key.as_ref().is_some_and(Template::reduces_self)
                    || map.filter.as_ref().is_some_and(Guard::reduces_self)
                    || map.value.reduces_self()
            }
        }
    }
}

impl Guard {
    pub fn equal(left: Template, right: Template) -> Self {
        Guard::Equal(left, right)
    }

    pub fn fits(sub: Template, sup: Template) -> Self {
        Guard::Fits(sub, sup)
    }

    pub fn reduces_self(&self) -> bool {
        match self {
            Guard::Equal(a, b) | Guard::Fits(a, b) => a.reduces_self() || b.reduces_self(),
            Guard::Not(inner) => inner.reduces_self(),
            Guard::All(guards) => guards.iter().any(Guard::reduces_self),
        }
    }
}

impl SeqItem {
    pub fn elem(template: Template) -> Self {
        SeqItem::Elem(template)
    }

    pub fn splice(template: Template) -> Self {
        SeqItem::Splice(template)
    }
}

impl TextPiece {
    pub fn lit(text: impl Into<String>) -> Self {
        TextPiece::Lit(text.into())
    }

    pub fn insert(template: Template) -> Self {
        TextPiece::Insert(template)
    }
}

#[cfg(test)]
mod tests;
