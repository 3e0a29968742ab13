//! Shape patterns.
//!
//! A [`Pattern`] describes how to decompose a term and which sub-terms to
//! capture. Patterns nest: the remainder of a head/tail split, an element of
//! an exact tuple, or the value of a composite field is itself a pattern.
//!
//! | Shape | Constructor |
//! |-------|-------------|
//! | `[infer F, ...infer R]` | [`Pattern::head`] |
//! | `[...infer O, infer L]` | [`Pattern::tail`] |
//! | `[unknown, ...infer M, unknown]` | [`Pattern::slice`] |
//! | `[infer A, infer B]` | [`Pattern::tuple`] |
//! | `` `${infer P}${sep}${infer S}` `` | [`Pattern::text`] with [`Segment`]s |
//!
//! Matching itself lives in `morph_patterns`.

use rustc_hash::FxHashSet;

use crate::{FnKind, Name, Term, TermKind};

/// Structural description used to decompose and capture parts of a term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Matches anything, binds nothing.
    Any,
    /// Matches anything, binds it.
    Bind(Name),
    /// Binds the whole term after the inner pattern matched.
    As(Name, Box<Pattern>),
    /// Structural equality with a fixed term.
    Literal(Term),
    /// Term (after resolving references) has the given kind.
    Kind(TermKind),
    /// Term is assignable to the given term.
    Fits(Term),
    /// First alternative that matches wins.
    Alt(Vec<Pattern>),
    /// Sequence decomposition.
    Seq(SeqPattern),
    /// Text decomposition treating each character as one element.
    Chars(SeqPattern),
    /// Template-literal style text decomposition.
    Text(TextPattern),
    /// Composite with at least the listed fields. Extra keys are allowed.
    Composite(Vec<FieldPattern>),
    /// Application with the given head and argument count.
    Apply { head: Name, args: Vec<Pattern> },
    Function(Box<FunctionPattern>),
}

/// `[prefix..., ...rest, suffix...]`
///
/// With `rest: None` the element count must equal `prefix.len() + suffix.len()`.
/// With a rest pattern, the middle run (possibly empty) is matched against it
/// as a single sequence (or text, for [`Pattern::Chars`]).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeqPattern {
    pub prefix: Vec<Pattern>,
    pub rest: Option<Box<Pattern>>,
    pub suffix: Vec<Pattern>,
}

impl SeqPattern {
    /// Minimum number of elements a matching term must have.
    pub fn anchor_len(&self) -> usize {
        self.prefix.len() + self.suffix.len()
    }
}

/// Text pattern built from literal and capture segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextPattern {
    pub segments: Vec<Segment>,
}

/// One piece of a [`TextPattern`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// One of several literal strings, tried in order.
    Lit(Vec<String>),
    /// A run of characters, bound to a name.
    Capture(Name),
    /// A run of characters, not bound.
    Hole,
}

impl Segment {
    pub fn lit(text: impl Into<String>) -> Self {
        Segment::Lit(vec![text.into()])
    }

    pub fn one_of<S: Into<String>>(alternatives: impl IntoIterator<Item = S>) -> Self {
        Segment::Lit(alternatives.into_iter().map(Into::into).collect())
    }

    pub fn capture(name: impl Into<Name>) -> Self {
        Segment::Capture(name.into())
    }

    #[inline]
    pub fn is_literal(&self) -> bool {
        matches!(self, Segment::Lit(_))
    }
}

/// A key of a composite pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPattern {
    pub key: Name,
    pub presence: FieldPresence,
    pub value: Pattern,
}

/// Which declarations of a key a [`FieldPattern`] accepts.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FieldPresence {
    /// Present and not optional.
    #[default]
    Required,
    /// Present, optional or not.
    Declared,
    /// Present, or absent; an absent key matches its value pattern against
    /// `unknown`.
    MaybeAbsent,
}

/// Pattern over a call or construct signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionPattern {
    pub kind: FnKind,
    /// Receiver pattern. A signature without a receiver offers `unknown`.
    pub this: Option<Pattern>,
    /// Matched against the parameters as one sequence.
    pub params: Pattern,
    pub ret: Pattern,
}

// Builders

impl Pattern {
    pub fn bind(name: impl Into<Name>) -> Self {
        Pattern::Bind(name.into())
    }

    pub fn bind_as(name: impl Into<Name>, inner: Pattern) -> Self {
        Pattern::As(name.into(), Box::new(inner))
    }

    pub fn lit(term: impl Into<Term>) -> Self {
        Pattern::Literal(term.into())
    }

    /// `[first, ...rest]`
    pub fn head(first: Pattern, rest: Pattern) -> Self {
        Pattern::Seq(SeqPattern {
            prefix: vec![first],
            rest: Some(Box::new(rest)),
            suffix: Vec::new(),
        })
    }

    /// `[...init, last]`
    pub fn tail(init: Pattern, last: Pattern) -> Self {
        Pattern::Seq(SeqPattern {
            prefix: Vec::new(),
            rest: Some(Box::new(init)),
            suffix: vec![last],
        })
    }

    /// `[prefix..., ...middle, suffix...]`
    pub fn slice(prefix: Vec<Pattern>, middle: Pattern, suffix: Vec<Pattern>) -> Self {
        Pattern::Seq(SeqPattern {
            prefix,
            rest: Some(Box::new(middle)),
            suffix,
        })
    }

    /// Exact-length sequence.
    pub fn tuple(items: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Seq(SeqPattern {
            prefix: items.into_iter().collect(),
            rest: None,
            suffix: Vec::new(),
        })
    }

    /// The empty sequence.
    pub fn empty_seq() -> Self {
        Pattern::tuple([])
    }

    /// Text split into first character and remainder.
    pub fn first_char(first: Pattern, rest: Pattern) -> Self {
        Pattern::Chars(SeqPattern {
            prefix: vec![first],
            rest: Some(Box::new(rest)),
            suffix: Vec::new(),
        })
    }

    /// Text split into everything but the last character, and the last character.
    pub fn last_char(init: Pattern, last: Pattern) -> Self {
        Pattern::Chars(SeqPattern {
            prefix: Vec::new(),
            rest: Some(Box::new(init)),
            suffix: vec![last],
        })
    }

    pub fn text(segments: impl IntoIterator<Item = Segment>) -> Self {
        Pattern::Text(TextPattern {
            segments: segments.into_iter().collect(),
        })
    }

    pub fn apply(head: impl Into<Name>, args: impl IntoIterator<Item = Pattern>) -> Self {
        Pattern::Apply {
            head: head.into(),
            args: args.into_iter().collect(),
        }
    }

    pub fn function(kind: FnKind, params: Pattern, ret: Pattern) -> Self {
        Pattern::Function(Box::new(FunctionPattern {
            kind,
            this: None,
            params,
            ret,
        }))
    }

    pub fn method(this: Pattern, params: Pattern, ret: Pattern) -> Self {
        Pattern::Function(Box::new(FunctionPattern {
            kind: FnKind::Call,
            this: Some(this),
            params,
            ret,
        }))
    }
}

// Binding analysis

impl Pattern {
    /// Names bound by every successful match of this pattern.
    ///
    /// For an alternation only names bound by all alternatives count. Names
    /// bound through a [`FieldPresence::MaybeAbsent`] field are included: an
    /// absent field binds them against `unknown`.
    pub fn bound_names(&self) -> FxHashSet<Name> {
        let mut out = FxHashSet::default();
        self.collect_bound(&mut out);
        out
    }

    fn collect_bound(&self, out: &mut FxHashSet<Name>) {
        match self {
            Pattern::Any | Pattern::Literal(_) | Pattern::Kind(_) | Pattern::Fits(_) => {}
            Pattern::Bind(name) => {
                out.insert(name.clone());
            }
            Pattern::As(name, inner) => {
                out.insert(name.clone());
                inner.collect_bound(out);
            }
            Pattern::Alt(alternatives) => {
                let mut sets = alternatives.iter().map(Pattern::bound_names);
                if let Some(first) = sets.next() {
                    let common = sets.fold(first, |acc, set| {
                        acc.intersection(&set).cloned().collect()
                    });
                    out.extend(common);
                }
            }
            Pattern::Seq(seq) | Pattern::Chars(seq) => {
                seq.prefix.iter().for_each(|p| p.collect_bound(out));
                if let Some(rest) = &seq.rest {
                    rest.collect_bound(out);
                }
                seq.suffix.iter().for_each(|p| p.collect_bound(out));
            }
            Pattern::Text(text) => {
                for segment in &text.segments {
                    if let Segment::Capture(name) = segment {
                        out.insert(name.clone());
                    }
                }
            }
            Pattern::Composite(fields) => {
                fields.iter().for_each(|f| f.value.collect_bound(out));
            }
            Pattern::Apply { args, .. } => args.iter().for_each(|p| p.collect_bound(out)),
            Pattern::Function(f) => {
                if let Some(this) = &f.this {
                    this.collect_bound(out);
                }
                f.params.collect_bound(out);
                f.ret.collect_bound(out);
            }
        }
    }
}
