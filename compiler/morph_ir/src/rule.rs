//! Rewrite rules.
//!
//! A [`Rule`] is a named, ordered list of arms. Each arm is a pattern, an
//! optional guard and a template. The first arm whose pattern matches and
//! whose guard holds produces the result; when none does, the rule's
//! [`Terminal`] policy decides the outcome.
//!
//! A single-arm rule is the plain `(pattern, template)` pair. Arms whose
//! template contains [`Template::Reduce`](crate::Template::Reduce) make the
//! rule recursive, which must be declared with a [`Recursion`] policy.

use crate::{Guard, Name, Pattern, Template, Term};

/// One `pattern [if guard] => template` case of a rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Arm {
    pub pattern: Pattern,
    pub guard: Option<Guard>,
    pub body: Template,
}

/// What a rule returns when no arm applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// The input term, unchanged.
    #[default]
    Input,
    /// A fixed term.
    Term(Term),
    /// The `never` sentinel.
    Unmatched,
    /// An undefined-arithmetic failure with the given reason.
    Undefined(String),
}

/// How a recursive rule is kept from running forever.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Recursion {
    /// The rule never re-enters itself.
    #[default]
    None,
    /// Every fed-back term must be strictly smaller than the rule's input.
    Shrinking,
    /// Fed-back terms may grow (accumulators, counters); only the reducer's
    /// depth and step limits apply.
    Bounded,
}

/// A named rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub name: Name,
    pub arms: Vec<Arm>,
    pub terminal: Terminal,
    pub recursion: Recursion,
}

impl Rule {
    /// An empty rule: no arms, returns its input, not recursive.
    pub fn new(name: impl Into<Name>) -> Self {
        Rule {
            name: name.into(),
            arms: Vec::new(),
            terminal: Terminal::Input,
            recursion: Recursion::None,
        }
    }

    #[must_use]
    pub fn arm(mut self, pattern: Pattern, body: Template) -> Self {
        self.arms.push(Arm {
            pattern,
            guard: None,
            body,
        });
        self
    }

    #[must_use]
    pub fn guarded_arm(mut self, pattern: Pattern, guard: Guard, body: Template) -> Self {
        self.arms.push(Arm {
            pattern,
            guard: Some(guard),
            body,
        });
        self
    }

    #[must_use]
    pub fn terminal(mut self, terminal: Terminal) -> Self {
        self.terminal = terminal;
        self
    }

    #[must_use]
    pub fn recursion(mut self, recursion: Recursion) -> Self {
        self.recursion = recursion;
        self
    }

    /// Whether any arm re-enters this rule.
    pub fn is_self_referential(&self) -> bool {
        self.arms.iter().any(|arm| {
            arm.body.reduces_self() || arm.guard.as_ref().is_some_and(Guard::reduces_self)
        })
    }
}
