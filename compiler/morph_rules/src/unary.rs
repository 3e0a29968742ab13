//! Unary arithmetic: natural numbers as sequence lengths.
//!
//! `n` is represented by a sequence of `n` placeholder elements. Every
//! operation is a rule that builds, peels or counts such sequences; integer
//! atoms appear only at the edges, as rule inputs and as `Length` results.
//!
//! Binary operations take the pair `[a, b]` of integer atoms. Accumulator
//! state is threaded through the same rule as a longer tuple, so the seed arm
//! (a pair) and the loop arms (a triple or more) never overlap.
//!
//! Negative operands never reach the accumulator's target length and run into
//! the reducer's step budget. [`Arithmetic`] only accepts unsigned operands.

use morph_ir::{Guard, Pattern, Recursion, Rule, SeqItem, Template, Term, TermKind, Terminal};
use morph_patterns::{arithmetic_undefined, kind_mismatch, ReduceError, ReduceMode};

use crate::{Engine, RuleKind};

/// `n` → `[unknown; n]`.
pub fn to_unary() -> Rule {
    repeat("to_unary", Term::unknown())
}

/// `n` → `[element; n]`.
pub fn build_array(element: Term) -> Rule {
    repeat("build_array", element)
}

fn repeat(name: &'static str, element: Term) -> Rule {
    Rule::new(name)
        .arm(
            Pattern::bind_as("n", Pattern::Kind(TermKind::Atom)),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("n")),
                SeqItem::elem(Template::lit(Term::empty_seq())),
            ])),
        )
        .guarded_arm(
            Pattern::tuple([Pattern::bind("n"), Pattern::bind("acc")]),
            Guard::equal(
                Template::length(Template::capture("acc")),
                Template::capture("n"),
            ),
            Template::capture("acc"),
        )
        .arm(
            Pattern::tuple([Pattern::bind("n"), Pattern::bind("acc")]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("n")),
                SeqItem::elem(Template::seq([
                    SeqItem::splice(Template::capture("acc")),
                    SeqItem::elem(Template::lit(element)),
                ])),
            ])),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

fn unary_of(name: &str) -> Template {
    Template::call(to_unary(), Template::capture(name))
}

fn placeholder() -> SeqItem {
    SeqItem::elem(Template::lit(Term::unknown()))
}

/// `[a, b]` as unary sequences → the unary remainder `a - b`.
///
/// Peels one placeholder off both sides per step. Running out of `a` first
/// means `b > a`.
fn peel() -> Rule {
    Rule::new("peel")
        .arm(
            Pattern::tuple([
                Pattern::head(Pattern::Any, Pattern::bind("a")),
                Pattern::head(Pattern::Any, Pattern::bind("b")),
            ]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("a")),
                SeqItem::elem(Template::capture("b")),
            ])),
        )
        .arm(
            Pattern::tuple([Pattern::bind("rest"), Pattern::empty_seq()]),
            Template::capture("rest"),
        )
        .terminal(Terminal::Undefined("subtrahend exceeds minuend".into()))
        .recursion(Recursion::Shrinking)
}

fn pair() -> Pattern {
    Pattern::tuple([Pattern::bind("a"), Pattern::bind("b")])
}

pub fn add() -> Rule {
    Rule::new("add")
        .arm(
            pair(),
            Template::length(Template::seq([
                SeqItem::splice(unary_of("a")),
                SeqItem::splice(unary_of("b")),
            ])),
        )
        .terminal(Terminal::Unmatched)
}

/// `a - b`; `b > a` is undefined.
pub fn subtract() -> Rule {
    Rule::new("subtract")
        .arm(
            pair(),
            Template::length(Template::call(
                peel(),
                Template::seq([
                    SeqItem::elem(unary_of("a")),
                    SeqItem::elem(unary_of("b")),
                ]),
            )),
        )
        .terminal(Terminal::Unmatched)
}

/// `a * b` as `b` rounds of appending `a` to an accumulator.
pub fn multiply() -> Rule {
    Rule::new("multiply")
        .arm(
            pair(),
            Template::reduce(Template::seq([
                SeqItem::elem(unary_of("a")),
                SeqItem::elem(unary_of("b")),
                SeqItem::elem(Template::lit(Term::empty_seq())),
            ])),
        )
        .arm(
            Pattern::tuple([Pattern::Any, Pattern::empty_seq(), Pattern::bind("acc")]),
            Template::length(Template::capture("acc")),
        )
        .arm(
            Pattern::tuple([Pattern::bind("a"), Pattern::bind("b"), Pattern::bind("acc")]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("a")),
                SeqItem::elem(Template::call(
                    peel(),
                    Template::seq([
                        SeqItem::elem(Template::capture("b")),
                        SeqItem::elem(Template::seq([placeholder()])),
                    ]),
                )),
                SeqItem::elem(Template::seq([
                    SeqItem::splice(Template::capture("a")),
                    SeqItem::splice(Template::capture("acc")),
                ])),
            ])),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

/// `a / b` by repeated subtraction. Division by zero and inexact division
/// are undefined.
pub fn divide() -> Rule {
    Rule::new("divide")
        .arm(
            pair(),
            Template::reduce(Template::seq([
                SeqItem::elem(unary_of("a")),
                SeqItem::elem(unary_of("b")),
                SeqItem::elem(Template::lit(Term::empty_seq())),
            ])),
        )
        .arm(
            Pattern::tuple([Pattern::Any, Pattern::empty_seq(), Pattern::Any]),
            Template::undefined("division by zero"),
        )
        .arm(
            Pattern::tuple([Pattern::empty_seq(), Pattern::Any, Pattern::bind("count")]),
            Template::length(Template::capture("count")),
        )
        .arm(
            Pattern::tuple([Pattern::bind("a"), Pattern::bind("b"), Pattern::bind("count")]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::call(
                    peel(),
                    Template::seq([
                        SeqItem::elem(Template::capture("a")),
                        SeqItem::elem(Template::capture("b")),
                    ]),
                )),
                SeqItem::elem(Template::capture("b")),
                SeqItem::elem(Template::seq([
                    placeholder(),
                    SeqItem::splice(Template::capture("count")),
                ])),
            ])),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

/// `a > b`, by counting up from zero until the counter reaches one of them.
pub fn greater_than() -> Rule {
    let state = || {
        Pattern::tuple([
            Pattern::bind("a"),
            Pattern::bind("b"),
            Pattern::bind("count"),
        ])
    };
    let count_is = |name: &str| {
        Guard::equal(
            Template::length(Template::capture("count")),
            Template::capture(name),
        )
    };
    Rule::new("greater_than")
        .arm(
            pair(),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("a")),
                SeqItem::elem(Template::capture("b")),
                SeqItem::elem(Template::lit(Term::empty_seq())),
            ])),
        )
        .guarded_arm(
            state(),
            Guard::equal(Template::capture("a"), Template::capture("b")),
            Template::lit(false),
        )
        .guarded_arm(state(), count_is("b"), Template::lit(true))
        .guarded_arm(state(), count_is("a"), Template::lit(false))
        .arm(
            state(),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("a")),
                SeqItem::elem(Template::capture("b")),
                SeqItem::elem(Template::seq([
                    placeholder(),
                    SeqItem::splice(Template::capture("count")),
                ])),
            ])),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

/// The `n`th Fibonacci number, 1-based: `1, 1, 2, 3, 5, …`; `0` gives `0`.
///
/// State is `[previous, current, index, n]`.
pub fn fibonacci() -> Rule {
    Rule::new("fibonacci")
        .arm(
            Pattern::bind_as("n", Pattern::Kind(TermKind::Atom)),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::seq([placeholder()])),
                SeqItem::elem(Template::lit(Term::empty_seq())),
                SeqItem::elem(Template::lit(Term::empty_seq())),
                SeqItem::elem(Template::capture("n")),
            ])),
        )
        .guarded_arm(
            Pattern::tuple([
                Pattern::Any,
                Pattern::bind("current"),
                Pattern::bind("index"),
                Pattern::bind("n"),
            ]),
            Guard::equal(
                Template::length(Template::capture("index")),
                Template::capture("n"),
            ),
            Template::length(Template::capture("current")),
        )
        .arm(
            Pattern::tuple([
                Pattern::bind("previous"),
                Pattern::bind("current"),
                Pattern::bind("index"),
                Pattern::bind("n"),
            ]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("current")),
                SeqItem::elem(Template::seq([
                    SeqItem::splice(Template::capture("previous")),
                    SeqItem::splice(Template::capture("current")),
                ])),
                SeqItem::elem(Template::seq([
                    SeqItem::splice(Template::capture("index")),
                    placeholder(),
                ])),
                SeqItem::elem(Template::capture("n")),
            ])),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

/// Character count of a text, one placeholder per character.
pub fn str_len() -> Rule {
    Rule::new("str_len")
        .arm(
            Pattern::bind_as("text", Pattern::Kind(TermKind::Text)),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("text")),
                SeqItem::elem(Template::lit(Term::empty_seq())),
            ])),
        )
        .arm(
            Pattern::tuple([
                Pattern::first_char(Pattern::Any, Pattern::bind("rest")),
                Pattern::bind("count"),
            ]),
            Template::reduce(Template::seq([
                SeqItem::elem(Template::capture("rest")),
                SeqItem::elem(Template::seq([
                    placeholder(),
                    SeqItem::splice(Template::capture("count")),
                ])),
            ])),
        )
        .arm(
            Pattern::tuple([Pattern::Any, Pattern::bind("count")]),
            Template::length(Template::capture("count")),
        )
        .terminal(Terminal::Unmatched)
        .recursion(Recursion::Bounded)
}

/// Integer arithmetic over `u64`, computed by the unary rules.
///
/// Each call builds and reduces sequences as long as its operands and result,
/// so this is meant for small numbers.
pub struct Arithmetic {
    engine: Engine,
}

impl Arithmetic {
    pub fn new() -> Self {
        Self::with_mode(ReduceMode::default())
    }

    pub fn with_mode(mode: ReduceMode) -> Self {
        Arithmetic {
            engine: Engine::with_mode(mode),
        }
    }

    pub fn add(&mut self, a: u64, b: u64) -> Result<u64, ReduceError> {
        self.binary(RuleKind::Add, a, b)
    }

    /// Fails with `ArithmeticUndefined` when `b > a`.
    pub fn subtract(&mut self, a: u64, b: u64) -> Result<u64, ReduceError> {
        self.binary(RuleKind::Subtract, a, b)
    }

    pub fn multiply(&mut self, a: u64, b: u64) -> Result<u64, ReduceError> {
        self.binary(RuleKind::Multiply, a, b)
    }

    /// Fails with `ArithmeticUndefined` when `b == 0` or `b` does not divide `a`.
    pub fn divide(&mut self, a: u64, b: u64) -> Result<u64, ReduceError> {
        self.binary(RuleKind::Divide, a, b)
    }

    pub fn greater_than(&mut self, a: u64, b: u64) -> Result<bool, ReduceError> {
        let out = self
            .engine
            .apply(RuleKind::GreaterThan, &[], &Term::seq([int(a)?, int(b)?]))?;
        out.as_bool().ok_or_else(|| kind_mismatch("boolean", &out))
    }

    pub fn fibonacci(&mut self, n: u64) -> Result<u64, ReduceError> {
        let out = self.engine.apply(RuleKind::Fibonacci, &[], &int(n)?)?;
        natural(&out)
    }

    fn binary(&mut self, kind: RuleKind, a: u64, b: u64) -> Result<u64, ReduceError> {
        let out = self
            .engine
            .apply(kind, &[], &Term::seq([int(a)?, int(b)?]))?;
        natural(&out)
    }
}

impl Default for Arithmetic {
    fn default() -> Self {
        Self::new()
    }
}

fn int(n: u64) -> Result<Term, ReduceError> {
    i64::try_from(n)
        .map(Term::int)
        .map_err(|_| arithmetic_undefined(format!("{n} is out of range")))
}

fn natural(term: &Term) -> Result<u64, ReduceError> {
    term.as_int()
        .and_then(|n| u64::try_from(n).ok())
        .ok_or_else(|| kind_mismatch("natural number", term))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
