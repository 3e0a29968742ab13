//! Template-literal text matching.
//!
//! Segments are consumed left to right:
//! - a literal must be a prefix of what is left (alternatives in order);
//! - a capture followed by another capture takes exactly one character;
//! - a capture followed by the final literal leaves that literal anchored at
//!   the end of the text;
//! - a capture followed by any other literal stops at the literal's leftmost
//!   occurrence;
//! - a final capture takes the remainder.
//!
//! Only literal alternatives are backtracked over. A capture never retries a
//! later occurrence of its separator.

use smallvec::SmallVec;

use morph_ir::{Name, Segment, Term, TextPattern};

use crate::captures::CaptureSet;

type Found<'p, 't> = SmallVec<[(&'p Name, &'t str); 4]>;

/// Match `text` against `pattern`, binding captures into `captures`.
pub(crate) fn match_text(text: &str, pattern: &TextPattern, captures: &mut CaptureSet) -> bool {
    let mut found = Found::new();
    if !split(&pattern.segments, text, &mut found) {
        return false;
    }
    found
        .into_iter()
        .all(|(name, part)| captures.bind(name, Term::text(part)))
}

fn split<'p, 't>(segments: &'p [Segment], rest: &'t str, found: &mut Found<'p, 't>) -> bool {
    let Some((first, tail)) = segments.split_first() else {
        return rest.is_empty();
    };

    let name = match first {
        Segment::Lit(alternatives) => {
            return alternatives.iter().any(|alt| {
                let mark = found.len();
                if let Some(after) = rest.strip_prefix(alt.as_str()) {
                    if split(tail, after, found) {
                        return true;
                    }
                }
                found.truncate(mark);
                false
            });
        }
        Segment::Capture(name) => Some(name),
        Segment::Hole => None,
    };

    match tail.split_first() {
        None => {
            record(found, name, rest);
            true
        }
        Some((Segment::Capture(_) | Segment::Hole, _)) => {
            let Some(c) = rest.chars().next() else {
                return false;
            };
            let (head, after) = rest.split_at(c.len_utf8());
            let mark = found.len();
            record(found, name, head);
            if split(tail, after, found) {
                return true;
            }
            found.truncate(mark);
            false
        }
        Some((Segment::Lit(alternatives), after_lit)) => {
            let anchored = after_lit.is_empty();
            alternatives.iter().any(|alt| {
                let cut = if anchored {
                    rest.strip_suffix(alt.as_str()).map(str::len)
                } else {
                    rest.find(alt.as_str())
                };
                let Some(cut) = cut else {
                    return false;
                };
                let mark = found.len();
                record(found, name, &rest[..cut]);
                if split(after_lit, &rest[cut + alt.len()..], found) {
                    return true;
                }
                found.truncate(mark);
                false
            })
        }
    }
}

#[inline]
fn record<'p, 't>(found: &mut Found<'p, 't>, name: Option<&'p Name>, part: &'t str) {
    if let Some(name) = name {
        found.push((name, part));
    }
}
