//! Entry-wise composite rebuilding (mapped types).

use morph_ir::{Composite, Field, MapTemplate, ModifierEdit, Modifiers, Name, Term, TermKind};

use crate::captures::CaptureSet;
use crate::errors::{expected_kind, ReduceResult};
use crate::rewriter::{build, check_guard, Reentry};

/// Rebuild the composite produced by `map.source` entry by entry.
pub(crate) fn map_entries(
    map: &MapTemplate,
    captures: &CaptureSet,
    cx: &mut dyn Reentry,
) -> ReduceResult {
    let source = build(&map.source, captures, cx)?;
    let entries = match cx.decls().resolve(&source) {
        Term::Composite(c) => c.clone(),
        other => return Err(expected_kind(TermKind::Composite, other)),
    };

    let mut out = Composite::new();
    for (key, field) in entries.iter() {
        let scoped = captures.with_entry(key, &field.value);

        if let Some(filter) = &map.filter {
            if !check_guard(filter, &scoped, cx)? {
                continue;
            }
        }

        let new_key = match &map.key {
            None => key.clone(),
            Some(template) => {
                let built = build(template, &scoped, cx)?;
                match cx.decls().resolve(&built) {
                    Term::Text(text) => Name::from(text.as_str()),
                    t if t.is_never() => continue,
                    other => return Err(expected_kind(TermKind::Text, other)),
                }
            }
        };

        let value = build(&map.value, &scoped, cx)?;
        let mut modifiers = field.modifiers;
        edit(&mut modifiers, Modifiers::READONLY, map.readonly);
        edit(&mut modifiers, Modifiers::OPTIONAL, map.optional);

        tracing::trace!(from = %key, to = %new_key, "mapped entry");
        out.insert(new_key, Field { value, modifiers });
    }
    Ok(Term::Composite(out))
}

#[inline]
fn edit(modifiers: &mut Modifiers, flag: Modifiers, how: ModifierEdit) {
    match how {
        ModifierEdit::Keep => {}
        ModifierEdit::Add => modifiers.insert(flag),
        ModifierEdit::Remove => modifiers.remove(flag),
    }
}
