//! Resolves the author line indices of hold references into [`NoteId`] links.

use std::collections::{BTreeMap, HashMap};

use crate::{
    command::mixin::{SourceRangeMixin, SourceRangeMixinExt},
    model::{NoteId, note::Note},
};

use super::{ParseWarning, ParseWarningWithRange};

/// Author line indices of notes, and the hold references declared on them.
#[derive(Debug, Default)]
pub(crate) struct ReferenceTable {
    notes_by_line: HashMap<i32, NoteId>,
    refs_by_line: BTreeMap<i32, SourceRangeMixin<i32>>,
}

impl ReferenceTable {
    /// Records a note under its line index. A later note with the same index replaces it.
    pub(crate) fn insert_note(&mut self, line_index: i32, id: NoteId) {
        self.notes_by_line.insert(line_index, id);
    }

    /// Records that the note at `line_index` refers to the note at `target`.
    pub(crate) fn insert_reference(&mut self, line_index: i32, target: SourceRangeMixin<i32>) {
        self.refs_by_line.insert(line_index, target);
    }

    /// Links every declared reference whose target exists, in both directions.
    ///
    /// Unresolved targets are left unlinked and reported as warnings.
    pub(crate) fn link(&self, objects: &mut [Note]) -> Vec<ParseWarningWithRange> {
        let mut warnings = vec![];
        let mut linked = 0usize;
        for (&from_line, target) in &self.refs_by_line {
            let to_line = *target.content();
            let Some(&from) = self.notes_by_line.get(&from_line) else {
                continue;
            };
            let Some(&to) = self.notes_by_line.get(&to_line) else {
                warnings.push(
                    ParseWarning::UnresolvedReference {
                        from: from_line,
                        to: to_line,
                    }
                    .into_wrapper(target),
                );
                continue;
            };
            if let Some(note) = objects.get_mut(from.0) {
                note.next_ref = Some(to);
            }
            if let Some(note) = objects.get_mut(to.0) {
                note.prev_ref = Some(from);
            }
            linked += 1;
        }
        log::debug!("linked {linked} hold references");
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::time::ObjTime;

    fn hold(id: usize, type_id: i32) -> Note {
        Note::new(NoteId(id), ObjTime::new(0, id as i32 * 240), type_id, 0, 10)
    }

    #[test]
    fn links_chain_both_ways() {
        let mut objects = vec![hold(0, 9), hold(1, 10), hold(2, 11)];
        let mut table = ReferenceTable::default();
        table.insert_note(10, NoteId(0));
        table.insert_note(11, NoteId(1));
        table.insert_note(12, NoteId(2));
        table.insert_reference(10, 11_i32.into_wrapper_range(0..1));
        table.insert_reference(11, 12_i32.into_wrapper_range(1..2));

        let warnings = table.link(&mut objects);

        assert!(warnings.is_empty());
        let links: Vec<_> = objects.iter().map(|n| (n.prev_ref, n.next_ref)).collect();
        assert_eq!(
            links,
            vec![
                (None, Some(NoteId(1))),
                (Some(NoteId(0)), Some(NoteId(2))),
                (Some(NoteId(1)), None),
            ]
        );
    }

    #[test]
    fn unresolved_target_stays_unlinked() {
        let mut objects = vec![hold(0, 9)];
        let mut table = ReferenceTable::default();
        table.insert_note(5, NoteId(0));
        table.insert_reference(5, 7_i32.into_wrapper_range(3..9));

        let warnings = table.link(&mut objects);

        assert_eq!(objects[0].next_ref, None);
        assert_eq!(
            warnings,
            vec![ParseWarning::UnresolvedReference { from: 5, to: 7 }.into_wrapper_range(3..9)]
        );
    }
}
