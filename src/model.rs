//! The model of a parsed chart.
//!
//! A [`Chart`] owns every note in one arena, [`Chart::objects`], in file order. All other note
//! lists, and the hold chain links between notes, are [`NoteId`] indices into that arena, so a
//! chart can be cloned or serialized without any graph copying.

pub mod gimmick;
pub mod note;
pub mod timeline;

use crate::command::time::ObjTime;

use self::{
    gimmick::Gimmick,
    note::Note,
    timeline::{Timeline, TimelineEntry},
};

/// An object placed on the chart, whose absolute time is derived from its offset.
pub trait ChartObject {
    /// The measure and tick of the object.
    fn offset(&self) -> ObjTime;
    /// The absolute time in milliseconds.
    fn time(&self) -> f64;
    /// Sets the absolute time in milliseconds.
    fn set_time(&mut self, time: f64);
}

/// An index into [`Chart::objects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteId(pub usize);

/// A fully parsed, linked, timed and parity-tagged chart.
///
/// Built once per parse and never partially updated.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chart {
    pub(crate) objects: Vec<Note>,
    pub(crate) notes: Vec<NoteId>,
    pub(crate) masks: Vec<NoteId>,
    pub(crate) non_segment_notes: Vec<NoteId>,
    pub(crate) timeline: Timeline,
    pub(crate) hi_speed: Vec<Gimmick>,
    pub(crate) stops: Vec<Gimmick>,
    pub(crate) reverses: Vec<Gimmick>,
}

impl Chart {
    /// Every note, including masks, in file order.
    #[must_use]
    pub fn objects(&self) -> &[Note] {
        &self.objects
    }

    /// Looks up a note by its id.
    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.objects.get(id.0)
    }

    fn resolve<'a>(
        &'a self,
        ids: &'a [NoteId],
    ) -> impl DoubleEndedIterator<Item = &'a Note> + Clone {
        ids.iter().filter_map(|&id| self.note(id))
    }

    /// The playable notes, excluding masks, in file order.
    pub fn notes(&self) -> impl DoubleEndedIterator<Item = &Note> + Clone {
        self.resolve(&self.notes)
    }

    /// The ids of [`Chart::notes`].
    #[must_use]
    pub fn note_ids(&self) -> &[NoteId] {
        &self.notes
    }

    /// The mask notes in file order.
    pub fn masks(&self) -> impl DoubleEndedIterator<Item = &Note> + Clone {
        self.resolve(&self.masks)
    }

    /// The playable notes excluding hold segments and hold ends, used for density metrics.
    pub fn non_segment_notes(&self) -> impl DoubleEndedIterator<Item = &Note> + Clone {
        self.resolve(&self.non_segment_notes)
    }

    /// The next note of the hold chain of `note`.
    #[must_use]
    pub fn next_ref(&self, note: &Note) -> Option<&Note> {
        note.next_ref.and_then(|id| self.note(id))
    }

    /// The previous note of the hold chain of `note`.
    #[must_use]
    pub fn prev_ref(&self, note: &Note) -> Option<&Note> {
        note.prev_ref.and_then(|id| self.note(id))
    }

    /// The merged tempo timeline.
    #[must_use]
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// The entries of the merged tempo timeline.
    #[must_use]
    pub fn bgm_data(&self) -> &[TimelineEntry] {
        self.timeline.entries()
    }

    /// The hi-speed changes in file order.
    #[must_use]
    pub fn hi_speed_gimmicks(&self) -> &[Gimmick] {
        &self.hi_speed
    }

    /// The stop starts and ends in file order.
    #[must_use]
    pub fn stop_gimmicks(&self) -> &[Gimmick] {
        &self.stops
    }

    /// The reverse boundaries in file order.
    #[must_use]
    pub fn reverse_gimmicks(&self) -> &[Gimmick] {
        &self.reverses
    }
}
