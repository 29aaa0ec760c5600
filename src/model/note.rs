//! Definition of [`Note`], a playable or mask object placed on the circular lane.

use crate::command::{BonusType, MaskDirection, NoteType, Parity, time::ObjTime};

use super::{ChartObject, NoteId};

/// The number of positions on the circular lane.
pub const LANE_SIZE: i32 = 60;

/// A note on the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    /// Index of this note in [`super::Chart::objects`].
    pub id: NoteId,
    /// The time offset in the chart.
    pub offset: ObjTime,
    /// The absolute time in milliseconds, computed from the tempo timeline.
    pub time: f64,
    /// The starting lane position, `0..60` when well-formed.
    pub position: i32,
    /// The number of lane positions covered, `1..=60` when well-formed.
    pub size: i32,
    /// The kind of the note.
    pub note_type: NoteType,
    /// The bonus flavor of the note.
    pub bonus_type: BonusType,
    /// The direction of a mask note. [`MaskDirection::None`] for other notes.
    pub mask_direction: MaskDirection,
    /// The next note of the hold chain.
    pub next_ref: Option<NoteId>,
    /// The previous note of the hold chain.
    pub prev_ref: Option<NoteId>,
    /// The midpoint on the circular lane, `[0, 60)`.
    pub center_point: f64,
    /// The hand expected to hit this note.
    pub parity: Parity,
}

impl Note {
    /// Creates a note from its type id, before timing and linking.
    #[must_use]
    pub const fn new(id: NoteId, offset: ObjTime, type_id: i32, position: i32, size: i32) -> Self {
        let (note_type, bonus_type) = NoteType::from_id(type_id);
        Self {
            id,
            offset,
            time: 0.0,
            position,
            size,
            note_type,
            bonus_type,
            mask_direction: MaskDirection::None,
            next_ref: None,
            prev_ref: None,
            center_point: 0.0,
            parity: Parity::Ambiguous,
        }
    }

    /// The measure of the note.
    #[must_use]
    pub const fn measure(&self) -> i32 {
        self.offset.measure
    }

    /// The tick of the note in its measure.
    #[must_use]
    pub const fn tick(&self) -> i32 {
        self.offset.tick
    }

    /// Whether the note is a part of a hold chain.
    #[must_use]
    pub const fn is_hold(&self) -> bool {
        self.note_type.is_hold()
    }

    /// Whether the note is a swipe.
    #[must_use]
    pub const fn is_swipe(&self) -> bool {
        self.note_type.is_swipe()
    }

    /// Whether the note is a snap.
    #[must_use]
    pub const fn is_snap(&self) -> bool {
        self.note_type.is_snap()
    }

    /// Whether two notes are placed on the same measure and tick.
    #[must_use]
    pub fn is_simultaneous(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl ChartObject for Note {
    fn offset(&self) -> ObjTime {
        self.offset
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }
}
