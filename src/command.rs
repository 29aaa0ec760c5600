//! Definitions of the closed vocabularies used in MER charts, and the numeric id tables that map
//! chart fields onto them.
//!
//! Every id table here is an exhaustive `match`, so adding or removing a variant is checked by the
//! compiler at each mapping site.

pub mod mixin;
pub mod time;

/// The object id of a note line, the third field of a body line.
pub const NOTE_OBJECT_ID: i32 = 1;
/// The object id of a no-op line.
pub const NONE_OBJECT_ID: i32 = 0;

/// The kind of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoteType {
    /// Unknown note type id.
    #[default]
    None,
    /// A plain tap.
    Touch,
    /// A snap towards the center.
    SnapForward,
    /// A snap away from the center.
    SnapBackward,
    /// A swipe in clockwise direction.
    SwipeClockwise,
    /// A swipe in counterclockwise direction.
    SwipeCounterclockwise,
    /// The head of a hold chain.
    HoldStart,
    /// An intermediate point of a hold chain.
    HoldSegment,
    /// The tail of a hold chain.
    HoldEnd,
    /// A note cleared by keeping the hand on it.
    Chain,
    /// Adds a mask over the lane.
    MaskAdd,
    /// Removes a mask from the lane.
    MaskRemove,
    /// Marks the end of the chart.
    EndChart,
}

/// The bonus flavor of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BonusType {
    /// A normal note.
    #[default]
    None,
    /// A bonus note.
    Bonus,
    /// An R note.
    RNote,
}

impl NoteType {
    /// Maps a note type id onto its [`NoteType`] and [`BonusType`].
    ///
    /// Ids outside the table map to `(NoteType::None, BonusType::None)`.
    #[must_use]
    pub const fn from_id(id: i32) -> (Self, BonusType) {
        match id {
            1 => (Self::Touch, BonusType::None),
            2 => (Self::Touch, BonusType::Bonus),
            20 => (Self::Touch, BonusType::RNote),
            3 => (Self::SnapForward, BonusType::None),
            21 => (Self::SnapForward, BonusType::RNote),
            4 => (Self::SnapBackward, BonusType::None),
            22 => (Self::SnapBackward, BonusType::RNote),
            5 => (Self::SwipeClockwise, BonusType::None),
            6 => (Self::SwipeClockwise, BonusType::Bonus),
            23 => (Self::SwipeClockwise, BonusType::RNote),
            7 => (Self::SwipeCounterclockwise, BonusType::None),
            8 => (Self::SwipeCounterclockwise, BonusType::Bonus),
            24 => (Self::SwipeCounterclockwise, BonusType::RNote),
            9 => (Self::HoldStart, BonusType::None),
            25 => (Self::HoldStart, BonusType::RNote),
            10 => (Self::HoldSegment, BonusType::None),
            11 => (Self::HoldEnd, BonusType::None),
            12 => (Self::MaskAdd, BonusType::None),
            13 => (Self::MaskRemove, BonusType::None),
            14 => (Self::EndChart, BonusType::None),
            16 => (Self::Chain, BonusType::None),
            26 => (Self::Chain, BonusType::RNote),
            _ => (Self::None, BonusType::None),
        }
    }

    /// Whether the note is a part of a hold chain.
    #[must_use]
    pub const fn is_hold(self) -> bool {
        matches!(self, Self::HoldStart | Self::HoldSegment | Self::HoldEnd)
    }

    /// Whether the note may declare a reference to the next hold note.
    #[must_use]
    pub const fn is_hold_link(self) -> bool {
        matches!(self, Self::HoldStart | Self::HoldSegment)
    }

    /// Whether the note is a continuation of a hold, and so does not count as a separate hit.
    #[must_use]
    pub const fn is_hold_continuation(self) -> bool {
        matches!(self, Self::HoldSegment | Self::HoldEnd)
    }

    /// Whether the note is a swipe.
    #[must_use]
    pub const fn is_swipe(self) -> bool {
        matches!(self, Self::SwipeClockwise | Self::SwipeCounterclockwise)
    }

    /// Whether the note is a snap.
    #[must_use]
    pub const fn is_snap(self) -> bool {
        matches!(self, Self::SnapForward | Self::SnapBackward)
    }

    /// Whether the note is a mask add or remove.
    #[must_use]
    pub const fn is_mask(self) -> bool {
        matches!(self, Self::MaskAdd | Self::MaskRemove)
    }
}

impl std::fmt::Display for NoteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "None",
            Self::Touch => "Touch",
            Self::SnapForward => "SnapForward",
            Self::SnapBackward => "SnapBackward",
            Self::SwipeClockwise => "SwipeClockwise",
            Self::SwipeCounterclockwise => "SwipeCounterclockwise",
            Self::HoldStart => "HoldStart",
            Self::HoldSegment => "HoldSegment",
            Self::HoldEnd => "HoldEnd",
            Self::Chain => "Chain",
            Self::MaskAdd => "MaskAdd",
            Self::MaskRemove => "MaskRemove",
            Self::EndChart => "EndChart",
        };
        f.write_str(name)
    }
}

/// The direction a mask grows or shrinks in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskDirection {
    /// Counterclockwise, id `0`.
    Counterclockwise,
    /// Clockwise, id `1`.
    Clockwise,
    /// From the center outwards, id `2`.
    Center,
    /// Not a mask, or an unknown id.
    #[default]
    None,
}

impl MaskDirection {
    /// Maps a direction id onto its [`MaskDirection`].
    #[must_use]
    pub const fn from_id(id: i32) -> Self {
        match id {
            0 => Self::Counterclockwise,
            1 => Self::Clockwise,
            2 => Self::Center,
            _ => Self::None,
        }
    }
}

/// The kind of a gimmick, a non-note timeline event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GimmickType {
    /// Tempo change, id `2`.
    BeatsPerMinute,
    /// Time signature change, id `3`.
    TimeSignature,
    /// Scroll speed change, id `5`.
    HiSpeed,
    /// Start of a reverse section, id `6`.
    ReverseEffectStart,
    /// End of the reverse effect, id `7`.
    ReverseEffectEnd,
    /// End of the notes mirrored by the reverse, id `8`.
    ReverseNoteEnd,
    /// Start of a stop, id `9`.
    StopStart,
    /// End of a stop, id `10`.
    StopEnd,
}

impl GimmickType {
    /// Maps a gimmick object id onto its [`GimmickType`], or `None` for ids outside the table.
    #[must_use]
    pub const fn from_id(id: i32) -> Option<Self> {
        Some(match id {
            2 => Self::BeatsPerMinute,
            3 => Self::TimeSignature,
            5 => Self::HiSpeed,
            6 => Self::ReverseEffectStart,
            7 => Self::ReverseEffectEnd,
            8 => Self::ReverseNoteEnd,
            9 => Self::StopStart,
            10 => Self::StopEnd,
            _ => return None,
        })
    }
}

impl std::fmt::Display for GimmickType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::BeatsPerMinute => "BeatsPerMinute",
            Self::TimeSignature => "TimeSignature",
            Self::HiSpeed => "HiSpeed",
            Self::ReverseEffectStart => "ReverseEffectStart",
            Self::ReverseEffectEnd => "ReverseEffectEnd",
            Self::ReverseNoteEnd => "ReverseNoteEnd",
            Self::StopStart => "StopStart",
            Self::StopEnd => "StopEnd",
        };
        f.write_str(name)
    }
}

/// Which hand is expected to hit a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    /// The left hand.
    Left,
    /// Either hand.
    #[default]
    Ambiguous,
    /// The right hand.
    Right,
}

impl Parity {
    /// The signed value of the parity: `-1` for left, `0` for ambiguous and `1` for right.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Left => -1,
            Self::Ambiguous => 0,
            Self::Right => 1,
        }
    }
}

impl std::fmt::Display for Parity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Left => "Left",
            Self::Ambiguous => "Ambiguous",
            Self::Right => "Right",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_note_id_is_typed() {
        let listed = [
            1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 16, 20, 21, 22, 23, 24, 25, 26,
        ];
        for id in listed {
            assert_ne!(NoteType::from_id(id).0, NoteType::None, "id {id}");
        }
        for id in [0, 15, 17, 19, 27, -1] {
            assert_eq!(NoteType::from_id(id), (NoteType::None, BonusType::None));
        }
    }

    #[test]
    fn bonus_flavors() {
        assert_eq!(
            NoteType::from_id(6),
            (NoteType::SwipeClockwise, BonusType::Bonus)
        );
        assert_eq!(NoteType::from_id(25), (NoteType::HoldStart, BonusType::RNote));
        assert_eq!(NoteType::from_id(16), (NoteType::Chain, BonusType::None));
    }

    #[test]
    fn gimmick_table() {
        assert_eq!(GimmickType::from_id(2), Some(GimmickType::BeatsPerMinute));
        assert_eq!(GimmickType::from_id(10), Some(GimmickType::StopEnd));
        assert_eq!(GimmickType::from_id(4), None);
        assert_eq!(GimmickType::from_id(11), None);
    }

    #[test]
    fn mask_directions() {
        assert_eq!(MaskDirection::from_id(0), MaskDirection::Counterclockwise);
        assert_eq!(MaskDirection::from_id(2), MaskDirection::Center);
        assert_eq!(MaskDirection::from_id(3), MaskDirection::None);
    }
}
