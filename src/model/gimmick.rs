//! Definition of [`Gimmick`], a non-note timeline event.

use crate::command::{GimmickType, time::ObjTime};

use super::ChartObject;

/// A time signature, `upper / lower`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSignature {
    /// Numerator, the beats in a measure.
    pub upper: i32,
    /// Denominator, the note value of a beat.
    pub lower: i32,
}

impl TimeSignature {
    /// Create a new time signature.
    #[must_use]
    pub const fn new(upper: i32, lower: i32) -> Self {
        Self { upper, lower }
    }

    /// The length of a measure relative to 4/4.
    #[must_use]
    pub fn ratio(self) -> f64 {
        f64::from(self.upper) / f64::from(self.lower)
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

impl std::fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.upper, self.lower)
    }
}

/// The kind of a gimmick along with its value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GimmickKind {
    /// Tempo change to the beats per minute.
    BeatsPerMinute(f64),
    /// Time signature change.
    TimeSignature(TimeSignature),
    /// Scroll speed change to the factor.
    HiSpeed(f64),
    /// Start of a reverse section.
    ReverseEffectStart,
    /// End of the reverse effect.
    ReverseEffectEnd,
    /// End of the notes mirrored by the reverse.
    ReverseNoteEnd,
    /// Start of a stop.
    StopStart,
    /// End of a stop.
    StopEnd,
}

impl GimmickKind {
    /// The value-less type of the gimmick.
    #[must_use]
    pub const fn gimmick_type(&self) -> GimmickType {
        match self {
            Self::BeatsPerMinute(_) => GimmickType::BeatsPerMinute,
            Self::TimeSignature(_) => GimmickType::TimeSignature,
            Self::HiSpeed(_) => GimmickType::HiSpeed,
            Self::ReverseEffectStart => GimmickType::ReverseEffectStart,
            Self::ReverseEffectEnd => GimmickType::ReverseEffectEnd,
            Self::ReverseNoteEnd => GimmickType::ReverseNoteEnd,
            Self::StopStart => GimmickType::StopStart,
            Self::StopEnd => GimmickType::StopEnd,
        }
    }
}

/// A gimmick on the chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gimmick {
    /// The time offset in the chart.
    pub offset: ObjTime,
    /// The absolute time in milliseconds, computed from the tempo timeline.
    pub time: f64,
    /// The kind and value.
    pub kind: GimmickKind,
}

impl Gimmick {
    /// Create a new untimed gimmick.
    #[must_use]
    pub const fn new(offset: ObjTime, kind: GimmickKind) -> Self {
        Self {
            offset,
            time: 0.0,
            kind,
        }
    }

    /// The value-less type of the gimmick.
    #[must_use]
    pub const fn gimmick_type(&self) -> GimmickType {
        self.kind.gimmick_type()
    }

    /// The hi-speed factor, if this is a hi-speed change.
    #[must_use]
    pub const fn hi_speed(&self) -> Option<f64> {
        match self.kind {
            GimmickKind::HiSpeed(speed) => Some(speed),
            _ => None,
        }
    }
}

impl ChartObject for Gimmick {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio() {
        assert!((TimeSignature::new(3, 4).ratio() - 0.75).abs() < f64::EPSILON);
        assert!((TimeSignature::default().ratio() - 1.0).abs() < f64::EPSILON);
        assert_eq!(TimeSignature::new(7, 8).to_string(), "7/8");
    }

    #[test]
    fn kinds() {
        let gimmick = Gimmick::new(ObjTime::new(2, 0), GimmickKind::HiSpeed(4.5));
        assert_eq!(gimmick.gimmick_type(), GimmickType::HiSpeed);
        assert_eq!(gimmick.hi_speed(), Some(4.5));
        let stop = Gimmick::new(ObjTime::new(2, 0), GimmickKind::StopStart);
        assert_eq!(stop.hi_speed(), None);
    }
}
