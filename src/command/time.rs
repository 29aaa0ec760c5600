//! Definitions of time in MER.

/// Ticks in one measure. The fundamental time unit of a chart.
pub const TICKS_PER_MEASURE: i32 = 1920;

/// A time of the object on the score, addressed by measure and tick.
///
/// Objects are ordered by [`ObjTime::global_tick`], so a tick past the measure length addresses
/// the same instant as the matching tick of a later measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjTime {
    /// The measure, or bar, where the object is in.
    pub measure: i32,
    /// The tick offset in the measure.
    pub tick: i32,
}

impl ObjTime {
    /// Create a new time.
    #[must_use]
    pub const fn new(measure: i32, tick: i32) -> Self {
        Self { measure, tick }
    }

    /// The absolute tick from the chart start, `measure * 1920 + tick`.
    #[must_use]
    pub const fn global_tick(self) -> i64 {
        self.measure as i64 * TICKS_PER_MEASURE as i64 + self.tick as i64
    }

    /// The position in fractional measures.
    #[must_use]
    pub fn measures(self) -> f64 {
        self.global_tick() as f64 / f64::from(TICKS_PER_MEASURE)
    }
}

impl std::fmt::Display for ObjTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.measure, self.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_global_tick() {
        let a = ObjTime::new(1, 1919);
        let b = ObjTime::new(2, 0);
        let overflowing = ObjTime::new(1, 1920);
        assert!(a.global_tick() < b.global_tick());
        assert_eq!(b.global_tick(), overflowing.global_tick());
        assert_ne!(b, overflowing);
    }

    #[test]
    fn measures_are_fractional() {
        assert!((ObjTime::new(2, 960).measures() - 2.5).abs() < f64::EPSILON);
        assert_eq!(ObjTime::new(3, 15).to_string(), "3 15");
    }
}
