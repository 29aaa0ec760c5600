//! Statistics of a chart: note counts, density, lane usage, skill vector and level estimate.

use num::Integer;

use crate::{
    command::NoteType,
    model::{
        Chart,
        note::{LANE_SIZE, Note},
    },
};

use super::Thresholds;

/// Numbers of playable notes per type. Holds are counted by their starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NoteCounts {
    /// Touch notes.
    pub touch: usize,
    /// Chain notes.
    pub chain: usize,
    /// Hold starts.
    pub hold: usize,
    /// Clockwise swipes.
    pub swipe_clockwise: usize,
    /// Counterclockwise swipes.
    pub swipe_counterclockwise: usize,
    /// Forward snaps.
    pub snap_forward: usize,
    /// Backward snaps.
    pub snap_backward: usize,
}

impl NoteCounts {
    /// Swipes in both directions.
    #[must_use]
    pub const fn swipes(&self) -> usize {
        self.swipe_clockwise + self.swipe_counterclockwise
    }

    /// Snaps in both directions.
    #[must_use]
    pub const fn snaps(&self) -> usize {
        self.snap_forward + self.snap_backward
    }
}

/// Counts the playable notes per type.
#[must_use]
pub fn note_counts(chart: &Chart) -> NoteCounts {
    let mut counts = NoteCounts::default();
    for note in chart.notes() {
        let count = match note.note_type {
            NoteType::Touch => &mut counts.touch,
            NoteType::Chain => &mut counts.chain,
            NoteType::HoldStart => &mut counts.hold,
            NoteType::SwipeClockwise => &mut counts.swipe_clockwise,
            NoteType::SwipeCounterclockwise => &mut counts.swipe_counterclockwise,
            NoteType::SnapForward => &mut counts.snap_forward,
            NoteType::SnapBackward => &mut counts.snap_backward,
            _ => continue,
        };
        *count += 1;
    }
    counts
}

/// Notes per second, over hold starts and single notes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nps {
    /// Over the whole chart.
    pub with_chains: f64,
    /// Over the whole chart, chains excluded.
    pub without_chains: f64,
    /// Over the chart with long gaps cut out.
    pub without_breaks: f64,
    /// Over the chart with long gaps cut out, chains excluded.
    pub without_chains_or_breaks: f64,
}

/// The time of the last note, and that time minus every gap longer than `break_threshold`.
fn durations(notes: &[&Note], break_threshold: f64) -> (f64, f64) {
    let duration = notes.last().map_or(0.0, |note| note.time);
    let breaks: f64 = notes
        .windows(2)
        .filter_map(|pair| match pair {
            [note, next] => Some(next.time - note.time),
            _ => None,
        })
        .filter(|&gap| gap > break_threshold)
        .sum();
    (duration, duration - breaks)
}

/// Measures the notes per second. A chart without notes or duration gets zeros.
///
/// When every gap is a break, nothing is left to play outside of them, and the two variants
/// without breaks are zero.
#[must_use]
pub fn notes_per_second(chart: &Chart, thresholds: &Thresholds) -> Nps {
    let notes: Vec<&Note> = chart.non_segment_notes().collect();
    let (duration, duration_without_breaks) = durations(&notes, thresholds.nps_break);
    if notes.is_empty() || duration <= 0.0 {
        return Nps::default();
    }

    let count = notes.len() as f64;
    let count_without_chains = notes
        .iter()
        .filter(|note| note.note_type != NoteType::Chain)
        .count() as f64;
    let per_second = |count: f64, duration: f64| {
        if duration > 0.0 {
            count / duration * 1000.0
        } else {
            0.0
        }
    };
    Nps {
        with_chains: per_second(count, duration),
        without_chains: per_second(count_without_chains, duration),
        without_breaks: per_second(count, duration_without_breaks),
        without_chains_or_breaks: per_second(count_without_chains, duration_without_breaks),
    }
}

/// Relative usage of each lane position, the most used position being `1.0`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Heatmap(Vec<f64>);

impl Heatmap {
    /// One weight per lane position, in `[0, 1]`.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.0
    }
}

impl Default for Heatmap {
    fn default() -> Self {
        Self(vec![0.0; LANE_SIZE as usize])
    }
}

const HEATMAP_NOTE_WEIGHT: f64 = 1.0;
const HEATMAP_HOLD_WEIGHT: f64 = 0.2;

/// Accumulates every note except the end of chart marker onto the lane positions it covers.
#[must_use]
pub fn heatmap(chart: &Chart) -> Heatmap {
    let mut heatmap = Heatmap::default();
    for note in chart
        .objects()
        .iter()
        .filter(|note| note.note_type != NoteType::EndChart)
    {
        let weight = if note.is_hold() {
            HEATMAP_HOLD_WEIGHT
        } else {
            HEATMAP_NOTE_WEIGHT
        };
        for position in note.position..note.position + note.size {
            let lane = position.mod_floor(&LANE_SIZE) as usize;
            if let Some(bucket) = heatmap.0.get_mut(lane) {
                *bucket += weight;
            }
        }
    }

    let max = heatmap.0.iter().copied().fold(0.0, f64::max);
    if max > 0.0 {
        for bucket in &mut heatmap.0 {
            *bucket /= max;
        }
    }
    heatmap
}

/// The skill vector of a chart, each in `[0, 1]` for typical charts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillRating {
    /// How fast the notes come, saturating at 12 notes per second.
    pub speed: f64,
    /// How long the fast parts last.
    pub stamina: f64,
    /// How often the kind of action changes.
    pub complexity: f64,
}

/// Notes per second that saturate [`SkillRating::speed`].
const MAX_SPEED_NPS: f64 = 12.0;
const MIN_DURATION: f64 = 0.001;

/// Rates the speed, stamina and complexity. A chart without notes gets zeros.
#[must_use]
pub fn skill_rating(chart: &Chart, thresholds: &Thresholds) -> SkillRating {
    let notes: Vec<&Note> = chart.non_segment_notes().collect();
    if notes.is_empty() {
        return SkillRating::default();
    }
    let (duration, duration_without_breaks) = durations(&notes, thresholds.skill_break);
    let duration = duration.max(MIN_DURATION);
    let duration_without_breaks = duration_without_breaks.max(MIN_DURATION);

    let count = notes.len() as f64;
    let nps = (count / duration * 1000.0).max(MIN_DURATION);
    let nps_without_breaks = (count / duration_without_breaks * 1000.0).max(MIN_DURATION);

    let speed = num::clamp(nps_without_breaks / MAX_SPEED_NPS, 0.0, 1.0);
    let stamina = (nps / nps_without_breaks).powi(4) * 0.5 + speed * 0.5;

    let complexity: f64 = notes
        .windows(2)
        .filter_map(|pair| match pair {
            [last, note] => Some(transition_complexity(last, note)),
            _ => None,
        })
        .sum();

    SkillRating {
        speed,
        stamina,
        complexity: complexity / (count * 3.0),
    }
}

fn transition_complexity(last: &Note, note: &Note) -> f64 {
    let mut complexity = 0.0;
    if note.note_type != last.note_type && note.note_type != NoteType::Touch {
        complexity += 1.0;
    }
    if note.is_snap() || note.is_swipe() {
        complexity += 1.25;
    }
    if note.is_simultaneous(last) {
        complexity += 2.0;
    }
    complexity
}

const LEVEL_SPEED_WEIGHT: f64 = 1.5;
const LEVEL_STAMINA_WEIGHT: f64 = 0.6;
const LEVEL_COMPLEXITY_WEIGHT: f64 = 1.0;
const LEVEL_MULTIPLIER: f64 = 5.95;
const LEVEL_ADJUST: f64 = 0.2;

/// Estimates the difficulty level from the skill vector.
#[must_use]
pub fn level(skill: &SkillRating) -> f64 {
    let curve = |x: f64| {
        let eased = 1.0 - (1.0 - x).powi(2);
        eased * (1.0 - LEVEL_ADJUST * (1.0 - eased).powi(2))
    };
    (curve(skill.speed) * LEVEL_SPEED_WEIGHT
        + curve(skill.stamina) * LEVEL_STAMINA_WEIGHT
        + curve(skill.complexity) * LEVEL_COMPLEXITY_WEIGHT)
        * LEVEL_MULTIPLIER
}
