//! Checks on patterns that are readable but uncomfortable to play.

use std::collections::HashSet;

use itertools::Itertools;

use crate::{
    command::{NoteType, Parity},
    model::{Chart, note::Note},
};

use super::{Finding, Severity, Thresholds};

/// Reports repeats of non-chain notes that are too fast to hit comfortably yet too slow to slide.
///
/// Two notes on different hands get twice the time. Notes on the same instant are chords, not
/// repeats. The end of chart marker is also skipped as a repeat target: it sits in the playable
/// note list, but it is never hit.
#[must_use]
pub fn check_high_ebpm(chart: &Chart, thresholds: &Thresholds) -> Vec<Finding> {
    chart
        .non_segment_notes()
        .tuple_windows()
        .filter(|(prev, current)| {
            current.note_type != NoteType::Chain
                && current.note_type != NoteType::EndChart
                && !(prev.note_type == NoteType::Chain && current.note_type != NoteType::Touch)
                && !current.is_simultaneous(prev)
        })
        .filter_map(|(prev, current)| {
            let mut interval = current.time - prev.time;
            if current.parity != prev.parity {
                interval *= 2.0;
            }
            (thresholds.ebpm_min_interval < interval && interval < thresholds.ebpm_max_interval)
                .then(|| {
                    Finding::new(
                        Severity::Suggestion,
                        format!("{} with high eBPM @ {}", current.note_type, current.offset),
                        current.offset,
                    )
                })
        })
        .collect()
}

/// Reports notes hidden by a hand still over the lane, and notes arriving right after a fast
/// hi-speed change.
#[must_use]
pub fn check_vision_blocks(chart: &Chart, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = check_hand_blocks(chart, thresholds);
    findings.extend(check_hi_speed_blocks(chart, thresholds));
    findings
}

/// Whether the hand that hit `blocker` covers the lane point of `note`.
fn covers(blocker: &Note, note: &Note, range: f64) -> bool {
    match blocker.parity {
        Parity::Left => {
            note.center_point > blocker.center_point
                && note.center_point < blocker.center_point + range
        }
        Parity::Right => {
            let looped = if note.center_point > 30.0 {
                note.center_point - 60.0
            } else {
                note.center_point
            };
            looped < blocker.center_point && looped > blocker.center_point - range
        }
        Parity::Ambiguous => false,
    }
}

/// Reports notes arriving behind the hand that hit an earlier note. A note of
/// [`Parity::Ambiguous`] has no hand to block with, so it never blocks.
fn check_hand_blocks(chart: &Chart, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = vec![];
    let mut blocked = HashSet::new();
    for current in chart.notes() {
        let center = current.center_point;
        let on_blocking_side = match current.parity {
            Parity::Left => center <= 15.0,
            Parity::Right => (15.0..=30.0).contains(&center),
            Parity::Ambiguous => false,
        };
        if !on_blocking_side {
            continue;
        }

        let window_start = current.time + thresholds.vision_time_start;
        let window_end = window_start + thresholds.vision_reaction_time;
        let candidates = chart.notes().filter(|note| {
            note.time > window_start
                && note.time < window_end
                && !note.note_type.is_hold_continuation()
        });
        for note in candidates {
            if blocked.contains(&note.id)
                || !covers(current, note, thresholds.blocked_position_range)
            {
                continue;
            }
            blocked.insert(note.id);
            findings.push(Finding::new(
                Severity::Suggestion,
                format!(
                    "{} @ {} vision blocked by {} @ {}",
                    note.note_type, note.offset, current.note_type, current.offset
                ),
                note.offset,
            ));
        }
    }
    findings
}

fn check_hi_speed_blocks<'a>(
    chart: &'a Chart,
    thresholds: &'a Thresholds,
) -> impl Iterator<Item = Finding> + 'a {
    let gimmicks = chart.hi_speed_gimmicks();
    gimmicks.iter().enumerate().filter_map(move |(i, gimmick)| {
        let speed = gimmick.hi_speed()?;
        if speed < thresholds.hi_speed_vision_limit {
            return None;
        }
        let next_time = gimmicks.get(i + 1).map_or(f64::INFINITY, |next| next.time);
        let reaction = thresholds.vision_reaction_time;
        let affected = chart
            .non_segment_notes()
            .filter(|note| {
                note.time > gimmick.time + reaction
                    && (note.time <= next_time || note.time <= gimmick.time + reaction * 2.0)
            })
            .map(|note| format!("{} @ {}", note.note_type, note.offset))
            .join(", ");
        if affected.is_empty() {
            return None;
        }
        Some(Finding::new(
            Severity::Warning,
            format!(
                "HiSpeed Change [{speed}] @ {} may cause vision or reaction time issues. Affected notes are: {affected}",
                gimmick.offset
            ),
            gimmick.offset,
        ))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::chart_from_body;

    fn messages(findings: Vec<Finding>) -> Vec<String> {
        findings.into_iter().map(|f| f.message).collect()
    }

    #[test]
    fn fast_repeats() {
        // 96 ticks = 100 ms on the same hand, 48 ticks = 50 ms doubled across hands
        let chart = chart_from_body(
            "0 0 1 1 0 55 10 1\n\
             0 96 1 1 1 55 10 1\n\
             1 0 1 1 2 55 10 1\n\
             1 48 1 1 3 25 10 1\n\
             2 0 1 14 4 0 60 1\n",
        );
        assert_eq!(
            messages(check_high_ebpm(&chart, &Thresholds::default())),
            vec!["Touch with high eBPM @ 0 96", "Touch with high eBPM @ 1 48"]
        );
    }

    #[test]
    fn chains_and_chords_are_not_repeats() {
        let chart = chart_from_body(
            "0 0 1 16 0 55 10 1\n\
             0 96 1 16 1 55 10 1\n\
             1 0 1 16 2 55 10 1\n\
             1 96 1 3 3 55 10 1\n\
             2 0 1 1 4 55 10 1\n\
             2 0 1 1 5 20 10 1\n\
             3 0 1 14 6 0 60 1\n",
        );
        assert_eq!(check_high_ebpm(&chart, &Thresholds::default()), vec![]);
    }

    #[test]
    fn end_marker_is_not_a_repeat() {
        // 100 ms after a touch on the same hand
        let chart = chart_from_body("0 0 1 1 0 55 10 1\n0 96 1 14 1 30 60 1\n");
        let parities: Vec<_> = chart.notes().map(|n| n.parity).collect();
        assert_eq!(parities, vec![Parity::Right, Parity::Right]);
        assert_eq!(check_high_ebpm(&chart, &Thresholds::default()), vec![]);
    }

    #[test]
    fn ambiguous_notes_do_not_block() {
        // center 15 leans to neither hand, the note 600 ms later sits in its window
        let chart = chart_from_body(
            "0 0 1 1 0 10 10 1\n\
             0 576 1 1 1 10 10 1\n\
             2 0 1 14 2 0 60 1\n",
        );
        assert!(chart.notes().all(|n| n.parity == Parity::Ambiguous));
        assert_eq!(check_hand_blocks(&chart, &Thresholds::default()), vec![]);
    }

    #[test]
    fn hand_hides_notes_ahead() {
        // 480 ticks = 500 ms; the right hand at 0 0 makes the note at 0 480 a left hand hit,
        // whose arm then covers the lane up to 15 positions clockwise
        let chart = chart_from_body(
            "0 0 1 1 0 55 10 1\n\
             0 480 1 1 1 10 10 1\n\
             0 768 1 1 2 55 10 1\n\
             0 1056 1 1 3 18 6 1\n\
             2 0 1 14 4 0 60 1\n",
        );
        let parities: Vec<_> = chart.notes().map(|n| n.parity).collect();
        assert_eq!(parities[..2], [Parity::Right, Parity::Left]);
        assert_eq!(
            messages(check_hand_blocks(&chart, &Thresholds::default())),
            vec!["Touch @ 0 1056 vision blocked by Touch @ 0 480"]
        );
    }

    #[test]
    fn right_hand_hides_notes_behind_it() {
        // the note at 0 480 is hit right handed, its arm covers 15 positions counterclockwise
        let chart = chart_from_body(
            "0 0 1 1 0 25 10 1\n\
             0 480 1 1 1 15 10 1\n\
             0 720 1 1 2 25 10 1\n\
             0 1056 1 1 3 5 10 1\n\
             2 0 1 14 4 0 60 1\n",
        );
        let parities: Vec<_> = chart.notes().map(|n| n.parity).collect();
        assert_eq!(parities[..2], [Parity::Left, Parity::Right]);
        assert_eq!(
            messages(check_hand_blocks(&chart, &Thresholds::default())),
            vec!["Touch @ 0 1056 vision blocked by Touch @ 0 480"]
        );
    }

    #[test]
    fn hidden_note_is_reported_once() {
        // both left hands at 0 480 (500 ms) and 0 528 (550 ms) cover the note at 0 1056
        let chart = chart_from_body(
            "0 0 1 1 0 55 10 1\n\
             0 480 1 1 1 10 10 1\n\
             0 528 1 1 2 10 10 1\n\
             0 768 1 1 3 55 10 1\n\
             0 1056 1 1 4 18 6 1\n\
             2 0 1 14 5 0 60 1\n",
        );
        let parities: Vec<_> = chart.notes().map(|n| n.parity).collect();
        assert_eq!(parities[1..3], [Parity::Left, Parity::Left]);
        assert_eq!(
            messages(check_hand_blocks(&chart, &Thresholds::default())),
            vec!["Touch @ 0 1056 vision blocked by Touch @ 0 480"]
        );
    }

    #[test]
    fn fast_hi_speed_hides_notes() {
        // 960 ticks = 1000 ms, 1248 ticks = 1300 ms
        let chart = chart_from_body(
            "0 960 5 4.0\n\
             0 1056 1 1 0 0 10 1\n\
             0 1248 1 1 1 0 10 1\n\
             1 0 5 1.0\n\
             2 0 1 14 2 0 60 1\n",
        );
        assert_eq!(
            messages(check_hi_speed_blocks(&chart, &Thresholds::default()).collect()),
            vec![
                "HiSpeed Change [4] @ 0 960 may cause vision or reaction time issues. \
                 Affected notes are: Touch @ 0 1248"
            ]
        );
    }
}
