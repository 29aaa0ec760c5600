//! Checks on hold chains.

use num::Integer;

use crate::model::{Chart, note::LANE_SIZE};

use super::{Finding, Severity, Thresholds};

/// Reports every hold start or segment that does not link to a next note.
#[must_use]
pub fn check_invalid_holds(chart: &Chart) -> Vec<Finding> {
    chart
        .notes()
        .filter(|note| note.note_type.is_hold_link() && chart.next_ref(note).is_none())
        .map(|note| {
            Finding::new(
                Severity::Error,
                format!("{} without reference @ {}", note.note_type, note.offset),
                note.offset,
            )
        })
        .collect()
}

/// Reports hold notes whose next linked note jumps in size or position.
#[must_use]
pub fn check_unbaked_holds(chart: &Chart, thresholds: &Thresholds) -> Vec<Finding> {
    let mut findings = vec![];
    for note in chart.notes().filter(|note| note.note_type.is_hold_link()) {
        let Some(next) = chart.next_ref(note) else {
            continue;
        };
        let size_difference = next.size - note.size;
        let position_change = position_change(note.position, next.position);
        if size_difference.abs() > thresholds.unbaked_size_difference
            || position_change.abs() >= thresholds.unbaked_position_change
        {
            findings.push(Finding::new(
                Severity::Warning,
                format!("Unbaked {} @ {}", note.note_type, note.offset),
                note.offset,
            ));
        }
    }
    findings
}

/// The signed lane movement from `from` to `to`, folded to the shorter way round.
fn position_change(from: i32, to: i32) -> i32 {
    let mut change = (to - from).mod_floor(&LANE_SIZE);
    if change >= 45 {
        change -= LANE_SIZE;
    }
    if change > 30 {
        -(LANE_SIZE - change)
    } else {
        change
    }
}
