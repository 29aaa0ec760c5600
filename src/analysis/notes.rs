//! Checks on single notes and on notes sharing an instant.

use itertools::Itertools;

use crate::{
    command::NoteType,
    model::{
        Chart,
        note::{LANE_SIZE, Note},
    },
};

use super::{Finding, Severity, Thresholds};

/// Checks every note, masks included, for out of range size, position and time, and for an
/// unknown type.
#[must_use]
pub fn check_invalid_notes(chart: &Chart) -> Vec<Finding> {
    let mut findings = vec![];
    for note in chart.objects() {
        let at = note.offset;
        if !(1..=LANE_SIZE).contains(&note.size) {
            findings.push(Finding::new(
                Severity::Error,
                format!("{} with invalid size ({}) @ {at}", note.note_type, note.size),
                at,
            ));
        }
        if !(0..LANE_SIZE).contains(&note.position) {
            findings.push(Finding::new(
                Severity::Error,
                format!(
                    "{} with invalid position ({}) @ {at}",
                    note.note_type, note.position
                ),
                at,
            ));
        }
        if note.note_type == NoteType::None {
            findings.push(Finding::new(
                Severity::Error,
                format!("Invalid NoteType @ {at}"),
                at,
            ));
        }
        if at.measure < 0 || at.tick < 0 {
            findings.push(Finding::new(
                Severity::Error,
                format!(
                    "{} with negative time ({} // {})",
                    note.note_type, at.measure, at.tick
                ),
                at,
            ));
        }
    }
    findings
}

/// Checks non-hold notes that are hard to hit for their size.
///
/// Below [`Thresholds::small_note_warning`] is a warning. Below
/// [`Thresholds::small_note_suggestion`], or a swipe below
/// [`Thresholds::small_swipe_suggestion`], is a suggestion.
#[must_use]
pub fn check_small_notes(chart: &Chart, thresholds: &Thresholds) -> Vec<Finding> {
    chart
        .notes()
        .filter(|note| !note.is_hold())
        .filter_map(|note| {
            let severity = if note.size < thresholds.small_note_warning {
                Severity::Warning
            } else if note.size < thresholds.small_note_suggestion
                || (note.is_swipe() && note.size < thresholds.small_swipe_suggestion)
            {
                Severity::Suggestion
            } else {
                return None;
            };
            Some(Finding::new(
                severity,
                format!(
                    "{} with small size ({}) @ {}",
                    note.note_type, note.size, note.offset
                ),
                note.offset,
            ))
        })
        .collect()
}

/// Compares every pair of non-hold notes on the same measure and tick.
///
/// One lane span containing the other is an error, intersecting spans are a warning.
#[must_use]
pub fn check_overlapping_notes(chart: &Chart) -> Vec<Finding> {
    let mut findings = vec![];
    let instants = chart
        .notes()
        .filter(|note| !note.is_hold())
        .chunk_by(|note| note.offset);
    for (_, group) in &instants {
        let group: Vec<&Note> = group.collect();
        for (current, next) in group.iter().tuple_combinations() {
            if let Some(severity) = overlap(current, next) {
                let kind = match severity {
                    Severity::Error => "fully",
                    _ => "partially",
                };
                findings.push(Finding::new(
                    severity,
                    format!(
                        "{} {kind} overlaps with {} @ {}",
                        next.note_type, current.note_type, next.offset
                    ),
                    next.offset,
                ));
            }
        }
    }
    findings
}

fn overlap(a: &Note, b: &Note) -> Option<Severity> {
    let (a_start, a_end) = (a.position, a.position + a.size);
    let (b_start, b_end) = (b.position, b.position + b.size);
    let contains = |outer: (i32, i32), inner: (i32, i32)| outer.0 <= inner.0 && inner.1 <= outer.1;
    if contains((a_start, a_end), (b_start, b_end)) || contains((b_start, b_end), (a_start, a_end))
    {
        Some(Severity::Error)
    } else if a_start < b_end && b_start < a_end {
        Some(Severity::Warning)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::chart_from_body;

    fn messages(findings: Vec<Finding>) -> Vec<(Severity, String)> {
        findings.into_iter().map(|f| (f.severity, f.message)).collect()
    }

    #[test]
    fn invalid_notes() {
        let chart = chart_from_body("0 0 1 1 0 60 0 1\n-1 0 1 15 1 0 10 1\n");
        assert_eq!(
            messages(check_invalid_notes(&chart)),
            vec![
                (Severity::Error, "Touch with invalid size (0) @ 0 0".to_string()),
                (
                    Severity::Error,
                    "Touch with invalid position (60) @ 0 0".to_string()
                ),
                (Severity::Error, "Invalid NoteType @ -1 0".to_string()),
                (
                    Severity::Error,
                    "None with negative time (-1 // 0)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn small_notes_by_category() {
        let chart = chart_from_body(
            "0 0 1 1 0 0 6 1\n\
             0 240 1 1 1 0 8 1\n\
             0 480 1 5 2 0 11 1\n\
             0 720 1 9 3 0 3 1\n\
             0 960 1 1 4 0 10 1\n",
        );
        assert_eq!(
            messages(check_small_notes(&chart, &Thresholds::default())),
            vec![
                (Severity::Warning, "Touch with small size (6) @ 0 0".to_string()),
                (
                    Severity::Suggestion,
                    "Touch with small size (8) @ 0 240".to_string()
                ),
                (
                    Severity::Suggestion,
                    "SwipeClockwise with small size (11) @ 0 480".to_string()
                ),
            ]
        );
    }

    #[test]
    fn partial_overlap_is_a_warning() {
        let chart = chart_from_body("1 0 1 1 0 0 10 1\n1 0 1 1 1 5 15 1\n");
        assert_eq!(
            messages(check_overlapping_notes(&chart)),
            vec![(
                Severity::Warning,
                "Touch partially overlaps with Touch @ 1 0".to_string()
            )]
        );
    }

    #[test]
    fn containment_either_way_is_an_error() {
        let chart = chart_from_body(
            "1 0 1 1 0 10 5 1\n1 0 1 3 1 0 30 1\n1 0 1 16 2 40 10 1\n2 0 1 1 3 0 10 1\n",
        );
        assert_eq!(
            messages(check_overlapping_notes(&chart)),
            vec![(
                Severity::Error,
                "SnapForward fully overlaps with Touch @ 1 0".to_string()
            )]
        );
    }

    #[test]
    fn holds_do_not_overlap() {
        let chart = chart_from_body("1 0 1 9 0 0 10 1\n1 0 1 1 1 0 10 1\n");
        assert_eq!(check_overlapping_notes(&chart), vec![]);
    }
}
