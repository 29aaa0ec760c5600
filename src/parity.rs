//! Inference of the hand expected to hit each note.
//!
//! Every playable note gets a [`Note::center_point`] on the circular lane, and then a [`Parity`]
//! in one left to right fold: the decision for a note may depend on the decision already made for
//! the previous note, so the notes cannot be classified independently.

use std::f64::consts::PI;

use crate::{
    command::{NoteType, Parity},
    model::{
        Chart,
        note::{LANE_SIZE, Note},
    },
};

const DIRECTION_WEIGHT: f64 = 1.0;
const PREV_PARITY_WEIGHT: f64 = 0.25;
const NEXT_DIRECTION_WEIGHT: f64 = 1.5;
/// Weighted sums within this distance of zero are ambiguous.
const AMBIGUITY_THRESHOLD: f64 = 0.05;

/// The midpoint of a note on the circular lane, in `[0, 60)`.
#[must_use]
pub fn center_point(position: i32, size: i32) -> f64 {
    (f64::from(position) + f64::from(size) * 0.5).rem_euclid(f64::from(LANE_SIZE))
}

/// The distance between two lane points along the shorter arc, in `[0, 30]`.
#[must_use]
pub fn circular_distance(a: f64, b: f64) -> f64 {
    let lane = f64::from(LANE_SIZE);
    let distance = (a - b).abs();
    if distance > lane / 2.0 {
        lane - distance
    } else {
        distance
    }
}

/// Which hand a lane point leans to: positive on the right half, negative on the left.
#[must_use]
pub fn direction(center_point: f64) -> f64 {
    (PI * center_point / (f64::from(LANE_SIZE) / 2.0)).cos()
}

/// Decides the parity of `note` from its neighbors.
///
/// `prev_ref` is the previous note of the hold chain of `note`, if linked. `prev` must already have
/// its parity decided.
#[must_use]
pub fn parity_context(
    note: &Note,
    prev: Option<&Note>,
    next: Option<&Note>,
    prev_ref: Option<&Note>,
) -> Parity {
    if let Some(prev) = prev {
        // hold continuations keep the hand of the hold
        if prev.note_type.is_hold_link()
            && let Some(hold) = prev_ref
        {
            return hold.parity;
        }

        let distance = circular_distance(note.center_point, prev.center_point);
        if distance < f64::from(note.size) * 0.5 {
            return prev.parity;
        }
        if distance < f64::from(note.size)
            && prev.note_type == NoteType::Chain
            && note.note_type == NoteType::Chain
        {
            return prev.parity;
        }
    }

    let direction_weight = direction(note.center_point);
    let prev_parity_weight = prev.map_or(0.0, |prev| -f64::from(prev.parity.sign()));
    let next_direction = next.map_or(direction_weight, |next| direction(next.center_point));
    let next_direction_weight = (direction_weight - next_direction) * 0.5;

    let sum = direction_weight * DIRECTION_WEIGHT
        + prev_parity_weight * PREV_PARITY_WEIGHT
        + next_direction_weight * NEXT_DIRECTION_WEIGHT;
    if sum < -AMBIGUITY_THRESHOLD {
        Parity::Left
    } else if sum > AMBIGUITY_THRESHOLD {
        Parity::Right
    } else {
        Parity::Ambiguous
    }
}

/// Assigns the center point and parity of every playable note of the chart, in file order.
pub fn interpret(chart: &mut Chart) {
    for &id in &chart.notes {
        if let Some(note) = chart.objects.get_mut(id.0) {
            note.center_point = center_point(note.position, note.size);
        }
    }

    for (i, &id) in chart.notes.iter().enumerate() {
        let Some(note) = chart.note(id) else {
            continue;
        };
        let prev = i
            .checked_sub(1)
            .and_then(|j| chart.notes.get(j))
            .and_then(|&prev| chart.note(prev));
        let next = chart.notes.get(i + 1).and_then(|&next| chart.note(next));
        let parity = parity_context(note, prev, next, chart.prev_ref(note));
        log::trace!(
            "{} @ {} center {:.1} -> {parity}",
            note.note_type,
            note.offset,
            note.center_point
        );

        if let Some(note) = chart.objects.get_mut(id.0) {
            note.parity = parity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{command::time::ObjTime, model::NoteId};

    fn note(type_id: i32, position: i32, size: i32) -> Note {
        let mut note = Note::new(NoteId(0), ObjTime::default(), type_id, position, size);
        note.center_point = center_point(position, size);
        note
    }

    #[test]
    fn center_point_wraps() {
        assert!((center_point(0, 10) - 5.0).abs() < f64::EPSILON);
        assert!((center_point(55, 10) - 0.0).abs() < f64::EPSILON);
        assert!((center_point(50, 15) - 57.5).abs() < f64::EPSILON);
    }

    #[test]
    fn circular_distance_folds() {
        assert!((circular_distance(5.0, 55.0) - 10.0).abs() < f64::EPSILON);
        assert!((circular_distance(10.0, 40.0) - 30.0).abs() < f64::EPSILON);
        assert!((circular_distance(20.0, 25.0) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn lone_notes_follow_the_lane() {
        // center 0: cos(0) = 1
        assert_eq!(parity_context(&note(1, 55, 10), None, None, None), Parity::Right);
        // center 30: cos(pi) = -1
        assert_eq!(parity_context(&note(1, 25, 10), None, None, None), Parity::Left);
        // center 15: cos(pi / 2) = 0
        assert_eq!(
            parity_context(&note(1, 10, 10), None, None, None),
            Parity::Ambiguous
        );
    }

    #[test]
    fn close_notes_keep_the_hand() {
        let mut prev = note(1, 25, 10);
        prev.parity = Parity::Right;
        let current = note(1, 27, 10);
        assert_eq!(
            parity_context(&current, Some(&prev), None, None),
            Parity::Right
        );
    }

    #[test]
    fn chain_slides_keep_the_hand() {
        let mut prev = note(16, 20, 6);
        prev.parity = Parity::Right;
        // distance 4 is not under half the size (3), but under the size
        let current = note(16, 24, 6);
        assert_eq!(
            parity_context(&current, Some(&prev), None, None),
            Parity::Right
        );
        let touch = note(1, 24, 6);
        assert_ne!(
            parity_context(&touch, Some(&prev), None, None),
            Parity::Right
        );
    }

    #[test]
    fn hold_continuations_inherit() {
        let mut hold = note(9, 0, 10);
        hold.parity = Parity::Left;
        let segment = note(10, 30, 10);
        assert_eq!(
            parity_context(&segment, Some(&hold), None, Some(&hold)),
            Parity::Left
        );
        // without a resolved reference the decision is made from scratch
        assert_eq!(
            parity_context(&segment, Some(&hold), None, None),
            Parity::Left
        );
    }

    #[test]
    fn previous_parity_pushes_to_alternate() {
        // center 15 is ambiguous alone, a right hand before it tips it to the left
        let mut prev = note(1, 40, 10);
        prev.parity = Parity::Right;
        let current = note(1, 10, 10);
        assert_eq!(
            parity_context(&current, Some(&prev), None, None),
            Parity::Left
        );
    }
}
