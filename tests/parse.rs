//! Parsing whole chart files.

use mer_rs::{
    MerWarning,
    command::{MaskDirection, NoteType},
    lex::LexWarning,
    parse::{ParseError, ParseWarning},
    parse_mer,
};
use pretty_assertions::assert_eq;

const BASIC: &str = include_str!("files/basic.mer");

#[test]
fn basic_chart_is_partitioned() {
    let output = parse_mer(BASIC);
    assert!(output.is_loaded());
    assert_eq!(output.warnings, vec![]);
    let chart = output.chart.expect("loaded");

    assert_eq!(chart.objects().len(), 13);
    assert_eq!(chart.masks().count(), 2);
    assert_eq!(chart.notes().count(), 11);
    assert_eq!(chart.non_segment_notes().count(), 9);
    assert_eq!(chart.hi_speed_gimmicks().len(), 1);
    assert_eq!(chart.bgm_data().len(), 1);

    let types: Vec<_> = chart.notes().map(|note| note.note_type).collect();
    assert_eq!(
        types,
        vec![
            NoteType::Touch,
            NoteType::Touch,
            NoteType::HoldStart,
            NoteType::HoldSegment,
            NoteType::HoldEnd,
            NoteType::SnapForward,
            NoteType::SwipeClockwise,
            NoteType::Chain,
            NoteType::SnapBackward,
            NoteType::SwipeCounterclockwise,
            NoteType::EndChart,
        ]
    );
    let directions: Vec<_> = chart.masks().map(|mask| mask.mask_direction).collect();
    assert_eq!(directions, vec![MaskDirection::Center, MaskDirection::Center]);
}

#[test]
fn hold_chain_is_linked_both_ways() {
    let chart = parse_mer(BASIC).chart.expect("loaded");
    let start = chart
        .notes()
        .find(|note| note.note_type == NoteType::HoldStart)
        .expect("hold start");

    let segment = chart.next_ref(start).expect("segment");
    assert_eq!(segment.note_type, NoteType::HoldSegment);
    let end = chart.next_ref(segment).expect("end");
    assert_eq!(end.note_type, NoteType::HoldEnd);
    assert_eq!(chart.next_ref(end), None);

    assert_eq!(chart.prev_ref(end).map(|note| note.id), Some(segment.id));
    assert_eq!(chart.prev_ref(segment).map(|note| note.id), Some(start.id));
    assert_eq!(chart.prev_ref(start), None);
}

#[test]
fn one_measure_at_120_bpm_is_two_seconds() {
    let source = "#BODY\n0 0 2 120.000000\n0 0 3 4 4\n1 0 1 1 0 0 10 1\n";
    let chart = parse_mer(source).chart.expect("loaded");
    let note = chart.notes().next().expect("one note");
    assert!((note.time - 2000.0).abs() < 1e-9, "got {}", note.time);
}

#[test]
fn parsing_is_idempotent() {
    assert_eq!(parse_mer(BASIC), parse_mer(BASIC));
}

#[test]
fn unresolved_reference_is_not_fatal() {
    let output = parse_mer(include_str!("files/broken_hold.mer"));
    assert!(output.is_loaded());
    let parse_warnings: Vec<_> = output
        .warnings
        .iter()
        .filter_map(|warning| match warning {
            MerWarning::ParseWarning(warning) => Some(warning.content().clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        parse_warnings,
        vec![ParseWarning::UnresolvedReference { from: 5, to: 7 }]
    );
    let chart = output.chart.expect("loaded");
    let hold = chart.notes().next().expect("hold start");
    assert_eq!(chart.next_ref(hold), None);
}

#[test]
fn missing_tempo_fails_the_parse() {
    let output = parse_mer(include_str!("files/no_tempo.mer"));
    assert!(!output.is_loaded());
    assert_eq!(
        output.chart.map_err(|error| error.into_content()),
        Err(ParseError::MissingTempo)
    );
}

#[test]
fn malformed_number_fails_the_parse() {
    let source = include_str!("files/invalid_number.mer");
    let output = parse_mer(source);
    let error = output.chart.expect_err("malformed position");
    assert_eq!(
        error.content(),
        &ParseError::InvalidNumber {
            field: "position",
            text: "1O".to_string()
        }
    );
    assert_eq!(
        source.get(error.range()).map(str::trim),
        Some("1    0    1    1    0   1O   10    1")
    );
}

#[test]
fn missing_body_marker() {
    let output = parse_mer("#MUSIC_SCORE_ID 0\n0 0 2 120.000000\n0 0 3 4 4\n");
    assert!(!output.is_loaded());
    assert!(matches!(
        output.warnings.as_slice(),
        [MerWarning::LexWarning(warning)] if *warning.content() == LexWarning::MissingBodyMarker
    ));
}

#[test]
fn unknown_gimmicks_are_skipped() {
    let source = "#BODY\n0 0 2 120.000000\n0 0 3 4 4\n1 0 4 0.5\n1 0 1 1 0 0 10 1\n";
    let output = parse_mer(source);
    assert_eq!(output.warnings.len(), 1);
    let chart = output.chart.expect("loaded");
    assert_eq!(chart.objects().len(), 1);
    assert_eq!(chart.hi_speed_gimmicks().len(), 0);
}
