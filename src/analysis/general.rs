//! Whole chart structure checks and the parity listing.

use crate::{
    command::{GimmickType, NoteType},
    model::{Chart, gimmick::Gimmick},
};

use super::{Finding, Severity};

/// Checks the end of chart marker and the pairing of reverse and stop gimmicks.
///
/// Exactly one [`NoteType::EndChart`] must exist, and it must be the last playable note. A chart
/// without any end marker gets only the "not found" error.
#[must_use]
pub fn check_general(chart: &Chart) -> Vec<Finding> {
    let mut findings = vec![];

    let end_count = chart
        .notes()
        .filter(|note| note.note_type == NoteType::EndChart)
        .count();
    match end_count {
        0 => findings.push(Finding::global(
            Severity::Error,
            "No EndOfChart note found!",
        )),
        1 => {}
        count => findings.push(Finding::global(
            Severity::Error,
            format!("This chart has more than one [{count}] EndOfChart notes!"),
        )),
    }
    if end_count > 0
        && chart
            .notes()
            .next_back()
            .is_some_and(|last| last.note_type != NoteType::EndChart)
    {
        findings.push(Finding::global(
            Severity::Error,
            "Last note is not EndOfChart!",
        ));
    }

    findings.extend(check_sequence(chart.reverse_gimmicks(), |last| match last {
        GimmickType::ReverseEffectStart => GimmickType::ReverseEffectEnd,
        GimmickType::ReverseEffectEnd => GimmickType::ReverseNoteEnd,
        _ => GimmickType::ReverseEffectStart,
    }));
    findings.extend(check_sequence(chart.stop_gimmicks(), |last| match last {
        GimmickType::StopStart => GimmickType::StopEnd,
        _ => GimmickType::StopStart,
    }));

    findings
}

/// Reports every gimmick that is not the expected successor of the one before it.
fn check_sequence(
    gimmicks: &[Gimmick],
    successor: impl Fn(GimmickType) -> GimmickType,
) -> impl Iterator<Item = Finding> {
    gimmicks.windows(2).filter_map(move |pair| {
        let [last, current] = pair else {
            return None;
        };
        (current.gimmick_type() != successor(last.gimmick_type())).then(|| {
            Finding::new(
                Severity::Error,
                format!("Invalid {} @ {}", current.gimmick_type(), current.offset),
                current.offset,
            )
        })
    })
}

/// Lists the inferred parity of every playable note that starts an action.
#[must_use]
pub fn list_parity(chart: &Chart) -> Vec<Finding> {
    chart
        .notes()
        .filter(|note| !note.note_type.is_hold_continuation())
        .map(|note| {
            Finding::new(
                Severity::Debug,
                format!("{} {} - {}", note.note_type, note.offset, note.parity),
                note.offset,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::analysis::tests::chart_from_body;

    fn messages(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.message.as_str()).collect()
    }

    #[test]
    fn well_formed_chart_is_clean() {
        let chart = chart_from_body("0 0 1 1 0 0 15 1\n1 0 1 14 1 0 60 1\n");
        assert_eq!(check_general(&chart), vec![]);
    }

    #[test]
    fn missing_end_is_reported_once() {
        let chart = chart_from_body("0 0 1 1 0 0 15 1\n");
        assert_eq!(
            check_general(&chart),
            vec![Finding::global(Severity::Error, "No EndOfChart note found!")]
        );
        assert_eq!(
            messages(&check_general(&Chart::default())),
            vec!["No EndOfChart note found!"]
        );
    }

    #[test]
    fn misplaced_and_repeated_ends() {
        let chart = chart_from_body(
            "0 0 1 14 0 0 60 1\n0 960 1 14 1 0 60 1\n1 0 1 1 2 0 15 1\n",
        );
        assert_eq!(
            messages(&check_general(&chart)),
            vec![
                "This chart has more than one [2] EndOfChart notes!",
                "Last note is not EndOfChart!",
            ]
        );
    }

    #[test]
    fn gimmick_pairs_must_alternate() {
        let chart = chart_from_body(
            "1 0 9\n2 0 9\n3 0 10\n\
             1 0 6\n2 0 7\n3 0 6\n\
             9 0 1 14 0 0 60 1\n",
        );
        assert_eq!(
            messages(&check_general(&chart)),
            vec!["Invalid ReverseEffectStart @ 3 0", "Invalid StopStart @ 2 0"]
        );
    }

    #[test]
    fn parity_listing_skips_hold_continuations() {
        let chart = chart_from_body(
            "0 0 1 9 0 0 10 1 1\n0 480 1 11 1 0 10 1\n1 0 1 14 2 0 60 1\n",
        );
        let listing = list_parity(&chart);
        assert_eq!(listing.len(), 2);
        assert!(listing[0].message.starts_with("HoldStart 0 0 - "));
        assert!(listing.iter().all(|f| f.severity == Severity::Debug));
    }
}
