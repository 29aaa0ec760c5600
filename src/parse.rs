//! Parsing [`Chart`] from [`Token`]s.
//!
//! Raw [String] == [lex] ==> [`Token`]s (in [`LexOutput`]) == [parse] ==> [`Chart`] (in
//! [`ParseOutput`])
//!
//! Parsing is one strict pass: objects are built line by line, hold references are linked, the
//! tempo timeline is merged and every object is timed, and finally the parity of every playable
//! note is inferred. A malformed field or a missing tempo fails the whole parse; everything else
//! is reported as a [`ParseWarning`] and parsing goes on.
//!
//! [lex]: crate::lex::parse_lex_tokens
//! [parse]: Chart::from_tokens
//! [`Token`]: crate::lex::token::Token
//! [`LexOutput`]: crate::lex::LexOutput

mod link;
mod object;

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Label, Report, ReportKind};
use thiserror::Error;

use crate::{
    command::{
        GimmickType,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
    },
    lex::token::TokenWithRange,
    model::{Chart, NoteId, gimmick::Gimmick, timeline::Timeline},
    parity,
};
#[cfg(feature = "diagnostics")]
use crate::diagnostics::{SimpleSource, ToAriadne};

use self::{
    link::ReferenceTable,
    object::{ParsedObject, build_object},
};

/// An error that makes the chart impossible to load.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ParseError {
    /// A required field of a line is absent.
    #[error("expected field `{field}` on line {line}, but not found")]
    MissingField {
        /// The name of the field.
        field: &'static str,
        /// The line number, starts with 1.
        line: usize,
    },
    /// A numeric field could not be read as a number.
    #[error("field `{field}` is not a number: `{text}`")]
    InvalidNumber {
        /// The name of the field.
        field: &'static str,
        /// The text found instead.
        text: String,
    },
    /// There is no BPM change, so the chart cannot be timed.
    #[error("no BPM defined, the chart cannot be timed")]
    MissingTempo,
    /// There is no time signature change, so the chart cannot be timed.
    #[error("no time signature defined, the chart cannot be timed")]
    MissingTimeSignature,
}

/// Type alias of `core::result::Result<T, ParseError>`
pub(crate) type Result<T> = core::result::Result<T, ParseError>;

/// A parse error with position information.
pub type ParseErrorWithRange = SourceRangeMixin<ParseError>;

/// A recoverable problem found while parsing.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseWarning {
    /// The object id is neither a note nor a known gimmick. The line was dropped.
    #[error("object id `{0}` not recognized, line skipped")]
    UnknownObject(i32),
    /// A time signature carried only its numerator, which was used as the denominator too.
    #[error("time signature without denominator, assumed equal to numerator")]
    ShortTimeSignature,
    /// A gimmick carried no value, and a default was used.
    #[error("{0} without value, default used")]
    MissingGimmickValue(GimmickType),
    /// A hold note refers to a note index that does not exist.
    #[error("hold note index {from} refers to missing note index {to}")]
    UnresolvedReference {
        /// The index of the referring note.
        from: i32,
        /// The missing index.
        to: i32,
    },
}

/// A parse warning with position information.
pub type ParseWarningWithRange = SourceRangeMixin<ParseWarning>;

/// Chart Parse Output
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ParseOutput {
    /// The output chart, or the error which made it impossible to load.
    pub chart: core::result::Result<Chart, ParseErrorWithRange>,
    /// Warnings that occurred during parsing.
    pub parse_warnings: Vec<ParseWarningWithRange>,
}

impl Chart {
    /// Parses body tokens into a fully timed and parity-tagged [`Chart`].
    pub fn from_tokens<'a>(tokens: impl IntoIterator<Item = &'a TokenWithRange<'a>>) -> ParseOutput {
        let mut parse_warnings = vec![];
        let chart = Self::build(tokens, &mut parse_warnings);
        for warning in &parse_warnings {
            log::warn!("{warning}");
        }
        match &chart {
            Ok(chart) => log::info!(
                "loaded chart: {} notes, {} masks, {} timeline entries",
                chart.notes.len(),
                chart.masks.len(),
                chart.timeline.entries().len()
            ),
            Err(error) => log::error!("failed to load chart: {error}"),
        }
        ParseOutput {
            chart,
            parse_warnings,
        }
    }

    fn build<'a>(
        tokens: impl IntoIterator<Item = &'a TokenWithRange<'a>>,
        warnings: &mut Vec<ParseWarningWithRange>,
    ) -> core::result::Result<Self, ParseErrorWithRange> {
        let mut chart = Self::default();
        let mut tempo: Vec<Gimmick> = vec![];
        let mut references = ReferenceTable::default();
        let mut body_span: Option<(usize, usize)> = None;

        for token in tokens {
            let (start, end) = token.as_span();
            body_span = Some(body_span.map_or((start, end), |(first, _)| (first, end)));

            let id = NoteId(chart.objects.len());
            match build_object(token, id, warnings)? {
                ParsedObject::Skip => {}
                ParsedObject::Note {
                    note,
                    line_index,
                    reference,
                } => {
                    if let Some(target) = reference {
                        references.insert_reference(line_index, target.into_wrapper(token));
                    }
                    references.insert_note(line_index, id);
                    if note.note_type.is_mask() {
                        chart.masks.push(id);
                    } else {
                        chart.notes.push(id);
                        if !note.note_type.is_hold_continuation() {
                            chart.non_segment_notes.push(id);
                        }
                    }
                    chart.objects.push(note);
                }
                ParsedObject::Gimmick(gimmick) => match gimmick.gimmick_type() {
                    GimmickType::BeatsPerMinute | GimmickType::TimeSignature => {
                        tempo.push(gimmick);
                    }
                    GimmickType::HiSpeed => chart.hi_speed.push(gimmick),
                    GimmickType::StopStart | GimmickType::StopEnd => chart.stops.push(gimmick),
                    GimmickType::ReverseEffectStart
                    | GimmickType::ReverseEffectEnd
                    | GimmickType::ReverseNoteEnd => chart.reverses.push(gimmick),
                },
            }
        }
        log::debug!(
            "built {} notes and {} gimmicks",
            chart.objects.len(),
            tempo.len() + chart.hi_speed.len() + chart.stops.len() + chart.reverses.len()
        );

        warnings.extend(references.link(&mut chart.objects));

        let (start, end) = body_span.unwrap_or_default();
        chart.timeline = Timeline::build(&tempo).map_err(|e| e.into_wrapper_range(start..end))?;

        chart.timeline.apply(&mut chart.objects);
        chart.timeline.apply(&mut chart.hi_speed);
        chart.timeline.apply(&mut chart.stops);
        chart.timeline.apply(&mut chart.reverses);

        parity::interpret(&mut chart);

        Ok(chart)
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (start, end) = self.as_span();
        let filename = src.name().to_string();
        Report::build(ReportKind::Warning, (filename.clone(), start..end))
            .with_message("parse: ".to_string() + &self.content().to_string())
            .with_label(Label::new((filename, start..end)).with_color(Color::Blue))
            .finish()
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for ParseErrorWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        let (start, end) = self.as_span();
        let filename = src.name().to_string();
        Report::build(ReportKind::Error, (filename.clone(), start..end))
            .with_message("parse: ".to_string() + &self.content().to_string())
            .with_label(
                Label::new((filename, start..end))
                    .with_message("the chart cannot be loaded")
                    .with_color(Color::Red),
            )
            .finish()
    }
}
