//! Prelude module for the MER crate.
//!
//! This module re-exports the public types of the crate for convenient access.
//! You can use `use mer_rs::prelude::*;` to import them all at once.

#[cfg(feature = "diagnostics")]
pub use crate::diagnostics::{
    SimpleSource, ToAriadne, collect_mer_reports, emit_findings, emit_mer_warnings,
};

pub use crate::{
    MerOutput, MerWarning,
    analysis::{
        AnalysisReport, CheckConfig, Finding, Pass, PassFindings, Severity, Thresholds,
        stats::{Heatmap, NoteCounts, Nps, SkillRating},
    },
    command::{
        BonusType, GimmickType, MaskDirection, NoteType, Parity,
        mixin::{SourceRangeMixin, SourceRangeMixinExt},
        time::{ObjTime, TICKS_PER_MEASURE},
    },
    lex::{LexOutput, LexWarning, LexWarningWithRange, token::Token},
    model::{
        Chart, ChartObject, NoteId,
        gimmick::{Gimmick, GimmickKind, TimeSignature},
        note::{LANE_SIZE, Note},
        timeline::{Timeline, TimelineEntry},
    },
    parse::{ParseError, ParseErrorWithRange, ParseOutput, ParseWarning, ParseWarningWithRange},
    parse_mer,
};
