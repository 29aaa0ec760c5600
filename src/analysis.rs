//! Read-only checks and statistics over a parsed [`Chart`].
//!
//! Every pass is a free function in one of the submodules, taking the chart (and the
//! [`Thresholds`] when it has tunable limits) and returning its own result. [`run`] executes the
//! passes selected in a [`CheckConfig`] and gathers their results into an [`AnalysisReport`].
//!
//! Passes never mutate the chart, so they may run in any order or subset.

pub mod general;
pub mod holds;
pub mod notes;
pub mod playability;
pub mod stats;

use std::collections::BTreeSet;

use crate::{command::time::ObjTime, model::Chart};

use self::stats::{Heatmap, NoteCounts, Nps, SkillRating};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Worth a look, but often fine.
    Suggestion,
    /// Likely to hurt the playing experience.
    Warning,
    /// The chart is broken at this point.
    Error,
    /// Informational output of the debug passes.
    Debug,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Suggestion => "suggestion",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Debug => "debug",
        };
        f.write_str(name)
    }
}

/// One authoring problem or note found by a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Finding {
    /// How serious it is.
    pub severity: Severity,
    /// The human readable description.
    pub message: String,
    /// Where it is on the chart. `None` for problems of the whole chart.
    pub at: Option<ObjTime>,
}

impl Finding {
    /// Creates a finding at a position of the chart.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>, at: ObjTime) -> Self {
        Self {
            severity,
            message: message.into(),
            at: Some(at),
        }
    }

    /// Creates a finding about the whole chart.
    #[must_use]
    pub fn global(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            at: None,
        }
    }

    /// The measure of the finding, `0` for whole chart findings.
    #[must_use]
    pub fn measure(&self) -> i32 {
        self.at.map_or(0, |at| at.measure)
    }

    /// The tick of the finding, `0` for whole chart findings.
    #[must_use]
    pub fn tick(&self) -> i32 {
        self.at.map_or(0, |at| at.tick)
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// An analysis pass. The declaration order is the order [`run`] executes them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pass {
    /// End of chart marker and gimmick pairing, see [`general::check_general`].
    General,
    /// Out of range notes, see [`notes::check_invalid_notes`].
    InvalidNotes,
    /// Notes on the same instant covering each other, see [`notes::check_overlapping_notes`].
    OverlappingNotes,
    /// Hard to hit notes, see [`notes::check_small_notes`].
    SmallNotes,
    /// Unterminated hold chains, see [`holds::check_invalid_holds`].
    InvalidHolds,
    /// Hold chains that snap visually, see [`holds::check_unbaked_holds`].
    UnbakedHolds,
    /// Uncomfortably fast repeats, see [`playability::check_high_ebpm`].
    HighEBpm,
    /// Notes hidden behind hands or speed changes, see [`playability::check_vision_blocks`].
    VisionBlocks,
    /// Note counts per type, see [`stats::note_counts`].
    NoteCounts,
    /// Notes per second, see [`stats::notes_per_second`].
    Nps,
    /// Level estimate, see [`stats::level`].
    Level,
    /// Lane usage, see [`stats::heatmap`].
    Heatmap,
    /// Skill vector, see [`stats::skill_rating`].
    SkillRating,
    /// Debug listing of the inferred hands, see [`general::list_parity`].
    Parity,
}

impl Pass {
    /// All passes in execution order.
    pub const ALL: [Self; 14] = [
        Self::General,
        Self::InvalidNotes,
        Self::OverlappingNotes,
        Self::SmallNotes,
        Self::InvalidHolds,
        Self::UnbakedHolds,
        Self::HighEBpm,
        Self::VisionBlocks,
        Self::NoteCounts,
        Self::Nps,
        Self::Level,
        Self::Heatmap,
        Self::SkillRating,
        Self::Parity,
    ];
}

/// Tunable limits of the passes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Thresholds {
    /// Non-hold notes smaller than this are a warning.
    pub small_note_warning: i32,
    /// Non-hold notes smaller than this are a suggestion.
    pub small_note_suggestion: i32,
    /// Swipes smaller than this are a suggestion.
    pub small_swipe_suggestion: i32,
    /// Linked hold notes whose sizes differ by more than this are unbaked.
    pub unbaked_size_difference: i32,
    /// Linked hold notes whose positions differ by at least this are unbaked.
    pub unbaked_position_change: i32,
    /// Repeats slower than this (ms) are fine, as they can be slid.
    pub ebpm_min_interval: f64,
    /// Repeats faster than this (ms) are fine, as they are streams.
    pub ebpm_max_interval: f64,
    /// How long (ms) after a note its hand starts hiding the following notes.
    pub vision_time_start: f64,
    /// The reaction window (ms) during which hidden notes matter.
    pub vision_reaction_time: f64,
    /// How far (lane positions) ahead of a note its hand hides notes.
    pub blocked_position_range: f64,
    /// Hi-speed changes at least this fast hide the notes right behind them.
    pub hi_speed_vision_limit: f64,
    /// Gaps longer than this (ms) are breaks for notes per second.
    pub nps_break: f64,
    /// Gaps longer than this (ms) are breaks for the skill rating.
    pub skill_break: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            small_note_warning: 7,
            small_note_suggestion: 10,
            small_swipe_suggestion: 12,
            unbaked_size_difference: 2,
            unbaked_position_change: 2,
            ebpm_min_interval: 83.0,
            ebpm_max_interval: 120.0,
            vision_time_start: 500.0,
            vision_reaction_time: 200.0,
            blocked_position_range: 15.0,
            hi_speed_vision_limit: 4.0,
            nps_break: 3000.0,
            skill_break: 2500.0,
        }
    }
}

/// Selects the passes [`run`] executes and the limits they use.
///
/// The default runs every pass except [`Pass::Parity`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CheckConfig {
    /// The enabled passes.
    pub passes: BTreeSet<Pass>,
    /// The limits of the passes.
    pub thresholds: Thresholds,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            passes: Pass::ALL
                .into_iter()
                .filter(|&pass| pass != Pass::Parity)
                .collect(),
            thresholds: Thresholds::default(),
        }
    }
}

impl CheckConfig {
    /// A config running only the given passes.
    #[must_use]
    pub fn only(passes: impl IntoIterator<Item = Pass>) -> Self {
        Self {
            passes: passes.into_iter().collect(),
            thresholds: Thresholds::default(),
        }
    }

    /// Enables a pass.
    #[must_use]
    pub fn with(mut self, pass: Pass) -> Self {
        self.passes.insert(pass);
        self
    }

    /// Disables a pass.
    #[must_use]
    pub fn without(mut self, pass: Pass) -> Self {
        self.passes.remove(&pass);
        self
    }

    /// Replaces the limits.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Whether the pass is enabled.
    #[must_use]
    pub fn is_enabled(&self, pass: Pass) -> bool {
        self.passes.contains(&pass)
    }
}

/// The findings of one pass, in the order found.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassFindings {
    /// The pass.
    pub pass: Pass,
    /// What it found.
    pub findings: Vec<Finding>,
}

/// The results of the passes executed by [`run`]. Statistics of disabled passes are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisReport {
    /// Findings per executed checking pass, in execution order.
    pub findings: Vec<PassFindings>,
    /// Note counts per type.
    pub note_counts: Option<NoteCounts>,
    /// Notes per second.
    pub nps: Option<Nps>,
    /// Estimated difficulty level.
    pub level: Option<f64>,
    /// Normalized lane usage.
    pub heatmap: Option<Heatmap>,
    /// Speed, stamina and complexity.
    pub skill: Option<SkillRating>,
}

impl AnalysisReport {
    /// The findings of a pass, empty if it did not run.
    #[must_use]
    pub fn findings_of(&self, pass: Pass) -> &[Finding] {
        self.findings
            .iter()
            .find(|found| found.pass == pass)
            .map(|found| found.findings.as_slice())
            .unwrap_or_default()
    }

    /// Every finding of every pass, in execution order.
    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().flat_map(|found| &found.findings)
    }

    /// Whether any finding is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.all_findings()
            .any(|finding| finding.severity == Severity::Error)
    }
}

/// Executes the passes enabled in `config` over `chart`.
#[must_use]
pub fn run(chart: &Chart, config: &CheckConfig) -> AnalysisReport {
    let thresholds = &config.thresholds;
    let mut report = AnalysisReport::default();
    for &pass in &config.passes {
        let findings = match pass {
            Pass::General => general::check_general(chart),
            Pass::InvalidNotes => notes::check_invalid_notes(chart),
            Pass::OverlappingNotes => notes::check_overlapping_notes(chart),
            Pass::SmallNotes => notes::check_small_notes(chart, thresholds),
            Pass::InvalidHolds => holds::check_invalid_holds(chart),
            Pass::UnbakedHolds => holds::check_unbaked_holds(chart, thresholds),
            Pass::HighEBpm => playability::check_high_ebpm(chart, thresholds),
            Pass::VisionBlocks => playability::check_vision_blocks(chart, thresholds),
            Pass::Parity => general::list_parity(chart),
            Pass::NoteCounts => {
                report.note_counts = Some(stats::note_counts(chart));
                continue;
            }
            Pass::Nps => {
                report.nps = Some(stats::notes_per_second(chart, thresholds));
                continue;
            }
            Pass::Level => {
                report.level = Some(stats::level(&stats::skill_rating(chart, thresholds)));
                continue;
            }
            Pass::Heatmap => {
                report.heatmap = Some(stats::heatmap(chart));
                continue;
            }
            Pass::SkillRating => {
                report.skill = Some(stats::skill_rating(chart, thresholds));
                continue;
            }
        };
        log::debug!("{pass:?}: {} findings", findings.len());
        report.findings.push(PassFindings { pass, findings });
    }
    report
}
