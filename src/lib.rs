//! The MER format parser and chart checker.
//!
//! MER is the text chart format of a circular-lane rhythm game. A chart file is a metadata
//! preamble, then a `#BODY` marker, then one object per line: notes placed on a 60 position
//! ring, and gimmicks changing the tempo, the scroll speed, stops and reverses.
//!
//! This crate reads such a file into a fully timed [`Chart`](model::Chart), infers which hand hits
//! each note, and runs the authoring checks and statistics of [`analysis`] over it.
//!
//! # Usage
//!
//! - [`parse_mer`] runs the whole pipeline on source text and returns a [`MerOutput`].
//! - [`lex::parse_lex_tokens`] and [`Chart::from_tokens`](model::Chart::from_tokens) run the two
//!   stages separately.
//! - [`analysis::run`] executes the passes selected in an [`analysis::CheckConfig`].
//!
//! ```
//! use mer_rs::{
//!     analysis::{self, CheckConfig, Pass},
//!     parse_mer,
//! };
//!
//! let source = "#MUSIC_SCORE_ID 0\n#BODY\n0 0 2 120.000000\n0 0 3 4 4\n1 0 1 1 0 15 10 1\n";
//! let output = parse_mer(source);
//! assert!(output.is_loaded());
//!
//! let chart = output.chart.expect("loaded");
//! // one measure at 120 BPM in 4/4 lasts 2000 ms
//! assert_eq!(chart.notes().next().map(|note| note.time), Some(2000.0));
//!
//! let report = analysis::run(&chart, &CheckConfig::only([Pass::General]));
//! assert_eq!(
//!     report.findings_of(Pass::General)[0].message,
//!     "No EndOfChart note found!"
//! );
//! ```
//!
//! # Features
//!
//! - `diagnostics` (default): renders warnings, errors and findings with `ariadne`, see
//!   [`diagnostics`].
//! - `serde`: derives `Serialize` and `Deserialize` on the model, the warnings and the reports.
//!
//! # Logging
//!
//! Progress is reported through the `log` facade. Install any logger to see it.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod analysis;
pub mod command;
#[cfg(feature = "diagnostics")]
#[cfg_attr(docsrs, doc(cfg(feature = "diagnostics")))]
pub mod diagnostics;
pub mod lex;
pub mod model;
pub mod parity;
pub mod parse;
pub mod prelude;

use thiserror::Error;

use self::{
    lex::{LexOutput, LexWarningWithRange},
    model::Chart,
    parse::{ParseErrorWithRange, ParseOutput, ParseWarningWithRange},
};

/// A non-fatal problem found while reading a MER file.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MerWarning {
    /// A warning from the lexical analyzer.
    #[error("Warn: lex: {0}")]
    LexWarning(#[from] LexWarningWithRange),
    /// A warning from the parser.
    #[error("Warn: parse: {0}")]
    ParseWarning(#[from] ParseWarningWithRange),
}

/// Output of reading a MER file.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct MerOutput {
    /// The parsed chart, or the error which made it impossible to load.
    pub chart: Result<Chart, ParseErrorWithRange>,
    /// Warnings that occurred while reading.
    pub warnings: Vec<MerWarning>,
}

impl MerOutput {
    /// Whether the chart was loaded.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.chart.is_ok()
    }
}

/// Parses a MER file from source text.
///
/// The source is lexed, every body line is built into an object, hold references are linked,
/// every object is timed along the tempo timeline, and the parity of every note is inferred.
pub fn parse_mer(source: &str) -> MerOutput {
    let LexOutput {
        tokens,
        lex_warnings,
    } = lex::parse_lex_tokens(source);

    let ParseOutput {
        chart,
        parse_warnings,
    } = Chart::from_tokens(&tokens);

    let mut warnings: Vec<MerWarning> = lex_warnings
        .into_iter()
        .map(MerWarning::LexWarning)
        .collect();
    warnings.extend(parse_warnings.into_iter().map(MerWarning::ParseWarning));

    MerOutput { chart, warnings }
}
