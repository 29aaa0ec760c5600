//! Fancy diagnostics support using `ariadne`.
//!
//! This module provides convenient methods to convert the warnings and errors carrying a
//! [`SourceRangeMixin`] (such as [`LexWarningWithRange`], [`ParseWarningWithRange`],
//! [`ParseErrorWithRange`] and the aggregated [`MerWarning`]), and the analysis [`Finding`]s, to
//! `ariadne::Report` without modifying their definitions.
//!
//! Since [`SourceRangeMixin`] contains byte span information, ariadne handles the row and column
//! calculations for display. Findings point at a measure and tick rather than a source span, so
//! they are reported without a label.
//!
//! # Usage Example
//!
//! ```rust
//! use mer_rs::{diagnostics::emit_mer_warnings, parse_mer};
//!
//! let source = "#MUSIC_FILE_PATH song.wav\n#BODY\n0 0 2 120.000000\n0 0 3 4 4\n0 0 4\n";
//! let output = parse_mer(source);
//!
//! // the unknown object id 4 is reported
//! emit_mer_warnings("chart.mer", source, &output.warnings);
//! ```
//!
//! [`SourceRangeMixin`]: crate::command::mixin::SourceRangeMixin
//! [`LexWarningWithRange`]: crate::lex::LexWarningWithRange
//! [`ParseWarningWithRange`]: crate::parse::ParseWarningWithRange
//! [`ParseErrorWithRange`]: crate::parse::ParseErrorWithRange
//! [`MerWarning`]: crate::MerWarning
//! [`Finding`]: crate::analysis::Finding

use std::ops::Range;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::{MerWarning, analysis::Finding};

/// Simple source container that holds the filename and source text.
/// Ariadne will automatically handle row/column calculations from byte offsets.
///
/// # Usage Example
///
/// ```rust
/// use mer_rs::diagnostics::SimpleSource;
///
/// let source_text = "#BODY\n0 0 2 120.000000\n";
/// let source = SimpleSource::new("chart.mer", source_text);
///
/// assert_eq!(source.text(), source_text);
/// assert_eq!(source.name(), "chart.mer");
/// ```
pub struct SimpleSource<'a> {
    /// Name of the source file.
    name: &'a str,
    /// Source text content.
    text: &'a str,
}

impl<'a> SimpleSource<'a> {
    /// Create a new source container instance.
    ///
    /// # Parameters
    /// * `name` - Name of the source file
    /// * `text` - Complete text content of the source file
    #[must_use]
    pub const fn new(name: &'a str, text: &'a str) -> Self {
        Self { name, text }
    }

    /// Get source text content.
    #[must_use]
    pub const fn text(&self) -> &'a str {
        self.text
    }

    /// Get source file name.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }
}

/// Trait for converting positioned errors to `ariadne::Report`.
pub trait ToAriadne {
    /// Convert error to ariadne Report.
    ///
    /// # Parameters
    /// * `src` - Source file container (used for filename, ariadne handles row/column calculation)
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)>;
}

/// Helper to build a styled ariadne `Report` consistently.
///
/// This reduces duplication across the `ToAriadne` implementations.
#[must_use]
pub fn build_report<'a>(
    src: &SimpleSource<'a>,
    kind: ReportKind<'a>,
    range: Range<usize>,
    title: &str,
    label_message: impl ToString,
    color: Color,
) -> Report<'a, (String, Range<usize>)> {
    let filename = src.name().to_string();
    Report::build(kind, (filename.clone(), range.clone()))
        .with_message(title)
        .with_label(
            Label::new((filename, range))
                .with_message(label_message.to_string())
                .with_color(color),
        )
        .finish()
}

impl ToAriadne for MerWarning {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        match self {
            Self::LexWarning(warning) => warning.to_report(src),
            Self::ParseWarning(warning) => warning.to_report(src),
        }
    }
}

impl ToAriadne for Finding {
    fn to_report<'a>(&self, src: &SimpleSource<'a>) -> Report<'a, (String, Range<usize>)> {
        use crate::analysis::Severity;

        let kind = match self.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Suggestion => ReportKind::Advice,
            Severity::Debug => ReportKind::Custom("Debug", Color::Cyan),
        };
        Report::build(kind, (src.name().to_string(), 0..0))
            .with_message(&self.message)
            .finish()
    }
}

/// Convenience method: batch render a [`MerWarning`] list.
///
/// # Parameters
/// * `name` - Name of the source file, used for display in diagnostic information
/// * `source` - Complete MER source text
/// * `warnings` - List of warnings to display
pub fn emit_mer_warnings<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a MerWarning>,
) {
    emit(name, source, warnings);
}

/// Convenience method: batch render the findings of an analysis.
pub fn emit_findings<'a>(
    name: &'a str,
    source: &'a str,
    findings: impl IntoIterator<Item = &'a Finding>,
) {
    emit(name, source, findings);
}

fn emit<'a, T: ToAriadne + 'a>(
    name: &'a str,
    source: &'a str,
    items: impl IntoIterator<Item = &'a T>,
) {
    let simple = SimpleSource::new(name, source);
    let ariadne_source = Source::from(source);
    for item in items {
        let report = item.to_report(&simple);
        let _ = report.eprint((name.to_string(), ariadne_source.clone()));
    }
}

/// Collect `ariadne::Report` instances for a list of [`MerWarning`] without printing.
///
/// This is useful in tests to verify diagnostics can be generated while keeping test output clean.
#[must_use]
pub fn collect_mer_reports<'a>(
    name: &'a str,
    source: &'a str,
    warnings: impl IntoIterator<Item = &'a MerWarning>,
) -> Vec<Report<'a, (String, Range<usize>)>> {
    let simple = SimpleSource::new(name, source);
    warnings.into_iter().map(|w| w.to_report(&simple)).collect()
}
