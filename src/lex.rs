//! Lexical analyzer of MER format.
//!
//! Raw [String] == [lex] ==> [`Token`]s (in [`LexOutput`]) == [parse] ==> [`Chart`] (in
//! [`ParseOutput`])
//!
//! A chart starts with a metadata preamble that is skipped entirely. The body begins on the line
//! after the one containing [`BODY_MARKER`], and every non-blank body line becomes one [`Token`].
//!
//! [lex]: crate::lex::parse_lex_tokens
//! [parse]: crate::parse
//! [`Chart`]: crate::model::Chart
//! [`ParseOutput`]: crate::parse::ParseOutput

pub mod cursor;
pub mod token;

use thiserror::Error;

#[cfg(feature = "diagnostics")]
use ariadne::{Color, Report, ReportKind};

use crate::command::mixin::{SourceRangeMixin, SourceRangeMixinExt};
#[cfg(feature = "diagnostics")]
use crate::diagnostics::{SimpleSource, ToAriadne, build_report};

use self::{
    cursor::Cursor,
    token::{Token, TokenWithRange},
};

/// The token that marks the start of the chart body.
pub const BODY_MARKER: &str = "#BODY";

/// A warning occurred when lexical analysis.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LexWarning {
    /// No line contains the body marker, so the body is empty.
    #[error("body marker `#BODY` not found")]
    MissingBodyMarker,
}

/// A lex warning with position information.
pub type LexWarningWithRange = SourceRangeMixin<LexWarning>;

/// Lex Parsing Results, includes tokens and warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOutput<'a> {
    /// tokens
    pub tokens: Vec<TokenWithRange<'a>>,
    /// warnings
    pub lex_warnings: Vec<LexWarningWithRange>,
}

/// Analyzes and converts the MER format text into [`Token`]s.
#[must_use]
pub fn parse_lex_tokens(source: &str) -> LexOutput<'_> {
    let mut cursor = Cursor::new(source);

    let mut found_body = false;
    while let Some((_, line)) = cursor.next_line_with_range() {
        if line.contains(BODY_MARKER) {
            found_body = true;
            break;
        }
    }
    if !found_body {
        log::debug!("no body marker in {} bytes of source", source.len());
        return LexOutput {
            tokens: vec![],
            lex_warnings: vec![LexWarning::MissingBodyMarker.into_wrapper_range(0..source.len())],
        };
    }

    let mut tokens = vec![];
    loop {
        let line_number = cursor.line();
        let Some((range, line)) = cursor.next_line_with_range() else {
            break;
        };
        if let Some(token) = Token::parse(line_number, line) {
            tokens.push(token.into_wrapper_range(range));
        }
    }
    log::debug!("tokenized {} body lines", tokens.len());

    LexOutput {
        tokens,
        lex_warnings: vec![],
    }
}

#[cfg(feature = "diagnostics")]
impl ToAriadne for LexWarningWithRange {
    fn to_report<'a>(
        &self,
        src: &SimpleSource<'a>,
    ) -> Report<'a, (String, std::ops::Range<usize>)> {
        build_report(
            src,
            ReportKind::Warning,
            self.range(),
            &format!("lex: {}", self.content()),
            "the whole source was searched",
            Color::Yellow,
        )
    }
}
