//! Definitions of the token in a MER chart body.

use crate::command::mixin::SourceRangeMixin;

/// A non-blank body line split on whitespace.
///
/// The first three fields are `measure`, `tick` and the object id; the meaning of the rest depends
/// on the object id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token<'a> {
    /// The line number of the source, starts with 1.
    pub line: usize,
    /// The whitespace separated fields.
    pub fields: Vec<&'a str>,
}

/// A token with its byte range in the source.
pub type TokenWithRange<'a> = SourceRangeMixin<Token<'a>>;

impl<'a> Token<'a> {
    /// Splits a line into a token. Returns `None` for a blank line.
    #[must_use]
    pub fn parse(line: usize, text: &'a str) -> Option<Self> {
        let fields: Vec<_> = text.split_whitespace().collect();
        (!fields.is_empty()).then_some(Self { line, fields })
    }

    /// Gets the field at `index`, if present.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// The number of fields in the line.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the token has no fields. Never true for a token made by [`Token::parse`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let token = Token::parse(3, "  1 960\t1 16  10 25 7 ").expect("not blank");
        assert_eq!(token.line, 3);
        assert_eq!(token.fields, vec!["1", "960", "1", "16", "10", "25", "7"]);
        assert_eq!(token.field(6), Some("7"));
        assert_eq!(token.field(7), None);
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(Token::parse(1, ""), None);
        assert_eq!(Token::parse(1, " \t "), None);
    }
}
