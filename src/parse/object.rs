//! Builds one chart object from one body token.

use std::str::FromStr;

use crate::{
    command::{
        GimmickType, MaskDirection, NONE_OBJECT_ID, NOTE_OBJECT_ID, NoteType,
        mixin::SourceRangeMixinExt,
        time::ObjTime,
    },
    lex::token::TokenWithRange,
    model::{
        NoteId,
        gimmick::{Gimmick, GimmickKind, TimeSignature},
        note::Note,
    },
};

use super::{ParseError, ParseErrorWithRange, ParseWarning, ParseWarningWithRange};

/// The object a token stands for.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParsedObject {
    /// A note, with the author line index and the declared next hold reference.
    Note {
        note: Note,
        line_index: i32,
        reference: Option<i32>,
    },
    Gimmick(Gimmick),
    /// A no-op or unrecognized line.
    Skip,
}

struct FieldReader<'t, 'a> {
    token: &'t TokenWithRange<'a>,
}

impl FieldReader<'_, '_> {
    fn len(&self) -> usize {
        self.token.content().len()
    }

    fn optional<T: FromStr>(
        &self,
        index: usize,
        name: &'static str,
    ) -> Result<Option<T>, ParseErrorWithRange> {
        let Some(text) = self.token.content().field(index) else {
            return Ok(None);
        };
        text.parse().map(Some).map_err(|_| {
            ParseError::InvalidNumber {
                field: name,
                text: text.to_string(),
            }
            .into_wrapper(self.token)
        })
    }

    fn required<T: FromStr>(
        &self,
        index: usize,
        name: &'static str,
    ) -> Result<T, ParseErrorWithRange> {
        self.optional(index, name)?.ok_or_else(|| {
            ParseError::MissingField {
                field: name,
                line: self.token.content().line,
            }
            .into_wrapper(self.token)
        })
    }
}

/// Converts a token into a [`ParsedObject`]. The note, if any, gets the id `next_id`.
///
/// # Errors
///
/// Fails if a required field is absent or a numeric field is malformed.
pub(crate) fn build_object(
    token: &TokenWithRange<'_>,
    next_id: NoteId,
    warnings: &mut Vec<ParseWarningWithRange>,
) -> Result<ParsedObject, ParseErrorWithRange> {
    let reader = FieldReader { token };
    let measure = reader.required(0, "measure")?;
    let tick = reader.required(1, "tick")?;
    let object_id: i32 = reader.required(2, "object id")?;
    let offset = ObjTime::new(measure, tick);

    match object_id {
        NONE_OBJECT_ID => Ok(ParsedObject::Skip),
        NOTE_OBJECT_ID => build_note(&reader, offset, next_id),
        _ => {
            let Some(gimmick_type) = GimmickType::from_id(object_id) else {
                warnings.push(ParseWarning::UnknownObject(object_id).into_wrapper(token));
                return Ok(ParsedObject::Skip);
            };
            build_gimmick(&reader, offset, gimmick_type, warnings).map(ParsedObject::Gimmick)
        }
    }
}

fn build_note(
    reader: &FieldReader<'_, '_>,
    offset: ObjTime,
    id: NoteId,
) -> Result<ParsedObject, ParseErrorWithRange> {
    let type_id = reader.required(3, "note type")?;
    let line_index = reader.required(4, "note index")?;
    let position = reader.required(5, "position")?;
    let size = reader.required(6, "size")?;

    let mut note = Note::new(id, offset, type_id, position, size);
    let mut reference = None;
    if note.note_type.is_hold_link() {
        reference = reader.optional(8, "hold reference")?;
    }
    if note.note_type.is_mask() {
        note.mask_direction = MaskDirection::from_id(reader.required(8, "mask direction")?);
    }

    Ok(ParsedObject::Note {
        note,
        line_index,
        reference,
    })
}

fn build_gimmick(
    reader: &FieldReader<'_, '_>,
    offset: ObjTime,
    gimmick_type: GimmickType,
    warnings: &mut Vec<ParseWarningWithRange>,
) -> Result<Gimmick, ParseErrorWithRange> {
    let kind = match gimmick_type {
        GimmickType::BeatsPerMinute => {
            let bpm = reader.optional(3, "bpm")?;
            if bpm.is_none() {
                warnings.push(
                    ParseWarning::MissingGimmickValue(gimmick_type).into_wrapper(reader.token),
                );
            }
            GimmickKind::BeatsPerMinute(bpm.unwrap_or_default())
        }
        GimmickType::HiSpeed => {
            let speed = reader.optional(3, "hi-speed")?;
            if speed.is_none() {
                warnings.push(
                    ParseWarning::MissingGimmickValue(gimmick_type).into_wrapper(reader.token),
                );
            }
            GimmickKind::HiSpeed(speed.unwrap_or_default())
        }
        GimmickType::TimeSignature => {
            let sig = match reader.len() {
                // Some old charts carry the numerator only, the denominator is then taken to be
                // the numerator itself. Only exactly four fields trigger this.
                4 => {
                    let upper = reader.required(3, "time signature upper")?;
                    warnings.push(ParseWarning::ShortTimeSignature.into_wrapper(reader.token));
                    TimeSignature::new(upper, upper)
                }
                len if len > 4 => TimeSignature::new(
                    reader.required(3, "time signature upper")?,
                    reader.required(4, "time signature lower")?,
                ),
                _ => {
                    warnings.push(
                        ParseWarning::MissingGimmickValue(gimmick_type).into_wrapper(reader.token),
                    );
                    TimeSignature::default()
                }
            };
            GimmickKind::TimeSignature(sig)
        }
        GimmickType::ReverseEffectStart => GimmickKind::ReverseEffectStart,
        GimmickType::ReverseEffectEnd => GimmickKind::ReverseEffectEnd,
        GimmickType::ReverseNoteEnd => GimmickKind::ReverseNoteEnd,
        GimmickType::StopStart => GimmickKind::StopStart,
        GimmickType::StopEnd => GimmickKind::StopEnd,
    };
    Ok(Gimmick::new(offset, kind))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{command::BonusType, lex::token::Token};

    fn token(line: &str) -> TokenWithRange<'_> {
        Token::parse(1, line)
            .expect("not blank")
            .into_wrapper_range(0..line.len())
    }

    fn build(line: &str) -> (Result<ParsedObject, ParseError>, Vec<ParseWarning>) {
        let mut warnings = vec![];
        let object = build_object(&token(line), NoteId(3), &mut warnings);
        (
            object.map_err(|e| e.into_content()),
            warnings.into_iter().map(|w| w.into_content()).collect(),
        )
    }

    #[test]
    fn hold_with_reference() {
        let (object, warnings) = build("2 480 1 9 5 10 8 1 7");
        assert_eq!(warnings, vec![]);
        let Ok(ParsedObject::Note {
            note,
            line_index,
            reference,
        }) = object
        else {
            panic!("expected a note");
        };
        assert_eq!(note.id, NoteId(3));
        assert_eq!(note.offset, ObjTime::new(2, 480));
        assert_eq!(note.note_type, NoteType::HoldStart);
        assert_eq!((note.position, note.size), (10, 8));
        assert_eq!(line_index, 5);
        assert_eq!(reference, Some(7));
    }

    #[test]
    fn reference_is_ignored_on_other_notes() {
        let (object, _) = build("0 0 1 20 0 0 15 1 4");
        let Ok(ParsedObject::Note {
            note, reference, ..
        }) = object
        else {
            panic!("expected a note");
        };
        assert_eq!((note.note_type, note.bonus_type), (NoteType::Touch, BonusType::RNote));
        assert_eq!(reference, None);
    }

    #[test]
    fn mask_direction_is_required() {
        let (object, _) = build("0 0 1 12 0 0 60 1 2");
        let Ok(ParsedObject::Note { note, .. }) = object else {
            panic!("expected a note");
        };
        assert_eq!(note.mask_direction, MaskDirection::Center);

        let (object, _) = build("0 0 1 13 0 0 60 1");
        assert_eq!(
            object,
            Err(ParseError::MissingField {
                field: "mask direction",
                line: 1
            })
        );
    }

    #[test]
    fn short_time_signature_repeats_numerator() {
        let (object, warnings) = build("0 0 3 3");
        assert_eq!(
            object,
            Ok(ParsedObject::Gimmick(Gimmick::new(
                ObjTime::new(0, 0),
                GimmickKind::TimeSignature(TimeSignature::new(3, 3))
            )))
        );
        assert_eq!(warnings, vec![ParseWarning::ShortTimeSignature]);
    }

    #[test]
    fn missing_values_default() {
        let (object, warnings) = build("4 0 5");
        assert_eq!(
            object,
            Ok(ParsedObject::Gimmick(Gimmick::new(
                ObjTime::new(4, 0),
                GimmickKind::HiSpeed(0.0)
            )))
        );
        assert_eq!(
            warnings,
            vec![ParseWarning::MissingGimmickValue(GimmickType::HiSpeed)]
        );
    }

    #[test]
    fn skips_noop_and_unknown_ids() {
        assert_eq!(build("0 0 0"), (Ok(ParsedObject::Skip), vec![]));
        assert_eq!(
            build("0 0 4 1.0"),
            (Ok(ParsedObject::Skip), vec![ParseWarning::UnknownObject(4)])
        );
    }

    #[test]
    fn malformed_number_is_fatal() {
        let (object, _) = build("0 0 2 fast");
        assert_eq!(
            object,
            Err(ParseError::InvalidNumber {
                field: "bpm",
                text: "fast".to_string()
            })
        );
        let (object, _) = build("0 x 1 1 0 0 10 1");
        assert_eq!(
            object,
            Err(ParseError::InvalidNumber {
                field: "tick",
                text: "x".to_string()
            })
        );
    }

    #[test]
    fn short_note_line_is_fatal() {
        let (object, _) = build("0 0 1 1 0 15");
        assert_eq!(
            object,
            Err(ParseError::MissingField {
                field: "size",
                line: 1
            })
        );
    }
}
