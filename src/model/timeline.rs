//! The merged tempo timeline, and conversion from chart offsets into milliseconds.
//!
//! BPM and time signature changes are merged into one list of [`TimelineEntry`], one per distinct
//! global tick, each carrying the effective BPM and time signature from its tick onwards. Absolute
//! time is then integrated piecewise: inside a segment the tempo and signature are constant.

use itertools::Itertools;

use crate::{
    command::time::ObjTime,
    parse::{ParseError, Result},
};

use super::{
    ChartObject,
    gimmick::{Gimmick, GimmickKind, TimeSignature},
};

/// Milliseconds in a minute.
const MILLIS_PER_MINUTE: f64 = 60000.0;

/// A fully populated tempo state, valid from its offset until the next entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimelineEntry {
    /// Where the state starts.
    pub offset: ObjTime,
    /// Effective beats per minute.
    pub bpm: f64,
    /// Effective time signature.
    pub time_sig: TimeSignature,
    /// Absolute time of `offset` in milliseconds.
    pub time: f64,
}

impl TimelineEntry {
    /// The time at `offset`, assuming this entry's state holds from its own offset up to there.
    #[must_use]
    pub fn time_at(&self, offset: ObjTime) -> f64 {
        let measure_delta = offset.measures() - self.offset.measures();
        self.time + measure_delta * (4.0 * self.time_sig.ratio() * (MILLIS_PER_MINUTE / self.bpm))
    }
}

#[derive(Debug, Clone, Copy)]
enum TempoChange {
    Bpm(f64),
    TimeSig(TimeSignature),
}

/// The merged tempo timeline of a chart.
///
/// Never empty: building fails when the chart has no BPM or no time signature.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

impl Timeline {
    /// Merges the BPM and time signature gimmicks into a timeline and computes the entry times.
    ///
    /// Gimmicks of other kinds are ignored. Changes at the same global tick are coalesced into one
    /// entry, where the later one in sort order wins. The first entry takes the first BPM and the
    /// first time signature in file order, wherever they are placed.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MissingTempo`] or [`ParseError::MissingTimeSignature`] if either
    /// kind of change is absent.
    pub fn build<'a>(gimmicks: impl IntoIterator<Item = &'a Gimmick>) -> Result<Self> {
        let (bpm_changes, sig_changes): (Vec<_>, Vec<_>) = gimmicks
            .into_iter()
            .filter_map(|gimmick| match gimmick.kind {
                GimmickKind::BeatsPerMinute(bpm) => Some((gimmick.offset, TempoChange::Bpm(bpm))),
                GimmickKind::TimeSignature(sig) => {
                    Some((gimmick.offset, TempoChange::TimeSig(sig)))
                }
                _ => None,
            })
            .partition(|(_, change)| matches!(change, TempoChange::Bpm(_)));

        let Some(&(_, TempoChange::Bpm(first_bpm))) = bpm_changes.first() else {
            return Err(ParseError::MissingTempo);
        };
        let Some(&(_, TempoChange::TimeSig(first_sig))) = sig_changes.first() else {
            return Err(ParseError::MissingTimeSignature);
        };

        // stable, so a BPM change sorts before a time signature change at the same tick
        let mut changes = bpm_changes
            .into_iter()
            .chain(sig_changes)
            .sorted_by_key(|(offset, _)| offset.global_tick());

        let Some((first_offset, _)) = changes.next() else {
            return Err(ParseError::MissingTempo);
        };
        let mut entries = vec![TimelineEntry {
            offset: first_offset,
            bpm: first_bpm,
            time_sig: first_sig,
            time: 0.0,
        }];

        for (offset, change) in changes {
            let Some(last) = entries.last_mut() else {
                break;
            };
            if last.offset.global_tick() == offset.global_tick() {
                match change {
                    TempoChange::Bpm(bpm) => last.bpm = bpm,
                    TempoChange::TimeSig(sig) => last.time_sig = sig,
                }
                continue;
            }
            let mut entry = TimelineEntry { offset, ..*last };
            match change {
                TempoChange::Bpm(bpm) => entry.bpm = bpm,
                TempoChange::TimeSig(sig) => entry.time_sig = sig,
            }
            entries.push(entry);
        }

        for i in 1..entries.len() {
            let (Some(prev), Some(offset)) = (
                entries.get(i - 1).copied(),
                entries.get(i).map(|entry| entry.offset),
            ) else {
                continue;
            };
            if let Some(entry) = entries.get_mut(i) {
                entry.time = prev.time_at(offset);
            }
        }

        log::debug!("built tempo timeline with {} entries", entries.len());
        Ok(Self { entries })
    }

    /// The entries, sorted by offset.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// The latest entry at or before `offset`, or the first entry if none precedes it.
    #[must_use]
    pub fn entry_at(&self, offset: ObjTime) -> Option<&TimelineEntry> {
        let target = offset.global_tick();
        let after = self
            .entries
            .partition_point(|entry| entry.offset.global_tick() <= target);
        after
            .checked_sub(1)
            .and_then(|index| self.entries.get(index))
            .or_else(|| self.entries.first())
    }

    /// The absolute time of `offset` in milliseconds. Zero on an empty timeline.
    #[must_use]
    pub fn time_at(&self, offset: ObjTime) -> f64 {
        self.entry_at(offset)
            .map_or(0.0, |entry| entry.time_at(offset))
    }

    /// Back-fills [`ChartObject::time`] of every object.
    pub fn apply<'a, T: ChartObject + 'a>(&self, objects: impl IntoIterator<Item = &'a mut T>) {
        for object in objects {
            object.set_time(self.time_at(object.offset()));
        }
    }
}
