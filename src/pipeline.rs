//! One-call transcription of a note stream

use crate::error::Result;
use crate::index::{NoteTable, OrganizedNoteIndex};
use crate::io::NoteSource;
use crate::model::NoteRecord;
use crate::transcript::{DeltaTimeComputer, Frame, TerminalGap, Transcript, TranscriptBuilder};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transcription settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Forward gap policy for the last time position
    pub terminal_gap: TerminalGap,
    /// Sound events per frame; no framing when unset
    pub frame_size: Option<usize>,
    /// Sound events between frame starts (defaults to `frame_size`)
    pub frame_stride: Option<usize>,
}

/// Index, sort, annotate and group a set of notes
pub fn transcribe<I>(notes: I, options: &Options) -> Result<Transcript>
where
    I: IntoIterator<Item = NoteRecord>,
{
    let mut index = OrganizedNoteIndex::new();
    index.add_all(notes);
    index.sort();
    DeltaTimeComputer::with_terminal_gap(options.terminal_gap).run(&mut index)?;
    let transcript = TranscriptBuilder::new().build(index)?;
    info!(
        "transcribed {} sound events on {} channels",
        transcript.len(),
        transcript.channels().count()
    );
    Ok(transcript)
}

/// Transcribe everything a source yields
pub fn transcribe_source<S: NoteSource>(source: &mut S, options: &Options) -> Result<Transcript> {
    transcribe(source.read_notes()?, options)
}

/// Frame every track according to `options`.
///
/// Returns an empty map when no frame size is configured.
pub fn frames(transcript: &Transcript, options: &Options) -> Result<BTreeMap<u8, Vec<Frame>>> {
    let Some(max_size) = options.frame_size else {
        return Ok(BTreeMap::new());
    };
    let stride = options.frame_stride.unwrap_or(max_size);

    let mut framed = BTreeMap::new();
    for channel in transcript.channels() {
        framed.insert(channel, transcript.frames(channel, max_size, stride)?.collect());
    }
    Ok(framed)
}
