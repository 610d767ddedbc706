//! Integration tests for note indexing and transcription
//!
//! These tests run the full add/sort/annotate/build pipeline and the JSON
//! ingestion path used by the command line tool

use flate2::write::GzEncoder;
use flate2::Compression;
use notegraph::index::{NoteTable, OrganizedNoteIndex};
use notegraph::io::{EventEncoder, JsonNoteSource, NoteSink, NoteSource};
use notegraph::model::{NoteRecord, SoundEvent};
use notegraph::pipeline::{self, Options};
use notegraph::transcript::{DeltaTimeComputer, Frame, TerminalGap, TranscriptBuilder};
use notegraph::Error;
use std::io::Write;
use tempfile::tempdir;

fn note(time_position: u32, channel: u8, pitch: u8, duration_ticks: u32) -> NoteRecord {
    NoteRecord::new(time_position, 0, duration_ticks, channel, pitch, 100)
}

/// Notes of a short two-channel piece, deliberately out of order
fn piece() -> Vec<NoteRecord> {
    vec![
        note(8, 0, 72, 4),
        note(0, 0, 60, 4),
        note(0, 1, 36, 8),
        note(4, 0, 67, 2),
        note(0, 0, 64, 4),
        note(8, 1, 43, 8),
        note(4, 0, 71, 2),
        note(12, 0, 74, 4),
    ]
}

const PIECE_JSON: &str = r#"[
  {"time_position": 4, "wait_ticks": 4, "duration_ticks": 2, "channel": 0, "pitch": 67, "velocity": 100},
  {"time_position": 0, "duration_ticks": 4, "channel": 0, "pitch": 60, "velocity": 100},
  {"time_position": 0, "duration_ticks": 4, "channel": 0, "pitch": 64, "velocity": 100}
]"#;

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_end_to_end_example() {
    let notes = vec![note(0, 0, 60, 4), note(0, 0, 64, 4), note(4, 0, 67, 2)];

    let mut index = OrganizedNoteIndex::new();
    index.add_all(notes);
    index.sort();
    DeltaTimeComputer::new().run(&mut index).unwrap();
    let transcript = TranscriptBuilder::new().build(index).unwrap();

    let events = transcript.sound_events(0).unwrap();
    assert_eq!(events.len(), 2);

    assert!(events[0].is_chord());
    assert_eq!(events[0].len(), 2);
    for n in events[0].iter() {
        assert_eq!((n.previous_gap_ticks, n.next_gap_ticks), (0, 4));
    }

    assert!(!events[1].is_chord());
    assert_eq!(events[1].first().previous_gap_ticks, 4);
    assert_eq!(events[1].first().pitch, 67);
}

#[test]
fn test_grouping_completeness() {
    let mut index = OrganizedNoteIndex::new();
    index.add_all(piece());
    index.sort();
    DeltaTimeComputer::new().run(&mut index).unwrap();

    let expected: Vec<(u32, u8, Vec<u8>)> = index
        .iter()
        .map(|(t, ch, bucket)| (t, ch, bucket.keys().copied().collect()))
        .collect();

    let transcript = TranscriptBuilder::new().build(index).unwrap();
    for channel in transcript.channels() {
        let cells: Vec<&(u32, u8, Vec<u8>)> =
            expected.iter().filter(|(_, ch, _)| *ch == channel).collect();
        let events = transcript.sound_events(channel).unwrap();
        assert_eq!(events.len(), cells.len());

        for (event, (t, _, pitches)) in events.iter().zip(cells) {
            assert_eq!(event.time_position(), *t);
            let mut got: Vec<u8> = event.iter().map(|n| n.pitch).collect();
            got.sort_unstable();
            assert_eq!(&got, pitches);
        }
    }
}

#[test]
fn test_tracks_ascending_and_gaps() {
    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();

    let ch0: Vec<u32> = transcript
        .sound_events(0)
        .unwrap()
        .iter()
        .map(SoundEvent::time_position)
        .collect();
    assert_eq!(ch0, vec![0, 4, 8, 12]);

    // bass only plays at 0 and 8, but gaps follow the global timeline
    let bass = transcript.sound_events(1).unwrap();
    assert_eq!(bass.len(), 2);
    assert_eq!(bass[0].first().next_gap_ticks, 4);
    assert_eq!(bass[1].first().previous_gap_ticks, 4);
}

#[test]
fn test_sound_event_sorted_by_next_gap() {
    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();
    for events in transcript.tracks().values() {
        for event in events {
            let gaps: Vec<u32> = event.iter().map(|n| n.next_gap_ticks).collect();
            assert!(gaps.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}

#[test]
fn test_terminal_gap_policy() {
    let options = Options {
        terminal_gap: TerminalGap::EndOfPiece(16),
        ..Options::default()
    };
    let transcript = pipeline::transcribe(piece(), &options).unwrap();
    let last = transcript.sound_events(0).unwrap().last().unwrap();
    assert_eq!(last.first().next_gap_ticks, 4);

    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();
    let last = transcript.sound_events(0).unwrap().last().unwrap();
    assert_eq!(last.first().next_gap_ticks, 0);
}

#[test]
fn test_unsorted_index_rejected() {
    let mut index = OrganizedNoteIndex::new();
    index.add_all(piece());
    assert!(matches!(
        DeltaTimeComputer::new().run(&mut index),
        Err(Error::IndexNotSorted)
    ));
}

// =============================================================================
// Frames
// =============================================================================

#[test]
fn test_frame_windowing() {
    let options = Options {
        frame_size: Some(3),
        frame_stride: Some(1),
        ..Options::default()
    };
    let transcript = pipeline::transcribe(piece(), &options).unwrap();
    let framed = pipeline::frames(&transcript, &options).unwrap();

    let melody = &framed[&0];
    assert_eq!(melody.len(), 2);
    assert!(melody.iter().all(Frame::is_full));
    assert_eq!(melody[1].first().unwrap().time_position(), 4);
    assert_eq!(melody[1].last_sound_event().unwrap().time_position(), 12);

    let bass = &framed[&1];
    assert_eq!(bass.len(), 1);
    assert!(!bass[0].is_full());
}

#[test]
fn test_filling_frames_by_hand() {
    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();

    let mut frames = Vec::new();
    let mut frame = Frame::new(2);
    for event in transcript.sound_events(0).unwrap() {
        if frame.is_full() {
            frames.push(std::mem::replace(&mut frame, Frame::new(2)));
        }
        frame.add(event.clone()).unwrap();
    }
    frames.push(frame);

    assert_eq!(frames.len(), 2);
    assert!(frames.iter().all(Frame::is_full));
}

// =============================================================================
// Ingestion and re-encoding
// =============================================================================

#[test]
fn test_json_file_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json");
    std::fs::write(&path, PIECE_JSON).unwrap();

    let mut source = JsonNoteSource::open(&path).unwrap();
    let transcript = pipeline::transcribe_source(&mut source, &Options::default()).unwrap();
    assert_eq!(transcript.sound_events(0).unwrap().len(), 2);
}

#[test]
fn test_gzip_file_source() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.json.gz");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(PIECE_JSON.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let notes = JsonNoteSource::open(&path).unwrap().read_notes().unwrap();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].wait_ticks, 4);
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    let result = JsonNoteSource::open(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_reencode_transcript() {
    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();

    let mut encoder = EventEncoder::new();
    for event in transcript.sound_events(0).unwrap() {
        encoder.write_sound_event(event, 5).unwrap();
    }

    let events = encoder.into_events();
    assert_eq!(events.len(), 2 * 6);
    assert!(events.iter().all(|e| e.channel() == 5));
    assert_eq!(events.iter().filter(|e| e.is_new_note()).count(), 6);
}

#[test]
fn test_transcript_json_shape() {
    let transcript = pipeline::transcribe(piece(), &Options::default()).unwrap();
    let value = serde_json::to_value(&transcript).unwrap();

    let tracks = value["tracks"].as_object().unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks["0"][0]["notes"].as_array().unwrap().len(), 2);
}
