//! Collaborator surfaces: note ingestion and re-encoding

pub mod sink;
pub mod source;

pub use sink::{ChannelEvent, EventEncoder, NoteSink};
pub use source::{JsonNoteSource, NoteSource};
