use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No note at tick {time_position}, channel {channel}, pitch {pitch}")]
    NoteNotFound {
        time_position: u32,
        channel: u8,
        pitch: u8,
    },

    #[error("Note index is empty")]
    EmptyIndex,

    #[error("Channel {0} has no track")]
    ChannelNotFound(u8),

    #[error("Note index must be sorted before positional reads")]
    IndexNotSorted,

    #[error("Gaps have not been computed for this note index")]
    GapsNotComputed,

    #[error("Frame is full ({max_size} sound events)")]
    FrameFull { max_size: usize },

    #[error("Frame is empty")]
    EmptyFrame,

    #[error("Invalid frame size {max_size} with stride {stride}")]
    InvalidFrameSize { max_size: usize, stride: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
