//! Error types
//!
//! Decode TIDAK punya error channel: semua hasil decode direpresentasikan
//! lewat presence flag (`has_value`). Error di sini hanya untuk encode
//! (buffer kurang besar) dan untuk store (I/O).

use thiserror::Error;

/// Error saat menulis frame ke buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Buffer lebih kecil dari `ENCODED_SIZE`
    #[error("buffer too small: need {needed} bytes, got {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Error dari mmap-backed config store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Record tidak muat di slot
    #[error("record of {needed} bytes does not fit slot capacity {capacity}")]
    RecordTooLarge { needed: usize, capacity: usize },

    /// Slot capacity nol
    #[error("invalid slot capacity {0}")]
    InvalidCapacity(usize),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
