//! # Error Types for the Brainshift core types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("Program encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Label '{name}' points past the end of the program (offset {offset}, length {len})")]
    LabelOutOfRange {
        name: String,
        offset: usize,
        len: usize,
    },

    #[error("Bracket at {at} points to {target}, which is not its partner")]
    BracketMismatch { at: usize, target: usize },
}

pub type Result<T> = std::result::Result<T, SpecError>;
