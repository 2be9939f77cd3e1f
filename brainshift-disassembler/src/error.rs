//! Disassembler errors

use brainshift_spec::SpecError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Invalid program: {0}")]
    InvalidProgram(#[from] SpecError),

    #[error("Label name {name:?} cannot be written as source")]
    UnprintableLabel { name: String },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
