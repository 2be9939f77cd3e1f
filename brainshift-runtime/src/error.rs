//! Runtime error types for the Brainshift VM
//!
//! Any of these ends the run at the instruction that raised it. Arithmetic
//! overflow on `A`, `M` and `S` is not an error; it goes to the zero flag.

use brainshift_preprocessor::SyntaxError;
use brainshift_spec::{Address, SpecError};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Pointer moved left of cell 0")]
    PointerUnderflow,

    #[error("Tape overflow: limit is {limit} cells")]
    TapeOverflow { limit: usize },

    #[error("Return with an empty call stack")]
    CallStackUnderflow,

    #[error("Call stack overflow: depth limit is {depth}")]
    CallStackOverflow { depth: usize },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Input exhausted")]
    InputExhausted,

    #[error("Step limit exceeded: {limit}")]
    StepLimitExceeded { limit: u64 },

    #[error("Deadline exceeded: {budget:?}")]
    DeadlineExceeded { budget: Duration },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Invalid program: {0}")]
    InvalidProgram(#[from] SpecError),

    #[error("Instruction address overflow at {ip}")]
    AddressOverflow { ip: Address },
}

impl RuntimeError {
    /// Check if the fault came from the caller's execution budget rather
    /// than from the program itself
    pub fn is_budget(&self) -> bool {
        matches!(
            self,
            RuntimeError::StepLimitExceeded { .. } | RuntimeError::DeadlineExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
