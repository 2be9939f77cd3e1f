//! # Brainshift VM Core Types
//!
//! Core types shared by the Brainshift toolchain: the opcode table, resolved
//! instructions, label tables and programs.
//!
//! ## Key Features
//! - 8-bit cells on a tape that grows to the right
//! - 29 single-character opcodes (Brainfuck plus logic, arithmetic, flags,
//!   labels and subroutines)
//! - Labels resolved to instruction offsets before execution
//! - Deterministic canonical encoding and SHA-256 program digests

pub mod opcode;
pub mod instruction;
pub mod label;
pub mod error;
pub mod program;

pub use opcode::{InstructionFamily, Opcode};
pub use instruction::{spell_label, Instruction, LabelRef, Template};
pub use label::LabelTable;
pub use error::SpecError;
pub use program::Program;

/// Tape cell (8-bit, wraps modulo 256)
pub type Cell = u8;

/// Instruction offset within a program
pub type Address = usize;

/// Label definition prefix
pub const LABEL_SIGIL: char = '*';

/// Comment delimiter
pub const COMMENT_DELIMITER: char = '"';

/// Default tape size in cells
pub const DEFAULT_TAPE_LEN: usize = 65_536;

/// Default call stack depth
pub const DEFAULT_CALL_DEPTH: usize = 4_096;
