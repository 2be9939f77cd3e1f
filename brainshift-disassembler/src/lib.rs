//! # Brainshift Disassembler
//!
//! Render a resolved [`Program`] back into Brainshift source.
//!
//! The listing is canonical: comments from the original source are gone,
//! label definitions get their own lines and jump targets are written by
//! name. Building a listing reproduces the program it came from.
//!
//! ## Example
//!
//! ```rust
//! use brainshift_preprocessor::build;
//! use brainshift_disassembler::disassemble;
//!
//! let program = build("\"countdown\" +++ *top . - Z n *top ;").unwrap();
//! let listing = disassemble(&program).unwrap();
//! assert_eq!(build(&listing).unwrap(), program);
//! ```
//!
//! [`Program`]: brainshift_spec::Program

pub mod error;
pub mod formatter;
pub mod disassembler;

pub use error::{DisassemblerError, Result};
pub use disassembler::{disassemble, disassemble_annotated};
pub use formatter::{format, format_label};
