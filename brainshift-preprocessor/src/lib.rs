//! Brainshift Preprocessor
//!
//! Turn Brainshift source text into a resolved, immutable [`Program`].
//!
//! ## Syntax
//!
//! - `"..."` is a comment; comments do not nest
//! - `*name` followed by whitespace defines a label bound to the next
//!   instruction
//! - `J`, `C`, `j` and `n` take a `*name` operand
//! - one trailing `:` is dropped from every label, so `*foo:` and `*foo`
//!   name the same label in both positions
//! - every other opcode is a single character; anything else is ignored
//!
//! ## Example
//!
//! ```rust
//! use brainshift_preprocessor::build;
//!
//! let source = r#"
//!     "print 3, via a subroutine"
//!     C *three . ;
//!     *three +++ R
//! "#;
//!
//! let program = build(source).unwrap();
//! assert_eq!(program.labels.resolve("three"), Some(3));
//! ```
//!
//! [`Program`]: brainshift_spec::Program

pub mod error;
pub mod comment;
pub mod lexer;
pub mod preprocessor;

pub use error::{Result, SourcePos, SyntaxError};
pub use comment::strip_comments;
pub use preprocessor::build;
