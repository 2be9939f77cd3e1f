//! Preprocessor errors
//!
//! Every variant aborts program construction; no partial program is ever
//! returned alongside one of these.

use brainshift_spec::Opcode;
use std::fmt;
use thiserror::Error;

/// 1-based line and column of a source character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
}

impl SourcePos {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Locate byte `offset` of `source`
    ///
    /// Columns count characters, not bytes. Offsets past the end locate the
    /// end of the source.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;
        for (idx, c) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error("Unterminated comment starting at {pos}")]
    UnterminatedComment { pos: SourcePos },

    #[error("Duplicate label '{name}' at {pos}")]
    DuplicateLabel { name: String, pos: SourcePos },

    #[error("Unmatched '{bracket}' at {pos}")]
    UnmatchedBracket { bracket: char, pos: SourcePos },

    #[error("Undefined label '{name}' referenced at {pos}")]
    UndefinedLabel { name: String, pos: SourcePos },

    #[error("'{opcode}' at {pos} expects a *label operand")]
    MissingLabel { opcode: Opcode, pos: SourcePos },

    #[error("Empty label name at {pos}")]
    EmptyLabel { pos: SourcePos },
}

impl SyntaxError {
    /// Where in the source the error was detected
    pub fn pos(&self) -> SourcePos {
        match self {
            SyntaxError::UnterminatedComment { pos }
            | SyntaxError::DuplicateLabel { pos, .. }
            | SyntaxError::UnmatchedBracket { pos, .. }
            | SyntaxError::UndefinedLabel { pos, .. }
            | SyntaxError::MissingLabel { pos, .. }
            | SyntaxError::EmptyLabel { pos } => *pos,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;
