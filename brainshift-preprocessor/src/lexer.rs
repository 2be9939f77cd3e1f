//! # Lexer for Brainshift source
//!
//! Runs over comment-free text. Characters that are neither opcodes, label
//! tokens nor whitespace come back as lexer errors, which the preprocessor
//! skips the way Brainfuck ignores every non-command character.

use brainshift_spec::Opcode;
use logos::Logos;

/// Tokens for Brainshift source
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"\s+")]
pub enum Token {
    /// Single-character opcode
    #[regex(r"[><+\-0.,\[\]&|^~!#@AMSD%ZzjnJCR;]", |lex| Opcode::from_u8(lex.slice().as_bytes()[0]))]
    Op(Opcode),

    /// `*name`, up to the next whitespace (name may be empty)
    #[regex(r"\*\S*", |lex| lex.slice()[1..].to_string())]
    Label(String),
}
