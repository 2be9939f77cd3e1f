//! Brainshift Instruction Set
//!
//! An [`Instruction`] is a resolved opcode. Loop brackets carry the index of
//! their partner and label operands carry both the label name and the
//! instruction offset it was bound to, so the interpreter never scans the
//! program or looks up names at run time.

use crate::opcode::Opcode;
use crate::{Address, LABEL_SIGIL};
use serde::{Deserialize, Serialize};

/// A label operand resolved to an instruction offset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelRef {
    /// Label name as written after `*`
    pub name: String,

    /// Offset of the instruction the label is bound to
    pub offset: Address,
}

impl LabelRef {
    pub fn new(name: impl Into<String>, offset: Address) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }

    /// The operand as it is written in source
    pub fn spelling(&self) -> String {
        spell_label(&self.name)
    }
}

/// Source spelling of a label name, sigil included
///
/// The preprocessor drops one trailing `:` from every label, so a name that
/// itself ends in `:` is written with one more.
pub fn spell_label(name: &str) -> String {
    if name.ends_with(':') {
        format!("{}{}:", LABEL_SIGIL, name)
    } else {
        format!("{}{}", LABEL_SIGIL, name)
    }
}

/// Brainshift instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instruction {
    // ========== Tape ==========
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Inc,
    /// `-`
    Dec,
    /// `0`
    Clear,

    // ========== I/O ==========
    /// `.`
    Output,
    /// `,`
    Input,

    // ========== Loop ==========
    /// `[`: `end` is the index of the matching `]`
    LoopStart { end: Address },
    /// `]`: `start` is the index of the matching `[`
    LoopEnd { start: Address },

    // ========== Logical ==========
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `~`
    Not,
    /// `!`
    Negate,

    // ========== Shift ==========
    /// `#`
    Shr,
    /// `@`
    Shl,

    // ========== Arithmetic ==========
    /// `A`
    Add,
    /// `M`
    Mul,
    /// `S`
    Sub,
    /// `D`
    Div,
    /// `%`
    Rem,

    // ========== Flag ==========
    /// `Z`
    TestZero,
    /// `z`
    ClearFlag,

    // ========== Branch ==========
    /// `j *label`
    JumpIfSet { target: LabelRef },
    /// `n *label`
    JumpIfClear { target: LabelRef },
    /// `J *label`
    Jump { target: LabelRef },

    // ========== Subroutine ==========
    /// `C *label`
    Call { target: LabelRef },
    /// `R`
    Return,

    // ========== System ==========
    /// `;`
    Halt,
}

/// What an opcode still needs before it becomes an [`Instruction`]
#[derive(Debug, Clone)]
pub enum Template {
    /// No operand; the instruction is complete
    Complete(Instruction),

    /// `[`, waiting for the index of its `]`
    LoopStart,

    /// `]`, waiting for the index of its `[`
    LoopEnd,

    /// Label-taking opcode, waiting for its resolved target
    Label(fn(LabelRef) -> Instruction),
}

impl Instruction {
    /// Classify an opcode by the operand it needs
    pub fn template(opcode: Opcode) -> Template {
        let instr = match opcode {
            Opcode::Right => Instruction::Right,
            Opcode::Left => Instruction::Left,
            Opcode::Inc => Instruction::Inc,
            Opcode::Dec => Instruction::Dec,
            Opcode::Clear => Instruction::Clear,
            Opcode::Output => Instruction::Output,
            Opcode::Input => Instruction::Input,
            Opcode::And => Instruction::And,
            Opcode::Or => Instruction::Or,
            Opcode::Xor => Instruction::Xor,
            Opcode::Not => Instruction::Not,
            Opcode::Negate => Instruction::Negate,
            Opcode::Shr => Instruction::Shr,
            Opcode::Shl => Instruction::Shl,
            Opcode::Add => Instruction::Add,
            Opcode::Mul => Instruction::Mul,
            Opcode::Sub => Instruction::Sub,
            Opcode::Div => Instruction::Div,
            Opcode::Rem => Instruction::Rem,
            Opcode::TestZero => Instruction::TestZero,
            Opcode::ClearFlag => Instruction::ClearFlag,
            Opcode::Return => Instruction::Return,
            Opcode::Halt => Instruction::Halt,
            Opcode::LoopStart => return Template::LoopStart,
            Opcode::LoopEnd => return Template::LoopEnd,
            Opcode::JumpIfSet => return Template::Label(|target| Instruction::JumpIfSet { target }),
            Opcode::JumpIfClear => {
                return Template::Label(|target| Instruction::JumpIfClear { target })
            }
            Opcode::Jump => return Template::Label(|target| Instruction::Jump { target }),
            Opcode::Call => return Template::Label(|target| Instruction::Call { target }),
        };
        Template::Complete(instr)
    }

    /// Get the opcode of this instruction
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Right => Opcode::Right,
            Instruction::Left => Opcode::Left,
            Instruction::Inc => Opcode::Inc,
            Instruction::Dec => Opcode::Dec,
            Instruction::Clear => Opcode::Clear,
            Instruction::Output => Opcode::Output,
            Instruction::Input => Opcode::Input,
            Instruction::LoopStart { .. } => Opcode::LoopStart,
            Instruction::LoopEnd { .. } => Opcode::LoopEnd,
            Instruction::And => Opcode::And,
            Instruction::Or => Opcode::Or,
            Instruction::Xor => Opcode::Xor,
            Instruction::Not => Opcode::Not,
            Instruction::Negate => Opcode::Negate,
            Instruction::Shr => Opcode::Shr,
            Instruction::Shl => Opcode::Shl,
            Instruction::Add => Opcode::Add,
            Instruction::Mul => Opcode::Mul,
            Instruction::Sub => Opcode::Sub,
            Instruction::Div => Opcode::Div,
            Instruction::Rem => Opcode::Rem,
            Instruction::TestZero => Opcode::TestZero,
            Instruction::ClearFlag => Opcode::ClearFlag,
            Instruction::JumpIfSet { .. } => Opcode::JumpIfSet,
            Instruction::JumpIfClear { .. } => Opcode::JumpIfClear,
            Instruction::Jump { .. } => Opcode::Jump,
            Instruction::Call { .. } => Opcode::Call,
            Instruction::Return => Opcode::Return,
            Instruction::Halt => Opcode::Halt,
        }
    }

    /// Label operand, if this instruction has one
    pub fn label(&self) -> Option<&LabelRef> {
        match self {
            Instruction::JumpIfSet { target }
            | Instruction::JumpIfClear { target }
            | Instruction::Jump { target }
            | Instruction::Call { target } => Some(target),
            _ => None,
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.label() {
            Some(target) => write!(f, "{} {}", self.opcode(), target.spelling()),
            None => write!(f, "{}", self.opcode()),
        }
    }
}
