//! # Brainshift Opcode Definitions
//!
//! Every Brainshift instruction is a single source character. The enum
//! discriminant is that character's ASCII value, so `Opcode as u8` is the
//! byte that appears in program text.
//!
//! ## Opcode Families
//!
//! - Tape: `>` `<` `+` `-` `0`
//! - I/O: `.` `,`
//! - Loop: `[` `]`
//! - Logical: `&` `|` `^` `~` `!`
//! - Shift: `#` `@`
//! - Arithmetic: `A` `M` `S` `D` `%`
//! - Flag: `Z` `z`
//! - Branch: `j` `n` `J`
//! - Subroutine: `C` `R`
//! - System: `;`

use serde::{Deserialize, Serialize};

/// Instruction opcode (the ASCII value of its source character)
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Opcode {
    // ========== Tape ==========
    /// `>`: move the pointer right, growing the tape
    Right = b'>',
    /// `<`: move the pointer left
    Left = b'<',
    /// `+`: increment the current cell
    Inc = b'+',
    /// `-`: decrement the current cell
    Dec = b'-',
    /// `0`: reset the current cell to zero
    Clear = b'0',

    // ========== I/O ==========
    /// `.`: write the current cell to output
    Output = b'.',
    /// `,`: read one input byte into the current cell
    Input = b',',

    // ========== Loop ==========
    /// `[`: skip past the matching `]` when the current cell is zero
    LoopStart = b'[',
    /// `]`: jump back past the matching `[` when the current cell is nonzero
    LoopEnd = b']',

    // ========== Logical ==========
    /// `&`: cell = cell AND next
    And = b'&',
    /// `|`: cell = cell OR next
    Or = b'|',
    /// `^`: cell = cell XOR next
    Xor = b'^',
    /// `~`: cell = NOT cell
    Not = b'~',
    /// `!`: cell = bitwise complement of cell
    Negate = b'!',

    // ========== Shift ==========
    /// `#`: cell >>= 1
    Shr = b'#',
    /// `@`: cell <<= 1
    Shl = b'@',

    // ========== Arithmetic ==========
    /// `A`: cell = cell + next, flag on carry
    Add = b'A',
    /// `M`: cell = cell * next, flag on overflow
    Mul = b'M',
    /// `S`: cell = cell - next, flag on borrow
    Sub = b'S',
    /// `D`: cell = cell / next
    Div = b'D',
    /// `%`: cell = cell mod next
    Rem = b'%',

    // ========== Flag ==========
    /// `Z`: zero flag = (cell == 0)
    TestZero = b'Z',
    /// `z`: clear the zero flag
    ClearFlag = b'z',

    // ========== Branch ==========
    /// `j`: jump to label when the zero flag is set
    JumpIfSet = b'j',
    /// `n`: jump to label when the zero flag is clear
    JumpIfClear = b'n',
    /// `J`: jump to label
    Jump = b'J',

    // ========== Subroutine ==========
    /// `C`: push return address, jump to label
    Call = b'C',
    /// `R`: pop return address and jump to it
    Return = b'R',

    // ========== System ==========
    /// `;`: end of program sequence
    Halt = b';',
}

impl Opcode {
    /// Number of opcodes in the instruction set
    pub const COUNT: usize = 29;

    /// Every opcode, in reference-table order
    pub const ALL: [Opcode; Self::COUNT] = [
        Opcode::Right,
        Opcode::Left,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Output,
        Opcode::Input,
        Opcode::LoopStart,
        Opcode::LoopEnd,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Not,
        Opcode::Shr,
        Opcode::Shl,
        Opcode::Add,
        Opcode::Mul,
        Opcode::Sub,
        Opcode::Div,
        Opcode::Rem,
        Opcode::Negate,
        Opcode::Clear,
        Opcode::Jump,
        Opcode::Call,
        Opcode::Return,
        Opcode::TestZero,
        Opcode::ClearFlag,
        Opcode::JumpIfSet,
        Opcode::JumpIfClear,
        Opcode::Halt,
    ];

    /// Try to convert from a source character
    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_ascii() {
            return None;
        }
        Self::from_u8(c as u8)
    }

    /// Try to convert from a source byte
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            b'>' => Some(Opcode::Right),
            b'<' => Some(Opcode::Left),
            b'+' => Some(Opcode::Inc),
            b'-' => Some(Opcode::Dec),
            b'0' => Some(Opcode::Clear),
            b'.' => Some(Opcode::Output),
            b',' => Some(Opcode::Input),
            b'[' => Some(Opcode::LoopStart),
            b']' => Some(Opcode::LoopEnd),
            b'&' => Some(Opcode::And),
            b'|' => Some(Opcode::Or),
            b'^' => Some(Opcode::Xor),
            b'~' => Some(Opcode::Not),
            b'!' => Some(Opcode::Negate),
            b'#' => Some(Opcode::Shr),
            b'@' => Some(Opcode::Shl),
            b'A' => Some(Opcode::Add),
            b'M' => Some(Opcode::Mul),
            b'S' => Some(Opcode::Sub),
            b'D' => Some(Opcode::Div),
            b'%' => Some(Opcode::Rem),
            b'Z' => Some(Opcode::TestZero),
            b'z' => Some(Opcode::ClearFlag),
            b'j' => Some(Opcode::JumpIfSet),
            b'n' => Some(Opcode::JumpIfClear),
            b'J' => Some(Opcode::Jump),
            b'C' => Some(Opcode::Call),
            b'R' => Some(Opcode::Return),
            b';' => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// Convert to the source byte
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert to the source character
    #[inline]
    pub const fn to_char(self) -> char {
        self as u8 as char
    }

    /// Get the instruction family
    pub const fn family(self) -> InstructionFamily {
        match self {
            Opcode::Right | Opcode::Left | Opcode::Inc | Opcode::Dec | Opcode::Clear => {
                InstructionFamily::Tape
            }
            Opcode::Output | Opcode::Input => InstructionFamily::Io,
            Opcode::LoopStart | Opcode::LoopEnd => InstructionFamily::Loop,
            Opcode::And | Opcode::Or | Opcode::Xor | Opcode::Not | Opcode::Negate => {
                InstructionFamily::Logical
            }
            Opcode::Shr | Opcode::Shl => InstructionFamily::Shift,
            Opcode::Add | Opcode::Mul | Opcode::Sub | Opcode::Div | Opcode::Rem => {
                InstructionFamily::Arithmetic
            }
            Opcode::TestZero | Opcode::ClearFlag => InstructionFamily::Flag,
            Opcode::JumpIfSet | Opcode::JumpIfClear | Opcode::Jump => InstructionFamily::Branch,
            Opcode::Call | Opcode::Return => InstructionFamily::Subroutine,
            Opcode::Halt => InstructionFamily::System,
        }
    }

    /// Check if this opcode takes a `*label` operand
    #[inline]
    pub const fn takes_label(self) -> bool {
        matches!(
            self,
            Opcode::Jump | Opcode::Call | Opcode::JumpIfSet | Opcode::JumpIfClear
        )
    }

    /// Reference-card description of the opcode
    pub const fn description(self) -> &'static str {
        match self {
            Opcode::Right => "Move the pointer to the right.",
            Opcode::Left => "Move the pointer to the left.",
            Opcode::Inc => "Increment the byte at the pointer.",
            Opcode::Dec => "Decrement the byte at the pointer.",
            Opcode::Output => "Output the character signified by the byte at the pointer.",
            Opcode::Input => "Input a character and store it in the byte at the pointer.",
            Opcode::LoopStart => "Jump past the matching `]` if the byte at the pointer is 0.",
            Opcode::LoopEnd => {
                "Jump back to the matching `[` if the byte at the pointer is nonzero."
            }
            Opcode::And => "Logical AND operation between the current cell and the next cell.",
            Opcode::Or => "Logical OR operation between the current cell and the next cell.",
            Opcode::Xor => "Logical XOR operation between the current cell and the next cell.",
            Opcode::Not => "Logical NOT operation on the current cell.",
            Opcode::Shr => "Right bit shift on the current cell.",
            Opcode::Shl => "Left bit shift on the current cell.",
            Opcode::Add => {
                "Addition with carry: Adds the next cell to the current cell, checks for overflow."
            }
            Opcode::Mul => {
                "Multiplication with overflow: Multiplies the current cell with the next cell."
            }
            Opcode::Sub => {
                "Subtraction with underflow: Subtracts the next cell from the current cell."
            }
            Opcode::Div => "Division: Divides the current cell by the next cell.",
            Opcode::Rem => {
                "Modulus operation: Finds the remainder when the current cell is divided by the next cell."
            }
            Opcode::Negate => "Negation: Flips all bits in the current cell.",
            Opcode::Clear => "Reset the byte at the pointer to 0.",
            Opcode::Jump => "Jump to a label.",
            Opcode::Call => {
                "Call a subroutine at a label, saving the return address on the stack."
            }
            Opcode::Return => {
                "Return from a subroutine, using the address at the top of the stack."
            }
            Opcode::TestZero => "Set the Zero flag if the current cell is 0, clear it otherwise.",
            Opcode::ClearFlag => "Clear the Zero flag.",
            Opcode::JumpIfSet => "Jump to a label if the Zero flag is set.",
            Opcode::JumpIfClear => "Jump to a label if the Zero flag is not set.",
            Opcode::Halt => "Denotes the end of the program sequence.",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Instruction family classification
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstructionFamily {
    Tape,
    Io,
    Loop,
    Logical,
    Shift,
    Arithmetic,
    Flag,
    Branch,
    Subroutine,
    System,
}

impl InstructionFamily {
    /// Number of instruction families
    pub const COUNT: usize = 10;
}

impl std::fmt::Display for InstructionFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            InstructionFamily::Tape => "tape",
            InstructionFamily::Io => "io",
            InstructionFamily::Loop => "loop",
            InstructionFamily::Logical => "logical",
            InstructionFamily::Shift => "shift",
            InstructionFamily::Arithmetic => "arithmetic",
            InstructionFamily::Flag => "flag",
            InstructionFamily::Branch => "branch",
            InstructionFamily::Subroutine => "subroutine",
            InstructionFamily::System => "system",
        };
        write!(f, "{}", name)
    }
}
