//! # Program Structure
//!
//! A [`Program`] is the immutable output of the preprocessor: the resolved
//! instruction sequence plus the label table it was resolved against.
//! Nothing in a program changes during execution, so one program can be
//! shared read-only by any number of concurrent runs.

use crate::error::{Result, SpecError};
use crate::instruction::Instruction;
use crate::label::LabelTable;
use crate::Address;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Complete program structure
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Resolved instruction sequence
    pub instructions: Vec<Instruction>,

    /// Label name to instruction offset
    pub labels: LabelTable,
}

impl Program {
    /// Create a new empty program
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(instructions: Vec<Instruction>, labels: LabelTable) -> Self {
        Self {
            instructions,
            labels,
        }
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Fetch the instruction at `ip`; `None` past the end
    #[inline]
    pub fn get(&self, ip: Address) -> Option<&Instruction> {
        self.instructions.get(ip)
    }

    /// Check the structural invariants the interpreter relies on
    ///
    /// Every label offset is at most `len()` (a label may mark the end of
    /// the program), every bracket points at its partner, and every label
    /// operand agrees with the table.
    pub fn validate(&self) -> Result<()> {
        let len = self.len();

        for (name, offset) in self.labels.iter() {
            if offset > len {
                return Err(SpecError::LabelOutOfRange {
                    name: name.to_string(),
                    offset,
                    len,
                });
            }
        }

        for (at, instr) in self.instructions.iter().enumerate() {
            match instr {
                Instruction::LoopStart { end } => {
                    if !matches!(self.get(*end), Some(Instruction::LoopEnd { start }) if *start == at)
                    {
                        return Err(SpecError::BracketMismatch { at, target: *end });
                    }
                }
                Instruction::LoopEnd { start } => {
                    if !matches!(self.get(*start), Some(Instruction::LoopStart { end }) if *end == at)
                    {
                        return Err(SpecError::BracketMismatch { at, target: *start });
                    }
                }
                _ => {}
            }

            if let Some(target) = instr.label() {
                if self.labels.resolve(&target.name) != Some(target.offset) {
                    return Err(SpecError::LabelOutOfRange {
                        name: target.name.clone(),
                        offset: target.offset,
                        len,
                    });
                }
            }
        }

        Ok(())
    }

    /// Canonical byte encoding (bincode)
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Canonical byte encoding of the label table alone
    pub fn labels_to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&self.labels)?)
    }

    /// SHA-256 of the canonical encoding
    ///
    /// Two builds of the same source always produce the same digest.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let bytes = self.to_bytes()?;
        Ok(Sha256::digest(&bytes).into())
    }

    /// Lowercase hex form of [`Program::digest`]
    pub fn digest_hex(&self) -> Result<String> {
        Ok(self
            .digest()?
            .iter()
            .map(|byte| format!("{:02x}", byte))
            .collect())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Brainshift Program")?;
        writeln!(f, "  Instructions: {}", self.len())?;
        writeln!(f, "  Labels:       {}", self.labels.len())?;
        for (name, offset) in self.labels.iter() {
            writeln!(f, "    *{:<16} -> {}", name, offset)?;
        }
        Ok(())
    }
}
