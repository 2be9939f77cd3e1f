//! Instruction formatting to Brainshift source text

use crate::error::{DisassemblerError, Result};
use brainshift_spec::{spell_label, Instruction, COMMENT_DELIMITER};

/// Format instruction as source text
///
/// Label operands are written by name, never by offset, and spelled the
/// same way as their definitions.
pub fn format(instr: &Instruction) -> String {
    match instr.label() {
        Some(target) => format!("{} {}", instr.opcode(), target.spelling()),
        None => instr.opcode().to_char().to_string(),
    }
}

/// Format a label definition
///
/// A name that itself ends in `:` gets one more, since the preprocessor
/// drops a single trailing colon from every label.
pub fn format_label(name: &str) -> Result<String> {
    check_label(name)?;
    Ok(spell_label(name))
}

/// Check that a label name survives a trip through the preprocessor
pub fn check_label(name: &str) -> Result<()> {
    let printable = !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || c == COMMENT_DELIMITER);

    if printable {
        Ok(())
    } else {
        Err(DisassemblerError::UnprintableLabel {
            name: name.to_string(),
        })
    }
}
