//! Main disassembler logic

use crate::error::Result;
use crate::formatter::{format, format_label};
use brainshift_spec::Program;

/// Instructions per line in the compact listing
const INSTRUCTIONS_PER_LINE: usize = 32;

/// Disassemble a program into canonical source text
///
/// Each label definition sits on its own line directly before the
/// instruction it is bound to; labels bound to the end of the program come
/// last. Building the result yields the same program again.
pub fn disassemble(program: &Program) -> Result<String> {
    program.validate()?;
    let labels = program.labels.by_offset();

    let mut output = String::new();
    output.push_str(&format!(
        "\"Brainshift listing: {} instructions, {} labels\"\n",
        program.len(),
        program.labels.len()
    ));

    let mut line = Line::default();
    for offset in 0..=program.len() {
        if let Some(names) = labels.get(&offset) {
            line.flush_into(&mut output);
            for name in names {
                output.push_str(&format_label(name)?);
                output.push('\n');
            }
        }

        let Some(instr) = program.get(offset) else {
            break;
        };
        line.push(&format(instr), instr.opcode().takes_label());
        if line.count == INSTRUCTIONS_PER_LINE {
            line.flush_into(&mut output);
        }
    }
    line.flush_into(&mut output);

    Ok(output)
}

/// Disassemble with one instruction per line, each prefixed by its offset
///
/// Offsets are written as comments, so the listing still builds.
pub fn disassemble_annotated(program: &Program) -> Result<String> {
    program.validate()?;
    let labels = program.labels.by_offset();
    let width = program.len().to_string().len().max(4);

    let mut output = String::new();
    for offset in 0..=program.len() {
        if let Some(names) = labels.get(&offset) {
            for name in names {
                output.push_str(&format_label(name)?);
                output.push('\n');
            }
        }
        if let Some(instr) = program.get(offset) {
            output.push_str(&format!("\"{:0width$}\"  {}\n", offset, format(instr)));
        }
    }

    Ok(output)
}

/// Compact line builder
///
/// Single-character opcodes are packed together; a label operand is kept
/// apart from its neighbours by spaces so its name stays whitespace-delimited.
#[derive(Default)]
struct Line {
    text: String,
    count: usize,
    after_operand: bool,
}

impl Line {
    fn push(&mut self, token: &str, has_operand: bool) {
        if !self.text.is_empty() && (has_operand || self.after_operand) {
            self.text.push(' ');
        }
        self.text.push_str(token);
        self.count += 1;
        self.after_operand = has_operand;
    }

    fn flush_into(&mut self, output: &mut String) {
        if !self.text.is_empty() {
            output.push_str(&self.text);
            output.push('\n');
        }
        *self = Line::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DisassemblerError;
    use brainshift_spec::{Instruction, LabelRef, LabelTable};

    #[test]
    fn test_disassemble_simple() {
        let program = Program::from_parts(
            vec![Instruction::Inc, Instruction::Output, Instruction::Halt],
            LabelTable::new(),
        );
        let text = disassemble(&program).unwrap();
        assert_eq!(
            text,
            "\"Brainshift listing: 3 instructions, 0 labels\"\n+.;\n"
        );
    }

    #[test]
    fn test_disassemble_labels() {
        let mut labels = LabelTable::new();
        labels.define("top", 0).unwrap();
        labels.define("end", 2).unwrap();
        let program = Program::from_parts(
            vec![
                Instruction::Inc,
                Instruction::Jump {
                    target: LabelRef::new("top", 0),
                },
            ],
            labels,
        );

        let text = disassemble(&program).unwrap();
        let body: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(body, vec!["*top", "+ J *top", "*end"]);
    }

    #[test]
    fn test_operand_separated_from_next_token() {
        let mut labels = LabelTable::new();
        labels.define("x", 0).unwrap();
        let program = Program::from_parts(
            vec![
                Instruction::Call {
                    target: LabelRef::new("x", 0),
                },
                Instruction::Inc,
                Instruction::Inc,
            ],
            labels,
        );
        let text = disassemble(&program).unwrap();
        assert!(text.ends_with("*x\nC *x ++\n"));
    }

    #[test]
    fn test_long_programs_wrap() {
        let program = Program::from_parts(vec![Instruction::Inc; 70], LabelTable::new());
        let text = disassemble(&program).unwrap();
        let body: Vec<&str> = text.lines().skip(1).collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].len(), INSTRUCTIONS_PER_LINE);
        assert_eq!(body[2].len(), 70 - 2 * INSTRUCTIONS_PER_LINE);
    }

    #[test]
    fn test_annotated() {
        let mut labels = LabelTable::new();
        labels.define("loop", 1).unwrap();
        let program = Program::from_parts(
            vec![
                Instruction::Inc,
                Instruction::JumpIfClear {
                    target: LabelRef::new("loop", 1),
                },
            ],
            labels,
        );
        let text = disassemble_annotated(&program).unwrap();
        assert_eq!(text, "\"0000\"  +\n*loop\n\"0001\"  n *loop\n");
    }

    #[test]
    fn test_invalid_program_rejected() {
        let program = Program::from_parts(vec![Instruction::LoopStart { end: 5 }], LabelTable::new());
        assert!(matches!(
            disassemble(&program),
            Err(DisassemblerError::InvalidProgram(_))
        ));
    }

    #[test]
    fn test_empty_program() {
        let text = disassemble(&Program::new()).unwrap();
        assert_eq!(text, "\"Brainshift listing: 0 instructions, 0 labels\"\n");
    }
}
