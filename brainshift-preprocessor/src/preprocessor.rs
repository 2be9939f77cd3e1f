//! Source to [`Program`]
//!
//! Three passes over the comment-free token stream:
//!
//! 1. collect opcodes and bind label definitions to the offset of the next
//!    real instruction
//! 2. match `[`/`]` pairs with a stack
//! 3. resolve label operands against the finished label table

use crate::comment::strip_comments;
use crate::error::{Result, SourcePos, SyntaxError};
use crate::lexer::Token;
use brainshift_spec::{Address, Instruction, LabelRef, LabelTable, Program, Template};
use logos::Logos;
use std::ops::Range;

/// An instruction awaiting its operand
#[derive(Debug)]
enum Draft {
    Complete(Instruction),
    LoopStart(Range<usize>),
    LoopEnd(Range<usize>),
    Label {
        make: fn(LabelRef) -> Instruction,
        name: String,
        span: Range<usize>,
    },
}

/// Build a program from Brainshift source
pub fn build(source: &str) -> Result<Program> {
    let text = strip_comments(source)?;
    let tokens = tokenize(&text);

    let (drafts, labels) = collect(source, &tokens)?;
    let partners = match_brackets(source, &drafts)?;
    let instructions = resolve(source, drafts, &partners, &labels)?;

    tracing::debug!(
        instructions = instructions.len(),
        labels = labels.len(),
        "built program"
    );

    Ok(Program::from_parts(instructions, labels))
}

/// Lex comment-free text, dropping characters that are not tokens
fn tokenize(text: &str) -> Vec<(Token, Range<usize>)> {
    Token::lexer(text)
        .spanned()
        .filter_map(|(token, span)| token.ok().map(|token| (token, span)))
        .collect()
}

/// Label name without its optional trailing `:`
fn label_name(source: &str, raw: &str, span: &Range<usize>) -> Result<String> {
    let name = raw.strip_suffix(':').unwrap_or(raw);
    if name.is_empty() {
        return Err(SyntaxError::EmptyLabel {
            pos: SourcePos::locate(source, span.start),
        });
    }
    Ok(name.to_string())
}

fn collect(source: &str, tokens: &[(Token, Range<usize>)]) -> Result<(Vec<Draft>, LabelTable)> {
    let mut drafts = Vec::new();
    let mut labels = LabelTable::new();
    let mut iter = tokens.iter().peekable();

    while let Some((token, span)) = iter.next() {
        match token {
            Token::Op(opcode) => {
                let draft = match Instruction::template(*opcode) {
                    Template::Complete(instr) => Draft::Complete(instr),
                    Template::LoopStart => Draft::LoopStart(span.clone()),
                    Template::LoopEnd => Draft::LoopEnd(span.clone()),
                    Template::Label(make) => {
                        let Some((Token::Label(raw), name_span)) = iter.peek() else {
                            return Err(SyntaxError::MissingLabel {
                                opcode: *opcode,
                                pos: SourcePos::locate(source, span.start),
                            });
                        };
                        let name = label_name(source, raw, name_span)?;
                        iter.next();
                        Draft::Label {
                            make,
                            name,
                            span: span.clone(),
                        }
                    }
                };
                drafts.push(draft);
            }
            Token::Label(raw) => {
                let name = label_name(source, raw, span)?;
                if labels.define(name.as_str(), drafts.len()).is_err() {
                    return Err(SyntaxError::DuplicateLabel {
                        name,
                        pos: SourcePos::locate(source, span.start),
                    });
                }
            }
        }
    }

    Ok((drafts, labels))
}

/// Partner index for every bracket, `None` elsewhere
fn match_brackets(source: &str, drafts: &[Draft]) -> Result<Vec<Option<Address>>> {
    let mut partners = vec![None; drafts.len()];
    let mut open: Vec<(Address, &Range<usize>)> = Vec::new();

    for (idx, draft) in drafts.iter().enumerate() {
        match draft {
            Draft::LoopStart(span) => open.push((idx, span)),
            Draft::LoopEnd(span) => {
                let (start, _) = open
                    .pop()
                    .ok_or_else(|| unmatched(source, ']', span))?;
                partners[start] = Some(idx);
                partners[idx] = Some(start);
            }
            _ => {}
        }
    }

    // Report the innermost unclosed bracket
    if let Some((_, span)) = open.last() {
        return Err(unmatched(source, '[', span));
    }

    Ok(partners)
}

fn unmatched(source: &str, bracket: char, span: &Range<usize>) -> SyntaxError {
    SyntaxError::UnmatchedBracket {
        bracket,
        pos: SourcePos::locate(source, span.start),
    }
}

fn resolve(
    source: &str,
    drafts: Vec<Draft>,
    partners: &[Option<Address>],
    labels: &LabelTable,
) -> Result<Vec<Instruction>> {
    let mut instructions = Vec::with_capacity(drafts.len());

    for (idx, draft) in drafts.into_iter().enumerate() {
        let instr = match draft {
            Draft::Complete(instr) => instr,
            Draft::LoopStart(span) => Instruction::LoopStart {
                end: partners[idx].ok_or_else(|| unmatched(source, '[', &span))?,
            },
            Draft::LoopEnd(span) => Instruction::LoopEnd {
                start: partners[idx].ok_or_else(|| unmatched(source, ']', &span))?,
            },
            Draft::Label { make, name, span } => {
                let offset = labels.resolve(&name).ok_or_else(|| SyntaxError::UndefinedLabel {
                    name: name.clone(),
                    pos: SourcePos::locate(source, span.start),
                })?;
                make(LabelRef::new(name, offset))
            }
        };
        instructions.push(instr);
    }

    Ok(instructions)
}
