//! Instruction execution for the Brainshift VM
//!
//! [`execute`] runs one instruction against the state and leaves `ip` on
//! the next instruction to run. When it returns an error, `ip` still points
//! at the faulting instruction.

use brainshift_spec::{Address, Cell, Instruction};
use crate::error::{Result, RuntimeError};
use crate::io::IoAdapter;
use crate::state::VMState;

/// What the engine should do after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Halt,
}

/// Apply a binary operator to the current and next cell, storing the
/// result in the current cell
#[inline]
fn binary(state: &mut VMState, op: impl FnOnce(Cell, Cell) -> Cell) -> Result<()> {
    let next = state.tape.peek_next()?;
    let value = op(state.tape.read(), next);
    state.tape.write(value);
    Ok(())
}

/// Like [`binary`], but the operator also reports overflow, which becomes
/// the new zero flag
#[inline]
fn overflowing(state: &mut VMState, op: impl FnOnce(Cell, Cell) -> (Cell, bool)) -> Result<()> {
    let next = state.tape.peek_next()?;
    let (value, overflow) = op(state.tape.read(), next);
    state.tape.write(value);
    state.flags.assign(overflow);
    Ok(())
}

/// Division-family operator; fails before touching the cell when the next
/// cell is zero
#[inline]
fn dividing(state: &mut VMState, op: impl FnOnce(Cell, Cell) -> Cell) -> Result<()> {
    let divisor = state.tape.peek_next()?;
    if divisor == 0 {
        return Err(RuntimeError::DivisionByZero);
    }
    let value = op(state.tape.read(), divisor);
    state.tape.write(value);
    Ok(())
}

/// Address of the instruction after `ip`
#[inline]
fn successor(ip: Address) -> Result<Address> {
    ip.checked_add(1).ok_or(RuntimeError::AddressOverflow { ip })
}

#[inline]
fn unary(state: &mut VMState, op: impl FnOnce(Cell) -> Cell) {
    let value = op(state.tape.read());
    state.tape.write(value);
}

/// Execute single instruction
pub fn execute<I: IoAdapter + ?Sized>(
    instr: &Instruction,
    state: &mut VMState,
    io: &mut I,
) -> Result<Flow> {
    match instr {
        // ========== Tape ==========
        Instruction::Right => state.tape.advance()?,
        Instruction::Left => state.tape.retreat()?,
        Instruction::Inc => unary(state, |v| v.wrapping_add(1)),
        Instruction::Dec => unary(state, |v| v.wrapping_sub(1)),
        Instruction::Clear => state.tape.write(0),

        // ========== I/O ==========
        Instruction::Output => io.write_byte(state.tape.read())?,
        Instruction::Input => match io.read_byte()? {
            Some(byte) => state.tape.write(byte),
            None => return Err(RuntimeError::InputExhausted),
        },

        // ========== Loop ==========
        Instruction::LoopStart { end } => {
            if state.tape.read() == 0 {
                state.ip = successor(*end)?;
                return Ok(Flow::Continue);
            }
        }
        Instruction::LoopEnd { start } => {
            if state.tape.read() != 0 {
                state.ip = successor(*start)?;
                return Ok(Flow::Continue);
            }
        }

        // ========== Logical ==========
        Instruction::And => binary(state, |a, b| a & b)?,
        Instruction::Or => binary(state, |a, b| a | b)?,
        Instruction::Xor => binary(state, |a, b| a ^ b)?,
        Instruction::Not | Instruction::Negate => unary(state, |v| !v),

        // ========== Shift ==========
        Instruction::Shr => unary(state, |v| v >> 1),
        Instruction::Shl => unary(state, |v| v << 1),

        // ========== Arithmetic ==========
        Instruction::Add => overflowing(state, |a, b| a.overflowing_add(b))?,
        Instruction::Mul => overflowing(state, |a, b| a.overflowing_mul(b))?,
        Instruction::Sub => overflowing(state, |a, b| a.overflowing_sub(b))?,
        Instruction::Div => dividing(state, |a, b| a / b)?,
        Instruction::Rem => dividing(state, |a, b| a % b)?,

        // ========== Flag ==========
        Instruction::TestZero => {
            let zero = state.tape.read() == 0;
            state.flags.assign(zero);
        }
        Instruction::ClearFlag => state.flags.clear(),

        // ========== Branch ==========
        Instruction::JumpIfSet { target } => {
            if state.flags.is_set() {
                state.ip = target.offset;
                return Ok(Flow::Continue);
            }
        }
        Instruction::JumpIfClear { target } => {
            if !state.flags.is_set() {
                state.ip = target.offset;
                return Ok(Flow::Continue);
            }
        }
        Instruction::Jump { target } => {
            state.ip = target.offset;
            return Ok(Flow::Continue);
        }

        // ========== Subroutine ==========
        Instruction::Call { target } => {
            state.call_stack.push(successor(state.ip)?)?;
            state.ip = target.offset;
            return Ok(Flow::Continue);
        }
        Instruction::Return => {
            state.ip = state.call_stack.pop()?;
            return Ok(Flow::Continue);
        }

        // ========== System ==========
        Instruction::Halt => return Ok(Flow::Halt),
    }

    state.ip = successor(state.ip)?;
    Ok(Flow::Continue)
}
