//! VM state for the Brainshift VM

use crate::error::{Result, RuntimeError};
use crate::tape::Tape;
use brainshift_spec::{Address, Cell, DEFAULT_CALL_DEPTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero flag register
///
/// Cleared at the start of every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flags {
    zero: bool,
}

impl Flags {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set(&mut self) {
        self.zero = true;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.zero = false;
    }

    #[inline]
    pub fn assign(&mut self, value: bool) {
        self.zero = value;
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.zero
    }
}

/// Return addresses pushed by `C` and popped by `R`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallStack {
    frames: Vec<Address>,
    limit: usize,
}

impl CallStack {
    pub fn new(limit: usize) -> Self {
        CallStack {
            frames: Vec::new(),
            limit,
        }
    }

    pub fn push(&mut self, address: Address) -> Result<()> {
        if self.frames.len() >= self.limit {
            return Err(RuntimeError::CallStackOverflow { depth: self.limit });
        }
        self.frames.push(address);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Address> {
        self.frames.pop().ok_or(RuntimeError::CallStackUnderflow)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from outermost to innermost
    pub fn frames(&self) -> &[Address] {
        &self.frames
    }
}

impl Default for CallStack {
    fn default() -> Self {
        Self::new(DEFAULT_CALL_DEPTH)
    }
}

/// Machine state at the moment a run stopped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tape: Vec<Cell>,
    pub pointer: usize,
    pub zero_flag: bool,
    pub call_stack: Vec<Address>,
}

impl Snapshot {
    /// Value of the cell under the pointer
    pub fn current(&self) -> Cell {
        self.tape.get(self.pointer).copied().unwrap_or(0)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "pointer:    {}", self.pointer)?;
        writeln!(f, "zero flag:  {}", self.zero_flag)?;
        writeln!(f, "call stack: {:?}", self.call_stack)?;
        write!(f, "tape:      ")?;
        for (idx, cell) in self.tape.iter().enumerate() {
            if idx == self.pointer {
                write!(f, " [{:02x}]", cell)?;
            } else {
                write!(f, " {:02x}", cell)?;
            }
        }
        writeln!(f)
    }
}

/// Why a run stopped
#[derive(Debug)]
pub enum HaltReason {
    /// `;` or end of program
    Normal,
    /// A runtime error aborted the run
    Fault(RuntimeError),
}

impl HaltReason {
    pub fn is_normal(&self) -> bool {
        matches!(self, HaltReason::Normal)
    }

    pub fn fault(&self) -> Option<&RuntimeError> {
        match self {
            HaltReason::Normal => None,
            HaltReason::Fault(err) => Some(err),
        }
    }
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaltReason::Normal => write!(f, "normal"),
            HaltReason::Fault(err) => write!(f, "fault: {}", err),
        }
    }
}

/// VM state
#[derive(Debug, Clone)]
pub struct VMState {
    /// Data tape and pointer
    pub tape: Tape,

    /// Zero flag
    pub flags: Flags,

    /// Subroutine return addresses
    pub call_stack: CallStack,

    /// Instruction pointer
    pub ip: Address,

    /// Instructions executed so far
    pub steps: u64,
}

impl VMState {
    pub fn new(tape_limit: usize, call_depth: usize) -> Self {
        VMState {
            tape: Tape::new(tape_limit),
            flags: Flags::new(),
            call_stack: CallStack::new(call_depth),
            ip: 0,
            steps: 0,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tape: self.tape.cells().to_vec(),
            pointer: self.tape.pointer(),
            zero_flag: self.flags.is_set(),
            call_stack: self.call_stack.frames().to_vec(),
        }
    }
}

impl Default for VMState {
    fn default() -> Self {
        VMState {
            tape: Tape::default(),
            flags: Flags::default(),
            call_stack: CallStack::default(),
            ip: 0,
            steps: 0,
        }
    }
}
