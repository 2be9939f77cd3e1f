//! Virtual Machine for Brainshift

use crate::error::{Result, RuntimeError};
use crate::execute::{execute, Flow};
use crate::io::{BufferedIo, IoAdapter};
use crate::state::{HaltReason, Snapshot, VMState};
use brainshift_spec::{Address, Program, DEFAULT_CALL_DEPTH, DEFAULT_TAPE_LEN};
use std::time::{Duration, Instant};

/// How many steps run between wall-clock checks
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// VM configuration
#[derive(Debug, Clone)]
pub struct VMConfig {
    /// Maximum number of instructions before the run is aborted
    pub max_steps: u64,

    /// Maximum number of tape cells
    pub max_tape_len: usize,

    /// Maximum number of pending `C` return addresses
    pub max_call_depth: usize,

    /// Optional wall-clock budget for the whole run
    pub deadline: Option<Duration>,

    /// Emit a `trace` event for every executed instruction
    pub trace: bool,
}

impl Default for VMConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000_000,
            max_tape_len: DEFAULT_TAPE_LEN,
            max_call_depth: DEFAULT_CALL_DEPTH,
            deadline: None,
            trace: false,
        }
    }
}

/// Execution result
#[derive(Debug)]
pub struct ExecutionResult<I = BufferedIo> {
    /// Number of instructions executed
    pub steps: u64,

    /// Instruction pointer when the run stopped; on a fault this is the
    /// faulting instruction
    pub ip: Address,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Machine state at halt
    pub snapshot: Snapshot,

    /// The I/O adapter, handed back to the caller
    pub io: I,
}

impl<I> ExecutionResult<I> {
    pub fn is_normal(&self) -> bool {
        self.halt_reason.is_normal()
    }

    pub fn fault(&self) -> Option<&RuntimeError> {
        self.halt_reason.fault()
    }
}

impl ExecutionResult<BufferedIo> {
    /// Bytes written by `.`
    pub fn output(&self) -> &[u8] {
        self.io.output()
    }
}

/// Brainshift Virtual Machine
///
/// Borrows the program read-only and owns everything that changes while it
/// runs, so several VMs can execute one program at the same time.
pub struct VM<'p, I> {
    /// Program being executed
    program: &'p Program,

    /// Tape, flags, call stack and IP
    state: VMState,

    /// I/O adapter
    io: I,

    /// Configuration
    config: VMConfig,

    /// Set once the program has passed [`Program::validate`]
    validated: bool,
}

impl<'p, I: IoAdapter> VM<'p, I> {
    /// Create a VM with fresh state
    ///
    /// The program is validated before its first instruction runs; a
    /// program that fails validation never executes.
    pub fn new(program: &'p Program, io: I, config: VMConfig) -> Self {
        Self {
            program,
            state: VMState::new(config.max_tape_len, config.max_call_depth),
            io,
            config,
            validated: false,
        }
    }

    fn ensure_valid(&mut self) -> Result<()> {
        if !self.validated {
            self.program.validate()?;
            self.validated = true;
        }
        Ok(())
    }

    /// Execute the instruction at the current IP
    ///
    /// Returns [`Flow::Halt`] on `;` or when the IP is past the end of the
    /// program. Budgets are not checked here; see [`VM::run`].
    pub fn step(&mut self) -> Result<Flow> {
        self.ensure_valid()?;

        let Some(instr) = self.program.get(self.state.ip) else {
            return Ok(Flow::Halt);
        };

        if self.config.trace {
            tracing::trace!(
                step = self.state.steps,
                ip = self.state.ip,
                pointer = self.state.tape.pointer(),
                cell = self.state.tape.read(),
                zero = self.state.flags.is_set(),
                family = %instr.opcode().family(),
                "{}",
                instr
            );
        }

        let flow = execute(instr, &mut self.state, &mut self.io)?;
        self.state.steps += 1;
        Ok(flow)
    }

    /// Run the VM until halt
    ///
    /// Never panics on program behaviour: faults, including a program that
    /// fails validation, are reported through
    /// [`ExecutionResult::halt_reason`].
    pub fn run(mut self) -> ExecutionResult<I> {
        let started = Instant::now();

        let mut halt_reason = match self.ensure_valid() {
            Ok(()) => self.run_loop(started),
            Err(err) => HaltReason::Fault(err),
        };

        if let Err(err) = self.io.flush() {
            if halt_reason.is_normal() {
                halt_reason = HaltReason::Fault(err.into());
            }
        }

        tracing::debug!(
            steps = self.state.steps,
            ip = self.state.ip,
            elapsed = ?started.elapsed(),
            "halted: {}",
            halt_reason
        );

        ExecutionResult {
            steps: self.state.steps,
            ip: self.state.ip,
            halt_reason,
            snapshot: self.state.snapshot(),
            io: self.io,
        }
    }

    fn run_loop(&mut self, started: Instant) -> HaltReason {
        loop {
            if self.state.ip >= self.program.len() {
                return HaltReason::Normal;
            }

            if self.state.steps >= self.config.max_steps {
                return HaltReason::Fault(RuntimeError::StepLimitExceeded {
                    limit: self.config.max_steps,
                });
            }

            if let Some(budget) = self.config.deadline {
                if self.state.steps % DEADLINE_CHECK_INTERVAL == 0 && started.elapsed() >= budget {
                    return HaltReason::Fault(RuntimeError::DeadlineExceeded { budget });
                }
            }

            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Halt) => return HaltReason::Normal,
                Err(err) => return HaltReason::Fault(err),
            }
        }
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn io(&self) -> &I {
        &self.io
    }
}
