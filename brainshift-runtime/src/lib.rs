//! # Brainshift Runtime
//!
//! Execute Brainshift programs on a byte-tape virtual machine.
//!
//! ## Features
//!
//! - **Tape**: 8-bit cells, growing to the right up to a configurable limit
//! - **Zero flag**: set by `Z` and by overflow on `A`/`M`/`S`, read by `j`/`n`
//! - **Call stack**: explicit return addresses for `C`/`R`, bounded depth
//! - **Budgets**: step limit and optional wall-clock deadline
//! - **Pluggable I/O**: in-memory [`BufferedIo`] or any reader/writer via [`StreamIo`]
//!
//! ## Example
//!
//! ```rust
//! use brainshift_runtime::run_source;
//!
//! let result = run_source(",+.;", b"A").unwrap();
//! assert!(result.is_normal());
//! assert_eq!(result.output(), b"B");
//! ```

pub mod error;
pub mod tape;
pub mod state;
pub mod io;
pub mod execute;
pub mod vm;

pub use error::{Result, RuntimeError};
pub use tape::Tape;
pub use state::{CallStack, Flags, HaltReason, Snapshot, VMState};
pub use io::{BufferedIo, IoAdapter, StreamIo};
pub use execute::{execute, Flow};
pub use vm::{ExecutionResult, VMConfig, VM};

use brainshift_spec::Program;

/// Simple execution helper
///
/// Runs a program over an in-memory input with the default configuration.
pub fn run(program: &Program, input: &[u8]) -> ExecutionResult<BufferedIo> {
    VM::new(program, BufferedIo::new(input), VMConfig::default()).run()
}

/// Build and run source text in one go
///
/// Only a syntax error is returned as `Err`; runtime faults are reported
/// in the result's halt reason.
pub fn run_source(source: &str, input: &[u8]) -> Result<ExecutionResult<BufferedIo>> {
    let program = brainshift_preprocessor::build(source)?;
    Ok(run(&program, input))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brainshift_preprocessor::SyntaxError;

    #[test]
    fn test_public_exports() {
        let _ = VMConfig::default();
        let _ = HaltReason::Normal;
        let _ = Tape::default();
        let _ = BufferedIo::default();
        let _ = Flags::new();
        let _ = CallStack::default();
    }

    #[test]
    fn test_run_helper() {
        let program = brainshift_preprocessor::build("+++.;").unwrap();
        let result = run(&program, b"");
        assert!(result.is_normal());
        assert_eq!(result.output(), &[0x03]);
    }

    #[test]
    fn test_run_source_echo() {
        let result = run_source(",.;", &[0x41]).unwrap();
        assert_eq!(result.output(), &[0x41]);
    }

    #[test]
    fn test_run_source_syntax_error() {
        let err = run_source("[", b"").unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::Syntax(SyntaxError::UnmatchedBracket { bracket: '[', .. })
        ));
    }

    #[test]
    fn test_run_source_fault_is_ok() {
        let result = run_source("<", b"").unwrap();
        assert!(matches!(result.fault(), Some(RuntimeError::PointerUnderflow)));
    }

    #[test]
    fn test_execution_result_fields() {
        let result = run_source("+>+;", b"").unwrap();
        assert_eq!(result.steps, 4);
        assert_eq!(result.snapshot.tape, vec![1, 1]);
        assert_eq!(result.snapshot.pointer, 1);
        assert!(!result.snapshot.zero_flag);
        assert!(result.snapshot.call_stack.is_empty());
    }
}
