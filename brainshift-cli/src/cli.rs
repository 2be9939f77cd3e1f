//! Command-line arguments

use brainshift_runtime::VMConfig;
use brainshift_spec::{DEFAULT_CALL_DEPTH, DEFAULT_TAPE_LEN};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "brainshift")]
#[command(version)]
#[command(about = "Brainshift interpreter - Brainfuck with flags, arithmetic, labels and subroutines")]
pub struct Args {
    /// Source file; standard input is read when neither this nor --program is given
    pub file: Option<PathBuf>,

    /// Program source given inline
    #[arg(short, long, value_name = "SRC", conflicts_with = "file")]
    pub program: Option<String>,

    /// Maximum tape length in cells
    #[arg(short, long, value_name = "CELLS", default_value_t = DEFAULT_TAPE_LEN)]
    pub memory: usize,

    /// Abort after this many instructions
    #[arg(long, value_name = "N", default_value_t = 10_000_000)]
    pub max_steps: u64,

    /// Maximum subroutine nesting
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CALL_DEPTH)]
    pub max_call_depth: usize,

    /// Abort after this many milliseconds of wall-clock time
    #[arg(long, value_name = "MS")]
    pub deadline_ms: Option<u64>,

    /// Input bytes for `,`; standard input is used otherwise
    #[arg(long, value_name = "STR")]
    pub input: Option<String>,

    /// Print the machine state to stderr when the run stops
    #[arg(long)]
    pub dump: bool,

    /// Print the canonical listing instead of running
    #[arg(long)]
    pub listing: bool,

    /// Prefix listing lines with instruction offsets
    #[arg(long, requires = "listing")]
    pub offsets: bool,

    /// Log every executed instruction (needs RUST_LOG=trace)
    #[arg(long)]
    pub trace: bool,
}

/// Where the program text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl Args {
    pub fn source_location(&self) -> SourceLocation {
        match (&self.program, &self.file) {
            (Some(src), _) => SourceLocation::Inline(src.clone()),
            (None, Some(path)) => SourceLocation::File(path.clone()),
            (None, None) => SourceLocation::Stdin,
        }
    }

    pub fn vm_config(&self) -> VMConfig {
        VMConfig {
            max_steps: self.max_steps,
            max_tape_len: self.memory,
            max_call_depth: self.max_call_depth,
            deadline: self.deadline_ms.map(Duration::from_millis),
            trace: self.trace,
        }
    }
}
