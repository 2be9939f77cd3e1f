//! `brainshift` command-line interpreter
//!
//! Exit status is 0 when the program halts normally, 1 when it cannot be
//! loaded (unreadable source or syntax error) and 2 on a runtime fault.

mod cli;

use anyhow::{Context, Result};
use brainshift_disassembler::{disassemble, disassemble_annotated};
use brainshift_preprocessor::build;
use brainshift_runtime::{StreamIo, VM};
use clap::Parser;
use cli::{Args, SourceLocation};
use std::fs;
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const EXIT_LOAD_ERROR: u8 = 1;
const EXIT_FAULT: u8 = 2;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(EXIT_LOAD_ERROR)
        }
    }
}

fn read_source(location: &SourceLocation) -> Result<String> {
    match location {
        SourceLocation::Inline(src) => Ok(src.clone()),
        SourceLocation::File(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        SourceLocation::Stdin => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read program from stdin")?;
            Ok(buffer)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let location = args.source_location();
    let source = read_source(&location)?;
    tracing::debug!(bytes = source.len(), ?location, "loaded source");

    let program = build(&source).context("syntax error")?;

    if args.listing {
        let listing = if args.offsets {
            disassemble_annotated(&program)?
        } else {
            disassemble(&program)?
        };
        io::stdout().write_all(listing.as_bytes())?;
        return Ok(ExitCode::SUCCESS);
    }

    let input: Box<dyn Read> = match (&args.input, &location) {
        (Some(text), _) => Box::new(Cursor::new(text.clone().into_bytes())),
        // stdin already held the program
        (None, SourceLocation::Stdin) => Box::new(io::empty()),
        (None, _) => Box::new(io::stdin().lock()),
    };
    let output = BufWriter::new(io::stdout().lock());

    let result = VM::new(&program, StreamIo::new(input, output), args.vm_config()).run();

    if args.dump {
        eprint!("{}", result.snapshot);
    }

    match result.fault() {
        None => Ok(ExitCode::SUCCESS),
        Some(err) => {
            let kind = if err.is_budget() {
                "run stopped"
            } else {
                "runtime error"
            };
            eprintln!(
                "{} at instruction {} after {} steps: {}",
                kind, result.ip, result.steps, err
            );
            Ok(ExitCode::from(EXIT_FAULT))
        }
    }
}
