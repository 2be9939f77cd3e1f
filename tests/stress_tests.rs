//! Stress tests for Brainshift
//!
//! Tests with large programs, many iterations, resource limits and
//! concurrent runs of one shared program.

use brainshift_disassembler::disassemble;
use brainshift_preprocessor::build;
use brainshift_runtime::{run, BufferedIo, RuntimeError, VMConfig, VM};
use std::time::Duration;

// ============================================================================
// Large Programs
// ============================================================================

#[test]
fn test_long_straight_line_program() {
    let source = "+".repeat(100_000) + ".";
    let program = build(&source).unwrap();
    assert_eq!(program.len(), 100_001);

    let result = run(&program, b"");
    assert!(result.is_normal());
    assert_eq!(result.output(), &[(100_000 % 256) as u8]);
    assert_eq!(result.steps, 100_001);
}

#[test]
fn test_many_labels() {
    // chain of 1000 jumps, each to the next label
    let mut source = String::new();
    for i in 0..1000 {
        source.push_str(&format!("*l{i} + J *l{} ", i + 1));
    }
    source.push_str("*l1000 .");

    let program = build(&source).unwrap();
    assert_eq!(program.labels.len(), 1001);
    assert!(program.validate().is_ok());

    let result = run(&program, b"");
    assert_eq!(result.output(), &[(1000 % 256) as u8]);

    let rebuilt = build(&disassemble(&program).unwrap()).unwrap();
    assert_eq!(rebuilt, program);
}

#[test]
fn test_deep_bracket_nesting() {
    let depth = 5_000;
    let source = "[".repeat(depth) + &"]".repeat(depth);
    let program = build(&source).unwrap();
    assert_eq!(program.len(), 2 * depth);
    // cell is zero, so the outer loop is skipped in one step
    let result = run(&program, b"");
    assert_eq!(result.steps, 1);
}

// ============================================================================
// Many Iterations
// ============================================================================

#[test]
fn test_nested_loop_iterations() {
    // 255 * 255 inner iterations
    let source = "-[>-[>+<-]<-]>>.";
    let result = brainshift_runtime::run_source(source, b"").unwrap();
    assert!(result.is_normal());
    assert_eq!(result.output(), &[(255u32 * 255 % 256) as u8]);
    assert!(result.steps > 255 * 255 * 4);
}

#[test]
fn test_wide_tape() {
    let cells = 60_000;
    let source = ">".repeat(cells - 1) + "+.";
    let result = brainshift_runtime::run_source(&source, b"").unwrap();
    assert!(result.is_normal());
    assert_eq!(result.snapshot.tape.len(), cells);
    assert_eq!(result.snapshot.pointer, cells - 1);
}

#[test]
fn test_tape_limit_reached_by_scan() {
    let result = brainshift_runtime::run_source("+[>+]", b"").unwrap();
    assert!(matches!(
        result.fault(),
        Some(RuntimeError::TapeOverflow { limit: 65_536 })
    ));
    assert_eq!(result.snapshot.tape.len(), 65_536);
}

#[test]
fn test_deep_recursion_within_limit() {
    // recurse 255 times, counting down, then unwind
    let source = "- C *down ; *down - Z j *base C *down *base R";
    let program = build(source).unwrap();
    let result = run(&program, b"");
    assert!(result.is_normal(), "{}", result.halt_reason);
    assert!(result.snapshot.call_stack.is_empty());
}

#[test]
fn test_recursion_limit_is_configurable() {
    let program = build("*r C *r").unwrap();
    for depth in [1, 10, 1000] {
        let config = VMConfig {
            max_call_depth: depth,
            ..VMConfig::default()
        };
        let result = VM::new(&program, BufferedIo::default(), config).run();
        assert!(matches!(
            result.fault(),
            Some(RuntimeError::CallStackOverflow { depth: d }) if *d == depth
        ));
        assert_eq!(result.snapshot.call_stack.len(), depth);
    }
}

#[test]
fn test_default_step_limit() {
    let result = brainshift_runtime::run_source("+[]", b"").unwrap();
    assert!(matches!(
        result.fault(),
        Some(RuntimeError::StepLimitExceeded { limit: 10_000_000 })
    ));
}

#[test]
fn test_deadline_stops_long_run() {
    let program = build("+[]").unwrap();
    let config = VMConfig {
        max_steps: u64::MAX,
        deadline: Some(Duration::from_millis(20)),
        ..VMConfig::default()
    };
    let result = VM::new(&program, BufferedIo::default(), config).run();
    assert!(matches!(
        result.fault(),
        Some(RuntimeError::DeadlineExceeded { .. })
    ));
    assert!(result.steps > 0);
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_program_across_threads() {
    // each thread echoes its own input, incremented
    let program = build(",[+.,]").unwrap();

    let outputs: Vec<Vec<u8>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0u8..8)
            .map(|id| {
                let program = &program;
                scope.spawn(move || {
                    let mut input = vec![id + 1; 1000];
                    input.push(0);
                    let result = run(program, &input);
                    assert!(result.is_normal());
                    result.output().to_vec()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for (id, output) in outputs.iter().enumerate() {
        assert_eq!(output.len(), 1000);
        assert!(output.iter().all(|&b| b == id as u8 + 2));
    }
}

#[test]
fn test_concurrent_runs_are_deterministic() {
    let program = build("*l , Z j *end > + < A . J *l *end ;").unwrap();
    let input: Vec<u8> = (1..=200).chain(std::iter::once(0)).collect();

    let results: Vec<(Vec<u8>, u64)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let (program, input) = (&program, &input);
                scope.spawn(move || {
                    let result = run(program, input);
                    (result.output().to_vec(), result.steps)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}
