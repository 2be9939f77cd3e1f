//! Cross-module interaction tests
//!
//! Tests the integration between preprocessor, disassembler, and runtime.

use brainshift_disassembler::{disassemble, disassemble_annotated, format};
use brainshift_preprocessor::{build, SyntaxError};
use brainshift_runtime::{
    execute, BufferedIo, Flow, RuntimeError, Snapshot, StreamIo, VMConfig, VMState, VM,
};
use brainshift_spec::{Instruction, LabelRef, LabelTable, Opcode, Program};

// ============================================================================
// Preprocessor -> Runtime Tests
// ============================================================================

#[test]
fn test_built_program_runs() {
    let program = build("+++.;").unwrap();
    let result = VM::new(&program, BufferedIo::default(), VMConfig::default()).run();
    assert!(result.is_normal());
    assert_eq!(result.output(), &[0x03]);
}

#[test]
fn test_hand_built_program_runs() {
    // the same program without the preprocessor
    let mut labels = LabelTable::new();
    labels.define("body", 3).unwrap();
    let program = Program::from_parts(
        vec![
            Instruction::Call {
                target: LabelRef::new("body", 3),
            },
            Instruction::Output,
            Instruction::Halt,
            Instruction::Inc,
            Instruction::Inc,
            Instruction::Return,
        ],
        labels,
    );
    assert!(program.validate().is_ok());
    assert_eq!(program, build("C *body . ; *body ++ R").unwrap());

    let result = brainshift_runtime::run(&program, b"");
    assert_eq!(result.output(), &[2]);
}

#[test]
fn test_execute_matches_vm() {
    let program = build("++>+<A Z").unwrap();

    let mut state = VMState::default();
    let mut io = BufferedIo::default();
    for instr in &program.instructions {
        assert_eq!(execute(instr, &mut state, &mut io).unwrap(), Flow::Continue);
    }

    let result = brainshift_runtime::run(&program, b"");
    assert_eq!(state.snapshot(), result.snapshot);
    assert_eq!(state.ip, result.ip);
}

#[test]
fn test_labels_follow_instruction_offsets() {
    let source = "\"a\" + \"b\" *x - \"c\" J *x";
    let program = build(source).unwrap();
    assert_eq!(program.labels.resolve("x"), Some(1));
    assert_eq!(program.get(1), Some(&Instruction::Dec));
}

// ============================================================================
// Disassembler Tests
// ============================================================================

#[test]
fn test_listing_runs_like_the_source() {
    let source = r#"
        "add two to every input byte until a zero byte"
        *next , Z j *done
        >++< C *addtwo . J *next
        *addtwo: > [- < + >] < R
        *done ;
    "#;
    let program = build(source).unwrap();
    let listing = disassemble(&program).unwrap();
    let rebuilt = build(&listing).unwrap();
    assert_eq!(rebuilt, program);

    let input = [1, 2, 3, 0];
    let original = brainshift_runtime::run(&program, &input);
    let relisted = brainshift_runtime::run(&rebuilt, &input);
    assert!(original.is_normal(), "{}", original.halt_reason);
    assert_eq!(original.output(), &[3, 4, 5]);
    assert_eq!(original.output(), relisted.output());
}

#[test]
fn test_annotated_listing_mentions_offsets() {
    let program = build("+ *x - J *x").unwrap();
    let text = disassemble_annotated(&program).unwrap();
    assert!(text.contains("\"0000\"  +"));
    assert!(text.contains("*x\n\"0001\"  -"));
    assert!(text.contains("\"0002\"  J *x"));
}

#[test]
fn test_format_agrees_with_opcode_characters() {
    let program = build("><+-0.,&|^~!#@AMSD%Zz;R").unwrap();
    for instr in &program.instructions {
        assert_eq!(format(instr), instr.opcode().to_char().to_string());
        assert_eq!(format(instr), instr.to_string());
    }
}

#[test]
fn test_digest_survives_listing() {
    let program = build("*top + Z n *top").unwrap();
    let rebuilt = build(&disassemble(&program).unwrap()).unwrap();
    assert_eq!(program.digest_hex().unwrap(), rebuilt.digest_hex().unwrap());
}

// ============================================================================
// Error Propagation
// ============================================================================

#[test]
fn test_syntax_error_reaches_runtime_helper() {
    let err = brainshift_runtime::run_source("n", b"").unwrap_err();
    match err {
        RuntimeError::Syntax(SyntaxError::MissingLabel { opcode, .. }) => {
            assert_eq!(opcode, Opcode::JumpIfClear)
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_host_io_error_is_a_fault() {
    struct Broken;

    impl std::io::Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let program = build("+.+.").unwrap();
    let io = StreamIo::new(std::io::empty(), Broken);
    let result = VM::new(&program, io, VMConfig::default()).run();
    assert!(matches!(result.fault(), Some(RuntimeError::Io(_))));
    assert_eq!(result.ip, 1);
}

// ============================================================================
// Snapshot Encoding
// ============================================================================

#[test]
fn test_snapshot_encodes_with_bincode() {
    let result = brainshift_runtime::run_source("+>++>+++<Z C *f ; *f ;", b"").unwrap();
    assert!(result.is_normal());

    let bytes = bincode::serialize(&result.snapshot).unwrap();
    let decoded: Snapshot = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, result.snapshot);
    assert_eq!(decoded.tape, vec![1, 2, 3]);
    assert_eq!(decoded.pointer, 1);
    assert_eq!(decoded.call_stack, vec![11]);
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn straight_line() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::sample::select(vec![
                '+', '-', '>', '<', '0', ',', '.', '&', '|', '^', '~', '!', '#', '@', 'A', 'M',
                'S', 'D', '%', 'Z', 'z',
            ]),
            0..64,
        )
        .prop_map(|ops| ops.into_iter().collect())
    }

    proptest! {
        #[test]
        fn test_listing_runs_identically(source in straight_line(), input in prop::collection::vec(any::<u8>(), 0..8)) {
            let program = build(&source).unwrap();
            let rebuilt = build(&disassemble(&program).unwrap()).unwrap();

            let direct = brainshift_runtime::run(&program, &input);
            let again = brainshift_runtime::run(&rebuilt, &input);
            prop_assert_eq!(direct.output(), again.output());
            prop_assert_eq!(direct.steps, again.steps);
            prop_assert_eq!(direct.ip, again.ip);
            prop_assert_eq!(&direct.snapshot, &again.snapshot);
            prop_assert_eq!(direct.is_normal(), again.is_normal());
        }
    }
}
