//! Program builder tests - tokenizing, labels, and arena sizing
//!
//! These tests only build programs; nothing is executed.

use super::helpers::build_program;
use crate::interpreter::program::{Instruction, Program};

#[test]
fn test_instruction_count_matches_non_blank_lines() {
    let program = build_program(
        r#"
        5 > x

        3 > y
           
        add &x &y > z
        out &z
    "#,
    );

    assert_eq!(program.len(), 4);
    assert_eq!(
        program.get(2),
        Some(&Instruction::from_iter(["add", "&x", "&y", ">", "z"]))
    );
}

#[test]
fn test_build_from_lines() {
    let program = Program::build(&["out 1", "lbl end", "out 2"]);

    assert_eq!(program.len(), 3);
    assert_eq!(program.get(1).and_then(Instruction::opcode), Some("lbl"));
    assert_eq!(program.label("end"), Some(1));
}

#[test]
fn test_quoted_string_is_one_token() {
    let program = build_program(r#"out "hello,   world $name""#);

    assert_eq!(
        program.get(0).map(Instruction::tokens),
        Some(&["out".to_string(), "\"hello,   world $name\"".to_string()][..])
    );
}

#[test]
fn test_labels_record_their_own_index() {
    let program = build_program(
        r#"
        lbl start
        out 1
        lbl middle
        out 2
        lbl end
    "#,
    );

    assert_eq!(program.label("start"), Some(0));
    assert_eq!(program.label("middle"), Some(2));
    assert_eq!(program.label("end"), Some(4));
    assert_eq!(program.label("missing"), None);
}

#[test]
fn test_duplicate_label_last_one_wins() {
    let program = build_program(
        r#"
        lbl again
        out 1
        lbl again
    "#,
    );

    assert_eq!(program.label("again"), Some(2));
    assert_eq!(program.labels.len(), 1);
}

#[test]
fn test_labels_are_case_sensitive() {
    let program = build_program("lbl Loop\nlbl loop");

    assert_eq!(program.label("Loop"), Some(0));
    assert_eq!(program.label("loop"), Some(1));
}

#[test]
fn test_required_size_sums_every_allocation() {
    let program = build_program(
        r#"
        alc &name :[16]
        alc &buf :[4]
        out "x"
    "#,
    );

    assert_eq!(program.required_size, 20);
}

#[test]
fn test_required_size_counts_repeated_names_each_time() {
    let program = build_program(
        r#"
        alc &buf :[4]
        drp &buf
        alc &buf :[8]
    "#,
    );

    assert_eq!(program.required_size, 12);
}

#[test]
fn test_malformed_allocation_contributes_nothing() {
    let program = build_program(
        r#"
        alc &a :[x]
        alc &b 4
        alc &c :[2] extra
        alc &d :[3]
    "#,
    );

    assert_eq!(program.required_size, 3);
    assert_eq!(program.len(), 4);
}

#[test]
fn test_no_validation_at_build_time() {
    let program = build_program(
        r#"
        frobnicate the widget
        jeq nowhere
        >
    "#,
    );

    assert_eq!(program.len(), 3);
    assert!(program.labels.is_empty());
}

#[test]
fn test_instruction_display_joins_tokens() {
    let instruction = Instruction::parse("add   5\t&x > y");
    assert_eq!(instruction.to_string(), "add 5 &x > y");
}
