//! Variable store tests - allocation, reads, writes, drops, reserved names

use maplit::hashmap;
use std::collections::HashMap;

use crate::interpreter::errors::StackError;
use crate::interpreter::stack::{Stack, STATUS_REGISTER};
use crate::interpreter::types::Val;

#[test]
fn test_write_then_read() {
    let mut stack = Stack::new(0);
    stack.write("x", Val::Int(5)).unwrap();

    assert_eq!(stack.read("x"), Ok(&Val::Int(5)));
}

#[test]
fn test_overwrite_replaces_value_and_type() {
    let mut stack = Stack::new(0);
    stack.write("x", Val::Int(5)).unwrap();
    stack.write("x", Val::from("five")).unwrap();

    assert_eq!(stack.read("x"), Ok(&Val::from("five")));
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_allocated_variable_has_no_data() {
    let mut stack = Stack::new(8);
    stack.allocate("buf", 8).unwrap();

    assert_eq!(
        stack.read("buf"),
        Err(StackError::NoData {
            name: "buf".to_string()
        })
    );
}

#[test]
fn test_read_undefined_variable() {
    let stack = Stack::new(0);

    assert_eq!(
        stack.read("ghost"),
        Err(StackError::Undefined {
            name: "ghost".to_string()
        })
    );
}

#[test]
fn test_names_are_case_sensitive() {
    let mut stack = Stack::new(0);
    stack.write("X", Val::Int(1)).unwrap();

    assert!(stack.read("x").is_err());
}

#[test]
fn test_value_within_capacity_fits() {
    let mut stack = Stack::new(4);
    stack.allocate("buf", 4).unwrap();
    stack.write("buf", Val::from("abcd")).unwrap();

    assert_eq!(stack.read("buf"), Ok(&Val::from("abcd")));
}

#[test]
fn test_value_over_capacity_is_rejected() {
    let mut stack = Stack::new(4);
    stack.allocate("buf", 4).unwrap();

    assert_eq!(
        stack.write("buf", Val::from("abcde")),
        Err(StackError::CapacityExceeded {
            name: "buf".to_string(),
            capacity: 4,
            size: 5,
        })
    );
    // The failed write leaves the variable untouched
    assert!(matches!(stack.read("buf"), Err(StackError::NoData { .. })));
}

#[test]
fn test_capacity_counts_utf8_bytes() {
    let mut stack = Stack::new(4);
    stack.allocate("buf", 4).unwrap();

    assert!(stack.write("buf", Val::from("éé")).is_ok());
    assert!(stack.write("buf", Val::from("ééé")).is_err());
}

#[test]
fn test_capacity_applies_to_numbers_by_display_width() {
    let mut stack = Stack::new(2);
    stack.allocate("n", 2).unwrap();

    assert!(stack.write("n", Val::Int(99)).is_ok());
    assert!(stack.write("n", Val::Int(100)).is_err());
}

#[test]
fn test_allocation_is_limited_by_arena_size() {
    let mut stack = Stack::new(6);
    stack.allocate("a", 4).unwrap();

    assert_eq!(
        stack.allocate("b", 4),
        Err(StackError::ArenaExhausted {
            name: "b".to_string(),
            requested: 4,
            used: 4,
            total: 6,
        })
    );
    assert_eq!(stack.used(), 4);
}

#[test]
fn test_reallocation_releases_previous_capacity() {
    let mut stack = Stack::new(8);
    stack.allocate("buf", 6).unwrap();
    stack.write("buf", Val::from("hello")).unwrap();
    stack.allocate("buf", 8).unwrap();

    assert_eq!(stack.used(), 8);
    assert!(matches!(stack.read("buf"), Err(StackError::NoData { .. })));
}

#[test]
fn test_drop_releases_capacity() {
    let mut stack = Stack::new(4);
    stack.allocate("a", 4).unwrap();
    stack.drop_variable("a").unwrap();

    assert_eq!(stack.used(), 0);
    assert!(stack.allocate("b", 4).is_ok());
}

#[test]
fn test_drop_removes_variable() {
    let mut stack = Stack::new(0);
    stack.write("x", Val::Int(1)).unwrap();
    stack.drop_variable("x").unwrap();

    assert!(!stack.contains("x"));
    assert!(matches!(stack.read("x"), Err(StackError::Undefined { .. })));
}

#[test]
fn test_drop_missing_variable() {
    let mut stack = Stack::new(0);

    assert_eq!(
        stack.drop_variable("x"),
        Err(StackError::Undefined {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_status_register_rejects_user_access() {
    let mut stack = Stack::new(4);
    let reserved = || StackError::Reserved {
        name: STATUS_REGISTER.to_string(),
    };

    // Reserved even before the engine first writes it
    assert_eq!(stack.write(STATUS_REGISTER, Val::Int(0)), Err(reserved()));
    assert_eq!(stack.allocate(STATUS_REGISTER, 1), Err(reserved()));
    assert_eq!(stack.drop_variable(STATUS_REGISTER), Err(reserved()));

    stack.write_reserved(STATUS_REGISTER, Val::Int(1)).unwrap();
    assert_eq!(stack.read(STATUS_REGISTER), Ok(&Val::Int(1)));
    assert_eq!(stack.write(STATUS_REGISTER, Val::Int(0)), Err(reserved()));
    assert_eq!(stack.drop_variable(STATUS_REGISTER), Err(reserved()));
}

#[test]
fn test_privileged_write_marks_variable_reserved() {
    let mut stack = Stack::new(0);
    stack.write("flag", Val::Int(0)).unwrap();
    stack.write_reserved("flag", Val::Int(1)).unwrap();

    assert!(stack.get("flag").is_some_and(|v| v.reserved));
    assert!(matches!(
        stack.write("flag", Val::Int(2)),
        Err(StackError::Reserved { .. })
    ));
}

#[test]
fn test_iter_keeps_creation_order() {
    let mut stack = Stack::new(4);
    stack.write("b", Val::Int(2)).unwrap();
    stack.allocate("a", 4).unwrap();
    stack.write("c", Val::from("three")).unwrap();

    let names: Vec<&str> = stack.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["b", "a", "c"]);

    let values: HashMap<&str, Option<Val>> = stack
        .iter()
        .map(|(name, var)| (name, var.value.clone()))
        .collect();
    assert_eq!(
        values,
        hashmap! {
            "a" => None,
            "b" => Some(Val::Int(2)),
            "c" => Some(Val::from("three")),
        }
    );
}
