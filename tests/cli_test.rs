/*!
 * Binary Tests
 * End-to-end runs of the rawsys executable
 */

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output, Stdio};

fn rawsys(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_rawsys"))
        .args(args)
        .env_remove("RAWSYS_BUFFER_CAPACITY")
        .env_remove("RAWSYS_ALLOWED_RUN_TIME_SECS")
        .env_remove("RAWSYS_RECOVERY")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let mut input = child.stdin.take().unwrap();
    input.write_all(stdin).unwrap();
    drop(input);

    child.wait_with_output().unwrap()
}

#[test]
fn test_echo_writes_argument() {
    let output = rawsys(&["echo", "hello there"], b"");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"hello there\n".to_vec());
}

#[test]
fn test_echo_without_argument_fails() {
    let output = rawsys(&["echo"], b"");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_cat_copies_stdin() {
    let data: Vec<u8> = (0..10_000u32).map(|i| (i % 256) as u8).collect();
    let output = rawsys(&["cat", "--buffer-capacity", "100"], &data);
    assert!(output.status.success());
    assert_eq!(output.stdout, data);
}

#[test]
fn test_cat_literal_copies_stdin() {
    let data: Vec<u8> = (0..5_000u32).map(|i| (i % 199) as u8).collect();
    let output = rawsys(&["cat", "--literal", "--buffer-capacity", "64"], &data);
    assert!(output.status.success());
    assert_eq!(output.stdout, data);
}

#[test]
fn test_echo_literal_writes_argument() {
    let output = rawsys(&["echo", "--literal", "one write"], b"");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"one write\n".to_vec());
}

#[test]
fn test_cat_rejects_zero_capacity() {
    let output = rawsys(&["cat", "--buffer-capacity", "0"], b"data");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_trap_session_on_piped_input() {
    let output = rawsys(&["trap", "--allowed-run-time", "30"], b"hi\n\n\n");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"hi\n1\n2\nHheheheheh\n".to_vec());
}

#[test]
fn test_trap_with_zero_allowance_does_nothing() {
    let output = rawsys(&["trap", "--allowed-run-time", "0"], b"hi\n\n");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}
