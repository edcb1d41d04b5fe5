// ABOUTME: Tests for the passcode session gate
// ABOUTME: Covers unlock, lock, wrong and unconfigured passcodes, and shared state across clones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutrilog::auth::SessionGate;
use nutrilog_core::errors::ErrorCode;

#[test]
fn test_gate_starts_locked() {
    let gate = SessionGate::new(Some("letmein"));
    assert!(!gate.is_unlocked());
    assert_eq!(
        gate.require_unlocked().unwrap_err().code,
        ErrorCode::AuthRequired
    );
}

#[test]
fn test_unlock_then_lock() {
    let gate = SessionGate::new(Some("letmein"));
    gate.unlock("letmein").unwrap();
    assert!(gate.is_unlocked());
    gate.require_unlocked().unwrap();

    gate.lock();
    assert!(!gate.is_unlocked());
}

#[test]
fn test_wrong_passcode_is_auth_invalid() {
    let gate = SessionGate::new(Some("letmein"));
    let error = gate.unlock("letmeout").unwrap_err();
    assert_eq!(error.code, ErrorCode::AuthInvalid);
    assert!(!gate.is_unlocked());
}

#[test]
fn test_wrong_passcode_keeps_existing_unlock() {
    let gate = SessionGate::new(Some("letmein"));
    gate.unlock("letmein").unwrap();
    assert!(gate.unlock("nope").is_err());
    assert!(gate.is_unlocked());
}

#[test]
fn test_passcode_comparison_is_exact() {
    let gate = SessionGate::new(Some("letmein"));
    assert!(gate.unlock("letmein ").is_err());
    assert!(gate.unlock("LETMEIN").is_err());
    assert!(gate.unlock("").is_err());
}

#[test]
fn test_unconfigured_passcode_never_unlocks() {
    let gate = SessionGate::new(None);
    let error = gate.unlock("").unwrap_err();
    assert_eq!(error.code, ErrorCode::ConfigError);
    assert!(!gate.is_unlocked());
}

#[test]
fn test_clones_share_state() {
    let gate = SessionGate::new(Some("letmein"));
    let handle = gate.clone();
    gate.unlock("letmein").unwrap();
    assert!(handle.is_unlocked());
    handle.lock();
    assert!(!gate.is_unlocked());
}

#[test]
fn test_debug_hides_passcode() {
    let gate = SessionGate::new(Some("letmein"));
    let rendered = format!("{gate:?}");
    assert!(!rendered.contains("letmein"));
    assert!(rendered.contains("configured: true"));
}
