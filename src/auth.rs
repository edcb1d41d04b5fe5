// ABOUTME: Session gate guarding the AI analysis feature behind a passcode
// ABOUTME: Lifecycle locked -> unlocked on passcode match -> locked on explicit lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Session Gate
//!
//! A single shared lock flag, not a security boundary. The configured
//! passcode is kept only as a SHA-256 digest and compared in constant time.

use std::fmt::{self, Debug, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use nutrilog_core::errors::{AppError, AppResult};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::logging::AppLogger;

fn digest(passcode: &str) -> [u8; 32] {
    Sha256::digest(passcode.as_bytes()).into()
}

/// Shared lock state; clones observe the same session
#[derive(Clone)]
pub struct SessionGate {
    expected: Option<[u8; 32]>,
    unlocked: Arc<AtomicBool>,
}

impl SessionGate {
    /// Create a locked gate; `None` means no passcode is configured and
    /// unlocking always fails
    #[must_use]
    pub fn new(passcode: Option<&str>) -> Self {
        Self {
            expected: passcode.map(digest),
            unlocked: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Unlock when `passcode` matches the configured one
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_ERROR` when no passcode is configured and
    /// `AUTH_INVALID` on mismatch; the gate stays in its current state
    pub fn unlock(&self, passcode: &str) -> AppResult<()> {
        let Some(expected) = self.expected else {
            AppLogger::log_session_event("unlock", false);
            return Err(AppError::config("No passcode is configured for this server"));
        };

        if bool::from(digest(passcode)[..].ct_eq(&expected[..])) {
            self.unlocked.store(true, Ordering::SeqCst);
            AppLogger::log_session_event("unlock", true);
            Ok(())
        } else {
            AppLogger::log_session_event("unlock", false);
            Err(AppError::auth_invalid("Incorrect passcode"))
        }
    }

    /// Return to the locked state
    pub fn lock(&self) {
        self.unlocked.store(false, Ordering::SeqCst);
        AppLogger::log_session_event("lock", true);
    }

    /// Current state
    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked.load(Ordering::SeqCst)
    }

    /// Fail unless unlocked
    ///
    /// # Errors
    ///
    /// Returns `AUTH_REQUIRED` while locked
    pub fn require_unlocked(&self) -> AppResult<()> {
        if self.is_unlocked() {
            Ok(())
        } else {
            Err(AppError::auth_required())
        }
    }
}

impl Debug for SessionGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGate")
            .field("configured", &self.expected.is_some())
            .field("unlocked", &self.is_unlocked())
            .finish_non_exhaustive()
    }
}
