// ABOUTME: Unified error handling for the Nutrilog server crate
// ABOUTME: Re-exports the shared error taxonomy from nutrilog-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

//! # Unified Error Handling System
//!
//! `AppError` carries an `ErrorCode`, a message, and optional context. With the
//! `http-response` feature it converts into a JSON error response whose status
//! comes from the code.

pub use nutrilog_core::errors::*;
