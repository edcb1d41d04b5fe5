// ABOUTME: Re-exports command modules for nutrilog-cli
// ABOUTME: Provides the prompt and analyze subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

pub mod analyze;
pub mod prompt;
