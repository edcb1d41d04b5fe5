// ABOUTME: Helper modules for nutrilog-cli
// ABOUTME: Output formatting shared by the subcommands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Nutrilog Contributors

pub mod display;
