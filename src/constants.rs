// ABOUTME: Application constants re-exported from rolegate-core
// ABOUTME: Token audience and issuer, cookie names, session lifetimes, secret limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rolegate_core::constants::*;
