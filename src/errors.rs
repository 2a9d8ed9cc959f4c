// ABOUTME: Unified error handling re-exported from rolegate-core
// ABOUTME: Keeps `crate::errors` paths stable for routes, middleware, and binaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rolegate_core::errors::*;
