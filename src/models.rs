// ABOUTME: Role and credential record models re-exported from rolegate-core
// ABOUTME: Shared by the credential stores, the token issuer, and the authorization gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use rolegate_core::models::*;
