// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Call-Boundary Contract Checks
//!
//! Shared validation for the coordination core's public operations. Both
//! components accept opaque caller-supplied strings (agent ids, knowledge
//! keys) plus a `[0.0, 1.0]` confidence; a violation is rejected eagerly with
//! a typed error naming the offending parameter, never coerced.
//!
//! Not-found conditions are not errors. Operations signal those through
//! `Option` / `bool` returns instead.

use thiserror::Error;

/// A caller broke the contract of a public operation.
///
/// Every variant names the parameter at fault so the failing call site is
/// identifiable from the message alone.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ContractViolation {
    /// An agent identifier was empty.
    #[error("{param} must be a non-empty agent id")]
    EmptyAgentId { param: &'static str },

    /// A knowledge key was empty.
    #[error("{param} must be a non-empty key")]
    EmptyKey { param: &'static str },

    /// A confidence value fell outside `[0.0, 1.0]`.
    #[error("{param} must be within [0.0, 1.0], got {value}")]
    ConfidenceOutOfRange { param: &'static str, value: f64 },
}

/// Reject an empty agent identifier.
pub fn require_agent_id(param: &'static str, value: &str) -> Result<(), ContractViolation> {
    if value.is_empty() {
        return Err(ContractViolation::EmptyAgentId { param });
    }
    Ok(())
}

/// Reject an empty knowledge key.
pub fn require_key(param: &'static str, value: &str) -> Result<(), ContractViolation> {
    if value.is_empty() {
        return Err(ContractViolation::EmptyKey { param });
    }
    Ok(())
}

/// Reject a confidence outside the conventional `[0.0, 1.0]` range.
///
/// `NaN` fails the range check and is rejected like any other out-of-range
/// value.
pub fn require_confidence(param: &'static str, value: f64) -> Result<(), ContractViolation> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ContractViolation::ConfidenceOutOfRange { param, value });
    }
    Ok(())
}
