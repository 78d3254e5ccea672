// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Coordination Application Layer
//!
//! Use-case surface tying the infrastructure components to a swarm's
//! lifecycle.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`coordinator`] | `SwarmCoordinator`, `CoordinationConfig` |

pub mod coordinator;

pub use coordinator::*;
