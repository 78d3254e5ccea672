// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Coordination Domain Layer
//!
//! Pure value objects and rules for swarm coordination. No locking, no I/O.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`message`] | `Message`, `MessageKind`, `MessageId` |
//! | [`knowledge`] | `KnowledgeEntry`, `KnowledgeWrite`, `ConflictStrategy`, `HistoryRetention` |
//! | [`contract`] | `ContractViolation` + call-boundary checks |

pub mod contract;
pub mod knowledge;
pub mod message;

pub use contract::*;
pub use knowledge::*;
pub use message::*;
