// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # `aegis-hive-core` — Swarm Coordination Core
//!
//! In-process coordination primitives for a swarm of agents: a message bus
//! with per-agent FIFO mailboxes and topic broadcast, plus a shared,
//! versioned knowledge store with pluggable conflict resolution. Both
//! components are free-standing; a [`SwarmCoordinator`] owns one of each per
//! swarm.
//!
//! ## Crate Layout
//!
//! | Module | Layer | Contents |
//! |--------|-------|----------|
//! | [`domain`] | Domain | `Message`, `MessageKind`, `KnowledgeEntry`, `ConflictStrategy`, `HistoryRetention`, `ContractViolation` |
//! | [`application`] | Application | `SwarmCoordinator`, `CoordinationConfig` |
//! | [`infrastructure`] | Infrastructure | `MessageBus`, `KnowledgeStore` |
//!
//! ## Key Concepts
//!
//! - **Mailbox**: an agent's private FIFO inbox. Direct messages land in the
//!   recipient's mailbox unconditionally; broadcasts land in the mailbox of
//!   every subscriber of the message kind's topic except the sender.
//! - **Topic**: the snake_case string form of a [`MessageKind`], matched
//!   exactly against subscription strings.
//! - **Conflict resolution**: every knowledge write is reconciled against
//!   the key's existing entry by the store's [`ConflictStrategy`]; the
//!   per-key version counts write attempts whatever the strategy keeps.
//! - **History**: superseded knowledge entries are retained per key, oldest
//!   first, pruned by a construction-time [`HistoryRetention`] policy.
//!
//! ## Phase Notes
//!
//! All state is in memory and scoped to one process: no persistence, no
//! network transport, no sender authentication, and no delivery guarantees
//! across restarts. Cross-process federation belongs to the embedding
//! runtime, not this crate.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::*;
pub use domain::*;
pub use infrastructure::*;
