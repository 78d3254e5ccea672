// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Coordination Infrastructure Layer
//!
//! The lock-protected in-memory engines behind the domain model. All state
//! lives in process; nothing here touches disk or network.
//!
//! | Module | Key Types |
//! |--------|-----------|
//! | [`message_bus`] | `MessageBus` |
//! | [`knowledge_store`] | `KnowledgeStore` |

pub mod knowledge_store;
pub mod message_bus;

pub use knowledge_store::*;
pub use message_bus::*;
