// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Swarm Coordinator
//!
//! Application-layer owner of one swarm's coordination state: a
//! [`MessageBus`] and a [`KnowledgeStore`], built together from a
//! [`CoordinationConfig`]. One coordinator per swarm instance; it is a plain
//! value the embedding runtime holds (typically behind an `Arc`), not a
//! process-wide singleton.

use crate::domain::{ConflictStrategy, HistoryRetention};
use crate::infrastructure::{KnowledgeStore, MessageBus};
use tracing::info;

/// Construction-time configuration for a swarm's coordination core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinationConfig {
    /// How knowledge writes reconcile against existing entries.
    pub conflict_strategy: ConflictStrategy,
    /// How much superseded knowledge history each key keeps.
    pub history_retention: HistoryRetention,
}

/// Owns the message bus and knowledge store of a single swarm.
///
/// Both components are independent; the coordinator only ties their
/// lifecycle to the swarm's. Agent runtimes reach them through the
/// accessors and the components' own operations.
#[derive(Debug)]
pub struct SwarmCoordinator {
    message_bus: MessageBus,
    knowledge: KnowledgeStore,
}

impl SwarmCoordinator {
    /// Build both components from `config`.
    pub fn new(config: CoordinationConfig) -> Self {
        info!(
            strategy = ?config.conflict_strategy,
            retention = ?config.history_retention,
            "swarm coordinator initialized"
        );
        Self {
            message_bus: MessageBus::new(),
            knowledge: KnowledgeStore::new(config.conflict_strategy)
                .with_retention(config.history_retention),
        }
    }

    /// The swarm's message bus.
    pub fn message_bus(&self) -> &MessageBus {
        &self.message_bus
    }

    /// The swarm's knowledge store.
    pub fn knowledge(&self) -> &KnowledgeStore {
        &self.knowledge
    }

    /// Drop all mailboxes, subscriptions, knowledge entries, and history.
    /// Leaves configuration in place.
    pub fn reset(&self) {
        self.message_bus.reset();
        self.knowledge.reset();
    }
}

impl Default for SwarmCoordinator {
    fn default() -> Self {
        Self::new(CoordinationConfig::default())
    }
}
