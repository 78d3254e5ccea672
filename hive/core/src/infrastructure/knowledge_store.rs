// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Versioned Knowledge Store
//!
//! Shared key→value map for a swarm. Every write is timestamped, attributed
//! to an agent, versioned per key, and reconciled against the key's existing
//! entry by the store's [`ConflictStrategy`]. Superseded entries are kept per
//! key, oldest first, pruned by the store's [`HistoryRetention`] policy.
//!
//! ## Concurrency
//!
//! The key table sits behind a `parking_lot::RwLock`; each key owns a
//! `Mutex`-guarded slot holding its current entry and its history. The
//! read-modify-write of [`store`](KnowledgeStore::store) (read existing,
//! compute version, resolve, write) runs entirely under the slot lock, so
//! writes to one key serialize while writers to different keys proceed
//! independently, and a key's history update is atomic with its current-entry
//! update.

use crate::domain::{
    require_agent_id, require_confidence, require_key, ConflictStrategy, ContractViolation,
    HistoryRetention, KnowledgeEntry, KnowledgeWrite,
};
use parking_lot::{Mutex, RwLock};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Current entry and superseded history for one key.
#[derive(Debug, Default)]
struct KeySlot {
    current: Option<KnowledgeEntry>,
    superseded: Vec<KnowledgeEntry>,
}

/// Shared, versioned knowledge map with pluggable conflict resolution.
///
/// One instance per swarm. Strategy and retention are fixed at construction;
/// neither is re-selectable per call.
#[derive(Debug)]
pub struct KnowledgeStore {
    strategy: ConflictStrategy,
    retention: HistoryRetention,
    slots: RwLock<HashMap<String, Arc<Mutex<KeySlot>>>>,
}

impl KnowledgeStore {
    /// Create a store resolving conflicts with `strategy`, keeping unbounded
    /// history.
    pub fn new(strategy: ConflictStrategy) -> Self {
        info!(?strategy, "knowledge store initialized");
        Self {
            strategy,
            retention: HistoryRetention::Unbounded,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the history retention policy.
    pub fn with_retention(mut self, retention: HistoryRetention) -> Self {
        self.retention = retention;
        self
    }

    /// The conflict-resolution strategy this store was built with.
    pub fn strategy(&self) -> ConflictStrategy {
        self.strategy
    }

    /// The history retention policy this store was built with.
    pub fn retention(&self) -> HistoryRetention {
        self.retention
    }

    /// Write a value under `write.key`.
    ///
    /// The candidate is versioned `existing.version + 1` (or 1 for a fresh
    /// key), the pre-write entry is appended to the key's history, and the
    /// store's strategy decides what becomes current. The version advances on
    /// every call that passes validation, whatever the strategy keeps.
    pub fn store(&self, write: KnowledgeWrite) -> Result<(), ContractViolation> {
        self.check(&write)?;
        let slot = self.slot(&write.key);
        let mut slot = slot.lock();
        self.store_locked(&mut slot, write);
        Ok(())
    }

    /// Write to `write.key` only if it already holds a current entry.
    ///
    /// Returns `Ok(false)` without any side effect (no version, no history)
    /// when the key is absent; otherwise runs the [`store`](Self::store) path
    /// and returns `Ok(true)`. Absence is an expected outcome, not an error.
    pub fn update(&self, write: KnowledgeWrite) -> Result<bool, ContractViolation> {
        self.check(&write)?;
        let slot = match self.slots.read().get(&write.key) {
            Some(slot) => Arc::clone(slot),
            None => {
                debug!(key = %write.key, "update skipped, key absent");
                return Ok(false);
            }
        };
        let mut slot = slot.lock();
        if slot.current.is_none() {
            debug!(key = %write.key, "update skipped, key absent");
            return Ok(false);
        }
        self.store_locked(&mut slot, write);
        Ok(true)
    }

    /// The current value for `key`, or `None` when never stored or deleted.
    ///
    /// An explicitly stored empty object, array, or `null` is still a hit.
    pub fn retrieve(&self, key: &str) -> Result<Option<Value>, ContractViolation> {
        require_key("key", key)?;
        let slot = match self.slots.read().get(key) {
            Some(slot) => Arc::clone(slot),
            None => return Ok(None),
        };
        let slot = slot.lock();
        Ok(slot.current.as_ref().map(|entry| entry.value.clone()))
    }

    /// The full current entry for `key`, or `None` when never stored or
    /// deleted.
    pub fn get_entry(&self, key: &str) -> Result<Option<KnowledgeEntry>, ContractViolation> {
        require_key("key", key)?;
        let slot = match self.slots.read().get(key) {
            Some(slot) => Arc::clone(slot),
            None => return Ok(None),
        };
        let slot = slot.lock();
        Ok(slot.current.clone())
    }

    /// Remove the current entry for `key`, reporting whether one existed.
    ///
    /// History is untouched and stays queryable; a later `store` on the key
    /// starts a fresh version sequence at 1.
    pub fn delete(&self, key: &str) -> Result<bool, ContractViolation> {
        require_key("key", key)?;
        let slot = match self.slots.read().get(key) {
            Some(slot) => Arc::clone(slot),
            None => return Ok(false),
        };
        let mut slot = slot.lock();
        let removed = slot.current.take().is_some();
        debug!(key, removed, "knowledge deleted");
        Ok(removed)
    }

    /// All keys currently holding an active entry. Deleted keys are
    /// excluded. Order is unspecified.
    pub fn keys(&self) -> Vec<String> {
        let slots: Vec<(String, Arc<Mutex<KeySlot>>)> = {
            let slots = self.slots.read();
            slots
                .iter()
                .map(|(key, slot)| (key.clone(), Arc::clone(slot)))
                .collect()
        };
        slots
            .into_iter()
            .filter(|(_, slot)| slot.lock().current.is_some())
            .map(|(key, _)| key)
            .collect()
    }

    /// The superseded entries for `key`, oldest first, after retention.
    /// Empty when the key has never been overwritten. Works for deleted keys.
    pub fn get_history(&self, key: &str) -> Result<Vec<KnowledgeEntry>, ContractViolation> {
        require_key("key", key)?;
        let slot = match self.slots.read().get(key) {
            Some(slot) => Arc::clone(slot),
            None => return Ok(Vec::new()),
        };
        let slot = slot.lock();
        Ok(slot.superseded.clone())
    }

    /// Drop every entry and all history. Used for swarm teardown and test
    /// isolation.
    pub fn reset(&self) {
        self.slots.write().clear();
        info!("knowledge store reset");
    }

    /// The versioned read-modify-write shared by `store` and `update`. Runs
    /// under the key's slot lock.
    fn store_locked(&self, slot: &mut KeySlot, write: KnowledgeWrite) {
        let version = slot.current.as_ref().map_or(1, |entry| entry.version + 1);
        let candidate = write.into_entry(version);
        let resolved = match slot.current.take() {
            None => candidate,
            Some(existing) => {
                slot.superseded.push(existing.clone());
                self.retention.apply(&mut slot.superseded);
                self.strategy.resolve(&existing, candidate)
            }
        };
        debug!(
            key = %resolved.key,
            version = resolved.version,
            agent_id = %resolved.agent_id,
            "knowledge stored"
        );
        slot.current = Some(resolved);
    }

    fn check(&self, write: &KnowledgeWrite) -> Result<(), ContractViolation> {
        require_key("key", &write.key)?;
        require_agent_id("agent_id", &write.agent_id)?;
        require_confidence("confidence", write.confidence)
    }

    /// Fetch the slot for `key`, creating it when absent.
    fn slot(&self, key: &str) -> Arc<Mutex<KeySlot>> {
        if let Some(slot) = self.slots.read().get(key) {
            return Arc::clone(slot);
        }
        let mut slots = self.slots.write();
        Arc::clone(slots.entry(key.to_string()).or_default())
    }
}

impl Default for KnowledgeStore {
    fn default() -> Self {
        Self::new(ConflictStrategy::default())
    }
}
