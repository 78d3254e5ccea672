// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Knowledge Domain Types
//!
//! Value objects for the shared knowledge store:
//!
//! - [`KnowledgeEntry`] — a versioned, attributed value for one key.
//! - [`KnowledgeWrite`] — a write request before versioning/resolution.
//! - [`ConflictStrategy`] — the deterministic rule reconciling a write
//!   against the key's existing entry.
//! - [`HistoryRetention`] — eviction policy for a key's superseded entries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::mem;

/// A single versioned value held by the knowledge store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// The key this entry is stored under.
    pub key: String,
    /// The stored payload; interpretation belongs to the agent runtime.
    pub value: Value,
    /// The agent the entry is attributed to.
    pub agent_id: String,
    /// When the entry was written.
    pub timestamp: DateTime<Utc>,
    /// Writer confidence in `[0.0, 1.0]`.
    pub confidence: f64,
    /// Extensible metadata, default empty.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
    /// Per-key write-attempt counter, starting at 1.
    pub version: u64,
}

/// A write request for [`store`] / [`update`].
///
/// Versioning and the write timestamp are assigned by the store, not the
/// caller; a `KnowledgeWrite` carries only the caller-supplied fields.
/// Validation happens at the store boundary.
///
/// [`store`]: crate::infrastructure::KnowledgeStore::store
/// [`update`]: crate::infrastructure::KnowledgeStore::update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeWrite {
    /// The key to write under.
    pub key: String,
    /// The payload to store.
    pub value: Value,
    /// The writing agent.
    pub agent_id: String,
    /// Writer confidence, default 1.0.
    pub confidence: f64,
    /// Metadata to attach, default empty.
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}

impl KnowledgeWrite {
    /// Create a write request with full confidence and no metadata.
    pub fn new(key: impl Into<String>, value: Value, agent_id: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            agent_id: agent_id.into(),
            confidence: 1.0,
            metadata: HashMap::new(),
        }
    }

    /// Set the writer confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Replace the metadata map.
    pub fn with_metadata(mut self, metadata: HashMap<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    /// Turn the request into a candidate entry with the given version,
    /// stamped with the current time.
    pub(crate) fn into_entry(self, version: u64) -> KnowledgeEntry {
        KnowledgeEntry {
            key: self.key,
            value: self.value,
            agent_id: self.agent_id,
            timestamp: Utc::now(),
            confidence: self.confidence,
            metadata: self.metadata,
            version,
        }
    }
}

/// Deterministic rule deciding what a key's current entry becomes when a
/// write lands on an existing entry.
///
/// Selected once, at store construction; not re-selectable per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictStrategy {
    /// The incoming candidate always replaces the existing entry.
    #[default]
    LastWriteWins,
    /// The candidate replaces the existing entry only when its confidence is
    /// strictly greater; on a tie the existing entry's content is kept.
    HighestConfidence,
    /// The candidate's value and attribution are adopted; metadata becomes
    /// the union of both maps, candidate keys winning collisions.
    Merge,
    /// Currently behaves exactly like [`ConflictStrategy::LastWriteWins`].
    /// No external approval channel exists yet.
    Manual,
}

impl ConflictStrategy {
    /// Reconcile a candidate write against the key's existing entry,
    /// returning the entry to persist as current.
    ///
    /// Pure and deterministic. The returned entry always carries the
    /// candidate's version: the per-key counter tracks write attempts, not
    /// accepted content changes, so even a rejected candidate advances it.
    pub fn resolve(&self, existing: &KnowledgeEntry, candidate: KnowledgeEntry) -> KnowledgeEntry {
        match self {
            ConflictStrategy::LastWriteWins | ConflictStrategy::Manual => candidate,
            ConflictStrategy::HighestConfidence => {
                if candidate.confidence > existing.confidence {
                    candidate
                } else {
                    let mut kept = existing.clone();
                    kept.version = candidate.version;
                    kept
                }
            }
            ConflictStrategy::Merge => {
                let mut merged = candidate;
                let mut metadata = existing.metadata.clone();
                metadata.extend(mem::take(&mut merged.metadata));
                merged.metadata = metadata;
                merged
            }
        }
    }
}

/// Eviction policy for a key's superseded-entry history, applied each time
/// an entry is appended. Never touches the current entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryRetention {
    /// Keep every superseded entry.
    #[default]
    Unbounded,
    /// Keep only the most recent N superseded entries per key.
    LastEntries(usize),
    /// Drop superseded entries older than the given age.
    MaxAge(Duration),
}

impl HistoryRetention {
    /// Prune `history` (ordered oldest first) according to the policy.
    pub fn apply(&self, history: &mut Vec<KnowledgeEntry>) {
        match self {
            HistoryRetention::Unbounded => {}
            HistoryRetention::LastEntries(keep) => {
                if history.len() > *keep {
                    let excess = history.len() - *keep;
                    history.drain(..excess);
                }
            }
            HistoryRetention::MaxAge(age) => {
                let cutoff = Utc::now() - *age;
                history.retain(|entry| entry.timestamp >= cutoff);
            }
        }
    }
}
