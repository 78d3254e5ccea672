// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # In-Process Message Bus
//!
//! Routes [`Message`] values between named agents through per-agent FIFO
//! mailboxes. Two delivery paths:
//!
//! - **Direct**: a message with a recipient is appended to that agent's
//!   mailbox unconditionally, subscriptions ignored.
//! - **Broadcast**: a message without a recipient is delivered to every agent
//!   subscribed to the topic equal to its kind's string form, except the
//!   sender.
//!
//! ## Concurrency
//!
//! The subscription registry and the mailbox table each sit behind a
//! `parking_lot::RwLock`; every mailbox is its own `Mutex`-guarded queue, so
//! appends, drains, and clears on one mailbox are mutually exclusive while
//! different mailboxes proceed in parallel. Broadcast snapshots its eligible
//! recipients under the registry read lock before delivering, so a concurrent
//! (un)subscribe can neither skip nor duplicate a recipient mid-publish. No
//! operation blocks on anything but these short-lived locks.

use crate::domain::{require_agent_id, ContractViolation, Message};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info};

type Mailbox = Arc<Mutex<VecDeque<Message>>>;

/// In-process message router with per-agent mailboxes and topic broadcast.
///
/// One instance per swarm; all agent runtimes in the swarm share it. Agent
/// identifiers are opaque caller-supplied strings, never validated against a
/// roster. Messages sit in mailboxes until the recipient drains them with
/// [`receive`](MessageBus::receive); nothing is pushed to agents.
#[derive(Debug, Default)]
pub struct MessageBus {
    /// Agent id → set of subscribed topic strings.
    subscriptions: RwLock<HashMap<String, HashSet<String>>>,
    /// Agent id → FIFO mailbox, created on first delivery.
    mailboxes: RwLock<HashMap<String, Mailbox>>,
}

impl MessageBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        info!("message bus initialized");
        Self::default()
    }

    /// Add `topic` to `agent_id`'s subscription set. Idempotent.
    pub fn subscribe(&self, agent_id: &str, topic: &str) -> Result<(), ContractViolation> {
        require_agent_id("agent_id", agent_id)?;
        let mut subscriptions = self.subscriptions.write();
        let added = subscriptions
            .entry(agent_id.to_string())
            .or_default()
            .insert(topic.to_string());
        debug!(agent_id, topic, added, "subscribe");
        Ok(())
    }

    /// Remove `topic` from `agent_id`'s subscription set; no-op when the
    /// topic is not held. An emptied subscription set is retained.
    pub fn unsubscribe(&self, agent_id: &str, topic: &str) -> Result<(), ContractViolation> {
        require_agent_id("agent_id", agent_id)?;
        let mut subscriptions = self.subscriptions.write();
        let removed = subscriptions
            .get_mut(agent_id)
            .map(|topics| topics.remove(topic))
            .unwrap_or(false);
        debug!(agent_id, topic, removed, "unsubscribe");
        Ok(())
    }

    /// Deliver a message.
    ///
    /// With a recipient set this is direct delivery: the message lands in the
    /// recipient's mailbox whether or not that agent is subscribed to
    /// anything, creating the mailbox when absent. Without one it is a
    /// broadcast: every subscriber of the kind's topic other than the sender
    /// gets exactly one copy.
    pub fn publish(&self, message: Message) -> Result<(), ContractViolation> {
        require_agent_id("message.sender", &message.sender)?;
        if let Some(recipient) = &message.recipient {
            require_agent_id("message.recipient", recipient)?;
            let recipient = recipient.clone();
            debug!(
                sender = %message.sender,
                recipient = %recipient,
                kind = %message.kind,
                "direct delivery"
            );
            self.mailbox(&recipient).lock().push_back(message);
            return Ok(());
        }

        let topic = message.kind.as_str();
        let recipients: Vec<String> = {
            let subscriptions = self.subscriptions.read();
            subscriptions
                .iter()
                .filter(|(agent_id, topics)| {
                    agent_id.as_str() != message.sender && topics.contains(topic)
                })
                .map(|(agent_id, _)| agent_id.clone())
                .collect()
        };
        debug!(
            sender = %message.sender,
            topic,
            recipients = recipients.len(),
            "broadcast delivery"
        );
        for recipient in &recipients {
            self.mailbox(recipient).lock().push_back(message.clone());
        }
        Ok(())
    }

    /// Remove and return the first `limit` messages (all when `None`) from
    /// `agent_id`'s mailbox, in arrival order. The removal is atomic with
    /// respect to concurrent appends and drains on the same mailbox. An
    /// unknown agent reads as an empty mailbox.
    pub fn receive(
        &self,
        agent_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, ContractViolation> {
        require_agent_id("agent_id", agent_id)?;
        let mailbox = match self.lookup(agent_id) {
            Some(mailbox) => mailbox,
            None => return Ok(Vec::new()),
        };
        let mut queue = mailbox.lock();
        let take = limit.unwrap_or_else(|| queue.len()).min(queue.len());
        let drained: Vec<Message> = queue.drain(..take).collect();
        debug!(agent_id, count = drained.len(), remaining = queue.len(), "receive");
        Ok(drained)
    }

    /// Return a copy of `agent_id`'s mailbox contents without removing
    /// anything. The copy is detached; mutating it cannot reach bus state.
    pub fn peek(&self, agent_id: &str) -> Result<Vec<Message>, ContractViolation> {
        require_agent_id("agent_id", agent_id)?;
        let mailbox = match self.lookup(agent_id) {
            Some(mailbox) => mailbox,
            None => return Ok(Vec::new()),
        };
        let queue = mailbox.lock();
        Ok(queue.iter().cloned().collect())
    }

    /// Drop every message in `agent_id`'s mailbox. Idempotent.
    pub fn clear(&self, agent_id: &str) -> Result<(), ContractViolation> {
        require_agent_id("agent_id", agent_id)?;
        if let Some(mailbox) = self.lookup(agent_id) {
            let mut queue = mailbox.lock();
            let dropped = queue.len();
            queue.clear();
            debug!(agent_id, dropped, "mailbox cleared");
        }
        Ok(())
    }

    /// Number of agents currently subscribed to `topic`.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.subscriptions
            .read()
            .values()
            .filter(|topics| topics.contains(topic))
            .count()
    }

    /// Drop all subscriptions and mailboxes. Used for swarm teardown and
    /// test isolation.
    pub fn reset(&self) {
        self.subscriptions.write().clear();
        self.mailboxes.write().clear();
        info!("message bus reset");
    }

    /// Fetch `agent_id`'s mailbox, creating it when absent.
    fn mailbox(&self, agent_id: &str) -> Mailbox {
        if let Some(mailbox) = self.mailboxes.read().get(agent_id) {
            return Arc::clone(mailbox);
        }
        let mut mailboxes = self.mailboxes.write();
        Arc::clone(mailboxes.entry(agent_id.to_string()).or_default())
    }

    /// Fetch `agent_id`'s mailbox without creating one.
    fn lookup(&self, agent_id: &str) -> Option<Mailbox> {
        self.mailboxes.read().get(agent_id).map(Arc::clone)
    }
}
