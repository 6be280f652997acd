//! Per-user conversation sessions and their registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::ConversationStep;
use crate::domain::{Address, ImageReference, NewReport, ReportValidationError, UserId};

/// Why a session was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPurpose {
    /// Choose an alias, then stop.
    Registration,
    /// Collect and submit a report.
    Report,
}

/// Report fields collected so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub apartment_details: Option<String>,
    pub image: Option<ImageReference>,
    pub address: Option<Address>,
}

impl ReportDraft {
    /// Finish the draft with the duration estimate.
    pub fn complete(&self, owner: UserId, duration_estimate: &str) -> Result<NewReport, ReportValidationError> {
        let image = self
            .image
            .clone()
            .ok_or(ReportValidationError::MissingField { field: "image" })?;
        let address = self
            .address
            .clone()
            .ok_or(ReportValidationError::MissingField { field: "address" })?;
        NewReport::new(
            owner,
            image,
            self.apartment_details.clone(),
            address,
            duration_estimate,
        )
    }
}

/// In-flight conversation for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    pub user: UserId,
    pub purpose: SessionPurpose,
    pub step: ConversationStep,
    pub draft: ReportDraft,
}

impl ConversationSession {
    pub fn new(user: UserId, purpose: SessionPurpose, step: ConversationStep) -> Self {
        Self {
            user,
            purpose,
            step,
            draft: ReportDraft::default(),
        }
    }
}

type SessionSlot = Arc<tokio::sync::Mutex<Option<ConversationSession>>>;

/// Holds at most one session per key.
///
/// Each key owns an async mutex so that inputs for the same user are applied
/// one at a time while different users proceed in parallel.
pub struct SessionRegistry<K> {
    slots: Mutex<HashMap<K, SessionSlot>>,
}

impl<K> Default for SessionRegistry<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K> SessionRegistry<K>
where
    K: Eq + std::hash::Hash + Clone,
{
    /// Slot for `key`, created empty when missing.
    pub fn slot(&self, key: &K) -> SessionSlot {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(key.clone()).or_default())
    }

    /// Slot for `key` when one exists.
    pub fn existing(&self, key: &K) -> Option<SessionSlot> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(key).map(Arc::clone)
    }

    /// Hand back a slot obtained from [`Self::slot`] or [`Self::existing`].
    ///
    /// The entry is dropped once it holds no session and nobody else has a
    /// handle to it. Callers must release their guard first.
    pub fn release(&self, key: &K, slot: SessionSlot) {
        drop(slot);
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let idle = slots.get(key).is_some_and(|entry| {
            Arc::strong_count(entry) == 1
                && entry.try_lock().is_ok_and(|session| session.is_none())
        });
        if idle {
            slots.remove(key);
        }
    }

    /// Snapshot of the session stored for `key`.
    pub async fn current(&self, key: &K) -> Option<ConversationSession> {
        let slot = self.existing(key)?;
        let session = slot.lock().await.clone();
        self.release(key, slot);
        session
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
