use std::{collections::BTreeMap, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PurchaseId = Uuid;
pub type ExecutorId = Uuid;

/// Steps of a purchase in the order they complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PurchaseStep {
    Planned,
    Paid,
    Reserved,
}

/// Serialized output of every step a purchase has completed so far.
#[derive(Debug, Clone)]
pub struct PurchaseRecord {
    pub id: PurchaseId,
    pub steps: BTreeMap<PurchaseStep, String>,
}

impl PurchaseRecord {
    pub fn new(id: PurchaseId) -> Self {
        Self {
            id,
            steps: Default::default(),
        }
    }

    pub fn last_step(&self) -> Option<PurchaseStep> {
        self.steps.last_key_value().map(|(k, _)| *k)
    }

    pub fn is_done(&self, step: PurchaseStep) -> bool {
        self.steps.contains_key(&step)
    }
}

#[async_trait]
pub trait PurchaseJournal: Send + Sync {
    async fn lock(&self, scope: LockScope, lock_type: LockType) -> Result<(), JournalError>;
    /// Fails with `Locked` once another executor has taken the purchase over.
    async fn check_lock(&self, scope: &LockScope) -> Result<(), JournalError>;
    async fn retrieve(&self, id: PurchaseId) -> Result<PurchaseRecord, JournalError>;
    async fn store(
        &self,
        id: PurchaseId,
        step: PurchaseStep,
        state: String,
    ) -> Result<(), JournalError>;
    /// Finds a purchase that failed or has been executing longer than
    /// `for_duration` and hands it to a new executor.
    async fn next_failed(&self, for_duration: Duration)
        -> Result<Option<LockScope>, JournalError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockScope {
    pub id: PurchaseId,
    pub executor_id: ExecutorId,
}

impl LockScope {
    pub fn from_id(id: PurchaseId) -> Self {
        Self {
            id,
            executor_id: Uuid::new_v4(),
        }
    }

    pub fn new_purchase() -> Self {
        Self::from_id(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockType {
    Executing,
    Failed,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JournalError {
    #[error("Failed to journal: Locked")]
    Locked,
    #[error("Failed to journal: NotFound")]
    NotFound,
    #[error("Failed to journal: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for JournalError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_step_follows_step_order() {
        let mut record = PurchaseRecord::new(Uuid::new_v4());
        assert_eq!(None, record.last_step());

        record.steps.insert(PurchaseStep::Paid, "{}".to_string());
        record.steps.insert(PurchaseStep::Planned, "{}".to_string());
        assert_eq!(Some(PurchaseStep::Paid), record.last_step());
        assert!(record.is_done(PurchaseStep::Planned));
        assert!(!record.is_done(PurchaseStep::Reserved));
    }

    #[test]
    fn test_scopes_for_same_purchase_get_new_executors() {
        let first = LockScope::new_purchase();
        let second = LockScope::from_id(first.id);
        assert_eq!(first.id, second.id);
        assert_ne!(first.executor_id, second.executor_id);
    }
}
