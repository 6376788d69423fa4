use std::time::Duration;

use async_trait::async_trait;

use super::journal::{
    JournalError, LockScope, LockType, PurchaseId, PurchaseJournal, PurchaseRecord, PurchaseStep,
};

/// Journal that keeps nothing. Purchases run through it can never be resumed.
#[derive(Debug, Default, Clone)]
pub struct Blackhole {}

#[async_trait]
impl PurchaseJournal for Blackhole {
    async fn lock(&self, _scope: LockScope, _lock_type: LockType) -> Result<(), JournalError> {
        Ok(())
    }

    async fn check_lock(&self, _scope: &LockScope) -> Result<(), JournalError> {
        Ok(())
    }

    async fn retrieve(&self, _id: PurchaseId) -> Result<PurchaseRecord, JournalError> {
        Err(JournalError::NotFound)
    }

    async fn store(
        &self,
        _id: PurchaseId,
        _step: PurchaseStep,
        _state: String,
    ) -> Result<(), JournalError> {
        Ok(())
    }

    async fn next_failed(
        &self,
        _for_duration: Duration,
    ) -> Result<Option<LockScope>, JournalError> {
        Ok(None)
    }
}
