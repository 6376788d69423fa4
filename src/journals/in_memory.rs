use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use uuid::Uuid;

use super::journal::{
    ExecutorId, JournalError, LockScope, LockType, PurchaseId, PurchaseJournal, PurchaseRecord,
    PurchaseStep,
};

/// Journal kept in process memory. Clones share the same records.
#[derive(Debug, Clone)]
pub struct InMemoryJournal {
    records: Arc<RwLock<HashMap<PurchaseId, PurchaseRecord>>>,
    locks: Arc<RwLock<HashMap<PurchaseId, ExecutingContext>>>,
    lock_timeout: Duration,
}

impl InMemoryJournal {
    pub fn new(lock_timeout: Duration) -> Self {
        Self {
            records: Arc::new(RwLock::new(Default::default())),
            locks: Arc::new(RwLock::new(Default::default())),
            lock_timeout,
        }
    }

    pub fn lock_type(&self, id: PurchaseId) -> Option<LockType> {
        self.locks
            .read()
            .expect("journal locks lock")
            .get(&id)
            .map(|context| context.lock_type)
    }

    fn try_lock(&self, scope: LockScope, lock_type: LockType) -> Result<(), JournalError> {
        let mut locks = self.locks.write().expect("journal locks lock");
        let allowed = locks.get(&scope.id).map_or(true, |context| {
            scope.executor_id == context.executor_id
                || matches!(context.lock_type, LockType::Failed)
                || context.instant_started.elapsed() > self.lock_timeout
        });

        if allowed {
            locks.insert(
                scope.id,
                ExecutingContext {
                    executor_id: scope.executor_id,
                    lock_type,
                    instant_started: Instant::now(),
                },
            );
            Ok(())
        } else {
            log::debug!("purchase {} is locked by another executor", scope.id);
            Err(JournalError::Locked)
        }
    }
}

#[async_trait]
impl PurchaseJournal for InMemoryJournal {
    async fn lock(&self, scope: LockScope, lock_type: LockType) -> Result<(), JournalError> {
        self.try_lock(scope, lock_type)
    }

    async fn check_lock(&self, scope: &LockScope) -> Result<(), JournalError> {
        match self
            .locks
            .read()
            .expect("journal locks lock")
            .get(&scope.id)
        {
            Some(context) if context.executor_id != scope.executor_id => {
                log::debug!("purchase {} was taken over by another executor", scope.id);
                Err(JournalError::Locked)
            }
            _ => Ok(()),
        }
    }

    async fn retrieve(&self, id: PurchaseId) -> Result<PurchaseRecord, JournalError> {
        self.records
            .read()
            .expect("journal records lock")
            .get(&id)
            .cloned()
            .ok_or(JournalError::NotFound)
    }

    async fn store(
        &self,
        id: PurchaseId,
        step: PurchaseStep,
        state: String,
    ) -> Result<(), JournalError> {
        self.records
            .write()
            .expect("journal records lock")
            .entry(id)
            .or_insert_with(|| PurchaseRecord::new(id))
            .steps
            .insert(step, state);
        Ok(())
    }

    async fn next_failed(
        &self,
        for_duration: Duration,
    ) -> Result<Option<LockScope>, JournalError> {
        let stalled = self
            .locks
            .read()
            .expect("journal locks lock")
            .iter()
            .find(|(_, context)| match context.lock_type {
                LockType::Failed => true,
                LockType::Finished => false,
                LockType::Executing => context.instant_started.elapsed() > for_duration,
            })
            .map(|(id, _)| LockScope {
                id: *id,
                executor_id: Uuid::new_v4(),
            });

        match stalled {
            Some(scope) => {
                self.try_lock(scope.clone(), LockType::Executing)?;
                Ok(Some(scope))
            }
            None => Ok(None),
        }
    }
}

#[derive(Debug)]
struct ExecutingContext {
    executor_id: ExecutorId,
    lock_type: LockType,
    instant_started: Instant,
}
