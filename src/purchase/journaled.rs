use crate::{
    journals::journal::{
        JournalError, LockScope, LockType, PurchaseJournal, PurchaseRecord, PurchaseStep,
    },
    tickets::ticket_type::TicketTypeRequest,
    AccountId,
};

use super::{
    error::PurchaseError,
    plan::{PurchasePlan, PurchaseReceipt},
    services::{SeatReservationService, TicketPaymentService},
    ticket_service::TicketService,
};

/// Runs a purchase while recording each completed step, so a purchase that
/// failed halfway can be continued later without repeating the steps that
/// already succeeded.
///
/// Payment still happens before reservation. If reservation fails the
/// purchase is marked failed, and [`continue_from_last_step`] retries the
/// reservation only. Before each payment or reservation the executor checks
/// it still holds the lock, so an executor whose lock went stale and was
/// handed to another one stops instead of repeating the step.
///
/// [`continue_from_last_step`]: JournaledPurchase::continue_from_last_step
pub struct JournaledPurchase<J> {
    lock_scope: LockScope,
    journal: J,
}

impl<J: PurchaseJournal> JournaledPurchase<J> {
    pub fn new(lock_scope: LockScope, journal: J) -> Self {
        Self {
            lock_scope,
            journal,
        }
    }

    pub fn lock_scope(&self) -> &LockScope {
        &self.lock_scope
    }

    /// Validates before anything is journaled, rejected purchases leave no
    /// trace. When the purchase already has a journal, the journaled plan is
    /// used and completed steps are skipped.
    pub async fn run<P, R>(
        &self,
        service: &TicketService<P, R>,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseReceipt, PurchaseError>
    where
        P: TicketPaymentService,
        R: SeatReservationService,
    {
        let plan = service.plan(account_id, requests)?;
        self.journal
            .lock(self.lock_scope.clone(), LockType::Executing)
            .await?;

        let record = match self.journal.retrieve(self.lock_scope.id).await {
            Ok(record) => record,
            Err(JournalError::NotFound) => PurchaseRecord::new(self.lock_scope.id),
            Err(e) => return self.finish(Err(e.into())).await,
        };
        let plan = match journaled_plan(&record) {
            Some(Ok(journaled)) => {
                if journaled != plan {
                    log::warn!(
                        "purchase {} already journaled with a different plan, continuing it",
                        self.lock_scope.id
                    );
                }
                journaled
            }
            Some(Err(e)) => return self.finish(Err(e.into())).await,
            None => plan,
        };

        let result = self.execute(service, &plan, &record).await;
        self.finish(result).await
    }

    /// Picks up a journaled purchase where it stopped.
    pub async fn continue_from_last_step<P, R>(
        &self,
        service: &TicketService<P, R>,
    ) -> Result<PurchaseReceipt, PurchaseError>
    where
        P: TicketPaymentService,
        R: SeatReservationService,
    {
        self.journal
            .lock(self.lock_scope.clone(), LockType::Executing)
            .await?;
        let record = match self.journal.retrieve(self.lock_scope.id).await {
            Ok(record) => record,
            Err(e) => return self.finish(Err(e.into())).await,
        };
        log::debug!(
            "continuing purchase {} after {:?}",
            record.id,
            record.last_step()
        );

        let plan = match journaled_plan(&record) {
            Some(Ok(plan)) => plan,
            Some(Err(e)) => return self.finish(Err(e.into())).await,
            None => return self.finish(Err(JournalError::NotFound.into())).await,
        };

        let result = self.execute(service, &plan, &record).await;
        self.finish(result).await
    }

    async fn execute<P, R>(
        &self,
        service: &TicketService<P, R>,
        plan: &PurchasePlan,
        record: &PurchaseRecord,
    ) -> Result<PurchaseReceipt, PurchaseError>
    where
        P: TicketPaymentService,
        R: SeatReservationService,
    {
        if !record.is_done(PurchaseStep::Planned) {
            let state = serde_json::to_string(plan).map_err(JournalError::from)?;
            self.store(PurchaseStep::Planned, state).await?;
        }

        if self.pending(PurchaseStep::Paid, record).await? {
            log::trace!("purchase {} executing payment", self.lock_scope.id);
            service.make_payment(plan).await?;
            let state = serde_json::to_string(&plan.total_price).map_err(JournalError::from)?;
            self.store(PurchaseStep::Paid, state).await?;
        }

        if self.pending(PurchaseStep::Reserved, record).await? {
            log::trace!("purchase {} executing reservation", self.lock_scope.id);
            service.reserve_seats(plan).await?;
            let state = serde_json::to_string(&plan.seats).map_err(JournalError::from)?;
            self.store(PurchaseStep::Reserved, state).await?;
        }

        let receipt = plan.receipt();
        log::info!("purchase {}: {receipt}", self.lock_scope.id);
        Ok(receipt)
    }

    /// Whether `step` still has to run. Confirms this executor still owns the
    /// purchase and rereads the journal, another executor may have completed
    /// the step since `record` was read.
    async fn pending(
        &self,
        step: PurchaseStep,
        record: &PurchaseRecord,
    ) -> Result<bool, PurchaseError> {
        if record.is_done(step) {
            return Ok(false);
        }
        self.journal.check_lock(&self.lock_scope).await?;
        match self.journal.retrieve(self.lock_scope.id).await {
            Ok(latest) => Ok(!latest.is_done(step)),
            Err(JournalError::NotFound) => Ok(true),
            Err(e) => Err(e.into()),
        }
    }

    async fn store(&self, step: PurchaseStep, state: String) -> Result<(), JournalError> {
        self.journal.store(self.lock_scope.id, step, state).await
    }

    async fn finish(
        &self,
        result: Result<PurchaseReceipt, PurchaseError>,
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let lock_type = if result.is_ok() {
            LockType::Finished
        } else {
            LockType::Failed
        };
        // the outcome stands even when another executor owns the lock by now
        if let Err(e) = self.journal.lock(self.lock_scope.clone(), lock_type).await {
            log::warn!(
                "purchase {} could not be marked {lock_type:?}: {e}",
                self.lock_scope.id
            );
        }
        result
    }
}

fn journaled_plan(record: &PurchaseRecord) -> Option<Result<PurchasePlan, JournalError>> {
    record
        .steps
        .get(&PurchaseStep::Planned)
        .map(|state| serde_json::from_str(state).map_err(JournalError::from))
}
