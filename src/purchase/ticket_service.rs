use crate::{tickets::ticket_type::TicketTypeRequest, AccountId};

use super::{
    error::{PurchaseError, ServiceError},
    plan::{PurchasePlan, PurchaseReceipt},
    rules::PurchaseRules,
    services::{SeatReservationService, TicketPaymentService},
};

/// Validates ticket purchases and hands valid ones to the payment and seat
/// reservation services.
#[derive(Debug, Clone)]
pub struct TicketService<P, R> {
    payment_service: P,
    reservation_service: R,
    rules: PurchaseRules,
}

impl<P, R> TicketService<P, R>
where
    P: TicketPaymentService,
    R: SeatReservationService,
{
    pub fn new(payment_service: P, reservation_service: R) -> Self {
        Self::with_rules(payment_service, reservation_service, PurchaseRules::default())
    }

    pub fn with_rules(payment_service: P, reservation_service: R, rules: PurchaseRules) -> Self {
        Self {
            payment_service,
            reservation_service,
            rules,
        }
    }

    pub fn rules(&self) -> &PurchaseRules {
        &self.rules
    }

    /// Validates the requests, charges the account and reserves the seats,
    /// in that order.
    ///
    /// Nothing is charged or reserved when validation fails. A failed
    /// reservation does not refund the payment that preceded it, use
    /// [`JournaledPurchase`](super::journaled::JournaledPurchase) to be able
    /// to resume such a purchase.
    pub async fn purchase_tickets(
        &self,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseReceipt, PurchaseError> {
        let plan = self.plan(account_id, requests)?;
        self.make_payment(&plan).await?;
        self.reserve_seats(&plan).await?;
        let receipt = plan.receipt();
        log::info!("account {account_id}: {receipt}");
        Ok(receipt)
    }

    pub(crate) fn plan(
        &self,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchasePlan, PurchaseError> {
        self.rules.plan(account_id, requests).map_err(|e| {
            log::debug!("rejected purchase for account {account_id}: {e}");
            PurchaseError::InvalidPurchase(e)
        })
    }

    pub(crate) async fn make_payment(&self, plan: &PurchasePlan) -> Result<(), PurchaseError> {
        log::debug!(
            "charging account {} amount {}",
            plan.account_id,
            plan.total_price
        );
        self.payment_service
            .make_payment(plan.account_id, plan.total_price)
            .await
            .map_err(|e| service_failed("payment", plan, e))
            .map_err(PurchaseError::Payment)
    }

    pub(crate) async fn reserve_seats(&self, plan: &PurchasePlan) -> Result<(), PurchaseError> {
        log::debug!(
            "reserving {} seats for account {}",
            plan.seats,
            plan.account_id
        );
        self.reservation_service
            .reserve_seat(plan.account_id, plan.seats)
            .await
            .map_err(|e| service_failed("seat reservation", plan, e))
            .map_err(PurchaseError::Reservation)
    }
}

fn service_failed(service: &str, plan: &PurchasePlan, e: ServiceError) -> ServiceError {
    log::warn!("{service} failed for account {}: {e}", plan.account_id);
    e
}
