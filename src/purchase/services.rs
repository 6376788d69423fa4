use std::sync::Arc;

use async_trait::async_trait;

use crate::{AccountId, Amount};

use super::error::ServiceError;

/// Charges an account. Implemented by the payment gateway integration.
#[async_trait]
pub trait TicketPaymentService: Send + Sync {
    async fn make_payment(&self, account_id: AccountId, amount: Amount)
        -> Result<(), ServiceError>;
}

/// Books seats for an account. Implemented by the seat booking integration.
#[async_trait]
pub trait SeatReservationService: Send + Sync {
    async fn reserve_seat(&self, account_id: AccountId, seats: u64) -> Result<(), ServiceError>;
}

#[async_trait]
impl<T: TicketPaymentService + ?Sized> TicketPaymentService for Arc<T> {
    async fn make_payment(
        &self,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<(), ServiceError> {
        (**self).make_payment(account_id, amount).await
    }
}

#[async_trait]
impl<T: SeatReservationService + ?Sized> SeatReservationService for Arc<T> {
    async fn reserve_seat(&self, account_id: AccountId, seats: u64) -> Result<(), ServiceError> {
        (**self).reserve_seat(account_id, seats).await
    }
}
