use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use cinema_tickets::{
    AccountId, Amount, SeatReservationService, ServiceError, TicketPaymentService,
};

#[derive(Debug, Default)]
pub struct PaymentGateway {
    charged: AtomicU64,
    payments: AtomicU64,
}

impl PaymentGateway {
    pub fn charged(&self) -> Amount {
        self.charged.load(Ordering::SeqCst)
    }

    pub fn payments(&self) -> u64 {
        self.payments.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TicketPaymentService for PaymentGateway {
    async fn make_payment(
        &self,
        account_id: AccountId,
        amount: Amount,
    ) -> Result<(), ServiceError> {
        log::debug!("gateway charging account {account_id} amount {amount}");
        self.charged.fetch_add(amount, Ordering::SeqCst);
        self.payments.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Seat booking that drops a share of its requests.
#[derive(Debug)]
pub struct SeatBooking {
    failure_rate: f64,
    reserved: AtomicU64,
}

impl SeatBooking {
    pub fn new(failure_rate: f64) -> Self {
        Self {
            failure_rate,
            reserved: AtomicU64::new(0),
        }
    }

    pub fn reserved(&self) -> u64 {
        self.reserved.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeatReservationService for SeatBooking {
    async fn reserve_seat(&self, account_id: AccountId, seats: u64) -> Result<(), ServiceError> {
        if rand::random::<f64>() < self.failure_rate {
            return Err(ServiceError::new(format!(
                "seat booking unavailable for account {account_id}"
            )));
        }
        self.reserved.fetch_add(seats, Ordering::SeqCst);
        Ok(())
    }
}
