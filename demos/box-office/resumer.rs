use std::{sync::Arc, time::Duration};

use cinema_tickets::{
    JournaledPurchase, PurchaseJournal, SeatReservationService, TicketPaymentService,
    TicketService,
};
use tokio::time::sleep;

pub async fn run_resumer<J, P, R>(
    journal: J,
    service: Arc<TicketService<P, R>>,
    restart_after: Duration,
    sleep_when_empty: Duration,
) where
    J: PurchaseJournal + Clone,
    P: TicketPaymentService,
    R: SeatReservationService,
{
    loop {
        let failed = journal.next_failed(restart_after).await.ok().flatten();
        if let Some(scope) = failed {
            let id = scope.id;
            let result = JournaledPurchase::new(scope, journal.clone())
                .continue_from_last_step(&service)
                .await;
            match result {
                Ok(receipt) => log::info!("resumed purchase {id}: {receipt}"),
                Err(e) => log::warn!("resuming purchase {id} failed: {e}"),
            }
        } else {
            sleep(sleep_when_empty).await;
        }
    }
}
