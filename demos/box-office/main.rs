use std::{sync::Arc, time::Duration};

use cinema_tickets::{
    journals::in_memory::InMemoryJournal, JournaledPurchase, LockScope, PurchaseError,
    TicketService, TicketTypeRequest,
};
use rand::Rng;
use resumer::run_resumer;
use services::{PaymentGateway, SeatBooking};
use tokio::{spawn, time::sleep};

mod resumer;
mod services;

fn random_requests() -> Vec<TicketTypeRequest> {
    let mut rng = rand::thread_rng();
    vec![
        TicketTypeRequest::adults(rng.gen_range(0..4)),
        TicketTypeRequest::children(rng.gen_range(0..5)),
        TicketTypeRequest::infants(rng.gen_range(0..3)),
    ]
}

// pay - external service
// reserve seats - external service, fails now and then
// failed purchases are picked up by the resumer without charging twice
#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let payments = Arc::new(PaymentGateway::default());
    let seats = Arc::new(SeatBooking::new(0.3));
    let service = Arc::new(TicketService::new(payments.clone(), seats.clone()));
    let journal = InMemoryJournal::new(Duration::from_secs(5));

    let resumer = spawn(run_resumer(
        journal.clone(),
        service.clone(),
        Duration::from_secs(5),
        Duration::from_millis(50),
    ));

    let mut purchases = Vec::new();
    for account_id in 0..30 {
        let service = service.clone();
        let purchase = JournaledPurchase::new(LockScope::new_purchase(), journal.clone());
        let requests = random_requests();
        purchases.push(spawn(async move {
            purchase.run(&service, account_id, &requests).await
        }));
    }

    let mut rejected = 0;
    for purchase in purchases {
        match purchase.await {
            Ok(Ok(receipt)) => println!("account {}: {receipt}", receipt.account_id),
            Ok(Err(PurchaseError::InvalidPurchase(e))) => {
                rejected += 1;
                println!("rejected: {e}");
            }
            Ok(Err(e)) => println!("left for the resumer: {e}"),
            Err(e) => println!("purchase task failed: {e}"),
        }
    }

    sleep(Duration::from_secs(1)).await;
    resumer.abort();

    println!(
        "{} payments totalling {}, {} seats reserved, {rejected} purchases rejected",
        payments.payments(),
        payments.charged(),
        seats.reserved()
    );
}
