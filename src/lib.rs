//! Validation and processing of cinema ticket purchases.
//!
//! [`TicketService`] aggregates ticket requests per type, checks them against
//! the [`PurchaseRules`], then charges the account and reserves seats through
//! the injected [`TicketPaymentService`] and [`SeatReservationService`].
//! [`JournaledPurchase`] runs the same flow step by step through a
//! [`PurchaseJournal`] so that an interrupted purchase can be continued.

pub mod journals;
pub mod purchase;
pub mod tickets;

pub type AccountId = i64;
pub type Amount = u64;

pub use journals::journal::{LockScope, PurchaseJournal};
pub use purchase::{
    error::{InvalidPurchaseError, PurchaseError, ServiceError},
    journaled::JournaledPurchase,
    plan::PurchaseReceipt,
    rules::{PurchaseRules, TicketPriceTable},
    services::{SeatReservationService, TicketPaymentService},
    ticket_service::TicketService,
};
pub use tickets::ticket_type::{TicketType, TicketTypeRequest};
