use crate::journals::journal::JournalError;

/// Business rule a purchase broke. Raised before any collaborator is called.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPurchaseError {
    #[error("Account number must be greater than 0")]
    InvalidAccount,
    #[error("Only {max} tickets can be requested at once")]
    TooManyTickets { max: u64 },
    #[error("At least one adult ticket is required when purchasing a child/infant ticket")]
    NoAdultPresent,
    #[error("Each infant ticket must be accompanied by an adult ticket")]
    InsufficientAdultsForInfants,
    #[error("At least one ticket must be purchased")]
    NoTicketsRequested,
}

/// Failure reported by an external payment or seat reservation service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ServiceError(pub String);

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a purchase did not complete. A `ServiceError` from the payment or
/// seat reservation service is passed through unchanged, only tagged with
/// the service that raised it.
#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    #[error("Invalid purchase: {0}")]
    InvalidPurchase(#[from] InvalidPurchaseError),
    #[error("Payment failed: {0}")]
    Payment(#[source] ServiceError),
    #[error("Seat reservation failed: {0}")]
    Reservation(#[source] ServiceError),
    #[error("Purchase journal failed: {0}")]
    Journal(#[from] JournalError),
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid purchase rules: {0}")]
pub struct ConfigError(#[from] serde_json::Error);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            "Only 20 tickets can be requested at once",
            InvalidPurchaseError::TooManyTickets { max: 20 }.to_string()
        );
        assert_eq!(
            "Invalid purchase: Account number must be greater than 0",
            PurchaseError::from(InvalidPurchaseError::InvalidAccount).to_string()
        );
        assert_eq!(
            "Seat reservation failed: screen full",
            PurchaseError::Reservation(ServiceError::new("screen full")).to_string()
        );
        let inner = ServiceError::new("card declined");
        match PurchaseError::Payment(inner.clone()) {
            PurchaseError::Payment(e) => assert_eq!(inner, e),
            other => panic!("expected payment failure, got {other:?}"),
        }
        assert_eq!(
            "Purchase journal failed: Failed to journal: Locked",
            PurchaseError::from(JournalError::Locked).to_string()
        );
    }
}
