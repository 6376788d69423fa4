use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{tickets::counts::TicketCounts, AccountId, Amount};

/// A validated and priced purchase, ready to be charged and seated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchasePlan {
    pub account_id: AccountId,
    pub counts: TicketCounts,
    pub total_price: Amount,
    pub seats: u64,
}

impl PurchasePlan {
    pub fn receipt(&self) -> PurchaseReceipt {
        PurchaseReceipt {
            account_id: self.account_id,
            tickets_ordered: self.counts.total(),
            total_cost: self.total_price,
            seats_reserved: self.seats,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub account_id: AccountId,
    pub tickets_ordered: u64,
    pub total_cost: Amount,
    pub seats_reserved: u64,
}

impl fmt::Display for PurchaseReceipt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let seats = if self.seats_reserved > 1 {
            "seats"
        } else {
            "seat"
        };
        write!(
            f,
            "You have successfully reserved {} {seats} for {}.",
            self.seats_reserved, self.total_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(adult: u64, child: u64, infant: u64, total_price: Amount) -> PurchasePlan {
        let counts = TicketCounts {
            adult,
            child,
            infant,
        };
        PurchasePlan {
            account_id: 7,
            counts,
            total_price,
            seats: counts.seats(),
        }
    }

    #[test]
    fn test_receipt_from_plan() {
        let receipt = plan(1, 1, 1, 30).receipt();
        assert_eq!(
            PurchaseReceipt {
                account_id: 7,
                tickets_ordered: 3,
                total_cost: 30,
                seats_reserved: 2,
            },
            receipt
        );
    }

    #[test]
    fn test_receipt_message() {
        assert_eq!(
            "You have successfully reserved 1 seat for 20.",
            plan(1, 0, 1, 20).receipt().to_string()
        );
        assert_eq!(
            "You have successfully reserved 2 seats for 30.",
            plan(1, 1, 0, 30).receipt().to_string()
        );
        assert_eq!(
            "You have successfully reserved 0 seat for 0.",
            plan(0, 0, 0, 0).receipt().to_string()
        );
    }
}
