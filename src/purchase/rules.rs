use serde::{Deserialize, Serialize};

use crate::{
    tickets::{
        counts::TicketCounts,
        ticket_type::{TicketType, TicketTypeRequest},
    },
    AccountId, Amount,
};

use super::{
    error::{ConfigError, InvalidPurchaseError},
    plan::PurchasePlan,
};

pub const DEFAULT_MAX_TICKETS: u64 = 20;

/// Price of a single ticket per type, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketPriceTable {
    pub adult: Amount,
    pub child: Amount,
    pub infant: Amount,
}

impl Default for TicketPriceTable {
    fn default() -> Self {
        Self {
            adult: 20,
            child: 10,
            infant: 0,
        }
    }
}

impl TicketPriceTable {
    pub fn price(&self, ticket_type: TicketType) -> Amount {
        match ticket_type {
            TicketType::Adult => self.adult,
            TicketType::Child => self.child,
            TicketType::Infant => self.infant,
        }
    }

    pub fn total(&self, counts: &TicketCounts) -> Amount {
        TicketType::ALL.into_iter().fold(0, |total: Amount, t| {
            total.saturating_add(self.price(t).saturating_mul(counts.get(t)))
        })
    }
}

/// Business rules a purchase is checked against. Set once when the
/// ticket service is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseRules {
    pub max_tickets: u64,
    pub prices: TicketPriceTable,
    /// Reject purchases that end up with zero tickets.
    pub require_tickets: bool,
}

impl Default for PurchaseRules {
    fn default() -> Self {
        Self {
            max_tickets: DEFAULT_MAX_TICKETS,
            prices: TicketPriceTable::default(),
            require_tickets: false,
        }
    }
}

impl PurchaseRules {
    /// Reads rules from JSON. Fields left out keep their default value.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the rules in order and reports the first one broken.
    pub fn validate(
        &self,
        account_id: AccountId,
        counts: &TicketCounts,
    ) -> Result<(), InvalidPurchaseError> {
        if account_id <= 0 {
            return Err(InvalidPurchaseError::InvalidAccount);
        }
        let total = counts.total();
        if self.require_tickets && total == 0 {
            return Err(InvalidPurchaseError::NoTicketsRequested);
        }
        if total > self.max_tickets {
            return Err(InvalidPurchaseError::TooManyTickets {
                max: self.max_tickets,
            });
        }
        if (counts.child > 0 || counts.infant > 0) && counts.adult == 0 {
            return Err(InvalidPurchaseError::NoAdultPresent);
        }
        // one infant per adult lap
        if counts.infant > counts.adult {
            return Err(InvalidPurchaseError::InsufficientAdultsForInfants);
        }
        Ok(())
    }

    /// Aggregates, validates and prices the requests.
    pub fn plan(
        &self,
        account_id: AccountId,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchasePlan, InvalidPurchaseError> {
        let counts = TicketCounts::aggregate(requests);
        self.validate(account_id, &counts)?;
        Ok(PurchasePlan {
            account_id,
            counts,
            total_price: self.prices.total(&counts),
            seats: counts.seats(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(adult: u64, child: u64, infant: u64) -> TicketCounts {
        TicketCounts {
            adult,
            child,
            infant,
        }
    }

    #[test]
    fn test_default_prices() {
        let prices = TicketPriceTable::default();
        assert_eq!(20, prices.price(TicketType::Adult));
        assert_eq!(10, prices.price(TicketType::Child));
        assert_eq!(0, prices.price(TicketType::Infant));
        assert_eq!(70, prices.total(&counts(2, 3, 1)));
    }

    #[test]
    fn test_invalid_account_is_reported_first() {
        let rules = PurchaseRules::default();
        for account_id in [0, -1, i64::MIN] {
            assert_eq!(
                Err(InvalidPurchaseError::InvalidAccount),
                rules.validate(account_id, &counts(0, 5, 30))
            );
        }
    }

    #[test]
    fn test_ticket_cap_applies_to_all_types() {
        let rules = PurchaseRules::default();
        assert_eq!(Ok(()), rules.validate(1, &counts(10, 5, 5)));
        assert_eq!(
            Err(InvalidPurchaseError::TooManyTickets { max: 20 }),
            rules.validate(1, &counts(10, 5, 6))
        );
        assert_eq!(
            Err(InvalidPurchaseError::TooManyTickets { max: 20 }),
            rules.validate(1, &counts(0, 21, 0))
        );
    }

    #[test]
    fn test_children_and_infants_need_an_adult() {
        let rules = PurchaseRules::default();
        assert_eq!(
            Err(InvalidPurchaseError::NoAdultPresent),
            rules.validate(1, &counts(0, 2, 0))
        );
        assert_eq!(
            Err(InvalidPurchaseError::NoAdultPresent),
            rules.validate(1, &counts(0, 0, 1))
        );
    }

    #[test]
    fn test_each_infant_needs_a_lap() {
        let rules = PurchaseRules::default();
        assert_eq!(
            Err(InvalidPurchaseError::InsufficientAdultsForInfants),
            rules.validate(1, &counts(1, 0, 2))
        );
        assert_eq!(Ok(()), rules.validate(2, &counts(2, 0, 2)));
    }

    #[test]
    fn test_zero_tickets_allowed_unless_required() {
        let rules = PurchaseRules::default();
        assert_eq!(Ok(()), rules.validate(1, &counts(0, 0, 0)));

        let rules = PurchaseRules {
            require_tickets: true,
            ..Default::default()
        };
        assert_eq!(
            Err(InvalidPurchaseError::NoTicketsRequested),
            rules.validate(1, &counts(0, 0, 0))
        );
        assert_eq!(
            Err(InvalidPurchaseError::InvalidAccount),
            rules.validate(0, &counts(0, 0, 0))
        );
    }

    #[test]
    fn test_plan_prices_and_seats() {
        let plan = PurchaseRules::default()
            .plan(
                5,
                &[
                    TicketTypeRequest::adults(2),
                    TicketTypeRequest::children(3),
                    TicketTypeRequest::infants(1),
                ],
            )
            .unwrap();
        assert_eq!(5, plan.account_id);
        assert_eq!(70, plan.total_price);
        assert_eq!(5, plan.seats);
        assert_eq!(6, plan.counts.total());
    }

    #[test]
    fn test_rules_from_json() {
        let rules =
            PurchaseRules::from_json(r#"{"max_tickets":25,"prices":{"adult":25,"child":15}}"#)
                .unwrap();
        assert_eq!(25, rules.max_tickets);
        assert_eq!(
            TicketPriceTable {
                adult: 25,
                child: 15,
                infant: 0
            },
            rules.prices
        );
        assert!(!rules.require_tickets);

        assert_eq!(PurchaseRules::default(), PurchaseRules::from_json("{}").unwrap());
        assert!(PurchaseRules::from_json(r#"{"max_tickets":-1}"#).is_err());
    }
}
