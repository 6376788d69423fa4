use serde::{Deserialize, Serialize};

use super::ticket_type::{TicketType, TicketTypeRequest};

/// Quantities summed per ticket type across every request of one purchase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCounts {
    pub adult: u64,
    pub child: u64,
    pub infant: u64,
}

impl TicketCounts {
    pub fn aggregate<'a>(requests: impl IntoIterator<Item = &'a TicketTypeRequest>) -> Self {
        requests
            .into_iter()
            .fold(Self::default(), |mut counts, request| {
                let quantity = u64::from(request.quantity());
                let count = counts.get_mut(request.ticket_type());
                *count = count.saturating_add(quantity);
                counts
            })
    }

    pub fn get(&self, ticket_type: TicketType) -> u64 {
        match ticket_type {
            TicketType::Adult => self.adult,
            TicketType::Child => self.child,
            TicketType::Infant => self.infant,
        }
    }

    fn get_mut(&mut self, ticket_type: TicketType) -> &mut u64 {
        match ticket_type {
            TicketType::Adult => &mut self.adult,
            TicketType::Child => &mut self.child,
            TicketType::Infant => &mut self.infant,
        }
    }

    pub fn total(&self) -> u64 {
        TicketType::ALL
            .into_iter()
            .fold(0u64, |total, t| total.saturating_add(self.get(t)))
    }

    pub fn seats(&self) -> u64 {
        TicketType::ALL
            .into_iter()
            .filter(TicketType::occupies_seat)
            .fold(0u64, |seats, t| seats.saturating_add(self.get(t)))
    }
}
