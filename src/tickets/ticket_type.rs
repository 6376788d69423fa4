use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketType {
    Adult,
    Child,
    Infant,
}

impl TicketType {
    pub const ALL: [TicketType; 3] = [TicketType::Adult, TicketType::Child, TicketType::Infant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }

    /// Infants sit on an adult's lap and never take a seat.
    pub fn occupies_seat(&self) -> bool {
        !matches!(self, Self::Infant)
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown ticket type {0:?}, type must be ADULT, CHILD, or INFANT")]
pub struct UnknownTicketType(pub String);

impl FromStr for TicketType {
    type Err = UnknownTicketType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TicketType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownTicketType(s.to_string()))
    }
}

/// Immutable request for `quantity` tickets of one type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTypeRequest {
    ticket_type: TicketType,
    quantity: u32,
}

impl TicketTypeRequest {
    pub fn new(ticket_type: TicketType, quantity: u32) -> Self {
        Self {
            ticket_type,
            quantity,
        }
    }

    pub fn adults(quantity: u32) -> Self {
        Self::new(TicketType::Adult, quantity)
    }

    pub fn children(quantity: u32) -> Self {
        Self::new(TicketType::Child, quantity)
    }

    pub fn infants(quantity: u32) -> Self {
        Self::new(TicketType::Infant, quantity)
    }

    pub fn ticket_type(&self) -> TicketType {
        self.ticket_type
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(Ok(TicketType::Adult), "ADULT".parse());
        assert_eq!(Ok(TicketType::Child), "CHILD".parse());
        assert_eq!(Ok(TicketType::Infant), "INFANT".parse());
    }

    #[test]
    fn test_parse_unknown_types() {
        assert_eq!(
            Err(UnknownTicketType("SENIOR".to_string())),
            "SENIOR".parse::<TicketType>()
        );
        assert!("".parse::<TicketType>().is_err());
        assert!("adult".parse::<TicketType>().is_err());
    }

    #[test]
    fn test_serialized_names_match_display() {
        for ticket_type in TicketType::ALL {
            let json = serde_json::to_string(&ticket_type).unwrap();
            assert_eq!(format!("\"{ticket_type}\""), json);
        }
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let request: TicketTypeRequest =
            serde_json::from_str(r#"{"ticket_type":"CHILD","quantity":3}"#).unwrap();
        assert_eq!(TicketTypeRequest::children(3), request);
    }

    #[test]
    fn test_only_infants_go_without_a_seat() {
        assert!(TicketType::Adult.occupies_seat());
        assert!(TicketType::Child.occupies_seat());
        assert!(!TicketType::Infant.occupies_seat());
    }
}
