pub mod counts;
pub mod ticket_type;
