pub mod error;
pub mod journaled;
pub mod plan;
pub mod rules;
pub mod services;
pub mod ticket_service;
