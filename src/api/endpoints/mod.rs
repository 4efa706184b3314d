//! API endpoint handlers.

pub mod divination;
pub mod health;
