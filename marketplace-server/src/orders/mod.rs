//! Order domain logic
//!
//! Pure pricing and state-machine rules plus the placement workflow that
//! ties them to the database. HTTP handlers in `api::orders` and
//! `api::fulfillment` stay thin and delegate here.

pub mod number;
pub mod placement;
pub mod pricing;
pub mod status;
pub mod transition;
