//! SeaORM entities for the auth service database.

pub mod credentials;
pub mod outbox_events;
pub mod reset_codes;
