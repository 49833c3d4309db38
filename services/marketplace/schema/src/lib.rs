//! SeaORM entities for the marketplace service database.

pub mod inquiries;
pub mod listings;
pub mod outbox_events;
pub mod user_preferences;
pub mod user_profiles;
