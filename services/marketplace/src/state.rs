use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbInquiryRepository, DbListingRepository, DbPreferencesRepository, DbProfileRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn preferences_repo(&self) -> DbPreferencesRepository {
        DbPreferencesRepository {
            db: self.db.clone(),
        }
    }

    pub fn listing_repo(&self) -> DbListingRepository {
        DbListingRepository {
            db: self.db.clone(),
        }
    }

    pub fn inquiry_repo(&self) -> DbInquiryRepository {
        DbInquiryRepository {
            db: self.db.clone(),
        }
    }
}
