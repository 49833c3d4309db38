use chrono::Utc;
use uuid::Uuid;

use elaview_domain::pagination::PageRequest;
use elaview_domain::user::{UserRole, validate_display_name};

use crate::domain::repository::{InquiryRepository, ListingRepository, ProfileRepository};
use crate::domain::types::{ProfileStats, ProfileUpdate, UserProfile};
use crate::error::MarketplaceError;

// ── CompleteProfile ──────────────────────────────────────────────────────────

pub struct CompleteProfileInput {
    pub role: u8,
    pub sub_role: Option<String>,
    pub display_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
}

pub struct CompleteProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> CompleteProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CompleteProfileInput,
    ) -> Result<UserProfile, MarketplaceError> {
        let role = UserRole::from_u8(input.role).ok_or(MarketplaceError::InvalidRole)?;
        // Admin is granted out of band, never self-assigned at signup.
        if role == UserRole::Admin {
            return Err(MarketplaceError::Forbidden);
        }
        if !validate_display_name(&input.display_name) {
            return Err(MarketplaceError::InvalidProfileData);
        }
        if self.repo.find_by_id(user_id).await?.is_some() {
            return Err(MarketplaceError::ProfileAlreadyExists);
        }

        let now = Utc::now();
        let profile = UserProfile {
            id: user_id,
            role: role.as_u8(),
            sub_role: input.sub_role,
            display_name: input.display_name,
            company_name: input.company_name,
            phone: input.phone,
            bio: input.bio,
            city: input.city,
            avatar_url: None,
            is_active: true,
            last_active_at: Some(now),
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&profile).await?;
        Ok(profile)
    }
}

// ── GetProfile (own) ─────────────────────────────────────────────────────────

pub struct GetProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetProfileUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, MarketplaceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)
    }
}

// ── GetPublicProfile ─────────────────────────────────────────────────────────

pub struct GetPublicProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> GetPublicProfileUseCase<R> {
    /// Deactivated profiles are indistinguishable from missing ones.
    pub async fn execute(&self, user_id: Uuid) -> Result<UserProfile, MarketplaceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .filter(|p| p.is_active)
            .ok_or(MarketplaceError::ProfileNotFound)
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<(), MarketplaceError> {
        if update.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        if let Some(ref name) = update.display_name {
            if !validate_display_name(name) {
                return Err(MarketplaceError::InvalidProfileData);
            }
        }
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        self.repo.update_fields(user_id, &update).await
    }
}

// ── Deactivate / Reactivate ──────────────────────────────────────────────────

pub struct SetProfileActiveUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> SetProfileActiveUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, is_active: bool) -> Result<(), MarketplaceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        self.repo.set_active(user_id, is_active).await
    }
}

// ── TouchLastActive ──────────────────────────────────────────────────────────

pub struct TouchLastActiveUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> TouchLastActiveUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), MarketplaceError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        self.repo.touch_last_active(user_id).await
    }
}

// ── SetAvatar ────────────────────────────────────────────────────────────────

pub struct SetAvatarUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> SetAvatarUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, avatar_url: &str) -> Result<(), MarketplaceError> {
        let parsed =
            url::Url::parse(avatar_url).map_err(|_| MarketplaceError::InvalidAvatarUrl)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(MarketplaceError::InvalidAvatarUrl);
        }
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;
        self.repo.set_avatar(user_id, avatar_url).await
    }
}

// ── GetProfileStats ──────────────────────────────────────────────────────────

pub struct GetProfileStatsUseCase<P, L, I>
where
    P: ProfileRepository,
    L: ListingRepository,
    I: InquiryRepository,
{
    pub profiles: P,
    pub listings: L,
    pub inquiries: I,
}

impl<P, L, I> GetProfileStatsUseCase<P, L, I>
where
    P: ProfileRepository,
    L: ListingRepository,
    I: InquiryRepository,
{
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileStats, MarketplaceError> {
        let profile = self
            .profiles
            .find_by_id(user_id)
            .await?
            .ok_or(MarketplaceError::ProfileNotFound)?;

        let (total_listings, active_listings) = self.listings.count_by_owner(user_id).await?;
        let inquiries_received = self.inquiries.count_received(user_id).await?;

        Ok(ProfileStats {
            profile_completion: profile.completion_percent(),
            total_listings,
            active_listings,
            inquiries_received,
        })
    }
}

// ── SearchProfiles ───────────────────────────────────────────────────────────

pub struct SearchProfilesUseCase<R: ProfileRepository> {
    pub repo: R,
}

impl<R: ProfileRepository> SearchProfilesUseCase<R> {
    pub async fn execute(
        &self,
        query: Option<&str>,
        role: Option<u8>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), MarketplaceError> {
        if let Some(role) = role {
            if UserRole::from_u8(role).is_none() {
                return Err(MarketplaceError::InvalidRole);
            }
        }
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        self.repo.search(query, role, page).await
    }
}
