use chrono::{DateTime, Utc};
use uuid::Uuid;

use elaview_domain::listing::{ListingStatus, SpaceType};
use elaview_domain::pagination::Sort;

/// Marketplace profile owned by this service. `id` equals the auth-service
/// credential id.
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub id: Uuid,
    pub role: u8,
    pub sub_role: Option<String>,
    pub display_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    pub last_active_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Percentage of optional profile fields that are filled in (0–100).
    /// Drives the dashboard "complete your profile" meter.
    pub fn completion_percent(&self) -> u8 {
        let fields = [
            self.sub_role.is_some(),
            self.company_name.is_some(),
            self.phone.is_some(),
            self.bio.is_some(),
            self.city.is_some(),
            self.avatar_url.is_some(),
        ];
        let filled = fields.iter().filter(|f| **f).count();
        (filled * 100 / fields.len()) as u8
    }
}

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub sub_role: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.sub_role.is_none()
            && self.company_name.is_none()
            && self.phone.is_none()
            && self.bio.is_none()
            && self.city.is_none()
    }
}

/// Notification preferences; the defaults apply until the user saves a row.
#[derive(Debug, Clone)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub newsletter: bool,
    pub updated_at: DateTime<Utc>,
}

impl UserPreferences {
    pub fn defaults(user_id: Uuid) -> Self {
        Self {
            user_id,
            email_notifications: true,
            sms_notifications: false,
            newsletter: false,
            updated_at: Utc::now(),
        }
    }
}

/// Dashboard statistics for a profile.
#[derive(Debug, Clone)]
pub struct ProfileStats {
    pub profile_completion: u8,
    pub total_listings: u64,
    pub active_listings: u64,
    pub inquiries_received: u64,
}

/// Advertising-space listing.
#[derive(Debug, Clone)]
pub struct Listing {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub space_type: SpaceType,
    pub city: String,
    pub address: Option<String>,
    pub width_cm: i32,
    pub height_cm: i32,
    pub price_per_day_cents: i64,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    pub image_urls: Vec<String>,
    pub status: ListingStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Whether `user_id` (with `role`) may read this listing in any state.
    /// Active listings are public; drafts and archived only reach the owner
    /// or an admin.
    pub fn visible_to(&self, user_id: Uuid, role: u8) -> bool {
        self.status.is_public() || self.owner_id == user_id || role >= 2
    }
}

/// Partial listing update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ListingUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub space_type: Option<SpaceType>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub width_cm: Option<i32>,
    pub height_cm: Option<i32>,
    pub price_per_day_cents: Option<i64>,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    pub image_urls: Option<Vec<String>>,
}

impl ListingUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.space_type.is_none()
            && self.city.is_none()
            && self.address.is_none()
            && self.width_cm.is_none()
            && self.height_cm.is_none()
            && self.price_per_day_cents.is_none()
            && self.price_per_week_cents.is_none()
            && self.price_per_month_cents.is_none()
            && self.daily_traffic.is_none()
            && self.image_urls.is_none()
    }
}

/// Browse filter over active listings. All fields are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct ListingFilter {
    pub space_type: Option<SpaceType>,
    pub city: Option<String>,
    pub min_price_cents: Option<i64>,
    pub max_price_cents: Option<i64>,
    pub min_width_cm: Option<i32>,
    pub min_height_cm: Option<i32>,
}

/// Sort options for listing list queries.
#[derive(Debug, Clone, Copy)]
pub enum ListingSortBy {
    CreatedAt(Sort),
    PricePerDay(Sort),
    Random,
}

impl Default for ListingSortBy {
    fn default() -> Self {
        Self::CreatedAt(Sort::Desc)
    }
}

impl ListingSortBy {
    pub fn from_kebab_case(s: &str) -> Option<Self> {
        match s {
            "created-at-desc" => Some(Self::CreatedAt(Sort::Desc)),
            "created-at-asc" => Some(Self::CreatedAt(Sort::Asc)),
            "price-desc" => Some(Self::PricePerDay(Sort::Desc)),
            "price-asc" => Some(Self::PricePerDay(Sort::Asc)),
            "random" => Some(Self::Random),
            _ => None,
        }
    }
}

/// Renter inquiry against a listing.
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub sender_id: Uuid,
    pub owner_id: Uuid,
    pub message: String,
    pub idempotency_key: String,
    pub created_at: DateTime<Utc>,
}

/// Which side of the inquiry exchange a list query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryBox {
    Sent,
    Received,
}

impl InquiryBox {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "received" => Some(Self::Received),
            _ => None,
        }
    }
}

/// Outbox event for async delivery (e.g. inquiry notification).
#[derive(Debug, Clone)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Upper bounds enforced on free-text listing fields.
pub const MAX_TITLE_LEN: usize = 120;
pub const MAX_DESCRIPTION_LEN: usize = 2000;
pub const MAX_MESSAGE_LEN: usize = 2000;
pub const MAX_IMAGE_URLS: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_profile() -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            role: 0,
            sub_role: None,
            display_name: "Ada".to_owned(),
            company_name: None,
            phone: None,
            bio: None,
            city: None,
            avatar_url: None,
            is_active: true,
            last_active_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn draft_listing(owner_id: Uuid) -> Listing {
        let now = Utc::now();
        Listing {
            id: Uuid::new_v4(),
            owner_id,
            title: "South wall".to_owned(),
            description: "Brick wall facing the highway".to_owned(),
            space_type: SpaceType::Wall,
            city: "Austin".to_owned(),
            address: None,
            width_cm: 500,
            height_cm: 300,
            price_per_day_cents: 4500,
            price_per_week_cents: None,
            price_per_month_cents: None,
            daily_traffic: None,
            image_urls: vec![],
            status: ListingStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn should_compute_zero_completion_for_bare_profile() {
        assert_eq!(bare_profile().completion_percent(), 0);
    }

    #[test]
    fn should_compute_full_completion_when_all_fields_filled() {
        let mut profile = bare_profile();
        profile.sub_role = Some("agency".to_owned());
        profile.company_name = Some("Ada Outdoor".to_owned());
        profile.phone = Some("+15550100".to_owned());
        profile.bio = Some("We rent walls.".to_owned());
        profile.city = Some("Austin".to_owned());
        profile.avatar_url = Some("https://cdn.example.com/a.png".to_owned());
        assert_eq!(profile.completion_percent(), 100);
    }

    #[test]
    fn should_compute_partial_completion() {
        let mut profile = bare_profile();
        profile.phone = Some("+15550100".to_owned());
        profile.city = Some("Austin".to_owned());
        profile.bio = Some("hi".to_owned());
        // 3 of 6 fields
        assert_eq!(profile.completion_percent(), 50);
    }

    #[test]
    fn should_hide_draft_from_strangers_but_not_owner_or_admin() {
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let listing = draft_listing(owner);

        assert!(listing.visible_to(owner, 1));
        assert!(listing.visible_to(stranger, 2)); // admin
        assert!(!listing.visible_to(stranger, 0));
    }

    #[test]
    fn should_show_active_listing_to_everyone() {
        let mut listing = draft_listing(Uuid::new_v4());
        listing.status = ListingStatus::Active;
        assert!(listing.visible_to(Uuid::new_v4(), 0));
    }

    #[test]
    fn should_parse_listing_sort_from_kebab_case() {
        assert!(matches!(
            ListingSortBy::from_kebab_case("created-at-desc"),
            Some(ListingSortBy::CreatedAt(Sort::Desc))
        ));
        assert!(matches!(
            ListingSortBy::from_kebab_case("price-asc"),
            Some(ListingSortBy::PricePerDay(Sort::Asc))
        ));
        assert!(matches!(
            ListingSortBy::from_kebab_case("random"),
            Some(ListingSortBy::Random)
        ));
        assert!(ListingSortBy::from_kebab_case("title-asc").is_none());
    }

    #[test]
    fn should_parse_inquiry_box() {
        assert_eq!(InquiryBox::from_str("sent"), Some(InquiryBox::Sent));
        assert_eq!(InquiryBox::from_str("received"), Some(InquiryBox::Received));
        assert_eq!(InquiryBox::from_str("archived"), None);
    }

    #[test]
    fn should_detect_empty_updates() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(ListingUpdate::default().is_empty());
        assert!(
            !ProfileUpdate {
                phone: Some("+1".to_owned()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
