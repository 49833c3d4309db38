use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, sea_query::OnConflict,
};
use uuid::Uuid;

use elaview_core::sea_ext::OrderByRandom;
use elaview_domain::listing::{ListingStatus, SpaceType};
use elaview_domain::pagination::{PageRequest, Sort};
use elaview_marketplace_schema::{inquiries, listings, outbox_events, user_preferences, user_profiles};

use crate::domain::repository::{
    InquiryRepository, ListingRepository, PreferencesRepository, ProfileRepository,
};
use crate::domain::types::{
    Inquiry, InquiryBox, Listing, ListingFilter, ListingSortBy, ListingUpdate, OutboxEvent,
    ProfileUpdate, UserPreferences, UserProfile,
};
use crate::error::MarketplaceError;

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, MarketplaceError> {
        let model = user_profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        Ok(model.map(profile_from_model))
    }

    async fn create(&self, profile: &UserProfile) -> Result<(), MarketplaceError> {
        user_profiles::ActiveModel {
            id: Set(profile.id),
            role: Set(profile.role as i16),
            sub_role: Set(profile.sub_role.clone()),
            display_name: Set(profile.display_name.clone()),
            company_name: Set(profile.company_name.clone()),
            phone: Set(profile.phone.clone()),
            bio: Set(profile.bio.clone()),
            city: Set(profile.city.clone()),
            avatar_url: Set(profile.avatar_url.clone()),
            is_active: Set(profile.is_active),
            last_active_at: Set(profile.last_active_at),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create profile")?;
        Ok(())
    }

    async fn update_fields(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<(), MarketplaceError> {
        let mut am = user_profiles::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref display_name) = update.display_name {
            am.display_name = Set(display_name.clone());
        }
        if let Some(ref sub_role) = update.sub_role {
            am.sub_role = Set(Some(sub_role.clone()));
        }
        if let Some(ref company_name) = update.company_name {
            am.company_name = Set(Some(company_name.clone()));
        }
        if let Some(ref phone) = update.phone {
            am.phone = Set(Some(phone.clone()));
        }
        if let Some(ref bio) = update.bio {
            am.bio = Set(Some(bio.clone()));
        }
        if let Some(ref city) = update.city {
            am.city = Set(Some(city.clone()));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update profile fields")?;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), MarketplaceError> {
        user_profiles::ActiveModel {
            id: Set(id),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set profile active flag")?;
        Ok(())
    }

    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<(), MarketplaceError> {
        user_profiles::ActiveModel {
            id: Set(id),
            avatar_url: Set(Some(avatar_url.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set profile avatar")?;
        Ok(())
    }

    async fn touch_last_active(&self, id: Uuid) -> Result<(), MarketplaceError> {
        user_profiles::ActiveModel {
            id: Set(id),
            last_active_at: Set(Some(Utc::now())),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("touch profile last_active_at")?;
        Ok(())
    }

    async fn search(
        &self,
        query: Option<&str>,
        role: Option<u8>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), MarketplaceError> {
        let page = page.clamped();
        let mut select =
            user_profiles::Entity::find().filter(user_profiles::Column::IsActive.eq(true));
        if let Some(q) = query {
            select = select.filter(
                Condition::any()
                    .add(user_profiles::Column::DisplayName.contains(q))
                    .add(user_profiles::Column::CompanyName.contains(q)),
            );
        }
        if let Some(role) = role {
            select = select.filter(user_profiles::Column::Role.eq(role as i16));
        }

        let total = select
            .clone()
            .count(&self.db)
            .await
            .context("count profile search")?;
        let models = select
            .order_by_asc(user_profiles::Column::DisplayName)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("search profiles")?;
        Ok((models.into_iter().map(profile_from_model).collect(), total))
    }
}

fn profile_from_model(model: user_profiles::Model) -> UserProfile {
    UserProfile {
        id: model.id,
        role: model.role as u8,
        sub_role: model.sub_role,
        display_name: model.display_name,
        company_name: model.company_name,
        phone: model.phone,
        bio: model.bio,
        city: model.city,
        avatar_url: model.avatar_url,
        is_active: model.is_active,
        last_active_at: model.last_active_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Preferences repository ───────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPreferencesRepository {
    pub db: DatabaseConnection,
}

impl PreferencesRepository for DbPreferencesRepository {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, MarketplaceError> {
        let model = user_preferences::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .context("find preferences")?;
        Ok(model.map(|m| UserPreferences {
            user_id: m.user_id,
            email_notifications: m.email_notifications,
            sms_notifications: m.sms_notifications,
            newsletter: m.newsletter,
            updated_at: m.updated_at,
        }))
    }

    async fn upsert(&self, preferences: &UserPreferences) -> Result<(), MarketplaceError> {
        let row = user_preferences::ActiveModel {
            user_id: Set(preferences.user_id),
            email_notifications: Set(preferences.email_notifications),
            sms_notifications: Set(preferences.sms_notifications),
            newsletter: Set(preferences.newsletter),
            updated_at: Set(preferences.updated_at),
        };
        user_preferences::Entity::insert(row)
            .on_conflict(
                OnConflict::column(user_preferences::Column::UserId)
                    .update_columns([
                        user_preferences::Column::EmailNotifications,
                        user_preferences::Column::SmsNotifications,
                        user_preferences::Column::Newsletter,
                        user_preferences::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("upsert preferences")?;
        Ok(())
    }
}

// ── Listing repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbListingRepository {
    pub db: DatabaseConnection,
}

impl ListingRepository for DbListingRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, MarketplaceError> {
        let model = listings::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find listing by id")?;
        model.map(listing_from_model).transpose()
    }

    async fn create(&self, listing: &Listing) -> Result<(), MarketplaceError> {
        listings::ActiveModel {
            id: Set(listing.id),
            owner_id: Set(listing.owner_id),
            title: Set(listing.title.clone()),
            description: Set(listing.description.clone()),
            space_type: Set(listing.space_type.as_str().to_owned()),
            city: Set(listing.city.clone()),
            address: Set(listing.address.clone()),
            width_cm: Set(listing.width_cm),
            height_cm: Set(listing.height_cm),
            price_per_day_cents: Set(listing.price_per_day_cents),
            price_per_week_cents: Set(listing.price_per_week_cents),
            price_per_month_cents: Set(listing.price_per_month_cents),
            daily_traffic: Set(listing.daily_traffic),
            image_urls: Set(serde_json::json!(listing.image_urls)),
            status: Set(listing.status.as_str().to_owned()),
            published_at: Set(listing.published_at),
            created_at: Set(listing.created_at),
            updated_at: Set(listing.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create listing")?;
        Ok(())
    }

    async fn update_fields(
        &self,
        id: Uuid,
        update: &ListingUpdate,
    ) -> Result<(), MarketplaceError> {
        let mut am = listings::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(ref title) = update.title {
            am.title = Set(title.clone());
        }
        if let Some(ref description) = update.description {
            am.description = Set(description.clone());
        }
        if let Some(space_type) = update.space_type {
            am.space_type = Set(space_type.as_str().to_owned());
        }
        if let Some(ref city) = update.city {
            am.city = Set(city.clone());
        }
        if let Some(ref address) = update.address {
            am.address = Set(Some(address.clone()));
        }
        if let Some(width_cm) = update.width_cm {
            am.width_cm = Set(width_cm);
        }
        if let Some(height_cm) = update.height_cm {
            am.height_cm = Set(height_cm);
        }
        if let Some(price) = update.price_per_day_cents {
            am.price_per_day_cents = Set(price);
        }
        if let Some(price) = update.price_per_week_cents {
            am.price_per_week_cents = Set(Some(price));
        }
        if let Some(price) = update.price_per_month_cents {
            am.price_per_month_cents = Set(Some(price));
        }
        if let Some(traffic) = update.daily_traffic {
            am.daily_traffic = Set(Some(traffic));
        }
        if let Some(ref urls) = update.image_urls {
            am.image_urls = Set(serde_json::json!(urls));
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.context("update listing fields")?;
        Ok(())
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: ListingStatus,
        published_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), MarketplaceError> {
        listings::ActiveModel {
            id: Set(id),
            status: Set(status.as_str().to_owned()),
            published_at: Set(published_at),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set listing status")?;
        Ok(())
    }

    async fn browse(
        &self,
        filter: &ListingFilter,
        sort_by: ListingSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
        let page = page.clamped();
        let mut select = listings::Entity::find()
            .filter(listings::Column::Status.eq(ListingStatus::Active.as_str()));
        if let Some(space_type) = filter.space_type {
            select = select.filter(listings::Column::SpaceType.eq(space_type.as_str()));
        }
        if let Some(ref city) = filter.city {
            select = select.filter(listings::Column::City.eq(city.as_str()));
        }
        if let Some(min) = filter.min_price_cents {
            select = select.filter(listings::Column::PricePerDayCents.gte(min));
        }
        if let Some(max) = filter.max_price_cents {
            select = select.filter(listings::Column::PricePerDayCents.lte(max));
        }
        if let Some(width) = filter.min_width_cm {
            select = select.filter(listings::Column::WidthCm.gte(width));
        }
        if let Some(height) = filter.min_height_cm {
            select = select.filter(listings::Column::HeightCm.gte(height));
        }

        let total = select
            .clone()
            .count(&self.db)
            .await
            .context("count listing browse")?;

        select = match sort_by {
            ListingSortBy::CreatedAt(Sort::Desc) => {
                select.order_by_desc(listings::Column::CreatedAt)
            }
            ListingSortBy::CreatedAt(Sort::Asc) => select.order_by_asc(listings::Column::CreatedAt),
            ListingSortBy::PricePerDay(Sort::Desc) => {
                select.order_by_desc(listings::Column::PricePerDayCents)
            }
            ListingSortBy::PricePerDay(Sort::Asc) => {
                select.order_by_asc(listings::Column::PricePerDayCents)
            }
            ListingSortBy::Random => select.order_by_random(),
        };

        let models = select
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("browse listings")?;
        let listings = models
            .into_iter()
            .map(listing_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((listings, total))
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
        let page = page.clamped();
        let select = listings::Entity::find().filter(listings::Column::OwnerId.eq(owner_id));

        let total = select
            .clone()
            .count(&self.db)
            .await
            .context("count owner listings")?;
        let models = select
            .order_by_desc(listings::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list owner listings")?;
        let listings = models
            .into_iter()
            .map(listing_from_model)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((listings, total))
    }

    async fn count_by_owner(&self, owner_id: Uuid) -> Result<(u64, u64), MarketplaceError> {
        let total = listings::Entity::find()
            .filter(listings::Column::OwnerId.eq(owner_id))
            .count(&self.db)
            .await
            .context("count owner listings total")?;
        let active = listings::Entity::find()
            .filter(listings::Column::OwnerId.eq(owner_id))
            .filter(listings::Column::Status.eq(ListingStatus::Active.as_str()))
            .count(&self.db)
            .await
            .context("count owner listings active")?;
        Ok((total, active))
    }
}

/// Stored enum strings and the image JSON come back fallible — a row that
/// fails to parse is data corruption, not a client error.
fn listing_from_model(model: listings::Model) -> Result<Listing, MarketplaceError> {
    let space_type = SpaceType::from_str(&model.space_type)
        .ok_or_else(|| anyhow::anyhow!("unknown space_type in row: {}", model.space_type))?;
    let status = ListingStatus::from_str(&model.status)
        .ok_or_else(|| anyhow::anyhow!("unknown listing status in row: {}", model.status))?;
    let image_urls: Vec<String> =
        serde_json::from_value(model.image_urls).context("decode listing image_urls")?;
    Ok(Listing {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        description: model.description,
        space_type,
        city: model.city,
        address: model.address,
        width_cm: model.width_cm,
        height_cm: model.height_cm,
        price_per_day_cents: model.price_per_day_cents,
        price_per_week_cents: model.price_per_week_cents,
        price_per_month_cents: model.price_per_month_cents,
        daily_traffic: model.daily_traffic,
        image_urls,
        status,
        published_at: model.published_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Inquiry repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbInquiryRepository {
    pub db: DatabaseConnection,
}

impl InquiryRepository for DbInquiryRepository {
    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Inquiry>, MarketplaceError> {
        let model = inquiries::Entity::find()
            .filter(inquiries::Column::IdempotencyKey.eq(key))
            .one(&self.db)
            .await
            .context("find inquiry by idempotency key")?;
        Ok(model.map(inquiry_from_model))
    }

    async fn create_with_outbox(
        &self,
        inquiry: &Inquiry,
        event: &OutboxEvent,
    ) -> Result<(), MarketplaceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let inquiry = inquiry.clone();
                let event = event.clone();
                Box::pin(async move {
                    insert_inquiry(txn, &inquiry).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create inquiry with outbox")?;
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        inquiry_box: InquiryBox,
        page: PageRequest,
    ) -> Result<(Vec<Inquiry>, u64), MarketplaceError> {
        let page = page.clamped();
        let select = match inquiry_box {
            InquiryBox::Sent => {
                inquiries::Entity::find().filter(inquiries::Column::SenderId.eq(user_id))
            }
            InquiryBox::Received => {
                inquiries::Entity::find().filter(inquiries::Column::OwnerId.eq(user_id))
            }
        };

        let total = select
            .clone()
            .count(&self.db)
            .await
            .context("count inquiries")?;
        let models = select
            .order_by_desc(inquiries::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list inquiries")?;
        Ok((models.into_iter().map(inquiry_from_model).collect(), total))
    }

    async fn count_received(&self, owner_id: Uuid) -> Result<u64, MarketplaceError> {
        let count = inquiries::Entity::find()
            .filter(inquiries::Column::OwnerId.eq(owner_id))
            .count(&self.db)
            .await
            .context("count received inquiries")?;
        Ok(count)
    }
}

async fn insert_inquiry(
    txn: &DatabaseTransaction,
    inquiry: &Inquiry,
) -> Result<(), sea_orm::DbErr> {
    inquiries::ActiveModel {
        id: Set(inquiry.id),
        listing_id: Set(inquiry.listing_id),
        sender_id: Set(inquiry.sender_id),
        owner_id: Set(inquiry.owner_id),
        message: Set(inquiry.message.clone()),
        idempotency_key: Set(inquiry.idempotency_key.clone()),
        created_at: Set(inquiry.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn inquiry_from_model(model: inquiries::Model) -> Inquiry {
    Inquiry {
        id: model.id,
        listing_id: model.listing_id,
        sender_id: model.sender_id,
        owner_id: model.owner_id,
        message: model.message,
        idempotency_key: model.idempotency_key,
        created_at: model.created_at,
    }
}
