use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use elaview_domain::pagination::PageRequest;

use crate::domain::repository::{InquiryRepository, ListingRepository};
use crate::domain::types::{Inquiry, InquiryBox, MAX_MESSAGE_LEN, OutboxEvent};
use crate::error::MarketplaceError;

// ── SubmitInquiry ────────────────────────────────────────────────────────────

pub struct SubmitInquiryInput {
    pub listing_id: Uuid,
    pub message: String,
    pub idempotency_key: String,
}

/// Outcome of a submission: the inquiry plus whether this call created it.
#[derive(Debug)]
pub struct SubmitInquiryOutput {
    pub inquiry: Inquiry,
    pub created: bool,
}

pub struct SubmitInquiryUseCase<L, I>
where
    L: ListingRepository,
    I: InquiryRepository,
{
    pub listings: L,
    pub inquiries: I,
}

impl<L, I> SubmitInquiryUseCase<L, I>
where
    L: ListingRepository,
    I: InquiryRepository,
{
    pub async fn execute(
        &self,
        sender_id: Uuid,
        input: SubmitInquiryInput,
    ) -> Result<SubmitInquiryOutput, MarketplaceError> {
        let message = input.message.trim();
        if message.is_empty()
            || message.len() > MAX_MESSAGE_LEN
            || input.idempotency_key.trim().is_empty()
        {
            return Err(MarketplaceError::InvalidInquiryData);
        }

        // Retry-safe: the same key from the same sender returns the original
        // inquiry. A key held by another sender is a hard conflict — replaying
        // it must not leak someone else's inquiry.
        if let Some(existing) = self
            .inquiries
            .find_by_idempotency_key(&input.idempotency_key)
            .await?
        {
            if existing.sender_id != sender_id {
                return Err(MarketplaceError::IdempotencyKeyReuse);
            }
            return Ok(SubmitInquiryOutput {
                inquiry: existing,
                created: false,
            });
        }

        let listing = self
            .listings
            .find_by_id(input.listing_id)
            .await?
            .ok_or(MarketplaceError::ListingNotFound)?;
        if listing.owner_id == sender_id {
            return Err(MarketplaceError::OwnListingInquiry);
        }
        // Drafts and archived listings take no inquiries and stay invisible.
        if !listing.status.is_public() {
            return Err(MarketplaceError::ListingNotFound);
        }

        let inquiry = Inquiry {
            id: Uuid::now_v7(),
            listing_id: listing.id,
            sender_id,
            owner_id: listing.owner_id,
            message: message.to_owned(),
            idempotency_key: input.idempotency_key,
            created_at: Utc::now(),
        };

        // Inquiry + notification fan-out commit atomically via the outbox.
        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: "inquiry_submitted".to_owned(),
            payload: json!({
                "inquiry_id": inquiry.id,
                "listing_id": listing.id,
                "owner_id": listing.owner_id,
                "sender_id": sender_id,
            }),
            idempotency_key: format!("inquiry_submitted:{}", inquiry.id),
        };

        self.inquiries.create_with_outbox(&inquiry, &event).await?;
        Ok(SubmitInquiryOutput {
            inquiry,
            created: true,
        })
    }
}

// ── ListInquiries ────────────────────────────────────────────────────────────

pub struct ListInquiriesUseCase<I: InquiryRepository> {
    pub repo: I,
}

impl<I: InquiryRepository> ListInquiriesUseCase<I> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        inquiry_box: InquiryBox,
        page: PageRequest,
    ) -> Result<(Vec<Inquiry>, u64), MarketplaceError> {
        self.repo.list_for_user(user_id, inquiry_box, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use elaview_domain::listing::{ListingStatus, SpaceType};

    use crate::domain::types::{Listing, ListingFilter, ListingSortBy, ListingUpdate};

    struct MockListingRepo {
        listings: Vec<Listing>,
    }

    impl ListingRepository for MockListingRepo {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, MarketplaceError> {
            Ok(self.listings.iter().find(|l| l.id == id).cloned())
        }

        async fn create(&self, _listing: &Listing) -> Result<(), MarketplaceError> {
            Ok(())
        }

        async fn update_fields(
            &self,
            _id: Uuid,
            _update: &ListingUpdate,
        ) -> Result<(), MarketplaceError> {
            Ok(())
        }

        async fn set_status(
            &self,
            _id: Uuid,
            _status: ListingStatus,
            _published_at: Option<chrono::DateTime<chrono::Utc>>,
        ) -> Result<(), MarketplaceError> {
            Ok(())
        }

        async fn browse(
            &self,
            _filter: &ListingFilter,
            _sort_by: ListingSortBy,
            _page: PageRequest,
        ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
            Ok((vec![], 0))
        }

        async fn list_by_owner(
            &self,
            _owner_id: Uuid,
            _page: PageRequest,
        ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
            Ok((vec![], 0))
        }

        async fn count_by_owner(&self, _owner_id: Uuid) -> Result<(u64, u64), MarketplaceError> {
            Ok((0, 0))
        }
    }

    struct MockInquiryRepo {
        inquiries: Arc<Mutex<Vec<Inquiry>>>,
        events: Arc<Mutex<Vec<OutboxEvent>>>,
    }

    impl MockInquiryRepo {
        fn empty() -> Self {
            Self {
                inquiries: Arc::new(Mutex::new(vec![])),
                events: Arc::new(Mutex::new(vec![])),
            }
        }
    }

    impl InquiryRepository for MockInquiryRepo {
        async fn find_by_idempotency_key(
            &self,
            key: &str,
        ) -> Result<Option<Inquiry>, MarketplaceError> {
            Ok(self
                .inquiries
                .lock()
                .unwrap()
                .iter()
                .find(|i| i.idempotency_key == key)
                .cloned())
        }

        async fn create_with_outbox(
            &self,
            inquiry: &Inquiry,
            event: &OutboxEvent,
        ) -> Result<(), MarketplaceError> {
            self.inquiries.lock().unwrap().push(inquiry.clone());
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn list_for_user(
            &self,
            user_id: Uuid,
            inquiry_box: InquiryBox,
            _page: PageRequest,
        ) -> Result<(Vec<Inquiry>, u64), MarketplaceError> {
            let matches: Vec<Inquiry> = self
                .inquiries
                .lock()
                .unwrap()
                .iter()
                .filter(|i| match inquiry_box {
                    InquiryBox::Sent => i.sender_id == user_id,
                    InquiryBox::Received => i.owner_id == user_id,
                })
                .cloned()
                .collect();
            let total = matches.len() as u64;
            Ok((matches, total))
        }

        async fn count_received(&self, owner_id: Uuid) -> Result<u64, MarketplaceError> {
            Ok(self
                .inquiries
                .lock()
                .unwrap()
                .iter()
                .filter(|i| i.owner_id == owner_id)
                .count() as u64)
        }
    }

    fn active_listing(owner_id: Uuid) -> Listing {
        let now = Utc::now();
        Listing {
            id: Uuid::now_v7(),
            owner_id,
            title: "South wall".to_owned(),
            description: "Brick wall".to_owned(),
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
            status: ListingStatus::Active,
            published_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn submit_input(listing_id: Uuid, key: &str) -> SubmitInquiryInput {
        SubmitInquiryInput {
            listing_id,
            message: "Is the wall available in June?".to_owned(),
            idempotency_key: key.to_owned(),
        }
    }

    #[tokio::test]
    async fn should_create_inquiry_with_notification_event() {
        let owner = Uuid::now_v7();
        let sender = Uuid::now_v7();
        let listing = active_listing(owner);

        let inquiries = MockInquiryRepo::empty();
        let events = Arc::clone(&inquiries.events);

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries,
        };

        let output = usecase
            .execute(sender, submit_input(listing.id, "key-1"))
            .await
            .unwrap();

        assert!(output.created);
        assert_eq!(output.inquiry.owner_id, owner);
        assert_eq!(output.inquiry.sender_id, sender);

        let events = events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "inquiry_submitted");
        assert_eq!(events[0].payload["owner_id"], owner.to_string());
    }

    #[tokio::test]
    async fn should_return_original_inquiry_on_replay() {
        let owner = Uuid::now_v7();
        let sender = Uuid::now_v7();
        let listing = active_listing(owner);

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries: MockInquiryRepo::empty(),
        };

        let first = usecase
            .execute(sender, submit_input(listing.id, "key-1"))
            .await
            .unwrap();
        let second = usecase
            .execute(sender, submit_input(listing.id, "key-1"))
            .await
            .unwrap();

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.inquiry.id, second.inquiry.id);
    }

    #[tokio::test]
    async fn should_reject_replay_of_another_senders_key() {
        let owner = Uuid::now_v7();
        let listing = active_listing(owner);

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries: MockInquiryRepo::empty(),
        };

        usecase
            .execute(Uuid::now_v7(), submit_input(listing.id, "key-1"))
            .await
            .unwrap();
        let result = usecase
            .execute(Uuid::now_v7(), submit_input(listing.id, "key-1"))
            .await;

        assert!(matches!(result, Err(MarketplaceError::IdempotencyKeyReuse)));
    }

    #[tokio::test]
    async fn should_reject_inquiry_on_own_listing() {
        let owner = Uuid::now_v7();
        let listing = active_listing(owner);

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries: MockInquiryRepo::empty(),
        };

        let result = usecase.execute(owner, submit_input(listing.id, "key-1")).await;
        assert!(matches!(result, Err(MarketplaceError::OwnListingInquiry)));
    }

    #[tokio::test]
    async fn should_reject_inquiry_on_draft_listing() {
        let owner = Uuid::now_v7();
        let mut listing = active_listing(owner);
        listing.status = ListingStatus::Draft;

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries: MockInquiryRepo::empty(),
        };

        let result = usecase
            .execute(Uuid::now_v7(), submit_input(listing.id, "key-1"))
            .await;
        assert!(matches!(result, Err(MarketplaceError::ListingNotFound)));
    }

    #[tokio::test]
    async fn should_reject_blank_message() {
        let owner = Uuid::now_v7();
        let listing = active_listing(owner);

        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries: MockInquiryRepo::empty(),
        };

        let mut input = submit_input(listing.id, "key-1");
        input.message = "   ".to_owned();
        let result = usecase.execute(Uuid::now_v7(), input).await;
        assert!(matches!(result, Err(MarketplaceError::InvalidInquiryData)));
    }

    #[tokio::test]
    async fn should_split_sent_and_received_boxes() {
        let owner = Uuid::now_v7();
        let sender = Uuid::now_v7();
        let listing = active_listing(owner);

        let inquiries = MockInquiryRepo::empty();
        let store = Arc::clone(&inquiries.inquiries);
        let usecase = SubmitInquiryUseCase {
            listings: MockListingRepo {
                listings: vec![listing.clone()],
            },
            inquiries,
        };
        usecase
            .execute(sender, submit_input(listing.id, "key-1"))
            .await
            .unwrap();

        let list = ListInquiriesUseCase {
            repo: MockInquiryRepo {
                inquiries: Arc::clone(&store),
                events: Arc::new(Mutex::new(vec![])),
            },
        };

        let (sent, sent_total) = list
            .execute(sender, InquiryBox::Sent, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(sent_total, 1);
        assert_eq!(sent[0].sender_id, sender);

        let (received, received_total) = list
            .execute(owner, InquiryBox::Received, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(received_total, 1);
        assert_eq!(received[0].owner_id, owner);

        let (none, none_total) = list
            .execute(sender, InquiryBox::Received, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(none_total, 0);
        assert!(none.is_empty());
    }
}
