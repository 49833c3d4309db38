//! Advertising-space listing domain types.

use serde::{Deserialize, Serialize};

/// Kind of physical surface being offered.
///
/// Stored as its `snake_case` string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpaceType {
    Wall,
    Billboard,
    Window,
    Storefront,
    Transit,
    Other,
}

impl SpaceType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Billboard => "billboard",
            Self::Window => "window",
            Self::Storefront => "storefront",
            Self::Transit => "transit",
            Self::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "wall" => Some(Self::Wall),
            "billboard" => Some(Self::Billboard),
            "window" => Some(Self::Window),
            "storefront" => Some(Self::Storefront),
            "transit" => Some(Self::Transit),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Listing lifecycle state.
///
/// Legal transitions: `Draft → Active` (publish) and any state → `Archived`.
/// Archived listings never become visible again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Draft,
    Active,
    Archived,
}

impl ListingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }

    /// Whether a publish transition is legal from this state.
    pub fn can_publish(self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Whether the listing is visible to non-owners.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Active)
    }
}
