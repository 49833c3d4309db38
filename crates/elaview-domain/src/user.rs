//! User domain types.

use serde::{Deserialize, Serialize};

/// Marketplace account role.
///
/// Wire format: `u8` (0 = Renter, 1 = Landlord, 2 = Admin). The value is also
/// the privilege level — admin outranks landlord outranks renter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Renter = 0,
    Landlord = 1,
    Admin = 2,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Renter),
            1 => Some(Self::Landlord),
            2 => Some(Self::Admin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether this role may own and publish listings.
    pub fn can_list(self) -> bool {
        matches!(self, Self::Landlord | Self::Admin)
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}

/// Validate a profile display name: 1-60 chars, no leading/trailing
/// whitespace, no control characters.
pub fn validate_display_name(name: &str) -> bool {
    if name.is_empty() || name.len() > 60 {
        return false;
    }
    if name != name.trim() {
        return false;
    }
    !name.chars().any(char::is_control)
}
