use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::user::UNKNOWN_USER_ID;

/// Ownership state of a single item.
///
/// The primary owner is either a real user id or [`UNKNOWN_USER_ID`].
/// Secondary owners are a set, so duplicates cannot occur and order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnershipDescription {
    #[serde(rename = "ownershipEnabled", default)]
    pub ownership_enabled: bool,
    #[serde(rename = "primaryOwnerId", default = "unknown_owner")]
    pub primary_owner_id: String,
    #[serde(rename = "secondaryOwnerIds", default)]
    pub secondary_owner_ids: BTreeSet<String>,
}

fn unknown_owner() -> String {
    UNKNOWN_USER_ID.to_string()
}

impl OwnershipDescription {
    pub fn new<I, S>(
        ownership_enabled: bool,
        primary_owner_id: impl Into<String>,
        secondary: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ownership_enabled,
            primary_owner_id: primary_owner_id.into(),
            secondary_owner_ids: secondary.into_iter().map(Into::into).collect(),
        }
    }

    /// Description of an item that has never had ownership configured.
    pub fn disabled() -> Self {
        Self {
            ownership_enabled: false,
            primary_owner_id: unknown_owner(),
            secondary_owner_ids: BTreeSet::new(),
        }
    }

    pub fn has_primary_owner(&self) -> bool {
        self.primary_owner_id != UNKNOWN_USER_ID
    }

    /// True if `user_id` is the primary or one of the secondary owners.
    pub fn owns(&self, user_id: &str) -> bool {
        self.ownership_enabled
            && (self.primary_owner_id == user_id || self.secondary_owner_ids.contains(user_id))
    }

    /// Primary owner first, then secondaries in sorted order.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.primary_owner_id.as_str())
            .filter(|id| *id != UNKNOWN_USER_ID)
            .chain(self.secondary_owner_ids.iter().map(String::as_str))
    }
}

impl Default for OwnershipDescription {
    fn default() -> Self {
        Self::disabled()
    }
}
