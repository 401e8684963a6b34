use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::description::OwnershipDescription;
use crate::helper::HelperLocator;
use crate::item::Item;
use crate::user::{UserDirectory, UNKNOWN_USER_ID};

/// Collaborators a policy consults while deciding.
#[derive(Clone, Copy)]
pub struct PolicyContext<'a> {
    pub locator: &'a dyn HelperLocator,
    pub users: &'a dyn UserDirectory,
}

impl<'a> PolicyContext<'a> {
    pub fn new(locator: &'a dyn HelperLocator, users: &'a dyn UserDirectory) -> Self {
        Self { locator, users }
    }
}

/// Decides the ownership of an item at creation time.
pub trait ItemOwnershipPolicy: Send + Sync {
    fn kind(&self) -> PolicyKind;

    /// Human-readable name shown in host configuration screens.
    fn display_name(&self) -> &'static str {
        self.kind().display_name()
    }

    /// `None` leaves the item's ownership untouched. `Some` is the full
    /// description the caller should persist.
    fn on_created(&self, item: &Item, ctx: &PolicyContext<'_>) -> Option<OwnershipDescription>;
}

/// Makes the creating user the primary owner of a new item.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssignCreatorPolicy;

impl AssignCreatorPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl ItemOwnershipPolicy for AssignCreatorPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::AssignCreator
    }

    #[instrument(skip(self, item, ctx), fields(item = %item.full_name))]
    fn on_created(&self, item: &Item, ctx: &PolicyContext<'_>) -> Option<OwnershipDescription> {
        let Some(helper) = ctx.locator.locate(item) else {
            debug!(class = %item.class, "item kind does not support ownership");
            return None;
        };
        let current = helper.ownership_description(item);

        // Branch jobs are created by indexing, not by a person.
        if item.is_branch_job() {
            debug!("branch job under multi-branch project, keeping ownership");
            return Some(current);
        }

        let creator = match ctx.users.current_user() {
            Some(user) if !ctx.users.is_unknown(&user) => user,
            _ => {
                debug!("no known acting user, keeping ownership");
                return Some(current);
            }
        };

        let unknown = ctx.users.unknown_user();
        let next = assign_creator(current, &creator.id, &unknown.id);
        debug!(
            primary = %next.primary_owner_id,
            secondary = next.secondary_owner_ids.len(),
            "assigned creator"
        );
        Some(next)
    }
}

/// Make `creator_id` the primary owner, keeping a previous real owner as a
/// secondary owner.
///
/// A blank primary, [`UNKNOWN_USER_ID`] and `unknown_id` all mean "no owner"
/// and are never demoted. Stored descriptions default to [`UNKNOWN_USER_ID`]
/// even when the host names its sentinel differently.
pub fn assign_creator(
    current: OwnershipDescription,
    creator_id: &str,
    unknown_id: &str,
) -> OwnershipDescription {
    let OwnershipDescription {
        primary_owner_id,
        secondary_owner_ids,
        ..
    } = current;
    let no_owner = primary_owner_id.trim().is_empty()
        || primary_owner_id == UNKNOWN_USER_ID
        || primary_owner_id == unknown_id;
    let demoted = (!no_owner && primary_owner_id != creator_id).then_some(primary_owner_id);

    OwnershipDescription {
        ownership_enabled: true,
        primary_owner_id: creator_id.to_string(),
        secondary_owner_ids: secondary_owner_ids.into_iter().chain(demoted).collect(),
    }
}

/// Never assigns ownership. This is the host default.
#[derive(Debug, Default, Clone, Copy)]
pub struct DropOwnershipPolicy;

impl ItemOwnershipPolicy for DropOwnershipPolicy {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Drop
    }

    fn on_created(&self, item: &Item, _ctx: &PolicyContext<'_>) -> Option<OwnershipDescription> {
        debug!(item = %item.full_name, "drop policy leaves ownership untouched");
        None
    }
}

/// Selector for the policies this crate ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    #[default]
    AssignCreator,
    Drop,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 2] = [PolicyKind::AssignCreator, PolicyKind::Drop];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::AssignCreator => "assign-creator",
            PolicyKind::Drop => "drop",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PolicyKind::AssignCreator => "Assign the item creator as owner",
            PolicyKind::Drop => "Do not assign ownership",
        }
    }

    pub fn build(&self) -> Box<dyn ItemOwnershipPolicy> {
        match self {
            PolicyKind::AssignCreator => Box::new(AssignCreatorPolicy),
            PolicyKind::Drop => Box::new(DropOwnershipPolicy),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown ownership policy '{0}' (expected one of: assign-creator, drop)")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
