use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument};

use crate::description::OwnershipDescription;
use crate::helper::{HelperLocator, OwnershipHelper};
use crate::item::Item;
use crate::policy::{ItemOwnershipPolicy, PolicyContext};
use crate::user::UserDirectory;

/// In-memory ownership store keyed by item full name.
///
/// Every item class is ownership-capable until the store is narrowed with
/// [`support_class`](Self::support_class) or [`restrict_to`](Self::restrict_to).
#[derive(Debug, Default)]
pub struct InMemoryOwnershipStore {
    descriptions: HashMap<String, OwnershipDescription>,
    supported_classes: Option<HashSet<String>>,
}

impl InMemoryOwnershipStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn support_class(mut self, class: impl Into<String>) -> Self {
        self.supported_classes
            .get_or_insert_with(HashSet::new)
            .insert(class.into());
        self
    }

    /// Support exactly `classes`; an empty list makes no item ownership-capable.
    pub fn restrict_to<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_classes = Some(classes.into_iter().map(Into::into).collect());
        self
    }

    pub fn supports(&self, item: &Item) -> bool {
        self.supported_classes
            .as_ref()
            .map_or(true, |classes| classes.contains(&item.class))
    }

    /// Current description, if one was ever stored for `full_name`.
    pub fn get(&self, full_name: &str) -> Option<&OwnershipDescription> {
        self.descriptions.get(full_name)
    }

    /// Store `description`; returns the one it replaced.
    pub fn set(
        &mut self,
        item: &Item,
        description: OwnershipDescription,
    ) -> Option<OwnershipDescription> {
        self.descriptions.insert(item.full_name.clone(), description)
    }

    pub fn remove(&mut self, full_name: &str) -> Option<OwnershipDescription> {
        self.descriptions.remove(full_name)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }

    /// Run `policy` for a freshly created item and persist its decision.
    ///
    /// Returns the stored description when the policy decided, `None` when it
    /// left ownership untouched.
    #[instrument(
        skip(self, item, policy, users),
        fields(item = %item.full_name, policy = %policy.kind())
    )]
    pub fn apply_on_created(
        &mut self,
        item: &Item,
        policy: &dyn ItemOwnershipPolicy,
        users: &dyn UserDirectory,
    ) -> Option<OwnershipDescription> {
        let decision = {
            let ctx = PolicyContext::new(&*self, users);
            policy.on_created(item, &ctx)
        };
        match decision {
            Some(description) => {
                info!(primary = %description.primary_owner_id, "ownership recorded");
                self.set(item, description.clone());
                Some(description)
            }
            None => {
                debug!("policy made no decision");
                None
            }
        }
    }
}

impl OwnershipHelper for InMemoryOwnershipStore {
    fn ownership_description(&self, item: &Item) -> OwnershipDescription {
        self.descriptions
            .get(&item.full_name)
            .cloned()
            .unwrap_or_default()
    }
}

impl HelperLocator for InMemoryOwnershipStore {
    fn locate(&self, item: &Item) -> Option<&dyn OwnershipHelper> {
        if self.supports(item) {
            Some(self)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemKind;

    #[test]
    fn missing_item_reads_as_disabled() {
        let store = InMemoryOwnershipStore::new();
        let item = Item::new("folder/app", "FreeStyleProject", ItemKind::Standalone);
        assert_eq!(store.ownership_description(&item), OwnershipDescription::disabled());
    }

    #[test]
    fn unsupported_class_has_no_helper() {
        let store = InMemoryOwnershipStore::new().support_class("Folder");
        let folder = Item::new("team", "Folder", ItemKind::Standalone);
        let view = Item::new("team/view", "ListView", ItemKind::Standalone);
        assert!(store.locate(&folder).is_some());
        assert!(store.locate(&view).is_none());

        let closed = InMemoryOwnershipStore::new().restrict_to(Vec::<String>::new());
        assert!(closed.locate(&folder).is_none());
    }

    #[test]
    fn set_returns_replaced_description() {
        let mut store = InMemoryOwnershipStore::new();
        let item = Item::new("app", "FreeStyleProject", ItemKind::Standalone);
        let bob = OwnershipDescription::new(true, "bob", Vec::<String>::new());
        assert!(store.set(&item, bob).is_none());
        let previous = store.set(&item, OwnershipDescription::new(true, "alice", ["bob"]));
        assert_eq!(previous.map(|d| d.primary_owner_id), Some("bob".to_string()));
        assert_eq!(store.len(), 1);
        assert!(store.remove("app").is_some());
        assert!(store.is_empty());
    }
}
