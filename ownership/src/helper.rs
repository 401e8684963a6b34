use crate::description::OwnershipDescription;
use crate::item::Item;

/// Reads the current ownership of items of one kind.
pub trait OwnershipHelper {
    /// Never absent: items without ownership yield [`OwnershipDescription::disabled`].
    fn ownership_description(&self, item: &Item) -> OwnershipDescription;
}

/// Capability lookup from an item to the helper that understands its kind.
pub trait HelperLocator {
    /// `None` means the item kind does not support ownership at all.
    fn locate(&self, item: &Item) -> Option<&dyn OwnershipHelper>;
}
