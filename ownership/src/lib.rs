//! Item ownership policies.
//!
//! A policy runs when the host creates an item and decides who owns it. The
//! host supplies the collaborators ([`HelperLocator`], [`UserDirectory`]) and
//! persists whatever the policy returns.

pub mod config;
pub mod description;
pub mod fixture;
pub mod helper;
pub mod item;
pub mod policy;
pub mod store;
pub mod user;

pub use config::{ConfigError, PolicyConfig};
pub use description::OwnershipDescription;
pub use fixture::{FixtureError, ItemFixture};
pub use helper::{HelperLocator, OwnershipHelper};
pub use item::{Item, ItemKind};
pub use policy::{
    AssignCreatorPolicy, DropOwnershipPolicy, ItemOwnershipPolicy, PolicyContext, PolicyKind,
};
pub use store::InMemoryOwnershipStore;
pub use user::{StaticUserDirectory, User, UserDirectory, UNKNOWN_USER_ID};
