//! Item fixtures: a created item plus its stored ownership, as a host would
//! present them to a policy. Used by `ownctl` and in tests.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::description::OwnershipDescription;
use crate::item::Item;
use crate::store::InMemoryOwnershipStore;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Fixture file not found: {path}")]
    NotFound { path: String },

    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },

    #[error("JSON parsing failed: {message}")]
    JsonParsingFailed { message: String },

    #[error("YAML parsing failed: {message}")]
    YamlParsingFailed { message: String },

    #[error("Fixture field '{field}' must not be empty")]
    EmptyField { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFixture {
    pub name: String,
    /// Concrete class name, e.g. `WorkflowJob`.
    pub kind: String,
    #[serde(default)]
    pub parent_kind: Option<String>,
    /// Absent when the item kind does not support ownership.
    #[serde(default)]
    pub ownership: Option<OwnershipDescription>,
}

impl ItemFixture {
    /// Load from disk; `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        if !path.exists() {
            return Err(FixtureError::NotFound {
                path: path.display().to_string(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|e| FixtureError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        debug!(path = %path.display(), yaml = is_yaml, "loading item fixture");
        if is_yaml {
            Self::from_yaml(&raw)
        } else {
            Self::from_json(&raw)
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let fixture: Self =
            serde_json::from_str(raw).map_err(|e| FixtureError::JsonParsingFailed {
                message: e.to_string(),
            })?;
        fixture.validate()
    }

    pub fn from_yaml(raw: &str) -> Result<Self, FixtureError> {
        let fixture: Self =
            serde_yaml::from_str(raw).map_err(|e| FixtureError::YamlParsingFailed {
                message: e.to_string(),
            })?;
        fixture.validate()
    }

    fn validate(self) -> Result<Self, FixtureError> {
        if self.name.trim().is_empty() {
            return Err(FixtureError::EmptyField { field: "name" });
        }
        if self.kind.trim().is_empty() {
            return Err(FixtureError::EmptyField { field: "kind" });
        }
        if let Some(ownership) = &self.ownership {
            if ownership.primary_owner_id.trim().is_empty() {
                return Err(FixtureError::EmptyField {
                    field: "ownership.primaryOwnerId",
                });
            }
        }
        Ok(self)
    }

    pub fn item(&self) -> Item {
        Item::classify(self.name.clone(), self.kind.clone(), self.parent_kind.as_deref())
    }

    /// A store holding this fixture's ownership. Without ownership the store
    /// supports no item class at all.
    pub fn store(&self) -> InMemoryOwnershipStore {
        let item = self.item();
        match &self.ownership {
            Some(description) => {
                let mut store = InMemoryOwnershipStore::new().support_class(item.class.clone());
                store.set(&item, description.clone());
                store
            }
            None => InMemoryOwnershipStore::new().restrict_to(Vec::<String>::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::HelperLocator;
    use crate::item::ItemKind;

    #[test]
    fn yaml_fixture_classifies_branch_job() {
        let fixture = ItemFixture::from_yaml(
            r#"
name: org/repo/main
kind: WorkflowJob
parentKind: WorkflowMultiBranchProject
ownership:
  ownershipEnabled: true
  primaryOwnerId: bob
"#,
        )
        .unwrap();
        let item = fixture.item();
        assert_eq!(item.kind, ItemKind::BranchJob);
        assert!(fixture.store().locate(&item).is_some());
    }

    #[test]
    fn fixture_without_ownership_is_not_capable() {
        let fixture =
            ItemFixture::from_json(r#"{ "name": "team/view", "kind": "ListView" }"#).unwrap();
        assert!(fixture.store().locate(&fixture.item()).is_none());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = ItemFixture::from_json(r#"{ "name": " ", "kind": "Folder" }"#).unwrap_err();
        assert!(matches!(err, FixtureError::EmptyField { field: "name" }));
    }

    #[test]
    fn blank_primary_owner_is_rejected() {
        let err = ItemFixture::from_json(
            r#"{
              "name": "app",
              "kind": "FreeStyleProject",
              "ownership": { "primaryOwnerId": "" }
            }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            FixtureError::EmptyField {
                field: "ownership.primaryOwnerId"
            }
        ));

        let err = ItemFixture::from_yaml(
            "name: app\nkind: FreeStyleProject\nownership:\n  primaryOwnerId: '  '\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("ownership.primaryOwnerId"));
    }

    #[test]
    fn load_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("item.yml");
        fs::write(&path, "name: app\nkind: FreeStyleProject\n").unwrap();
        let fixture = ItemFixture::load(&path).unwrap();
        assert_eq!(fixture.item().kind, ItemKind::Standalone);

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ItemFixture::load(&missing),
            Err(FixtureError::NotFound { .. })
        ));
    }
}
