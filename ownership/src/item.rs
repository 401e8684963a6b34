use serde::{Deserialize, Serialize};

/// Host class name of a pipeline job.
pub const WORKFLOW_JOB_CLASS: &str = "WorkflowJob";
/// Host class name of a multi-branch pipeline container.
pub const WORKFLOW_MULTI_BRANCH_PROJECT_CLASS: &str = "WorkflowMultiBranchProject";

/// What a policy needs to know about an item's place in the host hierarchy.
///
/// The host resolves this once, before any policy runs, so policies match on
/// the variant instead of comparing class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Any item created directly by a user: jobs, folders, standalone pipelines.
    Standalone,
    /// A job generated by branch indexing of a multi-branch container.
    BranchJob,
}

impl ItemKind {
    /// Classify from the host's concrete class names.
    ///
    /// Only an exact `WorkflowJob` under an exact `WorkflowMultiBranchProject`
    /// is a branch job; subclasses and other parents are standalone.
    pub fn from_classes(class: &str, parent_class: Option<&str>) -> Self {
        match (class, parent_class) {
            (WORKFLOW_JOB_CLASS, Some(WORKFLOW_MULTI_BRANCH_PROJECT_CLASS)) => ItemKind::BranchJob,
            _ => ItemKind::Standalone,
        }
    }
}

/// Host-managed entity handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Full name, e.g. `team/app/main`.
    pub full_name: String,
    /// Concrete class name as reported by the host; used for capability lookup.
    pub class: String,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(full_name: impl Into<String>, class: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            full_name: full_name.into(),
            class: class.into(),
            kind,
        }
    }

    /// Build an item, deriving its kind from its own and its parent's class.
    pub fn classify(
        full_name: impl Into<String>,
        class: impl Into<String>,
        parent_class: Option<&str>,
    ) -> Self {
        let class = class.into();
        let kind = ItemKind::from_classes(&class, parent_class);
        Self::new(full_name, class, kind)
    }

    pub fn is_branch_job(&self) -> bool {
        self.kind == ItemKind::BranchJob
    }
}
