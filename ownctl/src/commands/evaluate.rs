//! Evaluate command - run a policy against an item fixture

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use ownership::config::load_from_env;
use ownership::{ItemFixture, ItemKind, OwnershipDescription, PolicyConfig, PolicyKind};
use serde::Serialize;
use tracing::info;

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the item fixture (JSON, or YAML with a .yaml/.yml extension)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Id of the user creating the item; omit for an anonymous creation
    #[arg(long, env = "OWNERSHIP_ACTING_USER")]
    pub user: Option<String>,

    /// JSON policy config; replaces OWNERSHIP_POLICY/OWNERSHIP_UNKNOWN_USER as the base
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Policy to evaluate (overrides the config)
    #[arg(long)]
    pub policy: Option<PolicyKind>,

    /// Id the host uses for its anonymous user (overrides the config)
    #[arg(long)]
    pub unknown_user: Option<String>,

    /// Output machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Evaluation {
    item: String,
    kind: ItemKind,
    policy: PolicyKind,
    /// `None` means the policy left ownership untouched.
    decision: Option<OwnershipDescription>,
    changed: bool,
}

/// Config file or environment first, then command-line flags.
fn resolve_config(args: &EvaluateArgs) -> Result<PolicyConfig> {
    let mut config = match &args.config {
        Some(path) => PolicyConfig::from_file(path)
            .with_context(|| format!("Failed to load policy config {}", path.display()))?,
        None => load_from_env().context("Invalid ownership configuration in environment")?,
    };
    if let Some(policy) = args.policy {
        config.policy = policy;
    }
    if let Some(id) = &args.unknown_user {
        config = config.with_unknown_user_id(id, "--unknown-user")?;
    }
    Ok(config)
}

pub fn run(args: EvaluateArgs) -> Result<()> {
    let config = resolve_config(&args)?;

    let fixture = ItemFixture::load(&args.file)
        .with_context(|| format!("Failed to load item fixture {}", args.file.display()))?;
    let item = fixture.item();
    let mut store = fixture.store();
    let users = config.user_directory(args.user.as_deref());
    let policy = config.build_policy();

    let before = store.get(&item.full_name).cloned();
    let decision = store.apply_on_created(&item, policy.as_ref(), &users);
    let changed = decision.is_some() && decision != before;
    info!(item = %item.full_name, policy = %config.policy, changed, "evaluated ownership policy");

    let evaluation = Evaluation {
        item: item.full_name,
        kind: item.kind,
        policy: config.policy,
        decision,
        changed,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
    } else {
        print_human(&evaluation);
    }
    Ok(())
}

fn print_human(evaluation: &Evaluation) {
    let kind = match evaluation.kind {
        ItemKind::Standalone => "standalone",
        ItemKind::BranchJob => "branch job",
    };
    println!("Item:   {} ({})", evaluation.item, kind);
    println!("Policy: {}", evaluation.policy);

    let Some(decision) = &evaluation.decision else {
        println!("Result: no change");
        return;
    };
    let state = if decision.ownership_enabled {
        "enabled"
    } else {
        "disabled"
    };
    println!("Result: ownership {}", state);
    println!("  Primary owner:    {}", decision.primary_owner_id);
    if decision.secondary_owner_ids.is_empty() {
        println!("  Secondary owners: none");
    } else {
        let secondary: Vec<&str> = decision
            .secondary_owner_ids
            .iter()
            .map(String::as_str)
            .collect();
        println!("  Secondary owners: {}", secondary.join(", "));
    }
    if !evaluation.changed {
        println!("  (unchanged)");
    }
}
