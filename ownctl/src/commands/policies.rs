use anyhow::Result;
use ownership::PolicyKind;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PolicyEntry {
    name: &'static str,
    display_name: &'static str,
    default: bool,
}

pub fn run(json: bool) -> Result<()> {
    let entries: Vec<PolicyEntry> = PolicyKind::ALL
        .into_iter()
        .map(|kind| PolicyEntry {
            name: kind.as_str(),
            display_name: kind.display_name(),
            default: kind == PolicyKind::default(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in &entries {
        let marker = if entry.default { " (default)" } else { "" };
        println!("{:<16} {}{}", entry.name, entry.display_name, marker);
    }
    Ok(())
}
