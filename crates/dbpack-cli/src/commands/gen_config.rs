//! Gen-config command implementation

use anyhow::{Context, Result};
use dbpack_pack::generate_inclusion_lists;

use crate::cli::{GenConfigArgs, GlobalArgs};
use crate::commands::common::{load_project, print_rule};

/// Execute the gen-config command
pub fn execute(_args: &GenConfigArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let targets: Vec<_> = project
        .available_targets()?
        .into_iter()
        .filter(|name| {
            let layout = project.target_layout(name);
            layout.tables_dir().is_dir() || layout.files_dir().is_dir()
        })
        .collect();
    if targets.is_empty() {
        println!(
            "No targets with tables/ or files/ found in {}",
            project.data_dir().display()
        );
        return Ok(());
    }

    println!("Found {} target(s)", targets.len());
    let mut updated = 0;
    for name in &targets {
        println!("\nProcessing: {name}");
        let outcome = generate_inclusion_lists(&project.target_layout(name))
            .with_context(|| format!("Failed to generate inclusion lists for '{name}'"))?;
        if let Some(count) = outcome.tables {
            println!("  ✓ Generated tables.config: {count} table(s)");
        }
        if let Some(count) = outcome.files {
            println!("  ✓ Generated files/tables.config: {count} file table(s)");
        }
        if outcome.is_empty() {
            println!("  ⚠ Nothing to list");
        } else {
            updated += 1;
        }
    }

    println!();
    print_rule();
    println!("Completed: {}/{} target(s) updated", updated, targets.len());
    print_rule();
    Ok(())
}

#[cfg(test)]
#[path = "gen_config_test.rs"]
mod tests;
