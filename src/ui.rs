//! User-facing output for the restack CLI

use is_terminal::IsTerminal;

use restack::{ChangeSet, ConfigWarning, UpdatePlan};

/// Print the update plan, numbered, or as JSON in CI mode
pub fn print_plan(plan: &UpdatePlan, json: bool) {
    if json {
        match serde_json::to_string_pretty(plan) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => eprintln!("failed to render plan as JSON: {}", e),
        }
        return;
    }

    if plan.is_empty() {
        println!("Nothing to update.");
        return;
    }

    println!("Update plan ({} steps):", plan.len());
    for (i, step) in plan.steps().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
}

/// Print which categories and targets a diff touched (verbose mode)
pub fn print_change_summary(changes: &ChangeSet) {
    if changes.is_empty() {
        eprintln!("No recognized changes.");
        return;
    }

    for (action, targets) in changes.iter() {
        if targets.is_empty() {
            eprintln!("changed: {}", action);
        } else {
            let names: Vec<&str> = targets.iter().map(String::as_str).collect();
            eprintln!("changed: {} [{}]", action, names.join(", "));
        }
    }
}

pub fn print_config_warnings(warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!(
                "⚠ Unknown config key '{}' in {}:{}",
                w.key,
                w.file.display(),
                line
            );
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, w.file.display());
        }
    }
}

/// Ask the operator to confirm before applying a plan.
///
/// Non-interactive runs (CI JSON mode, piped stdout, `--yes`) proceed
/// without asking.
pub fn confirm_update(environment: &str, yes: bool, json: bool) -> bool {
    if yes || json || !std::io::stdout().is_terminal() {
        return true;
    }

    dialoguer::Confirm::new()
        .with_prompt(format!("Apply this update plan to '{}'?", environment))
        .default(false)
        .interact()
        .unwrap_or(false)
}
