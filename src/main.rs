//! restack CLI - installer/updater for multi-component cloud applications
//!
//! Usage: restack <COMMAND>
//!
//! Commands:
//!   plan    Show what an update would do for a set of changed paths
//!   update  Plan and apply an update

mod cli;
mod ui;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use restack::{
    classify, CommandDeployer, Config, ConsolePrompt, RestackError, Snapshot, UpdatePlan,
    UpdateWorkflow,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            paths,
            from,
            source,
            config,
            snapshot,
        } => run_plan(paths, from, source, config, snapshot, cli.json, cli.verbose),
        Commands::Update {
            paths,
            from,
            source,
            config,
            snapshot,
            yes,
            dry_run,
        } => run_update(
            paths, from, source, config, snapshot, yes, dry_run, cli.json, cli.verbose,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_plan(
    paths: Vec<String>,
    from: Option<PathBuf>,
    source: PathBuf,
    config_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let (config, changed, snapshot) =
        load_inputs(&source, config_path, snapshot_path, paths, from, json)?;

    if verbose > 0 {
        ui::print_change_summary(&classify(&changed));
    }

    let mut prompt = ConsolePrompt::new();
    let mut workflow = UpdateWorkflow::new(
        &source,
        config.environment.clone(),
        config.layout.clone(),
        &mut prompt,
    );
    let plan = workflow.plan(&changed, &snapshot)?;

    ui::print_plan(&plan, json);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_update(
    paths: Vec<String>,
    from: Option<PathBuf>,
    source: PathBuf,
    config_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    yes: bool,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let (config, changed, snapshot) =
        load_inputs(&source, config_path, snapshot_path.clone(), paths, from, json)?;

    if verbose > 0 {
        ui::print_change_summary(&classify(&changed));
    }

    let mut prompt = ConsolePrompt::new();
    let mut workflow = UpdateWorkflow::new(
        &source,
        config.environment.clone(),
        config.layout.clone(),
        &mut prompt,
    );
    let plan = workflow.plan(&changed, &snapshot)?;

    ui::print_plan(&plan, json);
    if plan.is_empty() || dry_run {
        return Ok(());
    }

    if !ui::confirm_update(&config.environment.name, yes, json) {
        return Err(RestackError::UpdateAborted.into());
    }

    let mut deployer = CommandDeployer::new(config.commands.clone(), &source);
    workflow.execute(&plan, &mut deployer)?;

    record_deployment(&plan, snapshot, &resolve_snapshot_path(&source, &config, snapshot_path))?;

    if !json {
        println!(
            "Applied {} update steps to environment '{}'.",
            plan.len(),
            config.environment.name
        );
    }
    Ok(())
}

/// Load config, the changed-path list, and the deployed snapshot
fn load_inputs(
    source: &Path,
    config_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
    paths: Vec<String>,
    from: Option<PathBuf>,
    json: bool,
) -> Result<(Config, Vec<String>, Snapshot)> {
    let (config, warnings) = match config_path {
        Some(path) => Config::load_with_warnings(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::load_or_default(source),
    };
    if !json {
        ui::print_config_warnings(&warnings);
    }

    let changed = gather_changed_paths(paths, from)?;
    let snapshot = Snapshot::load(&resolve_snapshot_path(source, &config, snapshot_path))?;

    Ok((config, changed, snapshot))
}

/// Changed paths from the command line plus an optional newline-delimited file
fn gather_changed_paths(paths: Vec<String>, from: Option<PathBuf>) -> Result<Vec<String>> {
    let mut changed = paths;
    if let Some(file) = from {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("reading changed paths from {}", file.display()))?;
        changed.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from),
        );
    }
    Ok(changed)
}

fn resolve_snapshot_path(source: &Path, config: &Config, explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| source.join(&config.layout.snapshot_file))
}

/// Persist the parameters each stack was just deployed with
fn record_deployment(plan: &UpdatePlan, mut snapshot: Snapshot, path: &Path) -> Result<()> {
    let mut recorded = false;
    for (template, parameters) in plan.stack_updates() {
        snapshot.record(template, parameters);
        recorded = true;
    }
    if recorded {
        snapshot
            .save(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
    }
    Ok(())
}
