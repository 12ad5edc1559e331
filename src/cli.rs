use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// restack - installer/updater for multi-component cloud applications
#[derive(Parser, Debug)]
#[command(name = "restack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show what an update would do for a set of changed paths
    Plan {
        /// Changed paths, repository-relative
        paths: Vec<String>,

        /// Read changed paths from a file, one per line
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        /// Source tree root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Config file (defaults to <source>/restack.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Deployed-parameter snapshot file (overrides config)
        #[arg(long)]
        snapshot: Option<PathBuf>,
    },

    /// Plan and apply an update
    Update {
        /// Changed paths, repository-relative
        paths: Vec<String>,

        /// Read changed paths from a file, one per line
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,

        /// Source tree root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Config file (defaults to <source>/restack.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Deployed-parameter snapshot file (overrides config)
        #[arg(long)]
        snapshot: Option<PathBuf>,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },
}
