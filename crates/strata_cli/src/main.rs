//! Strata CLI — the command-line interface for the Strata asset store.
//!
//! Provides `strata build` for resolving every registered asset, `strata
//! path` for looking up a single asset's store path, `strata combine` for
//! building combined artifacts, and `strata list`, `strata gc`, and
//! `strata clear` for inspecting and maintaining the store.

#![warn(missing_docs)]

mod build;
mod clear;
mod combine;
mod gc;
mod list;
mod path;
mod project;

use std::process;

use clap::{Parser, Subcommand};

/// Strata — a content-addressable store for static assets.
#[derive(Parser, Debug)]
#[command(name = "strata", version, about = "Strata asset store")]
pub struct Cli {
    /// Suppress all output except errors and requested paths.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a custom `strata.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every registered asset into the store.
    Build(BuildArgs),
    /// Print the store path of a single asset.
    Path(PathArgs),
    /// Build a combined artifact from registered assets of one kind.
    Combine(CombineArgs),
    /// List registered assets and their catalog state.
    List(ListArgs),
    /// Remove store entries no longer referenced by the catalog.
    Gc,
    /// Remove every store entry and empty the catalog.
    Clear,
}

/// Arguments for the `strata build` subcommand.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Restrict the build to one asset kind (e.g., `css`).
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Arguments for the `strata path` subcommand.
#[derive(Parser, Debug)]
pub struct PathArgs {
    /// Asset file name (e.g., `site.css`) or full source path.
    pub name: String,
}

/// Arguments for the `strata combine` subcommand.
#[derive(Parser, Debug)]
pub struct CombineArgs {
    /// Asset kind to combine.
    pub kind: String,

    /// Only these file names, in registration order (e.g., `--include a.css b.css`).
    #[arg(long, num_args = 1..)]
    pub include: Vec<String>,

    /// File names to leave out (e.g., `--exclude vendor.css`).
    #[arg(long, num_args = 1..)]
    pub exclude: Vec<String>,
}

/// Arguments for the `strata list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Restrict the listing to one asset kind.
    #[arg(short, long)]
    pub kind: Option<String>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-essential output.
    pub quiet: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let global = GlobalArgs {
        quiet: cli.quiet,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Build(ref args) => build::run(args, &global),
        Command::Path(ref args) => path::run(args, &global),
        Command::Combine(ref args) => combine::run(args, &global),
        Command::List(ref args) => list::run(args, &global),
        Command::Gc => gc::run(&global),
        Command::Clear => clear::run(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
