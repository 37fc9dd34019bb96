// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! pino-bundle - inspect what the pino bundle plugin emits
//!
//! The plugin itself runs inside a bundler. This binary prints, for a given
//! configuration, the chunks a cold build emits, the override table baked into
//! the entry stub, and the stub source itself.

use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use pino_bundle_plugin::path::normalize;
use pino_bundle_plugin::plugin::{plan_chunks, synth};
use pino_bundle_plugin::{OverrideTable, PinoBundleConfig, PinoBundleOptions, VERSION};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "pino-bundle",
    about = "Inspect the chunks and entry stub produced by the pino bundle plugin",
    version = VERSION,
    author = "Pegasus Heavy Industries"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Print the chunk plan and override table
    Plan(OptionsArgs),

    /// Print the generated entry stub
    Stub {
        #[command(flatten)]
        options: OptionsArgs,

        /// Resolved id of the pino module the stub re-exports
        #[arg(long, default_value = "pino")]
        library: String,
    },
}

#[derive(Args)]
struct OptionsArgs {
    /// Options file (.toml or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Transport to bundle (repeatable)
    #[arg(short, long = "transport")]
    transports: Vec<String>,

    /// Directory for pino files
    #[arg(long)]
    pino_dir: Option<String>,

    /// Directory for transports
    #[arg(long)]
    transports_dir: Option<String>,
}

impl OptionsArgs {
    fn load(self) -> pino_bundle_plugin::Result<PinoBundleConfig> {
        let mut options = match &self.config {
            Some(path) => {
                debug!("Loading options from {}", path.display());
                PinoBundleOptions::from_file(path)?
            }
            None => PinoBundleOptions::default(),
        };
        options.merge(PinoBundleOptions {
            transports: self.transports,
            pino_dir: self.pino_dir,
            transports_dir: self.transports_dir,
        });
        options.resolve()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "pino_bundle=debug,pino_bundle_plugin=debug"
    } else {
        "pino_bundle=warn,pino_bundle_plugin=warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Plan(options) => {
            let config = options.load()?;
            print_plan(&config);
        }
        Command::Stub { options, library } => {
            let config = options.load()?;
            let overrides = planned_overrides(&config);
            print!("{}", synth::entry_stub(&overrides, config.pino_dir(), &library));
        }
    }
    Ok(())
}

/// Override table a successful cold build ends up with
fn planned_overrides(config: &PinoBundleConfig) -> OverrideTable {
    let mut overrides = OverrideTable::with_workers(config);
    for transport in config.transports() {
        overrides.insert(transport.as_str(), config.transport_path(transport));
    }
    overrides
}

fn print_plan(config: &PinoBundleConfig) {
    println!("{}", "Chunks".cyan().bold());
    for chunk in plan_chunks(config) {
        println!(
            "  {} {} {}",
            chunk.file_name.green(),
            "<=".dimmed(),
            chunk.id.escape_debug()
        );
    }

    println!();
    println!("{}", "Overrides".cyan().bold());
    for (name, path) in planned_overrides(config).iter() {
        println!(
            "  {} {} {}",
            name.yellow(),
            "=>".dimmed(),
            normalize(path)
        );
    }
}
