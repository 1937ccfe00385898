/*
 * This file is part of owneo.
 *
 * Copyright (C) 2025 owneo contributors
 *
 * owneo is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * owneo is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with owneo. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command Line Interface

use std::thread;

use anyhow::{bail, Context};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use ow_core::{Engine, FamilyCatalog, OwfsMountClient};

use crate::config::{config_path, load_config, validate_config, Config};
use crate::report::{render_families, render_json, render_sensor, render_status};

#[derive(Parser)]
#[command(name = "owneo")]
#[command(version)]
#[command(about = "Track 1-Wire sensors on an owfs mount")]
#[command(long_about = "Track 1-Wire sensors on an owfs mount

Classifies every device on the bus by family, keeps only those exposing a
desired feature and follows their properties from one refresh to the next.

EXAMPLES:
    owneo status -f temperature            One refresh, print the report
    owneo watch -f temperature -f humidity Poll every interval
    owneo families                         List known family codes
    owneo describe 10.147A0A020800         Show the family of a device id
    owneo set 05.4AEC29CDBAAB PIO 1        Write a property

ENVIRONMENT VARIABLES:
    OWNEO_LOG=debug        Log filter (default info)

FILES:
    ~/.config/owneo/config.json           Address, features, poll interval")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that talk to the bus
#[derive(Args, Debug, Clone, Default)]
pub struct BusArgs {
    /// owfs mount root (overrides config)
    #[arg(short, long)]
    pub address: Option<String>,

    /// Feature to track, repeatable (overrides config)
    #[arg(short = 'f', long = "feature")]
    pub features: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Refresh once and print the status report
    Status {
        #[command(flatten)]
        bus: BusArgs,

        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refresh repeatedly and print the report after each cycle
    Watch {
        #[command(flatten)]
        bus: BusArgs,

        /// Seconds between refreshes (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many refreshes
        #[arg(short = 'n', long)]
        cycles: Option<u64>,
    },

    /// List the known device families
    Families,

    /// Show the family of a device id
    Describe {
        /// Device id or path, e.g. 10.147A0A020800
        sensor: String,
    },

    /// Write a value to a sensor property
    Set {
        #[command(flatten)]
        bus: BusArgs,

        /// Sensor id or path
        sensor: String,
        /// Property name, e.g. PIO.A
        property: String,
        value: String,
    },

    /// Inspect the configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration as JSON
    Show,
    /// Print the configuration file path
    Path,
}

pub fn run_cli(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Status { bus, json } => cmd_status(bus, *json),
        Commands::Watch { bus, interval, cycles } => cmd_watch(bus, *interval, *cycles),
        Commands::Families => cmd_families(),
        Commands::Describe { sensor } => cmd_describe(sensor),
        Commands::Set { bus, sensor, property, value } => cmd_set(bus, sensor, property, value),
        Commands::Config(sub) => cmd_config(sub),
    }
}

/// File config with command line overrides applied, validated
pub fn effective_config(bus: &BusArgs, interval: Option<u64>) -> anyhow::Result<Config> {
    let config = load_config()
        .with_context(|| format!("Failed to load {}", config_path().display()))?
        .with_overrides(bus.address.as_deref(), &bus.features, interval);
    validate_config(&config)?;
    Ok(config)
}

fn open_engine(config: &Config) -> anyhow::Result<Engine<OwfsMountClient>> {
    let desired = config.desired_features()?;
    if desired.is_empty() {
        warn!("No features requested; no sensors will be tracked");
    }
    let engine = Engine::<OwfsMountClient>::connect(&config.address, desired)?;
    Ok(engine)
}

// ============================================================================
// Commands
// ============================================================================

fn cmd_status(bus: &BusArgs, json: bool) -> anyhow::Result<()> {
    let config = effective_config(bus, None)?;
    let engine = open_engine(&config)?;
    if json {
        println!("{}", render_json(&engine)?);
    } else {
        print!("{}", render_status(&engine));
    }
    Ok(())
}

fn cmd_watch(bus: &BusArgs, interval: Option<u64>, cycles: Option<u64>) -> anyhow::Result<()> {
    let config = effective_config(bus, interval)?;
    let mut engine = open_engine(&config)?;
    info!(
        address = %config.address,
        interval_secs = config.poll_interval_secs,
        "Watching sensors"
    );

    let mut cycle = 1;
    loop {
        println!("Cycle {} at {}", cycle, Local::now().format("%Y-%m-%d %H:%M:%S"));
        print!("{}", render_status(&engine));

        if cycles.is_some_and(|limit| cycle >= limit) {
            return Ok(());
        }
        thread::sleep(config.poll_interval());
        cycle += 1;

        if let Err(e) = engine.refresh() {
            warn!(error = %e, "Refresh failed, keeping previous state");
        }
    }
}

fn cmd_families() -> anyhow::Result<()> {
    print!("{}", render_families(&FamilyCatalog::new()));
    Ok(())
}

fn cmd_describe(sensor: &str) -> anyhow::Result<()> {
    let catalog = FamilyCatalog::new();
    println!("{}", catalog.family_of(sensor));
    Ok(())
}

fn cmd_set(bus: &BusArgs, sensor: &str, property: &str, value: &str) -> anyhow::Result<()> {
    let config = effective_config(bus, None)?;
    let engine = open_engine(&config)?;
    if !engine.is_connected() {
        bail!("Not connected to {}", config.address);
    }
    engine
        .write_property(sensor, property, value)
        .with_context(|| format!("Failed to set {} on {}", property, sensor))?;

    if let Some(record) = engine.sensor(sensor) {
        println!("{}", render_sensor(record));
    }
    println!("Wrote {} to {}", value, property);
    Ok(())
}

fn cmd_config(cmd: &ConfigCommands) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = effective_config(&BusArgs::default(), None)?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigCommands::Path => println!("{}", config_path().display()),
    }
    Ok(())
}
