// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Record and resolution conversion commands

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use clap::Subcommand;

use zns::constants::DEFAULT_CURRENCIES;
use zns::resolver::records::{records_to_resolution, resolution_to_records};

#[derive(Subcommand)]
pub enum RecordsCommands {
    /// Expand flat records into a structured resolution tree
    ToResolution {
        /// Flat records as JSON, e.g. {"crypto.BTC.address": "1abc..."}
        json: String,
    },
    /// Flatten a resolution tree into currency-address records
    FromResolution {
        /// Resolution tree as JSON
        json: String,
    },
}

pub fn execute(command: RecordsCommands) -> Result<()> {
    match command {
        RecordsCommands::ToResolution { json } => to_resolution_command(json),
        RecordsCommands::FromResolution { json } => from_resolution_command(json),
    }
}

fn currencies() -> Vec<String> {
    DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

fn to_resolution_command(json: String) -> Result<()> {
    let records: BTreeMap<String, String> =
        serde_json::from_str(&json).context("Failed to parse records JSON")?;
    let resolution = records_to_resolution(&records, &currencies());
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

fn from_resolution_command(json: String) -> Result<()> {
    let resolution: serde_json::Value =
        serde_json::from_str(&json).context("Failed to parse resolution JSON")?;
    let records = resolution_to_records(&resolution, &currencies());
    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
