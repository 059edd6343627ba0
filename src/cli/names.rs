// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Name hashing commands

use anyhow::{Context, Result};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum NamesCommands {
    /// Compute the canonical node for a domain
    Hash {
        /// Domain name (e.g. example.zil) or an existing node identifier
        domain: String,
    },
    /// Compute the node of a label under a parent node
    Child {
        /// Parent node identifier (64 hex digits)
        parent: String,
        /// Label to place under the parent
        label: String,
    },
}

pub fn execute(command: NamesCommands) -> Result<()> {
    match command {
        NamesCommands::Hash { domain } => hash_command(domain),
        NamesCommands::Child { parent, label } => child_command(parent, label),
    }
}

fn hash_command(domain: String) -> Result<()> {
    let node = zns::namehash(&domain).context("Failed to hash domain")?;
    println!("{}", node);
    Ok(())
}

fn child_command(parent: String, label: String) -> Result<()> {
    let parent = zns::types::Node::parse(&parent).context("Invalid parent node")?;
    println!("{}", zns::combine(&parent, &label));
    Ok(())
}
