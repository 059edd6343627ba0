// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! ZNS - Zilliqa Name Service client
//!
//! Client-side logic for a hierarchical name service on a Zilliqa-style
//! ledger: canonical name identifiers via an iterated hash chain, typed
//! call-argument marshalling for the contract execution model, and registry
//! and resolver models that mirror the on-chain ownership, delegation and
//! record-resolution semantics.
//!
//! The ledger itself sits behind the [`ledger::Ledger`] trait. The contracts
//! reject unauthorized operations silently: the transaction confirms and
//! state stays put, so clients detect rejection by reloading and comparing,
//! never by catching an error.

pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod ledger;
pub mod namehash;
pub mod registry;
pub mod resolver;
pub mod types;

pub use constants::*;

// Re-export commonly used types
pub use codec::{ContractData, ContractInfo, WireValue};
pub use config::ZnsConfig;
pub use error::{Result, ZnsError};
pub use ledger::{
    contract_field, pack_version, Ledger, StateField, TxOverrides, TxParams, TxReceipt,
};
pub use namehash::{combine, namehash};
pub use registry::{state::NodeRecord, state::RegistryState, Registry, RegistryDeploy};
pub use resolver::{state::ResolverState, Resolver};
pub use types::{Address, Effect, Node};
