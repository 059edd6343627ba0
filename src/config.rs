// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Client configuration

use crate::constants::DEFAULT_CURRENCIES;
use crate::ledger::TxParams;

/// Immutable client configuration, passed into every model constructor:
/// the contract sources used for deployments, the currency set that
/// participates in structured resolution, and the base transaction
/// parameters.
#[derive(Debug, Clone)]
pub struct ZnsConfig {
    /// Source text of the registry contract, handed to the ledger on deploy.
    pub registry_code: String,
    /// Source text of the resolver contract.
    pub resolver_code: String,
    /// Lowercase currency tickers recognized in resolution trees.
    pub currencies: Vec<String>,
    /// Base transaction parameters; per-call overrides merge on top.
    pub tx: TxParams,
}

impl Default for ZnsConfig {
    fn default() -> Self {
        ZnsConfig {
            registry_code: String::new(),
            resolver_code: String::new(),
            currencies: DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect(),
            tx: TxParams::default(),
        }
    }
}

impl ZnsConfig {
    /// Attach the contract sources used for deployments.
    pub fn with_sources(
        mut self,
        registry_code: impl Into<String>,
        resolver_code: impl Into<String>,
    ) -> Self {
        self.registry_code = registry_code.into();
        self.resolver_code = resolver_code.into();
        self
    }
}
