// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Client-side resolver model
//!
//! A `Resolver` is scoped to exactly one domain and its node. The flat
//! record set is the canonical state; the structured resolution tree is
//! recomputed from it on every read, so the two views cannot drift apart.

pub mod records;
pub mod state;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{json, Value};

use crate::codec::{decode_assoc, ContractData};
use crate::error::{Result, ZnsError};
use crate::ledger::{contract_field, ensure_confirmed, Ledger, TxOverrides, TxParams, TxReceipt};
use crate::types::{Address, Node};

/// Client-side handle to a resolver contract.
pub struct Resolver {
    ledger: Arc<dyn Ledger>,
    address: Address,
    domain: String,
    node: Node,
    owner: Address,
    currencies: Vec<String>,
    default_tx: TxParams,
    records: BTreeMap<String, String>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("address", &self.address)
            .field("domain", &self.domain)
            .field("node", &self.node)
            .field("owner", &self.owner)
            .field("currencies", &self.currencies)
            .field("default_tx", &self.default_tx)
            .field("records", &self.records)
            .finish()
    }
}

impl Resolver {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        ledger: Arc<dyn Ledger>,
        address: Address,
        domain: String,
        node: Node,
        owner: Address,
        currencies: Vec<String>,
        default_tx: TxParams,
        records: BTreeMap<String, String>,
    ) -> Self {
        Resolver {
            ledger,
            address,
            domain,
            node,
            owner,
            currencies,
            default_tx,
            records,
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// The flat record set, the canonical view of resolver state.
    pub fn records(&self) -> &BTreeMap<String, String> {
        &self.records
    }

    /// The structured resolution tree, derived from the flat records on
    /// every read. Covers currency-address keys only.
    pub fn resolution(&self) -> Value {
        records::records_to_resolution(&self.records, &self.currencies)
    }

    /// Upsert a record. The contract ignores senders other than the owner;
    /// rejection shows up as an unchanged record set after the refresh.
    pub async fn set(&mut self, key: &str, value: &str, overrides: &TxOverrides) -> Result<TxReceipt> {
        self.invoke("set", &json!({ "key": key, "value": value }), overrides)
            .await
    }

    /// Remove a record. Removing a missing key confirms and changes
    /// nothing.
    pub async fn unset(&mut self, key: &str, overrides: &TxOverrides) -> Result<TxReceipt> {
        self.invoke("unset", &json!({ "key": key }), overrides).await
    }

    /// Re-read owner and records from the ledger, replacing local state
    /// outright so stale keys cannot survive a reload.
    pub async fn reload(&mut self) -> Result<()> {
        let raw = contract_field(self.ledger.as_ref(), &self.address, "records", false).await?;
        let mut records = BTreeMap::new();
        for (key, val) in decode_assoc(&raw) {
            let value = val
                .as_str()
                .ok_or_else(|| ZnsError::MalformedState(format!("records[{key}]")))?;
            records.insert(key, value.to_string());
        }
        self.records = records;

        let owner = contract_field(self.ledger.as_ref(), &self.address, "owner", true).await?;
        self.owner = Address::parse(
            owner
                .as_str()
                .ok_or_else(|| ZnsError::MalformedState("owner".to_string()))?,
        )?;

        tracing::debug!("Resolver state reloaded for {}", self.domain);
        Ok(())
    }

    async fn invoke(
        &mut self,
        transition: &str,
        values: &Value,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        let args = ContractData::resolver().call(transition, values)?;
        let params = self.default_tx.merge(overrides);
        tracing::debug!("Calling {} on resolver {}", transition, self.address);
        let receipt = self
            .ledger
            .call(&self.address, transition, args, &params)
            .await?;
        let receipt = ensure_confirmed(receipt, "Transaction is not confirmed")?;
        self.reload().await?;
        Ok(receipt)
    }
}
