// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! The ledger collaborator boundary
//!
//! Everything the client needs from the chain fits through this trait:
//! deploy a contract, invoke a transition, read state back. Implementations
//! own signing, networking, retries and timeouts; the client core never
//! recovers from ledger failures on its own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::codec::WireValue;
use crate::constants::{
    DEFAULT_CHAIN_ID, DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, DEFAULT_MSG_VERSION,
};
use crate::error::ZnsError;
use crate::types::Address;

/// Pack a chain id and message version into a transaction version word.
pub fn pack_version(chain_id: u16, msg_version: u16) -> u32 {
    ((chain_id as u32) << 16) | msg_version as u32
}

/// Parameters attached to every deployment and call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxParams {
    pub version: u32,
    pub to_addr: Address,
    pub amount: u128,
    pub gas_price: u128,
    pub gas_limit: u64,
}

impl Default for TxParams {
    fn default() -> Self {
        TxParams {
            version: pack_version(DEFAULT_CHAIN_ID, DEFAULT_MSG_VERSION),
            to_addr: Address::null(),
            amount: 0,
            gas_price: DEFAULT_GAS_PRICE,
            gas_limit: DEFAULT_GAS_LIMIT,
        }
    }
}

impl TxParams {
    /// Apply a partial override on top of these parameters.
    pub fn merge(&self, overrides: &TxOverrides) -> TxParams {
        TxParams {
            version: overrides.version.unwrap_or(self.version),
            to_addr: overrides.to_addr.clone().unwrap_or_else(|| self.to_addr.clone()),
            amount: overrides.amount.unwrap_or(self.amount),
            gas_price: overrides.gas_price.unwrap_or(self.gas_price),
            gas_limit: overrides.gas_limit.unwrap_or(self.gas_limit),
        }
    }
}

/// Partial transaction parameters; unset fields inherit from the base set.
#[derive(Debug, Clone, Default)]
pub struct TxOverrides {
    pub version: Option<u32>,
    pub to_addr: Option<Address>,
    pub amount: Option<u128>,
    pub gas_price: Option<u128>,
    pub gas_limit: Option<u64>,
}

impl TxOverrides {
    /// Override only the attached amount.
    pub fn amount(amount: u128) -> Self {
        TxOverrides {
            amount: Some(amount),
            ..TxOverrides::default()
        }
    }

    /// Override only the gas limit.
    pub fn gas_limit(gas_limit: u64) -> Self {
        TxOverrides {
            gas_limit: Some(gas_limit),
            ..TxOverrides::default()
        }
    }

    /// The subset safe to reuse across related deployments within one
    /// session: version, gas price and gas limit.
    pub fn reusable(&self) -> TxOverrides {
        TxOverrides {
            version: self.version,
            gas_price: self.gas_price,
            gas_limit: self.gas_limit,
            ..TxOverrides::default()
        }
    }
}

/// Outcome of a submitted transaction.
///
/// Confirmation means inclusion on the ledger, not business effect: a
/// rejected operation confirms like any other and changes nothing.
#[derive(Debug, Clone)]
pub struct TxReceipt {
    pub id: String,
    pub confirmed: bool,
}

impl TxReceipt {
    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// One named field of a contract's mutable or construction state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateField {
    pub vname: String,
    pub value: Value,
}

/// The ledger collaborator.
#[async_trait]
pub trait Ledger: Send + Sync {
    /// The account transactions are sent from, if one is configured.
    fn default_account(&self) -> Option<Address>;

    /// Deploy a contract, returning the deployment receipt and the new
    /// contract's address.
    async fn deploy(
        &self,
        code: &str,
        init: Vec<WireValue>,
        params: &TxParams,
    ) -> anyhow::Result<(TxReceipt, Address)>;

    /// Invoke a transition on a deployed contract.
    async fn call(
        &self,
        contract: &Address,
        transition: &str,
        args: Vec<WireValue>,
        params: &TxParams,
    ) -> anyhow::Result<TxReceipt>;

    /// Read the mutable state fields of a contract.
    async fn get_state(&self, contract: &Address) -> anyhow::Result<Vec<StateField>>;

    /// Read the construction-time fields of a contract.
    async fn get_init(&self, contract: &Address) -> anyhow::Result<Vec<StateField>>;
}

/// Fetch one named field from a contract's state, or from its construction
/// fields when `init` is set.
pub async fn contract_field(
    ledger: &dyn Ledger,
    contract: &Address,
    name: &str,
    init: bool,
) -> Result<Value, ZnsError> {
    let fields = if init {
        ledger.get_init(contract).await?
    } else {
        ledger.get_state(contract).await?
    };
    fields
        .into_iter()
        .find(|f| f.vname == name)
        .map(|f| f.value)
        .ok_or_else(|| ZnsError::UnknownField(name.to_string()))
}

/// Raise when a submitted transaction did not confirm.
pub fn ensure_confirmed(receipt: TxReceipt, message: &str) -> Result<TxReceipt, ZnsError> {
    if !receipt.is_confirmed() {
        return Err(ZnsError::Unconfirmed(message.to_string()));
    }
    Ok(receipt)
}
