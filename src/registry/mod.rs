// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Client-side registry model
//!
//! A `Registry` pairs a deployed registry contract with a local mirror of
//! its state. Mutations are submitted to the ledger, confirmed, and then the
//! mirror is rebuilt from a fresh state read, so a silently rejected call
//! shows up as an unchanged mirror rather than an error.

pub mod state;

use std::sync::Arc;

use serde_json::{json, Value};

use crate::codec::ContractData;
use crate::config::ZnsConfig;
use crate::error::{Result, ZnsError};
use crate::ledger::{contract_field, ensure_confirmed, Ledger, TxOverrides, TxParams, TxReceipt};
use crate::namehash::namehash;
use crate::resolver::records::{currency_key, custom_entries, resolution_to_records};
use crate::resolver::Resolver;
use crate::types::{Address, Node};

use state::RegistryState;

/// Construction parameters for a registry deployment.
#[derive(Debug, Clone, Default)]
pub struct RegistryDeploy {
    /// Initial owner of the root node; defaults to the ledger's account.
    pub owner: Option<Address>,
    /// Root of the name hierarchy; defaults to the zero node.
    pub root: Option<Node>,
}

/// Client-side handle to a deployed registry contract.
pub struct Registry {
    ledger: Arc<dyn Ledger>,
    config: ZnsConfig,
    address: Address,
    account: Option<Address>,
    default_tx: TxParams,
    state: RegistryState,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("config", &self.config)
            .field("address", &self.address)
            .field("account", &self.account)
            .field("default_tx", &self.default_tx)
            .field("state", &self.state)
            .finish()
    }
}

impl Registry {
    /// Deploy a fresh registry and return a client bound to it.
    ///
    /// Only the reusable subset of `overrides` (version, gas price, gas
    /// limit) carries over into the client's default parameters.
    pub async fn deploy(
        ledger: Arc<dyn Ledger>,
        config: ZnsConfig,
        deploy: RegistryDeploy,
        overrides: &TxOverrides,
    ) -> Result<Registry> {
        let owner = deploy
            .owner
            .or_else(|| ledger.default_account())
            .ok_or_else(|| ZnsError::Configuration("owner is not specified".to_string()))?;
        let root = deploy.root.unwrap_or_else(Node::root);

        let init = ContractData::registry().init(&json!({
            "initialOwner": owner.as_str(),
            "rootNode": root.as_str(),
        }))?;

        let params = config.tx.merge(overrides);
        tracing::info!("Deploying registry rooted at {}", root);
        let (receipt, address) = ledger
            .deploy(&config.registry_code, init, &params)
            .await?;
        ensure_confirmed(receipt, "Failed to deploy the registry")?;
        tracing::info!("Registry deployed at {}", address);

        Registry::connect_with(ledger, config, address, &overrides.reusable()).await
    }

    /// Bind a client to an already-deployed registry and load its state.
    pub async fn connect(
        ledger: Arc<dyn Ledger>,
        config: ZnsConfig,
        address: Address,
        overrides: &TxOverrides,
    ) -> Result<Registry> {
        Registry::connect_with(ledger, config, address, overrides).await
    }

    async fn connect_with(
        ledger: Arc<dyn Ledger>,
        config: ZnsConfig,
        address: Address,
        overrides: &TxOverrides,
    ) -> Result<Registry> {
        let default_tx = config.tx.merge(overrides);
        let mut registry = Registry {
            account: ledger.default_account(),
            ledger,
            config,
            address,
            default_tx,
            state: RegistryState::default(),
        };
        registry.reload().await?;
        Ok(registry)
    }

    /// Contract address this client is bound to.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The locally mirrored contract state, as of the last reload.
    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn owner_of(&self, node: &Node) -> Option<&Address> {
        self.state.owner_of(node)
    }

    pub fn resolver_of(&self, node: &Node) -> Option<&Address> {
        self.state.resolver_of(node)
    }

    pub fn approved(&self, node: &Node) -> Option<&Address> {
        self.state.approved(node)
    }

    pub fn admins(&self) -> &[Address] {
        &self.state.admins
    }

    pub fn registrar(&self) -> &Address {
        &self.state.registrar
    }

    pub fn operators_of(&self, owner: &Address) -> &[Address] {
        self.state.operators_of(owner)
    }

    /// Re-read the full contract state, replacing the local mirror.
    pub async fn reload(&mut self) -> Result<()> {
        let fields = self.ledger.get_state(&self.address).await?;
        self.state = RegistryState::decode(&fields)?;
        tracing::debug!("Registry state reloaded from {}", self.address);
        Ok(())
    }

    /// Grant `address` single-delegate approval on `node`. Ignored by the
    /// contract unless the sender owns the node.
    pub async fn approve(
        &mut self,
        node: &Node,
        address: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "approve",
            &json!({ "node": node.as_str(), "address": address.as_str() }),
            overrides,
        )
        .await
    }

    /// Add or remove `address` in the sender's operator set.
    pub async fn approve_for(
        &mut self,
        address: &Address,
        is_approved: bool,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "approveFor",
            &json!({ "address": address.as_str(), "isApproved": is_approved }),
            overrides,
        )
        .await
    }

    /// Add or remove an admin. Admin gated on the contract side.
    pub async fn set_admin(
        &mut self,
        address: &Address,
        is_approved: bool,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "setAdmin",
            &json!({ "address": address.as_str(), "isApproved": is_approved }),
            overrides,
        )
        .await
    }

    /// Replace the registrar. Admin gated on the contract side.
    pub async fn set_registrar(
        &mut self,
        address: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke("setRegistrar", &json!({ "address": address.as_str() }), overrides)
            .await
    }

    /// Point `node` at a resolver, leaving ownership untouched.
    pub async fn configure_resolver(
        &mut self,
        node: &Node,
        resolver: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "configureResolver",
            &json!({ "node": node.as_str(), "resolver": resolver.as_str() }),
            overrides,
        )
        .await
    }

    /// Set owner and resolver of `node` atomically.
    pub async fn configure_node(
        &mut self,
        node: &Node,
        owner: &Address,
        resolver: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "configureNode",
            &json!({
                "node": node.as_str(),
                "owner": owner.as_str(),
                "resolver": resolver.as_str(),
            }),
            overrides,
        )
        .await
    }

    /// Hand `node` to a new owner; the contract clears its resolver.
    pub async fn transfer(
        &mut self,
        node: &Node,
        owner: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "transfer",
            &json!({ "node": node.as_str(), "owner": owner.as_str() }),
            overrides,
        )
        .await
    }

    /// Create or reassign the child `label` under `parent`.
    pub async fn assign(
        &mut self,
        parent: &Node,
        label: &str,
        owner: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "assign",
            &json!({
                "parent": parent.as_str(),
                "label": label,
                "owner": owner.as_str(),
            }),
            overrides,
        )
        .await
    }

    /// First-assign the child `label` under `parent` with owner and
    /// resolver set together.
    pub async fn bestow(
        &mut self,
        parent: &Node,
        label: &str,
        owner: &Address,
        resolver: &Address,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "bestow",
            &json!({
                "parent": parent.as_str(),
                "label": label,
                "owner": owner.as_str(),
                "resolver": resolver.as_str(),
            }),
            overrides,
        )
        .await
    }

    /// Paid registration of the child `label` under `parent`. Attach the
    /// payment through `overrides.amount`; pricing is the registrar's.
    pub async fn register(
        &mut self,
        parent: &Node,
        label: &str,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        self.invoke(
            "register",
            &json!({ "parent": parent.as_str(), "label": label }),
            overrides,
        )
        .await
    }

    /// Deploy a resolver bound to `domain`, seeded from `resolution`.
    ///
    /// Only `crypto.<TICKER>.address` entries may appear in the initial
    /// resolution; anything else is rejected before touching the ledger.
    pub async fn deploy_resolver(
        &self,
        domain: &str,
        resolution: &Value,
        overrides: &TxOverrides,
    ) -> Result<Resolver> {
        let node = namehash(domain)?;
        let owner = self
            .account
            .clone()
            .ok_or_else(|| ZnsError::Configuration("owner is not specified".to_string()))?;

        let custom = custom_entries(resolution, &self.config.currencies);
        if !custom.is_empty() {
            return Err(ZnsError::Configuration(format!(
                "can not deploy custom resolution entries: {}",
                custom.join(", ")
            )));
        }

        let initial = resolution_to_records(resolution, &self.config.currencies);
        let mut values = json!({
            "owner": owner.as_str(),
            "registry": self.address.as_str(),
            "node": node.as_str(),
        });
        for currency in &self.config.currencies {
            let record = initial.get(&currency_key(currency)).cloned().unwrap_or_default();
            values[currency.as_str()] = Value::String(record);
        }

        let init = ContractData::resolver().init(&values)?;
        let params = self.default_tx.merge(overrides);
        tracing::info!("Deploying resolver for {}", domain);
        let (receipt, address) = self
            .ledger
            .deploy(&self.config.resolver_code, init, &params)
            .await?;
        ensure_confirmed(receipt, "Failed to deploy resolver")?;
        tracing::info!("Resolver for {} deployed at {}", domain, address);

        Ok(Resolver::new(
            Arc::clone(&self.ledger),
            address,
            domain.to_string(),
            node,
            owner,
            self.config.currencies.clone(),
            self.default_tx.clone(),
            initial,
        ))
    }

    /// Look up the resolver recorded against `domain` and open a client on
    /// it, hydrated from a fresh state read.
    pub async fn open_resolver(&self, domain: &str) -> Result<Resolver> {
        let node = namehash(domain)?;
        let address = self
            .resolver_of(&node)
            .cloned()
            .filter(|a| !a.is_null())
            .ok_or_else(|| {
                ZnsError::Configuration(format!("no resolver configured for {domain}"))
            })?;

        let owner = self.account.clone().unwrap_or_default();
        let mut resolver = Resolver::new(
            Arc::clone(&self.ledger),
            address,
            domain.to_string(),
            node,
            owner,
            self.config.currencies.clone(),
            self.default_tx.clone(),
            Default::default(),
        );
        resolver.reload().await?;
        Ok(resolver)
    }

    async fn invoke(
        &mut self,
        transition: &str,
        values: &Value,
        overrides: &TxOverrides,
    ) -> Result<TxReceipt> {
        let args = ContractData::registry().call(transition, values)?;
        let params = self.default_tx.merge(overrides);
        tracing::debug!("Calling {} on registry {}", transition, self.address);
        let receipt = self
            .ledger
            .call(&self.address, transition, args, &params)
            .await?;
        let receipt = ensure_confirmed(receipt, "Transaction is not confirmed")?;
        self.reload().await?;
        Ok(receipt)
    }

    /// Read one named field straight from the contract, bypassing the
    /// local mirror.
    pub async fn read_field(&self, name: &str) -> Result<Value> {
        contract_field(self.ledger.as_ref(), &self.address, name, false).await
    }
}
