// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! In-memory ledger double for integration tests
//!
//! Executes registry and resolver transitions with the library's own state
//! machines against decoded wire arguments, and serves state back in wire
//! shape. Unauthorized calls confirm and change nothing, matching the
//! contracts' silent-rejection behavior.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde_json::{json, Value};

use zns::codec::{decode_bool, WireValue};
use zns::{
    Address, Ledger, Node, RegistryState, ResolverState, StateField, TxParams, TxReceipt,
};

pub const ADDRESS: &str = "0xd90f2e538ce0df89c8273cad3b63ec44a3c4ed82";
pub const ADDRESS2: &str = "0x2f4f79ef6abfc0368f5a7e2c2df82e1afdfe7204";

pub fn address() -> Address {
    Address::parse(ADDRESS).unwrap()
}

pub fn address2() -> Address {
    Address::parse(ADDRESS2).unwrap()
}

pub struct MemoryLedger {
    inner: Mutex<Inner>,
}

struct Inner {
    caller: Option<Address>,
    next_address: u64,
    next_tx: u64,
    contracts: HashMap<Address, Contract>,
}

struct Contract {
    init: Vec<WireValue>,
    kind: ContractKind,
}

enum ContractKind {
    Registry(RegistryState),
    Resolver(ResolverState),
}

impl MemoryLedger {
    pub fn new(caller: Address) -> Self {
        MemoryLedger {
            inner: Mutex::new(Inner {
                caller: Some(caller),
                next_address: 1,
                next_tx: 1,
                contracts: HashMap::new(),
            }),
        }
    }

    /// A ledger with no account configured, for configuration-error paths.
    pub fn without_account() -> Self {
        MemoryLedger {
            inner: Mutex::new(Inner {
                caller: None,
                next_address: 1,
                next_tx: 1,
                contracts: HashMap::new(),
            }),
        }
    }

    /// Switch the account subsequent transactions are sent from.
    pub fn set_caller(&self, caller: Address) {
        self.inner.lock().unwrap().caller = Some(caller);
    }
}

#[async_trait]
impl Ledger for MemoryLedger {
    fn default_account(&self) -> Option<Address> {
        self.inner.lock().unwrap().caller.clone()
    }

    async fn deploy(
        &self,
        _code: &str,
        init: Vec<WireValue>,
        _params: &TxParams,
    ) -> anyhow::Result<(TxReceipt, Address)> {
        let mut inner = self.inner.lock().unwrap();

        let kind = if find_arg(&init, "rootNode").is_some() {
            let owner = Address::parse(str_arg(&init, "initialOwner")?)?;
            let root = Node::parse(str_arg(&init, "rootNode")?)?;
            ContractKind::Registry(RegistryState::new(owner, root))
        } else if find_arg(&init, "registry").is_some() {
            let owner = Address::parse(str_arg(&init, "owner")?)?;
            let mut state = ResolverState::new(owner.clone());
            for arg in &init {
                if matches!(arg.vname.as_str(), "owner" | "registry" | "node" | "_scilla_version") {
                    continue;
                }
                if let Some(value) = arg.value.as_str() {
                    if !value.is_empty() {
                        let key = format!("crypto.{}.address", arg.vname.to_uppercase());
                        state.set(&owner, &key, value);
                    }
                }
            }
            ContractKind::Resolver(state)
        } else {
            bail!("unrecognized contract init shape");
        };

        let address = Address::parse(&format!("{:040x}", inner.next_address))?;
        inner.next_address += 1;
        inner.contracts.insert(address.clone(), Contract { init, kind });

        Ok((inner.receipt(), address))
    }

    async fn call(
        &self,
        contract: &Address,
        transition: &str,
        args: Vec<WireValue>,
        params: &TxParams,
    ) -> anyhow::Result<TxReceipt> {
        let mut inner = self.inner.lock().unwrap();
        let sender = inner.caller.clone().context("no account configured")?;

        let target = inner
            .contracts
            .get_mut(contract)
            .with_context(|| format!("no contract at {contract}"))?;

        match &mut target.kind {
            ContractKind::Registry(state) => match transition {
                "approve" => {
                    let node = node_arg(&args, "node")?;
                    let address = addr_arg(&args, "address")?;
                    state.approve(&sender, &node, &address);
                }
                "approveFor" => {
                    let address = addr_arg(&args, "address")?;
                    let approved = decode_bool(find_arg(&args, "isApproved").context("isApproved")?);
                    state.approve_for(&sender, &address, approved);
                }
                "setAdmin" => {
                    let address = addr_arg(&args, "address")?;
                    let approved = decode_bool(find_arg(&args, "isApproved").context("isApproved")?);
                    state.set_admin(&sender, &address, approved);
                }
                "setRegistrar" => {
                    let address = addr_arg(&args, "address")?;
                    state.set_registrar(&sender, &address);
                }
                "configureResolver" => {
                    let node = node_arg(&args, "node")?;
                    let resolver = addr_arg(&args, "resolver")?;
                    state.configure_resolver(&sender, &node, &resolver);
                }
                "configureNode" => {
                    let node = node_arg(&args, "node")?;
                    let owner = addr_arg(&args, "owner")?;
                    let resolver = addr_arg(&args, "resolver")?;
                    state.configure_node(&sender, &node, &owner, &resolver);
                }
                "transfer" => {
                    let node = node_arg(&args, "node")?;
                    let owner = addr_arg(&args, "owner")?;
                    state.transfer(&sender, &node, &owner);
                }
                "assign" => {
                    let parent = node_arg(&args, "parent")?;
                    let label = str_arg(&args, "label")?;
                    let owner = addr_arg(&args, "owner")?;
                    state.assign(&sender, &parent, label, &owner);
                }
                "bestow" => {
                    let parent = node_arg(&args, "parent")?;
                    let label = str_arg(&args, "label")?;
                    let owner = addr_arg(&args, "owner")?;
                    let resolver = addr_arg(&args, "resolver")?;
                    state.bestow(&sender, &parent, label, &owner, &resolver);
                }
                "register" => {
                    let parent = node_arg(&args, "parent")?;
                    let label = str_arg(&args, "label")?;
                    state.register(&sender, &parent, label, params.amount);
                }
                other => bail!("unknown registry transition {other}"),
            },
            ContractKind::Resolver(state) => match transition {
                "set" => {
                    let key = str_arg(&args, "key")?;
                    let value = str_arg(&args, "value")?;
                    state.set(&sender, key, value);
                }
                "unset" => {
                    let key = str_arg(&args, "key")?;
                    state.unset(&sender, key);
                }
                other => bail!("unknown resolver transition {other}"),
            },
        }

        Ok(inner.receipt())
    }

    async fn get_state(&self, contract: &Address) -> anyhow::Result<Vec<StateField>> {
        let inner = self.inner.lock().unwrap();
        let target = inner
            .contracts
            .get(contract)
            .with_context(|| format!("no contract at {contract}"))?;

        Ok(match &target.kind {
            ContractKind::Registry(state) => registry_fields(state),
            ContractKind::Resolver(state) => resolver_fields(state),
        })
    }

    async fn get_init(&self, contract: &Address) -> anyhow::Result<Vec<StateField>> {
        let inner = self.inner.lock().unwrap();
        let target = inner
            .contracts
            .get(contract)
            .with_context(|| format!("no contract at {contract}"))?;

        Ok(target
            .init
            .iter()
            .map(|arg| StateField {
                vname: arg.vname.clone(),
                value: arg.value.clone(),
            })
            .collect())
    }
}

impl Inner {
    fn receipt(&mut self) -> TxReceipt {
        let id = self.next_tx;
        self.next_tx += 1;
        TxReceipt {
            id: id.to_string(),
            confirmed: true,
        }
    }
}

fn find_arg<'a>(args: &'a [WireValue], name: &str) -> Option<&'a Value> {
    args.iter().find(|a| a.vname == name).map(|a| &a.value)
}

fn str_arg<'a>(args: &'a [WireValue], name: &str) -> anyhow::Result<&'a str> {
    find_arg(args, name)
        .and_then(Value::as_str)
        .with_context(|| format!("missing string argument {name}"))
}

fn node_arg(args: &[WireValue], name: &str) -> anyhow::Result<Node> {
    Ok(Node::parse(str_arg(args, name)?)?)
}

fn addr_arg(args: &[WireValue], name: &str) -> anyhow::Result<Address> {
    Ok(Address::parse(str_arg(args, name)?)?)
}

fn registry_fields(state: &RegistryState) -> Vec<StateField> {
    let records: Vec<Value> = state
        .records
        .iter()
        .map(|(node, record)| {
            json!({
                "key": node.as_str(),
                "val": {
                    "constructor": "Record",
                    "argtypes": ["ByStr20", "ByStr20"],
                    "arguments": [record.owner.as_str(), record.resolver.as_str()],
                },
            })
        })
        .collect();

    let approvals: Vec<Value> = state
        .approvals
        .iter()
        .map(|(node, address)| json!({ "key": node.as_str(), "val": address.as_str() }))
        .collect();

    let operators: Vec<Value> = state
        .operators
        .iter()
        .map(|(owner, ops)| {
            json!({
                "key": owner.as_str(),
                "val": ops.iter().map(|a| a.as_str()).collect::<Vec<_>>(),
            })
        })
        .collect();

    let admins: Vec<&str> = state.admins.iter().map(|a| a.as_str()).collect();

    vec![
        StateField { vname: "records".into(), value: Value::Array(records) },
        StateField { vname: "approvals".into(), value: Value::Array(approvals) },
        StateField { vname: "operators".into(), value: Value::Array(operators) },
        StateField { vname: "admins".into(), value: json!(admins) },
        StateField { vname: "registrar".into(), value: json!(state.registrar.as_str()) },
    ]
}

fn resolver_fields(state: &ResolverState) -> Vec<StateField> {
    let records: Vec<Value> = state
        .records
        .iter()
        .map(|(key, value)| json!({ "key": key, "val": value }))
        .collect();

    vec![StateField {
        vname: "records".into(),
        value: Value::Array(records),
    }]
}
