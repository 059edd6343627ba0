// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! The registry contract's state machine, mirrored client side
//!
//! Transitions apply exactly the checks the deployed contract applies, so
//! state rebuilt from confirmed calls can never diverge from ledger truth.
//! Every rejection is a silent no-op: the transaction confirms, nothing
//! changes, and callers detect it by reading state back.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::codec::decode_assoc;
use crate::error::{Result, ZnsError};
use crate::ledger::StateField;
use crate::namehash::combine;
use crate::types::{Address, Effect, Node};

/// Ownership record held against a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub owner: Address,
    pub resolver: Address,
}

/// Client-side mirror of the registry contract.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryState {
    /// Node ownership and resolver assignment.
    pub records: BTreeMap<Node, NodeRecord>,
    /// Single approved delegate per node.
    pub approvals: BTreeMap<Node, Address>,
    /// Blanket delegates per owner, in grant order.
    pub operators: BTreeMap<Address, Vec<Address>>,
    /// Admin set, most recent grant first.
    pub admins: Vec<Address>,
    /// Delegate authorized to first-assign paid names.
    pub registrar: Address,
}

impl RegistryState {
    /// Fresh post-deployment state: the root record owned by the initial
    /// owner, who is also the sole admin.
    pub fn new(initial_owner: Address, root: Node) -> Self {
        let mut records = BTreeMap::new();
        records.insert(
            root,
            NodeRecord {
                owner: initial_owner.clone(),
                resolver: Address::null(),
            },
        );
        RegistryState {
            records,
            approvals: BTreeMap::new(),
            operators: BTreeMap::new(),
            admins: vec![initial_owner],
            registrar: Address::null(),
        }
    }

    pub fn owner_of(&self, node: &Node) -> Option<&Address> {
        self.records.get(node).map(|r| &r.owner)
    }

    pub fn resolver_of(&self, node: &Node) -> Option<&Address> {
        self.records.get(node).map(|r| &r.resolver)
    }

    pub fn approved(&self, node: &Node) -> Option<&Address> {
        self.approvals.get(node)
    }

    pub fn operators_of(&self, owner: &Address) -> &[Address] {
        self.operators.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_admin(&self, address: &Address) -> bool {
        self.admins.contains(address)
    }

    /// The authorization predicate every node mutation goes through: the
    /// node's owner, its approved delegate, or an operator of its owner.
    /// A node without a record has no owner, so nobody can operate on it.
    pub fn can_operate(&self, actor: &Address, node: &Node) -> bool {
        let Some(record) = self.records.get(node) else {
            return false;
        };
        record.owner == *actor
            || self.approvals.get(node) == Some(actor)
            || self.operators_of(&record.owner).contains(actor)
    }

    /// Grant `address` single-delegate approval on `node`. Owner only;
    /// overwrites any prior approval unconditionally.
    pub fn approve(&mut self, sender: &Address, node: &Node, address: &Address) -> Effect {
        match self.records.get(node) {
            Some(record) if record.owner == *sender => {
                self.approvals.insert(node.clone(), address.clone());
                Effect::Applied
            }
            _ => Effect::Unchanged,
        }
    }

    /// Add or remove `address` in the sender's own operator set.
    pub fn approve_for(&mut self, sender: &Address, address: &Address, is_approved: bool) -> Effect {
        let ops = self.operators.entry(sender.clone()).or_default();
        if is_approved {
            if ops.contains(address) {
                return Effect::Unchanged;
            }
            ops.push(address.clone());
            Effect::Applied
        } else {
            match ops.iter().position(|a| a == address) {
                Some(index) => {
                    ops.remove(index);
                    Effect::Applied
                }
                None => Effect::Unchanged,
            }
        }
    }

    /// Add or remove an admin. Admin gated; new grants go to the front.
    pub fn set_admin(&mut self, sender: &Address, address: &Address, is_approved: bool) -> Effect {
        if !self.is_admin(sender) {
            return Effect::Unchanged;
        }
        if is_approved {
            if self.admins.contains(address) {
                return Effect::Unchanged;
            }
            self.admins.insert(0, address.clone());
            Effect::Applied
        } else {
            match self.admins.iter().position(|a| a == address) {
                Some(index) => {
                    self.admins.remove(index);
                    Effect::Applied
                }
                None => Effect::Unchanged,
            }
        }
    }

    /// Replace the registrar. Admin gated.
    pub fn set_registrar(&mut self, sender: &Address, address: &Address) -> Effect {
        if !self.is_admin(sender) {
            return Effect::Unchanged;
        }
        self.registrar = address.clone();
        Effect::Applied
    }

    /// Point `node` at a resolver, leaving its owner untouched.
    pub fn configure_resolver(&mut self, sender: &Address, node: &Node, resolver: &Address) -> Effect {
        if !self.can_operate(sender, node) {
            return Effect::Unchanged;
        }
        if let Some(record) = self.records.get_mut(node) {
            record.resolver = resolver.clone();
        }
        Effect::Applied
    }

    /// Set both owner and resolver of `node` atomically.
    pub fn configure_node(
        &mut self,
        sender: &Address,
        node: &Node,
        owner: &Address,
        resolver: &Address,
    ) -> Effect {
        if !self.can_operate(sender, node) {
            return Effect::Unchanged;
        }
        if let Some(record) = self.records.get_mut(node) {
            record.owner = owner.clone();
            record.resolver = resolver.clone();
        }
        Effect::Applied
    }

    /// Hand `node` to a new owner. Transfer always clears the resolver and
    /// revokes the node's standing approval: neither resolution nor
    /// delegation is inherited across ownership changes.
    pub fn transfer(&mut self, sender: &Address, node: &Node, owner: &Address) -> Effect {
        if !self.can_operate(sender, node) {
            return Effect::Unchanged;
        }
        if let Some(record) = self.records.get_mut(node) {
            record.owner = owner.clone();
            record.resolver = Address::null();
        }
        self.approvals.remove(node);
        Effect::Applied
    }

    /// Create or reassign the child `label` under `parent`. The child must
    /// be unowned or already owned by the sender; its resolver resets.
    pub fn assign(&mut self, sender: &Address, parent: &Node, label: &str, owner: &Address) -> Effect {
        if !self.can_operate(sender, parent) {
            return Effect::Unchanged;
        }
        let child = combine(parent, label);
        match self.records.get(&child) {
            Some(record) if record.owner != *sender => Effect::Unchanged,
            _ => {
                self.records.insert(
                    child,
                    NodeRecord {
                        owner: owner.clone(),
                        resolver: Address::null(),
                    },
                );
                Effect::Applied
            }
        }
    }

    /// First assignment of the child `label` under `parent`, setting owner
    /// and resolver atomically. Never touches an already-owned child.
    pub fn bestow(
        &mut self,
        sender: &Address,
        parent: &Node,
        label: &str,
        owner: &Address,
        resolver: &Address,
    ) -> Effect {
        if !self.can_operate(sender, parent) {
            return Effect::Unchanged;
        }
        let child = combine(parent, label);
        if self.records.contains_key(&child) {
            return Effect::Unchanged;
        }
        self.records.insert(
            child,
            NodeRecord {
                owner: owner.clone(),
                resolver: resolver.clone(),
            },
        );
        Effect::Applied
    }

    /// Paid first assignment. Accepted from the registrar itself, or from
    /// any sender whose attached payment the registrar's pricing accepts;
    /// the price itself lives in the registrar, outside this model.
    pub fn register(&mut self, sender: &Address, parent: &Node, label: &str, amount: u128) -> Effect {
        if self.registrar.is_null() {
            return Effect::Unchanged;
        }
        let child = combine(parent, label);
        if self.records.contains_key(&child) {
            return Effect::Unchanged;
        }
        if *sender != self.registrar && amount == 0 {
            return Effect::Unchanged;
        }
        self.records.insert(
            child,
            NodeRecord {
                owner: sender.clone(),
                resolver: Address::null(),
            },
        );
        Effect::Applied
    }

    /// Rebuild state from the contract's wire-shaped field list.
    pub fn decode(fields: &[StateField]) -> Result<RegistryState> {
        let field = |name: &str| -> Result<&Value> {
            fields
                .iter()
                .find(|f| f.vname == name)
                .map(|f| &f.value)
                .ok_or_else(|| ZnsError::UnknownField(name.to_string()))
        };

        let mut records = BTreeMap::new();
        for (key, val) in decode_assoc(field("records")?) {
            let args = val
                .get("arguments")
                .and_then(Value::as_array)
                .ok_or_else(|| ZnsError::MalformedState(format!("records[{key}]")))?;
            let owner = args
                .first()
                .and_then(Value::as_str)
                .ok_or_else(|| ZnsError::MalformedState(format!("records[{key}]")))?;
            let resolver = args
                .get(1)
                .and_then(Value::as_str)
                .ok_or_else(|| ZnsError::MalformedState(format!("records[{key}]")))?;
            records.insert(
                Node::parse(&key)?,
                NodeRecord {
                    owner: Address::parse(owner)?,
                    resolver: Address::parse(resolver)?,
                },
            );
        }

        let mut approvals = BTreeMap::new();
        for (key, val) in decode_assoc(field("approvals")?) {
            let address = val
                .as_str()
                .ok_or_else(|| ZnsError::MalformedState(format!("approvals[{key}]")))?;
            approvals.insert(Node::parse(&key)?, Address::parse(address)?);
        }

        let mut operators = BTreeMap::new();
        for (key, val) in decode_assoc(field("operators")?) {
            let list = val
                .as_array()
                .ok_or_else(|| ZnsError::MalformedState(format!("operators[{key}]")))?;
            let parsed = list
                .iter()
                .map(|v| {
                    v.as_str()
                        .ok_or_else(|| ZnsError::MalformedState(format!("operators[{key}]")))
                        .and_then(Address::parse)
                })
                .collect::<Result<Vec<_>>>()?;
            operators.insert(Address::parse(&key)?, parsed);
        }

        let admins = field("admins")?
            .as_array()
            .ok_or_else(|| ZnsError::MalformedState("admins".to_string()))?
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| ZnsError::MalformedState("admins".to_string()))
                    .and_then(Address::parse)
            })
            .collect::<Result<Vec<_>>>()?;

        let registrar = Address::parse(
            field("registrar")?
                .as_str()
                .ok_or_else(|| ZnsError::MalformedState("registrar".to_string()))?,
        )?;

        Ok(RegistryState {
            records,
            approvals,
            operators,
            admins,
            registrar,
        })
    }
}
