// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! The resolver contract's state machine, mirrored client side

use std::collections::BTreeMap;

use crate::types::{Address, Effect};

/// Client-side mirror of a resolver contract: an owner and a flat record
/// set. Mutation is owner gated and silent on rejection, like the registry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolverState {
    pub owner: Address,
    pub records: BTreeMap<String, String>,
}

impl ResolverState {
    pub fn new(owner: Address) -> Self {
        ResolverState {
            owner,
            records: BTreeMap::new(),
        }
    }

    /// Upsert a record. Senders other than the owner change nothing.
    pub fn set(&mut self, sender: &Address, key: &str, value: &str) -> Effect {
        if *sender != self.owner {
            return Effect::Unchanged;
        }
        let previous = self.records.insert(key.to_string(), value.to_string());
        if previous.as_deref() == Some(value) {
            Effect::Unchanged
        } else {
            Effect::Applied
        }
    }

    /// Remove a record. Removing a missing key is a quiet no-op.
    pub fn unset(&mut self, sender: &Address, key: &str) -> Effect {
        if *sender != self.owner {
            return Effect::Unchanged;
        }
        match self.records.remove(key) {
            Some(_) => Effect::Applied,
            None => Effect::Unchanged,
        }
    }
}
