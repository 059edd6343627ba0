// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Core identifier types shared by the registry and resolver models

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{NULL_ADDRESS, NULL_NODE};
use crate::error::ZnsError;

/// A 20-byte account or contract identifier.
///
/// The canonical form is always lowercase and `0x`-prefixed; source forms
/// may carry any case and may omit the prefix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse an address from hex, normalizing case and prefix.
    pub fn parse(source: &str) -> Result<Self, ZnsError> {
        let digits = strip_prefix(source);
        if digits.len() != 40 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ZnsError::InvalidAddress(source.to_string()));
        }
        Ok(Address(format!("0x{}", digits.to_lowercase())))
    }

    /// The null address: 40 zero digits.
    pub fn null() -> Self {
        Address(NULL_ADDRESS.to_string())
    }

    pub fn is_null(&self) -> bool {
        self.0 == NULL_ADDRESS
    }

    /// Canonical form including the `0x` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits without the `0x` prefix.
    pub fn bare_hex(&self) -> &str {
        &self.0[2..]
    }
}

impl Default for Address {
    fn default() -> Self {
        Address::null()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Address {
    type Error = ZnsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Address::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> String {
        address.0
    }
}

/// A 32-byte node identifier, the universal key for hierarchical names.
///
/// Two domains map to the same node exactly when they denote the same
/// dotted-label path. The zero node is the root of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Node(String);

impl Node {
    /// Parse a node identifier from hex, normalizing case and prefix.
    pub fn parse(source: &str) -> Result<Self, ZnsError> {
        let digits = strip_prefix(source);
        if digits.len() != 64 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ZnsError::InvalidNode(source.to_string()));
        }
        Ok(Node(format!("0x{}", digits.to_lowercase())))
    }

    /// Wrap a raw 32-byte identifier.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Node(format!("0x{}", hex::encode(bytes)))
    }

    /// The zero node, root of the hierarchy.
    pub fn root() -> Self {
        Node(NULL_NODE.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == NULL_NODE
    }

    /// Canonical form including the `0x` prefix.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digits without the `0x` prefix.
    pub fn bare_hex(&self) -> &str {
        &self.0[2..]
    }

    /// Raw 32-byte form.
    pub fn to_bytes(&self) -> [u8; 32] {
        let raw = hex::decode(self.bare_hex()).expect("canonical node hex");
        let mut out = [0u8; 32];
        out.copy_from_slice(&raw);
        out
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::root()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Node {
    type Error = ZnsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Node::parse(&value)
    }
}

impl From<Node> for String {
    fn from(node: Node) -> String {
        node.0
    }
}

/// Whether a state transition changed anything.
///
/// The contracts accept every transaction and silently leave state untouched
/// when a check fails, so an unchanged read is the rejection signal, never an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Applied,
    Unchanged,
}

impl Effect {
    pub fn is_applied(self) -> bool {
        matches!(self, Effect::Applied)
    }
}

fn strip_prefix(source: &str) -> &str {
    source
        .strip_prefix("0x")
        .or_else(|| source.strip_prefix("0X"))
        .unwrap_or(source)
}
