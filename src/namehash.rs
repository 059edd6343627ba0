// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Canonical name identifiers via an iterated hash chain

use regex::Regex;
use sha2::{Digest, Sha256};

use crate::error::ZnsError;
use crate::types::Node;

/// Compute the canonical node for a dotted-label domain.
///
/// Labels fold right to left over `sha256(acc || sha256(label))` starting
/// from the 32-byte zero root, so a child's node is a deterministic,
/// collision-resistant function of its parent's node and its own label.
/// An input that already looks like a hex node identifier is normalized and
/// passed through unchanged; the empty domain is the root.
pub fn namehash(domain: &str) -> Result<Node, ZnsError> {
    let hex_literal = Regex::new(r"^(0[xX])?[0-9a-fA-F]+$").expect("invalid regex");
    if hex_literal.is_match(domain) {
        return Node::parse(domain);
    }

    let mut node = [0u8; 32];
    if !domain.is_empty() {
        for label in domain.split('.').rev() {
            node = combine_bytes(&node, label);
        }
    }
    Ok(Node::from_bytes(node))
}

/// One step of the hash chain: the node of `label` directly under `parent`.
///
/// Agrees with [`namehash`] on dotted paths, so assigning `label` under a
/// parent yields the same child node a direct hash of the full domain would.
pub fn combine(parent: &Node, label: &str) -> Node {
    Node::from_bytes(combine_bytes(&parent.to_bytes(), label))
}

fn combine_bytes(parent: &[u8; 32], label: &str) -> [u8; 32] {
    let label_hash = sha256(label.as_bytes());
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(parent);
    buf[32..].copy_from_slice(&label_hash);
    sha256(&buf)
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = Sha256::digest(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
