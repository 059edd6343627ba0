// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Error types for ZNS client operations

use thiserror::Error;

/// Errors surfaced by ZNS client operations.
///
/// Authorization and precondition failures on the ledger are deliberately
/// absent: the contracts reject those silently, the transaction still
/// confirms, and the only signal is an unchanged state on the next read.
#[derive(Error, Debug)]
pub enum ZnsError {
    /// Invalid local configuration, caught before any ledger interaction
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An expected field was missing from a contract state read
    #[error("unknown contract field {0}")]
    UnknownField(String),

    /// A submitted transaction did not confirm
    #[error("{0}")]
    Unconfirmed(String),

    /// A declared schema parameter was not supplied
    #[error("missing value for parameter {0}")]
    MissingParameter(String),

    /// The contract metadata does not declare this transition
    #[error("unknown transition {0}")]
    UnknownTransition(String),

    /// Malformed account or contract address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed node identifier
    #[error("invalid node: {0}")]
    InvalidNode(String),

    /// A state read returned a value the codec cannot interpret
    #[error("malformed state value in {0}")]
    MalformedState(String),

    /// Failure inside the ledger collaborator
    #[error("ledger error: {0}")]
    Ledger(#[from] anyhow::Error),
}

/// Common result type for ZNS operations
pub type Result<T> = std::result::Result<T, ZnsError>;
