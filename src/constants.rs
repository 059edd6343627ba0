// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

/// The null address: 20 zero bytes, used as the "no resolver" / "no
/// recipient" marker throughout the registry
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// The null node: 32 zero bytes, the root of the name hierarchy
pub const NULL_NODE: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000000";

/// Chain id packed into the default transaction version
pub const DEFAULT_CHAIN_ID: u16 = 1;

/// Message version packed into the default transaction version
pub const DEFAULT_MSG_VERSION: u16 = 1;

/// Default gas price in Li
pub const DEFAULT_GAS_PRICE: u128 = 1_000_000_000;

/// Default gas limit for registry and resolver transactions
pub const DEFAULT_GAS_LIMIT: u64 = 25_000;

/// Currencies whose `crypto.<TICKER>.address` records participate in the
/// structured resolution view
pub const DEFAULT_CURRENCIES: &[&str] = &["ada", "btc", "eos", "eth", "xlm", "xrp", "zil"];

/// Reserved construction parameter carrying the interpreter version
pub const SCILLA_VERSION_PARAM: &str = "_scilla_version";

/// Interpreter version sent when the caller does not override it
pub const DEFAULT_SCILLA_VERSION: u32 = 0;
