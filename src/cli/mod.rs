// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! CLI command implementations

pub mod names;
pub mod records;
