// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Typed-argument marshalling for the contract execution model

pub mod params;
pub mod value;

pub use params::{ContractData, ContractInfo, ParamDef, TransitionDef};
pub use value::{decode_assoc, decode_bool, encode, normalize, WireValue};
