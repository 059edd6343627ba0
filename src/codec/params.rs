// Copyright 2025 ZNS Contributors
// Licensed under GPL-3.0

//! Contract metadata and schema-driven argument building

use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{DEFAULT_SCILLA_VERSION, SCILLA_VERSION_PARAM};
use crate::error::{Result, ZnsError};

use super::value::{encode, WireValue};

/// One declared parameter slot.
#[derive(Debug, Clone, Deserialize)]
pub struct ParamDef {
    pub vname: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

/// One callable transition and its ordered parameter list.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionDef {
    pub vname: String,
    pub params: Vec<ParamDef>,
}

/// Immutable contract schema: the ordered construction parameters and the
/// parameter list of every callable transition. Loaded once per contract
/// kind and shared read-only by every model instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractInfo {
    pub vname: String,
    pub params: Vec<ParamDef>,
    pub transitions: Vec<TransitionDef>,
}

#[derive(Deserialize)]
struct MetadataFile {
    contract_info: ContractInfo,
}

impl ContractInfo {
    /// The registry contract schema.
    pub fn registry() -> &'static ContractInfo {
        static INFO: OnceLock<ContractInfo> = OnceLock::new();
        INFO.get_or_init(|| parse_metadata(include_str!("../../contracts/registry.json")))
    }

    /// The resolver contract schema.
    pub fn resolver() -> &'static ContractInfo {
        static INFO: OnceLock<ContractInfo> = OnceLock::new();
        INFO.get_or_init(|| parse_metadata(include_str!("../../contracts/resolver.json")))
    }

    fn transition(&self, name: &str) -> Result<&TransitionDef> {
        self.transitions
            .iter()
            .find(|t| t.vname == name)
            .ok_or_else(|| ZnsError::UnknownTransition(name.to_string()))
    }
}

fn parse_metadata(raw: &str) -> ContractInfo {
    let file: MetadataFile =
        serde_json::from_str(raw).expect("embedded contract metadata is valid");
    file.contract_info
}

/// Argument builders bound to one contract schema.
///
/// Argument order is positional and follows schema declaration order, not
/// the order of the supplied values.
#[derive(Debug, Clone, Copy)]
pub struct ContractData {
    info: &'static ContractInfo,
}

impl ContractData {
    pub fn new(info: &'static ContractInfo) -> Self {
        ContractData { info }
    }

    /// Builders for the registry contract.
    pub fn registry() -> Self {
        ContractData::new(ContractInfo::registry())
    }

    /// Builders for the resolver contract.
    pub fn resolver() -> Self {
        ContractData::new(ContractInfo::resolver())
    }

    /// Construction arguments in schema order, with the interpreter version
    /// prepended. The version defaults unless the caller supplies one.
    pub fn init(&self, values: &Value) -> Result<Vec<WireValue>> {
        let supplied = as_object(values)?;
        let version = supplied
            .get(SCILLA_VERSION_PARAM)
            .cloned()
            .unwrap_or_else(|| json!(DEFAULT_SCILLA_VERSION));

        let mut args = vec![WireValue {
            vname: SCILLA_VERSION_PARAM.to_string(),
            param_type: "Uint32".to_string(),
            value: encode("Uint32", &version),
        }];
        args.extend(build(&self.info.params, supplied)?);
        Ok(args)
    }

    /// Call arguments for `transition` in schema order.
    pub fn call(&self, transition: &str, values: &Value) -> Result<Vec<WireValue>> {
        let t = self.info.transition(transition)?;
        build(&t.params, as_object(values)?)
    }
}

fn as_object(values: &Value) -> Result<&serde_json::Map<String, Value>> {
    values
        .as_object()
        .ok_or_else(|| ZnsError::Configuration("argument values must be an object".to_string()))
}

fn build(params: &[ParamDef], values: &serde_json::Map<String, Value>) -> Result<Vec<WireValue>> {
    params
        .iter()
        .map(|p| {
            let raw = values
                .get(&p.vname)
                .ok_or_else(|| ZnsError::MissingParameter(p.vname.clone()))?;
            Ok(WireValue {
                vname: p.vname.clone(),
                param_type: p.param_type.clone(),
                value: encode(&p.param_type, raw),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_prepends_interpreter_version() {
        let args = ContractData::registry()
            .init(&json!({
                "initialOwner": "0xD90F2E538CE0DF89C8273CAD3B63EC44A3C4ED82",
                "rootNode": format!("0x{}", "0".repeat(64)),
            }))
            .unwrap();

        assert_eq!(args[0].vname, SCILLA_VERSION_PARAM);
        assert_eq!(args[0].value, json!("0"));
        assert_eq!(args[1].vname, "initialOwner");
        // addresses normalize to lowercase on the way out
        assert_eq!(args[1].value, json!("0xd90f2e538ce0df89c8273cad3b63ec44a3c4ed82"));
        assert_eq!(args[2].vname, "rootNode");
    }

    #[test]
    fn test_call_follows_schema_order() {
        // supplied in reverse order; schema order wins
        let args = ContractData::registry()
            .call(
                "approve",
                &json!({
                    "address": "0x2f4f79ef6abfc0368f5a7e2c2df82e1afdfe7204",
                    "node": format!("0x{}", "0".repeat(64)),
                }),
            )
            .unwrap();

        assert_eq!(args[0].vname, "node");
        assert_eq!(args[1].vname, "address");
    }

    #[test]
    fn test_call_encodes_bool_params() {
        let args = ContractData::registry()
            .call(
                "approveFor",
                &json!({
                    "address": "0x2f4f79ef6abfc0368f5a7e2c2df82e1afdfe7204",
                    "isApproved": true,
                }),
            )
            .unwrap();

        assert_eq!(args[1].vname, "isApproved");
        assert_eq!(
            args[1].value,
            json!({"constructor": "True", "argtypes": [], "arguments": []})
        );
    }

    #[test]
    fn test_missing_parameter_is_an_error() {
        let err = ContractData::registry()
            .call("approve", &json!({"node": format!("0x{}", "0".repeat(64))}))
            .unwrap_err();
        assert!(matches!(err, ZnsError::MissingParameter(name) if name == "address"));
    }

    #[test]
    fn test_unknown_transition_is_an_error() {
        let err = ContractData::registry()
            .call("mint", &json!({}))
            .unwrap_err();
        assert!(matches!(err, ZnsError::UnknownTransition(_)));
    }

    #[test]
    fn test_resolver_schema_declares_record_ops() {
        let args = ContractData::resolver()
            .call("set", &json!({"key": "test", "value": "0x7357"}))
            .unwrap();
        assert_eq!(args[0].vname, "key");
        assert_eq!(args[1].vname, "value");
        assert_eq!(args[1].value, json!("0x7357"));
    }
}
