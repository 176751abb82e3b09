//! Transaction payloads in the node's JSON wire shape.

use crate::types::AccountAddress;
use serde::{Deserialize, Serialize};

/// A transaction body.
///
/// Serialized with a `type` discriminator:
///
/// ```json
/// {
///   "type": "script_function_payload",
///   "function": "0x1::Coin::transfer",
///   "type_arguments": ["0x1::TestCoin::TestCoin"],
///   "arguments": ["0x2", "100"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransactionPayload {
    /// Call of an on-chain entry function.
    ScriptFunctionPayload(ScriptFunctionPayload),
    /// Publication of one or more compiled modules.
    ModuleBundlePayload(ModuleBundlePayload),
}

impl TransactionPayload {
    /// Returns the script function call, if this payload is one.
    pub fn as_script_function(&self) -> Option<&ScriptFunctionPayload> {
        match self {
            Self::ScriptFunctionPayload(p) => Some(p),
            Self::ModuleBundlePayload(_) => None,
        }
    }
}

impl From<ScriptFunctionPayload> for TransactionPayload {
    fn from(payload: ScriptFunctionPayload) -> Self {
        Self::ScriptFunctionPayload(payload)
    }
}

impl From<ModuleBundlePayload> for TransactionPayload {
    fn from(payload: ModuleBundlePayload) -> Self {
        Self::ModuleBundlePayload(payload)
    }
}

/// Entry function call with string-encoded arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFunctionPayload {
    /// `0x<address>::<Module>::<entry>`
    pub function: String,
    /// Type-tag strings, passed through unvalidated.
    pub type_arguments: Vec<String>,
    /// Decimal or hex string scalars, in declaration order.
    pub arguments: Vec<String>,
}

impl ScriptFunctionPayload {
    /// Builds a call of `module_address::module::function`.
    pub fn new(
        module_address: AccountAddress,
        module: &str,
        function: &str,
        type_arguments: Vec<String>,
        arguments: Vec<String>,
    ) -> Self {
        Self {
            function: format!("{}::{module}::{function}", module_address.to_hex()),
            type_arguments,
            arguments,
        }
    }
}

/// A batch of compiled modules to publish under the sender's address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBundlePayload {
    /// Module bytecode entries.
    pub modules: Vec<ModuleBytecode>,
}

impl ModuleBundlePayload {
    /// Wraps a single module given as hex bytecode (with or without `0x`).
    pub fn single(bytecode_hex: &str) -> Self {
        let bytecode = bytecode_hex.strip_prefix("0x").unwrap_or(bytecode_hex);
        Self {
            modules: vec![ModuleBytecode {
                bytecode: format!("0x{bytecode}"),
            }],
        }
    }
}

/// One compiled module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleBytecode {
    /// `0x`-prefixed hex bytecode.
    pub bytecode: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_script_function_wire_shape() {
        let payload: TransactionPayload = ScriptFunctionPayload::new(
            AccountAddress::ONE,
            "Coin",
            "transfer",
            vec!["0x1::TestCoin::TestCoin".into()],
            vec!["0x2".into(), "100".into()],
        )
        .into();

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "script_function_payload",
                "function": format!("{}::Coin::transfer", AccountAddress::ONE.to_hex()),
                "type_arguments": ["0x1::TestCoin::TestCoin"],
                "arguments": ["0x2", "100"],
            })
        );
    }

    #[test]
    fn test_module_bundle_wire_shape() {
        let payload: TransactionPayload = ModuleBundlePayload::single("a11ceb0b").into();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "type": "module_bundle_payload",
                "modules": [{"bytecode": "0xa11ceb0b"}],
            })
        );
        assert!(payload.as_script_function().is_none());
    }

    #[test]
    fn test_module_bundle_keeps_existing_prefix() {
        let bundle = ModuleBundlePayload::single("0xa11ceb0b");
        assert_eq!(bundle.modules[0].bytecode, "0xa11ceb0b");
    }

    #[test]
    fn test_deserialize_tagged() {
        let payload: TransactionPayload = serde_json::from_value(json!({
            "type": "script_function_payload",
            "function": "0x1::Coin::register",
            "type_arguments": ["0xabc::Foo::Foo"],
            "arguments": [],
        }))
        .unwrap();
        let call = payload.as_script_function().unwrap();
        assert_eq!(call.function, "0x1::Coin::register");
        assert!(call.arguments.is_empty());
    }
}
