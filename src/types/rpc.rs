use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest<P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: P,
}

impl<P: Serialize> RpcRequest<P> {
    pub fn new(id: u64, method: &'static str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl<T> RpcResponse<T> {
    /// Unwrap the result, turning an error object into [`Error::Rpc`]
    pub fn into_result(self) -> Result<T> {
        if let Some(err) = self.error {
            return Err(Error::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        self.result
            .ok_or_else(|| Error::MissingField("result".to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Value wrapped with the slot it was read at
#[derive(Debug, Clone, Deserialize)]
pub struct WithContext<T> {
    pub value: T,
}

/// Account returned by `getAccountInfo` with `jsonParsed` encoding
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    pub owner: String,
    pub data: serde_json::Value,
}

/// Parsed account payload, e.g. `{"program": "spl-token", "parsed": {...}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccountData {
    pub program: String,
    pub parsed: ParsedAccount,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParsedAccount {
    #[serde(rename = "type")]
    pub kind: String,
    pub info: serde_json::Value,
}

/// Fields of a parsed SPL mint used here
#[derive(Debug, Clone, Deserialize)]
pub struct MintInfo {
    pub decimals: u8,
}
