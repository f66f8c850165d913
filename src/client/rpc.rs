use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::traits::{MintResolver, RentQuoter};
use crate::types::{
    AccountInfo, MintInfo, ParsedAccountData, RpcRequest, RpcResponse, TokenAddress,
    TokenDescriptor, WithContext,
};

/// Minimal Solana JSON-RPC client
///
/// Covers the two ledger reads a listing needs: the rent-exempt balance for a
/// given account size, and the decimals of a token mint.
pub struct RpcClient {
    http_client: HttpClient,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RpcClient
    ///
    /// # Arguments
    /// * `url` - The JSON-RPC endpoint (e.g., "https://api.mainnet-beta.solana.com")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(url),
            next_id: AtomicU64::new(1),
        }
    }

    fn request<P: Serialize>(&self, method: &'static str, params: P) -> RpcRequest<P> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        RpcRequest::new(id, method, params)
    }

    async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        params: P,
    ) -> Result<T> {
        let request = self.request(method, params);
        debug!(method, id = request.id, "rpc call");
        let response: RpcResponse<T> = self.http_client.post("", &request).await?;
        response.into_result()
    }

    /// Lamports needed to make an account of `data_len` bytes rent exempt
    pub async fn get_minimum_balance_for_rent_exemption(&self, data_len: u64) -> Result<u64> {
        self.call("getMinimumBalanceForRentExemption", [data_len])
            .await
    }

    /// Fetch an account with `jsonParsed` encoding, `None` if it does not exist
    pub async fn get_parsed_account(&self, address: &str) -> Result<Option<AccountInfo>> {
        let params = serde_json::json!([address, { "encoding": "jsonParsed" }]);
        let account: WithContext<Option<AccountInfo>> = self.call("getAccountInfo", params).await?;
        Ok(account.value)
    }
}

/// Read mint decimals out of a parsed account, rejecting anything but an SPL mint
pub(crate) fn mint_descriptor(
    address: &TokenAddress,
    account: Option<AccountInfo>,
) -> Result<TokenDescriptor> {
    let account = account.ok_or_else(|| Error::InvalidMint(address.to_string()))?;
    let data: ParsedAccountData = serde_json::from_value(account.data)
        .map_err(|_| Error::InvalidMint(address.to_string()))?;
    if data.parsed.kind != "mint" {
        return Err(Error::InvalidMint(address.to_string()));
    }
    let info: MintInfo = serde_json::from_value(data.parsed.info)?;
    TokenDescriptor::new(address.clone(), info.decimals)
}

#[async_trait]
impl RentQuoter for RpcClient {
    async fn minimum_balance_for_rent_exemption(&self, data_len: u64) -> Result<u64> {
        self.get_minimum_balance_for_rent_exemption(data_len).await
    }
}

#[async_trait]
impl MintResolver for RpcClient {
    async fn resolve_mint(&self, address: &TokenAddress) -> Result<TokenDescriptor> {
        let account = self.get_parsed_account(address.as_str()).await?;
        mint_descriptor(address, account)
    }
}
