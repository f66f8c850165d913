use async_trait::async_trait;
use tracing::warn;

use crate::config::DEFAULT_PRICE_API_URL;
use crate::error::Result;
use crate::http::HttpClient;
use crate::traits::PriceOracle;
use crate::types::{PriceResponse, ReferencePrice, TokenAddress};

/// Client for the Jupiter price API
///
/// Prices are quoted in units of the `vsToken` per one unit of the requested
/// token, e.g. 100 USDC per SOL.
pub struct JupiterPriceClient {
    http_client: HttpClient,
}

impl JupiterPriceClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `host` - The base URL for the API (e.g., "https://price.jup.ag/v4")
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(host),
        }
    }

    /// Fetch the raw price response for `base` quoted in `quote`
    pub async fn get_price(&self, base: &TokenAddress, quote: &TokenAddress) -> Result<PriceResponse> {
        self.http_client
            .get(
                "/price",
                &[("ids", base.as_str()), ("vsToken", quote.as_str())],
            )
            .await
    }
}

impl Default for JupiterPriceClient {
    fn default() -> Self {
        Self::new(DEFAULT_PRICE_API_URL)
    }
}

#[async_trait]
impl PriceOracle for JupiterPriceClient {
    async fn reference_price(
        &self,
        base: &TokenAddress,
        quote: &TokenAddress,
    ) -> Option<ReferencePrice> {
        match self.get_price(base, quote).await {
            Ok(response) => response
                .price_of(base.as_str())
                .and_then(ReferencePrice::new),
            Err(e) => {
                warn!(%base, %quote, error = %e, "price lookup failed");
                None
            }
        }
    }
}
