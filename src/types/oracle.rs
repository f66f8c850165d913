use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::serde_helpers::lenient_decimal;

/// Response from the price API `/price` endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceResponse {
    #[serde(default)]
    pub data: Option<HashMap<String, TokenPrice>>,
    #[serde(default, rename = "timeTaken")]
    pub time_taken: Option<f64>,
}

impl PriceResponse {
    /// Price of `id` if the API returned one
    pub fn price_of(&self, id: &str) -> Option<Decimal> {
        self.data.as_ref()?.get(id)?.price
    }
}

/// Price entry for a single token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPrice {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub mint_symbol: Option<String>,
    #[serde(default)]
    pub vs_token: Option<String>,
    #[serde(default)]
    pub vs_token_symbol: Option<String>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price: Option<Decimal>,
}
