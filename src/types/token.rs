use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::primitives::TokenAddress;
use crate::error::{Error, Result};

/// Largest decimal precision whose smallest unit (`10^-decimals`) fits a `Decimal`
pub const MAX_TOKEN_DECIMALS: u8 = 28;

/// A resolved token mint and its decimal precision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDescriptor {
    address: TokenAddress,
    decimals: u8,
}

impl TokenDescriptor {
    /// Create a descriptor, rejecting precisions that cannot be represented exactly
    pub fn new(address: impl Into<TokenAddress>, decimals: u8) -> Result<Self> {
        if decimals > MAX_TOKEN_DECIMALS {
            return Err(Error::InvalidParameter(format!(
                "token decimals {} exceed the supported maximum of {}",
                decimals, MAX_TOKEN_DECIMALS
            )));
        }
        Ok(Self {
            address: address.into(),
            decimals,
        })
    }

    pub fn address(&self) -> &TokenAddress {
        &self.address
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Value of one indivisible unit of this token, `10^-decimals`
    pub fn smallest_unit(&self) -> Decimal {
        smallest_unit(self.decimals)
    }
}

/// `10^-decimals`, saturating at the finest `Decimal` scale
pub(crate) fn smallest_unit(decimals: u8) -> Decimal {
    Decimal::new(1, u32::from(decimals.min(MAX_TOKEN_DECIMALS)))
}

/// `10^exp` for `exp <= 28`
pub(crate) fn pow10(exp: u8) -> Decimal {
    Decimal::from_i128_with_scale(10i128.pow(u32::from(exp.min(MAX_TOKEN_DECIMALS))), 0)
}

/// Point-in-time price hint: quote-token units per one base-token unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePrice {
    value: Decimal,
    observed_at: DateTime<Utc>,
}

impl ReferencePrice {
    /// Returns `None` unless `value` is strictly positive
    pub fn new(value: Decimal) -> Option<Self> {
        Self::observed(value, Utc::now())
    }

    pub fn observed(value: Decimal, observed_at: DateTime<Utc>) -> Option<Self> {
        if value > Decimal::ZERO {
            Some(Self { value, observed_at })
        } else {
            None
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }
}
