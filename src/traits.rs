//! Seams to the services a listing depends on.
//!
//! The listing flow only talks to the outside world through these traits, so
//! HTTP clients, wallets and transaction builders can be swapped for in-memory
//! fakes in tests.

use async_trait::async_trait;
use std::fmt;

use crate::error::{Error, Result};
use crate::types::{
    ListingRequest, ReferencePrice, TokenAddress, TokenDescriptor, VenueAddress, WalletAddress,
};

/// Source of reference prices for a token pair
#[async_trait]
pub trait PriceOracle: Send + Sync {
    /// Price of one `base` token in `quote` tokens.
    ///
    /// Not-found and transport errors are both reported as `None`.
    async fn reference_price(
        &self,
        base: &TokenAddress,
        quote: &TokenAddress,
    ) -> Option<ReferencePrice>;
}

/// Ledger query for the rent-exempt balance of an account of a given size
#[async_trait]
pub trait RentQuoter: Send + Sync {
    /// Minimum lamports an account of `data_len` bytes must hold
    async fn minimum_balance_for_rent_exemption(&self, data_len: u64) -> Result<u64>;
}

/// Resolves a mint address into a token descriptor
#[async_trait]
pub trait MintResolver: Send + Sync {
    async fn resolve_mint(&self, address: &TokenAddress) -> Result<TokenDescriptor>;
}

/// Connected wallet that signs and pays for the listing transactions
pub trait WalletSigner: Send + Sync {
    fn is_connected(&self) -> bool;

    fn owner(&self) -> &WalletAddress;
}

/// Builds, signs and broadcasts the transactions that create a market
#[async_trait]
pub trait ListingSubmitter: Send + Sync {
    async fn list_market(
        &self,
        request: &ListingRequest,
        wallet: &dyn WalletSigner,
    ) -> std::result::Result<VenueAddress, SubmissionError>;
}

/// Failure reported by a [`ListingSubmitter`], shown to the user as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionError {
    message: String,
}

impl SubmissionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SubmissionError {}

impl From<Error> for SubmissionError {
    fn from(err: Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<SubmissionError> for Error {
    fn from(err: SubmissionError) -> Self {
        Error::SubmissionFailed(err.message)
    }
}
