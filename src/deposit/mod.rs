//! Rent deposit estimate for a new market's accounts.
//!
//! The estimator owns the account size formulas; pricing storage is left to
//! the ledger through [`RentQuoter`].

mod layout;

pub use layout::{
    event_queue_size, orderbook_size, request_queue_size, AccountSizes, StructuralConstants,
    ACCOUNT_PADDING, EVENT_QUEUE_HEADER_SIZE, EVENT_SIZE, ORDERBOOK_HEADER_SIZE,
    ORDERBOOK_NODE_SIZE, REQUEST_QUEUE_HEADER_SIZE, REQUEST_SIZE,
};

use tracing::debug;

use crate::error::Result;
use crate::traits::RentQuoter;
use crate::types::DepositQuote;

/// Computes account sizes and asks the ledger for the matching deposit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DepositEstimator {
    constants: StructuralConstants,
}

impl DepositEstimator {
    pub fn new(constants: StructuralConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &StructuralConstants {
        &self.constants
    }

    pub fn account_sizes(&self) -> AccountSizes {
        AccountSizes::for_constants(&self.constants)
    }

    /// Event queue + request queue + bids + asks
    pub fn total_bytes(&self) -> u64 {
        self.account_sizes().total()
    }

    /// Quote the rent-exempt deposit for all market accounts
    pub async fn estimate(&self, quoter: &dyn RentQuoter) -> Result<DepositQuote> {
        let bytes = self.total_bytes();
        let lamports = quoter.minimum_balance_for_rent_exemption(bytes).await?;
        debug!(bytes, lamports, "rent deposit quoted");
        Ok(DepositQuote::new(bytes, lamports))
    }
}
