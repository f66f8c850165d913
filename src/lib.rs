//! # openbook-lister
//!
//! Parameters and cost estimate for listing a new market on an OpenBook
//! (Serum-style) order book on Solana.
//!
//! This library provides:
//! - Suggested lot size and tick size from a live reference price
//! - Conversion of human lot/tick sizes into on-chain `base_lot_size` /
//!   `quote_lot_size` units, with typed validation errors
//! - Byte sizes of the event queue, request queue and order book accounts,
//!   and the rent-exempt deposit they need
//! - A listing orchestrator that guards against stale price responses and
//!   runs a single submission attempt at a time
//!
//! ## Features
//!
//! - **Decimal Precision**: All rounding is done in base-10 with `rust_decimal`
//! - **Pluggable Services**: Price oracle, RPC, wallet and transaction
//!   submission sit behind traits
//! - **Proper Error Handling**: No panics, comprehensive error types
//!

// Public modules
pub mod client;
pub mod config;
pub mod deposit;
pub mod error;
pub mod listing;
pub mod params;
pub mod traits;
pub mod types;

// Internal modules
mod http;

// Re-export commonly used types
pub use self::config::{ListingConfig, VenueProgram};
pub use error::{Error, Result};
pub use types::{
    DepositEstimate, DepositQuote, DerivedSuggestion, IntegerUnits, ListingRequest, LotSizes,
    ProgramId, ReferencePrice, TokenAddress, TokenDescriptor, VenueAddress, WalletAddress,
};

// Re-export clients
pub use client::{JupiterPriceClient, RpcClient};

// Re-export core operations
pub use deposit::{DepositEstimator, StructuralConstants};
pub use listing::{ListingOrchestrator, SubmissionState};
pub use params::{
    derive_suggestion, round_to_one_significant_digit, to_integer_units, InputInvalid,
};

// Re-export collaborator traits
pub use traits::{
    ListingSubmitter, MintResolver, PriceOracle, RentQuoter, SubmissionError, WalletSigner,
};
