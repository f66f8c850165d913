use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU64;

use super::primitives::{ProgramId, TokenAddress};
use super::token::smallest_unit;

/// Lamports per SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Suggested lot and tick size derived from a reference price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedSuggestion {
    /// Minimum order size, in base-token units
    pub lot_size: Decimal,
    /// Minimum price increment, in quote-token units
    pub tick_size: Decimal,
}

/// Integer lot sizes as shown to the user; zero marks an invalid combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerUnits {
    pub base_lot_units: u64,
    pub quote_lot_units: u64,
}

impl IntegerUnits {
    pub fn is_valid(&self) -> bool {
        self.base_lot_units > 0 && self.quote_lot_units > 0
    }

    /// Typed view of a valid combination
    pub fn lot_sizes(&self) -> Option<LotSizes> {
        Some(LotSizes {
            base_lot_size: NonZeroU64::new(self.base_lot_units)?,
            quote_lot_size: NonZeroU64::new(self.quote_lot_units)?,
        })
    }
}

impl From<LotSizes> for IntegerUnits {
    fn from(sizes: LotSizes) -> Self {
        Self {
            base_lot_units: sizes.base_lot_size.get(),
            quote_lot_units: sizes.quote_lot_size.get(),
        }
    }
}

/// Market lot sizes in on-chain units, both strictly positive
///
/// `base_lot_size` is the number of base-token atoms in one lot.
/// `quote_lot_size` is the number of quote-token atoms one lot moves per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LotSizes {
    pub base_lot_size: NonZeroU64,
    pub quote_lot_size: NonZeroU64,
}

impl LotSizes {
    /// Human lot size, `base_lot_size * 10^-base_decimals`
    pub fn lot_size(&self, base_decimals: u8) -> Decimal {
        (Decimal::from(self.base_lot_size.get()) * smallest_unit(base_decimals)).normalize()
    }

    /// Human tick size, `quote_lot_size * 10^-quote_decimals / lot_size`
    ///
    /// Returns `None` if the quotient cannot be represented.
    pub fn tick_size(&self, base_decimals: u8, quote_decimals: u8) -> Option<Decimal> {
        let quote = Decimal::from(self.quote_lot_size.get()) * smallest_unit(quote_decimals);
        quote
            .checked_div(self.lot_size(base_decimals))
            .map(|tick| tick.normalize())
    }
}

/// Everything the submission collaborator needs to create the market
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRequest {
    pub base_mint: TokenAddress,
    pub quote_mint: TokenAddress,
    pub base_lot_size: NonZeroU64,
    pub quote_lot_size: NonZeroU64,
    pub program_id: ProgramId,
}

/// Rent-exemption deposit for the market's accounts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositQuote {
    pub account_bytes: u64,
    pub lamports: u64,
    pub quoted_at: DateTime<Utc>,
}

impl DepositQuote {
    pub fn new(account_bytes: u64, lamports: u64) -> Self {
        Self {
            account_bytes,
            lamports,
            quoted_at: Utc::now(),
        }
    }

    /// Deposit in SOL
    pub fn sol(&self) -> Decimal {
        (Decimal::from(self.lamports) / Decimal::from(LAMPORTS_PER_SOL)).normalize()
    }
}

impl fmt::Display for DepositQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} SOL", self.sol())
    }
}

/// Displayed deposit estimate; stays `Loading` while the quote is unknown
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DepositEstimate {
    #[default]
    Loading,
    Ready(DepositQuote),
}

impl DepositEstimate {
    pub fn quote(&self) -> Option<&DepositQuote> {
        match self {
            DepositEstimate::Loading => None,
            DepositEstimate::Ready(quote) => Some(quote),
        }
    }
}

impl fmt::Display for DepositEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DepositEstimate::Loading => f.write_str("Loading"),
            DepositEstimate::Ready(quote) => quote.fmt(f),
        }
    }
}
