//! Runtime configuration: endpoints, DEX program registry and account layout.
//!
//! Defaults target Solana mainnet. Any field can be overridden through
//! environment variables prefixed with `LISTING__`, using `__` as the nesting
//! separator, e.g. `LISTING__RPC_URL` or `LISTING__LAYOUT__PRICE_LEVELS`.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::deposit::StructuralConstants;
use crate::error::{Error, Result};
use crate::types::ProgramId;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_PRICE_API_URL: &str = "https://price.jup.ag/v4";
pub const OPENBOOK_PROGRAM_ID: &str = "srmqPvymJeFKQ4zGQed1GFppgkRHL9kaELCbyksJtPX";
pub const DEFAULT_LOT_SIZE: &str = "1";
pub const DEFAULT_TICK_SIZE: &str = "0.01";

/// A DEX program that markets can be listed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueProgram {
    pub program_id: ProgramId,
    #[serde(default)]
    pub deprecated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Solana JSON-RPC endpoint
    pub rpc_url: Url,
    /// Price API base URL
    pub price_api_url: Url,
    /// Known DEX programs, in order of preference
    pub venue_programs: Vec<VenueProgram>,
    /// Queue and book capacities for new markets
    pub layout: StructuralConstants,
    /// Lot size shown before any suggestion arrives
    pub default_lot_size: String,
    /// Tick size shown before any suggestion arrives
    pub default_tick_size: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL is valid"),
            price_api_url: Url::parse(DEFAULT_PRICE_API_URL)
                .expect("default price API URL is valid"),
            venue_programs: vec![VenueProgram {
                program_id: ProgramId::new(OPENBOOK_PROGRAM_ID),
                deprecated: false,
            }],
            layout: StructuralConstants::default(),
            default_lot_size: DEFAULT_LOT_SIZE.to_string(),
            default_tick_size: DEFAULT_TICK_SIZE.to_string(),
        }
    }
}

impl ListingConfig {
    /// Defaults overlaid with `LISTING__*` environment variables
    pub fn load() -> Result<Self> {
        let cfg = ::config::Config::builder()
            .add_source(::config::Config::try_from(&Self::default())?)
            .add_source(
                ::config::Environment::with_prefix("LISTING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let loaded: Self = cfg.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        let layout = &self.layout;
        if layout.price_levels == 0 || layout.event_queue_depth == 0 || layout.request_queue_depth == 0
        {
            return Err(Error::Config(
                "layout capacities must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// First configured program that is not deprecated
    pub fn active_program(&self) -> Option<&ProgramId> {
        self.venue_programs
            .iter()
            .find(|program| !program.deprecated)
            .map(|program| &program.program_id)
    }
}
