use std::collections::HashMap;

use futures_util::future::{select, Either};
use futures_util::pin_mut;
use tracing::{debug, info, warn};

use super::state::SubmissionState;
use crate::config::ListingConfig;
use crate::deposit::DepositEstimator;
use crate::error::{Error, Result};
use crate::params::{derive_suggestion, parse_lot_sizes, to_integer_units, InputInvalid};
use crate::traits::{
    ListingSubmitter, MintResolver, PriceOracle, RentQuoter, SubmissionError, WalletSigner,
};
use crate::types::{
    DepositEstimate, DepositQuote, DerivedSuggestion, IntegerUnits, ListingRequest, LotSizes,
    ReferencePrice, TokenAddress, TokenDescriptor, VenueAddress,
};

/// Outstanding price lookup, tagged with the pair it was issued for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTicket {
    generation: u64,
    base: TokenDescriptor,
    quote: TokenDescriptor,
}

impl PriceTicket {
    pub fn base(&self) -> &TokenAddress {
        self.base.address()
    }

    pub fn quote(&self) -> &TokenAddress {
        self.quote.address()
    }
}

/// Outstanding deposit quote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositTicket {
    generation: u64,
}

/// The single in-flight listing attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    attempt: u64,
    request: ListingRequest,
}

impl SubmissionTicket {
    pub fn request(&self) -> &ListingRequest {
        &self.request
    }
}

/// Drives one market listing: token selection, parameter suggestion, deposit
/// estimate and the submission state machine.
///
/// Every change of the base or quote token bumps a generation counter. Price
/// and deposit results are applied only if they carry the current generation,
/// so a slow response for an earlier pair never overwrites a newer selection.
#[derive(Debug)]
pub struct ListingOrchestrator {
    config: ListingConfig,
    estimator: DepositEstimator,
    base: Option<TokenDescriptor>,
    quote: Option<TokenDescriptor>,
    generation: u64,
    pending_price: Option<u64>,
    lot_size_text: String,
    tick_size_text: String,
    suggestion: Option<DerivedSuggestion>,
    deposit: DepositEstimate,
    submission: SubmissionState,
    next_attempt: u64,
    in_flight: Option<u64>,
    listed: HashMap<(TokenAddress, TokenAddress), VenueAddress>,
}

impl ListingOrchestrator {
    pub fn new(config: ListingConfig) -> Self {
        Self {
            estimator: DepositEstimator::new(config.layout),
            lot_size_text: config.default_lot_size.clone(),
            tick_size_text: config.default_tick_size.clone(),
            config,
            base: None,
            quote: None,
            generation: 0,
            pending_price: None,
            suggestion: None,
            deposit: DepositEstimate::Loading,
            submission: SubmissionState::Idle,
            next_attempt: 1,
            in_flight: None,
            listed: HashMap::new(),
        }
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn base_token(&self) -> Option<&TokenDescriptor> {
        self.base.as_ref()
    }

    pub fn quote_token(&self) -> Option<&TokenDescriptor> {
        self.quote.as_ref()
    }

    pub fn lot_size_text(&self) -> &str {
        &self.lot_size_text
    }

    pub fn tick_size_text(&self) -> &str {
        &self.tick_size_text
    }

    /// Most recent suggestion for the current pair
    pub fn suggestion(&self) -> Option<&DerivedSuggestion> {
        self.suggestion.as_ref()
    }

    pub fn deposit(&self) -> &DepositEstimate {
        &self.deposit
    }

    pub fn submission(&self) -> &SubmissionState {
        &self.submission
    }

    /// True while a price lookup for the current pair is outstanding
    pub fn is_loading_suggestion(&self) -> bool {
        self.pending_price == Some(self.generation)
    }

    pub fn set_base_token(&mut self, token: Option<TokenDescriptor>) {
        if self.base != token {
            self.base = token;
            self.pair_changed();
        }
    }

    pub fn set_quote_token(&mut self, token: Option<TokenDescriptor>) {
        if self.quote != token {
            self.quote = token;
            self.pair_changed();
        }
    }

    fn pair_changed(&mut self) {
        self.generation += 1;
        self.suggestion = None;
        self.deposit = DepositEstimate::Loading;
        let listed = self.listed_venue().cloned();
        self.submission.reset_for_pair(listed.as_ref());
        debug!(
            generation = self.generation,
            base = ?self.base.as_ref().map(|t| t.address().as_str()),
            quote = ?self.quote.as_ref().map(|t| t.address().as_str()),
            "token pair changed"
        );
    }

    /// User override of the lot size field
    pub fn set_lot_size_text(&mut self, text: impl AsRef<str>) {
        self.lot_size_text = text.as_ref().trim().to_string();
    }

    /// User override of the tick size field
    pub fn set_tick_size_text(&mut self, text: impl AsRef<str>) {
        self.tick_size_text = text.as_ref().trim().to_string();
    }

    /// Start a price lookup; `None` until both tokens are resolved
    pub fn price_ticket(&mut self) -> Option<PriceTicket> {
        let ticket = PriceTicket {
            generation: self.generation,
            base: self.base.clone()?,
            quote: self.quote.clone()?,
        };
        self.pending_price = Some(self.generation);
        Some(ticket)
    }

    /// Apply a price lookup result. Returns false if the pair has changed since
    /// the ticket was issued and the result was dropped.
    pub fn apply_price(&mut self, ticket: &PriceTicket, price: Option<ReferencePrice>) -> bool {
        if !self.is_current(ticket) {
            debug!(
                base = %ticket.base(),
                quote = %ticket.quote(),
                "dropping price for superseded pair"
            );
            return false;
        }
        self.pending_price = None;

        match derive_suggestion(
            price.as_ref(),
            ticket.base.decimals(),
            ticket.quote.decimals(),
        ) {
            Some(suggestion) => {
                debug!(
                    lot_size = %suggestion.lot_size,
                    tick_size = %suggestion.tick_size,
                    "applying suggested parameters"
                );
                self.lot_size_text = suggestion.lot_size.to_string();
                self.tick_size_text = suggestion.tick_size.to_string();
                self.suggestion = Some(suggestion);
                if !self.integer_units().is_valid() {
                    warn!(
                        lot_size = %suggestion.lot_size,
                        tick_size = %suggestion.tick_size,
                        "suggested parameters do not map to whole token units"
                    );
                }
            }
            None => {
                warn!(
                    base = %ticket.base(),
                    quote = %ticket.quote(),
                    "no reference price, keeping current lot and tick size"
                );
            }
        }
        true
    }

    fn is_current(&self, ticket: &PriceTicket) -> bool {
        ticket.generation == self.generation
            && self.base.as_ref() == Some(&ticket.base)
            && self.quote.as_ref() == Some(&ticket.quote)
    }

    /// Start a deposit quote for the current selection
    pub fn deposit_ticket(&self) -> DepositTicket {
        DepositTicket {
            generation: self.generation,
        }
    }

    /// Apply a deposit quote. Failures leave the estimate in `Loading`.
    pub fn apply_deposit(&mut self, ticket: DepositTicket, quote: Result<DepositQuote>) -> bool {
        if ticket.generation != self.generation {
            debug!("dropping deposit quote for superseded pair");
            return false;
        }
        match quote {
            Ok(quote) => {
                info!(bytes = quote.account_bytes, estimate = %quote, "rent estimate ready");
                self.deposit = DepositEstimate::Ready(quote);
            }
            Err(e) => warn!(error = %e, "rent estimate unavailable"),
        }
        true
    }

    /// Refresh the suggestion and the deposit estimate concurrently.
    ///
    /// Each result is applied as soon as its lookup completes, so a slow rent
    /// quote never holds back the suggestion and vice versa.
    pub async fn refresh(&mut self, oracle: &dyn PriceOracle, quoter: &dyn RentQuoter) {
        let price_ticket = self.price_ticket();
        let deposit_ticket = self.deposit_ticket();
        let estimator = self.estimator;

        let price_fut = async {
            match &price_ticket {
                Some(ticket) => oracle.reference_price(ticket.base(), ticket.quote()).await,
                None => None,
            }
        };
        let deposit_fut = estimator.estimate(quoter);
        pin_mut!(price_fut, deposit_fut);

        match select(price_fut, deposit_fut).await {
            Either::Left((price, deposit_fut)) => {
                if let Some(ticket) = &price_ticket {
                    self.apply_price(ticket, price);
                }
                self.apply_deposit(deposit_ticket, deposit_fut.await);
            }
            Either::Right((quote, price_fut)) => {
                self.apply_deposit(deposit_ticket, quote);
                let price = price_fut.await;
                if let Some(ticket) = &price_ticket {
                    self.apply_price(ticket, price);
                }
            }
        }
    }

    /// Integer units for the current form values; zero marks invalid input
    pub fn integer_units(&self) -> IntegerUnits {
        match (&self.base, &self.quote) {
            (Some(base), Some(quote)) => to_integer_units(
                &self.lot_size_text,
                &self.tick_size_text,
                base.decimals(),
                quote.decimals(),
            ),
            (Some(base), None) => IntegerUnits {
                base_lot_units: to_integer_units(&self.lot_size_text, "1", base.decimals(), 0)
                    .base_lot_units,
                quote_lot_units: 0,
            },
            _ => IntegerUnits::default(),
        }
    }

    /// Field-level validation, available once both tokens are resolved
    pub fn validate_inputs(&self) -> Option<std::result::Result<LotSizes, InputInvalid>> {
        let (base, quote) = (self.base.as_ref()?, self.quote.as_ref()?);
        Some(parse_lot_sizes(
            &self.lot_size_text,
            &self.tick_size_text,
            base.decimals(),
            quote.decimals(),
        ))
    }

    /// Whether the submit control should be enabled
    pub fn can_submit(&self, wallet: &dyn WalletSigner) -> bool {
        wallet.is_connected()
            && self.base.is_some()
            && self.quote.is_some()
            && self.integer_units().is_valid()
            && !self.is_loading_suggestion()
            && self.submission.accepts_submission()
            && self.listed_venue().is_none()
    }

    fn current_pair(&self) -> Option<(TokenAddress, TokenAddress)> {
        Some((
            self.base.as_ref()?.address().clone(),
            self.quote.as_ref()?.address().clone(),
        ))
    }

    /// Market already created for the current pair, if any
    pub fn listed_venue(&self) -> Option<&VenueAddress> {
        self.listed.get(&self.current_pair()?)
    }

    /// Start a listing attempt.
    ///
    /// Returns `Ok(None)` when submission is not currently allowed (gate closed
    /// or an attempt already in flight) and `Err(NoActiveVenueProgram)` when no
    /// usable DEX program is configured.
    pub fn begin_submission(
        &mut self,
        wallet: &dyn WalletSigner,
    ) -> Result<Option<SubmissionTicket>> {
        if !self.can_submit(wallet) {
            debug!(state = ?self.submission, "submission refused");
            return Ok(None);
        }
        let (Some(base), Some(quote), Some(sizes)) = (
            self.base.as_ref(),
            self.quote.as_ref(),
            self.integer_units().lot_sizes(),
        ) else {
            return Ok(None);
        };

        let program_id = self
            .config
            .active_program()
            .cloned()
            .ok_or(Error::NoActiveVenueProgram)?;

        let request = ListingRequest {
            base_mint: base.address().clone(),
            quote_mint: quote.address().clone(),
            base_lot_size: sizes.base_lot_size,
            quote_lot_size: sizes.quote_lot_size,
            program_id,
        };

        if !self.submission.begin() {
            return Ok(None);
        }

        let attempt = self.next_attempt;
        self.next_attempt += 1;
        self.in_flight = Some(attempt);
        info!(
            attempt,
            base = %request.base_mint,
            quote = %request.quote_mint,
            base_lot_size = request.base_lot_size.get(),
            quote_lot_size = request.quote_lot_size.get(),
            program = %request.program_id,
            "submitting market listing"
        );
        Ok(Some(SubmissionTicket { attempt, request }))
    }

    /// Record the outcome of an attempt. Returns false for a ticket that is
    /// not the attempt in flight.
    pub fn complete_submission(
        &mut self,
        ticket: &SubmissionTicket,
        outcome: std::result::Result<VenueAddress, SubmissionError>,
    ) -> bool {
        if self.in_flight != Some(ticket.attempt) {
            debug!(attempt = ticket.attempt, "ignoring outcome of unknown attempt");
            return false;
        }
        self.in_flight = None;

        let pair = (
            ticket.request.base_mint.clone(),
            ticket.request.quote_mint.clone(),
        );
        let finished = match outcome {
            Ok(venue) => {
                info!(attempt = ticket.attempt, market = %venue, "market listed");
                self.listed.insert(pair.clone(), venue.clone());
                self.submission.finish(Ok(venue))
            }
            Err(e) => {
                warn!(attempt = ticket.attempt, error = %e, "error listing new market");
                self.submission.finish(Err(e.message().to_string()))
            }
        };

        // The pair may have changed while the attempt was in flight
        if self.current_pair().as_ref() != Some(&pair) {
            let listed = self.listed_venue().cloned();
            self.submission.reset_for_pair(listed.as_ref());
        }
        finished
    }

    /// Run a full attempt against `submitter`.
    ///
    /// `Ok(None)` means the attempt was not started. Submitter failures are
    /// returned as [`Error::SubmissionFailed`] carrying the submitter's message.
    pub async fn submit(
        &mut self,
        wallet: &dyn WalletSigner,
        submitter: &dyn ListingSubmitter,
    ) -> Result<Option<VenueAddress>> {
        let Some(ticket) = self.begin_submission(wallet)? else {
            return Ok(None);
        };

        let outcome = submitter.list_market(ticket.request(), wallet).await;
        self.complete_submission(&ticket, outcome.clone());
        match outcome {
            Ok(venue) => Ok(Some(venue)),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve `address` and make it the base token; clears it on failure
    pub async fn select_base(
        &mut self,
        resolver: &dyn MintResolver,
        address: &str,
    ) -> Result<()> {
        let resolved = resolve_token(resolver, address).await;
        let (token, result) = split_resolution(resolved);
        self.set_base_token(token);
        result
    }

    /// Resolve `address` and make it the quote token; clears it on failure
    pub async fn select_quote(
        &mut self,
        resolver: &dyn MintResolver,
        address: &str,
    ) -> Result<()> {
        let resolved = resolve_token(resolver, address).await;
        let (token, result) = split_resolution(resolved);
        self.set_quote_token(token);
        result
    }
}

fn split_resolution(resolved: Result<TokenDescriptor>) -> (Option<TokenDescriptor>, Result<()>) {
    match resolved {
        Ok(token) => (Some(token), Ok(())),
        Err(e) => (None, Err(e)),
    }
}

/// Validate free-form mint text against the ledger
pub async fn resolve_token(resolver: &dyn MintResolver, address: &str) -> Result<TokenDescriptor> {
    let address = address.trim();
    if address.is_empty() {
        return Err(Error::MissingField("mint address".to_string()));
    }
    resolver.resolve_mint(&TokenAddress::new(address)).await
}
