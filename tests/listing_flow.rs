// End-to-end listing flow against in-memory services.
//
// Run with: cargo test --test listing_flow

use async_trait::async_trait;
use openbook_lister::{
    DepositEstimate, Error, ListingConfig, ListingOrchestrator, ListingRequest, ListingSubmitter,
    MintResolver, PriceOracle, ReferencePrice, RentQuoter, Result, SubmissionError,
    SubmissionState, TokenAddress, TokenDescriptor, VenueAddress, WalletAddress, WalletSigner,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

const SOL: &str = "So11111111111111111111111111111111111111112";
const USDC: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
const BONK: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

struct Wallet {
    owner: WalletAddress,
}

impl WalletSigner for Wallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn owner(&self) -> &WalletAddress {
        &self.owner
    }
}

fn wallet() -> Wallet {
    Wallet {
        owner: WalletAddress::new("9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin"),
    }
}

/// Fixed prices keyed by (base, quote)
#[derive(Default)]
struct StaticOracle {
    prices: HashMap<(String, String), Decimal>,
}

impl StaticOracle {
    fn with(mut self, base: &str, quote: &str, price: &str) -> Self {
        self.prices.insert(
            (base.to_string(), quote.to_string()),
            Decimal::from_str(price).unwrap(),
        );
        self
    }
}

#[async_trait]
impl PriceOracle for StaticOracle {
    async fn reference_price(
        &self,
        base: &TokenAddress,
        quote: &TokenAddress,
    ) -> Option<ReferencePrice> {
        self.prices
            .get(&(base.to_string(), quote.to_string()))
            .copied()
            .and_then(ReferencePrice::new)
    }
}

/// Rent at a flat 6960 lamports per byte
struct FlatRent;

#[async_trait]
impl RentQuoter for FlatRent {
    async fn minimum_balance_for_rent_exemption(&self, data_len: u64) -> Result<u64> {
        Ok(data_len * 6_960)
    }
}

struct BrokenRent;

/// Rent lookup that never answers
struct HungRent;

#[async_trait]
impl RentQuoter for HungRent {
    async fn minimum_balance_for_rent_exemption(&self, _data_len: u64) -> Result<u64> {
        std::future::pending().await
    }
}

/// Price lookup that never answers
struct HungOracle;

#[async_trait]
impl PriceOracle for HungOracle {
    async fn reference_price(
        &self,
        _base: &TokenAddress,
        _quote: &TokenAddress,
    ) -> Option<ReferencePrice> {
        std::future::pending().await
    }
}

#[async_trait]
impl RentQuoter for BrokenRent {
    async fn minimum_balance_for_rent_exemption(&self, _data_len: u64) -> Result<u64> {
        Err(Error::Api {
            status: 502,
            message: "bad gateway".to_string(),
        })
    }
}

struct Mints;

#[async_trait]
impl MintResolver for Mints {
    async fn resolve_mint(&self, address: &TokenAddress) -> Result<TokenDescriptor> {
        let decimals = match address.as_str() {
            SOL => 9,
            USDC => 6,
            BONK => 5,
            other => return Err(Error::InvalidMint(other.to_string())),
        };
        TokenDescriptor::new(address.clone(), decimals)
    }
}

/// Records requests and replies with scripted outcomes
struct ScriptedSubmitter {
    outcomes: Mutex<Vec<std::result::Result<VenueAddress, SubmissionError>>>,
    seen: Mutex<Vec<ListingRequest>>,
}

impl ScriptedSubmitter {
    fn new(outcomes: Vec<std::result::Result<VenueAddress, SubmissionError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ListingSubmitter for ScriptedSubmitter {
    async fn list_market(
        &self,
        request: &ListingRequest,
        _wallet: &dyn WalletSigner,
    ) -> std::result::Result<VenueAddress, SubmissionError> {
        self.seen.lock().unwrap().push(request.clone());
        self.outcomes.lock().unwrap().remove(0)
    }
}

async fn orchestrator_for(base: &str, quote: &str) -> ListingOrchestrator {
    let mut orch = ListingOrchestrator::new(ListingConfig::default());
    orch.select_base(&Mints, base).await.unwrap();
    orch.select_quote(&Mints, quote).await.unwrap();
    orch
}

#[tokio::test]
async fn test_refresh_fills_suggestion_and_deposit() {
    let oracle = StaticOracle::default().with(SOL, USDC, "100");
    let mut orch = orchestrator_for(SOL, USDC).await;

    orch.refresh(&oracle, &FlatRent).await;

    assert_eq!(orch.lot_size_text(), "0.01");
    assert_eq!(orch.tick_size_text(), "0.001");
    let quote = orch.deposit().quote().unwrap();
    assert_eq!(quote.account_bytes, 398_192);
    assert_eq!(quote.lamports, 398_192 * 6_960);
    assert_eq!(orch.deposit().to_string(), "2.77141632 SOL");
}

#[tokio::test]
async fn test_missing_price_and_broken_rent_degrade_gracefully() {
    let mut orch = orchestrator_for(SOL, USDC).await;
    orch.set_lot_size_text("0.5");
    orch.set_tick_size_text("0.05");

    orch.refresh(&StaticOracle::default(), &BrokenRent).await;

    assert_eq!(orch.lot_size_text(), "0.5");
    assert_eq!(orch.tick_size_text(), "0.05");
    assert_eq!(orch.deposit(), &DepositEstimate::Loading);
    assert!(orch.can_submit(&wallet()));
}

#[tokio::test]
async fn test_invalid_mint_clears_selection() {
    let mut orch = orchestrator_for(SOL, USDC).await;
    let result = orch.select_quote(&Mints, "not-a-mint").await;
    assert!(matches!(result, Err(Error::InvalidMint(_))));
    assert!(orch.quote_token().is_none());
    assert!(!orch.can_submit(&wallet()));

    let result = orch.select_quote(&Mints, "   ").await;
    assert!(matches!(result, Err(Error::MissingField(_))));
}

#[tokio::test]
async fn test_late_price_for_previous_pair_is_discarded() {
    let mut orch = orchestrator_for(SOL, USDC).await;

    // Pair A lookup goes out and stalls
    let ticket_a = orch.price_ticket().unwrap();
    let (reply_a, pending_a) = oneshot::channel::<Option<ReferencePrice>>();

    // User switches to pair B, whose price arrives first
    orch.select_base(&Mints, BONK).await.unwrap();
    let ticket_b = orch.price_ticket().unwrap();
    let oracle = StaticOracle::default().with(BONK, USDC, "0.00002");
    let price_b = oracle
        .reference_price(ticket_b.base(), ticket_b.quote())
        .await;
    assert!(orch.apply_price(&ticket_b, price_b));
    let shown = (
        orch.lot_size_text().to_string(),
        orch.tick_size_text().to_string(),
    );
    assert_eq!(shown, ("50000".to_string(), "0.000001".to_string()));

    // A finally resolves
    reply_a
        .send(ReferencePrice::new(Decimal::from(100)))
        .unwrap();
    let price_a = pending_a.await.unwrap();
    assert!(!orch.apply_price(&ticket_a, price_a));

    assert_eq!(orch.lot_size_text(), shown.0);
    assert_eq!(orch.tick_size_text(), shown.1);
    assert_eq!(orch.base_token().unwrap().address().as_str(), BONK);
}

#[tokio::test]
async fn test_rejected_signature_then_successful_retry() {
    let wallet = wallet();
    let mut orch = orchestrator_for(SOL, USDC).await;
    orch.set_lot_size_text("1");
    orch.set_tick_size_text("0.01");
    let units = orch.integer_units();
    assert_eq!(units.base_lot_units, 1_000_000_000);
    assert_eq!(units.quote_lot_units, 10_000);

    let submitter = ScriptedSubmitter::new(vec![
        Err(SubmissionError::new("signature rejected")),
        Ok(VenueAddress::new("8BnEgHoWFysVcuFFX7QztDmzuH8r5ZFvyP3sYwn1XTh6")),
    ]);

    let err = orch.submit(&wallet, &submitter).await.unwrap_err();
    assert_eq!(err.to_string(), "signature rejected");
    assert_eq!(orch.submission().failure(), Some("signature rejected"));
    assert_eq!(orch.integer_units(), units);
    assert!(orch.can_submit(&wallet));

    let venue = orch.submit(&wallet, &submitter).await.unwrap();
    assert_eq!(
        venue,
        Some(VenueAddress::new("8BnEgHoWFysVcuFFX7QztDmzuH8r5ZFvyP3sYwn1XTh6"))
    );
    assert!(matches!(orch.submission(), SubmissionState::Succeeded(_)));

    let seen = submitter.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], seen[1]);
    assert_eq!(seen[0].base_lot_size.get(), 1_000_000_000);
    assert_eq!(seen[0].quote_lot_size.get(), 10_000);
    assert_eq!(seen[0].program_id.as_str(), openbook_lister::config::OPENBOOK_PROGRAM_ID);
    drop(seen);

    // Same pair again is refused without contacting the submitter
    assert_eq!(orch.submit(&wallet, &submitter).await.unwrap(), None);
    assert_eq!(submitter.seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_invalid_units_never_reach_submitter() {
    let mut orch = orchestrator_for(SOL, USDC).await;
    orch.set_lot_size_text("abc");
    let submitter = ScriptedSubmitter::new(Vec::new());

    assert_eq!(orch.submit(&wallet(), &submitter).await.unwrap(), None);
    assert!(submitter.seen.lock().unwrap().is_empty());
    assert_eq!(orch.submission(), &SubmissionState::Idle);
}

#[tokio::test]
async fn test_hung_rent_lookup_does_not_hold_back_suggestion() {
    let oracle = StaticOracle::default().with(SOL, USDC, "100");
    let mut orch = orchestrator_for(SOL, USDC).await;

    let finished = tokio::time::timeout(
        Duration::from_millis(200),
        orch.refresh(&oracle, &HungRent),
    )
    .await;

    assert!(finished.is_err());
    assert_eq!(orch.lot_size_text(), "0.01");
    assert_eq!(orch.tick_size_text(), "0.001");
    assert!(!orch.is_loading_suggestion());
    assert_eq!(orch.deposit(), &DepositEstimate::Loading);
    assert!(orch.can_submit(&wallet()));
}

#[tokio::test]
async fn test_hung_price_lookup_does_not_hold_back_deposit() {
    let mut orch = orchestrator_for(SOL, USDC).await;

    let finished = tokio::time::timeout(
        Duration::from_millis(200),
        orch.refresh(&HungOracle, &FlatRent),
    )
    .await;

    assert!(finished.is_err());
    assert_eq!(orch.deposit().to_string(), "2.77141632 SOL");
    assert!(orch.is_loading_suggestion());
    assert!(!orch.can_submit(&wallet()));
}

#[tokio::test]
async fn test_listed_pair_cannot_be_listed_again_after_switching_back() {
    let wallet = wallet();
    let mut orch = orchestrator_for(SOL, USDC).await;
    let submitter = ScriptedSubmitter::new(vec![
        Ok(VenueAddress::new("8BnEgHoWFysVcuFFX7QztDmzuH8r5ZFvyP3sYwn1XTh6")),
        Ok(VenueAddress::new("duplicate")),
    ]);

    assert!(orch.submit(&wallet, &submitter).await.unwrap().is_some());

    orch.set_quote_token(None);
    orch.select_quote(&Mints, USDC).await.unwrap();

    assert!(!orch.can_submit(&wallet));
    assert_eq!(orch.submit(&wallet, &submitter).await.unwrap(), None);
    assert_eq!(submitter.seen.lock().unwrap().len(), 1);
    assert_eq!(
        orch.submission().venue().map(|v| v.as_str()),
        Some("8BnEgHoWFysVcuFFX7QztDmzuH8r5ZFvyP3sYwn1XTh6")
    );
}
