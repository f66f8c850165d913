use openbook_lister::{
    DepositEstimator, JupiterPriceClient, ListingConfig, ListingOrchestrator, RpcClient,
};
use tracing_subscriber::EnvFilter;

/// Prints suggested listing parameters and the rent estimate for a pair.
///
/// Usage: cargo run --example list_market -- <BASE_MINT> <QUOTE_MINT>
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let mut args = std::env::args().skip(1);
    // SOL / USDC by default
    let base = args
        .next()
        .unwrap_or_else(|| "So11111111111111111111111111111111111111112".to_string());
    let quote = args
        .next()
        .unwrap_or_else(|| "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string());

    let config = ListingConfig::load()?;
    let rpc = RpcClient::new(config.rpc_url.as_str());
    let prices = JupiterPriceClient::new(config.price_api_url.as_str());

    let sizes = DepositEstimator::new(config.layout).account_sizes();
    println!("Account sizes:");
    println!("  Event queue:   {} bytes", sizes.event_queue);
    println!("  Request queue: {} bytes", sizes.request_queue);
    println!("  Bids / asks:   {} bytes each", sizes.bids);

    let mut orchestrator = ListingOrchestrator::new(config);
    orchestrator.select_base(&rpc, &base).await?;
    orchestrator.select_quote(&rpc, &quote).await?;
    orchestrator.refresh(&prices, &rpc).await;

    println!("\nMinimum order size: {}", orchestrator.lot_size_text());
    println!("Tick size:          {}", orchestrator.tick_size_text());

    let units = orchestrator.integer_units();
    println!("baseLotSize:  {}", units.base_lot_units);
    println!("quoteLotSize: {}", units.quote_lot_units);
    if let Some(Err(problem)) = orchestrator.validate_inputs() {
        println!("Parameters are not listable: {}", problem);
    }

    println!("\nTotal rent estimate: {}", orchestrator.deposit());
    Ok(())
}
