use flip::{CurrencyPair, Flip};
use flip_demos::common::{get_source, league};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize a human-friendly tracing subscriber with env-based filtering.
    // Suggested: RUST_LOG=info,flip=trace,flip_poe=trace,flip_ratelimit=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    // Source is the mock in CI when FLIP_DEMOS_USE_MOCK is set
    let flip = Flip::builder().with_source(get_source()?).build()?;

    let pairs = [
        CurrencyPair::new("chaos", "exalted"),
        CurrencyPair::new("divine", "chaos"),
        CurrencyPair::new("FAIL", "chaos"),
    ];
    let report = flip.fetch_offers(&league(), &pairs).await?;
    tracing::info!(
        results = report.results.len(),
        failures = report.failures.len(),
        "fetch cycle finished"
    );

    Ok(())
}
