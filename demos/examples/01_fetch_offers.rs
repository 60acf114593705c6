use flip::{CurrencyPair, Flip, OfferSource};
use flip_demos::common::{get_source, league};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let source = get_source()?;
    println!("Fetching through: {} ({})", source.name(), source.vendor());
    let flip = Flip::builder().with_source(source).build()?;

    let pairs = [
        CurrencyPair::new("chaos", "exalted"),
        CurrencyPair::new("divine", "chaos"),
        CurrencyPair::new("alchemy", "chaos"),
        CurrencyPair::new("jeweller", "fusing"),
    ];
    let league = league();
    let report = flip.fetch_offers(&league, &pairs).await?;

    println!("League {league}: {} pair(s) with viable offers", report.results.len());
    for res in &report.results {
        println!("  {}", res.pair());
        for offer in &res.offers {
            println!(
                "    @{:<20} rate={:<10} stock={}",
                offer.contact_ign, offer.conversion_rate, offer.stock
            );
        }
    }
    for failure in &report.failures {
        println!(
            "  {} failed: {} (retryable: {})",
            failure.pair,
            failure.error,
            failure.error.is_retryable()
        );
    }

    Ok(())
}
