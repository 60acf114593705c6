use std::sync::Arc;

use flip::{CurrencyPair, Flip, NormalizedOffer, ViableOffers};
use flip_demos::common::{get_source, league};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let pair = CurrencyPair::new("chaos", "exalted");

    // Built-in rule: skip our own listings and thin stock
    let own = Flip::builder()
        .with_source(get_source()?)
        .filter(Arc::new(
            ViableOffers::new()
                .excluding_characters(["Exalter"])
                .min_stock(100),
        ))
        .build()?;
    let res = own.fetch_for_pair(&league(), &pair, 3).await?;
    println!("ViableOffers kept {} offer(s) for {pair}", res.offers.len());

    // Any closure with the same shape works as a filter
    let rate_floor = |_: &str, _: &str, offers: Vec<NormalizedOffer>| -> Vec<NormalizedOffer> {
        offers
            .into_iter()
            .filter(|o| o.conversion_rate >= flip::Decimal::from(157))
            .collect()
    };
    let custom = Flip::builder()
        .with_source(get_source()?)
        .filter(Arc::new(rate_floor))
        .build()?;
    let res = custom.fetch_for_pair(&league(), &pair, 3).await?;
    for offer in &res.offers {
        println!("  @{} at {}", offer.contact_ign, offer.conversion_rate);
    }

    Ok(())
}
