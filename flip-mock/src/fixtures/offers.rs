use flip_core::NormalizedOffer;
use rust_decimal::Decimal;

/// Ranked listings for a `want`/`have` symbol pair.
pub fn by_pair(want: &str, have: &str) -> Option<Vec<NormalizedOffer>> {
    match (want, have) {
        ("chaos", "exalted") => Some(vec![
            o("Exalter", "160", 2400),
            o("ChaosFarmer", "158.5", 900),
            o("BulkBoss", "157", 12000),
            o("Whisperer", "155.25", 40),
            o("LateSeller", "150", 300),
            o("LowBall", "120", 5),
        ]),
        ("divine", "chaos") => Some(vec![
            o("DivineDealer", "0.0048", 14),
            o("Stacker", "0.0047", 3),
            o("Flipper", "0.0045", 60),
        ]),
        ("alchemy", "chaos") => Some(vec![
            o("AlchemistA", "9.5", 800),
            o("SoldOut", "9.25", 0),
            o("AlchemistB", "9", 150),
        ]),
        ("chaos", "divine") => Some(vec![
            o("Sorcerer", "205", 4000),
            o("Hoarder", "203.3333", 2000),
        ]),
        _ => None,
    }
}

fn o(ign: &str, rate: &str, stock: u64) -> NormalizedOffer {
    NormalizedOffer {
        contact_ign: ign.to_string(),
        conversion_rate: rate.parse::<Decimal>().unwrap_or(Decimal::ZERO),
        stock,
    }
}
