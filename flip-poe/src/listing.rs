//! Response parsing for the exchange search and the listing fetch.

use flip_core::{Decimal, FlipError, NormalizedOffer, OfferQuery, QueryResult};
use serde::Deserialize;
use serde_json::{Value, json};

/// Decimal places kept in `NormalizedOffer::conversion_rate`.
pub const RATE_DECIMALS: u32 = 4;

#[derive(Deserialize)]
struct RawOfferDetail {
    listing: RawListing,
}

#[derive(Deserialize)]
struct RawListing {
    account: RawAccount,
    price: RawPrice,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccount {
    last_character_name: String,
}

#[derive(Deserialize)]
struct RawPrice {
    item: RawPriceItem,
    exchange: RawPriceExchange,
}

#[derive(Deserialize)]
struct RawPriceItem {
    amount: Decimal,
    stock: u64,
}

#[derive(Deserialize)]
struct RawPriceExchange {
    amount: Decimal,
}

/// JSON body of an exchange search for online sellers.
#[must_use]
pub fn exchange_body(query: &OfferQuery) -> Value {
    json!({
        "exchange": {
            "status": { "option": "online" },
            "have": [query.have],
            "want": [query.want],
        }
    })
}

/// Parse an exchange search response into ranked ids and the query token.
///
/// # Errors
/// `RateLimitExceeded` when `result` or `id` is absent (the provider's
/// throttling answer); `Fetch` when they are present with the wrong shape.
pub fn parse_exchange_response(mut body: Value) -> Result<QueryResult, FlipError> {
    let result = body.get_mut("result").map(Value::take);
    let id = body.get_mut("id").map(Value::take);
    let (Some(result), Some(id)) = (result, id) else {
        return Err(FlipError::rate_limited(
            "exchange search response lacked result or id",
        ));
    };

    let offer_ids: Vec<String> = serde_json::from_value(result)
        .map_err(|e| FlipError::Fetch(format!("malformed exchange result: {e}")))?;
    let query_id = match id {
        Value::String(query_id) => query_id,
        other => {
            return Err(FlipError::Fetch(format!(
                "malformed exchange id: expected string, got {other}"
            )));
        }
    };
    Ok(QueryResult {
        offer_ids,
        query_id,
    })
}

/// Parse a listing fetch response into normalized offers, in response order.
///
/// `null` entries (listings removed between search and fetch) are skipped.
///
/// # Errors
/// `Fetch` when `result` is absent or not an array, or when any listing is
/// malformed.
pub fn parse_fetch_response(mut body: Value) -> Result<Vec<NormalizedOffer>, FlipError> {
    let Some(result) = body.get_mut("result").map(Value::take) else {
        return Err(FlipError::Fetch(
            "listing fetch response lacked result".to_string(),
        ));
    };
    let Value::Array(entries) = result else {
        return Err(FlipError::Fetch(
            "listing fetch result is not an array".to_string(),
        ));
    };
    entries
        .into_iter()
        .filter(|entry| !entry.is_null())
        .map(normalize_listing)
        .collect()
}

/// Extract a `NormalizedOffer` from one raw listing record.
///
/// # Errors
/// `Fetch` when a field is missing or the pay amount is not positive.
pub fn normalize_listing(raw: Value) -> Result<NormalizedOffer, FlipError> {
    let detail: RawOfferDetail = serde_json::from_value(raw)
        .map_err(|e| FlipError::Fetch(format!("malformed listing: {e}")))?;
    let RawListing { account, price } = detail.listing;

    let receive = price.item.amount;
    let pay = price.exchange.amount;
    if pay <= Decimal::ZERO {
        return Err(FlipError::Fetch(format!(
            "listing by {} has non-positive pay amount {pay}",
            account.last_character_name
        )));
    }
    let rate = receive.checked_div(pay).ok_or_else(|| {
        FlipError::Fetch(format!("conversion rate overflow for {receive}/{pay}"))
    })?;

    Ok(NormalizedOffer {
        contact_ign: account.last_character_name,
        conversion_rate: rate.round_dp(RATE_DECIMALS),
        stock: price.item.stock,
    })
}
