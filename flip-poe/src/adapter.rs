use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use flip_core::FlipError;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::CONNECTOR_NAME;

/// Default host of the official trade API.
pub const DEFAULT_BASE_URL: &str = "https://www.pathofexile.com";

const USER_AGENT: &str = concat!("flip-poe/", env!("CARGO_PKG_VERSION"));

/// Raw trade API transport (so we can inject fakes in tests).
///
/// Implementations return the decoded JSON body. They do not interpret the
/// body: missing fields are judged by the connector stage that made the call.
#[async_trait]
pub trait TradeApi: Send + Sync {
    /// POST an exchange search for `league`.
    async fn exchange(&self, league: &str, body: &Value) -> Result<Value, FlipError>;

    /// GET the listings for `ids` belonging to the search `query_id`.
    async fn fetch(&self, ids: &[String], query_id: &str) -> Result<Value, FlipError>;
}

/// Build `{base}/api/trade/exchange/{league}` with the league percent-encoded.
///
/// # Errors
/// Returns `InvalidArg` if `base` cannot carry a path (e.g. `mailto:`).
pub fn exchange_url(base: &Url, league: &str) -> Result<Url, FlipError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| FlipError::InvalidArg(format!("base url cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(["api", "trade", "exchange", league]);
    Ok(url)
}

/// Build `{base}/api/trade/fetch/{id,id,..}?query={query_id}&exchange`.
///
/// # Errors
/// Returns `InvalidArg` if `base` cannot carry a path.
pub fn fetch_url(base: &Url, ids: &[String], query_id: &str) -> Result<Url, FlipError> {
    let joined = ids.join(",");
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| FlipError::InvalidArg(format!("base url cannot be a base: {base}")))?
        .pop_if_empty()
        .extend(["api", "trade", "fetch", joined.as_str()]);
    url.query_pairs_mut()
        .clear()
        .append_pair("query", query_id)
        .append_key_only("exchange");
    Ok(url)
}

/// Production adapter backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Wrap an existing client talking to `base`.
    #[must_use]
    pub const fn new(http: reqwest::Client, base: Url) -> Self {
        Self { http, base }
    }

    /// Build a client with the crate user agent and a request `timeout`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unparsable `base_url` and `Transport` if the
    /// HTTP client cannot be constructed.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, FlipError> {
        let base = Url::parse(base_url)
            .map_err(|e| FlipError::InvalidArg(format!("invalid base url {base_url}: {e}")))?;
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| FlipError::transport(CONNECTOR_NAME, e.to_string()))?;
        Ok(Self::new(http, base))
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    async fn read_json(resp: reqwest::Response) -> Result<Value, FlipError> {
        let status = resp.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            // The throttled body lacks the fields the stages expect; let them
            // report their own error kind.
            return Ok(resp.json::<Value>().await.unwrap_or(Value::Null));
        }
        if !status.is_success() {
            return Err(FlipError::transport(
                CONNECTOR_NAME,
                format!("unexpected status {status}"),
            ));
        }
        resp.json::<Value>()
            .await
            .map_err(|e| FlipError::transport(CONNECTOR_NAME, format!("invalid json body: {e}")))
    }
}

fn map_reqwest_err(e: &reqwest::Error) -> FlipError {
    if e.is_timeout() {
        FlipError::transport(CONNECTOR_NAME, format!("request timed out: {e}"))
    } else {
        FlipError::transport(CONNECTOR_NAME, e.to_string())
    }
}

#[async_trait]
impl TradeApi for RealAdapter {
    async fn exchange(&self, league: &str, body: &Value) -> Result<Value, FlipError> {
        let url = exchange_url(&self.base, league)?;
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e))?;
        Self::read_json(resp).await
    }

    async fn fetch(&self, ids: &[String], query_id: &str) -> Result<Value, FlipError> {
        let url = fetch_url(&self.base, ids, query_id)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| map_reqwest_err(&e))?;
        Self::read_json(resp).await
    }
}

impl dyn TradeApi {
    /// Test helper that builds a `TradeApi` from two closures.
    ///
    /// `exchange` receives the league and request body; `fetch` receives the
    /// ids (already truncated by the caller) and the query id.
    pub fn from_fns<E, F>(exchange: E, fetch: F) -> Arc<dyn TradeApi>
    where
        E: Send + Sync + 'static + Fn(String, Value) -> Result<Value, FlipError>,
        F: Send + Sync + 'static + Fn(Vec<String>, String) -> Result<Value, FlipError>,
    {
        struct FnTradeApi<E, F> {
            exchange: E,
            fetch: F,
        }

        #[async_trait]
        impl<E, F> TradeApi for FnTradeApi<E, F>
        where
            E: Send + Sync + 'static + Fn(String, Value) -> Result<Value, FlipError>,
            F: Send + Sync + 'static + Fn(Vec<String>, String) -> Result<Value, FlipError>,
        {
            async fn exchange(&self, league: &str, body: &Value) -> Result<Value, FlipError> {
                (self.exchange)(league.to_string(), body.clone())
            }

            async fn fetch(&self, ids: &[String], query_id: &str) -> Result<Value, FlipError> {
                (self.fetch)(ids.to_vec(), query_id.to_string())
            }
        }

        Arc::new(FnTradeApi { exchange, fetch })
    }
}
