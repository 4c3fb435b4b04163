//! Thin asynchronous client for the SteamDT open price API.
//!
//! - Looks up the lowest listed sell price for a market hash name.
//! - Batches lookups through a bounded worker pool; one failed lookup never
//!   fails the batch.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};

use crate::domain::pricing::is_valid_price;

pub const DEFAULT_BASE_URL: &str = "https://open.steamdt.com/";
pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const PRICE_PATH: &str = "open/cs2/v1/price/single";
const USER_AGENT: &str = concat!("tradeup-value-scanner/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum PriceClientError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<Vec<PlatformPriceDto>>,
    #[serde(default, rename = "errorMsg")]
    error_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlatformPriceDto {
    #[serde(default)]
    platform: Option<String>,
    #[serde(default, rename = "sellPrice")]
    sell_price: Option<f64>,
}

#[derive(Clone)]
pub struct PriceClient {
    http: Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
}

impl PriceClient {
    pub fn with_base_url(base: &str, api_key: impl Into<String>) -> Result<Self, PriceClientError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Lowest positive sell price across platforms.
    ///
    /// `Ok(None)` means the API answered but nothing is listed.
    pub async fn fetch_lowest_price(&self, market_hash: &str) -> Result<Option<f64>, PriceClientError> {
        let url = self.price_url(market_hash)?;
        debug!(%url, "requesting lowest price");

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let envelope: ApiEnvelope = response.json().await?;
        lowest_sell_price(envelope)
    }

    /// Looks up every name with at most `concurrency` requests in flight.
    ///
    /// Results arrive in completion order. Failed lookups are logged and come back
    /// as `None`.
    pub async fn fetch_many(
        &self,
        market_hashes: Vec<String>,
        concurrency: usize,
    ) -> Vec<(String, Option<f64>)> {
        let permits = Arc::new(Semaphore::new(concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for market_hash in market_hashes {
            let client = self.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return (market_hash, None);
                };
                match client.fetch_lowest_price(&market_hash).await {
                    Ok(price) => (market_hash, price),
                    Err(error) => {
                        warn!(%market_hash, %error, "price lookup failed");
                        (market_hash, None)
                    }
                }
            });
        }

        let mut quotes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(quote) => quotes.push(quote),
                Err(error) => warn!(%error, "price lookup task aborted"),
            }
        }

        let priced = quotes.iter().filter(|(_, price)| price.is_some()).count();
        info!(priced, requested = quotes.len(), "price batch finished");
        quotes
    }

    fn price_url(&self, market_hash: &str) -> Result<Url, PriceClientError> {
        let mut url = self.base_url.join(PRICE_PATH)?;
        url.query_pairs_mut()
            .append_pair("marketHashName", market_hash);
        Ok(url)
    }
}

fn lowest_sell_price(envelope: ApiEnvelope) -> Result<Option<f64>, PriceClientError> {
    let ApiEnvelope {
        success,
        data,
        error_msg,
    } = envelope;

    if !success {
        return Err(PriceClientError::Api(
            error_msg.unwrap_or_else(|| "request was not successful".to_string()),
        ));
    }

    let lowest = data
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| {
            let price = entry.sell_price.filter(|price| is_valid_price(*price))?;
            debug!(platform = entry.platform.as_deref().unwrap_or("?"), price, "sell listing");
            Some(price)
        })
        .min_by(f64::total_cmp);
    Ok(lowest)
}
