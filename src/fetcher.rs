//! Single-page price scraping.
//!
//! One blocking GET per product, no retries. The price is read from the text
//! of the first element matching the configured CSS selector.

use std::time::Duration;

use chrono::{Local, NaiveDate};
use reqwest::blocking::Client;
use scraper::{Html, Selector};

use crate::config;
use crate::error::{PriceWatchError, Result};
use crate::models::{round_price, PriceRecord};

/// Anything that can produce today's price for a product page.
pub trait PriceSource {
    fn fetch_price(&self, product_name: &str, url: &str) -> Result<PriceRecord>;
}

/// Scrapes prices over HTTP.
pub struct HttpPriceFetcher {
    client: Client,
    selector: Selector,
}

impl HttpPriceFetcher {
    /// Create a fetcher with a bounded per-request timeout.
    ///
    /// Fails with [`PriceWatchError::InvalidArgument`] if `selector` is not a
    /// valid CSS selector.
    pub fn new(timeout: Duration, selector: &str, user_agent: &str) -> Result<Self> {
        let selector = parse_selector(selector)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, selector })
    }

    /// Download the page body, failing on non-success status codes.
    pub fn fetch_html(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        Ok(resp.text()?)
    }

    /// Fetch `url` and stamp its price with the given date.
    pub fn fetch_price_on(&self, product_name: &str, url: &str, date: NaiveDate) -> Result<PriceRecord> {
        tracing::debug!("Fetching price for {} from {}", product_name, url);
        let html = self.fetch_html(url)?;
        let price = extract_price(&html, &self.selector, url)?;
        Ok(PriceRecord::new(date, product_name, price))
    }
}

impl PriceSource for HttpPriceFetcher {
    fn fetch_price(&self, product_name: &str, url: &str) -> Result<PriceRecord> {
        self.fetch_price_on(product_name, url, today())
    }
}

/// Current date on the local system clock.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| {
        PriceWatchError::InvalidArgument(format!("invalid price selector {:?}: {:?}", selector, e))
    })
}

/// The default selector for the price display region.
pub fn default_selector() -> Result<Selector> {
    parse_selector(config::PRICE_SELECTOR)
}

/// Locate the price element in `html` and parse its text.
///
/// `url` is only used to label the error when the element is missing.
pub fn extract_price(html: &str, selector: &Selector, url: &str) -> Result<f64> {
    let document = Html::parse_document(html);
    let element = document
        .select(selector)
        .next()
        .ok_or_else(|| PriceWatchError::PriceElementMissing {
            url: url.to_string(),
        })?;
    let text: String = element.text().collect();
    parse_price_text(&text)
}

/// Normalize a displayed price (`"1 299,90"`) into a number rounded to
/// two fractional digits.
pub fn parse_price_text(text: &str) -> Result<f64> {
    let normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(round_price(v)),
        _ => Err(PriceWatchError::InvalidPrice(text.trim().to_string())),
    }
}
