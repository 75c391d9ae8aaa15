//! Shared test fixtures for the pricewatch integration tests.
//!
//! Provides `setup()` which builds a `PriceWatch` over a temporary data
//! directory with a `FakeSource` standing in for the HTTP fetcher.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use pricewatch::fetcher::parse_price_text;
use pricewatch::{PriceRecord, PriceSource, PriceWatch, PriceWatchError, StoreConfig};

pub const HISTORY_HEADER_LINE: &str = "date;product;price\n";
pub const WATCHLIST_HEADER_LINE: &str = "name;url\n";

/// Serves price texts keyed by URL, all stamped with the same date.
pub struct FakeSource {
    pub date: NaiveDate,
    pub prices: HashMap<String, String>,
}

impl FakeSource {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            prices: HashMap::new(),
        }
    }

    pub fn with_price(mut self, url: &str, text: &str) -> Self {
        self.prices.insert(url.to_string(), text.to_string());
        self
    }
}

impl PriceSource for FakeSource {
    fn fetch_price(&self, product_name: &str, url: &str) -> pricewatch::Result<PriceRecord> {
        let text = self
            .prices
            .get(url)
            .ok_or_else(|| PriceWatchError::PriceElementMissing {
                url: url.to_string(),
            })?;
        let price = parse_price_text(text)?;
        Ok(PriceRecord::new(self.date, product_name, price))
    }
}

pub fn date(day: u32, month: u32, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a `PriceWatch` over a fresh temporary directory.
///
/// Returns `(PriceWatch, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn setup(source: FakeSource) -> (PriceWatch<FakeSource>, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let pw = PriceWatch::with_source(StoreConfig::in_dir(tmp_dir.path()), source);
    (pw, tmp_dir)
}

/// Like `setup`, with the history file pre-filled from `(date, product, price)` rows.
pub fn setup_with_history(rows: &[(&str, &str, &str)]) -> (PriceWatch<FakeSource>, tempfile::TempDir) {
    let (pw, tmp) = setup(FakeSource::new(date(1, 1, 2024)));
    let mut text = HISTORY_HEADER_LINE.to_string();
    for (d, product, price) in rows {
        text.push_str(&format!("{};{};{}\n", d, product, price));
    }
    write_file(&pw.config().history_path, &text);
    (pw, tmp)
}

pub fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

pub fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
