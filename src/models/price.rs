use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceRecord — Single (date, product, price) observation
// ---------------------------------------------------------------------------

/// One row of the price history file.
///
/// Serialized as `DD.MM.YYYY;product;price` with a `.` decimal separator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    #[serde(with = "day_first")]
    pub date: NaiveDate,
    pub product: String,
    pub price: f64,
}

impl PriceRecord {
    pub fn new(date: NaiveDate, product: impl Into<String>, price: f64) -> Self {
        Self {
            date,
            product: product.into(),
            price,
        }
    }
}

/// Round a currency amount to two fractional digits.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Serde adapter for `DD.MM.YYYY` dates.
pub mod day_first {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::config::DATE_FORMAT;

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parse a day-first date, accepting unpadded day and month.
    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
    }
}

// ---------------------------------------------------------------------------
// PriceGrid — Date x product table (pivot table / time series)
// ---------------------------------------------------------------------------

/// A date-by-product grid of prices, rows in chronological order.
///
/// `products` lists every product present in the history (sorted), whether
/// or not a given row has a cell for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceGrid {
    pub products: Vec<String>,
    pub rows: BTreeMap<NaiveDate, BTreeMap<String, f64>>,
}

impl PriceGrid {
    /// Cell value, `None` if the grid has no cell at that position.
    pub fn get(&self, date: NaiveDate, product: &str) -> Option<f64> {
        self.rows.get(&date).and_then(|row| row.get(product)).copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.rows.keys()
    }

    /// Prices of one product in date order, skipping dates without a cell.
    pub fn series(&self, product: &str) -> Vec<(NaiveDate, f64)> {
        self.rows
            .iter()
            .filter_map(|(date, row)| row.get(product).map(|price| (*date, *price)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// PriceSummary — Dashboard metrics for one product
// ---------------------------------------------------------------------------

/// Direction of the latest price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Up,
    Down,
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub product: String,
    pub current_price: f64,
    /// `None` when only one observation exists.
    pub delta_price: Option<f64>,
    pub max_price: f64,
    pub min_price: f64,
    pub average_price: f64,
    pub observations: usize,
}

impl PriceSummary {
    /// A single observation counts as unchanged.
    pub fn trend(&self) -> PriceTrend {
        match self.delta_price {
            Some(d) if d > 0.0 => PriceTrend::Up,
            Some(d) if d < 0.0 => PriceTrend::Down,
            _ => PriceTrend::Unchanged,
        }
    }
}
