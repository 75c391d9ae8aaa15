//! Price history (`date;product;price`) and the queries the dashboard needs.
//!
//! Per-product aggregates work on the product's rows in file order, which is
//! assumed to approximate chronological order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDate;

use crate::csv_file::CsvFile;
use crate::error::{PriceWatchError, Result};
use crate::fetcher::PriceSource;
use crate::models::{
    round_price, BatchReport, FetchFailure, PriceGrid, PriceRecord, PriceSummary, WatchlistEntry,
};

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

/// Store for scraped price records.
pub struct HistoryStore<'a> {
    file: &'a CsvFile,
}

impl<'a> HistoryStore<'a> {
    /// Create a new `HistoryStore` bound to the given file.
    pub fn new(file: &'a CsvFile) -> Self {
        Self { file }
    }

    /// Create the file with only the `date;product;price` header if it is missing.
    pub fn ensure_initialized(&self) -> Result<bool> {
        self.file.ensure_initialized()
    }

    // -- Writes -------------------------------------------------------------

    /// Append one record, writing the header first if the file is empty.
    pub fn append(&self, record: &PriceRecord) -> Result<()> {
        self.file.append(record)
    }

    /// Fetch and append a price for every watchlist entry.
    ///
    /// A failed fetch is recorded in the report and the batch moves on to the
    /// next product. Failing to write the history file aborts the batch.
    pub fn run_batch<S: PriceSource + ?Sized>(
        &self,
        source: &S,
        entries: &[WatchlistEntry],
    ) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for entry in entries {
            match source.fetch_price(&entry.name, &entry.url) {
                Ok(record) => {
                    self.append(&record)?;
                    tracing::info!(
                        "{} {} {}: row saved",
                        record.date.format(crate::config::DATE_FORMAT),
                        record.product,
                        record.price
                    );
                    report.saved.push(record);
                }
                Err(e) => {
                    tracing::warn!("Failed to fetch price for {} ({}): {}", entry.name, entry.url, e);
                    report.failures.push(FetchFailure {
                        product: entry.name.clone(),
                        url: entry.url.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Drop every row whose (date, product) pair already appeared earlier in
    /// the file, keeping the first occurrence.
    ///
    /// Returns the number of rows removed.
    pub fn deduplicate(&self) -> Result<usize> {
        let records = self.records()?;
        let before = records.len();

        let mut seen: HashSet<(NaiveDate, String)> = HashSet::with_capacity(before);
        let kept: Vec<PriceRecord> = records
            .into_iter()
            .filter(|r| seen.insert((r.date, r.product.clone())))
            .collect();

        self.file.rewrite(&kept)?;
        let removed = before - kept.len();
        if removed > 0 {
            tracing::info!("Removed {} duplicate rows", removed);
        }
        Ok(removed)
    }

    /// Remove every record for `product_name`.
    ///
    /// Returns the number of rows removed.
    pub fn delete_product(&self, product_name: &str) -> Result<usize> {
        let records = self.records()?;
        let before = records.len();

        let kept: Vec<PriceRecord> = records
            .into_iter()
            .filter(|r| r.product != product_name)
            .collect();

        self.file.rewrite(&kept)?;
        let removed = before - kept.len();
        tracing::info!("Deleted {} rows for {}", removed, product_name);
        Ok(removed)
    }

    // -- Raw rows -----------------------------------------------------------

    /// All records in file order.
    pub fn records(&self) -> Result<Vec<PriceRecord>> {
        self.file.read_rows()
    }

    /// Records for one product in file order (possibly empty).
    pub fn records_for(&self, product_name: &str) -> Result<Vec<PriceRecord>> {
        Ok(self
            .records()?
            .into_iter()
            .filter(|r| r.product == product_name)
            .collect())
    }

    pub fn row_count(&self) -> Result<usize> {
        Ok(self.records()?.len())
    }

    // -- Tables -------------------------------------------------------------

    /// Date x product table for display.
    ///
    /// Several rows for the same cell resolve to the last one appended. Cells
    /// with no record are filled with `0.0`.
    pub fn pivot_table(&self) -> Result<PriceGrid> {
        let mut grid = self.time_series()?;
        for row in grid.rows.values_mut() {
            for product in &grid.products {
                row.entry(product.clone()).or_insert(0.0);
            }
        }
        Ok(grid)
    }

    /// Date x product series for charting, last price recorded per cell.
    ///
    /// Unlike [`pivot_table`](Self::pivot_table), missing cells stay absent.
    pub fn time_series(&self) -> Result<PriceGrid> {
        let records = self.records()?;

        let mut products = BTreeSet::new();
        let mut rows: BTreeMap<NaiveDate, BTreeMap<String, f64>> = BTreeMap::new();
        for record in records {
            products.insert(record.product.clone());
            rows.entry(record.date)
                .or_default()
                .insert(record.product, record.price);
        }

        Ok(PriceGrid {
            products: products.into_iter().collect(),
            rows,
        })
    }

    // -- Per-product aggregates ---------------------------------------------

    pub fn max_price(&self, product_name: &str) -> Result<f64> {
        let prices = self.prices_for(product_name)?;
        Ok(prices.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    pub fn min_price(&self, product_name: &str) -> Result<f64> {
        let prices = self.prices_for(product_name)?;
        Ok(prices.iter().copied().fold(f64::INFINITY, f64::min))
    }

    /// Arithmetic mean rounded to two fractional digits.
    pub fn average_price(&self, product_name: &str) -> Result<f64> {
        let prices = self.prices_for(product_name)?;
        Ok(mean(&prices))
    }

    /// Price of the product's last row.
    pub fn current_price(&self, product_name: &str) -> Result<f64> {
        let prices = self.prices_for(product_name)?;
        last(&prices).ok_or_else(|| PriceWatchError::ProductNotFound(product_name.to_string()))
    }

    /// Difference between the product's last and second-to-last rows.
    ///
    /// Fails with [`PriceWatchError::NoPreviousPrice`] when the product has
    /// a single row.
    pub fn delta_price(&self, product_name: &str) -> Result<f64> {
        let prices = self.prices_for(product_name)?;
        delta(&prices).ok_or_else(|| PriceWatchError::NoPreviousPrice(product_name.to_string()))
    }

    /// All dashboard metrics for one product from a single read.
    pub fn summary(&self, product_name: &str) -> Result<PriceSummary> {
        let prices = self.prices_for(product_name)?;
        let current_price = last(&prices)
            .ok_or_else(|| PriceWatchError::ProductNotFound(product_name.to_string()))?;
        Ok(PriceSummary {
            product: product_name.to_string(),
            current_price,
            delta_price: delta(&prices),
            max_price: prices.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            min_price: prices.iter().copied().fold(f64::INFINITY, f64::min),
            average_price: mean(&prices),
            observations: prices.len(),
        })
    }

    /// Prices for a product in file order; never empty.
    fn prices_for(&self, product_name: &str) -> Result<Vec<f64>> {
        let prices: Vec<f64> = self
            .records()?
            .into_iter()
            .filter(|r| r.product == product_name)
            .map(|r| r.price)
            .collect();
        if prices.is_empty() {
            return Err(PriceWatchError::ProductNotFound(product_name.to_string()));
        }
        Ok(prices)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn mean(prices: &[f64]) -> f64 {
    round_price(prices.iter().sum::<f64>() / prices.len() as f64)
}

fn last(prices: &[f64]) -> Option<f64> {
    match prices {
        [.., current] => Some(*current),
        [] => None,
    }
}

fn delta(prices: &[f64]) -> Option<f64> {
    match prices {
        [.., previous, current] => Some(round_price(current - previous)),
        _ => None,
    }
}
