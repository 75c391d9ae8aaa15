//! Product price tracker.
//!
//! Scrapes prices for a watchlist of product pages, appends them to a
//! semicolon-delimited history file and answers the queries a price
//! dashboard needs (current, delta, max, min, average, pivot table, time
//! series).
//!
//! # Quick start
//!
//! ```no_run
//! use pricewatch::PriceWatch;
//!
//! let pw = PriceWatch::builder().data_dir("data").build().unwrap();
//!
//! pw.watchlist()
//!     .add_entry("Widget", "https://www.artisan.cz/widget")
//!     .unwrap();
//!
//! // Fetch today's prices, append them and drop same-day duplicates
//! let report = pw.run().unwrap();
//! println!("{} saved, {} failed", report.saved.len(), report.failures.len());
//!
//! let current = pw.history().current_price("Widget").unwrap();
//! ```

pub mod config;
pub mod csv_file;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod stores;

pub use config::StoreConfig;
pub use csv_file::CsvFile;
pub use error::{PriceWatchError, Result};
pub use fetcher::{HttpPriceFetcher, PriceSource};
pub use models::{BatchReport, PriceGrid, PriceRecord, PriceSummary, WatchlistEntry};
pub use stores::{HistoryStore, WatchlistStore};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// PriceWatchBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceWatch`] instance.
///
/// Use [`PriceWatch::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](PriceWatchBuilder::build).
pub struct PriceWatchBuilder {
    data_dir: Option<PathBuf>,
    watchlist_path: Option<PathBuf>,
    history_path: Option<PathBuf>,
    timeout: Duration,
    price_selector: String,
    user_agent: String,
}

impl Default for PriceWatchBuilder {
    fn default() -> Self {
        Self {
            data_dir: None,
            watchlist_path: None,
            history_path: None,
            timeout: config::DEFAULT_TIMEOUT,
            price_selector: config::PRICE_SELECTOR.to_string(),
            user_agent: config::USER_AGENT.to_string(),
        }
    }
}

impl PriceWatchBuilder {
    /// Directory holding `url.csv` and `scraped_data.csv`.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/pricewatch` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the watchlist file location. Takes precedence over `data_dir`.
    pub fn watchlist_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.watchlist_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the price history file location. Takes precedence over `data_dir`.
    pub fn history_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.history_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the HTTP timeout for each price fetch.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// CSS selector of the element holding the price text.
    pub fn price_selector(mut self, selector: &str) -> Self {
        self.price_selector = selector.to_string();
        self
    }

    pub fn user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Resolve the file locations without building an HTTP client.
    pub fn store_config(&self) -> StoreConfig {
        let dir = self
            .data_dir
            .clone()
            .unwrap_or_else(config::default_data_dir);
        let mut store = StoreConfig::in_dir(dir);
        if let Some(p) = &self.watchlist_path {
            store.watchlist_path = p.clone();
        }
        if let Some(p) = &self.history_path {
            store.history_path = p.clone();
        }
        store
    }

    /// Build the tracker with an HTTP price fetcher.
    ///
    /// Does not touch the filesystem; files are created on first use.
    pub fn build(self) -> Result<PriceWatch> {
        let fetcher =
            HttpPriceFetcher::new(self.timeout, &self.price_selector, &self.user_agent)?;
        Ok(PriceWatch::with_source(self.store_config(), fetcher))
    }
}

// ---------------------------------------------------------------------------
// PriceWatch
// ---------------------------------------------------------------------------

/// The main entry point: owns both backing files and the price source.
///
/// Store accessors return lightweight wrappers that borrow the files.
pub struct PriceWatch<S = HttpPriceFetcher> {
    config: StoreConfig,
    watchlist_file: CsvFile,
    history_file: CsvFile,
    source: S,
}

impl PriceWatch {
    /// Create a new builder for configuring the tracker.
    pub fn builder() -> PriceWatchBuilder {
        PriceWatchBuilder::default()
    }
}

impl<S: PriceSource> PriceWatch<S> {
    /// Create a tracker over explicit paths with a custom price source.
    pub fn with_source(config: StoreConfig, source: S) -> Self {
        let watchlist_file = CsvFile::new(&config.watchlist_path, &config::WATCHLIST_HEADER);
        let history_file = CsvFile::new(&config.history_path, &config::HISTORY_HEADER);
        Self {
            config,
            watchlist_file,
            history_file,
            source,
        }
    }

    // -- Store accessors ----------------------------------------------------

    /// Access the watchlist store.
    pub fn watchlist(&self) -> WatchlistStore<'_> {
        WatchlistStore::new(&self.watchlist_file)
    }

    /// Access the price history store.
    pub fn history(&self) -> HistoryStore<'_> {
        HistoryStore::new(&self.history_file)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // -- Batch run ----------------------------------------------------------

    /// Create both files with header rows if they are missing.
    pub fn ensure_initialized(&self) -> Result<()> {
        self.watchlist().ensure_initialized()?;
        self.history().ensure_initialized()?;
        Ok(())
    }

    /// One batch run: fetch every watchlist entry, append the results, then
    /// deduplicate the history.
    pub fn run(&self) -> Result<BatchReport> {
        self.ensure_initialized()?;

        let entries = self.watchlist().list_entries()?;
        tracing::info!("Scraping {} watchlist entries", entries.len());

        let history = self.history();
        let mut report = history.run_batch(&self.source, &entries)?;
        report.duplicates_removed = history.deduplicate()?;

        tracing::info!(
            "Batch complete: {} saved, {} failed, {} duplicates removed",
            report.saved.len(),
            report.failures.len(),
            report.duplicates_removed
        );
        Ok(report)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl<S> fmt::Display for PriceWatch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceWatch(watchlist={}, history={})",
            self.config.watchlist_path.display(),
            self.config.history_path.display()
        )
    }
}
