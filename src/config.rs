use std::path::{Path, PathBuf};
use std::time::Duration;

pub const WATCHLIST_FILE: &str = "url.csv";
pub const HISTORY_FILE: &str = "scraped_data.csv";

pub const WATCHLIST_HEADER: [&str; 2] = ["name", "url"];
pub const HISTORY_HEADER: [&str; 3] = ["date", "product", "price"];

pub const DELIMITER: u8 = b';';

/// Day-first date format used in the history file.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Inline price display region on artisan.cz product pages.
pub const PRICE_SELECTOR: &str = "span#product_price_with_tax";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const USER_AGENT: &str = concat!("pricewatch/", env!("CARGO_PKG_VERSION"));

/// Environment variable the scrape binary reads for its data directory.
pub const DATA_DIR_ENV: &str = "PRICEWATCH_DATA_DIR";

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("pricewatch")
    } else {
        PathBuf::from(".pricewatch")
    }
}

/// Locations of the two backing files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub watchlist_path: PathBuf,
    pub history_path: PathBuf,
}

impl StoreConfig {
    pub fn new<W: AsRef<Path>, H: AsRef<Path>>(watchlist_path: W, history_path: H) -> Self {
        Self {
            watchlist_path: watchlist_path.as_ref().to_path_buf(),
            history_path: history_path.as_ref().to_path_buf(),
        }
    }

    /// Place both files under `dir` with their conventional names.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(WATCHLIST_FILE), dir.join(HISTORY_FILE))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::in_dir(default_data_dir())
    }
}
