use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WatchlistEntry — One tracked product (row of url.csv)
// ---------------------------------------------------------------------------

/// A tracked product and the page its price is scraped from.
///
/// `name` is the join key for every price query; it is not required to be
/// unique in the watchlist file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    pub name: String,
    pub url: String,
}

impl WatchlistEntry {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}
