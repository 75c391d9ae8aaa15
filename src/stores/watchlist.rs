//! Tracked products (`name;url`).

use std::collections::BTreeSet;

use crate::csv_file::CsvFile;
use crate::error::{PriceWatchError, Result};
use crate::models::WatchlistEntry;

// ---------------------------------------------------------------------------
// WatchlistStore
// ---------------------------------------------------------------------------

/// Store for the list of tracked products.
///
/// The file may also be edited by hand or by an external editor, so nothing
/// here assumes the rows were written through this type.
pub struct WatchlistStore<'a> {
    file: &'a CsvFile,
}

impl<'a> WatchlistStore<'a> {
    /// Create a new `WatchlistStore` bound to the given file.
    pub fn new(file: &'a CsvFile) -> Self {
        Self { file }
    }

    /// Create the file with only the `name;url` header if it is missing.
    pub fn ensure_initialized(&self) -> Result<bool> {
        self.file.ensure_initialized()
    }

    /// Append a product to the watchlist.
    ///
    /// Blank names or URLs are rejected with
    /// [`PriceWatchError::InvalidArgument`]; I/O failures surface as
    /// [`PriceWatchError::Io`].
    pub fn add_entry(&self, name: &str, url: &str) -> Result<WatchlistEntry> {
        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(PriceWatchError::InvalidArgument(
                "product name and URL are both required".to_string(),
            ));
        }

        let entry = WatchlistEntry::new(name, url);
        self.file.append(&entry)?;
        tracing::info!("Added {} to watchlist", entry.name);
        Ok(entry)
    }

    /// All entries in file order.
    pub fn list_entries(&self) -> Result<Vec<WatchlistEntry>> {
        self.file.read_rows()
    }

    /// Distinct product names.
    pub fn list_product_names(&self) -> Result<BTreeSet<String>> {
        Ok(self
            .list_entries()?
            .into_iter()
            .map(|e| e.name)
            .collect())
    }

    /// Replace the whole watchlist, e.g. after rows were edited or removed
    /// in a table editor.
    pub fn replace_entries(&self, entries: &[WatchlistEntry]) -> Result<()> {
        if let Some(bad) = entries
            .iter()
            .find(|e| e.name.trim().is_empty() || e.url.trim().is_empty())
        {
            return Err(PriceWatchError::InvalidArgument(format!(
                "watchlist row has a blank field: {:?}",
                bad
            )));
        }
        self.file.rewrite(entries)
    }
}
