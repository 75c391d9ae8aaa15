//! Stores over the two backing files.
//!
//! Each store borrows a [`CsvFile`](crate::csv_file::CsvFile) and is stateless
//! per call: every operation works on the file content as it is right now.

pub mod history;
pub mod watchlist;

pub use history::HistoryStore;
pub use watchlist::WatchlistStore;
