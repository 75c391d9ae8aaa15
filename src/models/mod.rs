pub mod price;
pub mod report;
pub mod watchlist;

pub use price::*;
pub use report::*;
pub use watchlist::*;
