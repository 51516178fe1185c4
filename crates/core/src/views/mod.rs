pub mod detail;
pub mod market;
pub mod watchlist;
