pub mod backend;
pub mod watchlist;
