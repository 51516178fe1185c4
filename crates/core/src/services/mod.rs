pub mod fetch;
pub mod format;
pub mod market_list;
