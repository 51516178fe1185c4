pub mod chart;
pub mod coin;
pub mod query;
pub mod settings;
