//! Domain types for TrendScope

pub mod bar;
pub mod series;

pub use bar::Bar;
pub use series::PriceSeries;
