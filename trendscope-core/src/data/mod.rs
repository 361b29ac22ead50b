//! Price history collaborators.

pub mod circuit_breaker;
pub mod csv_file;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_file::CsvFileProvider;
pub use provider::{DataError, DataSource, PriceHistoryProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
