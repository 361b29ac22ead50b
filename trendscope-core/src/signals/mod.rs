//! Signals derived from indicator output.
//!
//! Signals look only at the latest observations of a series and never hold
//! state between calls: every classification recomputes from the full input.

pub mod composite;
pub mod macd_status;

pub use composite::{bullish, CompositeScore};
pub use macd_status::{classify_macd, classify_status, MacdState, MacdStatus};
