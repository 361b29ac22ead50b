//! Analysis timeframes and their calendar buckets.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Granularity of a price series.
///
/// Daily is the native provider granularity; the other three are calendar
/// buckets derived from it by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
}

impl Timeframe {
    /// All timeframes in composite-score order.
    pub const ALL: [Timeframe; 4] = [
        Timeframe::Daily,
        Timeframe::Weekly,
        Timeframe::Monthly,
        Timeframe::Quarterly,
    ];

    /// Decimal place this timeframe occupies in the composite total.
    pub fn weight(&self) -> u32 {
        match self {
            Timeframe::Daily => 1,
            Timeframe::Weekly => 10,
            Timeframe::Monthly => 100,
            Timeframe::Quarterly => 1000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
            Timeframe::Quarterly => "Quarterly",
        }
    }

    /// Last calendar day of the bucket containing `date`.
    ///
    /// Weeks end on Sunday, months and quarters on their last calendar day.
    /// Daily buckets are the date itself.
    pub fn bucket_end(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Timeframe::Daily => date,
            Timeframe::Weekly => {
                let to_sunday = 6 - date.weekday().num_days_from_monday();
                date.checked_add_days(Days::new(u64::from(to_sunday)))
                    .unwrap_or(NaiveDate::MAX)
            }
            Timeframe::Monthly => month_end(date.year(), date.month()),
            Timeframe::Quarterly => {
                let quarter_last_month = ((date.month() - 1) / 3 + 1) * 3;
                month_end(date.year(), quarter_last_month)
            }
        }
    }
}

fn month_end(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
