//! Dataset fingerprinting.
//!
//! A BLAKE3 hash over the symbol and every bar field. Reports carry it so two
//! runs over the same input are recognisably the same run.

use crate::domain::PriceSeries;

/// Hex BLAKE3 digest of a price series.
pub fn dataset_hash(series: &PriceSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(series.symbol().as_bytes());
    for bar in series.bars() {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
        hasher.update(&bar.volume.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bar;
    use chrono::NaiveDate;

    fn series(close: f64) -> PriceSeries {
        let bar = Bar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            open: 1.0,
            high: 2.0,
            low: 0.5,
            close,
            volume: 10,
        };
        PriceSeries::new("SPY", vec![bar]).unwrap()
    }

    #[test]
    fn same_input_same_hash() {
        assert_eq!(dataset_hash(&series(1.5)), dataset_hash(&series(1.5)));
    }

    #[test]
    fn any_field_change_changes_hash() {
        assert_ne!(dataset_hash(&series(1.5)), dataset_hash(&series(1.6)));
    }

    #[test]
    fn hash_is_hex_blake3() {
        let hash = dataset_hash(&series(1.5));
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
