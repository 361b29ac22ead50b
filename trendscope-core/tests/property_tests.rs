//! Property tests for analysis invariants.
//!
//! Uses proptest to verify:
//! 1. Resampling keeps the last daily bar of every bucket
//! 2. Composite score digits match the per-timeframe bullish bits
//! 3. Percentile rank is bounded and monotonic in the current close
//! 4. Crossover classification agrees with the sign of MACD minus signal
//! 5. Analysis is deterministic for identical input

use chrono::NaiveDate;
use proptest::prelude::*;
use trendscope_core::domain::{Bar, PriceSeries};
use trendscope_core::indicators::{percent_rank_at, MacdParams};
use trendscope_core::relative_strength::compute_relative_strength;
use trendscope_core::resample::resample;
use trendscope_core::signals::{classify_status, CompositeScore, MacdStatus};
use trendscope_core::{analyze_macd, Timeframe};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_close() -> impl Strategy<Value = f64> {
    (10.0..500.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

/// Closes paired with day gaps (1..=4 calendar days) between sessions.
fn arb_sessions(max_len: usize) -> impl Strategy<Value = Vec<(f64, u8)>> {
    prop::collection::vec((arb_close(), 1u8..=4), 1..max_len)
}

fn arb_pair() -> impl Strategy<Value = (f64, f64)> {
    prop_oneof![
        8 => (-5.0..5.0_f64, -5.0..5.0_f64),
        1 => (Just(f64::NAN), -5.0..5.0_f64),
        1 => (-5.0..5.0_f64, Just(f64::NAN)),
    ]
}

fn build_series(sessions: &[(f64, u8)]) -> PriceSeries {
    let mut date = NaiveDate::from_ymd_opt(2019, 12, 27).unwrap();
    let bars = sessions
        .iter()
        .map(|&(close, gap)| {
            date += chrono::Duration::days(i64::from(gap));
            Bar {
                date,
                open: close,
                high: close,
                low: close,
                close,
                volume: 500,
            }
        })
        .collect();
    PriceSeries::new("PROP", bars).unwrap()
}

// ── 1. Resampling ────────────────────────────────────────────────────

proptest! {
    /// Every resampled bar is the last daily bar of its bucket, re-dated.
    #[test]
    fn resampled_bar_is_last_of_bucket(sessions in arb_sessions(200)) {
        let series = build_series(&sessions);
        for tf in Timeframe::ALL {
            let resampled = resample(&series, tf).unwrap();
            for out in resampled.bars() {
                let last_in_bucket = series
                    .bars()
                    .iter()
                    .filter(|b| tf.bucket_end(b.date) == out.date)
                    .last();
                prop_assert!(last_in_bucket.is_some(), "{} bucket {} has no input", tf, out.date);
                let last = last_in_bucket.unwrap();
                prop_assert_eq!(last.close, out.close);
                prop_assert_eq!(last.volume, out.volume);
            }
        }
    }

    /// One output bar per distinct non-empty bucket, never more.
    #[test]
    fn resampling_skips_empty_buckets(sessions in arb_sessions(200)) {
        let series = build_series(&sessions);
        for tf in Timeframe::ALL {
            let mut ends: Vec<NaiveDate> =
                series.bars().iter().map(|b| tf.bucket_end(b.date)).collect();
            ends.dedup();
            prop_assert_eq!(resample(&series, tf).unwrap().len(), ends.len());
        }
    }
}

// ── 2. Composite score ───────────────────────────────────────────────

proptest! {
    #[test]
    fn composite_digits_match_bits(
        d in arb_pair(), w in arb_pair(), m in arb_pair(), q in arb_pair(),
    ) {
        let pairs = [d, w, m, q];
        let score = CompositeScore::from_pairs(pairs);
        let expected: [bool; 4] = pairs.map(|(macd, signal)| macd >= signal);

        prop_assert_eq!(score.bits(), expected);
        prop_assert_eq!(score.count, expected.iter().filter(|&&b| b).count() as u32);
        prop_assert!(score.total <= 1111);
        let digits = score.total.to_string();
        prop_assert!(digits.chars().all(|c| c == '0' || c == '1'), "total {}", score.total);
    }
}

// ── 3. Percentile rank ───────────────────────────────────────────────

proptest! {
    #[test]
    fn percent_rank_is_bounded(window in prop::collection::vec(arb_close(), 1..120)) {
        let rank = percent_rank_at(&window).unwrap();
        prop_assert!(rank > 0.0 && rank <= 100.0, "rank {} out of (0, 100]", rank);
    }

    /// Raising today's close never lowers its rank against the same history.
    #[test]
    fn percent_rank_monotonic_in_close(
        history in prop::collection::vec(arb_close(), 1..120),
        low in arb_close(),
        bump in 0.0..100.0_f64,
    ) {
        let mut a = history.clone();
        a.push(low);
        let mut b = history;
        b.push(low + bump);
        prop_assert!(percent_rank_at(&b).unwrap() >= percent_rank_at(&a).unwrap());
    }

    /// rs_raw is the sum of its four components whenever it is present.
    #[test]
    fn rs_raw_is_sum_of_horizons(
        sessions in prop::collection::vec((arb_close(), 1u8..=1), 252..320)
    ) {
        let series = build_series(&sessions);
        let table = compute_relative_strength(&series, 50).unwrap();
        for row in table.rows() {
            let parts = [
                row.three_month_rs,
                row.six_month_rs,
                row.nine_month_rs,
                row.twelve_month_rs,
            ];
            match row.rs_raw {
                Some(total) => {
                    let sum: f64 = parts.iter().map(|p| p.unwrap()).sum();
                    prop_assert!((total - sum).abs() < 1e-9);
                }
                None => prop_assert!(parts.iter().any(|p| p.is_none())),
            }
        }
    }
}

// ── 4. Classification ────────────────────────────────────────────────

proptest! {
    #[test]
    fn status_agrees_with_current_sign(
        prev in (-5.0..5.0_f64, -5.0..5.0_f64),
        curr in (-5.0..5.0_f64, -5.0..5.0_f64),
    ) {
        let status = classify_status(prev, curr);
        let (macd, signal) = curr;
        match status {
            MacdStatus::PositiveCrossover => prop_assert!(macd > signal && prev.0 <= prev.1),
            MacdStatus::NegativeCrossover => prop_assert!(macd < signal && prev.0 >= prev.1),
            MacdStatus::Up => prop_assert!(macd >= signal),
            MacdStatus::Down => prop_assert!(signal > macd),
            MacdStatus::Neutral => prop_assert!(false, "finite input classified Neutral"),
        }
    }
}

// ── 5. Determinism ───────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn analysis_is_deterministic(sessions in arb_sessions(400)) {
        let series = build_series(&sessions);
        let first = analyze_macd(&series, MacdParams::default()).unwrap();
        let second = analyze_macd(&series.clone(), MacdParams::default()).unwrap();
        prop_assert_eq!(first, second);

        let rs_a = compute_relative_strength(&series, 100).unwrap();
        let rs_b = compute_relative_strength(&series, 100).unwrap();
        prop_assert_eq!(rs_a, rs_b);
    }
}
