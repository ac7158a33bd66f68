use ta::Next;
use ta::indicators::{
    ExponentialMovingAverage, MovingAverageConvergenceDivergence, RelativeStrengthIndex,
    SimpleMovingAverage,
};

/// Broad direction of a price series, judged from moving-average spread.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TrendDirection {
    Uptrend,
    Downtrend,
    Sideways,
    Unknown,
}

pub fn simple_moving_average(closes: &[f64], window: usize) -> Vec<f64> {
    let mut sma = SimpleMovingAverage::new(window).unwrap();
    closes.iter().map(|&x| sma.next(x)).collect()
}

pub fn exponential_moving_average(closes: &[f64], window: usize) -> Vec<f64> {
    let mut ema = ExponentialMovingAverage::new(window).unwrap();
    closes.iter().map(|&x| ema.next(x)).collect()
}

pub fn relative_strength(closes: &[f64], window: usize) -> Vec<f64> {
    let mut rsi = RelativeStrengthIndex::new(window).unwrap();
    closes.iter().map(|&x| rsi.next(x)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

pub fn macd(closes: &[f64]) -> Vec<MacdPoint> {
    let mut ind = MovingAverageConvergenceDivergence::new(12, 26, 9).unwrap();

    closes
        .iter()
        .map(|&x| {
            let out = ind.next(x);
            MacdPoint {
                macd: out.macd,
                signal: out.signal,
                histogram: out.histogram,
            }
        })
        .collect()
}

/// Compares a short moving average against one twice as long; the short
/// average must clear the long one by 2% either way to count as a trend.
pub fn analyze_trend(closes: &[f64], window: usize) -> TrendDirection {
    if closes.len() < window * 2 {
        return TrendDirection::Unknown;
    }

    let short = simple_moving_average(closes, window);
    let long = simple_moving_average(closes, window * 2);

    match (short.last(), long.last()) {
        (Some(&s), Some(&l)) => {
            if s > l * 1.02 {
                TrendDirection::Uptrend
            } else if s < l * 0.98 {
                TrendDirection::Downtrend
            } else {
                TrendDirection::Sideways
            }
        }
        _ => TrendDirection::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_of_a_flat_series_stay_flat() {
        let closes = vec![50.0; 40];

        assert!(
            simple_moving_average(&closes, 10)
                .iter()
                .all(|v| (v - 50.0).abs() < 1e-9)
        );
        assert!(
            exponential_moving_average(&closes, 10)
                .iter()
                .all(|v| (v - 50.0).abs() < 1e-9)
        );
    }

    #[test]
    fn sma_tracks_the_window() {
        let closes = [1.0, 2.0, 3.0, 4.0];
        let sma = simple_moving_average(&closes, 2);
        assert_eq!(sma.last(), Some(&3.5));
    }

    #[test]
    fn macd_of_a_flat_series_is_zero() {
        let closes = vec![80.0; 60];
        let last = *macd(&closes).last().unwrap();

        assert!(last.macd.abs() < 1e-9);
        assert!(last.signal.abs() < 1e-9);
        assert!(last.histogram.abs() < 1e-9);
    }

    #[test]
    fn rsi_follows_one_sided_moves() {
        let rising: Vec<f64> = (1..=60).map(|i| i as f64).collect();
        let falling: Vec<f64> = (1..=60).rev().map(|i| i as f64).collect();

        assert!(*relative_strength(&rising, 14).last().unwrap() > 70.0);
        assert!(*relative_strength(&falling, 14).last().unwrap() < 30.0);
    }

    #[test]
    fn trend_classification_covers_the_shapes() {
        let rising: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let falling: Vec<f64> = (1..=100).rev().map(|i| i as f64).collect();

        assert_eq!(analyze_trend(&rising, 10), TrendDirection::Uptrend);
        assert_eq!(analyze_trend(&falling, 10), TrendDirection::Downtrend);
        assert_eq!(analyze_trend(&[25.0; 100], 10), TrendDirection::Sideways);
        assert_eq!(analyze_trend(&[25.0; 5], 10), TrendDirection::Unknown);
    }
}
