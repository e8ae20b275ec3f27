use std::fmt::{self, Display};

use bullion_model::calculator::gold_silver_ratio;
use serde::{Deserialize, Serialize};

/// Long-run average ounces of silver per ounce of gold.
pub const HISTORICAL_AVERAGE_RATIO: f64 = 60.0;
pub const SILVER_UNDERVALUED_ABOVE: f64 = 80.0;
pub const GOLD_UNDERVALUED_BELOW: f64 = 50.0;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    SilverUndervalued,
    GoldUndervalued,
    NormalRange,
}

impl RatioStatus {
    pub fn classify(ratio: f64) -> Self {
        if ratio > SILVER_UNDERVALUED_ABOVE {
            RatioStatus::SilverUndervalued
        } else if ratio < GOLD_UNDERVALUED_BELOW {
            RatioStatus::GoldUndervalued
        } else {
            RatioStatus::NormalRange
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RatioStatus::SilverUndervalued => {
                "Silver may be a better value relative to gold at current prices."
            }
            RatioStatus::GoldUndervalued => {
                "Gold may be a better value relative to silver at current prices."
            }
            RatioStatus::NormalRange => "The gold/silver ratio is within historical norms.",
        }
    }
}

impl Display for RatioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RatioStatus::SilverUndervalued => "Silver Undervalued",
                RatioStatus::GoldUndervalued => "Gold Undervalued",
                RatioStatus::NormalRange => "Normal Range",
            }
        )
    }
}

/// Gold/silver ratio reading for one pair of spot prices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioAnalysis {
    pub gold_price: f64,
    pub silver_price: f64,
    pub ratio: f64,
    pub status: RatioStatus,
    /// Percent above (+) or below (-) [`HISTORICAL_AVERAGE_RATIO`].
    pub deviation_pct: f64,
    /// Gauge fill in percent, capped at 100.
    pub gauge_pct: f64,
}

impl RatioAnalysis {
    pub fn new(gold_price: f64, silver_price: f64) -> Option<Self> {
        let ratio = gold_silver_ratio(gold_price, silver_price)?;

        Some(Self {
            gold_price,
            silver_price,
            ratio,
            status: RatioStatus::classify(ratio),
            deviation_pct: (ratio - HISTORICAL_AVERAGE_RATIO) / HISTORICAL_AVERAGE_RATIO * 100.0,
            gauge_pct: ratio.min(100.0),
        })
    }

    pub fn is_above_average(&self) -> bool {
        self.ratio > HISTORICAL_AVERAGE_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        struct TestCase {
            ratio: f64,
            expected: RatioStatus,
        }

        let cases = vec![
            TestCase { ratio: 84.13, expected: RatioStatus::SilverUndervalued },
            TestCase { ratio: 80.0, expected: RatioStatus::NormalRange },
            TestCase { ratio: 60.0, expected: RatioStatus::NormalRange },
            TestCase { ratio: 50.0, expected: RatioStatus::NormalRange },
            TestCase { ratio: 49.99, expected: RatioStatus::GoldUndervalued },
        ];

        for (i, test_case) in cases.iter().enumerate() {
            assert_eq!(RatioStatus::classify(test_case.ratio), test_case.expected, "Test case {} failed", i);
        }
    }

    #[test]
    fn test_analysis_of_default_prices() {
        let analysis = RatioAnalysis::new(2650.0, 31.5).unwrap();

        assert!((analysis.ratio - 84.1269841).abs() < 1e-6);
        assert_eq!(analysis.status, RatioStatus::SilverUndervalued);
        assert!((analysis.deviation_pct - 40.2116402).abs() < 1e-6);
        assert_eq!(analysis.gauge_pct, analysis.ratio);
        assert!(analysis.is_above_average());
        assert_eq!(analysis.status.to_string(), "Silver Undervalued");
        assert!(analysis.status.description().starts_with("Silver"));
    }

    #[test]
    fn test_gauge_caps_at_hundred() {
        let analysis = RatioAnalysis::new(3000.0, 20.0).unwrap();
        assert_eq!(analysis.ratio, 150.0);
        assert_eq!(analysis.gauge_pct, 100.0);
    }

    #[test]
    fn test_below_average_ratio() {
        let analysis = RatioAnalysis::new(2000.0, 50.0).unwrap();
        assert_eq!(analysis.status, RatioStatus::GoldUndervalued);
        assert!(!analysis.is_above_average());
        assert!(analysis.deviation_pct < 0.0);
    }

    #[test]
    fn test_no_analysis_without_silver_price() {
        assert_eq!(RatioAnalysis::new(2650.0, 0.0), None);
        assert_eq!(RatioAnalysis::new(2650.0, -1.0), None);
    }
}
