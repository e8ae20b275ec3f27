use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Metal {
    #[serde(rename = "gold", alias = "GOLD", alias = "Gold", alias = "xau", alias = "XAU")]
    Gold,
    #[serde(rename = "silver", alias = "SILVER", alias = "Silver", alias = "xag", alias = "XAG")]
    Silver,
}

impl Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Metal::Gold => "gold",
                Metal::Silver => "silver",
            }
        )
    }
}

impl Metal {
    pub const ALL: [Metal; 2] = [Metal::Gold, Metal::Silver];
}

/// Chart window selectable by the presentation layer.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "ALL")]
    All,
}

impl Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TimeRange::OneDay => "1D",
                TimeRange::OneWeek => "1W",
                TimeRange::OneMonth => "1M",
                TimeRange::ThreeMonths => "3M",
                TimeRange::SixMonths => "6M",
                TimeRange::OneYear => "1Y",
                TimeRange::FiveYears => "5Y",
                TimeRange::All => "ALL",
            }
        )
    }
}

impl TimeRange {
    pub const ALL: [TimeRange; 8] = [
        TimeRange::OneDay,
        TimeRange::OneWeek,
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
        TimeRange::All,
    ];
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCondition {
    Above,
    Below,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_de_metal() {
        struct TestCase {
            input: &'static str,
            expected: Metal,
        }

        let cases = vec![
            TestCase { input: r#""gold""#, expected: Metal::Gold },
            TestCase { input: r#""XAU""#, expected: Metal::Gold },
            TestCase { input: r#""silver""#, expected: Metal::Silver },
            TestCase { input: r#""Silver""#, expected: Metal::Silver },
        ];

        for (i, test_case) in cases.iter().enumerate() {
            let actual = serde_json::from_str::<Metal>(test_case.input).unwrap();
            assert_eq!(actual, test_case.expected, "Test case {} failed", i);
        }
    }

    #[test]
    fn test_time_range_serde_uses_chart_labels() {
        assert_eq!(serde_json::to_string(&TimeRange::All).unwrap(), r#""ALL""#);
        assert_eq!(
            serde_json::from_str::<TimeRange>(r#""3M""#).unwrap(),
            TimeRange::ThreeMonths
        );
    }

    #[test]
    fn test_unknown_time_range_rejected() {
        assert!(serde_json::from_str::<TimeRange>(r#""2Y""#).is_err());
    }
}
