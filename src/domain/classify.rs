//! Sector-aware valuation status.

use serde::Serialize;

/// Sectors benchmarked against the higher commodity threshold.
pub const COMMODITY_SECTORS: [&str; 3] = ["Energy", "Basic Materials", "Utilities"];

const COMMODITY_THRESHOLD: f64 = 0.15;
const GENERAL_THRESHOLD: f64 = 0.10;

/// Band below the threshold that still counts as fairly priced.
const FAIR_BAND: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Cheap,
    Fair,
    Expensive,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Cheap => "Cheap",
            Status::Fair => "Fair",
            Status::Expensive => "Expensive",
        };
        f.write_str(s)
    }
}

/// FCF-yield threshold for a sector: 15% for commodity sectors, 10%
/// otherwise.
pub fn sector_threshold(sector: &str) -> f64 {
    if COMMODITY_SECTORS.contains(&sector) {
        COMMODITY_THRESHOLD
    } else {
        GENERAL_THRESHOLD
    }
}

/// Classify an FCF yield (decimal ratio) against its sector benchmark.
/// Pure and total: any yield and any sector string map to a status.
pub fn classify(fcf_yield: f64, sector: &str) -> Status {
    let threshold = sector_threshold(sector);
    if fcf_yield >= threshold {
        Status::Cheap
    } else if fcf_yield >= threshold * FAIR_BAND {
        Status::Fair
    } else {
        Status::Expensive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use Status::*;

    #[test]
    fn energy_ten_percent_is_fair() {
        // Commodity threshold 0.15, fair band starts at 0.105.
        assert_eq!(classify(0.10, "Energy"), Fair);
    }

    #[test]
    fn energy_fifteen_percent_is_cheap() {
        assert_eq!(classify(0.15, "Energy"), Cheap);
    }

    #[test]
    fn technology_ten_percent_is_cheap() {
        assert_eq!(classify(0.10, "Technology"), Cheap);
    }

    #[test]
    fn technology_five_percent_is_expensive() {
        // 0.05 < 0.07 fair floor.
        assert_eq!(classify(0.05, "Technology"), Expensive);
    }

    #[test]
    fn technology_seven_percent_is_fair() {
        assert_eq!(classify(0.07, "Technology"), Fair);
    }

    #[test]
    fn unknown_sector_uses_general_threshold() {
        assert_eq!(sector_threshold("Unknown"), 0.10);
        assert_eq!(classify(0.10, "Unknown"), Cheap);
    }

    #[test]
    fn all_commodity_sectors_use_higher_threshold() {
        for sector in COMMODITY_SECTORS {
            assert_eq!(sector_threshold(sector), 0.15);
        }
    }

    #[test]
    fn negative_yield_is_expensive() {
        assert_eq!(classify(-0.30, "Energy"), Expensive);
        assert_eq!(classify(-0.30, "Technology"), Expensive);
    }

    proptest! {
        #[test]
        fn classify_is_total(y in -10.0f64..10.0, sector in "[A-Za-z ]{0,20}") {
            // Any input maps to one of the three statuses without panicking.
            let status = classify(y, &sector);
            prop_assert!(matches!(status, Cheap | Fair | Expensive));
        }

        #[test]
        fn classify_is_monotonic(a in -1.0f64..1.0, b in -1.0f64..1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let rank = |s: Status| match s {
                Expensive => 0,
                Fair => 1,
                Cheap => 2,
            };
            prop_assert!(rank(classify(lo, "Energy")) <= rank(classify(hi, "Energy")));
        }
    }
}
