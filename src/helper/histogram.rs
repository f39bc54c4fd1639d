use std::collections::BTreeMap;

/// Ordered mapping from integer bin (length in bp or nt) to count.
pub type Histogram = BTreeMap<i64, u64>;

/// Percentage-normalized counterpart of a `Histogram`.
pub type PercentHistogram = BTreeMap<i64, f64>;

/// Bins supported by fewer reads than this are dropped from
/// fragment-length histograms to prevent a long flat tail.
pub const MIN_CNT_TO_SHOW_ON_PLOT: u64 = 5;

/// Converts a count histogram to percentages of its total.
/// Zero-count bins stay at 0 and an empty histogram stays empty, so the
/// total is never used as a divisor when it could be zero.
pub fn percent_normalized(hist: &Histogram) -> PercentHistogram {
    let mut percent = PercentHistogram::new();
    if hist.is_empty() {
        return percent;
    }
    let total: u64 = hist.values().sum();
    for (&bin, &count) in hist {
        let value = if count > 0 {
            (count as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        percent.insert(bin, value);
    }
    percent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_normalized() {
        let hist = Histogram::from([(10, 0), (20, 5), (30, 5)]);
        let percent = percent_normalized(&hist);
        assert_eq!(percent.get(&10), Some(&0.0));
        assert_eq!(percent.get(&20), Some(&50.0));
        assert_eq!(percent.get(&30), Some(&50.0));
    }

    #[test]
    fn test_percent_normalized_empty() {
        let percent = percent_normalized(&Histogram::new());
        assert!(percent.is_empty());
    }

    #[test]
    fn test_percent_normalized_all_zero_bins() {
        // Total is zero but no bin has count > 0, so no division happens.
        let hist = Histogram::from([(10, 0), (20, 0)]);
        let percent = percent_normalized(&hist);
        assert_eq!(percent.get(&10), Some(&0.0));
        assert_eq!(percent.get(&20), Some(&0.0));
    }
}
