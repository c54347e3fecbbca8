//! Errors reported while validating histogram input.

use std::ops::RangeInclusive;

use thiserror::Error;

/// Errors that can occur while validating bucket ranges with
/// [`BucketSeries::try_normalize`](crate::bucket::BucketSeries::try_normalize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BucketError {
    /// A range whose lower bound is greater than its upper bound.
    #[error("bucket range {lower}..={upper} has its lower bound above its upper bound")]
    InvertedRange {
        /// Lower bound of the offending range.
        lower: i64,
        /// Upper bound of the offending range.
        upper: i64,
    },
    /// Two ranges overlap once sorted by their lower bound.
    #[error("bucket range {current:?} overlaps the preceding range {previous:?}")]
    MalformedRangeSet {
        /// The range that sorts first.
        previous: RangeInclusive<i64>,
        /// The range that starts inside `previous`.
        current: RangeInclusive<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_ranges() {
        let err = BucketError::MalformedRangeSet {
            previous: 0..=4,
            current: 2..=6,
        };
        assert_eq!(
            err.to_string(),
            "bucket range 2..=6 overlaps the preceding range 0..=4"
        );

        let err = BucketError::InvertedRange { lower: 5, upper: 1 };
        assert_eq!(
            err.to_string(),
            "bucket range 5..=1 has its lower bound above its upper bound"
        );
    }
}
