//! Histogram buckets and the gap-filled series the slider draws from.
//!
//! Raw price histograms arrive as a map from integer ranges to counts. The
//! slider needs them as one contiguous run: sorted by lower bound, with every
//! bucket starting exactly where the previous one ends. [`BucketSeries`] is
//! that run, and [`BucketSeries::normalize`] builds it by filling holes with
//! zero-count buckets.

use std::ops::RangeInclusive;

use tracing::{debug, warn};

use crate::error::BucketError;

/// A single histogram bar: an integer range and how many values fall in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bucket {
    lower: i64,
    upper: i64,
    count: u64,
}

impl Bucket {
    /// Creates a bucket covering `range` with `count` values.
    pub fn new(range: RangeInclusive<i64>, count: u64) -> Self {
        Self {
            lower: *range.start(),
            upper: *range.end(),
            count,
        }
    }

    fn gap(lower: i64, upper: i64) -> Self {
        Self {
            lower,
            upper,
            count: 0,
        }
    }

    /// Number of values in this bucket.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The covered range, bounds included.
    pub fn range(&self) -> RangeInclusive<i64> {
        self.lower..=self.upper
    }

    /// Lower bound of the range.
    pub fn lower(&self) -> i64 {
        self.lower
    }

    /// Upper bound of the range.
    pub fn upper(&self) -> i64 {
        self.upper
    }
}

/// The domain covered by a non-empty series: the first bucket's lower bound to
/// the last bucket's upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    /// Lower bound of the first bucket.
    pub lower: i64,
    /// Upper bound of the last bucket.
    pub upper: i64,
}

impl Span {
    /// `upper - lower`. Never overflows, even for spans covering all of `i64`.
    pub fn width(&self) -> u64 {
        self.upper.abs_diff(self.lower)
    }

    /// Returns `true` when the span has zero width and cannot be divided by.
    pub fn is_degenerate(&self) -> bool {
        self.upper == self.lower
    }
}

/// Buckets sorted by lower bound where each bucket starts at the previous
/// bucket's upper bound.
///
/// A series is built once from raw histogram data and then only read; replace
/// it wholesale when the data changes.
///
/// # Examples
///
/// ```
/// use price_filter::bucket::BucketSeries;
///
/// let series = BucketSeries::normalize([(2..=3, 1500), (0..=1, 500)]);
/// let ranges: Vec<_> = series.iter().map(|b| (b.range(), b.count())).collect();
/// assert_eq!(ranges, vec![(0..=1, 500), (1..=2, 0), (2..=3, 1500)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BucketSeries {
    buckets: Vec<Bucket>,
}

impl BucketSeries {
    /// Creates an empty series.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts `entries` by lower bound and fills every hole between
    /// consecutive ranges with a zero-count bucket.
    ///
    /// Input that is already contiguous comes back in sorted order and
    /// otherwise untouched. Overlapping ranges are not validated: they are
    /// kept as given and no gap is synthesized between them. Use
    /// [`BucketSeries::try_normalize`] to reject such input instead.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn normalize<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RangeInclusive<i64>, u64)>,
    {
        let mut buckets: Vec<Bucket> = entries
            .into_iter()
            .map(|(range, count)| Bucket::new(range, count))
            .collect();
        sort_by_lower(&mut buckets);

        let gaps = find_gaps(&buckets);
        if gaps.is_empty() {
            return Self { buckets };
        }

        debug!(gaps = gaps.len(), "filled holes between bucket ranges");
        buckets.extend(gaps);
        sort_by_lower(&mut buckets);
        Self { buckets }
    }

    /// Like [`BucketSeries::normalize`], but rejects inverted, duplicated or
    /// overlapping ranges.
    pub fn try_normalize<I>(entries: I) -> Result<Self, BucketError>
    where
        I: IntoIterator<Item = (RangeInclusive<i64>, u64)>,
    {
        let mut buckets: Vec<Bucket> = entries
            .into_iter()
            .map(|(range, count)| Bucket::new(range, count))
            .collect();

        if let Some(bucket) = buckets.iter().find(|b| b.lower > b.upper) {
            return Err(BucketError::InvertedRange {
                lower: bucket.lower,
                upper: bucket.upper,
            });
        }

        sort_by_lower(&mut buckets);
        for pair in buckets.windows(2) {
            let (previous, current) = (pair[0], pair[1]);
            if current.lower < previous.upper || current.range() == previous.range() {
                return Err(BucketError::MalformedRangeSet {
                    previous: previous.range(),
                    current: current.range(),
                });
            }
        }

        Ok(Self::normalize(
            buckets.into_iter().map(|b| (b.range(), b.count)),
        ))
    }

    /// The 14-bucket price histogram used by the showcase.
    pub fn sample() -> Self {
        Self::normalize([
            (0..=1, 500),
            (1..=2, 1000),
            (2..=3, 1500),
            (3..=4, 1700),
            (4..=5, 1850),
            (5..=6, 2300),
            (6..=7, 2000),
            (7..=8, 1725),
            (8..=9, 1200),
            (9..=10, 750),
            (10..=11, 2000),
            (11..=12, 1725),
            (12..=13, 1200),
            (13..=14, 750),
        ])
    }

    /// The covered domain, or `None` for an empty series.
    pub fn span(&self) -> Option<Span> {
        let first = self.buckets.first()?;
        let last = self.buckets.last()?;
        Some(Span {
            lower: first.lower,
            upper: last.upper,
        })
    }

    /// The largest bucket count, `0` for an empty series.
    pub fn max_count(&self) -> u64 {
        self.buckets.iter().map(Bucket::count).max().unwrap_or(0)
    }

    /// Number of buckets, synthesized gaps included.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if the series holds no buckets.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Iterates buckets in ascending order.
    pub fn iter(&self) -> std::slice::Iter<'_, Bucket> {
        self.buckets.iter()
    }

    /// The buckets as a slice.
    pub fn as_slice(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Returns `true` if every bucket starts at the previous bucket's upper
    /// bound.
    pub fn is_contiguous(&self) -> bool {
        self.buckets
            .windows(2)
            .all(|pair| pair[0].upper == pair[1].lower)
    }
}

impl<'a> IntoIterator for &'a BucketSeries {
    type Item = &'a Bucket;
    type IntoIter = std::slice::Iter<'a, Bucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

impl FromIterator<(RangeInclusive<i64>, u64)> for BucketSeries {
    fn from_iter<T: IntoIterator<Item = (RangeInclusive<i64>, u64)>>(iter: T) -> Self {
        Self::normalize(iter)
    }
}

fn sort_by_lower(buckets: &mut [Bucket]) {
    buckets.sort_by_key(|bucket| bucket.lower);
}

/// Zero-count buckets covering each hole between consecutive sorted buckets.
fn find_gaps(sorted: &[Bucket]) -> Vec<Bucket> {
    sorted
        .windows(2)
        .filter_map(|pair| {
            let (previous, current) = (pair[0], pair[1]);
            if current.lower > previous.upper {
                Some(Bucket::gap(previous.upper, current.lower))
            } else {
                if current.lower < previous.upper {
                    warn!(
                        previous = ?previous.range(),
                        current = ?current.range(),
                        "overlapping bucket ranges left as given"
                    );
                }
                None
            }
        })
        .collect()
}
