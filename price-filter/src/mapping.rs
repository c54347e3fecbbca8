//! Conversion between normalized handle progress and domain values.
//!
//! Progress is always in `0.0..=1.0`. The domain is the [`Span`] of the
//! current [`BucketSeries`].
//!
//! The price filter this crate reproduces maps progress with
//! `progress * (lower + (upper - lower))`, which only agrees with linear
//! interpolation when the span starts at zero. That formula is kept as
//! [`DomainMapping::Literal`] and is the default; [`DomainMapping::Linear`] is
//! the interpolating alternative. The two inverses differ accordingly.
//!
//! [`Span`]: crate::bucket::Span

use crate::bucket::BucketSeries;

/// How progress maps onto the series span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DomainMapping {
    /// `value = progress * (lower + (upper - lower))` and
    /// `progress = value / (upper - lower)`.
    #[default]
    Literal,
    /// `value = lower + progress * (upper - lower)` and
    /// `progress = (value - lower) / (upper - lower)`.
    Linear,
}

impl DomainMapping {
    /// Maps `progress` to a domain value.
    ///
    /// An empty series has no span, so `progress` is returned unchanged.
    pub fn progress_to_value(self, progress: f32, series: &BucketSeries) -> f64 {
        let progress = f64::from(progress);
        let Some(span) = series.span() else {
            return progress;
        };
        // Bounds are widened before subtracting so spans near the i64 limits
        // cannot overflow.
        let (lower, upper) = (span.lower as f64, span.upper as f64);
        match self {
            Self::Literal => progress * (lower + (upper - lower)),
            Self::Linear => lower + progress * (upper - lower),
        }
    }

    /// Maps a domain value back to progress.
    ///
    /// Returns `None` when the series is empty or its span has zero width;
    /// callers should leave the current progress untouched in that case.
    pub fn value_to_progress(self, value: f64, series: &BucketSeries) -> Option<f32> {
        let span = series.span()?;
        if span.is_degenerate() {
            return None;
        }
        let width = span.width() as f64;
        let progress = match self {
            Self::Literal => value / width,
            Self::Linear => (value - span.lower as f64) / width,
        };
        Some(progress as f32)
    }
}

/// [`DomainMapping::progress_to_value`] with the default mapping.
pub fn progress_to_value(progress: f32, series: &BucketSeries) -> f64 {
    DomainMapping::default().progress_to_value(progress, series)
}

/// [`DomainMapping::value_to_progress`] with the default mapping.
pub fn value_to_progress(value: f64, series: &BucketSeries) -> Option<f32> {
    DomainMapping::default().value_to_progress(value, series)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_series() -> BucketSeries {
        BucketSeries::normalize([(10..=15, 1), (15..=20, 1)])
    }

    #[test]
    fn literal_midpoint_of_sample() {
        let series = BucketSeries::sample();
        assert_eq!(progress_to_value(0.5, &series), 7.0);
        assert_eq!(progress_to_value(0.0, &series), 0.0);
        assert_eq!(progress_to_value(1.0, &series), 14.0);
    }

    #[test]
    fn literal_formula_ignores_the_lower_bound_offset() {
        // lower + (upper - lower) collapses to upper.
        let series = offset_series();
        assert_eq!(progress_to_value(0.5, &series), 10.0);
        assert_eq!(
            DomainMapping::Linear.progress_to_value(0.5, &series),
            15.0
        );
    }

    #[test]
    fn empty_series_maps_identity() {
        let series = BucketSeries::new();
        assert_eq!(progress_to_value(0.42, &series), f64::from(0.42_f32));
        assert_eq!(value_to_progress(3.0, &series), None);
    }

    #[test]
    fn extreme_bounds_map_without_overflow() {
        let series = BucketSeries::normalize([(i64::MIN..=0, 1), (0..=i64::MAX, 1)]);

        let value = progress_to_value(0.5, &series);
        assert!((value / i64::MAX as f64 - 0.5).abs() < 1e-9);
        assert_eq!(DomainMapping::Linear.progress_to_value(0.5, &series), 0.0);
        assert_eq!(
            DomainMapping::Linear.progress_to_value(0.0, &series),
            i64::MIN as f64
        );

        let back = DomainMapping::Linear.value_to_progress(0.0, &series).unwrap();
        assert!((back - 0.5).abs() < 1e-6);
    }

    #[test]
    fn prices_past_f32_precision_stay_exact() {
        let series = BucketSeries::normalize([(0..=100_000_001, 1)]);
        assert_eq!(progress_to_value(1.0, &series), 100_000_001.0);
        assert_eq!(value_to_progress(100_000_001.0, &series), Some(1.0));
    }

    #[test]
    fn degenerate_span_has_no_inverse() {
        let series = BucketSeries::normalize([(4..=4, 10)]);
        assert_eq!(value_to_progress(4.0, &series), None);
        assert_eq!(DomainMapping::Linear.value_to_progress(4.0, &series), None);
    }

    #[test]
    fn literal_round_trip_holds_when_span_starts_at_zero() {
        let series = BucketSeries::sample();
        for step in 0..=100 {
            let progress = step as f32 / 100.0;
            let value = progress_to_value(progress, &series);
            let back = value_to_progress(value, &series).unwrap();
            assert!((back - progress).abs() < 1e-6, "{progress} -> {back}");
        }
    }

    #[test]
    fn literal_round_trip_scales_by_upper_over_width_otherwise() {
        // value = p * upper, progress' = p * upper / (upper - lower).
        let series = offset_series();
        let back = value_to_progress(progress_to_value(0.25, &series), &series).unwrap();
        assert!((back - 0.25 * 20.0 / 10.0).abs() < 1e-6);
    }

    #[test]
    fn linear_round_trip_holds_for_any_span() {
        let series = offset_series();
        let mapping = DomainMapping::Linear;
        for step in 0..=20 {
            let progress = step as f32 / 20.0;
            let value = mapping.progress_to_value(progress, &series);
            let back = mapping.value_to_progress(value, &series).unwrap();
            assert!((back - progress).abs() < 1e-6);
        }
    }
}
