//! Pixel geometry derived from a selection.
//!
//! Everything here is a pure projection of normalized progress onto a
//! [`SliderFrame`]: the three track segments, the thumb offsets, and the
//! stepped histogram silhouette that masks the filled layer. Nothing is
//! stored between layout passes.

use derive_setters::Setters;
use lyon_path::{Path, math::point};
use smallvec::SmallVec;

use crate::bucket::BucketSeries;

const THUMB_SIZE: f32 = 25.0;
const PROGRESS_LINE_HEIGHT: f32 = 3.0;
/// Hairline left between neighbouring histogram bars.
const BAR_GAP: f32 = 0.5;

/// Container geometry, read on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderFrame {
    /// Width of the whole slider.
    pub width: f32,
    /// Height of the whole slider, histogram included.
    pub height: f32,
    /// Diameter of a thumb.
    pub thumb_size: f32,
    /// Thickness of the thin progress line under the histogram.
    pub progress_line_height: f32,
}

impl SliderFrame {
    /// Creates a frame with the default thumb and progress line sizes.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            thumb_size: THUMB_SIZE,
            progress_line_height: PROGRESS_LINE_HEIGHT,
        }
    }

    /// Distance a thumb's left edge can travel: `width - thumb_size`.
    pub fn track_width(&self) -> f32 {
        (self.width - self.thumb_size).max(0.0)
    }

    /// Left edge of a thumb placed at `progress`.
    pub fn thumb_offset(&self, progress: f32) -> f32 {
        progress * self.track_width()
    }

    /// Minimum distance between the two thumbs' left edges when separation
    /// is enforced in pixel space: one thumb plus a third of a thumb.
    pub fn min_handle_spacing(&self) -> f32 {
        self.thumb_size + self.thumb_size / 3.0
    }

    /// The rectangle the histogram is drawn into.
    pub fn histogram_region(&self, inset: MaskInset) -> HistogramRegion {
        match inset {
            MaskInset::None => HistogramRegion {
                x: 0.0,
                width: self.width.max(0.0),
                height: self.height.max(0.0),
                baseline: self.height,
            },
            MaskInset::Thumb => HistogramRegion {
                x: self.thumb_size / 2.0,
                width: self.track_width(),
                height: (self.height - self.thumb_size).max(0.0),
                // Top edge of the progress line, which runs through the thumb centers.
                baseline: self.height - (self.thumb_size + self.progress_line_height) / 2.0,
            },
        }
    }
}

/// Where the histogram sits relative to the slider frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskInset {
    /// The histogram fills the whole frame and stands on its bottom edge.
    #[default]
    None,
    /// The histogram is inset by half a thumb on either side and stands on
    /// the progress line.
    Thumb,
}

/// The rectangle a histogram is drawn into. `baseline` is the y coordinate
/// bars grow up from; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramRegion {
    /// Left edge.
    pub x: f32,
    /// Drawable width.
    pub width: f32,
    /// Height of the tallest bar.
    pub height: f32,
    /// Y coordinate of the bars' bottom edge.
    pub baseline: f32,
}

/// Widths of the empty-left, filled and empty-right parts of a track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RangeSegments {
    /// Empty part left of the `from` handle.
    pub left_inactive: f32,
    /// Filled part between the handles.
    pub active: f32,
    /// Empty remainder right of the `to` handle.
    pub right_inactive: f32,
}

impl RangeSegments {
    /// Splits `width` at `from` and `to` progress.
    pub fn new(from: f32, to: f32, width: f32) -> Self {
        let left_inactive = (from * width).max(0.0);
        let active = ((to - from) * width).max(0.0);
        let right_inactive = (width - left_inactive - active).max(0.0);
        Self {
            left_inactive,
            active,
            right_inactive,
        }
    }

    /// X coordinate where the filled part starts, relative to the track.
    pub fn active_start(&self) -> f32 {
        self.left_inactive
    }

    /// X coordinate where the filled part ends, relative to the track.
    pub fn active_end(&self) -> f32 {
        self.left_inactive + self.active
    }
}

/// One histogram bar in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStep {
    /// Left edge.
    pub x: f32,
    /// Bar width.
    pub width: f32,
    /// Bar height above the baseline.
    pub height: f32,
}

/// The stepped silhouette of a histogram, one bar per bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramMask {
    steps: SmallVec<[MaskStep; 16]>,
    baseline: f32,
}

impl HistogramMask {
    /// Lays `series` out across `region`, the tallest bucket filling the
    /// region's height.
    pub fn new(series: &BucketSeries, region: HistogramRegion) -> Self {
        let baseline = region.baseline;
        if series.is_empty() {
            return Self {
                steps: SmallVec::new(),
                baseline,
            };
        }

        let step_width = region.width / series.len() as f32;
        let max_count = series.max_count();
        let step_height = if max_count == 0 {
            0.0
        } else {
            region.height / max_count as f32
        };

        let steps = series
            .iter()
            .enumerate()
            .map(|(index, bucket)| MaskStep {
                x: region.x + index as f32 * step_width,
                width: step_width,
                height: step_height * bucket.count() as f32,
            })
            .collect();

        Self { steps, baseline }
    }

    /// The bars, left to right.
    pub fn steps(&self) -> &[MaskStep] {
        &self.steps
    }

    /// Y coordinate the bars stand on.
    pub fn baseline(&self) -> f32 {
        self.baseline
    }

    /// Builds the mask as a path of closed rectangles, one per bar.
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        for step in &self.steps {
            let left = step.x + BAR_GAP;
            let right = step.x + step.width;
            let top = self.baseline - step.height;
            builder.begin(point(left, self.baseline));
            builder.line_to(point(left, top));
            builder.line_to(point(right, top));
            builder.line_to(point(right, self.baseline));
            builder.close();
        }
        builder.build()
    }
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderGeometry {
    /// Segments of the thin progress line, across the full frame width.
    pub progress_line: RangeSegments,
    /// Segments of the filled histogram layer, across the histogram region.
    pub histogram_fill: RangeSegments,
    /// Where the histogram is drawn.
    pub region: HistogramRegion,
    /// The silhouette clipping the histogram layer.
    pub mask: HistogramMask,
    /// Left edge of the `from` thumb.
    pub from_thumb_x: f32,
    /// Left edge of the `to` thumb.
    pub to_thumb_x: f32,
}

/// Projects `from`/`to` progress and `series` onto `frame`.
pub fn project(
    from: f32,
    to: f32,
    series: &BucketSeries,
    frame: &SliderFrame,
    inset: MaskInset,
) -> SliderGeometry {
    let region = frame.histogram_region(inset);
    SliderGeometry {
        progress_line: RangeSegments::new(from, to, frame.width),
        histogram_fill: RangeSegments::new(from, to, region.width),
        region,
        mask: HistogramMask::new(series, region),
        from_thumb_x: frame.thumb_offset(from),
        to_thumb_x: frame.thumb_offset(to),
    }
}

#[cfg(test)]
mod tests {
    use lyon_path::PathEvent;

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn segments_split_the_width() {
        let segments = RangeSegments::new(0.25, 0.75, 300.0);
        assert_eq!(segments.left_inactive, 75.0);
        assert_eq!(segments.active, 150.0);
        assert_eq!(segments.right_inactive, 75.0);
        assert_eq!(segments.active_end(), 225.0);
    }

    #[test]
    fn crossed_handles_never_produce_negative_widths() {
        let segments = RangeSegments::new(0.8, 0.2, 100.0);
        assert_eq!(segments.active, 0.0);
        assert!(approx(segments.right_inactive, 20.0));
    }

    #[test]
    fn full_frame_mask_scales_tallest_bucket_to_height() {
        let series = BucketSeries::sample();
        let frame = SliderFrame::new(300.0, 300.0);
        let mask = HistogramMask::new(&series, frame.histogram_region(MaskInset::None));

        assert_eq!(mask.steps().len(), 14);
        assert_eq!(mask.baseline(), 300.0);
        let step_width = 300.0 / 14.0;
        for (index, step) in mask.steps().iter().enumerate() {
            assert!(approx(step.x, index as f32 * step_width));
            assert!(approx(step.width, step_width));
        }
        // 5..=6 holds the 2300 peak.
        assert!(approx(mask.steps()[5].height, 300.0));
        assert!(approx(mask.steps()[0].height, 300.0 * 500.0 / 2300.0));
    }

    #[test]
    fn thumb_inset_mask_stands_on_progress_line() {
        let series = BucketSeries::sample();
        let frame = SliderFrame::new(300.0, 300.0);
        let region = frame.histogram_region(MaskInset::Thumb);
        assert_eq!(region.x, 12.5);
        assert_eq!(region.width, 275.0);
        assert_eq!(region.height, 275.0);
        assert_eq!(region.baseline, 286.0);

        let mask = HistogramMask::new(&series, region);
        assert!(approx(mask.steps()[0].x, 12.5));
        assert!(approx(mask.steps()[0].width, 275.0 / 14.0));
        assert!(approx(mask.steps()[5].height, 275.0));
    }

    #[test]
    fn zero_counts_give_flat_mask() {
        let series = BucketSeries::normalize([(0..=1, 0), (1..=2, 0), (3..=4, 0)]);
        let frame = SliderFrame::new(200.0, 100.0);
        let mask = HistogramMask::new(&series, frame.histogram_region(MaskInset::None));

        assert_eq!(mask.steps().len(), 4);
        for step in mask.steps() {
            assert_eq!(step.height, 0.0);
            assert!(step.x.is_finite() && step.width.is_finite());
        }
    }

    #[test]
    fn empty_series_gives_empty_mask() {
        let frame = SliderFrame::new(200.0, 100.0);
        let mask = HistogramMask::new(&BucketSeries::new(), frame.histogram_region(MaskInset::None));
        assert!(mask.steps().is_empty());
        assert_eq!(mask.to_path().iter().count(), 0);
    }

    #[test]
    fn path_has_one_closed_rectangle_per_bucket() {
        let series = BucketSeries::normalize([(0..=1, 500), (2..=3, 1500)]);
        let frame = SliderFrame::new(300.0, 150.0);
        let path = HistogramMask::new(&series, frame.histogram_region(MaskInset::None)).to_path();

        let begins: Vec<_> = path
            .iter()
            .filter_map(|event| match event {
                PathEvent::Begin { at } => Some(at),
                _ => None,
            })
            .collect();
        assert_eq!(begins.len(), 3);
        assert_eq!(begins[0], point(0.5, 150.0));
        assert_eq!(begins[1], point(100.5, 150.0));

        let closed = path
            .iter()
            .filter(|event| matches!(event, PathEvent::End { close: true, .. }))
            .count();
        assert_eq!(closed, 3);

        // The gap bucket has no height, so its top edge sits on the baseline.
        let gap_top = path
            .iter()
            .filter_map(|event| match event {
                PathEvent::Line { to, .. } => Some(to),
                _ => None,
            })
            .nth(3)
            .unwrap();
        assert_eq!(gap_top, point(100.5, 150.0));
    }

    #[test]
    fn project_places_thumbs_on_the_track() {
        let series = BucketSeries::sample();
        let frame = SliderFrame::new(300.0, 300.0);
        let geometry = project(0.5, 1.0, &series, &frame, MaskInset::Thumb);

        assert_eq!(geometry.from_thumb_x, 137.5);
        assert_eq!(geometry.to_thumb_x, 275.0);
        assert_eq!(geometry.progress_line.left_inactive, 150.0);
        assert_eq!(geometry.progress_line.active, 150.0);
        assert_eq!(geometry.histogram_fill.left_inactive, 137.5);
        assert_eq!(geometry.histogram_fill.right_inactive, 0.0);
        assert_eq!(geometry.mask.steps().len(), 14);
    }

    #[test]
    fn narrow_frame_clamps_track() {
        let frame = SliderFrame::new(20.0, 20.0);
        assert_eq!(frame.track_width(), 0.0);
        assert_eq!(frame.histogram_region(MaskInset::Thumb).height, 0.0);
    }
}
