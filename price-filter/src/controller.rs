//! The two-handle selection state.
//!
//! [`RangeSliderController`] is the single source of truth for where the
//! handles are. Positions are kept as normalized progress; pixels only come in
//! through drag input and go out through [`RangeSliderController::geometry`].
//! Updates are applied synchronously in call order, and every change that is
//! accepted fires the `on_change` callback exactly once.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::{
    bucket::BucketSeries,
    config::RangeSliderArgs,
    layout::{SliderFrame, SliderGeometry, project},
};

const PROGRESS_MARGIN: f32 = 0.025;

/// One of the two slider handles. `From` is always the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    /// Lower end of the selection.
    From,
    /// Upper end of the selection.
    To,
}

impl Handle {
    /// The opposite handle.
    pub fn other(self) -> Self {
        match self {
            Self::From => Self::To,
            Self::To => Self::From,
        }
    }
}

/// A drag update for one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragInput {
    /// Absolute x of the thumb's left edge.
    Position(f32),
    /// Absolute pointer x; the pointer is taken to be the thumb's center.
    Pointer(f32),
    /// Translation since the previous update of the same drag.
    Delta(f32),
}

/// How the two handles are kept apart while dragging.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Separation {
    /// A candidate closer than `margin` to the opposite handle (in progress)
    /// is dropped and the handle stays where it was.
    RejectWithinMargin {
        /// Minimum progress distance to the opposite handle.
        margin: f32,
    },
    /// The moving handle is clamped so the thumbs' left edges stay at least
    /// [`SliderFrame::min_handle_spacing`] apart.
    ClampToSpacing,
}

impl Default for Separation {
    fn default() -> Self {
        Self::RejectWithinMargin {
            margin: PROGRESS_MARGIN,
        }
    }
}

/// The selection expressed in domain values.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionValues {
    /// Value under the `from` handle.
    pub from: f64,
    /// Value under the `to` handle.
    pub to: f64,
}

impl fmt::Display for SelectionValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "From {} to {}",
            format_value(self.from),
            format_value(self.to)
        )
    }
}

/// At most two fraction digits, trailing zeros dropped.
fn format_value(value: f64) -> String {
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

/// Smaller value first. A NaN is left in place for the caller to reject.
fn ordered(first: f64, second: f64) -> (f64, f64) {
    if second < first {
        (second, first)
    } else {
        (first, second)
    }
}

fn quantize(progress: f32, quantization: f32) -> f32 {
    if quantization <= 0.0 {
        return progress;
    }
    (progress * quantization).round() / quantization
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    handle: Handle,
    /// Unrounded left edge of the thumb, in pixels.
    position: f32,
}

/// Owns the `from`/`to` progress of a range slider over a [`BucketSeries`].
///
/// # Examples
///
/// ```
/// use price_filter::{
///     bucket::BucketSeries,
///     config::RangeSliderArgs,
///     controller::{Handle, RangeSliderController},
///     layout::SliderFrame,
/// };
///
/// let mut controller =
///     RangeSliderController::new(BucketSeries::sample(), RangeSliderArgs::default());
/// let frame = SliderFrame::new(300.0, 300.0);
///
/// assert!(controller.set_from_drag_position(Handle::From, 137.5, &frame));
/// assert_eq!(controller.from_progress(), 0.5);
/// assert_eq!(controller.values().to_string(), "From 7 to 14");
/// ```
#[derive(Debug, Clone)]
pub struct RangeSliderController {
    from: f32,
    to: f32,
    series: BucketSeries,
    args: RangeSliderArgs,
    drag: Option<DragSession>,
    revision: u64,
}

impl RangeSliderController {
    /// Creates a controller selecting the whole series.
    pub fn new(series: BucketSeries, args: RangeSliderArgs) -> Self {
        Self {
            from: 0.0,
            to: 1.0,
            series,
            args,
            drag: None,
            revision: 0,
        }
    }

    /// Creates a controller with the handles placed at domain values.
    ///
    /// The pair is ordered like [`RangeSliderController::set_values`], so the
    /// smaller value goes to `from`. Values are trusted: no separation is
    /// enforced. A handle whose value cannot be mapped (empty series,
    /// zero-width span) keeps its default. Construction does not fire
    /// `on_change`.
    pub fn with_values(
        series: BucketSeries,
        args: RangeSliderArgs,
        from_value: f64,
        to_value: f64,
    ) -> Self {
        let mut controller = Self::new(series, args);
        let (low, high) = ordered(from_value, to_value);
        for (handle, value) in [(Handle::From, low), (Handle::To, high)] {
            if let Some(progress) = controller.progress_for(value) {
                controller.store(handle, progress);
            }
        }
        controller
    }

    /// Progress of the `from` handle.
    pub fn from_progress(&self) -> f32 {
        self.from
    }

    /// Progress of the `to` handle.
    pub fn to_progress(&self) -> f32 {
        self.to
    }

    /// Progress of `handle`.
    pub fn progress(&self, handle: Handle) -> f32 {
        match handle {
            Handle::From => self.from,
            Handle::To => self.to,
        }
    }

    /// Domain value under `handle`.
    pub fn value(&self, handle: Handle) -> f64 {
        self.args
            .mapping
            .progress_to_value(self.progress(handle), &self.series)
    }

    /// Both domain values.
    pub fn values(&self) -> SelectionValues {
        SelectionValues {
            from: self.value(Handle::From),
            to: self.value(Handle::To),
        }
    }

    /// The current bucket series.
    pub fn series(&self) -> &BucketSeries {
        &self.series
    }

    /// The controller's arguments.
    pub fn args(&self) -> &RangeSliderArgs {
        &self.args
    }

    /// Number of change notifications fired so far. Hosts that poll instead
    /// of subscribing can compare it between frames.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The handle currently being dragged, if any.
    pub fn dragging(&self) -> Option<Handle> {
        self.drag.map(|session| session.handle)
    }

    /// Starts a drag gesture on `handle`. [`DragInput::Delta`] updates are
    /// accumulated from here.
    pub fn begin_drag(&mut self, handle: Handle, frame: &SliderFrame) {
        self.drag = Some(DragSession {
            handle,
            position: frame.thumb_offset(self.progress(handle)),
        });
    }

    /// Ends the current drag gesture. Progress is left where it is.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Applies one drag update to `handle`. Returns `true` if the handle moved.
    ///
    /// A `Delta` without an active drag on `handle` starts one from the
    /// handle's current position.
    pub fn drag(&mut self, handle: Handle, input: DragInput, frame: &SliderFrame) -> bool {
        let pixel_x = match input {
            DragInput::Position(x) => x,
            DragInput::Pointer(x) => x - frame.thumb_size / 2.0,
            DragInput::Delta(dx) => self.drag_anchor(handle, frame) + dx,
        };
        self.set_from_drag_position(handle, pixel_x, frame)
    }

    fn drag_anchor(&mut self, handle: Handle, frame: &SliderFrame) -> f32 {
        match self.drag {
            Some(session) if session.handle == handle => session.position,
            _ => {
                self.begin_drag(handle, frame);
                frame.thumb_offset(self.progress(handle))
            }
        }
    }

    /// Moves `handle` so its thumb's left edge sits at `pixel_x`.
    ///
    /// The position is clamped to the track, converted to progress and
    /// rounded to `1 / quantization`, then checked against the opposite handle
    /// with the configured [`Separation`]. Returns `true` if the handle moved.
    pub fn set_from_drag_position(
        &mut self,
        handle: Handle,
        pixel_x: f32,
        frame: &SliderFrame,
    ) -> bool {
        let track = frame.track_width();
        if track <= 0.0 || !pixel_x.is_finite() {
            debug!(?handle, pixel_x, track, "drag ignored: no usable track");
            return false;
        }

        let position = pixel_x.clamp(0.0, track);
        self.pin_drag(handle, position);

        let candidate = quantize(position / track, self.args.quantization);
        self.commit_candidate(handle, candidate, frame)
    }

    fn commit_candidate(&mut self, handle: Handle, candidate: f32, frame: &SliderFrame) -> bool {
        let other = self.progress(handle.other());
        let progress = match self.args.separation {
            Separation::RejectWithinMargin { margin } => {
                let clear = match handle {
                    Handle::From => candidate < other - margin,
                    Handle::To => candidate > other + margin,
                };
                if !clear {
                    debug!(?handle, candidate, other, "drag candidate too close to opposite handle");
                    return false;
                }
                candidate
            }
            Separation::ClampToSpacing => {
                let spacing = frame.min_handle_spacing() / frame.track_width();
                let limited = match handle {
                    Handle::From => candidate.min(other - spacing),
                    Handle::To => candidate.max(other + spacing),
                };
                let limited = limited.clamp(0.0, 1.0);
                if limited != candidate {
                    // The gesture stops where the thumb stops, so panning back
                    // moves the thumb right away.
                    self.pin_drag(handle, frame.thumb_offset(limited));
                }
                limited
            }
        };
        self.update(handle, progress)
    }

    fn pin_drag(&mut self, handle: Handle, position: f32) {
        if let Some(session) = self.drag.as_mut().filter(|s| s.handle == handle) {
            session.position = position;
        }
    }

    /// Places `handle` at a domain value, without enforcing separation.
    ///
    /// Returns `false` and leaves progress untouched when the series has no
    /// usable span.
    pub fn set_value(&mut self, handle: Handle, value: f64) -> bool {
        match self.progress_for(value) {
            Some(progress) => self.update(handle, progress),
            None => {
                warn!(?handle, value, "value not applied: series has no usable span");
                false
            }
        }
    }

    /// Places both handles at once. The smaller value goes to `from`.
    /// Fires `on_change` at most once.
    pub fn set_values(&mut self, first: f64, second: f64) -> bool {
        let (low, high) = ordered(first, second);
        let (Some(from), Some(to)) = (self.progress_for(low), self.progress_for(high)) else {
            warn!(first, second, "values not applied: series has no usable span");
            return false;
        };
        if self.is_current(Handle::From, from) && self.is_current(Handle::To, to) {
            return false;
        }
        self.store(Handle::From, from);
        self.store(Handle::To, to);
        self.notify();
        true
    }

    /// Replaces the histogram. Handle progress is kept; the domain values are
    /// recomputed against the new span and `on_change` fires once.
    pub fn set_buckets(&mut self, series: BucketSeries) {
        debug!(buckets = series.len(), span = ?series.span(), "bucket series replaced");
        self.series = series;
        self.notify();
    }

    /// Pixel geometry of the current selection inside `frame`.
    pub fn geometry(&self, frame: &SliderFrame) -> SliderGeometry {
        project(
            self.from,
            self.to,
            &self.series,
            frame,
            self.args.mask_inset,
        )
    }

    fn progress_for(&self, value: f64) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        self.args
            .mapping
            .value_to_progress(value, &self.series)
            .map(|progress| progress.clamp(0.0, 1.0))
    }

    fn is_current(&self, handle: Handle, progress: f32) -> bool {
        (progress - self.progress(handle)).abs() <= f32::EPSILON
    }

    fn update(&mut self, handle: Handle, progress: f32) -> bool {
        if self.is_current(handle, progress) {
            return false;
        }
        self.store(handle, progress);
        trace!(?handle, progress, "handle moved");
        self.notify();
        true
    }

    fn store(&mut self, handle: Handle, progress: f32) {
        match handle {
            Handle::From => self.from = progress,
            Handle::To => self.to = progress,
        }
    }

    fn notify(&mut self) {
        self.revision += 1;
        self.args.on_change.call(self.values());
    }
}
