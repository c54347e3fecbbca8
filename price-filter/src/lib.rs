//! Range selection over a histogram, as used by a dual-handle price filter.
//!
//! The crate holds the model behind the slider, not its drawing:
//!
//! - [`bucket`] turns a sparse `range -> count` histogram into a sorted,
//!   gap-filled [`BucketSeries`].
//! - [`mapping`] converts handle progress (`0.0..=1.0`) to and from domain
//!   values over the series span.
//! - [`controller`] owns the two handles, applies drag input with a minimum
//!   separation, and notifies on every accepted change.
//! - [`layout`] projects the selection onto a [`SliderFrame`]: track segments,
//!   thumb offsets and the stepped histogram mask.
//!
//! # Example
//!
//! ```
//! use price_filter::{
//!     BucketSeries, DragInput, Handle, RangeSliderArgs, RangeSliderController, SliderFrame,
//! };
//!
//! let series = BucketSeries::normalize([(0..=1, 500), (2..=3, 1500)]);
//! assert_eq!(series.len(), 3);
//!
//! let args = RangeSliderArgs::default().on_change(|values| println!("{values}"));
//! let mut controller = RangeSliderController::new(series, args);
//! let frame = SliderFrame::new(300.0, 300.0);
//!
//! controller.begin_drag(Handle::To, &frame);
//! controller.drag(Handle::To, DragInput::Delta(-137.5), &frame);
//! controller.end_drag();
//!
//! assert_eq!(controller.to_progress(), 0.5);
//! assert_eq!(controller.values().to_string(), "From 0 to 1.5");
//!
//! let geometry = controller.geometry(&frame);
//! assert_eq!(geometry.progress_line.active, 150.0);
//! assert_eq!(geometry.mask.steps().len(), 3);
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod bucket;
pub mod callback;
pub mod config;
pub mod controller;
pub mod error;
pub mod layout;
pub mod mapping;

pub use bucket::{Bucket, BucketSeries, Span};
pub use callback::CallbackWith;
pub use config::RangeSliderArgs;
pub use controller::{DragInput, Handle, RangeSliderController, SelectionValues, Separation};
pub use error::BucketError;
pub use layout::{
    HistogramMask, HistogramRegion, MaskInset, MaskStep, RangeSegments, SliderFrame,
    SliderGeometry, project,
};
pub use mapping::{DomainMapping, progress_to_value, value_to_progress};
