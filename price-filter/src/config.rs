//! Behaviour settings for a range slider controller.

use derive_setters::Setters;

use crate::{
    callback::CallbackWith,
    controller::{SelectionValues, Separation},
    layout::MaskInset,
    mapping::DomainMapping,
};

const DRAG_QUANTIZATION: f32 = 100.0;

/// Arguments for a [`RangeSliderController`](crate::controller::RangeSliderController).
///
/// # Examples
///
/// ```
/// use price_filter::{
///     config::RangeSliderArgs,
///     controller::Separation,
///     mapping::DomainMapping,
/// };
///
/// let args = RangeSliderArgs::default()
///     .separation(Separation::ClampToSpacing)
///     .mapping(DomainMapping::Linear)
///     .on_change(|values| println!("{values}"));
/// assert_eq!(args.quantization, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct RangeSliderArgs {
    /// How the two handles are kept apart while dragging.
    pub separation: Separation,
    /// How progress maps onto the bucket span.
    pub mapping: DomainMapping,
    /// Where the histogram sits inside the slider frame.
    pub mask_inset: MaskInset,
    /// Drag candidates are rounded to the nearest `1 / quantization` of
    /// progress. `0.0` disables rounding.
    pub quantization: f32,
    /// Called once per accepted change with the new domain values.
    #[setters(skip)]
    pub on_change: CallbackWith<SelectionValues>,
}

impl RangeSliderArgs {
    /// Sets the on_change handler.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(SelectionValues) + Send + Sync + 'static,
    {
        self.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the on_change handler using a shared callback.
    pub fn on_change_shared(mut self, on_change: impl Into<CallbackWith<SelectionValues>>) -> Self {
        self.on_change = on_change.into();
        self
    }
}

impl Default for RangeSliderArgs {
    fn default() -> Self {
        Self {
            separation: Separation::default(),
            mapping: DomainMapping::default(),
            mask_inset: MaskInset::default(),
            quantization: DRAG_QUANTIZATION,
            on_change: CallbackWith::noop(),
        }
    }
}
