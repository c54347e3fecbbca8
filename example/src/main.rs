//! Headless price filter showcase.
//!
//! Drives a [`RangeSliderController`] with scripted gestures the way a UI
//! layer would, and logs the label text and chart a renderer would draw.

mod chart;

use std::sync::Arc;

use parking_lot::Mutex;
use price_filter::{
    BucketSeries, DragInput, Handle, MaskInset, RangeSliderArgs, RangeSliderController,
    SliderFrame,
};
use tracing::{info, warn};

const CHART_ROWS: usize = 6;

struct AppState {
    label: Arc<Mutex<String>>,
}

impl AppState {
    fn new() -> Self {
        Self {
            label: Arc::new(Mutex::new(String::new())),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("off,price_filter=info,example=info"))?;
    tracing_subscriber::fmt()
        .pretty()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let state = AppState::new();
    let frame = SliderFrame::new(300.0, 120.0);

    let label = Arc::clone(&state.label);
    let args = RangeSliderArgs::default()
        .mask_inset(MaskInset::Thumb)
        .on_change(move |values| *label.lock() = values.to_string());
    let mut controller =
        RangeSliderController::with_values(BucketSeries::sample(), args, 4.5, 10.75);
    *state.label.lock() = controller.values().to_string();
    report("initial", &controller, &frame, &state);

    // Pan the left thumb a few pixels at a time.
    controller.begin_drag(Handle::From, &frame);
    for dx in [12.0, 12.0, 12.0, -6.0] {
        controller.drag(Handle::From, DragInput::Delta(dx), &frame);
    }
    controller.end_drag();
    report("from handle panned", &controller, &frame, &state);

    // Drag the right thumb with the pointer until it runs into the left one.
    controller.begin_drag(Handle::To, &frame);
    for x in [220.0, 160.0, 130.0] {
        if !controller.drag(Handle::To, DragInput::Pointer(x), &frame) {
            info!(x, "to handle held back by the separation margin");
        }
    }
    controller.end_drag();
    report("to handle dragged", &controller, &frame, &state);

    let series = BucketSeries::try_normalize([(0..=1, 500), (2..=3, 1500), (6..=8, 900)])?;
    controller.set_buckets(series);
    report("histogram replaced", &controller, &frame, &state);

    controller.set_values(7.5, 1.0);
    report("values assigned", &controller, &frame, &state);

    if let Err(err) = BucketSeries::try_normalize([(0..=4, 1), (2..=6, 2)]) {
        warn!(%err, "histogram rejected");
    }

    Ok(())
}

fn report(step: &str, controller: &RangeSliderController, frame: &SliderFrame, state: &AppState) {
    let geometry = controller.geometry(frame);
    info!(
        step,
        label = %state.label.lock(),
        from = controller.from_progress(),
        to = controller.to_progress(),
        revision = controller.revision(),
        "selection"
    );
    info!("\n{}", chart::render(&geometry, CHART_ROWS));
}
