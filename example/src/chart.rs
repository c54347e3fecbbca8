//! Text rendering of slider geometry.

use price_filter::SliderGeometry;

/// Draws the masked histogram as `rows` lines of text: `#` for bars inside
/// the selection, `.` for bars outside it. Each bar is two columns wide.
pub fn render(geometry: &SliderGeometry, rows: usize) -> String {
    let region = geometry.region;
    let fill_start = region.x + geometry.histogram_fill.active_start();
    let fill_end = region.x + geometry.histogram_fill.active_end();

    let mut out = String::new();
    for row in (0..rows).rev() {
        let threshold = (row as f32 + 0.5) / rows as f32;
        for step in geometry.mask.steps() {
            let reach = if region.height > 0.0 {
                step.height / region.height
            } else {
                0.0
            };
            let center = step.x + step.width / 2.0;
            let glyph = if reach < threshold {
                ' '
            } else if (fill_start..=fill_end).contains(&center) {
                '#'
            } else {
                '.'
            };
            out.push(glyph);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}
