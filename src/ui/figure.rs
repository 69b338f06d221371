use std::borrow::Cow;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use eframe::egui::FontDefinitions;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontStyle;

use crate::chart::{ChartPanel, Figure, format_date_tick};
use crate::color::to_rgb_color;
use crate::config::{X_AXIS_LABEL, Y_AXIS_LABEL};

/// egui's bundled proportional font, reused for the static figure.
const PLOT_FONT: &str = "Ubuntu-Light";
const FONT_FAMILY: &str = "sans-serif";

// ---------------------------------------------------------------------------
// PNG output
// ---------------------------------------------------------------------------

/// Render the figure into an RGB buffer and write it as an image file.
/// The format follows the file extension.
pub fn save_figure(figure: &Figure, path: &Path, (width, height): (u32, u32)) -> Result<()> {
    register_fonts()?;

    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        draw_figure(&root, figure)?;
        root.present().context("finishing figure")?;
    }

    let image = image::RgbImage::from_raw(width, height, buffer)
        .context("figure buffer does not match its size")?;
    image
        .save(path)
        .with_context(|| format!("writing figure to {}", path.display()))?;
    log::info!("Wrote {width}x{height} figure to {}", path.display());
    Ok(())
}

/// Make egui's default font available to plotters under `sans-serif`.
fn register_fonts() -> Result<()> {
    let bytes = load_font_bytes()?;
    for style in [FontStyle::Normal, FontStyle::Bold] {
        plotters::style::register_font(FONT_FAMILY, style, bytes)
            .map_err(|_| anyhow!("font {PLOT_FONT} is unusable"))?;
    }
    Ok(())
}

fn load_font_bytes() -> Result<&'static [u8]> {
    let fonts = FontDefinitions::default();
    let data = fonts
        .font_data
        .get(PLOT_FONT)
        .with_context(|| format!("font {PLOT_FONT} is not bundled"))?;
    Ok(match &data.font {
        Cow::Borrowed(bytes) => *bytes,
        Cow::Owned(bytes) => Box::leak(bytes.clone().into_boxed_slice()),
    })
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// 2×2 grid of panels under a figure title. Works on any plotters backend.
pub fn draw_figure<DB>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let body = root.titled(
        &figure.title,
        (FONT_FAMILY, 44).into_font().style(FontStyle::Bold),
    )?;

    let areas = body.split_evenly((2, 2));
    for (area, panel) in areas.iter().zip(&figure.panels) {
        draw_panel(area, panel, figure.x_range)?;
    }
    if figure.panels.len() > areas.len() {
        log::warn!(
            "{} group(s) beyond the 2x2 grid were not drawn",
            figure.panels.len() - areas.len()
        );
    }
    Ok(())
}

fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    panel: &ChartPanel,
    (x0, x1): (f64, f64),
) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (y0, y1) = panel.y_range();

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, (FONT_FAMILY, 30).into_font().style(FontStyle::Bold))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(90)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .x_labels(10)
        .y_labels(10)
        .x_label_formatter(&|x| format_date_tick(*x))
        .y_label_formatter(&|y| format!("{y:.0}"))
        .bold_line_style(BLACK.mix(0.15))
        .light_line_style(BLACK.mix(0.04))
        .label_style((FONT_FAMILY, 20))
        .axis_desc_style((FONT_FAMILY, 24))
        .draw()?;

    // Zero reference.
    chart.draw_series(DashedLineSeries::new(
        vec![(x0, 0.0), (x1, 0.0)],
        12,
        8,
        BLACK.mix(0.5).stroke_width(2),
    ))?;

    for series in &panel.series {
        let style = to_rgb_color(series.color).stroke_width(2);
        let legend = move |(x, y): (i32, i32)| PathElement::new(vec![(x, y), (x + 24, y)], style);

        // A fully missing series still gets its legend entry.
        let first = series.segments.first().cloned().unwrap_or_default();
        chart
            .draw_series(LineSeries::new(first, style))?
            .label(&series.name)
            .legend(legend);
        for segment in series.segments.iter().skip(1) {
            chart.draw_series(LineSeries::new(segment.iter().copied(), style))?;
        }
    }

    if !panel.series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font((FONT_FAMILY, 18))
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK.mix(0.3))
            .draw()?;
    }

    Ok(())
}
