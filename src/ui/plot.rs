use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Corner, HLine, Legend, Line, LineStyle, Plot, PlotPoints};

use crate::chart::{ChartPanel, format_date_tick, from_x};
use crate::color::to_color32;
use crate::config::{X_AXIS_LABEL, Y_AXIS_LABEL};

// ---------------------------------------------------------------------------
// Spread panel (one chart group)
// ---------------------------------------------------------------------------

/// Render one group of spread series with its title above the plot.
pub fn spread_plot(ui: &mut Ui, panel: &ChartPanel, id: usize, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(&panel.title).strong().size(16.0));
    });

    Plot::new(("spread_plot", id))
        .height(height)
        .legend(Legend::default().position(Corner::LeftTop))
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .x_axis_formatter(|mark, _range| format_date_tick(mark.value))
        .label_formatter(|name, value| {
            let date = from_x(value.x)
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.1} bps", value.y)
            } else {
                format!("{name}\n{date}\n{:.1} bps", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.hline(
                HLine::new(0.0)
                    .color(Color32::GRAY)
                    .style(LineStyle::dashed_loose()),
            );

            // Segments of one series share a name, so the legend shows and
            // toggles them as a single entry.
            for series in &panel.series {
                let color = to_color32(series.color);
                for segment in &series.segments {
                    let points: PlotPoints = segment.iter().map(|&(x, y)| [x, y]).collect();
                    let line = Line::new(points)
                        .name(&series.name)
                        .color(color)
                        .width(1.2);

                    plot_ui.line(line);
                }
            }
        });
}
