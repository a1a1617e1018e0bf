use std::ops::RangeInclusive;

use eframe::egui::Ui;
use egui_plot::{GridMark, HLine, Legend, Plot, Points, VLine};

use crate::scene::AxisScale;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Cut plot (central panel)
// ---------------------------------------------------------------------------

/// Render the scatter plot with its cut boundaries in the central panel.
pub fn cuts_plot(ui: &mut Ui, state: &AppState) {
    let scene = &state.scene;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(scene.title());
    });

    let x_scale = scene.x_scale;
    let y_scale = scene.y_scale;

    Plot::new("cuts_plot")
        .legend(Legend::default())
        .x_axis_label(scene.x_name.clone())
        .y_axis_label(scene.y_name.clone())
        .x_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            tick_label(x_scale, mark.value)
        })
        .y_axis_formatter(move |mark: GridMark, _range: &RangeInclusive<f64>| {
            tick_label(y_scale, mark.value)
        })
        .label_formatter(move |name, value| {
            let x = x_scale.unproject(value.x);
            let y = y_scale.unproject(value.y);
            if name.is_empty() {
                format!("x = {x:.4}\ny = {y:.4}")
            } else {
                format!("{name}\nx = {x:.4}\ny = {y:.4}")
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (series, &visible) in scene.series.iter().zip(&state.series_visible) {
                if !visible {
                    continue;
                }
                let points = Points::new(series.points.clone())
                    .name(series.name)
                    .shape(series.style.marker)
                    .color(series.style.color)
                    .radius(3.0);
                plot_ui.points(points);
            }

            if !state.show_cuts {
                return;
            }
            if let Some(cuts) = &scene.cuts {
                for &x in &cuts.vertical {
                    plot_ui.vline(VLine::new(x).color(cuts.color).width(1.0));
                }
                for &y in &cuts.horizontal {
                    plot_ui.hline(HLine::new(y).color(cuts.color).width(1.0));
                }
            }
        });
}

/// Tick text for a plot coordinate: log axes show the data value `10^k`.
pub fn tick_label(scale: AxisScale, coord: f64) -> String {
    match scale {
        AxisScale::Linear => format!("{coord}"),
        AxisScale::Log => {
            let value = scale.unproject(coord);
            if coord.fract() == 0.0 && coord.abs() < 4.0 {
                format!("{value}")
            } else {
                format!("{value:.3e}")
            }
        }
    }
}
