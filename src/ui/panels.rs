use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series and cut toggles
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (series, visible) in state.scene.series.iter().zip(state.series_visible.iter_mut()) {
                let text = RichText::new(format!("{}  ({})", series.name, series.points.len()))
                    .color(series.style.color);
                ui.checkbox(visible, text);
                if series.dropped > 0 {
                    ui.label(
                        RichText::new(format!("{} hidden on log axis", series.dropped)).weak(),
                    );
                }
            }
            ui.separator();

            ui.strong("Cuts");
            match state.cut_counts() {
                Some((vertical, horizontal)) => {
                    ui.checkbox(&mut state.show_cuts, "Show cut boundaries");
                    ui.label(format!("{}: {vertical}", state.scene.x_name));
                    ui.label(format!("{}: {horizontal}", state.scene.y_name));
                }
                None => {
                    ui.label("No tree file loaded.");
                }
            }
            if let Some(path) = &state.tree_path {
                ui.label(RichText::new(path.display().to_string()).small());
            }
            ui.separator();

            ui.strong("Axes");
            ui.label(format!(
                "x: {}",
                if state.scene.x_scale.is_log() { "log" } else { "linear" }
            ));
            ui.label(format!(
                "y: {}",
                if state.scene.y_scale.is_log() { "log" } else { "linear" }
            ));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open tree file…").clicked() {
                open_tree_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let total: usize = state.scene.series.iter().map(|s| s.points.len()).sum();
        ui.label(format!("{total} triggers plotted"));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_tree_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open decision trees")
        .pick_file();

    if let Some(path) = file {
        state.reload_cuts(&path);
    }
}
