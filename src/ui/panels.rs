use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::chart::{export, AnalysisMode};
use crate::data::Dataset;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – analysis selector
// ---------------------------------------------------------------------------

/// Render the sidebar radio group. The only way the analysis changes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Select Analysis Type");
    ui.separator();
    ui.label("Choose a plot to display:");
    ui.add_space(4.0);

    let mut mode = state.mode();
    for option in AnalysisMode::ALL {
        ui.radio_value(&mut mode, option, option.label());
    }
    state.select_mode(mode);
}

// ---------------------------------------------------------------------------
// Central header – title and key statistics
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui, state: &AppState) {
    ui.heading(RichText::new(&state.config.title).size(30.0).strong());
    ui.add_space(8.0);
    ui.label(RichText::new("Key Statistics").size(18.0).strong());

    let stats = &state.dataset.stats;
    let cards = [
        ("Total Passengers", stats.total_passengers.to_string()),
        ("Survived", stats.survived.to_string()),
        ("Total Fare", format!("${}", stats.total_fare_text())),
        ("Average Age", stats.average_age_text()),
    ];

    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards.iter()) {
            metric(col, label, value);
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color.gamma_multiply(0.85))
        .show(ui, |ui: &mut Ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).small());
            ui.label(RichText::new(value).size(26.0).strong());
        });
}

// ---------------------------------------------------------------------------
// Background image
// ---------------------------------------------------------------------------

/// Paint the configured background behind the central panel, if present.
pub fn background(ui: &mut Ui, state: &mut AppState) {
    let path = &state.config.background_image;
    if !path.is_file() {
        if !state.background_warned {
            log::warn!("Background image {} not found; using plain theme", path.display());
            state.background_warned = true;
        }
        return;
    }

    let rect = ui.max_rect();
    egui::Image::new(file_uri(path))
        .tint(Color32::from_white_alpha(60))
        .paint_at(ui, rect);
}

/// `file://` URI for the image loaders. `canonicalize` would yield a
/// `\\?\` verbatim path on Windows, which the loaders cannot open.
fn file_uri(path: &Path) -> String {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let text = path.display().to_string().replace('\\', "/");
    if text.starts_with('/') {
        format!("file://{text}")
    } else {
        format!("file:///{text}")
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export chart…").clicked() {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} passengers, {} complete numeric records",
            state.data_path.display(),
            state.dataset.table.len(),
            state.dataset.numeric.len()
        ));

        if state.dataset.numeric.is_empty() {
            ui.separator();
            ui.label(
                RichText::new("no complete numeric records")
                    .color(Color32::from_rgb(230, 160, 40)),
            );
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open passenger data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match Dataset::load(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} passengers from {} with columns {:?}",
                    dataset.table.len(),
                    path.display(),
                    dataset.table.column_names
                );
                state.set_dataset(dataset, &path);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart")
        .set_file_name("chart.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match export::write_json(state.chart(), &path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export chart: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
