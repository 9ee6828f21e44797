use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::spectrum::TransformConvention;
use crate::analysis::views::ViewKind;
use crate::config::CycleSelection;
use crate::data::model::{Channel, PowerResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – log summary, chart buttons, settings, results
// ---------------------------------------------------------------------------

/// Render the left side panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Measurement log");
            ui.separator();

            match &state.log {
                Some(log) => {
                    let name = log
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    ui.label(RichText::new(name).strong());
                    ui.label(format!("{} samples", log.series.len()));
                    ui.label(format!("Experiment duration: {}", log.duration));
                }
                None => {
                    ui.label("No file loaded.");
                }
            }
            ui.separator();

            // ---- Chart buttons ----
            let mut requested = None;
            ui.add_enabled_ui(state.log.is_some(), |ui: &mut Ui| {
                for kind in ViewKind::ALL {
                    if ui.button(kind.button_label()).clicked() {
                        requested = Some(kind);
                    }
                }
            });
            if let Some(kind) = requested {
                if let Err(e) = state.show(kind) {
                    state.fail(kind.button_label(), e);
                }
            }
            ui.separator();

            settings(ui, state);
            ui.separator();

            results(ui, state);
        });
}

fn settings(ui: &mut Ui, state: &mut AppState) {
    egui::CollapsingHeader::new(RichText::new("Settings").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            let config = &mut state.config;

            ui.horizontal(|ui: &mut Ui| {
                ui.label("Sample rate");
                ui.add(
                    egui::DragValue::new(&mut config.sample_rate_hz)
                        .range(1.0..=1.0e7)
                        .speed(10.0)
                        .suffix(" Hz"),
                );
            });

            egui::ComboBox::from_label("Transform")
                .selected_text(config.transform.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for convention in TransformConvention::ALL {
                        ui.selectable_value(&mut config.transform, convention, convention.label());
                    }
                });

            egui::ComboBox::from_label("Analysed signal")
                .selected_text(config.channel.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for channel in Channel::ALL {
                        ui.selectable_value(&mut config.channel, channel, channel.label());
                    }
                });

            cycle_editor(ui, "Signals window", &mut config.signal_window);
            cycle_editor(ui, "Spectrum window", &mut config.spectrum_window);
            cycle_editor(ui, "Harmonics window", &mut config.harmonic_window);
        });
}

fn cycle_editor(ui: &mut Ui, label: &str, selection: &mut CycleSelection) {
    ui.label(label);
    let mut kind = match selection {
        CycleSelection::All => 0,
        CycleSelection::FirstHalf => 1,
        CycleSelection::Range { .. } => 2,
    };
    let before = kind;
    ui.horizontal(|ui: &mut Ui| {
        ui.radio_value(&mut kind, 0, "All");
        ui.radio_value(&mut kind, 1, "First half");
        ui.radio_value(&mut kind, 2, "Range");
    });
    if kind != before {
        *selection = match kind {
            0 => CycleSelection::All,
            1 => CycleSelection::FirstHalf,
            _ => CycleSelection::Range { start: 0, len: 80 },
        };
    }
    if let CycleSelection::Range { start, len } = selection {
        ui.horizontal(|ui: &mut Ui| {
            ui.label("from");
            ui.add(egui::DragValue::new(start));
            ui.label("count");
            ui.add(egui::DragValue::new(len).range(1..=usize::MAX));
        });
    }
}

fn results(ui: &mut Ui, state: &AppState) {
    if let Some(power) = &state.power {
        ui.strong("Power");
        power_table(ui, "power_table", power);
        ui.separator();
    } else if let Some(saved) = &state.folder_report {
        ui.strong("Last report saved in this folder");
        ui.label(RichText::new("May belong to another log.").weak());
        power_table(ui, "folder_report_table", saved);
        ui.separator();
    }

    if let Some(harmonics) = &state.harmonics {
        ui.strong("Harmonics");
        if harmonics.is_empty() {
            ui.label("No harmonics found.");
            return;
        }
        TableBuilder::new(ui)
            .id_salt("harmonic_table")
            .vscroll(false)
            .striped(true)
            .column(Column::auto())
            .column(Column::auto())
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for title in ["#", "Frequency (Hz)", "Amplitude"] {
                    header.col(|ui: &mut Ui| {
                        ui.strong(title);
                    });
                }
            })
            .body(|mut body| {
                for (n, h) in harmonics.iter().enumerate() {
                    body.row(18.0, |mut row| {
                        row.col(|ui: &mut Ui| {
                            ui.label(format!("{}", n + 1));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.monospace(format!("{:.2}", h.frequency));
                        });
                        row.col(|ui: &mut Ui| {
                            ui.monospace(format!("{:.4}", h.magnitude));
                        });
                    });
                }
            });
    }
}

fn power_table(ui: &mut Ui, id: &str, power: &PowerResult) {
    TableBuilder::new(ui)
        .id_salt(id)
        .vscroll(false)
        .striped(true)
        .column(Column::auto())
        .column(Column::remainder())
        .body(|mut body| {
            for (name, value) in [
                ("Active P", power.active),
                ("Reactive Q", power.reactive),
                ("Apparent S", power.apparent),
            ] {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.label(name);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.monospace(format!("{value:.4}"));
                    });
                });
            }
        });
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
            if ui
                .add_enabled(state.plot.is_some(), egui::Button::new("Export plot data…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Save settings").clicked() {
                match state.save_config() {
                    Ok(()) => state.status_message = None,
                    Err(e) => state.fail("Saving settings", e),
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(log) = &state.log {
            ui.label(format!("{}  ({} samples)", log.path.display(), log.series.len()));
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
        .set_title("Open measurement log")
        .add_filter("Text files", &["txt"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load_path(&path) {
            state.fail("Loading file", e);
        }
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export plot data")
        .add_filter("CSV", &["csv"])
        .set_file_name("plot.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_plot(&path) {
            state.fail("Exporting plot data", e);
        }
    }
}
