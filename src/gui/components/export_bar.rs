// src/gui/components/export_bar.rs

use eframe::egui;
use crate::{
    config::{options::ExportFormat, state::Tab},
    csv::to_export_string,
    file,
    gui::app::App,
    table::TableData,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum UiFormat { Csv, Tsv }

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    {
        let export = &mut app.state.options.export;

        // --- Format + Include headers + Discards ---
        let prev_fmt = match export.format {
            ExportFormat::Csv => UiFormat::Csv,
            ExportFormat::Tsv => UiFormat::Tsv,
        };
        let mut fmt = prev_fmt;

        ui.horizontal(|ui| {
            ui.label("Format:");
            ui.selectable_value(&mut fmt, UiFormat::Csv, "CSV");
            ui.selectable_value(&mut fmt, UiFormat::Tsv, "TSV");

            let before_headers = export.include_headers;
            ui.checkbox(&mut export.include_headers, "Include headers");
            if export.include_headers != before_headers {
                logf!("UI: Include_headers → {}", export.include_headers);
            }

            if ui.checkbox(&mut export.write_discards, "Also export discards").changed() {
                logf!("UI: Write_discards → {}", export.write_discards);
            }
        });

        if fmt != prev_fmt {
            export.format = match fmt {
                UiFormat::Csv => ExportFormat::Csv,
                UiFormat::Tsv => ExportFormat::Tsv,
            };
            logf!("UI: Export format → {:?}", export.format);
            if !app.out_path_dirty {
                app.out_path_text = export.out_path().to_string_lossy().into_owned();
            }
        }
    }

    // --- Output field ---
    ui.horizontal(|ui| {
        ui.label("Output:");
        if ui
            .add(egui::TextEdit::singleline(&mut app.out_path_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(360.0))
            .changed()
        {
            app.out_path_dirty = true;
            logd!("UI: out_path_text changed (dirty=true) → {}", app.out_path_text);
        }
    });

    // --- Actions (Copy / Export) + status ---
    ui.horizontal(|ui| {
        // Copy: whatever tab is showing
        if ui.button("Copy").clicked() {
            match app.current_table().filter(|t| !t.is_empty()) {
                None => {
                    app.status("Nothing to copy");
                    logd!("Copy: Clicked, but there's nothing to copy");
                }
                Some(t) => {
                    let export = &app.state.options.export;
                    let txt = to_export_string(&t.headers, &t.rows, export.include_headers, export.delim());
                    logf!("Copy: tab={:?}, rows={}", app.current_tab(), t.nrows());
                    ui.ctx().copy_text(txt);
                    app.status("Copied to clipboard");
                }
            }
        }

        // Export: results, plus the discard report when enabled
        if ui.button("Export").clicked() {
            export_clicked(app);
        }

        ui.label(format!("Status: {}", app.status_text()));
    });
}

fn export_clicked(app: &mut App) {
    let Some(outcome) = app.outcome.as_ref() else {
        app.status("Nothing to export (run SIFT first)");
        logd!("Export: Clicked before any sift");
        return;
    };

    if app.out_path_dirty {
        app.state.options.export.set_path(&app.out_path_text);
        logf!("Export: Out path set → {}", app.state.options.export.out_path().display());
        app.out_path_dirty = false;
    }

    let export = &app.state.options.export;
    let mut written = Vec::new();

    let results = app.tables.get(&Tab::Results).cloned()
        .unwrap_or_else(|| TableData::from_results(&outcome.results));
    let mut res = file::export_results(export, &results).map(|p| written.push(p));

    if res.is_ok() && export.write_discards {
        let discards = app.tables.get(&Tab::Discarded).cloned()
            .unwrap_or_else(|| TableData::from_discards(&outcome.discards));
        res = file::export_discards(export, &discards).map(|p| written.push(p));
    }

    match res {
        Ok(()) => {
            let names: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
            logf!("Export: OK count={}", written.len());
            app.status(format!("Exported {}", names.join(", ")));
        }
        Err(e) => {
            loge!("Export: Error: {}", e);
            app.status(format!("Export error: {e}"));
        }
    }
}
