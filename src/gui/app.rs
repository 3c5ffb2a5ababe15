// src/gui/app.rs
use std::{
    collections::HashMap,
    error::Error,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use eframe::egui;

use crate::{
    config::{
        options::AppOptions,
        state::{AppState, Tab},
    },
    models::group_by_model,
    runner::{self, SiftOutcome, load_vocab},
    store::load_records,
    table::{self, TableData},
};

use super::progress::GuiProgress;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Listing Sift",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::new(AppOptions::default()))))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    // output text field UX (we map this <-> ExportOptions)
    pub out_path_text: String,
    pub out_path_dirty: bool,

    // last sift and its per-tab tables
    pub outcome: Option<SiftOutcome>,
    pub tables: HashMap<Tab, TableData>,

    // status line (progress sink writes here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let out_path_text = state.options.export.out_path().to_string_lossy().into();

        let tables = Tab::ALL
            .iter()
            .map(|&t| (t, TableData::with(headers_for(t), Vec::new())))
            .collect();

        logf!("Init: input={}, term='{}'", state.gui.input_text, state.gui.term_text);

        Self {
            state,
            out_path_text,
            out_path_dirty: false,
            outcome: None,
            tables,
            status: Arc::new(Mutex::new(s!("Idle"))),
        }
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_tab(&self) -> Tab { self.state.gui.current_tab }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn current_table(&self) -> Option<&TableData> {
        self.tables.get(&self.current_tab())
    }

    pub fn row_count(&self, tab: Tab) -> usize {
        self.tables.get(&tab).map(|t| t.nrows()).unwrap_or(0)
    }

    /// Mirror the text fields into SiftOptions. False when the term is blank.
    fn sync_fields_into_options(&mut self) -> bool {
        let term = self.state.gui.term_text.trim();
        if term.is_empty() {
            return false;
        }
        let term = s!(term);
        let sift = &mut self.state.options.sift;
        sift.search_term = term.clone();
        sift.input = PathBuf::from(self.state.gui.input_text.trim());

        // default stem follows the term until the user types a path
        let export = &mut self.state.options.export;
        export.set_stem_from_term(&term);
        if !self.out_path_dirty {
            self.out_path_text = export.out_path().to_string_lossy().into_owned();
        }
        true
    }

    /// SIFT button: load, run, rebuild every tab.
    pub fn run_sift(&mut self) {
        if !self.sync_fields_into_options() {
            self.status("Enter a search term first");
            return;
        }
        let opts = self.state.options.sift.clone();
        logf!("Sift: Begin input={} term='{}'", opts.input.display(), opts.search_term);

        let records = match load_records(&opts.input) {
            Ok(r) => r,
            Err(e) => {
                loge!("Sift: Load failed: {}", e);
                self.status(format!("Error: {e}"));
                return;
            }
        };
        let vocab = match load_vocab(&opts) {
            Ok(v) => v,
            Err(e) => {
                loge!("Sift: Vocabulary failed: {}", e);
                self.status(format!("Error: {e}"));
                return;
            }
        };

        let mut prog = GuiProgress::new(self.status.clone());
        match runner::run(&records, &opts, &vocab, Some(&mut prog)) {
            Ok(outcome) => {
                let groups = group_by_model(&outcome.results, &opts.search_term, &vocab);
                self.tables.insert(Tab::Results, TableData::from_results(&outcome.results));
                self.tables.insert(Tab::Discarded, TableData::from_discards(&outcome.discards));
                self.tables.insert(Tab::Rejected, TableData::from_rejections(&outcome.rejections));
                self.tables.insert(Tab::Models, TableData::from_models(&groups));
                logf!("Sift: OK {}; models={}", outcome.summary_line(), groups.len());
                self.outcome = Some(outcome);
            }
            Err(e) => {
                loge!("Sift: Error: {}", e);
                self.status(format!("Error: {e}"));
            }
        }
    }
}

fn headers_for(tab: Tab) -> Vec<String> {
    match tab {
        Tab::Results => table::results_headers(),
        Tab::Discarded => table::discards_headers(),
        Tab::Rejected => table::rejections_headers(),
        Tab::Models => table::models_headers(),
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        eframe::egui::TopBottomPanel::top("sift").show(ctx, |ui| {
            crate::gui::components::sift_bar::draw(ui, self);
        });

        eframe::egui::CentralPanel::default().show(ctx, |ui| {
            crate::gui::components::tabs::draw(ui, self);

            ui.separator();

            crate::gui::components::export_bar::draw(ui, self);

            ui.separator();

            crate::gui::components::data_table::draw(ui, self);
        });
    }
}
