// src/config/state.rs
use super::options::AppOptions;

/// Result tabs of the viewer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Results,
    Discarded,
    Rejected,
    Models,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Results, Tab::Discarded, Tab::Rejected, Tab::Models];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Results => "Results",
            Tab::Discarded => "Discarded",
            Tab::Rejected => "Rejected",
            Tab::Models => "Models",
        }
    }
}

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Active result tab
    pub current_tab: Tab,

    /// Text fields (mapped into SiftOptions on SIFT)
    pub input_text: String,
    pub term_text: String,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1100,
            window_h: 700,
            current_tab: Tab::default(),
            input_text: s!(),
            term_text: s!(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}

impl AppState {
    /// Seed the GUI text fields from the options.
    pub fn new(options: AppOptions) -> Self {
        let gui = GuiState {
            input_text: options.sift.input.to_string_lossy().into_owned(),
            term_text: options.sift.search_term.clone(),
            ..GuiState::default()
        };
        Self { options, gui }
    }
}
