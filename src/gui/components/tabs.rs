// src/gui/components/tabs.rs
//
// Renders the result tabs (with row counts) and performs the tab switch.
// Tables are prebuilt per tab on SIFT; switching only changes which one is drawn.

use eframe::egui;
use crate::config::state::Tab;
use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let cur = app.current_tab();
        for tab in Tab::ALL {
            let selected = tab == cur;
            let label = format!("{} ({})", tab.title(), app.row_count(tab));

            if ui.selectable_label(selected, label).clicked() && !selected {
                logf!("UI: Tab switch {:?} → {:?}", cur, tab);
                app.state.gui.current_tab = tab;
            }
        }

        if let Some(ps) = app.outcome.as_ref().and_then(|o| o.results.price_summary()) {
            ui.separator();
            ui.label(format!(
                "{} to {}, mean {}",
                crate::core::price::format_price(ps.min),
                crate::core::price::format_price(ps.max),
                crate::core::price::format_price(ps.mean),
            ));
        }
    });
}
