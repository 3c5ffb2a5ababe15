// src/gui/components/sift_bar.rs
//
// Input sheet, search term, dedup policy and the SIFT button.

use eframe::egui;
use crate::{gui::app::App, sift::DedupPolicy};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Input:");
        ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.input_text)
                .font(egui::TextStyle::Monospace)
                .desired_width(280.0),
        );

        ui.label("Search:");
        let term = ui.add(egui::TextEdit::singleline(&mut app.state.gui.term_text).desired_width(160.0));
        let submitted = term.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.label("Keep:");
        let dedup = &mut app.state.options.sift.dedup;
        let before = *dedup;
        ui.selectable_value(dedup, DedupPolicy::FirstSeen, "First seen");
        ui.selectable_value(dedup, DedupPolicy::LowestPrice, "Lowest price");
        if *dedup != before {
            logf!("UI: Dedup → {:?}", dedup);
        }

        let green = egui::Color32::from_rgb(40, 150, 90);
        let clicked = ui
            .add(egui::Button::new(egui::RichText::new("SIFT").color(egui::Color32::WHITE).strong()).fill(green))
            .clicked();

        if clicked || submitted {
            app.run_sift();
        }
    });
}
