// src/gui/components/data_table.rs
//
// Draws the table for the active tab. Purely a view over `App::tables`.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};
use crate::{config::state::Tab, gui::app::App, sift::DiscardReason};

/// Starting widths per tab, one per column.
fn preferred_widths(tab: Tab) -> &'static [f32] {
    match tab {
        Tab::Results => &[360.0, 90.0, 80.0, 120.0, 420.0],
        Tab::Discarded => &[110.0, 120.0, 340.0, 90.0, 380.0],
        Tab::Rejected => &[100.0, 50.0, 340.0, 110.0, 380.0],
        Tab::Models => &[220.0, 60.0, 90.0, 90.0, 90.0, 360.0],
    }
}

/// Columns drawn centered (prices, counts).
fn numeric_columns(tab: Tab) -> &'static [usize] {
    match tab {
        Tab::Results => &[1, 2],
        Tab::Discarded => &[3],
        Tab::Rejected => &[1],
        Tab::Models => &[1, 2, 3, 4],
    }
}

fn reason_color(label: &str) -> Option<Color32> {
    let reason = DiscardReason::ALL.into_iter().find(|r| r.label() == label)?;
    Some(match reason {
        DiscardReason::WrongCategory => Color32::from_rgb(0xDC, 0x61, 0x49),
        DiscardReason::Accessory => Color32::from_rgb(0xF0, 0xD2, 0x3C),
        DiscardReason::WrongProduct => Color32::from_rgb(0xFF, 0xA5, 0x00),
        DiscardReason::NoMatch => Color32::GRAY,
        DiscardReason::Duplicate => Color32::from_rgb(0x64, 0xB4, 0xFF),
    })
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let tab = app.current_tab();
    let Some(data) = app.current_table() else { return; };

    let cols = data.ncols();
    let widths = preferred_widths(tab);
    let numeric = numeric_columns(tab);

    // Scroll bars allocate space instead of floating over content
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let avail_h = ui.available_height();
    egui::ScrollArea::new([true, false])
        .id_salt("inner_table_hscroll")
        .min_scrolled_height(avail_h)
        .max_height(avail_h)
        .show(ui, |ui| {
            let mut table = TableBuilder::new(ui)
                .striped(true)
                .min_scrolled_height(0.0)
                .id_salt(("table_state", tab));
            for ci in 0..cols {
                let w = widths.get(ci).copied().unwrap_or(80.0);
                table = table.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
            }

            table
                .header(24.0, |mut header| {
                    for ci in 0..cols {
                        header.col(|ui| {
                            let text = data.headers.get(ci).cloned().unwrap_or_else(|| format!("Col {}", ci + 1));
                            ui.add(egui::Label::new(RichText::new(text).strong()).selectable(false));
                        });
                    }
                })
                .body(|body| {
                    body.rows(20.0, data.nrows(), |mut row| {
                        let Some(cells) = data.rows.get(row.index()) else { return; };
                        for ci in 0..cols {
                            let cell = cells.get(ci).map(String::as_str).unwrap_or("");
                            row.col(|ui| {
                                ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                                let mut rt = RichText::new(cell);
                                if tab == Tab::Discarded && ci == 0 {
                                    if let Some(c) = reason_color(cell) { rt = rt.color(c); }
                                }
                                if numeric.contains(&ci) {
                                    ui.centered_and_justified(|ui| { ui.label(rt); });
                                } else {
                                    ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                                }
                            });
                        }
                    });
                });
        });
}
