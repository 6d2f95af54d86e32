use eframe::egui::{self, Align, Layout, RichText, TextStyle, Ui};
use egui_extras::{Column, TableBuilder};

use crate::presentation::PresentationAdapter;

// ---------------------------------------------------------------------------
// Table view (central panel)
// ---------------------------------------------------------------------------

/// Render the table, reading only through the adapter. A header click sorts.
pub fn table_view(ui: &mut Ui, adapter: &mut dyn PresentationAdapter) {
    let columns = adapter.column_count();
    if columns == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("The source returned no columns.");
        });
        return;
    }

    let sort = adapter.sort_state();
    let row_height = ui.text_style_height(&TextStyle::Body) + 4.0;
    let mut clicked: Option<usize> = None;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), columns)
        .header(row_height + 4.0, |mut header| {
            for col in 0..columns {
                header.col(|ui: &mut Ui| {
                    let name = adapter.header(col).unwrap_or_default();
                    let marker = match sort {
                        Some(s) if s.column == col && s.ascending => " ⏶",
                        Some(s) if s.column == col => " ⏷",
                        _ => "",
                    };
                    let button = egui::Button::new(RichText::new(format!("{name}{marker}")).strong())
                        .frame(false);
                    if ui.add(button).on_hover_text("Click to sort").clicked() {
                        clicked = Some(col);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, adapter.row_count(), |mut row| {
                let view_row = row.index();
                for col in 0..columns {
                    row.col(|ui: &mut Ui| {
                        ui.label(adapter.cell(view_row, col).unwrap_or_default());
                    });
                }
            });
        });

    if let Some(col) = clicked {
        if let Err(e) = adapter.header_clicked(col) {
            log::error!("Sort request rejected: {e}");
        }
    }
}

/// Top bar: row counts and the duplicate filter toggle.
pub fn table_toolbar(ui: &mut Ui, adapter: &mut dyn PresentationAdapter, total_rows: usize) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} of {} rows visible, {} columns",
            adapter.row_count(),
            total_rows,
            adapter.column_count()
        ));

        ui.separator();

        let mut filter = adapter.filter_duplicates();
        if ui.checkbox(&mut filter, "Filter duplicates").changed() {
            adapter.set_filter_duplicates(filter);
        }
    });
}
