use eframe::egui::{self, Key, Ui};
use rfd::{MessageButtons, MessageDialog, MessageLevel};

use crate::data::source::{FileFilter, SourceKind};
use crate::error::LoadError;
use crate::selector::{Answer, Field};

// ---------------------------------------------------------------------------
// Source kind
// ---------------------------------------------------------------------------

/// Drop-down of the candidate kinds with OK / Cancel.
pub fn kind_prompt(ui: &mut Ui, candidates: &[SourceKind], choice: &mut SourceKind) -> Option<Answer> {
    ui.heading("Select Data Source");
    ui.add_space(8.0);
    ui.label("Select the data source:");

    egui::ComboBox::from_id_salt("source_kind")
        .selected_text(choice.label())
        .show_ui(ui, |ui: &mut Ui| {
            for kind in candidates {
                ui.selectable_value(choice, *kind, kind.label());
            }
        });

    ui.add_space(8.0);
    let mut answer = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("OK").clicked() || ui.input(|i| i.key_pressed(Key::Enter)) {
            answer = Some(Answer::Kind(*choice));
        }
        if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(Key::Escape)) {
            answer = Some(Answer::Cancel);
        }
    });
    answer
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Single-line entry for one database field. The password field is masked.
pub fn text_prompt(ui: &mut Ui, field: Field, input: &mut String) -> Option<Answer> {
    let title = if field == Field::Query {
        "Enter SQL Query"
    } else {
        "Database Credentials"
    };
    ui.heading(title);
    ui.add_space(8.0);
    ui.label(field.label());

    let response = ui.add(
        egui::TextEdit::singleline(input)
            .password(field.masked())
            .desired_width(f32::INFINITY),
    );
    if ui.memory(|m| m.focused().is_none()) {
        response.request_focus();
    }
    let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

    ui.add_space(8.0);
    let mut answer = None;
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("OK").clicked() || submitted {
            answer = Some(Answer::Text(std::mem::take(input)));
        }
        if ui.button("Cancel").clicked() || ui.input(|i| i.key_pressed(Key::Escape)) {
            input.clear();
            answer = Some(Answer::Cancel);
        }
    });
    answer
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

/// Native file chooser restricted to the kind's extensions. Blocks until closed.
pub fn file_prompt(kind: SourceKind, filters: &[FileFilter]) -> Answer {
    let mut dialog = rfd::FileDialog::new().set_title(format!("Open {} file", kind.label()));
    for filter in filters {
        dialog = dialog.add_filter(filter.name, filter.extensions);
    }
    match dialog.pick_file() {
        Some(path) => Answer::File(path),
        None => Answer::Cancel,
    }
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// Blocking error box carrying the loader's message verbatim.
pub fn show_error(err: &LoadError) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title("Error")
        .set_description(err.to_string())
        .set_buttons(MessageButtons::Ok)
        .show();
}
