use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

use crate::config::AppContext;
use crate::data::source::SourceKind;
use crate::error::LoadError;
use crate::selector::{load_selection, Answer, Outcome, Progress, Prompt, SourceSelector};
use crate::state::TableModel;
use crate::ui::{prompts, table};

/// Where the load failure (if any) is left for `main` to pick up after the window closes.
pub type FailureSlot = Rc<RefCell<Option<LoadError>>>;

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

enum Stage {
    Selecting {
        selector: SourceSelector,
        kind_choice: SourceKind,
        input: String,
    },
    Viewing(TableModel),
    Closing,
}

impl Stage {
    fn selecting() -> Self {
        Stage::Selecting {
            selector: SourceSelector::default(),
            kind_choice: SourceKind::ALL[0],
            input: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TableScopeApp {
    ctx: AppContext,
    stage: Stage,
    failure: FailureSlot,
}

impl TableScopeApp {
    pub fn new(ctx: AppContext, failure: FailureSlot) -> Self {
        Self {
            ctx,
            stage: Stage::selecting(),
            failure,
        }
    }

    /// Apply one answer; returns the next stage when the selection is over.
    fn advance(&mut self, answer: Answer) -> Option<Stage> {
        let Stage::Selecting { selector, .. } = &mut self.stage else {
            return None;
        };
        match selector.answer(answer) {
            Progress::Continue => None,
            Progress::Cancelled => Some(Stage::Closing),
            Progress::Ready(kind, params) => match load_selection(&self.ctx, kind, params) {
                Outcome::Loaded(model) => Some(Stage::Viewing(model)),
                Outcome::Failed(err) => {
                    prompts::show_error(&err);
                    *self.failure.borrow_mut() = Some(err);
                    Some(Stage::Closing)
                }
                Outcome::Cancelled => Some(Stage::Closing),
            },
        }
    }

    fn selection_ui(&mut self, ui: &mut egui::Ui) -> Option<Answer> {
        let Stage::Selecting {
            selector,
            kind_choice,
            input,
        } = &mut self.stage
        else {
            return None;
        };
        match selector.prompt()? {
            Prompt::Kind(candidates) => prompts::kind_prompt(ui, candidates, kind_choice),
            Prompt::File { kind, filters } => Some(prompts::file_prompt(kind, filters)),
            Prompt::Text(field) => prompts::text_prompt(ui, field, input),
        }
    }
}

impl eframe::App for TableScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if matches!(self.stage, Stage::Selecting { .. }) {
            let answer = egui::CentralPanel::default()
                .show(ctx, |ui| self.selection_ui(ui))
                .inner;
            if let Some(next) = answer.and_then(|a| self.advance(a)) {
                if matches!(next, Stage::Closing) {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
                self.stage = next;
            }
            return;
        }

        if let Stage::Viewing(model) = &mut self.stage {
            let total = model.total_rows();

            // ---- Top panel: counts and filter toggle ----
            egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
                table::table_toolbar(ui, model, total);
            });

            // ---- Central panel: table ----
            egui::CentralPanel::default().show(ctx, |ui| {
                egui::ScrollArea::horizontal().show(ui, |ui| {
                    table::table_view(ui, model);
                });
            });
        }
    }
}
