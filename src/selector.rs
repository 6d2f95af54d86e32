use std::path::PathBuf;

use log::{info, warn};

use crate::config::AppContext;
use crate::data::loader::SourceLoader;
use crate::data::source::{DatabaseParams, FileFilter, Secret, SourceKind, SourceParameters};
use crate::error::LoadError;
use crate::state::TableModel;

// ---------------------------------------------------------------------------
// Prompts and answers
// ---------------------------------------------------------------------------

/// Result of an interactive step. Cancelling is not an error.
#[derive(Debug)]
pub enum Selection<T> {
    Chosen(T),
    Cancelled,
}

/// Database fields, in the order they are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Host,
    User,
    Password,
    Database,
    Query,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Host => "Enter the database host:",
            Field::User => "Enter the database user:",
            Field::Password => "Enter the database password:",
            Field::Database => "Enter the database name:",
            Field::Query => "Enter the SQL query:",
        }
    }

    pub fn masked(self) -> bool {
        self == Field::Password
    }
}

/// What the selector is currently waiting for.
#[derive(Debug, Clone, Copy)]
pub enum Prompt<'a> {
    Kind(&'a [SourceKind]),
    File {
        kind: SourceKind,
        filters: &'static [FileFilter],
    },
    Text(Field),
}

pub enum Answer {
    Kind(SourceKind),
    File(PathBuf),
    Text(String),
    Cancel,
}

impl Answer {
    /// Safe to log; never includes the entered text.
    fn describe(&self) -> &'static str {
        match self {
            Answer::Kind(_) => "kind answer",
            Answer::File(_) => "file answer",
            Answer::Text(_) => "text answer",
            Answer::Cancel => "cancel",
        }
    }
}

#[derive(Debug)]
pub enum Progress {
    /// Another prompt follows.
    Continue,
    Ready(SourceKind, SourceParameters),
    Cancelled,
}

/// Blocking prompt provider. `None` means the user cancelled.
pub trait Prompter {
    fn choose_kind(&mut self, candidates: &[SourceKind]) -> Option<SourceKind>;
    fn choose_file(&mut self, kind: SourceKind, filters: &[FileFilter]) -> Option<PathBuf>;
    fn text(&mut self, field: Field) -> Option<String>;
}

// ---------------------------------------------------------------------------
// SourceSelector
// ---------------------------------------------------------------------------

#[derive(Default)]
struct DatabaseDraft {
    host: Option<String>,
    user: Option<String>,
    password: Option<Secret>,
    database: Option<String>,
}

impl DatabaseDraft {
    fn next_field(&self) -> Field {
        if self.host.is_none() {
            Field::Host
        } else if self.user.is_none() {
            Field::User
        } else if self.password.is_none() {
            Field::Password
        } else if self.database.is_none() {
            Field::Database
        } else {
            Field::Query
        }
    }

    /// Store the answer to the next field; the query completes the draft.
    fn submit(&mut self, value: String) -> Option<DatabaseParams> {
        match self.next_field() {
            Field::Host => self.host = Some(value),
            Field::User => self.user = Some(value),
            Field::Password => self.password = Some(Secret::new(value)),
            Field::Database => self.database = Some(value),
            Field::Query => {
                return Some(DatabaseParams {
                    host: self.host.take().unwrap_or_default(),
                    user: self.user.take().unwrap_or_default(),
                    password: self.password.take().unwrap_or_default(),
                    database: self.database.take().unwrap_or_default(),
                    query: value,
                })
            }
        }
        None
    }
}

enum Step {
    Kind,
    File(SourceKind),
    Fields(SourceKind, DatabaseDraft),
    Finished,
}

/// Walks the user through choosing a source kind and then its parameters.
///
/// Renderer-agnostic: a UI asks for [`SourceSelector::prompt`] and feeds
/// back an [`Answer`]; [`SourceSelector::run`] does the same with a
/// blocking [`Prompter`]. A cancel at any prompt ends the whole selection.
pub struct SourceSelector {
    candidates: Vec<SourceKind>,
    step: Step,
}

impl Default for SourceSelector {
    fn default() -> Self {
        Self::new(SourceKind::ALL.to_vec())
    }
}

impl SourceSelector {
    pub fn new(candidates: Vec<SourceKind>) -> Self {
        Self {
            candidates,
            step: Step::Kind,
        }
    }

    /// The pending prompt, `None` once the selection is finished.
    pub fn prompt(&self) -> Option<Prompt<'_>> {
        match &self.step {
            Step::Kind => Some(Prompt::Kind(&self.candidates)),
            Step::File(kind) => Some(Prompt::File {
                kind: *kind,
                filters: kind.file_filters().unwrap_or(&[]),
            }),
            Step::Fields(_, draft) => Some(Prompt::Text(draft.next_field())),
            Step::Finished => None,
        }
    }

    pub fn answer(&mut self, answer: Answer) -> Progress {
        if matches!(self.step, Step::Finished) {
            warn!("Ignoring {} after the selection finished", answer.describe());
            return Progress::Cancelled;
        }
        if let Answer::Cancel = answer {
            info!("Source selection cancelled");
            self.step = Step::Finished;
            return Progress::Cancelled;
        }

        let step = std::mem::replace(&mut self.step, Step::Finished);
        let (next, progress) = match (step, answer) {
            (Step::Kind, Answer::Kind(kind)) if self.candidates.contains(&kind) => {
                info!("Selected source kind {kind}");
                let next = if kind.is_database() {
                    Step::Fields(kind, DatabaseDraft::default())
                } else {
                    Step::File(kind)
                };
                (next, Progress::Continue)
            }
            (Step::File(kind), Answer::File(path)) => (
                Step::Finished,
                Progress::Ready(kind, SourceParameters::File { path }),
            ),
            (Step::Fields(kind, mut draft), Answer::Text(value)) => match draft.submit(value) {
                Some(params) => (
                    Step::Finished,
                    Progress::Ready(kind, SourceParameters::Database(params)),
                ),
                None => (Step::Fields(kind, draft), Progress::Continue),
            },
            (step, answer) => {
                warn!("Ignoring unexpected {}", answer.describe());
                (step, Progress::Continue)
            }
        };
        self.step = next;
        progress
    }

    /// Drive the whole selection with a blocking prompter.
    pub fn run<P: Prompter + ?Sized>(
        &mut self,
        prompter: &mut P,
    ) -> Selection<(SourceKind, SourceParameters)> {
        loop {
            let answer = match self.prompt() {
                None => return Selection::Cancelled,
                Some(Prompt::Kind(candidates)) => {
                    prompter.choose_kind(candidates).map_or(Answer::Cancel, Answer::Kind)
                }
                Some(Prompt::File { kind, filters }) => prompter
                    .choose_file(kind, filters)
                    .map_or(Answer::Cancel, Answer::File),
                Some(Prompt::Text(field)) => prompter.text(field).map_or(Answer::Cancel, Answer::Text),
            };
            match self.answer(answer) {
                Progress::Continue => continue,
                Progress::Ready(kind, params) => return Selection::Chosen((kind, params)),
                Progress::Cancelled => return Selection::Cancelled,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Selection → load → model
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Outcome {
    Cancelled,
    Loaded(TableModel),
    Failed(LoadError),
}

/// Hand finished parameters to the loader and wrap the result in a model.
pub fn load_selection(ctx: &AppContext, kind: SourceKind, params: SourceParameters) -> Outcome {
    match SourceLoader::new(ctx).load(kind, params) {
        Ok(data) => Outcome::Loaded(TableModel::new(data)),
        Err(e) => Outcome::Failed(e),
    }
}

/// The full blocking pipeline: prompts, then load. No model on cancel.
pub fn run_pipeline<P: Prompter + ?Sized>(ctx: &AppContext, prompter: &mut P) -> Outcome {
    match SourceSelector::default().run(prompter) {
        Selection::Chosen((kind, params)) => load_selection(ctx, kind, params),
        Selection::Cancelled => Outcome::Cancelled,
    }
}
