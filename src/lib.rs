//! Core of the table viewer: choose a source, load it into one uniform
//! table, and expose a sortable, duplicate-filterable view of it.
//!
//! ```text
//! SourceSelector → (kind, parameters) → SourceLoader → TabularData
//!     → TableModel → PresentationAdapter → renderer (egui)
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod presentation;
pub mod selector;
pub mod state;
pub mod ui;
