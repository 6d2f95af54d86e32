/// Data layer: source descriptions, loading, and view ordering.
///
/// Architecture:
/// ```text
///  .csv / .xls(x) / SQLite / MySQL / PostgreSQL
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  loader   │ ───▶ │ database  │  scoped connection, verbatim query
///   └──────────┘      └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ TabularData  │  column names + aligned rows of CellValue
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  stable sort / duplicate projection → row indices
///   └──────────┘
/// ```

pub mod database;
pub mod filter;
pub mod loader;
pub mod model;
pub mod source;
