use crate::data::filter::{sorted_indices, unique_indices};
use crate::data::model::TabularData;
use crate::error::ModelError;

// ---------------------------------------------------------------------------
// Table model
// ---------------------------------------------------------------------------

/// Last applied sort, kept so the renderer can show it and flip direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: usize,
    pub ascending: bool,
}

/// Owns the loaded table and the row order currently exposed to the renderer.
/// View operations only recompute index vectors; the data is never touched.
#[derive(Debug)]
pub struct TableModel {
    data: TabularData,

    /// All row indices in the current sort order.
    sorted: Vec<usize>,

    /// `sorted`, minus duplicates when the filter is on (cached).
    view: Vec<usize>,

    sort: Option<SortState>,
    filter_duplicates: bool,
}

impl TableModel {
    pub fn new(data: TabularData) -> Self {
        let sorted: Vec<usize> = (0..data.row_count()).collect();
        Self {
            view: sorted.clone(),
            sorted,
            data,
            sort: None,
            filter_duplicates: false,
        }
    }

    /// Stable sort of every row by `column`; ties keep their previous order.
    pub fn sort(&mut self, column: usize, ascending: bool) -> Result<(), ModelError> {
        self.check_column(column)?;
        self.sorted = sorted_indices(&self.data, &self.sorted, column, ascending);
        self.sort = Some(SortState { column, ascending });
        self.refilter();
        log::debug!("Sorted by column {column} ascending={ascending}");
        Ok(())
    }

    pub fn set_filter_duplicates(&mut self, enabled: bool) {
        self.filter_duplicates = enabled;
        self.refilter();
    }

    /// Recompute `view` from the current sort order.
    fn refilter(&mut self) {
        self.view = if self.filter_duplicates {
            unique_indices(&self.data, &self.sorted)
        } else {
            self.sorted.clone()
        };
    }

    fn check_column(&self, column: usize) -> Result<(), ModelError> {
        if column < self.data.column_count() {
            Ok(())
        } else {
            Err(ModelError::ColumnOutOfRange {
                index: column,
                columns: self.data.column_count(),
            })
        }
    }

    pub fn row_count(&self) -> usize {
        self.view.len()
    }

    pub fn total_rows(&self) -> usize {
        self.data.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.data.column_count()
    }

    pub fn column_name(&self, column: usize) -> Option<&str> {
        self.data.columns().get(column).map(String::as_str)
    }

    /// Display string of the cell at a view position.
    pub fn cell_display_value(&self, view_row: usize, view_col: usize) -> Option<String> {
        let row = *self.view.get(view_row)?;
        self.data.cell(row, view_col).map(ToString::to_string)
    }

    pub fn sort_state(&self) -> Option<SortState> {
        self.sort
    }

    pub fn filter_duplicates(&self) -> bool {
        self.filter_duplicates
    }

    pub fn view_order(&self) -> &[usize] {
        &self.view
    }

    pub fn data(&self) -> &TabularData {
        &self.data
    }
}
