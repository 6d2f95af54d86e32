use crate::error::ModelError;
use crate::state::{SortState, TableModel};

/// Pull-based access a renderer uses to draw the table, plus the two
/// gestures it may forward back.
pub trait PresentationAdapter {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;
    fn header(&self, column: usize) -> Option<&str>;
    fn cell(&self, row: usize, column: usize) -> Option<String>;

    fn sort_state(&self) -> Option<SortState>;
    fn filter_duplicates(&self) -> bool;

    fn sort(&mut self, column: usize, ascending: bool) -> Result<(), ModelError>;
    fn set_filter_duplicates(&mut self, enabled: bool);

    /// Header click: ascending first, flips direction on the sorted column.
    fn header_clicked(&mut self, column: usize) -> Result<(), ModelError> {
        let ascending = match self.sort_state() {
            Some(state) if state.column == column => !state.ascending,
            _ => true,
        };
        self.sort(column, ascending)
    }
}

impl PresentationAdapter for TableModel {
    fn row_count(&self) -> usize {
        TableModel::row_count(self)
    }

    fn column_count(&self) -> usize {
        TableModel::column_count(self)
    }

    fn header(&self, column: usize) -> Option<&str> {
        self.column_name(column)
    }

    fn cell(&self, row: usize, column: usize) -> Option<String> {
        self.cell_display_value(row, column)
    }

    fn sort_state(&self) -> Option<SortState> {
        TableModel::sort_state(self)
    }

    fn filter_duplicates(&self) -> bool {
        TableModel::filter_duplicates(self)
    }

    fn sort(&mut self, column: usize, ascending: bool) -> Result<(), ModelError> {
        TableModel::sort(self, column, ascending)
    }

    fn set_filter_duplicates(&mut self, enabled: bool) {
        TableModel::set_filter_duplicates(self, enabled)
    }
}
