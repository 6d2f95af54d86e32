use std::cmp::Ordering;
use std::collections::HashSet;

use super::model::{CellValue, TabularData};

// ---------------------------------------------------------------------------
// Sorting: whole-column numeric or lexical comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Numeric,
    Lexical,
}

/// Numeric only when every non-null cell of the column parses as a number.
/// A single non-numeric cell switches the whole column to lexical.
pub fn column_sort_mode(data: &TabularData, column: usize) -> SortMode {
    let mut saw_number = false;
    for row in data.rows() {
        match &row[column] {
            CellValue::Null => {}
            value if value.as_f64().is_some() => saw_number = true,
            _ => return SortMode::Lexical,
        }
    }
    if saw_number {
        SortMode::Numeric
    } else {
        SortMode::Lexical
    }
}

/// Nulls order before everything else in both modes.
#[derive(Debug)]
enum SortKey {
    Null,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn of(value: &CellValue, mode: SortMode) -> Self {
        if value.is_null() {
            return SortKey::Null;
        }
        match mode {
            SortMode::Numeric => value
                .as_f64()
                .map_or_else(|| SortKey::Text(value.to_string()), SortKey::Number),
            SortMode::Lexical => SortKey::Text(value.to_string()),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Ordering::Equal,
            (SortKey::Null, _) => Ordering::Less,
            (_, SortKey::Null) => Ordering::Greater,
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Stable sort of `prior` (row indices) by `column`. Ties keep their order in `prior`.
pub fn sorted_indices(
    data: &TabularData,
    prior: &[usize],
    column: usize,
    ascending: bool,
) -> Vec<usize> {
    let mode = column_sort_mode(data, column);
    let keys: Vec<SortKey> = data
        .rows()
        .iter()
        .map(|row| SortKey::of(&row[column], mode))
        .collect();

    let mut order = prior.to_vec();
    order.sort_by(|&a, &b| {
        let ord = keys[a].compare(&keys[b]);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
    order
}

// ---------------------------------------------------------------------------
// Duplicate filtering
// ---------------------------------------------------------------------------

/// `kept[i]` is false when an earlier stored row has identical values.
pub fn first_occurrences(data: &TabularData) -> Vec<bool> {
    let mut seen: HashSet<&[CellValue]> = HashSet::with_capacity(data.row_count());
    data.rows()
        .iter()
        .map(|row| seen.insert(row.as_slice()))
        .collect()
}

/// Project `order` onto rows that are first occurrences, keeping `order`'s sequence.
pub fn unique_indices(data: &TabularData, order: &[usize]) -> Vec<usize> {
    let kept = first_occurrences(data);
    order.iter().copied().filter(|&idx| kept[idx]).collect()
}
