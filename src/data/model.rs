use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::error::LoadError;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a loaded table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value covering what files and SQL engines hand us.
/// Rows are compared value-for-value for duplicate detection, so `CellValue`
/// must be `Eq + Hash`.
#[derive(Debug, Clone)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

// -- Manual Eq/Ord/Hash so floats behave as plain values --

/// Equality follows `Ord`: `NaN == NaN` and `0.0 != -0.0`, matching the bit hash.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                Text(_) => 4,
            }
        }
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => discriminant(self).cmp(&discriminant(other)),
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Text(s) => s.hash(state),
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Bool(b) => b.hash(state),
            CellValue::Null => {}
        }
    }
}

/// Canonical string form, used for display only.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl CellValue {
    /// Infer a typed value from raw delimited-file text.
    pub fn infer(s: &str) -> Self {
        if s.is_empty() {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        if s == "true" || s == "false" {
            return CellValue::Bool(s == "true");
        }
        CellValue::Text(s.to_string())
    }

    /// Numeric interpretation used when sorting. Text counts when it parses.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// TabularData – the uniform table every source is normalised into
// ---------------------------------------------------------------------------

/// Column names plus rows of cells aligned to them.
///
/// Constructed only through [`TabularData::new`], which guarantees unique
/// column names and that every row is exactly as wide as the header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TabularData {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl TabularData {
    /// Build a table, de-duplicating header names and validating row widths.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, LoadError> {
        let width = columns.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(LoadError::ParseFailed(format!(
                "Row {idx}: expected {width} fields, found {}",
                row.len()
            )));
        }
        Ok(Self {
            columns: dedup_column_names(columns),
            rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row)?.get(column)
    }
}

/// Rename repeated headers `a, a, a` to `a, a.1, a.2`.
fn dedup_column_names(columns: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(columns.len());
    let mut out = Vec::with_capacity(columns.len());
    for name in columns {
        let mut candidate = name.clone();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_infer() {
        assert_eq!(CellValue::infer(""), CellValue::Null);
        assert_eq!(CellValue::infer("42"), CellValue::Integer(42));
        assert_eq!(CellValue::infer("-1.5"), CellValue::Float(-1.5));
        assert_eq!(CellValue::infer("true"), CellValue::Bool(true));
        assert_eq!(CellValue::infer("Alice"), text("Alice"));
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::Integer(7).to_string(), "7");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Float(3.0).to_string(), "3");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(text("x y").to_string(), "x y");
    }

    #[test]
    fn test_as_f64_accepts_numeric_text() {
        assert_eq!(text(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(text("abc").as_f64(), None);
        assert_eq!(CellValue::Null.as_f64(), None);
        assert_eq!(CellValue::Integer(3).as_f64(), Some(3.0));
    }

    #[test]
    fn test_float_equality_and_hash_agree() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(vec![CellValue::Float(0.1), CellValue::Null]);
        assert!(set.contains(&vec![CellValue::Float(0.1), CellValue::Null]));
        assert!(!set.contains(&vec![CellValue::Float(0.2), CellValue::Null]));
    }

    #[test]
    fn test_nan_and_signed_zero_equality() {
        use std::collections::HashSet;
        let nan = CellValue::infer("NaN");
        assert_eq!(nan, CellValue::infer("NaN"));
        assert_ne!(CellValue::Float(0.0), CellValue::Float(-0.0));

        let mut set = HashSet::new();
        set.insert(vec![nan.clone()]);
        assert!(set.contains(&vec![CellValue::infer("nan")]));
        assert!(!set.contains(&vec![CellValue::Float(0.0)]));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = TabularData::new(
            vec!["a".into(), "b".into()],
            vec![vec![CellValue::Integer(1)]],
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::ParseFailed(_)));
    }

    #[test]
    fn test_new_dedups_column_names() {
        let table = TabularData::new(
            vec!["a".into(), "a".into(), "b".into(), "a".into()],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(table.columns(), &["a", "a.1", "b", "a.2"]);
    }

    #[test]
    fn test_cell_lookup() {
        let table = TabularData::new(
            vec!["a".into()],
            vec![vec![CellValue::Integer(1)], vec![CellValue::Integer(2)]],
        )
        .unwrap();
        assert_eq!(table.cell(1, 0), Some(&CellValue::Integer(2)));
        assert_eq!(table.cell(2, 0), None);
        assert_eq!(table.cell(0, 1), None);
    }
}
