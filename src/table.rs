//! In-memory delimited-text table: a fixed column schema over ordered rows

use std::cmp::Ordering;
use std::path::Path;

use crate::error::ChopperError;

/// A single cell value, covering the scalar types delimited text carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Parse a raw field: empty is null, then integer, then finite float,
    /// then text. "NaN" and "inf" stay textual so join keys and sort order
    /// remain well defined.
    pub fn parse(field: &str) -> Value {
        if field.is_empty() {
            return Value::Null;
        }
        if let Ok(i) = field.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = field.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
        }
        Value::Str(field.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Canonical string form, used for naming fragments and serialization.
    /// Null has no canonical form: it is omitted from fragments and written
    /// as an empty field on disk.
    pub fn canonical(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Int(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Str(s) => Some(s.clone()),
        }
    }

    /// Join-key equality. Null never matches null, matching relational
    /// inner-join semantics for missing keys. Non-null values compare by
    /// the same relation the sort uses, so a column mixing `1` and `1.0`
    /// still forms a single key.
    pub fn join_eq(&self, other: &Value) -> bool {
        !self.is_null() && !other.is_null() && self.cmp_total(other) == Ordering::Equal
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::Str(_) => 2,
        }
    }

    /// Total order for deterministic sorting: nulls first, then numerics by
    /// numeric value, then strings lexicographically.
    pub fn cmp_total(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Compare two rows column by column with [`Value::cmp_total`].
pub fn cmp_rows(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.cmp_total(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// Classify a csv-crate failure: unreadable/unwritable files are I/O,
/// everything else is a parse or serialization problem.
fn file_error(path: &Path, err: csv::Error) -> ChopperError {
    if !err.is_io_error() {
        return ChopperError::csv(path, err);
    }
    match err.into_kind() {
        csv::ErrorKind::Io(source) => ChopperError::io(path, source),
        // is_io_error guarantees the Io kind
        _ => ChopperError::io(path, std::io::Error::new(std::io::ErrorKind::Other, "i/o error")),
    }
}

/// An ordered set of rows sharing a fixed, ordered column list.
///
/// Every row is exactly as wide as the column list. Once loaded the table
/// is never mutated by the partitioning stages; workers only read it.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Table { columns, rows }
    }

    /// Load a delimited-text file. The first record is the header; short
    /// records are padded with nulls to the header width.
    pub fn load(path: impl AsRef<Path>, delimiter: u8) -> Result<Table, ChopperError> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)
            .map_err(|e| file_error(path, e))?;

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| file_error(path, e))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| file_error(path, e))?;
            let mut row: Vec<Value> = record
                .iter()
                .take(columns.len())
                .map(Value::parse)
                .collect();
            row.resize(columns.len(), Value::Null);
            rows.push(row);
        }

        Ok(Table { columns, rows })
    }

    /// Write as comma-delimited text: header first, then rows in order,
    /// nulls as empty fields, no row-index column.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ChopperError> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path).map_err(|e| file_error(path, e))?;

        writer
            .write_record(&self.columns)
            .map_err(|e| file_error(path, e))?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(|v| v.canonical().unwrap_or_default()))
                .map_err(|e| file_error(path, e))?;
        }
        writer.flush().map_err(|e| ChopperError::io(path, e))?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy of the rows in `[start, end)` under the same schema.
    pub fn slice(&self, start: usize, end: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows[start..end].to_vec(),
        }
    }

    /// Trim header names and replace internal spaces with underscores so
    /// they can be typed back as a comma-separated split list.
    pub fn normalize_columns(&mut self) {
        for name in &mut self.columns {
            *name = name.trim().replace(' ', "_");
        }
    }

    /// Distinct non-null value count per column, in column order.
    pub fn unique_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut values: Vec<&Value> = self
                    .rows
                    .iter()
                    .map(|row| &row[i])
                    .filter(|v| !v.is_null())
                    .collect();
                values.sort_by(|a, b| a.cmp_total(b));
                values.dedup_by(|a, b| a.cmp_total(b) == Ordering::Equal);
                (name.clone(), values.len())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse(""), Value::Null);
        assert_eq!(Value::parse("42"), Value::Int(42));
        assert_eq!(Value::parse("-7"), Value::Int(-7));
        assert_eq!(Value::parse("2.5"), Value::Float(2.5));
        assert_eq!(Value::parse("Boston"), Value::Str("Boston".to_string()));
        // Non-finite floats stay textual
        assert_eq!(Value::parse("NaN"), Value::Str("NaN".to_string()));
        assert_eq!(Value::parse("inf"), Value::Str("inf".to_string()));
    }

    #[test]
    fn test_value_canonical() {
        assert_eq!(Value::Null.canonical(), None);
        assert_eq!(Value::Int(42).canonical(), Some("42".to_string()));
        assert_eq!(Value::Float(2.5).canonical(), Some("2.5".to_string()));
        assert_eq!(
            Value::Str("MA".to_string()).canonical(),
            Some("MA".to_string())
        );
    }

    #[test]
    fn test_null_never_joins() {
        assert!(!Value::Null.join_eq(&Value::Null));
        assert!(!Value::Null.join_eq(&Value::Int(1)));
        assert!(Value::Int(1).join_eq(&Value::Int(1)));
        assert!(!Value::Int(1).join_eq(&Value::Int(2)));
    }

    #[test]
    fn test_join_eq_matches_sort_order_across_numeric_variants() {
        assert!(Value::Int(1).join_eq(&Value::Float(1.0)));
        assert!(Value::Float(1.0).join_eq(&Value::Int(1)));
        assert!(!Value::Int(1).join_eq(&Value::Float(1.5)));
        assert!(!Value::Int(1).join_eq(&Value::Str("1".to_string())));
    }

    #[test]
    fn test_total_order_nulls_first() {
        let mut values = vec![
            Value::Str("a".to_string()),
            Value::Int(3),
            Value::Null,
            Value::Float(1.5),
        ];
        values.sort_by(|a, b| a.cmp_total(b));
        assert_eq!(
            values,
            vec![
                Value::Null,
                Value::Float(1.5),
                Value::Int(3),
                Value::Str("a".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalize_columns() {
        let mut table = Table::new(
            vec![" First Name ".to_string(), "City".to_string()],
            vec![],
        );
        table.normalize_columns();
        assert_eq!(table.columns(), &["First_Name", "City"]);
    }

    #[test]
    fn test_unique_counts_skip_nulls() {
        let table = Table::new(
            vec!["City".to_string(), "Zip".to_string()],
            vec![
                vec![Value::Str("A".to_string()), Value::Int(1)],
                vec![Value::Str("A".to_string()), Value::Null],
                vec![Value::Str("B".to_string()), Value::Int(2)],
            ],
        );
        let counts = table.unique_counts();
        assert_eq!(counts[0], ("City".to_string(), 2));
        assert_eq!(counts[1], ("Zip".to_string(), 2));
    }
}
