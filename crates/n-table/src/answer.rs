// SPDX-License-Identifier: MIT
//! The submitted result.
//!
//! An [`Answer`] is a snapshot of every cell in row-major order, one
//! [`CellRecord`] per (row, column) pair of the full cross product, with
//! `""` for cells that were never edited. It is built from the grid on
//! submit and never mutates anything.
//!
//! The outside world wants a flat object keyed `"<row>_<column>"`. That
//! form is produced only at the boundary, by [`Answer::to_flat_map`] and by
//! the `Serialize` impl:
//!
//! ```json
//! { "A_X": "", "A_Y": "7", "B_X": "", "B_Y": "" }
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::axis::Axis;
use crate::grid::ValueGrid;

/// One cell of the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRecord {
    pub row: String,
    pub column: String,
    pub value: String,
}

impl CellRecord {
    /// The flat key, `"<row>_<column>"`.
    #[must_use]
    pub fn key(&self) -> String {
        flat_key(&self.row, &self.column)
    }
}

/// The flat key for a row and column label.
#[must_use]
pub fn flat_key(row: &str, column: &str) -> String {
    format!("{row}_{column}")
}

/// Every cell's text, keyed by labels, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    records: Vec<CellRecord>,
}

impl Answer {
    /// Snapshot `grid` under the labels of `rows` and `columns`.
    #[must_use]
    pub fn collect(rows: &Axis, columns: &Axis, grid: &ValueGrid) -> Self {
        let mut records = Vec::with_capacity(rows.len() * columns.len());
        for (r, row) in rows.names().enumerate() {
            for (c, column) in columns.names().enumerate() {
                records.push(CellRecord {
                    row: row.to_owned(),
                    column: column.to_owned(),
                    value: grid.get(r, c).to_owned(),
                });
            }
        }
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[CellRecord] {
        &self.records
    }

    /// Value at the cell with these labels.
    #[must_use]
    pub fn get(&self, row: &str, column: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.row == row && r.column == column)
            .map(|r| r.value.as_str())
    }

    /// The flat `"<row>_<column>" → value` pairs, in row-major order.
    #[must_use]
    pub fn to_flat_map(&self) -> Vec<(String, String)> {
        self.records
            .iter()
            .map(|r| (r.key(), r.value.clone()))
            .collect()
    }

    /// First record whose value is empty.
    #[must_use]
    pub fn first_empty(&self) -> Option<&CellRecord> {
        self.records.iter().find(|r| r.value.is_empty())
    }
}

impl Serialize for Answer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.key(), &record.value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AxisKind;
    use crate::grid::Cursor;
    use pretty_assertions::assert_eq;

    fn axes(rows: &[&str], cols: &[&str]) -> (Axis, Axis) {
        (
            Axis::from_names(AxisKind::Rows, rows).unwrap(),
            Axis::from_names(AxisKind::Columns, cols).unwrap(),
        )
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn covers_the_cross_product_with_empty_defaults() {
        let (rows, cols) = axes(&["A", "B"], &["X", "Y"]);
        let mut grid = ValueGrid::new(2, 2);
        grid.push(Cursor::new(0, 1), '7');

        let answer = Answer::collect(&rows, &cols, &grid);
        assert_eq!(
            answer.to_flat_map(),
            pairs(&[("A_X", ""), ("A_Y", "7"), ("B_X", ""), ("B_Y", "")])
        );
        assert_eq!(answer.get("A", "Y"), Some("7"));
        assert_eq!(answer.get("C", "Y"), None);
    }

    #[test]
    fn serializes_as_flat_object_in_order() {
        let (rows, cols) = axes(&["r2", "r1"], &["b", "a"]);
        let mut grid = ValueGrid::new(2, 2);
        grid.push(Cursor::new(1, 0), 'z');

        let json = serde_json::to_string(&Answer::collect(&rows, &cols, &grid)).unwrap();
        assert_eq!(json, r#"{"r2_b":"","r2_a":"","r1_b":"z","r1_a":""}"#);
    }

    #[test]
    fn records_carry_labels() {
        let (rows, cols) = axes(&["R"], &["C"]);
        let answer = Answer::collect(&rows, &cols, &ValueGrid::new(1, 1));
        assert_eq!(
            answer.records(),
            &[CellRecord {
                row: "R".into(),
                column: "C".into(),
                value: String::new(),
            }]
        );
        assert_eq!(answer.first_empty().map(CellRecord::key), Some("R_C".into()));
    }
}
