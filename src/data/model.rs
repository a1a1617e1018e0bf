use std::collections::BTreeMap;

use anyhow::{Result, bail};

/// Column holding the class label: `0` for timeslides, nonzero for injections.
pub const CLASS_COLUMN: usize = 1;

// ---------------------------------------------------------------------------
// ResultsTable – a classifier-output table held column-major
// ---------------------------------------------------------------------------

/// The full parsed table with a header-name → column-index lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsTable {
    /// Column names in file order.
    pub header: Vec<String>,
    /// Column-major values; every column has `n_rows` entries.
    pub columns: Vec<Vec<f64>>,
    /// Header name → column index. A repeated name maps to its last column.
    pub index: BTreeMap<String, usize>,
}

impl ResultsTable {
    /// Build the table from a header and row-major records.
    ///
    /// Every row must have exactly one value per header column.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if header.is_empty() {
            bail!("table has an empty header");
        }
        let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(rows.len()); header.len()];
        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != header.len() {
                bail!(
                    "row {row_no}: expected {} values but found {}",
                    header.len(),
                    row.len()
                );
            }
            for (col, value) in columns.iter_mut().zip(row) {
                col.push(value);
            }
        }

        let index = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        Ok(ResultsTable {
            header,
            columns,
            index,
        })
    }

    /// Column values for a header name.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.index.get(name).map(|&i| self.columns[i].as_slice())
    }

    /// The class-label column, if the table is wide enough to have one.
    pub fn class_labels(&self) -> Option<&[f64]> {
        self.columns.get(CLASS_COLUMN).map(Vec::as_slice)
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rows_are_stored_column_major() {
        let table = ResultsTable::from_rows(
            names(&["index", "class", "snr"]),
            vec![vec![0.0, 0.0, 5.5], vec![1.0, 1.0, 12.0]],
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.column("snr"), Some(&[5.5, 12.0][..]));
        assert_eq!(table.class_labels(), Some(&[0.0, 1.0][..]));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn repeated_header_name_maps_to_last_column() {
        let table =
            ResultsTable::from_rows(names(&["a", "b", "a"]), vec![vec![1.0, 2.0, 3.0]]).unwrap();
        assert_eq!(table.index["a"], 2);
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = ResultsTable::from_rows(names(&["a", "b"]), vec![vec![1.0, 2.0], vec![3.0]])
            .unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn narrow_table_has_no_class_column() {
        let table = ResultsTable::from_rows(names(&["only"]), vec![vec![1.0]]).unwrap();
        assert!(table.class_labels().is_none());
    }
}
