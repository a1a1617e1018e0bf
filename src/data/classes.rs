use anyhow::{Context, Result};

use super::model::{CLASS_COLUMN, ResultsTable};

// ---------------------------------------------------------------------------
// Class split: timeslides (label 0) vs injections (any other label)
// ---------------------------------------------------------------------------

/// Points of one table split by class label, in row order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassSplit {
    pub timeslides: Vec<[f64; 2]>,
    pub injections: Vec<[f64; 2]>,
}

/// Pair the `x` and `y` columns row by row and split them by class label.
pub fn split_by_class(table: &ResultsTable, x: usize, y: usize) -> Result<ClassSplit> {
    let labels = table
        .class_labels()
        .with_context(|| format!("table has no class column (column {CLASS_COLUMN})"))?;

    let mut split = ClassSplit::default();
    for (point, &label) in paired(table, x, y).zip(labels) {
        if label == 0.0 {
            split.timeslides.push(point);
        } else {
            split.injections.push(point);
        }
    }
    Ok(split)
}

/// Every row of the table as an `[x, y]` point, ignoring the class label.
pub fn all_points(table: &ResultsTable, x: usize, y: usize) -> Vec<[f64; 2]> {
    paired(table, x, y).collect()
}

fn paired(table: &ResultsTable, x: usize, y: usize) -> impl Iterator<Item = [f64; 2]> + '_ {
    table.columns[x]
        .iter()
        .zip(&table.columns[y])
        .map(|(&xi, &yi)| [xi, yi])
}
