// src/pivot/mod.rs
//
// Reshapes long-format (teacher, count, attribute) rows into the wide matrix
// the frontend chart consumes. Row 0 is always the header.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{AggregationRow, ChartCell, ChartMatrix};

pub const TEACHER_COLUMN: &str = "Teacher Name";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("attribute '{0}' is not in the attribute catalog")]
    UnknownAttribute(String),
}

/// Picks the matrix shape from the filter: one column per catalog attribute,
/// or a single column for the filtered attribute.
pub fn build_chart(
    filter: Option<&str>,
    catalog: &[String],
    rows: &[AggregationRow],
) -> Result<ChartMatrix, PivotError> {
    match filter {
        Some(attribute) => Ok(project_filtered(attribute, rows)),
        None => pivot_all(catalog, rows),
    }
}

/// Wide matrix with every catalog attribute as a column.
///
/// Cells without a matching row stay 0. Rows are emitted in the order their
/// teacher first appears; a teacher seen again later is folded into its
/// existing row, so the output has exactly one row per teacher even if the
/// input is not grouped.
pub fn pivot_all(catalog: &[String], rows: &[AggregationRow]) -> Result<ChartMatrix, PivotError> {
    let width = catalog.len() + 1;

    let mut header = Vec::with_capacity(width);
    header.push(ChartCell::from(TEACHER_COLUMN));
    header.extend(catalog.iter().cloned().map(ChartCell::Label));

    let columns: HashMap<&str, usize> = catalog
        .iter()
        .enumerate()
        .map(|(i, attr)| (attr.as_str(), i + 1))
        .collect();

    let mut matrix: ChartMatrix = vec![header];
    let mut teacher_rows: HashMap<&str, usize> = HashMap::new();
    // index into `matrix` of the row currently accumulating
    let mut current: Option<(&str, usize)> = None;

    for entry in rows {
        let column = *columns
            .get(entry.attribute.as_str())
            .ok_or_else(|| PivotError::UnknownAttribute(entry.attribute.clone()))?;

        let row_idx = match current {
            Some((teacher, idx)) if teacher == entry.teacher_name => idx,
            _ => {
                let idx = *teacher_rows
                    .entry(entry.teacher_name.as_str())
                    .or_insert_with(|| {
                        matrix.push(empty_row(&entry.teacher_name, width));
                        matrix.len() - 1
                    });
                current = Some((entry.teacher_name.as_str(), idx));
                idx
            }
        };

        matrix[row_idx][column] = ChartCell::Count(entry.count);
    }

    Ok(matrix)
}

/// Two-column view for a single attribute; rows keep their input order.
pub fn project_filtered(attribute: &str, rows: &[AggregationRow]) -> ChartMatrix {
    let mut matrix = Vec::with_capacity(rows.len() + 1);
    matrix.push(vec![ChartCell::from(TEACHER_COLUMN), ChartCell::from(attribute)]);
    matrix.extend(rows.iter().map(|entry| {
        vec![
            ChartCell::Label(entry.teacher_name.clone()),
            ChartCell::Count(entry.count),
        ]
    }));
    matrix
}

fn empty_row(teacher_name: &str, width: usize) -> Vec<ChartCell> {
    let mut row = vec![ChartCell::Count(0); width];
    row[0] = ChartCell::from(teacher_name);
    row
}
