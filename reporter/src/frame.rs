use crate::model::{Dimension, MeasurementTable};
use polars::prelude::*;

const DIMENSIONS: [Dimension; 5] = [
    Dimension::Cluster,
    Dimension::Driver,
    Dimension::NodeCount,
    Dimension::Scenario,
    Dimension::Component,
];

/// Convert the measurement table into a [`DataFrame`].
///
/// Every dimension gets a string column, optional dimensions are null where a row does not carry
/// them. The elapsed time column is named after the unit of the table.
pub(crate) fn load_from_table(table: &MeasurementTable) -> anyhow::Result<DataFrame> {
    let rows = table.rows();

    let mut columns = DIMENSIONS
        .iter()
        .map(|dimension| {
            let values = rows
                .iter()
                .map(|row| row.dimension(*dimension))
                .collect::<Vec<_>>();
            Column::new(dimension.column().into(), values)
        })
        .collect::<Vec<_>>();
    columns.push(Column::new(
        table.unit.column().into(),
        rows.iter().map(|row| row.elapsed).collect::<Vec<_>>(),
    ));

    Ok(DataFrame::new(columns)?)
}

/// Read a float column into a vector, skipping nulls.
pub(crate) fn float_values(frame: &DataFrame, column: &str) -> anyhow::Result<Vec<f64>> {
    Ok(frame.column(column)?.f64()?.into_iter().flatten().collect())
}
