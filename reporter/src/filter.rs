use crate::profile::CategoryAxis;
use itertools::Itertools;
use polars::frame::DataFrame;

/// The categories of an axis that have data in the frame, in the axis' fixed order.
///
/// A value that is not part of the fixed order is an error.
pub(crate) fn present_categories(
    frame: &DataFrame,
    axis: &CategoryAxis,
) -> anyhow::Result<Vec<&'static str>> {
    let column = frame.column(axis.dimension.column())?.str()?;

    let positions = column
        .into_iter()
        .flatten()
        .unique()
        .map(|value| axis.position(value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(positions
        .into_iter()
        .sorted()
        .map(|position| axis.order[position])
        .collect())
}
