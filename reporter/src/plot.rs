use crate::analyze::{box_stats, BoxStats};
use crate::filter::present_categories;
use crate::frame::load_from_table;
use crate::model::MeasurementTable;
use crate::partition::{partition_by_tags, Partition};
use crate::profile::{GroupKey, ReportProfile};
use anyhow::Context;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::frame::DataFrame;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The extension of every plot written.
pub const IMAGE_EXTENSION: &str = "svg";

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: i32 = 18;
const LABEL_FONT_SIZE: i32 = 14;
const LEGEND_HEIGHT: i32 = 30;
const LEGEND_MARGIN: i32 = 20;
const LEGEND_SWATCH: i32 = 12;
const LEGEND_GAP: i32 = 16;

/// Share of a category's width used by its boxes.
const BOX_GROUP_WIDTH: f64 = 0.8;
/// Share of a slot's width used by the box drawn in it.
const BOX_FILL: f64 = 0.8;
const OUTLIER_RADIUS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
        }
    }
}

/// A box placed on the chart.
struct PlacedBox {
    center: f64,
    half_width: f64,
    color: RGBColor,
    stats: BoxStats,
}

/// Render one grouped box plot per group of the table into `output_dir`.
///
/// The output directory is created if needed. Returns the written paths, in group key order.
pub fn plot_table(
    profile: &ReportProfile,
    table: &MeasurementTable,
    output_dir: &Path,
    options: &PlotOptions,
) -> anyhow::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let frame = load_from_table(table)?;
    let tags = profile
        .group_by
        .iter()
        .map(|dimension| dimension.column())
        .collect::<Vec<_>>();
    let groups = match partition_by_tags(frame.clone(), &tags)? {
        Partition::Partitioned(groups) => groups,
        Partition::Unpartitioned => BTreeMap::from([(Vec::new(), frame)]),
    };

    let mut written = Vec::with_capacity(groups.len());
    for (values, group) in groups {
        let key = GroupKey::new(profile.group_by, values)?;
        let path = output_dir.join(format!(
            "{}.{IMAGE_EXTENSION}",
            profile.file_stem(&key)
        ));

        render_group(profile, &key, group, &path, options)
            .with_context(|| format!("Failed to render {}", path.display()))?;

        println!("Saved plot: {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn render_group(
    profile: &ReportProfile,
    key: &GroupKey,
    frame: DataFrame,
    path: &Path,
    options: &PlotOptions,
) -> anyhow::Result<()> {
    let categories = present_categories(&frame, &profile.category)?;
    let series = present_categories(&frame, &profile.series.axis)?;
    let boxes = place_boxes(profile, &frame, &categories, &series)?;

    let sample_size = boxes.iter().map(|b| b.stats.count).max().unwrap_or(0);
    let title = profile.title(key, sample_size)?;

    let y_max = boxes
        .iter()
        .flat_map(|b| {
            std::iter::once(b.stats.upper_whisker).chain(b.stats.suspected_outliers.iter().copied())
        })
        .fold(0.0, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };

    let root = SVGBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)?;
    let area = root.titled(&title, (FONT, TITLE_FONT_SIZE).into_font())?;

    let chart_area = if profile.show_legend {
        let (legend_area, chart_area) = area.split_vertically(LEGEND_HEIGHT);
        draw_legend(&legend_area, profile, &series)?;
        chart_area
    } else {
        area
    };

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(categories.len() as f64 - 0.5), 0f64..y_top)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(categories.len())
        .x_label_formatter(&|_| String::new())
        .x_desc(profile.category.label)
        .y_desc(profile.value_axis_label())
        .axis_desc_style((FONT, LABEL_FONT_SIZE).into_font())
        .y_label_style((FONT, LABEL_FONT_SIZE).into_font())
        .draw()?;

    let mut bodies = Vec::with_capacity(boxes.len() * 2);
    let mut lines = Vec::with_capacity(boxes.len() * 5);
    let mut points = Vec::new();
    for placed in &boxes {
        let BoxStats {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            ..
        } = placed.stats;
        let left = placed.center - placed.half_width;
        let right = placed.center + placed.half_width;
        let cap = placed.half_width / 2.0;
        let stroke = placed.color.stroke_width(2);

        bodies.push(Rectangle::new(
            [(left, q1), (right, q3)],
            placed.color.mix(0.5).filled(),
        ));
        bodies.push(Rectangle::new([(left, q1), (right, q3)], stroke));

        lines.push(PathElement::new(vec![(left, median), (right, median)], stroke));
        lines.push(PathElement::new(
            vec![(placed.center, q3), (placed.center, upper_whisker)],
            stroke,
        ));
        lines.push(PathElement::new(
            vec![(placed.center, q1), (placed.center, lower_whisker)],
            stroke,
        ));
        lines.push(PathElement::new(
            vec![
                (placed.center - cap, upper_whisker),
                (placed.center + cap, upper_whisker),
            ],
            stroke,
        ));
        lines.push(PathElement::new(
            vec![
                (placed.center - cap, lower_whisker),
                (placed.center + cap, lower_whisker),
            ],
            stroke,
        ));

        for &value in &placed.stats.suspected_outliers {
            let style = if placed.stats.is_extreme(value) {
                placed.color.filled()
            } else {
                placed.color.stroke_width(1)
            };
            points.push(Circle::new((placed.center, value), OUTLIER_RADIUS, style));
        }
    }
    chart.draw_series(bodies)?;
    chart.draw_series(lines)?;
    chart.draw_series(points)?;

    // Category names are drawn centred under each group of boxes.
    for (idx, category) in categories.iter().enumerate() {
        let (x, y) = chart
            .plotting_area()
            .map_coordinate(&(idx as f64, 0.0));
        root.draw(&Text::new(
            category.to_string(),
            (x, y + 8),
            (FONT, LABEL_FONT_SIZE)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Top)),
        ))?;
    }

    root.present()?;
    Ok(())
}

fn place_boxes(
    profile: &ReportProfile,
    frame: &DataFrame,
    categories: &[&str],
    series: &[&str],
) -> anyhow::Result<Vec<PlacedBox>> {
    let category_column = profile.category.dimension.column();
    let series_column = profile.series.axis.dimension.column();
    let overlay = category_column == series_column;

    let tags = if overlay {
        vec![category_column]
    } else {
        vec![category_column, series_column]
    };
    let Partition::Partitioned(cells) = partition_by_tags(frame.clone(), &tags)? else {
        anyhow::bail!("Expected partitioned cells for {tags:?}");
    };

    let slots = if overlay { 1 } else { series.len().max(1) };
    let slot_width = BOX_GROUP_WIDTH / slots as f64;

    let mut boxes = Vec::with_capacity(cells.len());
    for (cell_key, cell) in cells {
        let (Some(category), Some(series_value)) = (cell_key.first(), cell_key.last()) else {
            continue;
        };
        let Some(stats) = box_stats(&cell, profile.unit.column())? else {
            continue;
        };
        log::debug!("Box {category}/{series_value}: {stats:?}");

        let x = categories
            .iter()
            .position(|c| *c == category.as_str())
            .with_context(|| format!("No category for {category}"))?;
        let slot = if overlay {
            0
        } else {
            series
                .iter()
                .position(|s| *s == series_value.as_str())
                .with_context(|| format!("No series for {series_value}"))?
        };

        boxes.push(PlacedBox {
            center: x as f64 - BOX_GROUP_WIDTH / 2.0 + (slot as f64 + 0.5) * slot_width,
            half_width: slot_width * BOX_FILL / 2.0,
            color: profile.series.color(series_value)?,
            stats,
        });
    }

    Ok(boxes)
}

fn draw_legend(
    area: &DrawingArea<SVGBackend<'_>, Shift>,
    profile: &ReportProfile,
    series: &[&str],
) -> anyhow::Result<()> {
    let style = TextStyle::from((FONT, LABEL_FONT_SIZE).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    let mut entries = Vec::with_capacity(series.len());
    for value in series {
        let label = (profile.series.display)(value)?;
        let (width, _) = area.estimate_text_size(&label, &style)?;
        entries.push((profile.series.color(value)?, label, width as i32));
    }

    let title = profile.series.axis.label;
    let (title_width, _) = area.estimate_text_size(title, &style)?;
    let total = title_width as i32
        + entries
            .iter()
            .map(|(_, _, width)| LEGEND_GAP + LEGEND_SWATCH + 4 + width)
            .sum::<i32>();

    let (area_width, area_height) = area.dim_in_pixel();
    let middle = area_height as i32 / 2;
    let mut x = area_width as i32 - LEGEND_MARGIN - total;

    area.draw(&Text::new(title.to_string(), (x, middle), style.clone()))?;
    x += title_width as i32;

    for (color, label, width) in entries {
        x += LEGEND_GAP;
        area.draw(&Rectangle::new(
            [
                (x, middle - LEGEND_SWATCH / 2),
                (x + LEGEND_SWATCH, middle + LEGEND_SWATCH / 2),
            ],
            color.filled(),
        ))?;
        x += LEGEND_SWATCH + 4;
        area.draw(&Text::new(label, (x, middle), style.clone()))?;
        x += width;
    }

    Ok(())
}
