use crate::model::{Component, Dimension, MeasurementRow, MeasurementTable};
use crate::profile::{Extraction, ReportProfile};
use crate::schema::PathSegment;
use anyhow::Context;
use benchmark_results_model::{load_timing_records, TimingField, TimingRecord};
use std::path::Path;
use walkdir::WalkDir;

/// Load every measurement below `root` that matches the profile's directory layout.
///
/// Entries that are not directories, fixed directories that do not exist and scenario files that
/// are missing are all skipped. Any record that cannot be parsed, or lacks a field the profile
/// needs, fails the whole load.
pub fn load_table(profile: &ReportProfile, root: &Path) -> anyhow::Result<MeasurementTable> {
    log::debug!(
        "Loading {:?} results from {} with layout {}",
        profile.kind,
        root.display(),
        profile.schema.describe()
    );

    let mut table = MeasurementTable::new(profile.unit);
    let mut bindings = Vec::with_capacity(profile.schema.segments().len());
    walk(
        profile,
        root,
        profile.schema.segments(),
        &mut bindings,
        &mut table,
    )?;

    log::info!("Loaded {} measurements from {}", table.len(), root.display());
    Ok(table)
}

fn walk(
    profile: &ReportProfile,
    dir: &Path,
    segments: &[PathSegment],
    bindings: &mut Vec<(Dimension, String)>,
    table: &mut MeasurementTable,
) -> anyhow::Result<()> {
    let Some((segment, rest)) = segments.split_first() else {
        return read_scenarios(profile, dir, bindings, table);
    };

    match segment {
        PathSegment::Fixed(name) => {
            let next = dir.join(name);
            if !next.is_dir() {
                log::debug!("Skipping {}, not a directory", next.display());
                return Ok(());
            }
            walk(profile, &next, rest, bindings, table)
        }
        PathSegment::Dimension(dimension) => {
            for entry in WalkDir::new(dir)
                .min_depth(1)
                .max_depth(1)
                .follow_links(true)
            {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) if is_dangling_link(&err) => {
                        log::trace!("Skipping {err}, dangling link");
                        continue;
                    }
                    Err(err) => {
                        return Err(err)
                            .with_context(|| format!("Failed to list {}", dir.display()));
                    }
                };
                if !entry.file_type().is_dir() {
                    log::trace!("Skipping {}, not a directory", entry.path().display());
                    continue;
                }

                let value = entry.file_name().to_string_lossy().into_owned();
                bindings.push((*dimension, value));
                walk(profile, entry.path(), rest, bindings, table)?;
                bindings.pop();
            }
            Ok(())
        }
    }
}

fn read_scenarios(
    profile: &ReportProfile,
    dir: &Path,
    bindings: &[(Dimension, String)],
    table: &mut MeasurementTable,
) -> anyhow::Result<()> {
    for scenario in profile.schema.scenarios() {
        let path = dir.join(scenario);
        if !path.exists() {
            continue;
        }

        let records = load_timing_records(&path)
            .with_context(|| format!("Failed to load records from {}", path.display()))?;
        log::debug!("Read {} records from {}", records.len(), path.display());

        for (idx, record) in records.iter().enumerate() {
            append_rows(profile, bindings, scenario, record, table).with_context(|| {
                format!("Invalid record {} in {}", idx + 1, path.display())
            })?;
        }
    }

    Ok(())
}

fn append_rows(
    profile: &ReportProfile,
    bindings: &[(Dimension, String)],
    scenario: &str,
    record: &TimingRecord,
    table: &mut MeasurementTable,
) -> anyhow::Result<()> {
    let row = |component: Option<Component>, millis: f64| -> anyhow::Result<MeasurementRow> {
        Ok(MeasurementRow {
            cluster: bound(bindings, Dimension::Cluster)?,
            driver: bound(bindings, Dimension::Driver)?,
            node_count: bound(bindings, Dimension::NodeCount).ok(),
            scenario: scenario.to_string(),
            component,
            elapsed: profile.unit.from_millis(millis),
        })
    };

    match profile.extraction {
        Extraction::Single(field) => {
            table.push(row(None, record.field(field)?)?);
        }
        Extraction::Split => {
            let application = record.field(TimingField::ApplicationTime)?;
            let overhead = record.field(TimingField::OverheadTime)?;
            table.push(row(Some(Component::Application), application)?);
            table.push(row(Some(Component::Overhead), overhead)?);
        }
    }

    Ok(())
}

/// A link below the listed directory whose target does not exist.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.depth() > 0
        && err
            .io_error()
            .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound)
}

fn bound(bindings: &[(Dimension, String)], dimension: Dimension) -> anyhow::Result<String> {
    bindings
        .iter()
        .find(|(d, _)| *d == dimension)
        .map(|(_, v)| v.clone())
        .with_context(|| format!("No {dimension} bound by the directory layout"))
}
