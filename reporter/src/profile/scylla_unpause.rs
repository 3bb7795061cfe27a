use crate::labels::{
    LabelError, CLUSTER_NAMES, CLUSTER_STORAGE_NAMES, COMPONENT_COLORS, COMPONENT_ORDER,
    UNPAUSE_SCENARIOS,
};
use crate::model::{Dimension, ElapsedUnit};
use crate::profile::{
    CategoryAxis, Extraction, GroupKey, ProfileKind, ReportProfile, SeriesAxis,
};
use crate::schema::{PathSchema, PathSegment};

pub(super) fn profile() -> anyhow::Result<ReportProfile> {
    Ok(ReportProfile {
        kind: ProfileKind::ScyllaUnpause,
        schema: PathSchema::new(
            vec![
                PathSegment::Dimension(Dimension::Cluster),
                PathSegment::Dimension(Dimension::Driver),
                PathSegment::Dimension(Dimension::NodeCount),
            ],
            UNPAUSE_SCENARIOS,
        )?,
        extraction: Extraction::Split,
        unit: ElapsedUnit::Seconds,
        group_by: &[Dimension::Cluster, Dimension::Driver, Dimension::NodeCount],
        category: CategoryAxis {
            dimension: Dimension::Scenario,
            order: UNPAUSE_SCENARIOS,
            label: "Scenario",
        },
        series: SeriesAxis {
            axis: CategoryAxis {
                dimension: Dimension::Component,
                order: COMPONENT_ORDER,
                label: "Component",
            },
            colors: &COMPONENT_COLORS,
            display: component_label,
        },
        show_legend: true,
        value_label: "Time",
        title,
    })
}

fn component_label(component: &str) -> Result<String, LabelError> {
    COMPONENT_COLORS.get(component)?;
    Ok(component.to_string())
}

fn title(key: &GroupKey, sample_size: usize) -> anyhow::Result<String> {
    let cluster = key.get(Dimension::Cluster)?;
    // The harness provisions the backend volumes with the cluster's default CSI driver.
    Ok(format!(
        "Time to unpause ScyllaDB cluster in {} with {}, n={sample_size}",
        CLUSTER_NAMES.get(cluster)?,
        CLUSTER_STORAGE_NAMES.get(cluster)?,
    ))
}
