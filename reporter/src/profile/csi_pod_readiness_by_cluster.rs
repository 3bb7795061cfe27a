use crate::labels::{
    LabelError, CLUSTER_NAMES, DRIVER_COLORS, DRIVER_NAMES, DRIVER_ORDER,
    POD_READINESS_SCENARIOS,
};
use crate::model::{Dimension, ElapsedUnit};
use crate::profile::{
    CategoryAxis, Extraction, GroupKey, ProfileKind, PullPolicy, ReportProfile, SeriesAxis,
};
use crate::schema::{PathSchema, PathSegment};
use benchmark_results_model::TimingField;

pub(super) fn profile(pull_policy: PullPolicy) -> anyhow::Result<ReportProfile> {
    Ok(ReportProfile {
        kind: ProfileKind::CsiPodReadinessByCluster,
        schema: PathSchema::new(
            vec![
                PathSegment::Dimension(Dimension::Cluster),
                PathSegment::Dimension(Dimension::Driver),
                PathSegment::Fixed(pull_policy.directory().to_string()),
            ],
            POD_READINESS_SCENARIOS,
        )?,
        extraction: Extraction::Single(TimingField::ElapsedTime),
        unit: ElapsedUnit::Milliseconds,
        group_by: &[Dimension::Cluster],
        category: CategoryAxis {
            dimension: Dimension::Scenario,
            order: POD_READINESS_SCENARIOS,
            label: "Scenario",
        },
        series: SeriesAxis {
            axis: CategoryAxis {
                dimension: Dimension::Driver,
                order: DRIVER_ORDER,
                label: "Driver",
            },
            colors: &DRIVER_COLORS,
            display: driver_label,
        },
        show_legend: true,
        value_label: "Elapsed Time",
        title,
    })
}

fn driver_label(driver: &str) -> Result<String, LabelError> {
    DRIVER_NAMES.get(driver).map(|name| name.to_string())
}

fn title(key: &GroupKey, sample_size: usize) -> anyhow::Result<String> {
    Ok(format!(
        "Time to reach Pod readiness in {}, n={sample_size}",
        CLUSTER_NAMES.get(key.get(Dimension::Cluster)?)?,
    ))
}
