use crate::labels::{
    LabelError, CLUSTER_NAMES, DRIVER_NAMES, POD_READINESS_SCENARIOS,
    POD_READINESS_SCENARIO_COLORS,
};
use crate::model::{Dimension, ElapsedUnit};
use crate::profile::{
    CategoryAxis, Extraction, GroupKey, ProfileKind, PullPolicy, ReportProfile, SeriesAxis,
};
use crate::schema::{PathSchema, PathSegment};
use benchmark_results_model::TimingField;

pub(super) fn profile(pull_policy: PullPolicy) -> anyhow::Result<ReportProfile> {
    let scenarios = CategoryAxis {
        dimension: Dimension::Scenario,
        order: POD_READINESS_SCENARIOS,
        label: "Scenario",
    };

    Ok(ReportProfile {
        kind: ProfileKind::CsiPodReadiness,
        schema: PathSchema::new(
            vec![
                PathSegment::Dimension(Dimension::Cluster),
                PathSegment::Dimension(Dimension::Driver),
                PathSegment::Fixed(pull_policy.directory().to_string()),
            ],
            POD_READINESS_SCENARIOS,
        )?,
        extraction: Extraction::Single(TimingField::ElapsedTime),
        unit: ElapsedUnit::Seconds,
        group_by: &[Dimension::Cluster, Dimension::Driver],
        category: scenarios,
        series: SeriesAxis {
            axis: scenarios,
            colors: &POD_READINESS_SCENARIO_COLORS,
            display: scenario_label,
        },
        show_legend: false,
        value_label: "Elapsed Time",
        title,
    })
}

fn scenario_label(scenario: &str) -> Result<String, LabelError> {
    POD_READINESS_SCENARIO_COLORS.get(scenario)?;
    Ok(scenario.to_string())
}

fn title(key: &GroupKey, sample_size: usize) -> anyhow::Result<String> {
    Ok(format!(
        "Time to reach Pod readiness in {} with {}, n={sample_size}",
        CLUSTER_NAMES.get(key.get(Dimension::Cluster)?)?,
        DRIVER_NAMES.get(key.get(Dimension::Driver)?)?,
    ))
}
