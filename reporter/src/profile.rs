use crate::labels::{category_position, LabelError, LookupTable};
use crate::model::{Dimension, ElapsedUnit};
use crate::schema::PathSchema;
use benchmark_results_model::TimingField;
use itertools::Itertools;
use plotters::style::RGBColor;

mod csi_pod_readiness;
mod csi_pod_readiness_by_cluster;
mod scylla_unpause;

/// The reports that can be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ProfileKind {
    /// Time to unpause a ScyllaDB cluster, split into application and overhead time, one chart per
    /// cluster, driver and node count.
    ScyllaUnpause,
    /// Time to Pod readiness with the proxy CSI driver, one chart per cluster and driver.
    CsiPodReadiness,
    /// Time to Pod readiness with the proxy CSI driver, one chart per cluster comparing drivers.
    CsiPodReadinessByCluster,
}

/// The image pull policy that the Pod readiness benchmarks were run with.
///
/// Results for each policy are stored in their own directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum PullPolicy {
    #[default]
    Never,
    Always,
}

impl PullPolicy {
    pub fn directory(&self) -> &'static str {
        match self {
            PullPolicy::Never => "pullPolicyNever",
            PullPolicy::Always => "pullPolicyAlways",
        }
    }
}

impl ProfileKind {
    pub fn profile(&self, pull_policy: PullPolicy) -> anyhow::Result<ReportProfile> {
        match self {
            ProfileKind::ScyllaUnpause => scylla_unpause::profile(),
            ProfileKind::CsiPodReadiness => csi_pod_readiness::profile(pull_policy),
            ProfileKind::CsiPodReadinessByCluster => {
                csi_pod_readiness_by_cluster::profile(pull_policy)
            }
        }
    }
}

/// How the rows of the table are derived from each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// One row per record from a single field.
    Single(TimingField),
    /// Two rows per record, the application time and the overhead time.
    Split,
}

/// A categorical axis with a fixed presentation order.
#[derive(Debug, Clone, Copy)]
pub struct CategoryAxis {
    pub dimension: Dimension,
    pub order: &'static [&'static str],
    pub label: &'static str,
}

impl CategoryAxis {
    pub fn position(&self, value: &str) -> Result<usize, LabelError> {
        category_position(self.order, self.dimension.column(), value)
    }
}

/// The series drawn within each category, distinguished by colour.
pub struct SeriesAxis {
    pub axis: CategoryAxis,
    pub colors: &'static LookupTable<RGBColor>,
    pub display: fn(&str) -> Result<String, LabelError>,
}

impl SeriesAxis {
    pub fn color(&self, value: &str) -> Result<RGBColor, LabelError> {
        self.colors.get(value).copied()
    }
}

/// The values of the grouping dimensions for one chart.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey(Vec<(Dimension, String)>);

impl GroupKey {
    pub fn new(dimensions: &[Dimension], values: Vec<String>) -> anyhow::Result<Self> {
        if dimensions.len() != values.len() {
            anyhow::bail!(
                "Group key has {} values for {} dimensions",
                values.len(),
                dimensions.len()
            );
        }
        Ok(Self(dimensions.iter().copied().zip(values).collect()))
    }

    pub fn get(&self, dimension: Dimension) -> anyhow::Result<&str> {
        self.0
            .iter()
            .find(|(d, _)| *d == dimension)
            .map(|(_, v)| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("Group key {self:?} has no {dimension} value"))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }
}

/// Everything needed to load and render one kind of report.
pub struct ReportProfile {
    pub kind: ProfileKind,
    pub schema: PathSchema,
    pub extraction: Extraction,
    pub unit: ElapsedUnit,
    /// One chart is rendered per unique combination of these dimensions.
    pub group_by: &'static [Dimension],
    pub category: CategoryAxis,
    pub series: SeriesAxis,
    pub show_legend: bool,
    /// The y axis label, without the unit.
    pub value_label: &'static str,
    title: fn(&GroupKey, usize) -> anyhow::Result<String>,
}

impl ReportProfile {
    /// The chart title for a group, `sample_size` is the largest number of samples in any box.
    pub fn title(&self, key: &GroupKey, sample_size: usize) -> anyhow::Result<String> {
        (self.title)(key, sample_size)
    }

    pub fn value_axis_label(&self) -> String {
        format!("{} ({})", self.value_label, self.unit.symbol())
    }

    /// The output file name without extension.
    ///
    /// This is the group key values followed by any fixed directories of the layout, joined with
    /// underscores.
    pub fn file_stem(&self, key: &GroupKey) -> String {
        key.values().chain(self.schema.fixed_segments()).join("_")
    }
}
