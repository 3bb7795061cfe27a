use crate::model::Dimension;
use itertools::Itertools;

/// One level of the results directory layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Every subdirectory at this level is read, its name is the value of the dimension.
    Dimension(Dimension),
    /// A single directory with a fixed name, skipped when it does not exist.
    Fixed(String),
}

/// Describes how experiment dimensions are encoded in the results directory layout.
///
/// The segments are walked from the root directory in order. The directory reached after the last
/// segment holds one results file per scenario, named exactly as the scenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSchema {
    segments: Vec<PathSegment>,
    scenarios: &'static [&'static str],
}

impl PathSchema {
    /// Create a new schema.
    ///
    /// Fails if the segments do not bind both the cluster and driver dimensions, or bind a
    /// dimension more than once.
    pub fn new(
        segments: Vec<PathSegment>,
        scenarios: &'static [&'static str],
    ) -> anyhow::Result<Self> {
        let bound = segments
            .iter()
            .filter_map(|segment| match segment {
                PathSegment::Dimension(dimension) => Some(*dimension),
                PathSegment::Fixed(_) => None,
            })
            .collect::<Vec<_>>();

        if !bound.iter().all_unique() {
            anyhow::bail!("Path schema binds a dimension more than once: {:?}", bound);
        }
        for required in [Dimension::Cluster, Dimension::Driver] {
            if !bound.contains(&required) {
                anyhow::bail!("Path schema does not bind the {required} dimension");
            }
        }
        for dimension in [Dimension::Scenario, Dimension::Component] {
            if bound.contains(&dimension) {
                anyhow::bail!("The {dimension} dimension cannot be bound by a directory");
            }
        }

        Ok(Self {
            segments,
            scenarios,
        })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// The scenario file names, in presentation order.
    pub fn scenarios(&self) -> &'static [&'static str] {
        self.scenarios
    }

    /// The fixed directory names in this layout, in walk order.
    pub fn fixed_segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PathSegment::Fixed(name) => Some(name.as_str()),
            PathSegment::Dimension(_) => None,
        })
    }

    /// Human readable form of the layout, e.g. `<cluster>/<driver>/<nodes>/{baseline,cold}`.
    pub fn describe(&self) -> String {
        let segments = self.segments.iter().map(|segment| match segment {
            PathSegment::Dimension(dimension) => format!("<{dimension}>"),
            PathSegment::Fixed(name) => name.clone(),
        });

        segments
            .chain(std::iter::once(format!(
                "{{{}}}",
                self.scenarios.iter().join(",")
            )))
            .join("/")
    }
}
