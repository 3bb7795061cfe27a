use std::fmt;
use std::path::PathBuf;

/// A dimension of the experiment, encoded either in the directory layout or derived from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Cluster,
    Driver,
    NodeCount,
    Scenario,
    Component,
}

impl Dimension {
    /// The column name used for this dimension in the measurement frame.
    pub fn column(&self) -> &'static str {
        match self {
            Dimension::Cluster => "cluster",
            Dimension::Driver => "driver",
            Dimension::NodeCount => "nodes",
            Dimension::Scenario => "scenario",
            Dimension::Component => "component",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// The part of a split measurement that a row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Component {
    Application,
    Overhead,
}

impl Component {
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Application => "Application",
            Component::Overhead => "Overhead",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The unit that elapsed times are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElapsedUnit {
    Seconds,
    Milliseconds,
}

impl ElapsedUnit {
    /// Convert a millisecond value read from a record into this unit.
    pub fn from_millis(&self, millis: f64) -> f64 {
        match self {
            ElapsedUnit::Seconds => millis / 1000.0,
            ElapsedUnit::Milliseconds => millis,
        }
    }

    /// The column name used for elapsed times in the measurement frame.
    pub fn column(&self) -> &'static str {
        match self {
            ElapsedUnit::Seconds => "elapsed_time_s",
            ElapsedUnit::Milliseconds => "elapsed_time_ms",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ElapsedUnit::Seconds => "s",
            ElapsedUnit::Milliseconds => "ms",
        }
    }
}

/// One row of the measurement table.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementRow {
    pub cluster: String,
    pub driver: String,
    /// Only set when the directory layout has a node count level.
    pub node_count: Option<String>,
    pub scenario: String,
    /// Only set when records are split into application and overhead time.
    pub component: Option<Component>,
    /// Elapsed time in the unit of the table this row belongs to.
    pub elapsed: f64,
}

impl MeasurementRow {
    /// The value of a dimension for this row, if the row carries it.
    pub fn dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Cluster => Some(&self.cluster),
            Dimension::Driver => Some(&self.driver),
            Dimension::NodeCount => self.node_count.as_deref(),
            Dimension::Scenario => Some(&self.scenario),
            Dimension::Component => self.component.as_ref().map(Component::as_str),
        }
    }
}

/// The flat, append-only table built by the loader.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementTable {
    pub unit: ElapsedUnit,
    rows: Vec<MeasurementRow>,
}

impl MeasurementTable {
    pub fn new(unit: ElapsedUnit) -> Self {
        Self {
            unit,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: MeasurementRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The result of running a report.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// No measurements were found, nothing was plotted.
    NoData,
    /// The paths of the plots that were written, in the order they were written.
    Plotted(Vec<PathBuf>),
}
