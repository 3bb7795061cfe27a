//! Closed lookup tables for display names, colours and category orders.
//!
//! Only values seen in the benchmark runs are supported. A value that is missing from a table is
//! an error, the table must be extended rather than the value silently defaulted.

use plotters::style::RGBColor;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LabelError {
    #[error("Unknown value `{value}` in the {table} table")]
    Unknown { table: &'static str, value: String },
}

/// A named, closed mapping from a categorical value to something displayed for it.
pub struct LookupTable<T: 'static> {
    name: &'static str,
    entries: &'static [(&'static str, T)],
}

impl<T: 'static> LookupTable<T> {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, T)]) -> Self {
        Self { name, entries }
    }

    pub fn get(&self, value: &str) -> Result<&'static T, LabelError> {
        self.entries
            .iter()
            .find(|(key, _)| *key == value)
            .map(|(_, entry)| entry)
            .ok_or_else(|| LabelError::Unknown {
                table: self.name,
                value: value.to_string(),
            })
    }
}

pub static CLUSTER_NAMES: LookupTable<&str> =
    LookupTable::new("cluster name", &[("eks", "EKS"), ("gke", "GKE")]);

pub static DRIVER_NAMES: LookupTable<&str> = LookupTable::new(
    "driver name",
    &[
        ("local.csi.scylladb.com", "local.csi.scylladb.com"),
        ("pd.csi.storage.gke.io", "pd.csi.storage.gke.io (pd-ssd)"),
        ("ebs.csi.aws.com", "ebs.csi.aws.com (gp3)"),
    ],
);

/// The backend storage the unpause benchmarks were run against, keyed by cluster.
pub static CLUSTER_STORAGE_NAMES: LookupTable<&str> = LookupTable::new(
    "cluster storage",
    &[
        ("gke", "pd.csi.storage.gke.io (pd-ssd)"),
        ("eks", "ebs.csi.aws.com (gp3)"),
    ],
);

pub static COMPONENT_COLORS: LookupTable<RGBColor> = LookupTable::new(
    "component colour",
    &[
        ("Overhead", RGBColor(8, 81, 156)),
        ("Application", RGBColor(219, 64, 82)),
    ],
);

pub static POD_READINESS_SCENARIO_COLORS: LookupTable<RGBColor> = LookupTable::new(
    "scenario colour",
    &[
        ("baseline", RGBColor(7, 40, 89)),
        ("busywait", RGBColor(9, 56, 125)),
        ("sidecar", RGBColor(8, 81, 156)),
    ],
);

pub static DRIVER_COLORS: LookupTable<RGBColor> = LookupTable::new(
    "driver colour",
    &[
        ("local.csi.scylladb.com", RGBColor(219, 64, 82)),
        ("pd.csi.storage.gke.io", RGBColor(8, 81, 156)),
        ("ebs.csi.aws.com", RGBColor(7, 40, 89)),
    ],
);

pub const UNPAUSE_SCENARIOS: &[&str] = &["baseline", "cold", "prewarmed"];
pub const POD_READINESS_SCENARIOS: &[&str] = &["baseline", "busywait", "sidecar"];
pub const COMPONENT_ORDER: &[&str] = &["Overhead", "Application"];
pub const DRIVER_ORDER: &[&str] = &[
    "local.csi.scylladb.com",
    "pd.csi.storage.gke.io",
    "ebs.csi.aws.com",
];

/// Position of a value in a fixed category order.
pub fn category_position(
    order: &'static [&'static str],
    table: &'static str,
    value: &str,
) -> Result<usize, LabelError> {
    order
        .iter()
        .position(|v| *v == value)
        .ok_or_else(|| LabelError::Unknown {
            table,
            value: value.to_string(),
        })
}
