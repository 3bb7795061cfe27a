use crate::model::ReportOutcome;
use crate::plot::{plot_table, PlotOptions};
use crate::profile::ReportProfile;
use std::path::PathBuf;

mod analyze;
mod filter;
mod frame;
pub mod labels;
pub mod load;
pub mod model;
mod partition;
pub mod plot;
pub mod profile;
pub mod schema;

/// Where to read results from and where to write plots to.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub plot: PlotOptions,
}

/// Load all results for the profile and plot them.
///
/// Nothing is written, not even the output directory, when no results are found.
pub fn execute_report(
    profile: &ReportProfile,
    config: &ReportConfig,
) -> anyhow::Result<ReportOutcome> {
    let table = load::load_table(profile, &config.root)?;
    if table.is_empty() {
        log::info!("No results found for {:?}", profile.kind);
        return Ok(ReportOutcome::NoData);
    }

    let written = plot_table(profile, &table, &config.output_dir, &config.plot)?;
    Ok(ReportOutcome::Plotted(written))
}
