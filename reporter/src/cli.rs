use benchmark_reporter::profile::{ProfileKind, PullPolicy};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, long_about = None)]
pub struct ReporterCli {
    /// Which benchmark results to plot
    #[clap(
        long,
        value_enum,
        env = "REPORT_PROFILE",
        default_value_t = ProfileKind::CsiPodReadiness
    )]
    pub profile: ProfileKind,

    /// The directory containing the per-cluster results
    #[clap(long, default_value = "./")]
    pub root: PathBuf,

    /// The directory to write plots to, created if missing
    #[clap(long, default_value = "plots")]
    pub output: PathBuf,

    /// The image pull policy the results were recorded with.
    ///
    /// Only used by profiles whose results are stored below a pull policy directory.
    #[clap(long, value_enum, default_value_t = PullPolicy::Never)]
    pub pull_policy: PullPolicy,

    /// Width of each plot in pixels
    #[clap(long, default_value = "700")]
    pub width: u32,

    /// Height of each plot in pixels
    #[clap(long, default_value = "500")]
    pub height: u32,
}
