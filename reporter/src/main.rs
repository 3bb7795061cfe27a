use benchmark_reporter::model::ReportOutcome;
use benchmark_reporter::plot::PlotOptions;
use benchmark_reporter::{execute_report, ReportConfig};
use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli::ReporterCli::parse();
    let profile = args.profile.profile(args.pull_policy)?;
    let config = ReportConfig {
        root: args.root,
        output_dir: args.output,
        plot: PlotOptions {
            width: args.width,
            height: args.height,
        },
    };

    match execute_report(&profile, &config)? {
        ReportOutcome::NoData => println!("No data found!"),
        ReportOutcome::Plotted(paths) => {
            log::info!("Wrote {} plots to {}", paths.len(), config.output_dir.display());
        }
    }

    Ok(())
}
