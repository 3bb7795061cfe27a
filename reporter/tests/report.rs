use benchmark_reporter::labels::LabelError;
use benchmark_reporter::load::load_table;
use benchmark_reporter::model::{Component, MeasurementTable, ReportOutcome};
use benchmark_reporter::plot::PlotOptions;
use benchmark_reporter::profile::{ProfileKind, PullPolicy, ReportProfile};
use benchmark_reporter::{execute_report, ReportConfig};
use benchmark_results_model::{append_timing_record, TimingRecord};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

type Row = (String, String, Option<String>, String, Option<Component>, f64);

fn rows(table: &MeasurementTable) -> Vec<Row> {
    let mut rows = table
        .rows()
        .iter()
        .map(|row| {
            (
                row.cluster.clone(),
                row.driver.clone(),
                row.node_count.clone(),
                row.scenario.clone(),
                row.component,
                row.elapsed,
            )
        })
        .collect::<Vec<_>>();
    rows.sort_by(|a, b| {
        (&a.0, &a.1, &a.2, &a.3, &a.4)
            .cmp(&(&b.0, &b.1, &b.2, &b.3, &b.4))
            .then(a.5.total_cmp(&b.5))
    });
    rows
}

fn row(cluster: &str, driver: &str, scenario: &str, elapsed: f64) -> Row {
    (
        cluster.to_string(),
        driver.to_string(),
        None,
        scenario.to_string(),
        None,
        elapsed,
    )
}

fn write_records(path: &Path, records: &[TimingRecord]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    for record in records {
        append_timing_record(record, path)?;
    }
    Ok(())
}

fn readiness_dir(root: &Path, cluster: &str, driver: &str) -> PathBuf {
    root.join(cluster).join(driver).join("pullPolicyNever")
}

fn config(root: &TempDir) -> ReportConfig {
    env_logger::try_init().ok();

    ReportConfig {
        root: root.path().join("results"),
        output_dir: root.path().join("plots"),
        plot: PlotOptions::default(),
    }
}

fn plot_files(dir: &Path) -> anyhow::Result<Vec<String>> {
    let mut names = std::fs::read_dir(dir)?
        .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
        .collect::<anyhow::Result<Vec<_>>>()?;
    names.sort();
    Ok(names)
}

/// Infinite or NaN data coordinates end up as saturated pixel values.
fn assert_finite_coordinates(svg: &str) {
    for bad in ["inf", "NaN", "2147483647", "-2147483648"] {
        assert!(!svg.contains(bad), "SVG contains {bad}");
    }
}

fn readiness() -> anyhow::Result<ReportProfile> {
    ProfileKind::CsiPodReadiness.profile(PullPolicy::Never)
}

#[test]
fn pod_readiness_single_group() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = readiness_dir(&config.root, "eks", "ebs.csi.aws.com");
    write_records(
        &dir.join("baseline"),
        &[TimingRecord::elapsed(100.0), TimingRecord::elapsed(200.0)],
    )?;
    write_records(&dir.join("sidecar"), &[TimingRecord::elapsed(50.0)])?;

    let profile = readiness()?;
    let table = load_table(&profile, &config.root)?;
    assert_eq!(
        rows(&table),
        vec![
            row("eks", "ebs.csi.aws.com", "baseline", 0.1),
            row("eks", "ebs.csi.aws.com", "baseline", 0.2),
            row("eks", "ebs.csi.aws.com", "sidecar", 0.05),
        ]
    );

    let outcome = execute_report(&profile, &config)?;
    let expected = config.output_dir.join("eks_ebs.csi.aws.com_pullPolicyNever.svg");
    assert_eq!(outcome, ReportOutcome::Plotted(vec![expected.clone()]));

    let svg = std::fs::read_to_string(&expected)?;
    assert!(svg.contains("Time to reach Pod readiness in EKS with ebs.csi.aws.com (gp3), n=2"));
    assert!(svg.contains("baseline"));
    assert!(svg.contains("sidecar"));
    assert!(!svg.contains("busywait"));
    assert_eq!(svg.matches("<circle").count(), 0);
    assert_finite_coordinates(&svg);
    Ok(())
}

#[test]
fn outliers_are_marked() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    write_records(
        &readiness_dir(&config.root, "gke", "pd.csi.storage.gke.io").join("busywait"),
        &[1000.0, 2000.0, 3000.0, 4000.0, 100000.0].map(TimingRecord::elapsed),
    )?;

    execute_report(&readiness()?, &config)?;
    let svg = std::fs::read_to_string(
        config
            .output_dir
            .join("gke_pd.csi.storage.gke.io_pullPolicyNever.svg"),
    )?;
    assert_eq!(svg.matches("<circle").count(), 1);
    assert_finite_coordinates(&svg);
    Ok(())
}

#[test]
fn one_plot_per_cluster_and_driver() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    for (cluster, driver) in [
        ("eks", "ebs.csi.aws.com"),
        ("eks", "local.csi.scylladb.com"),
        ("gke", "pd.csi.storage.gke.io"),
    ] {
        write_records(
            &readiness_dir(&config.root, cluster, driver).join("busywait"),
            &[TimingRecord::elapsed(1000.0)],
        )?;
    }

    let outcome = execute_report(&readiness()?, &config)?;
    let ReportOutcome::Plotted(paths) = outcome else {
        panic!("Expected plots to be written");
    };
    assert_eq!(paths.len(), 3);
    assert_eq!(
        plot_files(&config.output_dir)?,
        vec![
            "eks_ebs.csi.aws.com_pullPolicyNever.svg",
            "eks_local.csi.scylladb.com_pullPolicyNever.svg",
            "gke_pd.csi.storage.gke.io_pullPolicyNever.svg",
        ]
    );
    Ok(())
}

#[test]
fn empty_tree_writes_nothing() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    std::fs::create_dir_all(&config.root)?;

    let outcome = execute_report(&readiness()?, &config)?;
    assert_eq!(outcome, ReportOutcome::NoData);
    assert!(!config.output_dir.exists());
    Ok(())
}

#[test]
fn empty_scenario_file_contributes_no_rows() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = readiness_dir(&config.root, "gke", "pd.csi.storage.gke.io");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("baseline"), "")?;

    let table = load_table(&readiness()?, &config.root)?;
    assert!(table.is_empty());
    Ok(())
}

#[test]
fn non_directory_entries_are_skipped() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = readiness_dir(&config.root, "gke", "local.csi.scylladb.com");
    write_records(&dir.join("sidecar"), &[TimingRecord::elapsed(20.0)])?;
    std::fs::write(config.root.join("README.md"), "notes")?;
    std::fs::write(config.root.join("gke").join("summary.txt"), "notes")?;

    let table = load_table(&readiness()?, &config.root)?;
    assert_eq!(
        rows(&table),
        vec![row("gke", "local.csi.scylladb.com", "sidecar", 0.02)]
    );
    Ok(())
}

#[test]
fn malformed_record_fails_the_run() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = readiness_dir(&config.root, "eks", "ebs.csi.aws.com");
    std::fs::create_dir_all(&dir)?;
    std::fs::write(dir.join("baseline"), "{\"elapsed_time_ms\": 10}\nnot json\n")?;

    assert!(execute_report(&readiness()?, &config).is_err());
    Ok(())
}

#[test]
fn unknown_cluster_fails_when_plotting() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    write_records(
        &readiness_dir(&config.root, "aks", "ebs.csi.aws.com").join("baseline"),
        &[TimingRecord::elapsed(10.0)],
    )?;

    let profile = readiness()?;
    assert_eq!(load_table(&profile, &config.root)?.len(), 1);

    let err = execute_report(&profile, &config).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LabelError>(),
        Some(&LabelError::Unknown {
            table: "cluster name",
            value: "aks".to_string(),
        })
    );
    Ok(())
}

#[test]
fn group_without_scenarios_is_absent() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    std::fs::create_dir_all(readiness_dir(&config.root, "gke", "pd.csi.storage.gke.io"))?;
    write_records(
        &readiness_dir(&config.root, "eks", "ebs.csi.aws.com").join("sidecar"),
        &[TimingRecord::elapsed(10.0)],
    )?;

    execute_report(&readiness()?, &config)?;
    assert_eq!(
        plot_files(&config.output_dir)?,
        vec!["eks_ebs.csi.aws.com_pullPolicyNever.svg"]
    );
    Ok(())
}

#[test]
fn unpause_splits_components() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = config.root.join("gke").join("pd.csi.storage.gke.io").join("3");
    write_records(
        &dir.join("cold"),
        &[TimingRecord::split(4000.0, 500.0), TimingRecord::split(3000.0, 1500.0)],
    )?;
    write_records(&dir.join("prewarmed"), &[TimingRecord::split(1000.0, 250.0)])?;

    let profile = ProfileKind::ScyllaUnpause.profile(PullPolicy::Never)?;
    let table = load_table(&profile, &config.root)?;
    assert_eq!(table.len(), 6);

    let cold_overhead = rows(&table)
        .into_iter()
        .filter(|r| r.3 == "cold" && r.4 == Some(Component::Overhead))
        .map(|r| r.5)
        .collect::<Vec<_>>();
    assert_eq!(cold_overhead, vec![0.5, 1.5]);
    assert!(table
        .rows()
        .iter()
        .all(|r| r.node_count.as_deref() == Some("3")));

    execute_report(&profile, &config)?;
    let svg = std::fs::read_to_string(config.output_dir.join("gke_pd.csi.storage.gke.io_3.svg"))?;
    assert!(svg.contains(
        "Time to unpause ScyllaDB cluster in GKE with pd.csi.storage.gke.io (pd-ssd), n=2"
    ));
    assert!(svg.contains("Overhead"));
    assert!(svg.contains("Application"));
    Ok(())
}

#[test]
fn by_cluster_keeps_milliseconds() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    write_records(
        &readiness_dir(&config.root, "eks", "ebs.csi.aws.com").join("baseline"),
        &[TimingRecord::elapsed(1234.5)],
    )?;
    write_records(
        &readiness_dir(&config.root, "eks", "local.csi.scylladb.com").join("baseline"),
        &[TimingRecord::elapsed(321.0)],
    )?;

    let profile = ProfileKind::CsiPodReadinessByCluster.profile(PullPolicy::Never)?;
    let table = load_table(&profile, &config.root)?;
    assert_eq!(
        rows(&table),
        vec![
            row("eks", "ebs.csi.aws.com", "baseline", 1234.5),
            row("eks", "local.csi.scylladb.com", "baseline", 321.0),
        ]
    );

    execute_report(&profile, &config)?;
    assert_eq!(
        plot_files(&config.output_dir)?,
        vec!["eks_pullPolicyNever.svg"]
    );
    let svg = std::fs::read_to_string(config.output_dir.join("eks_pullPolicyNever.svg"))?;
    assert!(svg.contains("Elapsed Time (ms)"));
    assert!(svg.contains("ebs.csi.aws.com (gp3)"));
    Ok(())
}

#[test]
fn rerun_overwrites_plots() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let config = config(&tmp);
    let dir = readiness_dir(&config.root, "eks", "ebs.csi.aws.com");
    write_records(&dir.join("baseline"), &[TimingRecord::elapsed(100.0)])?;

    let profile = readiness()?;
    execute_report(&profile, &config)?;
    write_records(&dir.join("baseline"), &[TimingRecord::elapsed(300.0)])?;
    execute_report(&profile, &config)?;

    let svg = std::fs::read_to_string(
        config.output_dir.join("eks_ebs.csi.aws.com_pullPolicyNever.svg"),
    )?;
    assert!(svg.contains("n=2"));
    assert_eq!(plot_files(&config.output_dir)?.len(), 1);
    Ok(())
}
