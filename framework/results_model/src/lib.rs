use serde::{Deserialize, Serialize};
use std::io::{BufRead, Read, Write};
use std::path::Path;

/// A single timing measurement written by a benchmark harness
///
/// Each harness only writes the fields it measures, so every field is optional here. Use
/// [TimingRecord::field] to read a field that a report requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TimingRecord {
    /// Wall clock time from the start of the measured operation until it completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_time_ms: Option<f64>,
    /// The part of the elapsed time spent inside the application itself
    ///
    /// For the ScyllaDB unpause benchmarks this is the time between the ScyllaDB process starting
    /// and it serving requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_time_ms: Option<f64>,
    /// The part of the elapsed time spent outside the application, scheduling and provisioning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead_time_ms: Option<f64>,
}

/// The millisecond fields of a [TimingRecord]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingField {
    ElapsedTime,
    ApplicationTime,
    OverheadTime,
}

impl TimingField {
    /// The JSON key of this field.
    pub fn key(&self) -> &'static str {
        match self {
            TimingField::ElapsedTime => "elapsed_time_ms",
            TimingField::ApplicationTime => "application_time_ms",
            TimingField::OverheadTime => "overhead_time_ms",
        }
    }
}

impl TimingRecord {
    /// Create a record that only carries an elapsed time
    pub fn elapsed(elapsed_time_ms: f64) -> Self {
        Self {
            elapsed_time_ms: Some(elapsed_time_ms),
            ..Default::default()
        }
    }

    /// Create a record that carries the application and overhead split of a measurement
    ///
    /// The elapsed time is set to the sum of both parts.
    pub fn split(application_time_ms: f64, overhead_time_ms: f64) -> Self {
        Self {
            elapsed_time_ms: Some(application_time_ms + overhead_time_ms),
            application_time_ms: Some(application_time_ms),
            overhead_time_ms: Some(overhead_time_ms),
        }
    }

    /// Read a field in milliseconds, failing if the harness did not write it
    pub fn field(&self, field: TimingField) -> Result<f64, RecordError> {
        let value = match field {
            TimingField::ElapsedTime => self.elapsed_time_ms,
            TimingField::ApplicationTime => self.application_time_ms,
            TimingField::OverheadTime => self.overhead_time_ms,
        };

        value.ok_or(RecordError::MissingField { field: field.key() })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Record is missing field `{field}`")]
    MissingField { field: &'static str },
}

/// Append a timing record to a file
///
/// The record will be serialized to JSON and output as a single line followed by a newline, which
/// is the format the benchmark harnesses produce.
pub fn append_timing_record(record: &TimingRecord, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;
    store_timing_record(record, &mut file)?;
    file.write_all(b"\n")?;
    Ok(())
}

/// Serialize a timing record to a writer
pub fn store_timing_record<W: Write>(record: &TimingRecord, writer: &mut W) -> anyhow::Result<()> {
    serde_json::to_writer(writer, record)?;
    Ok(())
}

/// Parse timing records from a reader with one JSON object per line
///
/// Each line must hold one valid record, a blank line is malformed. The first bad line fails the
/// whole parse. Empty input has no records.
pub fn parse_timing_records<R: Read>(reader: R) -> Result<Vec<TimingRecord>, RecordError> {
    let reader = std::io::BufReader::new(reader);
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let record = serde_json::from_str(&line).map_err(|source| RecordError::Parse {
            line: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Load timing records from a file
///
/// The file should contain one JSON object per line. This is the format produced by
/// [append_timing_record].
pub fn load_timing_records(path: impl AsRef<Path>) -> Result<Vec<TimingRecord>, RecordError> {
    let file = std::fs::File::open(path)?;
    parse_timing_records(file)
}
