//! Load events and the observers that log them.
//!
//! Each path-based load ends with exactly one [`LoadEvent`]: `Loaded`, `NoRows` (the file parsed
//! but held no data) or `Failed`. Events that carry a [`LoadSeverity`] at or above
//! [`super::LoadOptions::alert_at_or_above`] are delivered a second time through
//! [`LoadObserver::on_alert`].

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ArrayError;
use crate::types::DType;

use super::options::LoadOptions;

/// How bad a load outcome is. Successful loads with data carry no severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// The load succeeded but produced zero rows.
    Warning,
    /// The file contents did not match the requested layout or types.
    Error,
    /// The file could not be read at all.
    Critical,
}

/// What a load was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// A homogeneous 2-D array of one element type.
    Homogeneous { dtype: DType },
    /// A record array with `fields` typed fields.
    Records { fields: usize },
}

impl fmt::Display for LoadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Homogeneous { dtype } => write!(f, "array<{dtype}>"),
            Self::Records { fields } => write!(f, "records[{fields} fields]"),
        }
    }
}

/// The input and parsing configuration of one load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadContext {
    pub path: PathBuf,
    pub kind: LoadKind,
    pub delimiter: u8,
    pub skip_rows: usize,
    pub usecols: Option<Vec<usize>>,
}

impl LoadContext {
    pub(crate) fn new(path: &Path, kind: LoadKind, options: &LoadOptions) -> Self {
        Self {
            path: path.to_path_buf(),
            kind,
            delimiter: options.delimiter,
            skip_rows: options.skip_rows,
            usecols: options.usecols.clone(),
        }
    }
}

impl fmt::Display for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path={} kind={} delimiter={:?} skip_rows={}",
            self.path.display(),
            self.kind,
            char::from(self.delimiter),
            self.skip_rows
        )?;
        match &self.usecols {
            Some(cols) => write!(f, " usecols={cols:?}"),
            None => f.write_str(" usecols=all"),
        }
    }
}

/// Shape of a loaded result: data rows by columns (or record fields).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub columns: usize,
}

/// Outcome of a single load.
#[derive(Debug, Clone, Copy)]
pub enum LoadEvent<'a> {
    Loaded(LoadStats),
    NoRows(LoadStats),
    Failed(&'a ArrayError),
}

impl LoadEvent<'_> {
    pub(crate) fn from_outcome(outcome: Result<LoadStats, &ArrayError>) -> LoadEvent<'_> {
        match outcome {
            Ok(stats) if stats.rows == 0 => LoadEvent::NoRows(stats),
            Ok(stats) => LoadEvent::Loaded(stats),
            Err(e) => LoadEvent::Failed(e),
        }
    }

    /// `None` for a load that produced data.
    pub fn severity(&self) -> Option<LoadSeverity> {
        match self {
            Self::Loaded(_) => None,
            Self::NoRows(_) => Some(LoadSeverity::Warning),
            Self::Failed(e) => Some(severity_for_error(e)),
        }
    }
}

impl fmt::Display for LoadEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loaded(s) => write!(f, "loaded shape=({}, {})", s.rows, s.columns),
            Self::NoRows(s) => write!(f, "no data rows shape=({}, {})", s.rows, s.columns),
            Self::Failed(e) => write!(f, "failed err={e}"),
        }
    }
}

/// Receives load events.
pub trait LoadObserver: Send + Sync {
    /// Called once per finished load.
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent<'_>);

    /// Called after [`Self::on_event`] when the event's severity meets the alert threshold.
    fn on_alert(&self, _ctx: &LoadContext, _severity: LoadSeverity, _event: &LoadEvent<'_>) {}
}

/// Missing or unreadable files are `Critical`; bad contents are `Error`.
pub fn severity_for_error(e: &ArrayError) -> LoadSeverity {
    match e {
        ArrayError::Io(_) => LoadSeverity::Critical,
        ArrayError::Csv(err) => match err.kind() {
            csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        ArrayError::Json(_)
        | ArrayError::SchemaMismatch { .. }
        | ArrayError::ParseError { .. }
        | ArrayError::InvalidShape { .. }
        | ArrayError::Shape(_) => LoadSeverity::Error,
    }
}

pub(crate) fn report(options: &LoadOptions, ctx: &LoadContext, outcome: Result<LoadStats, &ArrayError>) {
    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    let event = LoadEvent::from_outcome(outcome);
    obs.on_event(ctx, &event);
    if let Some(severity) = event.severity() {
        if severity >= options.alert_at_or_above {
            obs.on_alert(ctx, severity, &event);
        }
    }
}

/// Forwards every event to each observer in order.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl ObserverSet {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn LoadObserver>) {
        self.observers.push(observer);
    }
}

impl fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverSet")
            .field("len", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for ObserverSet {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent<'_>) {
        self.observers.iter().for_each(|o| o.on_event(ctx, event));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, event: &LoadEvent<'_>) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, event));
    }
}

/// One line per event on stderr, e.g.
/// `[load] path=data/my_data.csv kind=array<int32> delimiter=',' skip_rows=1 usecols=all loaded shape=(4, 4)`.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl LoadObserver for StdErrObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent<'_>) {
        eprintln!("[load] {ctx} {event}");
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, event: &LoadEvent<'_>) {
        eprintln!("[load][ALERT {severity:?}] {ctx} {event}");
    }
}

/// Appends timestamped event lines to a log file opened once, up front.
#[derive(Debug)]
pub struct LogFileObserver {
    file: Mutex<File>,
}

impl LogFileObserver {
    /// Open (or create) `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    fn write_line(&self, args: fmt::Arguments<'_>) {
        // Logging never fails a load.
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{} {args}", unix_ts());
        }
    }
}

impl LoadObserver for LogFileObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent<'_>) {
        self.write_line(format_args!("{ctx} {event}"));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, event: &LoadEvent<'_>) {
        self.write_line(format_args!("ALERT {severity:?} {ctx} {event}"));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> LoadContext {
        LoadContext::new(
            Path::new("data/my_data.csv"),
            LoadKind::Homogeneous { dtype: DType::Int32 },
            &LoadOptions {
                skip_rows: 1,
                usecols: Some(vec![0, 2]),
                ..Default::default()
            },
        )
    }

    #[test]
    fn context_line_carries_parse_configuration() {
        assert_eq!(
            ctx().to_string(),
            "path=data/my_data.csv kind=array<int32> delimiter=',' skip_rows=1 usecols=[0, 2]"
        );
    }

    #[test]
    fn empty_result_is_a_warning() {
        let event = LoadEvent::from_outcome(Ok(LoadStats { rows: 0, columns: 3 }));
        assert!(matches!(event, LoadEvent::NoRows(_)));
        assert_eq!(event.severity(), Some(LoadSeverity::Warning));
        assert_eq!(event.to_string(), "no data rows shape=(0, 3)");
    }

    #[test]
    fn loaded_result_has_no_severity() {
        let event = LoadEvent::from_outcome(Ok(LoadStats { rows: 4, columns: 4 }));
        assert_eq!(event.severity(), None);
        assert_eq!(event.to_string(), "loaded shape=(4, 4)");
    }

    #[test]
    fn io_failures_are_critical() {
        let err = ArrayError::Io(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(LoadEvent::Failed(&err).severity(), Some(LoadSeverity::Critical));
    }
}
