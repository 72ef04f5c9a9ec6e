use std::sync::{Arc, Mutex};

use numeric_arrays::loading::{
    loadtxt, loadtxt_records, LoadContext, LoadEvent, LoadKind, LoadObserver, LoadOptions, LoadSeverity,
    LoadStats, LogFileObserver, ObserverSet,
};
use numeric_arrays::types::{DType, Field, Schema};

/// Keeps (kind, event line, severity) for each event and the severity of each alert.
#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<(LoadKind, String, Option<LoadSeverity>)>>,
    loaded: Mutex<Vec<LoadStats>>,
    alerts: Mutex<Vec<LoadSeverity>>,
}

impl LoadObserver for RecordingObserver {
    fn on_event(&self, ctx: &LoadContext, event: &LoadEvent<'_>) {
        if let LoadEvent::Loaded(stats) = event {
            self.loaded.lock().unwrap().push(*stats);
        }
        self.events
            .lock()
            .unwrap()
            .push((ctx.kind, event.to_string(), event.severity()));
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _event: &LoadEvent<'_>) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn opts_with(obs: Arc<dyn LoadObserver>, alert_at_or_above: LoadSeverity) -> LoadOptions {
    LoadOptions {
        skip_rows: 1,
        observer: Some(obs),
        alert_at_or_above,
        ..Default::default()
    }
}

#[test]
fn observer_receives_loaded_shape() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = opts_with(obs.clone(), LoadSeverity::Critical);

    loadtxt::<i32>("tests/fixtures/my_data.csv", &opts).unwrap();

    assert_eq!(obs.loaded.lock().unwrap().clone(), vec![LoadStats { rows: 4, columns: 4 }]);
    let events = obs.events.lock().unwrap().clone();
    assert_eq!(events[0].0, LoadKind::Homogeneous { dtype: DType::Int32 });
    assert_eq!(events[0].2, None);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = opts_with(obs.clone(), LoadSeverity::Critical);

    // Missing file -> Io error -> Critical
    let _ = loadtxt::<i32>("tests/fixtures/does_not_exist.csv", &opts).unwrap_err();

    let events = obs.events.lock().unwrap().clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].2, Some(LoadSeverity::Critical));
    assert!(events[0].1.starts_with("failed err=io error"));
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_parse_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = opts_with(obs.clone(), LoadSeverity::Critical);

    let schema = Schema::new(vec![
        Field::new("time", DType::Int32),
        Field::new("distance", DType::Int32),
        Field::new("is_in_lead", DType::Bool),
    ]);
    // distance holds floats -> ParseError -> Error severity (not Critical) -> no alert
    let _ = loadtxt_records("tests/fixtures/het_data.csv", &schema, &opts).unwrap_err();

    let events = obs.events.lock().unwrap().clone();
    assert_eq!(events[0].0, LoadKind::Records { fields: 3 });
    assert_eq!(events[0].2, Some(LoadSeverity::Error));
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn header_only_file_warns_and_alerts_at_warning_threshold() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = opts_with(obs.clone(), LoadSeverity::Warning);

    let data = loadtxt::<f64>("tests/fixtures/header_only.csv", &opts).unwrap();

    assert_eq!(data.nrows(), 0);
    let events = obs.events.lock().unwrap().clone();
    assert_eq!(events[0].1, "no data rows shape=(0, 0)");
    assert_eq!(events[0].2, Some(LoadSeverity::Warning));
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Warning]);
}

#[test]
fn observer_set_fans_out_and_log_file_records_config() {
    let log_path = std::env::temp_dir().join(format!("numeric_arrays_obs_{}.log", std::process::id()));
    let _ = std::fs::remove_file(&log_path);

    let recording = Arc::new(RecordingObserver::default());
    let mut set = ObserverSet::default();
    set.push(recording.clone());
    set.push(Arc::new(LogFileObserver::open(&log_path).unwrap()));
    let opts = LoadOptions {
        usecols: Some(vec![1, 2]),
        ..opts_with(Arc::new(set), LoadSeverity::Error)
    };

    let _ = loadtxt::<i32>("tests/fixtures/malformed.csv", &opts).unwrap_err();

    assert_eq!(recording.events.lock().unwrap().len(), 1);
    assert_eq!(recording.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);

    let log = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("kind=array<int32> delimiter=',' skip_rows=1 usecols=[1, 2] failed err="));
    assert!(lines[1].contains("ALERT Error"));
    let _ = std::fs::remove_file(&log_path);
}
