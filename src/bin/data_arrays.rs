//! Loads `my_data.csv` (all integers) and `het_data.csv` (time, distance, is_in_lead, typed by
//! `het_schema.json`) and prints them, followed by the `time` column.
//!
//! Usage: `data_arrays [DATA_DIR]` (default `data`). Set `NUMERIC_ARRAYS_LOG` to log load events
//! to stderr.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use numeric_arrays::demos;
use numeric_arrays::loading::{LoadObserver, LoadOptions, StdErrObserver};

fn main() -> ExitCode {
    let data_dir = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let observer = std::env::var_os("NUMERIC_ARRAYS_LOG")
        .map(|_| Arc::new(StdErrObserver) as Arc<dyn LoadObserver>);
    let opts = LoadOptions {
        skip_rows: 1,
        observer,
        ..Default::default()
    };

    match demos::data_arrays(&data_dir, &opts, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
