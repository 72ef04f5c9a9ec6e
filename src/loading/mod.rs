//! Loading delimited text into typed arrays.
//!
//! Two entrypoints, both driven by [`LoadOptions`]:
//!
//! - [`loadtxt`]: every cell has the same element type; produces an `ndarray::Array2<T>`
//! - [`loadtxt_records`]: each column has its own type, declared by a
//!   [`crate::types::Schema`]; produces a [`crate::types::RecordArray`]
//!
//! Path-based loaders report one [`LoadEvent`] per load to an optional [`LoadObserver`].
//! The `*_from_reader` variants accept any [`std::io::Read`] and do not report.

pub mod observability;
pub mod options;
pub mod text;

pub use observability::{
    severity_for_error, LoadContext, LoadEvent, LoadKind, LoadObserver, LoadSeverity, LoadStats,
    LogFileObserver, ObserverSet, StdErrObserver,
};
pub use options::LoadOptions;
pub use text::{loadtxt, loadtxt_from_reader, loadtxt_records, loadtxt_records_from_reader};
