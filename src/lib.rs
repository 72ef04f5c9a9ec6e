//! `numeric-arrays` loads delimited text files into typed [`ndarray`] arrays and allocates
//! arrays with zero/one/unspecified contents.
//!
//! ## What you can load
//!
//! - **Homogeneous tables** via [`loading::loadtxt`]: every cell parses as the same element type,
//!   producing an `Array2<T>` of shape `(rows, columns)`.
//! - **Structured tables** via [`loading::loadtxt_records`]: each column has its own type, declared
//!   up front by a [`types::Schema`], producing a [`types::RecordArray`] with by-name column access.
//!
//! Supported element types are `i32`, `i64`, `f32`, `f64` and `bool` (see [`types::Element`]).
//! Header lines are skipped with [`loading::LoadOptions::skip_rows`]; any malformed row fails the
//! whole load.
//!
//! ## Quick example: load data
//!
//! ```no_run
//! use numeric_arrays::loading::{loadtxt, loadtxt_records, LoadOptions};
//! use numeric_arrays::types::{DType, Field, Schema};
//!
//! # fn main() -> Result<(), numeric_arrays::ArrayError> {
//! let opts = LoadOptions { skip_rows: 1, ..Default::default() };
//!
//! let my_data = loadtxt::<i32>("my_data.csv", &opts)?;
//! println!("{my_data}");
//!
//! let schema = Schema::new(vec![
//!     Field::new("time", DType::Int32),
//!     Field::new("distance", DType::Float32),
//!     Field::new("is_in_lead", DType::Bool),
//! ]);
//! let het = loadtxt_records("het_data.csv", &schema, &opts)?;
//! println!("rows={}", het.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Array factories
//!
//! ```rust
//! use ndarray::Array2;
//! use numeric_arrays::factory::{create_dyn, zeros, Fill};
//!
//! let z: Array2<f64> = zeros((10, 10));
//! assert_eq!(z.sum(), 0.0);
//!
//! // Runtime shapes are validated rather than coerced.
//! assert!(create_dyn::<f32>(&[10, -1], Fill::Ones).is_err());
//! ```
//!
//! ## Modules
//!
//! - [`loading`]: delimited-text loaders, options and observers
//! - [`factory`]: zeros/ones/empty/uninit allocation
//! - [`types`]: element types, schemas and record arrays
//! - [`demos`]: the walkthroughs printed by the `data_arrays` and `array_creation` binaries
//! - [`error`]: error type shared across the crate

pub mod demos;
pub mod error;
pub mod factory;
pub mod loading;
pub mod types;

pub use error::{ArrayError, ArrayResult};
