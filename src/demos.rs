//! The two walkthroughs behind the `data_arrays` and `array_creation` binaries.
//!
//! Both write labelled sections to any [`Write`], so the binaries pass stdout and tests pass a
//! buffer.

use std::io::Write;
use std::path::Path;

use ndarray::{Array1, Array2};

use crate::error::{ArrayError, ArrayResult};
use crate::factory::{empty, ones, zeros};
use crate::loading::{loadtxt, loadtxt_records, LoadOptions};
use crate::types::Schema;

/// Load `my_data.csv` as `i32`, then `het_data.csv` as records typed by `het_schema.json`, and
/// print both plus the `time` column. All three files are read from `data_dir`.
///
/// `options` should skip the header line; its observer, if any, sees both loads.
pub fn data_arrays(data_dir: &Path, options: &LoadOptions, out: &mut impl Write) -> ArrayResult<()> {
    let my_data = loadtxt::<i32>(data_dir.join("my_data.csv"), options)?;

    writeln!(out, "my_data.csv:")?;
    writeln!(out, "{my_data}")?;

    let column_types = Schema::from_json_path(data_dir.join("het_schema.json"))?;
    let heterogeneous_data = loadtxt_records(data_dir.join("het_data.csv"), &column_types, options)?;

    writeln!(out, "het_data.csv:")?;
    writeln!(out, "{heterogeneous_data}")?;

    let time = heterogeneous_data
        .typed_column::<i32>("time")
        .ok_or_else(|| ArrayError::SchemaMismatch {
            message: "no int32 column named 'time'".to_string(),
        })?;

    writeln!(out, "Time column:")?;
    writeln!(out, "{time}")?;
    Ok(())
}

/// Allocate zeros, ones and empty arrays in one and two dimensions and print each.
pub fn array_creation(out: &mut impl Write) -> ArrayResult<()> {
    let zeros_array: Array1<i32> = zeros(100);
    let zeros_md_array: Array2<f64> = zeros((10, 10));

    writeln!(out, "ZEROS:")?;
    writeln!(out, "Single-dimensional:")?;
    writeln!(out, "{zeros_array}")?;
    writeln!(out, "Multi-dimensional:")?;
    writeln!(out, "{zeros_md_array}")?;

    let ones_array: Array1<bool> = ones(50);
    let ones_md_array: Array2<f32> = ones((10, 10));

    writeln!(out, "ONES:")?;
    writeln!(out, "Single-dimensional:")?;
    writeln!(out, "{ones_array}")?;
    writeln!(out, "Multi-dimensional:")?;
    writeln!(out, "{ones_md_array}")?;

    let empty_array: Array1<bool> = empty(50);
    let empty_md_array: Array2<f32> = empty((10, 10));

    writeln!(out, "EMPTY:")?;
    writeln!(out, "Single-dimensional:")?;
    writeln!(out, "{empty_array}")?;
    writeln!(out, "Multi-dimensional:")?;
    writeln!(out, "{empty_md_array}")?;
    Ok(())
}
