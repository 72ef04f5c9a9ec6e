//! Allocates one- and two-dimensional arrays of zeros, ones and unspecified values and prints
//! each of them.

use std::io;
use std::process::ExitCode;

use numeric_arrays::demos;

fn main() -> ExitCode {
    match demos::array_creation(&mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
