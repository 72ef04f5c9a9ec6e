//! Delimited-text loading implementation.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use ndarray::{Array1, Array2};

use crate::error::{ArrayError, ArrayResult};
use crate::types::{Column, DType, Element, RecordArray, Schema};

use super::observability::{report, LoadContext, LoadKind, LoadStats};
use super::options::LoadOptions;

/// Load a delimited text file into a homogeneous 2-D array of `T`.
///
/// Rules:
///
/// - The first `options.skip_rows` lines are discarded (use `1` for a header line).
/// - Blank lines and comment lines are ignored.
/// - Every remaining row must have the same number of (selected) columns.
/// - Every cell must parse as `T`; the first failure aborts the whole load.
///
/// The result has shape `(data rows, columns)`.
///
/// ```no_run
/// use numeric_arrays::loading::{loadtxt, LoadOptions};
///
/// # fn main() -> Result<(), numeric_arrays::ArrayError> {
/// let opts = LoadOptions { skip_rows: 1, ..Default::default() };
/// let data = loadtxt::<i32>("my_data.csv", &opts)?;
/// println!("{data}");
/// # Ok(())
/// # }
/// ```
pub fn loadtxt<T: Element>(path: impl AsRef<Path>, options: &LoadOptions) -> ArrayResult<Array2<T>> {
    let path = path.as_ref();
    let ctx = LoadContext::new(path, LoadKind::Homogeneous { dtype: T::DTYPE }, options);

    let result = File::open(path)
        .map_err(ArrayError::from)
        .and_then(|file| loadtxt_from_reader::<T, _>(file, options));

    report(
        options,
        &ctx,
        result.as_ref().map(|a| LoadStats {
            rows: a.nrows(),
            columns: a.ncols(),
        }),
    );
    result
}

/// Load homogeneous delimited text from any reader. See [`loadtxt`] for the rules.
pub fn loadtxt_from_reader<T: Element, R: Read>(
    reader: R,
    options: &LoadOptions,
) -> ArrayResult<Array2<T>> {
    let mut ncols = options.usecols.as_ref().map(Vec::len);
    let mut nrows = 0usize;
    let mut data: Vec<T> = Vec::new();

    for_each_row(reader, options, |line, fields| {
        let expected = *ncols.get_or_insert(fields.len());
        if fields.len() != expected {
            return Err(ArrayError::SchemaMismatch {
                message: format!("line {line} has {} columns, expected {expected}", fields.len()),
            });
        }
        for (idx, raw) in fields.iter().enumerate() {
            let value = T::parse_text(raw).map_err(|message| ArrayError::ParseError {
                row: line,
                column: source_column(options, idx).to_string(),
                raw: (*raw).to_owned(),
                message,
            })?;
            data.push(value);
        }
        nrows += 1;
        Ok(())
    })?;

    Ok(Array2::from_shape_vec((nrows, ncols.unwrap_or(0)), data)?)
}

/// Load a delimited text file into a [`RecordArray`] described by `schema`.
///
/// Columns are matched to schema fields by position (after `options.usecols` selection), so
/// a header line must be skipped with `options.skip_rows` rather than matched by name.
///
/// ```no_run
/// use numeric_arrays::loading::{loadtxt_records, LoadOptions};
/// use numeric_arrays::types::{DType, Field, Schema};
///
/// # fn main() -> Result<(), numeric_arrays::ArrayError> {
/// let schema = Schema::new(vec![
///     Field::new("time", DType::Int32),
///     Field::new("distance", DType::Float32),
///     Field::new("is_in_lead", DType::Bool),
/// ]);
/// let opts = LoadOptions { skip_rows: 1, ..Default::default() };
/// let records = loadtxt_records("het_data.csv", &schema, &opts)?;
/// println!("{}", records.typed_column::<i32>("time").unwrap());
/// # Ok(())
/// # }
/// ```
pub fn loadtxt_records(
    path: impl AsRef<Path>,
    schema: &Schema,
    options: &LoadOptions,
) -> ArrayResult<RecordArray> {
    let path = path.as_ref();
    let ctx = LoadContext::new(
        path,
        LoadKind::Records {
            fields: schema.len(),
        },
        options,
    );

    let result = File::open(path)
        .map_err(ArrayError::from)
        .and_then(|file| loadtxt_records_from_reader(file, schema, options));

    report(
        options,
        &ctx,
        result.as_ref().map(|r| LoadStats {
            rows: r.len(),
            columns: r.schema().len(),
        }),
    );
    result
}

/// Load structured delimited text from any reader. See [`loadtxt_records`].
pub fn loadtxt_records_from_reader<R: Read>(
    reader: R,
    schema: &Schema,
    options: &LoadOptions,
) -> ArrayResult<RecordArray> {
    schema.validate()?;
    if let Some(cols) = &options.usecols {
        if cols.len() != schema.len() {
            return Err(ArrayError::SchemaMismatch {
                message: format!(
                    "usecols selects {} columns but schema declares {} fields",
                    cols.len(),
                    schema.len()
                ),
            });
        }
    }

    let mut builders: Vec<ColumnBuilder> = schema
        .fields
        .iter()
        .map(|f| ColumnBuilder::new(f.dtype))
        .collect();

    for_each_row(reader, options, |line, fields| {
        if fields.len() != schema.len() {
            return Err(ArrayError::SchemaMismatch {
                message: format!(
                    "line {line} has {} columns but schema declares {} fields",
                    fields.len(),
                    schema.len()
                ),
            });
        }
        for ((field, builder), raw) in schema.fields.iter().zip(builders.iter_mut()).zip(fields) {
            builder.push(raw).map_err(|message| ArrayError::ParseError {
                row: line,
                column: field.name.clone(),
                raw: (*raw).to_owned(),
                message,
            })?;
        }
        Ok(())
    })?;

    RecordArray::new(
        schema.clone(),
        builders.into_iter().map(ColumnBuilder::finish).collect(),
    )
}

fn source_column(options: &LoadOptions, idx: usize) -> usize {
    options
        .usecols
        .as_ref()
        .and_then(|cols| cols.get(idx).copied())
        .unwrap_or(idx)
}

/// Feeds every data row (1-based physical line number, selected fields) to `visit`.
fn for_each_row<R, F>(reader: R, options: &LoadOptions, mut visit: F) -> ArrayResult<()>
where
    R: Read,
    F: FnMut(usize, &[&str]) -> ArrayResult<()>,
{
    let mut buf = BufReader::new(reader);
    let mut discarded = Vec::new();
    for _ in 0..options.skip_rows {
        discarded.clear();
        if buf.read_until(b'\n', &mut discarded)? == 0 {
            break;
        }
    }

    match options.comment {
        Some(marker) => split_rows(StripComments::new(buf, marker), options, &mut visit),
        None => split_rows(buf, options, &mut visit),
    }
}

fn split_rows<R, F>(input: R, options: &LoadOptions, visit: &mut F) -> ArrayResult<()>
where
    R: Read,
    F: FnMut(usize, &[&str]) -> ArrayResult<()>,
{
    // No quote handling: a `"` is an ordinary byte of the field, like any other.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .quoting(false)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(input);

    let mut record = csv::StringRecord::new();
    while rdr.read_record(&mut record)? {
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0) + options.skip_rows;
        if record.len() <= 1 && record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let fields = select_columns(&record, options.usecols.as_deref(), line)?;
        visit(line, &fields)?;
    }
    Ok(())
}

/// Drops everything from the comment marker to the end of each line.
///
/// The newline itself is kept, so line numbers seen downstream still match the source, and a
/// line that was only a comment (indented or not) becomes blank.
struct StripComments<R> {
    inner: R,
    marker: u8,
    line: Vec<u8>,
    pos: usize,
}

impl<R: BufRead> StripComments<R> {
    fn new(inner: R, marker: u8) -> Self {
        Self {
            inner,
            marker,
            line: Vec::new(),
            pos: 0,
        }
    }

    fn next_line(&mut self) -> io::Result<bool> {
        self.line.clear();
        self.pos = 0;
        if self.inner.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(false);
        }
        if let Some(at) = self.line.iter().position(|&b| b == self.marker) {
            let had_newline = self.line.ends_with(b"\n");
            self.line.truncate(at);
            if had_newline {
                self.line.push(b'\n');
            }
        }
        Ok(true)
    }
}

impl<R: BufRead> Read for StripComments<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        while self.pos == self.line.len() {
            if !self.next_line()? {
                return Ok(0);
            }
        }
        let n = out.len().min(self.line.len() - self.pos);
        out[..n].copy_from_slice(&self.line[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn select_columns<'r>(
    record: &'r csv::StringRecord,
    usecols: Option<&[usize]>,
    line: usize,
) -> ArrayResult<Vec<&'r str>> {
    match usecols {
        None => Ok(record.iter().collect()),
        Some(cols) => cols
            .iter()
            .map(|&i| {
                record.get(i).ok_or_else(|| ArrayError::SchemaMismatch {
                    message: format!(
                        "line {line}: column index {i} out of range ({} columns)",
                        record.len()
                    ),
                })
            })
            .collect(),
    }
}

/// Accumulates one field's parsed values before they become a [`Column`].
enum ColumnBuilder {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
}

impl ColumnBuilder {
    fn new(dtype: DType) -> Self {
        match dtype {
            DType::Int32 => Self::Int32(Vec::new()),
            DType::Int64 => Self::Int64(Vec::new()),
            DType::Float32 => Self::Float32(Vec::new()),
            DType::Float64 => Self::Float64(Vec::new()),
            DType::Bool => Self::Bool(Vec::new()),
        }
    }

    fn push(&mut self, raw: &str) -> Result<(), String> {
        match self {
            Self::Int32(v) => v.push(i32::parse_text(raw)?),
            Self::Int64(v) => v.push(i64::parse_text(raw)?),
            Self::Float32(v) => v.push(f32::parse_text(raw)?),
            Self::Float64(v) => v.push(f64::parse_text(raw)?),
            Self::Bool(v) => v.push(bool::parse_text(raw)?),
        }
        Ok(())
    }

    fn finish(self) -> Column {
        match self {
            Self::Int32(v) => Column::Int32(Array1::from(v)),
            Self::Int64(v) => Column::Int64(Array1::from(v)),
            Self::Float32(v) => Column::Float32(Array1::from(v)),
            Self::Float64(v) => Column::Float64(Array1::from(v)),
            Self::Bool(v) => Column::Bool(Array1::from(v)),
        }
    }
}
