//! Core data model types for loading and array construction.
//!
//! Homogeneous data is represented directly as [`ndarray`] arrays whose element type implements
//! [`Element`]. Heterogeneous data is loaded into a [`RecordArray`], described by a
//! user-provided [`Schema`] (a list of typed [`Field`]s).

use std::fmt;
use std::fs;
use std::path::Path;

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use crate::error::{ArrayError, ArrayResult};

/// Element type of an array or of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// 32-bit floating point number.
    Float32,
    /// 64-bit floating point number.
    Float64,
    /// Boolean.
    Bool,
}

impl DType {
    /// Lowercase name, matching the JSON schema spelling.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scalar types that can be stored in arrays produced by this crate.
///
/// Implemented for `i32`, `i64`, `f32`, `f64` and `bool`.
pub trait Element: Clone + Default + fmt::Debug + fmt::Display + 'static {
    /// The [`DType`] tag for this Rust type.
    const DTYPE: DType;

    /// The additive identity (`false` for `bool`).
    fn zero() -> Self;

    /// The multiplicative identity (`true` for `bool`).
    fn one() -> Self;

    /// Parse a single (already trimmed) text cell.
    fn parse_text(raw: &str) -> Result<Self, String>;

    /// Wrap a typed column into the dynamically typed [`Column`].
    fn into_column(values: Array1<Self>) -> Column;

    /// Borrow a [`Column`] as this type, if the dtypes match.
    fn view_column(column: &Column) -> Option<ArrayView1<'_, Self>>;
}

macro_rules! numeric_element {
    ($ty:ty, $dtype:ident, $zero:expr, $one:expr) => {
        impl Element for $ty {
            const DTYPE: DType = DType::$dtype;

            fn zero() -> Self {
                $zero
            }

            fn one() -> Self {
                $one
            }

            fn parse_text(raw: &str) -> Result<Self, String> {
                raw.parse::<$ty>().map_err(|e| e.to_string())
            }

            fn into_column(values: Array1<Self>) -> Column {
                Column::$dtype(values)
            }

            fn view_column(column: &Column) -> Option<ArrayView1<'_, Self>> {
                match column {
                    Column::$dtype(values) => Some(values.view()),
                    _ => None,
                }
            }
        }
    };
}

numeric_element!(i32, Int32, 0, 1);
numeric_element!(i64, Int64, 0, 1);
numeric_element!(f32, Float32, 0.0, 1.0);
numeric_element!(f64, Float64, 0.0, 1.0);

impl Element for bool {
    const DTYPE: DType = DType::Bool;

    fn zero() -> Self {
        false
    }

    fn one() -> Self {
        true
    }

    fn parse_text(raw: &str) -> Result<Self, String> {
        parse_bool(raw)
    }

    fn into_column(values: Array1<Self>) -> Column {
        Column::Bool(values)
    }

    fn view_column(column: &Column) -> Option<ArrayView1<'_, Self>> {
        match column {
            Column::Bool(values) => Some(values.view()),
            _ => None,
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" => Ok(true),
        "false" | "f" | "0" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/1/0/yes/no)".to_string()),
    }
}

/// A single named, typed field in a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field/column name.
    pub name: String,
    /// Field element type.
    pub dtype: DType,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, dtype: DType) -> Self {
        Self {
            name: name.into(),
            dtype,
        }
    }
}

/// An ordered list of fields describing one record of a [`RecordArray`].
///
/// Schemas can be declared in code or loaded from JSON:
///
/// ```
/// use numeric_arrays::types::{DType, Schema};
///
/// let schema = Schema::from_json_str(
///     r#"{"fields":[{"name":"time","dtype":"int32"},{"name":"distance","dtype":"float32"}]}"#,
/// )
/// .unwrap();
/// assert_eq!(schema.fields[1].dtype, DType::Float32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Ordered list of fields.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Parse a schema from its JSON representation.
    pub fn from_json_str(input: &str) -> ArrayResult<Self> {
        let schema: Schema = serde_json::from_str(input)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Read and parse a JSON schema file.
    pub fn from_json_path(path: impl AsRef<Path>) -> ArrayResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Checks that the schema is non-empty and field names are unique.
    pub fn validate(&self) -> ArrayResult<()> {
        if self.fields.is_empty() {
            return Err(ArrayError::SchemaMismatch {
                message: "schema has no fields".to_string(),
            });
        }
        for (i, field) in self.fields.iter().enumerate() {
            if self.fields[..i].iter().any(|f| f.name == field.name) {
                return Err(ArrayError::SchemaMismatch {
                    message: format!("duplicate field name '{}'", field.name),
                });
            }
        }
        Ok(())
    }
}

/// A single typed value taken out of a [`RecordArray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// 32-bit signed integer.
    Int32(i32),
    /// 64-bit signed integer.
    Int64(i64),
    /// 32-bit float.
    Float32(f32),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
}

impl Value {
    /// The [`DType`] of this value.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
            Self::Bool(_) => DType::Bool,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            // Debug keeps the trailing `.0` so floats stay distinguishable from ints.
            Self::Float32(v) => write!(f, "{v:?}"),
            Self::Float64(v) => write!(f, "{v:?}"),
            Self::Bool(v) => write!(f, "{v}"),
        }
    }
}

/// One field's values across all records, stored as a typed 1-D array.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Values of a [`DType::Int32`] field.
    Int32(Array1<i32>),
    /// Values of a [`DType::Int64`] field.
    Int64(Array1<i64>),
    /// Values of a [`DType::Float32`] field.
    Float32(Array1<f32>),
    /// Values of a [`DType::Float64`] field.
    Float64(Array1<f64>),
    /// Values of a [`DType::Bool`] field.
    Bool(Array1<bool>),
}

impl Column {
    /// The element type of this column.
    pub fn dtype(&self) -> DType {
        match self {
            Self::Int32(_) => DType::Int32,
            Self::Int64(_) => DType::Int64,
            Self::Float32(_) => DType::Float32,
            Self::Float64(_) => DType::Float64,
            Self::Bool(_) => DType::Bool,
        }
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Self::Int32(a) => a.len(),
            Self::Int64(a) => a.len(),
            Self::Float32(a) => a.len(),
            Self::Float64(a) => a.len(),
            Self::Bool(a) => a.len(),
        }
    }

    /// Returns `true` if the column holds no values.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::Int32(a) => a.get(index).copied().map(Value::Int32),
            Self::Int64(a) => a.get(index).copied().map(Value::Int64),
            Self::Float32(a) => a.get(index).copied().map(Value::Float32),
            Self::Float64(a) => a.get(index).copied().map(Value::Float64),
            Self::Bool(a) => a.get(index).copied().map(Value::Bool),
        }
    }

    /// Borrow as a typed view; `None` if `T` does not match [`Self::dtype`].
    pub fn view<T: Element>(&self) -> Option<ArrayView1<'_, T>> {
        T::view_column(self)
    }

    /// Shorthand for `view::<i32>()`; `None` unless this is a [`Column::Int32`].
    pub fn as_i32(&self) -> Option<ArrayView1<'_, i32>> {
        self.view()
    }

    /// Shorthand for `view::<i64>()`; `None` unless this is a [`Column::Int64`].
    pub fn as_i64(&self) -> Option<ArrayView1<'_, i64>> {
        self.view()
    }

    /// Shorthand for `view::<f32>()`; `None` unless this is a [`Column::Float32`].
    pub fn as_f32(&self) -> Option<ArrayView1<'_, f32>> {
        self.view()
    }

    /// Shorthand for `view::<f64>()`; `None` unless this is a [`Column::Float64`].
    pub fn as_f64(&self) -> Option<ArrayView1<'_, f64>> {
        self.view()
    }

    /// Shorthand for `view::<bool>()`; `None` unless this is a [`Column::Bool`].
    pub fn as_bool(&self) -> Option<ArrayView1<'_, bool>> {
        self.view()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int32(a) => write!(f, "{a}"),
            Self::Int64(a) => write!(f, "{a}"),
            Self::Float32(a) => write!(f, "{a}"),
            Self::Float64(a) => write!(f, "{a}"),
            Self::Bool(a) => write!(f, "{a}"),
        }
    }
}

/// A structured array: a fixed number of records with named, independently typed fields.
///
/// Storage is column-major: one [`Column`] per schema field, all of the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordArray {
    schema: Schema,
    columns: Vec<Column>,
}

impl RecordArray {
    /// Create a record array from a schema and one column per field.
    ///
    /// Fails if the column count, any column dtype, or the column lengths disagree with the
    /// schema.
    pub fn new(schema: Schema, columns: Vec<Column>) -> ArrayResult<Self> {
        schema.validate()?;
        if columns.len() != schema.len() {
            return Err(ArrayError::SchemaMismatch {
                message: format!(
                    "schema declares {} fields but {} columns were given",
                    schema.len(),
                    columns.len()
                ),
            });
        }
        let rows = columns.first().map(Column::len).unwrap_or(0);
        for (field, column) in schema.fields.iter().zip(&columns) {
            if column.dtype() != field.dtype {
                return Err(ArrayError::SchemaMismatch {
                    message: format!(
                        "field '{}' is declared {} but column holds {}",
                        field.name,
                        field.dtype,
                        column.dtype()
                    ),
                });
            }
            if column.len() != rows {
                return Err(ArrayError::SchemaMismatch {
                    message: format!(
                        "field '{}' has {} values, expected {rows}",
                        field.name,
                        column.len()
                    ),
                });
            }
        }
        Ok(Self { schema, columns })
    }

    /// Schema describing each record.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All columns, in schema order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The values of field `name`, in record order.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.schema.index_of(name).map(|idx| &self.columns[idx])
    }

    /// Typed view of field `name`; `None` if missing or if `T` is not the field's type.
    pub fn typed_column<T: Element>(&self, name: &str) -> Option<ArrayView1<'_, T>> {
        self.column(name).and_then(|c| c.view::<T>())
    }

    /// The record at `index` as one [`Value`] per field.
    pub fn record(&self, index: usize) -> Option<Vec<Value>> {
        self.columns.iter().map(|c| c.get(index)).collect()
    }

    /// Iterate records in order.
    pub fn records(&self) -> impl Iterator<Item = Vec<Value>> + '_ {
        (0..self.len()).filter_map(move |i| self.record(i))
    }
}

impl fmt::Display for RecordArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, record) in self.records().enumerate() {
            if i > 0 {
                f.write_str("\n ")?;
            }
            f.write_str("(")?;
            for (j, value) in record.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{value}")?;
            }
            f.write_str(")")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use ndarray::array;

    use super::*;

    fn race_schema() -> Schema {
        Schema::new(vec![
            Field::new("time", DType::Int32),
            Field::new("distance", DType::Float32),
            Field::new("is_in_lead", DType::Bool),
        ])
    }

    fn race_records() -> RecordArray {
        RecordArray::new(
            race_schema(),
            vec![
                Column::Int32(array![1, 2]),
                Column::Float32(array![1.5, 3.25]),
                Column::Bool(array![true, false]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn parse_bool_accepts_common_spellings() {
        assert_eq!(bool::parse_text("True"), Ok(true));
        assert_eq!(bool::parse_text("0"), Ok(false));
        assert!(bool::parse_text("maybe").is_err());
    }

    #[test]
    fn record_array_rejects_ragged_columns() {
        let err = RecordArray::new(
            race_schema(),
            vec![
                Column::Int32(array![1, 2]),
                Column::Float32(array![1.5]),
                Column::Bool(array![true, false]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("field 'distance' has 1 values"));
    }

    #[test]
    fn record_array_rejects_dtype_mismatch() {
        let err = RecordArray::new(
            race_schema(),
            vec![
                Column::Int64(array![1, 2]),
                Column::Float32(array![1.5, 2.0]),
                Column::Bool(array![true, false]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("declared int32 but column holds int64"));
    }

    #[test]
    fn typed_column_requires_matching_type() {
        let records = race_records();
        assert_eq!(records.typed_column::<i32>("time").unwrap(), array![1, 2]);
        assert!(records.typed_column::<i64>("time").is_none());
        assert!(records.typed_column::<i32>("speed").is_none());
    }

    #[test]
    fn record_returns_one_value_per_field() {
        let records = race_records();
        assert_eq!(
            records.record(1),
            Some(vec![Value::Int32(2), Value::Float32(3.25), Value::Bool(false)])
        );
        assert_eq!(records.record(2), None);
    }

    #[test]
    fn display_lists_records() {
        assert_eq!(
            race_records().to_string(),
            "[(1, 1.5, true)\n (2, 3.25, false)]"
        );
    }

    #[test]
    fn schema_validate_rejects_duplicates() {
        let schema = Schema::new(vec![
            Field::new("a", DType::Int32),
            Field::new("a", DType::Bool),
        ]);
        assert!(schema.validate().is_err());
    }

    #[test]
    fn schema_json_round_trips_dtype_names() {
        let schema = Schema::from_json_str(
            r#"{"fields":[{"name":"is_in_lead","dtype":"bool"},{"name":"n","dtype":"int64"}]}"#,
        )
        .unwrap();
        assert_eq!(schema.fields[0], Field::new("is_in_lead", DType::Bool));
        assert_eq!(schema.index_of("n"), Some(1));
    }
}
