use std::fmt;

use crate::error::LoadError;

/// Optimized in-memory column type recorded by the wrangling step.
///
/// The wrangler downcasts each column to the smallest type that holds
/// its values and writes the result to a sidecar type file next to the
/// data. These are the dtype strings that file may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Bool,
    /// Low-cardinality string column
    Category,
    /// Free-form string column
    Text,
    DateTime,
    Date,
}

impl ColumnType {
    /// Parse a sidecar dtype string.
    ///
    /// An unknown string is an error: silently defaulting would hide a
    /// wrangling bug behind a wrong column type.
    pub fn parse(column: &str, dtype: &str) -> Result<Self, LoadError> {
        let parsed = match dtype {
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::UInt8,
            "uint16" => Self::UInt16,
            "uint32" => Self::UInt32,
            "uint64" => Self::UInt64,
            "float32" => Self::Float32,
            "float64" => Self::Float64,
            "bool" | "boolean" => Self::Bool,
            "category" => Self::Category,
            "object" | "str" | "string" => Self::Text,
            "datetime64[ns]" | "datetime64" | "datetime" => Self::DateTime,
            "date" => Self::Date,
            _ => {
                return Err(LoadError::UnrecognizedType {
                    column: column.to_string(),
                    dtype: dtype.to_string(),
                })
            }
        };
        Ok(parsed)
    }
}

/// Target PostgreSQL column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    DoublePrecision,
    Boolean,
    Text,
    Timestamp,
    Date,
}

impl PgType {
    /// SQL rendering of the type, passed verbatim into CREATE TABLE.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::SmallInt => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::BigInt => "BIGINT",
            Self::Real => "REAL",
            Self::DoublePrecision => "DOUBLE PRECISION",
            Self::Boolean => "BOOLEAN",
            Self::Text => "TEXT",
            Self::Timestamp => "TIMESTAMP",
            Self::Date => "DATE",
        }
    }
}

impl fmt::Display for PgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// A single column of a source dataset: name plus in-memory type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSchema {
    pub name: String,
    pub dtype: ColumnType,
}

/// Column metadata for one source dataset.
///
/// Column order follows the CSV header exactly; the loader creates the
/// target table in the same order so COPY can consume the file as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub columns: Vec<ColumnSchema>,
}
