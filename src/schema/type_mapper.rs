use crate::types::{ColumnType, PgType, TableSchema};

/// Map an optimized in-memory type to its PostgreSQL column type.
///
/// A generic dataframe-to-SQL mapper would give every integer column
/// BIGINT and every string column unbounded VARCHAR; this narrows each
/// column to the smallest PostgreSQL type that holds the in-memory
/// range, which shrinks the table on disk and speeds up the primary
/// key build.
///
/// The mapping is pure and deterministic; no data rows are inspected.
pub fn map_column(dtype: ColumnType) -> PgType {
    match dtype {
        // SMALLINT holds -32768..=32767, covering u8 but not u16
        ColumnType::Int8 | ColumnType::UInt8 | ColumnType::Int16 => PgType::SmallInt,
        ColumnType::UInt16 | ColumnType::Int32 => PgType::Integer,
        ColumnType::UInt32 | ColumnType::Int64 | ColumnType::UInt64 => PgType::BigInt,
        ColumnType::Float32 => PgType::Real,
        ColumnType::Float64 => PgType::DoublePrecision,
        ColumnType::Bool => PgType::Boolean,
        ColumnType::Category | ColumnType::Text => PgType::Text,
        ColumnType::DateTime => PgType::Timestamp,
        ColumnType::Date => PgType::Date,
    }
}

/// Map every column of a source dataset, preserving column order.
pub fn map_schema(schema: &TableSchema) -> Vec<(String, PgType)> {
    schema
        .columns
        .iter()
        .map(|c| (c.name.clone(), map_column(c.dtype)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ColumnSchema;

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(map_column(ColumnType::Int8), PgType::SmallInt);
        assert_eq!(map_column(ColumnType::UInt8), PgType::SmallInt);
        assert_eq!(map_column(ColumnType::Int16), PgType::SmallInt);
        // u16 max exceeds SMALLINT, must widen
        assert_eq!(map_column(ColumnType::UInt16), PgType::Integer);
        assert_eq!(map_column(ColumnType::Int32), PgType::Integer);
        assert_eq!(map_column(ColumnType::UInt32), PgType::BigInt);
        assert_eq!(map_column(ColumnType::Int64), PgType::BigInt);
        assert_eq!(map_column(ColumnType::UInt64), PgType::BigInt);
    }

    #[test]
    fn test_float_bool_string_temporal() {
        assert_eq!(map_column(ColumnType::Float32), PgType::Real);
        assert_eq!(map_column(ColumnType::Float64), PgType::DoublePrecision);
        assert_eq!(map_column(ColumnType::Bool), PgType::Boolean);
        assert_eq!(map_column(ColumnType::Category), PgType::Text);
        assert_eq!(map_column(ColumnType::Text), PgType::Text);
        assert_eq!(map_column(ColumnType::DateTime), PgType::Timestamp);
        assert_eq!(map_column(ColumnType::Date), PgType::Date);
    }

    #[test]
    fn test_map_schema_is_deterministic_and_ordered() {
        let schema = TableSchema {
            columns: vec![
                ColumnSchema {
                    name: "player_id".to_string(),
                    dtype: ColumnType::Text,
                },
                ColumnSchema {
                    name: "year_id".to_string(),
                    dtype: ColumnType::UInt16,
                },
                ColumnSchema {
                    name: "hr".to_string(),
                    dtype: ColumnType::UInt8,
                },
            ],
        };

        let first = map_schema(&schema);
        let second = map_schema(&schema);
        assert_eq!(first, second);
        assert_eq!(
            first,
            vec![
                ("player_id".to_string(), PgType::Text),
                ("year_id".to_string(), PgType::Integer),
                ("hr".to_string(), PgType::SmallInt),
            ]
        );
    }
}
