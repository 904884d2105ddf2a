use std::path::Path;

use crate::schema::sidecar::file_stem;
use crate::types::PgType;

/// Target table name: prefix plus the source file's base name with all
/// extensions stripped (`retro_` + `batting.csv.gz` -> `retro_batting`).
pub fn target_table(prefix: &str, source: &Path) -> String {
    format!("{}{}", prefix, file_stem(source))
}

/// DROP statement making a load rerunnable. CASCADE takes dependent
/// objects with it.
pub fn drop_table(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {} CASCADE", table)
}

/// CREATE TABLE with the mapped column types, all nullable, in source
/// column order.
pub fn create_table(table: &str, columns: &[(String, PgType)]) -> String {
    let cols = columns
        .iter()
        .map(|(name, pg_type)| format!("{} {}", name, pg_type.as_sql()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("CREATE TABLE {} ({})", table, cols)
}

/// ALTER TABLE adding a composite primary key.
///
/// Column order is the caller's, verbatim: the order of a composite
/// key determines its index layout.
pub fn add_primary_key(table: &str, columns: &[&str]) -> String {
    format!("ALTER TABLE {} ADD PRIMARY KEY ({})", table, columns.join(", "))
}

/// ALTER TABLE adding a named uniqueness constraint.
pub fn add_unique(table: &str, constraint: &str, columns: &[&str]) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} UNIQUE ({})",
        table,
        constraint,
        columns.join(", ")
    )
}

/// COPY statement for the native bulk-load path. The source file's
/// header row is consumed by the server, not loaded.
pub fn copy_from_stdin(table: &str) -> String {
    format!("COPY {} FROM STDIN WITH (FORMAT csv, HEADER true)", table)
}

pub fn count_rows(table: &str) -> String {
    format!("SELECT COUNT(*) FROM {}", table)
}
