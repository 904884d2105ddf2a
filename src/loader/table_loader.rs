use std::path::Path;

use tokio_postgres::Client;
use tracing::info;

use crate::error::LoadError;
use crate::loader::bulk::{BulkLoader, PgCopyLoader};
use crate::schema::{ddl, read_schema, type_mapper};

/// Runs the drop/create/copy/constrain sequence for one source dataset.
///
/// Every statement commits independently; there is no wrapping
/// transaction. A failure partway leaves the table in whatever state
/// the last completed statement produced, and the drop-then-create
/// prologue makes rerunning the same load safe.
pub struct TableLoader<'a> {
    client: &'a Client,
}

impl<'a> TableLoader<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Load one source dataset into `<prefix><stem>`.
    ///
    /// The sequence is linear: derive the table name, read column
    /// metadata, map types, drop, create, bulk copy, optionally add the
    /// primary key in the caller's exact column order, then count rows.
    /// Returns the loaded row count.
    pub async fn load(
        &self,
        prefix: &str,
        source: &Path,
        primary_key: Option<&[&str]>,
    ) -> Result<u64, LoadError> {
        let table = ddl::target_table(prefix, source);
        info!("{} loading ...", table);

        // column metadata only; data rows flow through COPY below
        let schema = read_schema(source)?;
        let columns = type_mapper::map_schema(&schema);

        self.client.execute(&ddl::drop_table(&table), &[]).await?;
        self.client
            .execute(&ddl::create_table(&table, &columns), &[])
            .await?;

        let bulk = PgCopyLoader::new(self.client);
        bulk.copy(&table, source).await?;

        if let Some(key) = primary_key {
            self.client
                .execute(&ddl::add_primary_key(&table, key), &[])
                .await?;
        }

        let row = self.client.query_one(&ddl::count_rows(&table), &[]).await?;
        let rows: i64 = row.get(0);
        info!("{} added with {} rows", table, rows);
        Ok(rows as u64)
    }

    /// Add a named uniqueness constraint to an already-loaded table.
    pub async fn add_unique(
        &self,
        table: &str,
        constraint: &str,
        columns: &[&str],
    ) -> Result<(), LoadError> {
        self.client
            .execute(&ddl::add_unique(table, constraint, columns), &[])
            .await?;
        Ok(())
    }
}
