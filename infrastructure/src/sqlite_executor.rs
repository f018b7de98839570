use anyhow::Context;
use domain::table::ResultTable;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use shared::types::Result;
use std::path::PathBuf;

/// Runs one statement against the local database file. A fresh connection is
/// opened per call and dropped after the rows are materialized, so no handle
/// outlives a query. No timeout and no row cap: a heavy query runs to
/// completion and blocks the session, matching the synchronous pipeline.
pub struct SqliteExecutor {
    db_path: PathBuf,
    read_only: bool,
}

impl SqliteExecutor {
    pub fn new(db_path: impl Into<PathBuf>, read_only: bool) -> Self {
        Self {
            db_path: db_path.into(),
            read_only,
        }
    }

    pub fn query(&self, sql: &str) -> Result<ResultTable> {
        let conn = if self.read_only {
            Connection::open_with_flags(&self.db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        } else {
            Connection::open(&self.db_path)
        }
        .with_context(|| format!("failed to open database at {}", self.db_path.display()))?;

        let mut stmt = conn.prepare(sql)?;
        let columns: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let mut rows = stmt.query([])?;
        let mut materialized = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(columns.len());
            for index in 0..columns.len() {
                cells.push(render_value(row.get_ref(index)?));
            }
            materialized.push(cells);
        }

        Ok(ResultTable::new(columns, materialized))
    }
}

fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "NULL".to_string(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(text) => String::from_utf8_lossy(text).into_owned(),
        ValueRef::Blob(blob) => format!("<{} bytes>", blob.len()),
    }
}
