//! Table layout for task storage.
//!
//! # Invariants
//! - Creation is idempotent; existing rows are never touched.
//! - `REQUIRED_COLUMNS` lists every column the repository reads or writes.

use super::DbResult;
use rusqlite::Connection;

pub const TASKS_TABLE: &str = "tasks";

pub const REQUIRED_COLUMNS: &[&str] = &["id", "title", "description", "completed", "created_at"];

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Creates the `tasks` table when it does not exist yet.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Returns whether `table` exists in the connected database.
pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

/// Returns the first entry of `columns` missing from `table`, if any.
pub fn first_missing_column(
    conn: &Connection,
    table: &str,
    columns: &[&'static str],
) -> DbResult<Option<&'static str>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(columns
        .iter()
        .copied()
        .find(|column| !present.iter().any(|name| name == column)))
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, first_missing_column, table_exists, REQUIRED_COLUMNS, TASKS_TABLE};
    use rusqlite::Connection;

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute(
            "INSERT INTO tasks (title, created_at) VALUES ('kept', '2026-01-01 00:00:00+00:00');",
            [],
        )
        .unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn created_table_has_every_required_column() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!table_exists(&conn, TASKS_TABLE).unwrap());

        ensure_schema(&conn).unwrap();

        assert!(table_exists(&conn, TASKS_TABLE).unwrap());
        assert_eq!(
            first_missing_column(&conn, TASKS_TABLE, REQUIRED_COLUMNS).unwrap(),
            None
        );
    }

    #[test]
    fn first_missing_column_reports_absent_column() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE tasks (id INTEGER PRIMARY KEY, title TEXT NOT NULL);")
            .unwrap();

        assert_eq!(
            first_missing_column(&conn, TASKS_TABLE, REQUIRED_COLUMNS).unwrap(),
            Some("description")
        );
    }
}
