//! Embedded SQLite collaborator.
//!
//! All SQL execution is delegated to SQLite through `rusqlite`; this
//! module owns the connection and reduces each statement to the facts
//! the wire format needs: column names, rows of tagged values, the
//! affected-row count, and the last-insert rowid.
//!
//! # Example
//!
//! ```
//! use sqltunnel::engine::Engine;
//!
//! let engine = Engine::open(":memory:").unwrap();
//! let outcome = engine.run_statement("SELECT 1 AS one").unwrap();
//! assert_eq!(outcome.columns, vec!["one"]);
//! assert_eq!(outcome.rows.len(), 1);
//! ```

use std::time::Duration;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;
use crate::value::Value;

const BUSY_TIMEOUT_MS: u64 = 100;

/// Everything the wire format needs to know about one executed statement.
#[derive(Debug)]
pub struct StatementOutcome {
    /// Column names in statement order; empty for statements without
    /// result columns.
    pub columns: Vec<String>,
    /// All result rows, rectangular with `columns`.
    pub rows: Vec<Vec<Value>>,
    /// Rows changed by this statement; -1 for non-modifying statements
    /// (DB-API convention, normalized by the dispatcher).
    pub affected_rows: i64,
    /// Rowid of the most recent successful insert on this connection.
    pub last_insert_id: i64,
}

/// An open connection to the embedded database.
pub struct Engine {
    conn: Connection,
}

impl Engine {
    /// Open the database file, creating it if missing.
    pub fn open(path: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
        let conn = Connection::open_with_flags(path, flags)?;
        conn.busy_timeout(Duration::from_millis(BUSY_TIMEOUT_MS))?;
        Ok(Self { conn })
    }

    /// The SQLite library version string.
    pub fn version(&self) -> &'static str {
        rusqlite::version()
    }

    /// Rowid of the most recent successful insert (0 before any insert).
    pub fn last_insert_id(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Execute one statement and collect its complete outcome.
    ///
    /// The statement is committed immediately after execution: no
    /// transaction spans a multi-statement batch, so earlier statements
    /// stay committed when a later one fails.
    pub fn run_statement(&self, sql: &str) -> Result<StatementOutcome> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|s| s.to_string()).collect();

        let mut rows = Vec::new();
        {
            let mut results = stmt.query([])?;
            while let Some(row) = results.next()? {
                let mut values = Vec::with_capacity(columns.len());
                for i in 0..columns.len() {
                    values.push(Value::from(row.get_ref(i)?));
                }
                rows.push(values);
            }
        }
        drop(stmt);

        // DB-API rowcount semantics: the change count is only meaningful
        // for DML; everything else reports the -1 sentinel.
        let affected_rows = if is_dml(sql) {
            self.conn.changes() as i64
        } else {
            -1
        };

        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }

        Ok(StatementOutcome {
            columns,
            rows,
            affected_rows,
            last_insert_id: self.conn.last_insert_rowid(),
        })
    }
}

fn is_dml(sql: &str) -> bool {
    let head = sql.trim_start();
    ["insert", "update", "delete", "replace"]
        .iter()
        .any(|kw| head.get(..kw.len()).is_some_and(|p| p.eq_ignore_ascii_case(kw)))
}
