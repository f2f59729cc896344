//! Request dispatcher.
//!
//! The orchestrating entry point: opens the database, interprets the
//! action code, executes the statement batch, and assembles the full
//! response buffer. The lifecycle per request:
//! 1. Open the database by filename (failure ends the request with an
//!    error response)
//! 2. Branch on the action code
//! 3. For queries, execute each newline-separated statement in order,
//!    isolating per-statement failures
//! 4. Drop the connection and hand the buffer to the transport

use std::borrow::Cow;

use bytes::{Bytes, BytesMut};

use crate::codec::{Base64Codec, PlainCodec};
use crate::engine::{Engine, StatementOutcome};
use crate::error::Result;
use crate::protocol::{
    error_response, put_block, put_connection_info, put_fields_header, put_result_set_header,
    put_row_data, u32_field, Header, CONTINUATION_LAST, CONTINUATION_MORE, STATEMENT_ERRNO,
    TUNNEL_ERRNO,
};

/// Action code: open the database and report connection info.
pub const ACTION_CONNECTION_INFO: &str = "C";

/// Action code: execute a query batch.
pub const ACTION_QUERY: &str = "Q";

/// Message returned for unrecognized action codes.
pub const UNSUPPORTED_ACTION_MESSAGE: &str = "Unsupported action";

/// Process one tunnelled request and build the complete response buffer.
///
/// This is the entire contract with the transport layer: it receives the
/// request parameters and relays the returned buffer opaquely. Every
/// database-level outcome, including a connection failure, is an `Ok`
/// wire buffer; `Err` is reserved for protocol-encoding faults (counts
/// or payloads that cannot be represented in the wire format).
///
/// # Example
///
/// ```no_run
/// use sqltunnel::process;
///
/// let response = process("/data/app.db", "Q", "SELECT 1", false).unwrap();
/// ```
pub fn process(db_path: &str, action: &str, query: &str, base64_encoded: bool) -> Result<Bytes> {
    let engine = match Engine::open(db_path) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::warn!("cannot open database {:?}: {}", db_path, e);
            return error_response(TUNNEL_ERRNO, &e.to_string());
        }
    };

    // The connection closes when `engine` drops, on every path below.
    match action {
        ACTION_CONNECTION_INFO => connection_info_response(&engine),
        ACTION_QUERY => query_response(&engine, query, base64_encoded),
        other => {
            tracing::debug!("unsupported action {:?}", other);
            error_response(TUNNEL_ERRNO, UNSUPPORTED_ACTION_MESSAGE)
        }
    }
}

fn connection_info_response(engine: &Engine) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(64);
    buf.extend_from_slice(&Header::new(0).encode());
    put_connection_info(&mut buf, engine.version())?;
    Ok(buf.freeze())
}

/// Execute a newline-separated statement batch and encode one result-set
/// segment per non-empty statement.
///
/// Statement failures stay local: the segment carries errno 1 and the
/// engine's message, later statements still run, and the top-level
/// header errno stays 0.
fn query_response(engine: &Engine, query: &str, base64_encoded: bool) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(256);
    buf.extend_from_slice(&Header::new(0).encode());

    let statements: Vec<&str> = query.split('\n').filter(|s| !s.is_empty()).collect();

    for (index, raw) in statements.iter().enumerate() {
        let report = execute_one(engine, raw, base64_encoded);

        let (num_fields, num_rows) = match &report.outcome {
            Some(o) if !o.rows.is_empty() => (o.columns.len(), o.rows.len()),
            _ => (0, 0),
        };
        // The engine's -1 "not applicable" sentinel reads as 0 on the wire
        let affected_rows = match &report.outcome {
            Some(o) if o.affected_rows != -1 => o.affected_rows,
            _ => 0,
        };
        let insert_id = match &report.outcome {
            Some(o) => o.last_insert_id,
            None => engine.last_insert_id(),
        };

        put_result_set_header(
            &mut buf,
            report.errno,
            u32_field(affected_rows)?,
            u32_field(insert_id)?,
            u32_field(num_fields)?,
            u32_field(num_rows)?,
        );

        match &report.outcome {
            Some(o) if !o.rows.is_empty() => {
                put_fields_header(&mut buf, &o.columns)?;
                put_row_data(&mut buf, &o.rows)?;
            }
            _ => put_block(&mut buf, report.error_msg.as_bytes())?,
        }

        let flag = if index + 1 < statements.len() {
            CONTINUATION_MORE
        } else {
            CONTINUATION_LAST
        };
        buf.extend_from_slice(&[flag]);
    }

    Ok(buf.freeze())
}

struct StatementReport {
    errno: u32,
    error_msg: String,
    outcome: Option<StatementOutcome>,
}

impl StatementReport {
    fn failed(error_msg: String) -> Self {
        Self {
            errno: STATEMENT_ERRNO,
            error_msg,
            outcome: None,
        }
    }
}

fn execute_one(engine: &Engine, raw: &str, base64_encoded: bool) -> StatementReport {
    let sql: Cow<'_, str> = if base64_encoded {
        match Base64Codec::decode(raw) {
            Ok(sql) => Cow::Owned(sql),
            Err(e) => {
                tracing::debug!("statement decode failed: {}", e);
                return StatementReport::failed(e.to_string());
            }
        }
    } else {
        Cow::Borrowed(PlainCodec::decode(raw))
    };

    match engine.run_statement(&sql) {
        Ok(outcome) => StatementReport {
            errno: 0,
            error_msg: String::new(),
            outcome: Some(outcome),
        },
        Err(e) => {
            tracing::debug!("statement failed: {}", e);
            StatementReport::failed(e.to_string())
        }
    }
}
