//! Procedure invocation and outcome classification

use acorn_core::{AcornError, Connection, DriverError, RecordRegistry, Result, Value};

use crate::cursor::{IndexedRows, RowCursor};
use crate::{binding, call};

/// Normalized outcome of a stored-procedure invocation.
///
/// Exactly one variant holds at completion; failures are the `Err` arm of
/// the surrounding `Result`.
#[derive(Debug)]
pub enum CallOutcome {
    /// The procedure produced a result set, wrapped in a cursor that owns
    /// the driver handle.
    Rows(RowCursor),
    /// The procedure completed without producing a result set.
    ///
    /// The boolean mirrors the driver's execute status. Execution failures
    /// surface as `AcornError::Execution` before this variant is built, so
    /// every path that constructs it carries `true`; the flag is kept for
    /// the outward contract, not as a second failure channel.
    Completed(bool),
}

impl CallOutcome {
    /// The cursor, for outcomes that produced rows
    pub fn rows(self) -> Option<RowCursor> {
        match self {
            CallOutcome::Rows(cursor) => Some(cursor),
            CallOutcome::Completed(_) => None,
        }
    }

    pub fn is_rows(&self) -> bool {
        matches!(self, CallOutcome::Rows(_))
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CallOutcome::Completed(_))
    }
}

/// Invoke a stored procedure over an established connection.
///
/// Classifies every argument before touching the driver, prepares and
/// executes the call in one round trip, and wraps a produced result set in
/// a [`RowCursor`] decoding through `record_type` (resolved against
/// `records`; `None` selects the untyped column-map decoding).
pub fn invoke(
    connection: &mut dyn Connection,
    records: &RecordRegistry,
    procedure: &str,
    arguments: &[Value],
    record_type: Option<&str>,
) -> Result<CallOutcome> {
    // An unbindable argument must fail before any driver contact.
    let tags = binding::type_tags(arguments)?;
    let text = call::call_text(procedure, arguments.len());

    tracing::debug!(
        procedure = %procedure,
        arguments = arguments.len(),
        tags = %tags,
        "invoking stored procedure"
    );

    let mut statement = connection
        .prepare(&text)
        .map_err(|e| AcornError::Prepare {
            message: e.message,
            code: e.code,
        })?;

    if !arguments.is_empty() {
        statement
            .bind(&tags, arguments)
            .map_err(|e| AcornError::Prepare {
                message: e.message,
                code: e.code,
            })?;
    }

    let execution_error = |e: DriverError| AcornError::Execution {
        message: e.message,
        code: e.code,
        sql_state: e.sql_state,
        procedure: procedure.to_string(),
        arguments: arguments.to_vec(),
    };

    statement.execute().map_err(&execution_error)?;

    // The statement drops (and releases) at the end of this scope, whether
    // or not a handle was produced from it.
    match statement.take_result().map_err(&execution_error)? {
        Some(handle) => {
            let record_type = records.resolve(record_type)?;
            let cursor = RowCursor::new(handle, record_type)?;
            tracing::debug!(procedure = %procedure, rows = cursor.count(), "procedure returned a result set");
            Ok(CallOutcome::Rows(cursor))
        }
        None => {
            tracing::debug!(procedure = %procedure, "procedure completed without a result set");
            Ok(CallOutcome::Completed(true))
        }
    }
}
