//! Registered procedure behaviors and journaled calls

use acorn_core::{DriverError, Value};

/// What a registered procedure does when executed.
#[derive(Debug, Clone)]
pub enum ProcedureBehavior {
    /// Produce a buffered result set
    Rows {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// Complete without a result set
    Ack,
    /// Report an execution failure
    Fail(DriverError),
}

impl ProcedureBehavior {
    /// Result-set behavior from column names and row values
    pub fn rows(columns: &[&str], rows: Vec<Vec<Value>>) -> Self {
        ProcedureBehavior::Rows {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    /// Execution-failure behavior with an explicit code and SQL state
    pub fn fail(message: &str, code: u32, sql_state: &str) -> Self {
        ProcedureBehavior::Fail(DriverError::new(message, code, sql_state))
    }
}

/// One journaled prepare-and-execute round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureCall {
    /// Procedure name parsed out of the call text
    pub procedure: String,
    /// Concatenated type tags the statement was bound with (empty for
    /// zero-argument calls)
    pub type_tags: String,
    /// Bound argument values
    pub arguments: Vec<Value>,
}
