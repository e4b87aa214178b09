//! Driver capability consumed by the call pipeline
//!
//! Every operation is a blocking call into the backend. Neither a
//! connection nor a live result handle is safe for concurrent use from
//! multiple threads of control without external serialization; that is a
//! caller obligation, not something this layer enforces.

use std::fmt;

use crate::{Row, Value};

/// Driver-reported failure, exactly as the backend surfaces it.
///
/// Carries what the wire protocol reports and nothing more; the invoker
/// wraps it with procedure and argument context before it reaches callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverError {
    pub message: String,
    pub code: u32,
    pub sql_state: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>, code: u32, sql_state: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
            sql_state: sql_state.into(),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {}, state {})", self.message, self.code, self.sql_state)
    }
}

impl std::error::Error for DriverError {}

/// Result type alias for the driver boundary
pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// An established database connection.
///
/// Connection bootstrapping (addresses, credentials, TLS) belongs to the
/// backend crate; the pipeline only consumes the established handle.
pub trait Connection: Send {
    /// Get the driver name (e.g. "mysql", "memory")
    fn driver_name(&self) -> &str;

    /// Prepare a call statement for execution
    fn prepare(&mut self, text: &str) -> DriverResult<Box<dyn Statement>>;
}

/// A prepared call statement.
///
/// Owned by the invoker for the duration of one bind/execute/classify
/// sequence and dropped once the outcome is classified; backend resources
/// are released on drop.
pub trait Statement: Send + fmt::Debug {
    /// Bind positional arguments together with their concatenated type
    /// tags, in argument order.
    fn bind(&mut self, type_tags: &str, arguments: &[Value]) -> DriverResult<()>;

    /// Execute the prepared statement
    fn execute(&mut self) -> DriverResult<()>;

    /// Hand over the buffered result set, if execution produced one.
    ///
    /// Returns `None` for procedures that complete without a result set.
    /// Callable once per execution; the handle transfers ownership out of
    /// the statement.
    fn take_result(&mut self) -> DriverResult<Option<Box<dyn ResultHandle>>>;
}

/// A buffered, seekable result set, exclusively owned by one cursor.
pub trait ResultHandle: Send + fmt::Debug {
    /// Server-computed row count, fixed for the handle's lifetime
    fn row_count(&self) -> usize;

    /// Position the handle so the next fetch reads row `offset`.
    ///
    /// `offset == row_count()` is the end position and is valid; anything
    /// beyond it is an error. The end position is what a cursor restores
    /// after a random-access read on an exhausted iteration.
    fn seek(&mut self, offset: usize) -> DriverResult<()>;

    /// Row at the current position, advancing the position by one.
    /// `None` once the position is at the end.
    fn fetch(&mut self) -> DriverResult<Option<Row>>;
}
