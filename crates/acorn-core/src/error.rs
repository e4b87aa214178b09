//! Error types for Acorn

use crate::Value;
use thiserror::Error;

/// Core error type for Acorn operations.
///
/// Nothing is retried internally; every failure propagates to the immediate
/// caller carrying enough context (procedure name, parameters, driver codes)
/// to log or re-raise without re-deriving state.
#[derive(Error, Debug)]
pub enum AcornError {
    /// Connect-phase failure, raised once when a connection is established.
    #[error("connection failed: {message} (code {code})")]
    Connection { message: String, code: u32 },

    /// An argument kind the wire tagging scheme cannot bind.
    ///
    /// Local and non-retryable: the caller has to change the argument.
    #[error("cannot bind argument of kind `{kind}` at index {index}")]
    UnsupportedType { index: usize, kind: &'static str },

    /// The driver rejected the call statement before execution.
    #[error("prepare failed: {message} (code {code})")]
    Prepare { message: String, code: u32 },

    /// The driver reported an execution failure.
    #[error("procedure `{procedure}` failed: {message} (code {code}, state {sql_state})")]
    Execution {
        message: String,
        code: u32,
        sql_state: String,
        procedure: String,
        arguments: Vec<Value>,
    },

    /// A row could not be decoded into the resolved record type.
    #[error("cannot decode row into `{record_type}`: {message}")]
    Decode { record_type: String, message: String },

    /// Random access past the end of a result.
    #[error("row offset {offset} out of range for result of {rows} rows")]
    IndexOutOfRange { offset: usize, rows: usize },

    /// Result cursors expose no write access.
    #[error("result cursor is not writable")]
    NotWritable,

    /// No decoder is registered under the resolved record type name.
    #[error("unknown record type `{0}`")]
    UnknownRecordType(String),

    /// Driver failure outside the prepare/execute path (seek, fetch).
    #[error("driver error: {0}")]
    Driver(String),
}

impl AcornError {
    /// Shorthand for a decode failure whose record type is attached later
    /// by the resolver (see `ResolvedRecordType::decode`).
    pub fn decode(message: impl Into<String>) -> Self {
        AcornError::Decode {
            record_type: String::new(),
            message: message.into(),
        }
    }

    /// Attach the resolved record type name to a decode failure raised from
    /// inside a `FromRow` implementation. Errors that already name a record
    /// type, and non-decode errors, pass through unchanged.
    pub fn for_record_type(self, name: &str) -> Self {
        match self {
            AcornError::Decode {
                record_type,
                message,
            } if record_type.is_empty() => AcornError::Decode {
                record_type: name.to_string(),
                message,
            },
            other => other,
        }
    }
}

/// Result type alias for Acorn operations
pub type Result<T> = std::result::Result<T, AcornError>;
