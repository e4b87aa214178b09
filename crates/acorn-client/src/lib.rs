//! Acorn Client - the stored-procedure call pipeline
//!
//! Turns a procedure name plus an argument list into a typed, parameterized
//! `call` statement, executes it through the driver capability, and
//! normalizes the outcome: a result set becomes a countable, seekable
//! [`RowCursor`]; anything else becomes a completion flag or a typed error.
//!
//! The [`Database`] facade is the usual entry point; [`invoke`] is the
//! underlying generic operation for callers that manage their own
//! connection and registry.

mod binding;
mod call;
mod cursor;
mod database;
mod invoker;

pub use binding::{classify, type_tags};
pub use call::call_text;
pub use cursor::{IndexedRows, RowCursor, RowIterator};
pub use database::Database;
pub use invoker::{invoke, CallOutcome};

/// Re-export commonly used types from acorn-core
pub use acorn_core::{
    AcornError, Connection, DriverError, FromRow, Record, RecordRegistry, Result, Row, TypeTag,
    Value,
};
