//! In-process driver backend
//!
//! Implements the driver capability over a table of registered procedure
//! behaviors. It backs the integration tests and doubles as the reference
//! implementation of the driver contract, reporting the error code and SQL
//! state pairs a MySQL-family server would use.

mod connection;
mod procedures;
mod result;

pub use connection::{CallJournal, MemoryConnection, PreparedCall};
pub use procedures::{ProcedureBehavior, ProcedureCall};
pub use result::MemoryResultHandle;
