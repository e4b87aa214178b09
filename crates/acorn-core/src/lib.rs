//! Acorn Core - shared vocabulary for the stored-procedure call adapter
//!
//! This crate provides the types that the call pipeline and the driver
//! backends both depend on. It defines:
//!
//! - `Value`, `Row`, `TypeTag` - arguments, result rows and the bind-time
//!   wire tags
//! - `Connection` / `Statement` / `ResultHandle` - the driver capability a
//!   backend implements
//! - `Record`, `FromRow`, `RecordRegistry` - the record resolver capability
//!   that maps logical record type names to row decoders
//! - `AcornError` and the crate `Result` alias

mod driver;
mod error;
mod record;
mod types;

pub use driver::*;
pub use error::*;
pub use record::*;
pub use types::*;
