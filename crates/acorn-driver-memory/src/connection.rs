//! Memory connection and prepared statements

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

use acorn_core::{
    AcornError, Connection, DriverError, DriverResult, Result, ResultHandle, Statement, Value,
};

use crate::procedures::{ProcedureBehavior, ProcedureCall};
use crate::result::MemoryResultHandle;

// Error codes mirroring the MySQL server/client surface.
const ER_BAD_DB_ERROR: u32 = 1049;
const ER_PARSE_ERROR: u32 = 1064;
const ER_SP_DOES_NOT_EXIST: u32 = 1305;
const CR_COMMANDS_OUT_OF_SYNC: u32 = 2014;
const CR_PARAMS_NOT_BOUND: u32 = 2031;
const CR_UNSUPPORTED_PARAM_TYPE: u32 = 2036;

#[derive(Debug, Default)]
struct Journal {
    prepared: usize,
    executed: Vec<ProcedureCall>,
}

/// Shared view of the round trips a connection has seen.
///
/// Cloneable and usable after the connection itself has been boxed away
/// behind the facade, which is what the integration tests need to assert
/// on round-trip behavior.
#[derive(Clone)]
pub struct CallJournal(Arc<Mutex<Journal>>);

impl CallJournal {
    /// Number of statements prepared so far
    pub fn prepared(&self) -> usize {
        self.0.lock().prepared
    }

    /// Executed calls, in execution order (failing executions included:
    /// they did reach the backend)
    pub fn executed(&self) -> Vec<ProcedureCall> {
        self.0.lock().executed.clone()
    }
}

/// In-process connection hosting registered procedure behaviors.
#[derive(Debug)]
pub struct MemoryConnection {
    procedures: HashMap<String, ProcedureBehavior>,
    journal: Arc<Mutex<Journal>>,
}

impl MemoryConnection {
    /// Database name the backend hosts
    pub const DATABASE: &'static str = "memory";

    /// Open a connection to the named in-process database.
    ///
    /// The backend hosts a single database, `"memory"`; any other name is
    /// a connect-phase failure, the same way a server rejects an unknown
    /// schema.
    pub fn open(database: &str) -> Result<Self> {
        if database != Self::DATABASE {
            return Err(AcornError::Connection {
                message: format!("unknown database `{database}`"),
                code: ER_BAD_DB_ERROR,
            });
        }
        tracing::info!(database = %database, "memory connection established");
        Ok(Self {
            procedures: HashMap::new(),
            journal: Arc::new(Mutex::new(Journal::default())),
        })
    }

    /// Register a procedure behavior under its full (namespaced) name
    pub fn register(&mut self, procedure: &str, behavior: ProcedureBehavior) {
        tracing::debug!(procedure = %procedure, "registering procedure");
        self.procedures.insert(procedure.to_string(), behavior);
    }

    /// Shared journal handle; stays usable after the connection is boxed
    pub fn journal(&self) -> CallJournal {
        CallJournal(self.journal.clone())
    }
}

/// Parse `call name(?, ?, ?)` into the procedure name and placeholder
/// count. Returns `None` for anything that is not a well-formed call.
fn parse_call(text: &str) -> Option<(&str, usize)> {
    let rest = text.strip_prefix("call ")?;
    let open = rest.find('(')?;
    let name = rest[..open].trim();
    if name.is_empty() {
        return None;
    }
    let inner = rest[open + 1..].strip_suffix(')')?;
    if inner.trim().is_empty() {
        return Some((name, 0));
    }
    let mut count = 0;
    for part in inner.split(',') {
        if part.trim() != "?" {
            return None;
        }
        count += 1;
    }
    Some((name, count))
}

impl Connection for MemoryConnection {
    fn driver_name(&self) -> &str {
        "memory"
    }

    fn prepare(&mut self, text: &str) -> DriverResult<Box<dyn Statement>> {
        self.journal.lock().prepared += 1;

        let (procedure, placeholders) = parse_call(text).ok_or_else(|| {
            DriverError::new(
                format!("you have an error in your SQL syntax near '{text}'"),
                ER_PARSE_ERROR,
                "42000",
            )
        })?;

        let behavior = self.procedures.get(procedure).cloned().ok_or_else(|| {
            DriverError::new(
                format!("PROCEDURE {}.{procedure} does not exist", Self::DATABASE),
                ER_SP_DOES_NOT_EXIST,
                "42000",
            )
        })?;

        Ok(Box::new(PreparedCall {
            procedure: procedure.to_string(),
            placeholders,
            behavior,
            bound: None,
            executed: false,
            journal: self.journal.clone(),
        }))
    }
}

/// A prepared call against the memory backend.
#[derive(Debug)]
pub struct PreparedCall {
    procedure: String,
    placeholders: usize,
    behavior: ProcedureBehavior,
    bound: Option<(String, Vec<Value>)>,
    executed: bool,
    journal: Arc<Mutex<Journal>>,
}

impl Statement for PreparedCall {
    fn bind(&mut self, type_tags: &str, arguments: &[Value]) -> DriverResult<()> {
        if type_tags.chars().count() != arguments.len() || arguments.len() != self.placeholders {
            return Err(DriverError::new(
                format!(
                    "expected {} bound parameters, got {} (tags `{type_tags}`)",
                    self.placeholders,
                    arguments.len()
                ),
                CR_PARAMS_NOT_BOUND,
                "HY000",
            ));
        }
        if let Some(bad) = type_tags.chars().find(|c| !matches!(c, 'i' | 'd' | 's')) {
            return Err(DriverError::new(
                format!("unsupported parameter type tag `{bad}`"),
                CR_UNSUPPORTED_PARAM_TYPE,
                "HY000",
            ));
        }
        self.bound = Some((type_tags.to_string(), arguments.to_vec()));
        Ok(())
    }

    fn execute(&mut self) -> DriverResult<()> {
        if self.placeholders > 0 && self.bound.is_none() {
            return Err(DriverError::new(
                "no data supplied for parameters in prepared statement",
                CR_PARAMS_NOT_BOUND,
                "HY000",
            ));
        }

        let (type_tags, arguments) = self.bound.clone().unwrap_or_default();
        self.journal.lock().executed.push(ProcedureCall {
            procedure: self.procedure.clone(),
            type_tags,
            arguments,
        });

        if let ProcedureBehavior::Fail(error) = &self.behavior {
            return Err(error.clone());
        }
        self.executed = true;
        Ok(())
    }

    fn take_result(&mut self) -> DriverResult<Option<Box<dyn ResultHandle>>> {
        if !self.executed {
            return Err(DriverError::new(
                "commands out of sync; statement was not executed",
                CR_COMMANDS_OUT_OF_SYNC,
                "HY000",
            ));
        }
        match &self.behavior {
            ProcedureBehavior::Rows { columns, rows } => Ok(Some(Box::new(
                MemoryResultHandle::new(columns.clone(), rows.clone()),
            ))),
            ProcedureBehavior::Ack | ProcedureBehavior::Fail(_) => Ok(None),
        }
    }
}
