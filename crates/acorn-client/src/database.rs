//! Connection facade: namespaced procedure dispatch

use acorn_core::{Connection, RecordRegistry, Result, Value};

use crate::invoker::{invoke, CallOutcome};

/// Entry point tying an established connection to a procedure namespace
/// and a record registry.
///
/// `call("getUser", ..)` on a facade configured with the namespace `"app_"`
/// invokes `app_getUser`. The namespace is concatenated verbatim, so it
/// carries its own separator when the naming convention uses one; record
/// type names are qualified by the registry instead.
pub struct Database {
    connection: Box<dyn Connection>,
    procedure_namespace: String,
    records: RecordRegistry,
}

impl Database {
    pub fn new(
        connection: Box<dyn Connection>,
        procedure_namespace: impl Into<String>,
        records: RecordRegistry,
    ) -> Self {
        let procedure_namespace = procedure_namespace.into();
        tracing::debug!(
            driver = %connection.driver_name(),
            namespace = %procedure_namespace,
            "database facade ready"
        );
        Self {
            connection,
            procedure_namespace,
            records,
        }
    }

    /// Driver name of the underlying connection
    pub fn driver_name(&self) -> &str {
        self.connection.driver_name()
    }

    pub fn records(&self) -> &RecordRegistry {
        &self.records
    }

    /// Mutable registry access, for registering record types after
    /// construction
    pub fn records_mut(&mut self) -> &mut RecordRegistry {
        &mut self.records
    }

    /// Invoke `<namespace><name>` with the default column-map decoding.
    pub fn call(&mut self, name: &str, arguments: &[Value]) -> Result<CallOutcome> {
        let procedure = self.namespaced(name);
        invoke(
            self.connection.as_mut(),
            &self.records,
            &procedure,
            arguments,
            None,
        )
    }

    /// Invoke `<namespace><name>`, decoding result rows as `record_type`.
    pub fn call_as(
        &mut self,
        name: &str,
        arguments: &[Value],
        record_type: &str,
    ) -> Result<CallOutcome> {
        let procedure = self.namespaced(name);
        invoke(
            self.connection.as_mut(),
            &self.records,
            &procedure,
            arguments,
            Some(record_type),
        )
    }

    /// Invoke a fully named procedure, bypassing the namespace prefix.
    pub fn stored_procedure(
        &mut self,
        procedure: &str,
        arguments: &[Value],
        record_type: Option<&str>,
    ) -> Result<CallOutcome> {
        invoke(
            self.connection.as_mut(),
            &self.records,
            procedure,
            arguments,
            record_type,
        )
    }

    fn namespaced(&self, name: &str) -> String {
        format!("{}{}", self.procedure_namespace, name)
    }
}
