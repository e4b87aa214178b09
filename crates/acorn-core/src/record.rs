//! Record decoding: the resolver capability
//!
//! Maps logical record type names to row decoders. An explicit registry
//! replaces the reflective namespace-qualified class construction of
//! dynamic-language clients: record types are registered up front, bare
//! names are qualified against a configured namespace, and unknown names
//! fail instead of falling back to runtime class loading.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{AcornError, Result, Row, Value};

/// A decoded result row.
///
/// The concrete shape is whatever the decoder for the resolved record type
/// produced. The default decoder yields a column map, reachable through
/// [`Record::as_map`]; registered record types downcast to their concrete
/// struct.
pub struct Record(Box<dyn Any + Send + Sync>);

impl Record {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Box::new(value))
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Take ownership of the concrete record, or give the erased record
    /// back unchanged when the type does not match.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Record> {
        match self.0.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(erased) => Err(Record(erased)),
        }
    }

    /// Column map view, for records decoded with the default decoder
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        self.downcast_ref::<HashMap<String, Value>>()
    }
}

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_map() {
            Some(map) => f.debug_tuple("Record").field(map).finish(),
            None => f.write_str("Record(<typed>)"),
        }
    }
}

/// Decode one result row into a concrete record shape.
///
/// Implementations use the typed `Row` getters; a shape mismatch surfaces
/// as `AcornError::Decode` and the registry attaches the record type name
/// on the way out.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> Result<Self>;
}

/// Decode function registered for one record type name
pub type RecordDecoder = Arc<dyn Fn(&Row) -> Result<Record> + Send + Sync>;

/// A record type the registry has resolved for a cursor.
#[derive(Clone)]
pub struct ResolvedRecordType {
    name: String,
    decoder: RecordDecoder,
}

impl ResolvedRecordType {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decode a row, attaching this record type's name to decode failures.
    pub fn decode(&self, row: &Row) -> Result<Record> {
        (self.decoder)(row).map_err(|e| e.for_record_type(&self.name))
    }
}

impl fmt::Debug for ResolvedRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRecordType")
            .field("name", &self.name)
            .finish()
    }
}

/// Registry of record decoders, keyed by fully qualified type name.
///
/// A name is fully qualified when it contains the `.` separator; bare
/// names are prefixed with the configured record namespace, mirroring how
/// result rows name their target record types at call sites.
pub struct RecordRegistry {
    namespace: String,
    decoders: HashMap<String, RecordDecoder>,
}

impl RecordRegistry {
    /// Namespace separator in qualified record type names
    pub const SEPARATOR: char = '.';

    /// Name under which `resolve(None)` reports the default column-map
    /// decoding
    pub const DEFAULT: &'static str = "map";

    /// Create a registry rooted at `namespace`.
    ///
    /// A non-empty namespace is normalized to end with the separator, so
    /// `"app.records"` and `"app.records."` configure the same registry.
    pub fn new(namespace: &str) -> Self {
        let namespace = if namespace.is_empty() || namespace.ends_with(Self::SEPARATOR) {
            namespace.to_string()
        } else {
            format!("{namespace}{}", Self::SEPARATOR)
        };
        Self {
            namespace,
            decoders: HashMap::new(),
        }
    }

    /// Qualify a record type name: bare names get the namespace prefix,
    /// already-qualified names pass through unchanged.
    pub fn qualify(&self, name: &str) -> String {
        if name.contains(Self::SEPARATOR) {
            name.to_string()
        } else {
            format!("{}{}", self.namespace, name)
        }
    }

    /// Register a `FromRow` record type under `name`
    pub fn register<T>(&mut self, name: &str)
    where
        T: FromRow + Any + Send + Sync,
    {
        self.register_with(name, Arc::new(|row| T::from_row(row).map(Record::new)));
    }

    /// Register an arbitrary decode function under `name`
    pub fn register_with(&mut self, name: &str, decoder: RecordDecoder) {
        let qualified = self.qualify(name);
        tracing::debug!(record_type = %qualified, "registering record decoder");
        self.decoders.insert(qualified, decoder);
    }

    /// Check whether a decoder is registered under `name` (after
    /// qualification)
    pub fn has(&self, name: &str) -> bool {
        self.decoders.contains_key(&self.qualify(name))
    }

    /// Resolve the decoder for a cursor.
    ///
    /// `None` selects the default column-map decoding; named types must
    /// have been registered.
    pub fn resolve(&self, record_type: Option<&str>) -> Result<ResolvedRecordType> {
        match record_type {
            None => Ok(ResolvedRecordType {
                name: Self::DEFAULT.to_string(),
                decoder: Arc::new(|row| Ok(Record::new(row.to_map()))),
            }),
            Some(name) => {
                let qualified = self.qualify(name);
                let decoder = self
                    .decoders
                    .get(&qualified)
                    .cloned()
                    .ok_or_else(|| AcornError::UnknownRecordType(qualified.clone()))?;
                Ok(ResolvedRecordType {
                    name: qualified,
                    decoder,
                })
            }
        }
    }
}

impl Default for RecordRegistry {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: i64,
        name: String,
    }

    impl FromRow for Pair {
        fn from_row(row: &Row) -> Result<Self> {
            Ok(Self {
                id: row.i64("id")?,
                name: row.str("name")?.to_string(),
            })
        }
    }

    fn pair_row() -> Row {
        Row::new(
            vec!["id".into(), "name".into()],
            vec![Value::Int64(3), Value::String("ada".into())],
        )
    }

    #[test]
    fn qualify_prefixes_bare_names_only() {
        let registry = RecordRegistry::new("app.records");
        assert_eq!(registry.qualify("User"), "app.records.User");
        assert_eq!(registry.qualify("other.ns.User"), "other.ns.User");
    }

    #[test]
    fn namespace_separator_is_normalized() {
        let with = RecordRegistry::new("app.records.");
        let without = RecordRegistry::new("app.records");
        assert_eq!(with.qualify("User"), without.qualify("User"));
        assert_eq!(RecordRegistry::new("").qualify("User"), "User");
    }

    #[test]
    fn resolve_none_yields_map_decoder() {
        let registry = RecordRegistry::default();
        let resolved = registry.resolve(None).unwrap();
        assert_eq!(resolved.name(), RecordRegistry::DEFAULT);

        let record = resolved.decode(&pair_row()).unwrap();
        let map = record.as_map().expect("default decoding is a column map");
        assert_eq!(map["id"], Value::Int64(3));
    }

    #[test]
    fn registered_type_decodes_and_downcasts() {
        let mut registry = RecordRegistry::new("app.records");
        registry.register::<Pair>("Pair");
        assert!(registry.has("Pair"));
        assert!(registry.has("app.records.Pair"));

        let resolved = registry.resolve(Some("Pair")).unwrap();
        assert_eq!(resolved.name(), "app.records.Pair");

        let record = resolved.decode(&pair_row()).unwrap();
        assert!(record.is::<Pair>());
        assert_eq!(
            record.downcast::<Pair>().unwrap(),
            Pair { id: 3, name: "ada".into() }
        );
    }

    #[test]
    fn unknown_record_type_fails_with_qualified_name() {
        let registry = RecordRegistry::new("app.records");
        let err = registry.resolve(Some("Ghost")).unwrap_err();
        assert!(matches!(
            err,
            AcornError::UnknownRecordType(name) if name == "app.records.Ghost"
        ));
    }

    #[test]
    fn decode_failures_carry_the_record_type_name() {
        let mut registry = RecordRegistry::new("app.records");
        registry.register::<Pair>("Pair");

        let short_row = Row::new(vec!["id".into()], vec![Value::Int64(3)]);
        let err = registry
            .resolve(Some("Pair"))
            .unwrap()
            .decode(&short_row)
            .unwrap_err();
        match err {
            AcornError::Decode { record_type, message } => {
                assert_eq!(record_type, "app.records.Pair");
                assert!(message.contains("missing column `name`"));
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn downcast_mismatch_returns_the_record() {
        let record = Record::new(Pair { id: 1, name: "x".into() });
        let back = record.downcast::<String>().unwrap_err();
        assert!(back.is::<Pair>());
    }
}
