//! CONFIG_DB client abstraction.
//!
//! The configuration store is an external key-value database organized into
//! named tables of keyed field-maps. This module defines the table/entry
//! types, the [`ConfigDb`] trait consumed by the command handlers, a
//! Redis-backed implementation, and an in-memory mock used when the
//! unit-testing mode is active.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use crate::error::{CliError, CliResult};
use crate::tables::fields;

/// Redis URL of CONFIG_DB (database index 4).
pub const CONFIG_DB_URL: &str = "redis://127.0.0.1:6379/4";

/// Separator between key components in the wire encoding.
pub const KEY_SEPARATOR: char = '|';

/// Key-value tuple representing a field and its value.
pub type FieldValue = (String, String);

/// Collection of field-value pairs for a table entry.
pub type FieldValues = Vec<FieldValue>;

/// A table snapshot: entry key to field-value pairs.
pub type Table = BTreeMap<EntryKey, FieldValues>;

/// Helper trait for working with field-value collections.
pub trait FieldValuesExt {
    /// Gets the value for a field, if present.
    fn get_field(&self, field: &str) -> Option<&str>;

    /// Gets the value for a field, returning the default if not present.
    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str;

    /// Checks if a field exists.
    fn has_field(&self, field: &str) -> bool;
}

impl FieldValuesExt for FieldValues {
    fn get_field(&self, field: &str) -> Option<&str> {
        self.iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
    }

    fn get_field_or<'a>(&'a self, field: &str, default: &'a str) -> &'a str {
        self.get_field(field).unwrap_or(default)
    }

    fn has_field(&self, field: &str) -> bool {
        self.iter().any(|(f, _)| f == field)
    }
}

/// Builds a FieldValues collection from key-value pairs.
#[macro_export]
macro_rules! field_values {
    ($($field:expr => $value:expr),* $(,)?) => {
        vec![
            $(($field.to_string(), $value.to_string()),)*
        ]
    };
}

/// A table entry key: a single identifier or a composite of identifiers.
///
/// Composite keys are encoded on the wire by joining the components with
/// [`KEY_SEPARATOR`]. A simple key that happens to contain the separator
/// character is distinct from the equivalent composite key in memory; both
/// encode to the same wire key, which is what the legacy dual-format
/// membership deletion relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey(Vec<String>);

impl EntryKey {
    /// Creates a simple single-identifier key.
    pub fn simple(key: impl Into<String>) -> Self {
        EntryKey(vec![key.into()])
    }

    /// Creates a composite (group, member) key.
    pub fn composite(first: impl Into<String>, second: impl Into<String>) -> Self {
        EntryKey(vec![first.into(), second.into()])
    }

    /// Parses a wire-encoded key, splitting on [`KEY_SEPARATOR`].
    pub fn parse(raw: &str) -> Self {
        EntryKey(raw.split(KEY_SEPARATOR).map(str::to_string).collect())
    }

    /// Returns the key components.
    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Returns the first key component.
    pub fn first(&self) -> &str {
        self.0.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns the second key component of a composite key, if any.
    pub fn second(&self) -> Option<&str> {
        self.0.get(1).map(String::as_str)
    }

    /// Returns the wire encoding of the key.
    pub fn to_wire(&self) -> String {
        self.0.join(&KEY_SEPARATOR.to_string())
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

/// Client interface to the configuration store.
///
/// Consumed by the command handlers; implementations are the Redis-backed
/// [`RedisConfigDb`] and the in-memory [`MockConfigDb`].
#[async_trait]
pub trait ConfigDb: Send + Sync {
    /// Returns a snapshot of the named table. Missing table yields an
    /// empty snapshot.
    async fn get_table(&self, table: &str) -> CliResult<Table>;

    /// Returns the field-values of one entry; empty if absent.
    async fn get_entry(&self, table: &str, key: &EntryKey) -> CliResult<FieldValues>;

    /// Writes an entry. `Some(fvs)` sets the entry (replacing existing
    /// fields); `None` deletes it. Deleting a non-existent entry succeeds.
    async fn set_entry(&self, table: &str, key: &EntryKey, fvs: Option<FieldValues>)
        -> CliResult<()>;
}

fn wire_key(table: &str, key: &EntryKey) -> String {
    format!("{}{}{}", table, KEY_SEPARATOR, key.to_wire())
}

/// Entries set with no fields are stored with a placeholder so the key
/// exists in Redis.
fn placeholder() -> FieldValues {
    vec![(fields::NULL.to_string(), fields::NULL.to_string())]
}

/// Redis-backed CONFIG_DB client.
pub struct RedisConfigDb {
    conn: redis::aio::ConnectionManager,
}

impl RedisConfigDb {
    /// Connects to CONFIG_DB at the given Redis URL.
    pub async fn connect(url: &str) -> CliResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| CliError::database("connect", e.to_string()))?;
        let conn = client
            .get_connection_manager()
            .await
            .map_err(|e| CliError::database("connect", e.to_string()))?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl ConfigDb for RedisConfigDb {
    async fn get_table(&self, table: &str) -> CliResult<Table> {
        let mut conn = self.conn.clone();
        let pattern = format!("{}{}*", table, KEY_SEPARATOR);
        let keys: Vec<String> = conn
            .keys(&pattern)
            .await
            .map_err(|e| CliError::database("keys", e.to_string()))?;

        let prefix = format!("{}{}", table, KEY_SEPARATOR);
        let mut snapshot = Table::new();
        for raw in keys {
            let Some(suffix) = raw.strip_prefix(&prefix) else {
                continue;
            };
            let fields: HashMap<String, String> = conn
                .hgetall(&raw)
                .await
                .map_err(|e| CliError::database("hgetall", e.to_string()))?;
            snapshot.insert(EntryKey::parse(suffix), fields.into_iter().collect());
        }
        Ok(snapshot)
    }

    async fn get_entry(&self, table: &str, key: &EntryKey) -> CliResult<FieldValues> {
        let mut conn = self.conn.clone();
        let fields: HashMap<String, String> = conn
            .hgetall(wire_key(table, key))
            .await
            .map_err(|e| CliError::database("hgetall", e.to_string()))?;
        Ok(fields.into_iter().collect())
    }

    async fn set_entry(
        &self,
        table: &str,
        key: &EntryKey,
        fvs: Option<FieldValues>,
    ) -> CliResult<()> {
        let mut conn = self.conn.clone();
        let raw = wire_key(table, key);

        // Replace semantics: clear the hash before setting new fields.
        let _: () = conn
            .del(&raw)
            .await
            .map_err(|e| CliError::database("del", e.to_string()))?;

        if let Some(fvs) = fvs {
            let fvs = if fvs.is_empty() { placeholder() } else { fvs };
            debug!(key = %raw, "Setting CONFIG_DB entry");
            let _: () = conn
                .hset_multiple(&raw, &fvs)
                .await
                .map_err(|e| CliError::database("hset", e.to_string()))?;
        } else {
            debug!(key = %raw, "Deleted CONFIG_DB entry");
        }
        Ok(())
    }
}

/// One write issued against the mock store, in issue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteRecord {
    /// Table name.
    pub table: String,
    /// Entry key as issued by the handler.
    pub key: EntryKey,
    /// `Some` for a set, `None` for a delete.
    pub fvs: Option<FieldValues>,
}

/// In-memory CONFIG_DB used in unit-testing mode and by tests.
///
/// Records every write in issue order so tests can assert on write
/// sequences (e.g., the dual-format membership deletion).
#[derive(Default)]
pub struct MockConfigDb {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    tables: HashMap<String, Table>,
    writes: Vec<WriteRecord>,
}

impl MockConfigDb {
    /// Creates an empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry without recording a write.
    pub fn seed(&self, table: &str, key: EntryKey, fvs: FieldValues) {
        if let Ok(mut state) = self.state.lock() {
            state
                .tables
                .entry(table.to_string())
                .or_default()
                .insert(key, fvs);
        }
    }

    /// Returns the current field-values of an entry, if present.
    pub fn entry(&self, table: &str, key: &EntryKey) -> Option<FieldValues> {
        self.state
            .lock()
            .ok()
            .and_then(|state| state.tables.get(table).and_then(|t| t.get(key).cloned()))
    }

    /// Returns all writes issued so far, in order.
    pub fn writes(&self) -> Vec<WriteRecord> {
        self.state
            .lock()
            .map(|state| state.writes.clone())
            .unwrap_or_default()
    }

    fn locked(&self) -> CliResult<std::sync::MutexGuard<'_, MockState>> {
        self.state
            .lock()
            .map_err(|_| CliError::database("lock", "mock store state poisoned"))
    }
}

#[async_trait]
impl ConfigDb for MockConfigDb {
    async fn get_table(&self, table: &str) -> CliResult<Table> {
        Ok(self.locked()?.tables.get(table).cloned().unwrap_or_default())
    }

    async fn get_entry(&self, table: &str, key: &EntryKey) -> CliResult<FieldValues> {
        Ok(self
            .locked()?
            .tables
            .get(table)
            .and_then(|t| t.get(key).cloned())
            .unwrap_or_default())
    }

    async fn set_entry(
        &self,
        table: &str,
        key: &EntryKey,
        fvs: Option<FieldValues>,
    ) -> CliResult<()> {
        let mut state = self.locked()?;
        state.writes.push(WriteRecord {
            table: table.to_string(),
            key: key.clone(),
            fvs: fvs.clone(),
        });
        match fvs {
            Some(fvs) => {
                let fvs = if fvs.is_empty() { placeholder() } else { fvs };
                state
                    .tables
                    .entry(table.to_string())
                    .or_default()
                    .insert(key.clone(), fvs);
            }
            None => {
                // Idempotent delete.
                if let Some(t) = state.tables.get_mut(table) {
                    t.remove(key);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_wire_roundtrip() {
        let key = EntryKey::composite("PortChannel0001", "Ethernet0");
        assert_eq!(key.to_wire(), "PortChannel0001|Ethernet0");
        assert_eq!(EntryKey::parse("PortChannel0001|Ethernet0"), key);
        assert_eq!(key.first(), "PortChannel0001");
        assert_eq!(key.second(), Some("Ethernet0"));
    }

    #[test]
    fn test_entry_key_simple_vs_composite() {
        // Same wire encoding, different in-memory keys.
        let simple = EntryKey::simple("PortChannel0001|Ethernet0");
        let composite = EntryKey::composite("PortChannel0001", "Ethernet0");
        assert_eq!(simple.to_wire(), composite.to_wire());
        assert_ne!(simple, composite);
        assert_eq!(simple.second(), None);
    }

    #[test]
    fn test_field_values_ext() {
        let fvs: FieldValues = field_values! {
            "mtu" => "9100",
            "admin_status" => "up",
        };
        assert_eq!(fvs.get_field("mtu"), Some("9100"));
        assert_eq!(fvs.get_field("nonexistent"), None);
        assert_eq!(fvs.get_field_or("nonexistent", "default"), "default");
        assert!(fvs.has_field("admin_status"));
    }

    #[tokio::test]
    async fn test_mock_set_get() {
        let db = MockConfigDb::new();
        let key = EntryKey::simple("PortChannel0001");
        db.set_entry("PORTCHANNEL", &key, Some(field_values! { "mtu" => "9100" }))
            .await
            .unwrap();

        let entry = db.get_entry("PORTCHANNEL", &key).await.unwrap();
        assert_eq!(entry.get_field("mtu"), Some("9100"));

        let table = db.get_table("PORTCHANNEL").await.unwrap();
        assert!(table.contains_key(&key));
    }

    #[tokio::test]
    async fn test_mock_delete_is_idempotent() {
        let db = MockConfigDb::new();
        let key = EntryKey::simple("PortChannel0001");
        db.set_entry("PORTCHANNEL", &key, None).await.unwrap();
        db.set_entry("PORTCHANNEL", &key, None).await.unwrap();
        assert_eq!(db.writes().len(), 2);
        assert!(db.get_table("PORTCHANNEL").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mock_empty_fields_get_placeholder() {
        let db = MockConfigDb::new();
        let key = EntryKey::simple("Vlan100");
        db.set_entry("VLAN", &key, Some(vec![])).await.unwrap();
        let entry = db.get_entry("VLAN", &key).await.unwrap();
        assert_eq!(entry.get_field("NULL"), Some("NULL"));
    }

    #[tokio::test]
    async fn test_mock_missing_table_is_empty() {
        let db = MockConfigDb::new();
        assert!(db.get_table("MIRROR_SESSION").await.unwrap().is_empty());
        let entry = db
            .get_entry("PORT", &EntryKey::simple("Ethernet0"))
            .await
            .unwrap();
        assert!(entry.is_empty());
    }
}
