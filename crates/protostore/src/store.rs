//! The storage engine
//!
//! [`Store`] wraps an embedded `redb` database and keeps one table per
//! record type, named by the type's fully-qualified schema name. Every
//! public operation runs in exactly one transaction, so operations are
//! atomic with respect to each other; the engine serializes writers and
//! gives readers snapshot isolation, and this layer adds no locking of its
//! own. Calls block until the underlying transaction commits or aborts.

use std::path::Path;

use prost::Message;
use redb::{backends::InMemoryBackend, Database, ReadableTable, TableDefinition, TableError};
use tracing::{debug, trace};

use crate::entity::Entity;
use crate::error::{Error, Result};

/// The namespace table for a record type.
fn table<T: Entity>() -> TableDefinition<'static, &'static [u8], &'static [u8]> {
    TableDefinition::new(T::TYPE_NAME)
}

/// Embedded store persisting one namespace per record type.
///
/// Keys within a namespace are the records' encoded primary keys, unique by
/// construction; values are the records' canonical protobuf bytes.
///
/// # Examples
///
/// ```ignore
/// let store = Store::open("app.redb")?;
/// store.init::<User>()?;
/// store.save(&User { id: 7, name: "alice".into() })?;
/// ```
pub struct Store {
    db: Database,
}

impl Store {
    /// Open the database file at `path`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot open or create the file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path)?;
        Ok(Self { db })
    }

    /// Open a transient in-memory store. Nothing survives drop; intended
    /// for tests and scratch data.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to initialize the backend.
    pub fn in_memory() -> Result<Self> {
        let db = Database::builder().create_with_backend(InMemoryBackend::new())?;
        Ok(Self { db })
    }

    /// Wrap an already-open engine handle.
    #[must_use]
    pub fn from_database(db: Database) -> Self {
        Self { db }
    }

    /// Idempotently create the namespace for record type `T`.
    ///
    /// Runs in its own write transaction; initializing several types is a
    /// sequence of independent transactions, and a failure partway leaves
    /// earlier namespaces created.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to create the table or commit.
    pub fn init<T: Entity>(&self) -> Result<()> {
        debug!(target: "protostore::store", namespace = T::TYPE_NAME, "ensuring namespace");
        let txn = self.db.begin_write()?;
        txn.open_table(table::<T>())?;
        txn.commit()?;
        Ok(())
    }

    /// Look up `record`'s primary key and decode the stored bytes into it.
    ///
    /// # Errors
    ///
    /// - [`Error::NotFound`] if the key is absent (a namespace that was
    ///   never initialized counts as empty, never as a decode failure).
    /// - [`Error::Decode`] if the stored bytes are malformed.
    /// - Engine errors for transaction failures.
    pub fn get<T: Entity>(&self, record: &mut T) -> Result<()> {
        let key = record.primary_key();
        trace!(target: "protostore::store", namespace = T::TYPE_NAME, "get");
        let txn = self.db.begin_read()?;
        let tbl = match txn.open_table(table::<T>()) {
            Ok(tbl) => tbl,
            Err(TableError::TableDoesNotExist(_)) => return Err(Error::NotFound {
                namespace: T::TYPE_NAME,
            }),
            Err(err) => return Err(err.into()),
        };
        let Some(value) = tbl.get(key.as_slice())? else {
            return Err(Error::NotFound {
                namespace: T::TYPE_NAME,
            });
        };
        *record = T::decode(value.value())?;
        Ok(())
    }

    /// Upsert `record` under its primary key.
    ///
    /// The record is serialized before any transaction is opened; a codec
    /// failure leaves storage untouched. The single-key write then either
    /// commits fully or not at all.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the engine fails to
    /// write or commit.
    pub fn save<T: Entity>(&self, record: &T) -> Result<()> {
        let bytes = record.encode_to_vec();
        let key = record.primary_key();
        debug!(
            target: "protostore::store",
            namespace = T::TYPE_NAME,
            len = bytes.len(),
            "save"
        );
        let txn = self.db.begin_write()?;
        {
            let mut tbl = txn.open_table(table::<T>())?;
            tbl.insert(key.as_slice(), bytes.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Remove `record`'s primary key from its namespace.
    ///
    /// Idempotent: deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to write or commit.
    pub fn delete<T: Entity>(&self, record: &T) -> Result<()> {
        let key = record.primary_key();
        debug!(target: "protostore::store", namespace = T::TYPE_NAME, "delete");
        let txn = self.db.begin_write()?;
        {
            let mut tbl = txn.open_table(table::<T>())?;
            tbl.remove(key.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Visit every record in `T`'s namespace in ascending byte order of the
    /// encoded primary key.
    ///
    /// Each row is decoded into `template`, which is reused across
    /// iterations; the callback borrows it for the duration of one call and
    /// cannot retain it. A callback error stops iteration immediately and
    /// is returned; the read-only transaction guarantees nothing was
    /// mutated either way. A namespace that was never initialized iterates
    /// zero rows.
    ///
    /// # Errors
    ///
    /// Returns the callback's error, a decode error for a malformed row, or
    /// an engine error.
    pub fn for_each<T, F>(&self, template: &mut T, mut f: F) -> Result<()>
    where
        T: Entity,
        F: FnMut(&T) -> Result<()>,
    {
        trace!(target: "protostore::store", namespace = T::TYPE_NAME, "scan");
        let txn = self.db.begin_read()?;
        let tbl = match txn.open_table(table::<T>()) {
            Ok(tbl) => tbl,
            Err(TableError::TableDoesNotExist(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in tbl.iter()? {
            let (_, value) = entry?;
            *template = T::decode(value.value())?;
            f(template)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
