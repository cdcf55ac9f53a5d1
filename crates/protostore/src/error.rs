//! Runtime error types
//!
//! One enum covers the full taxonomy: a missing key (`NotFound`), codec
//! failures (`Encode`/`Decode`), a caller-supplied iteration abort
//! (`Callback`), and the engine's own transaction/table/IO failures, which
//! are surfaced verbatim and never retried here.

use thiserror::Error;

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Runtime failures of the storage layer.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested primary key is absent from its namespace.
    ///
    /// Recoverable by design: callers commonly treat this as "create new".
    #[error("no record with the given primary key in namespace {namespace}")]
    NotFound {
        /// Fully-qualified name of the record type's namespace.
        namespace: &'static str,
    },

    /// A record failed to serialize to its canonical byte encoding.
    #[error("failed to encode record: {0}")]
    Encode(#[from] prost::EncodeError),

    /// Stored bytes failed to deserialize into the requested record type.
    ///
    /// Distinct from [`Error::NotFound`]: the key exists, its value is
    /// malformed (or the namespace holds a different type's records).
    #[error("failed to decode stored record: {0}")]
    Decode(#[from] prost::DecodeError),

    /// A `for_each` callback returned an error; iteration stopped there.
    #[error("iteration callback failed: {0}")]
    Callback(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The embedded engine failed to open or create the database.
    #[error(transparent)]
    Database(#[from] redb::DatabaseError),

    /// The embedded engine failed to begin a transaction.
    #[error(transparent)]
    Transaction(#[from] redb::TransactionError),

    /// The embedded engine failed to open a namespace table.
    #[error(transparent)]
    Table(#[from] redb::TableError),

    /// The embedded engine failed during a read or write.
    #[error(transparent)]
    Storage(#[from] redb::StorageError),

    /// The embedded engine failed to commit a write transaction.
    #[error(transparent)]
    Commit(#[from] redb::CommitError),
}

impl Error {
    /// Wrap an application error for returning out of a `for_each` callback.
    pub fn callback<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Callback(Box::new(err))
    }

    /// True if this is the recoverable missing-key condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
