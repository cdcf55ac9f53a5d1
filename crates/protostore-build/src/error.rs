//! Build-time error types

use thiserror::Error;

use crate::schema::ScalarType;

/// Schema validation failures found while building entity descriptors.
///
/// Each error names the offending message and field so the build pipeline
/// can point at the schema line to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A primary-key annotation sits on a field whose type has no canonical
    /// key-token encoding.
    #[error("message {message}: primary-key field {field} has unsupported type {scalar}")]
    UnsupportedKeyType {
        /// Message type name.
        message: String,
        /// Offending field name.
        field: String,
        /// The rejected scalar type.
        scalar: ScalarType,
    },

    /// A primary-key annotation sits on a `repeated` field.
    #[error("message {message}: repeated field {field} cannot be part of the primary key")]
    RepeatedKeyField {
        /// Message type name.
        message: String,
        /// Offending field name.
        field: String,
    },
}
