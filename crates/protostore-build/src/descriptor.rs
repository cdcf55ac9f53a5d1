//! Entity descriptor derivation
//!
//! A message qualifies as a persistable entity when at least one of its
//! fields carries the primary-key annotation. The descriptor fixes the
//! composite-key field order: ascending by field number, not declaration
//! order, so reordering fields in the schema source does not change the
//! on-disk key layout (reusing a field number does).

use crate::error::SchemaError;
use crate::schema::{FieldSchema, MessageSchema};

/// The derived description of one persistable message type.
///
/// Built once per message at generation time and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Message type name, e.g. `User`.
    pub type_name: String,
    /// Fully-qualified schema name, e.g. `acme.v1.User`; identifies the
    /// record type's namespace in the store.
    pub full_name: String,
    /// Primary-key fields, sorted ascending by field number.
    pub key_fields: Vec<FieldSchema>,
}

impl EntityDescriptor {
    /// Derive the descriptor for `message`, if it qualifies.
    ///
    /// Returns `Ok(None)` for messages with no annotated field — such
    /// messages are simply not persistable, which is not an error.
    /// Validation is per-message: a failure here says nothing about other
    /// messages in the same file.
    ///
    /// # Errors
    ///
    /// [`SchemaError`] if an annotated field is `repeated` or has a scalar
    /// type with no key-token encoding; the error names the field and type.
    pub fn build(message: &MessageSchema, package: &str) -> Result<Option<Self>, SchemaError> {
        let mut key_fields = Vec::new();

        for field in &message.fields {
            if !field.primary_key {
                continue;
            }
            if field.repeated {
                return Err(SchemaError::RepeatedKeyField {
                    message: message.name.clone(),
                    field: field.name.clone(),
                });
            }
            if !field.scalar.key_encodable() {
                return Err(SchemaError::UnsupportedKeyType {
                    message: message.name.clone(),
                    field: field.name.clone(),
                    scalar: field.scalar,
                });
            }
            key_fields.push(field.clone());
        }

        if key_fields.is_empty() {
            return Ok(None);
        }
        key_fields.sort_by_key(|f| f.ordinal);

        let full_name = if package.is_empty() {
            message.name.clone()
        } else {
            format!("{package}.{}", message.name)
        };

        Ok(Some(Self {
            type_name: message.name.clone(),
            full_name,
            key_fields,
        }))
    }
}
