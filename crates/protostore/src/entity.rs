//! The capability a record type needs to be persistable
//!
//! `protostore-build` emits one [`Entity`] impl per annotated message; the
//! trait can just as well be written by hand (the integration tests do).

use prost::Message;

/// A protobuf record that can be stored under a derived primary key.
///
/// The supertraits supply the codec: `prost::Message` gives the canonical
/// byte encoding, `Default` gives the empty value `Get`/`ForEach` decode
/// into. Implementations add the two pieces the codec cannot derive:
///
/// - [`Entity::TYPE_NAME`], the fully-qualified schema name. It identifies
///   the record's namespace in the store, so it must be unique per type and
///   stable across releases.
/// - [`Entity::primary_key`], the encoded composite key. Implementations
///   push one token per annotated field, in ascending field-number order,
///   through a [`crate::KeyBuf`].
///
/// The store never retains a record beyond the operation it was passed to.
pub trait Entity: Message + Default {
    /// Fully-qualified schema name, e.g. `"acme.v1.User"`.
    const TYPE_NAME: &'static str;

    /// Encode this record's primary key.
    ///
    /// Must be a pure function of the record's annotated key fields: two
    /// records with equal key fields must produce identical bytes.
    fn primary_key(&self) -> Vec<u8>;
}
