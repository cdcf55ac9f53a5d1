//! Runtime storage layer for protostore
//!
//! This crate persists protobuf records into an embedded, ordered, durable
//! key-value store (`redb`), one namespace (table) per record type:
//! - [`Entity`]: capability trait a record type needs to be persistable
//!   (protobuf codec + an encoded primary key)
//! - [`Store`]: the engine exposing init/get/save/delete/for_each, one
//!   transaction per operation
//! - [`key`]: scalar key-token encoding and the composite key layout
//! - [`Error`]: typed runtime failures (NotFound, codec, engine)
//!
//! Application code normally reaches this crate through accessor modules
//! emitted by `protostore-build`; the API is equally usable by hand.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity;
pub mod error;
pub mod key;
pub mod store;

pub use entity::Entity;
pub use error::{Error, Result};
pub use key::KeyBuf;
pub use store::Store;
