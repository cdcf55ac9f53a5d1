//! Build-time accessor generation for protostore
//!
//! Given the field metadata of protobuf messages (name, field number, scalar
//! type, and a primary-key annotation), this crate derives one entity
//! descriptor per persistable message and emits one Rust accessor module per
//! schema file:
//! - [`schema`]: the read-only input model supplied by the schema system
//! - [`descriptor`]: primary-key field selection, validation and ordering
//! - [`generate`]: code emission and per-file generation outcomes
//!
//! Generation is deterministic: identical schema input yields byte-identical
//! output. Formatting of the emitted text is left to the build pipeline.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod error;
pub mod generate;
pub mod schema;

pub use descriptor::EntityDescriptor;
pub use error::SchemaError;
pub use generate::{generate, generate_all, FileOutcome, GeneratedFile};
pub use schema::{FieldSchema, MessageSchema, ScalarType, SchemaFile};
