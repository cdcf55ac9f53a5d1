//! Read-only schema input model
//!
//! The descriptor system that parses `.proto` files is an external
//! collaborator; it hands this crate one [`SchemaFile`] per input, already
//! resolved to the shape below. Nothing here is mutated after construction.

use std::fmt;
use std::path::PathBuf;

/// Protobuf scalar kind of a field.
///
/// Only a subset is accepted for primary-key fields; see
/// [`ScalarType::key_encodable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `string`
    String,
    /// `bool`
    Bool,
    /// An `enum` type (encoded as its i32 number)
    Enum,
    /// `int32` / `sint32` / `sfixed32`
    Int32,
    /// `int64` / `sint64` / `sfixed64`
    Int64,
    /// `uint32` / `fixed32`
    UInt32,
    /// `uint64` / `fixed64`
    UInt64,
    /// `bytes`
    Bytes,
    /// `float`
    Float,
    /// `double`
    Double,
    /// An embedded message (including map entries)
    Message,
}

impl ScalarType {
    /// True if values of this type have a canonical key-token encoding.
    #[must_use]
    pub fn key_encodable(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Bool
                | Self::Enum
                | Self::Int32
                | Self::Int64
                | Self::UInt32
                | Self::UInt64
        )
    }

    /// The protobuf spelling, used in error messages.
    #[must_use]
    pub fn proto_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "bool",
            Self::Enum => "enum",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::UInt32 => "uint32",
            Self::UInt64 => "uint64",
            Self::Bytes => "bytes",
            Self::Float => "float",
            Self::Double => "double",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.proto_name())
    }
}

/// One field of a message, as reported by the schema system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Field name as declared in the schema.
    pub name: String,
    /// Field number; unique within the message and stable across schema
    /// evolution. Composite keys are ordered by this, not by declaration
    /// order.
    pub ordinal: u32,
    /// Scalar kind of the field.
    pub scalar: ScalarType,
    /// True for `repeated` fields (never key-encodable).
    pub repeated: bool,
    /// True if the field carries the primary-key annotation.
    pub primary_key: bool,
}

impl FieldSchema {
    /// A singular, unannotated field.
    pub fn new(name: impl Into<String>, ordinal: u32, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            ordinal,
            scalar,
            repeated: false,
            primary_key: false,
        }
    }

    /// Mark the field as part of the primary key.
    #[must_use]
    pub fn as_primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark the field as `repeated`.
    #[must_use]
    pub fn as_repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// One message definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    /// Message type name as declared in the schema.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Construct a message schema.
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// One schema file, the unit of generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    /// Path of the schema file; the output path is derived from it.
    pub path: PathBuf,
    /// Dot-separated package, possibly empty.
    pub package: String,
    /// Message definitions in declaration order.
    pub messages: Vec<MessageSchema>,
}

impl SchemaFile {
    /// Construct a schema file.
    pub fn new(
        path: impl Into<PathBuf>,
        package: impl Into<String>,
        messages: Vec<MessageSchema>,
    ) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            messages,
        }
    }
}
