//! Accessor module generation
//!
//! One schema file in, at most one generated Rust module out. The module
//! holds, per qualifying message, an `Entity` impl (namespace name + key
//! encoding in field-number order) and a `{Name}Repository` binding the
//! store operations to that type. Emission goes through `quote`; the
//! resulting text is unformatted by design, formatting belongs to the build
//! pipeline.

use std::path::{Path, PathBuf};

use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::descriptor::EntityDescriptor;
use crate::error::SchemaError;
use crate::schema::{FieldSchema, ScalarType, SchemaFile};

/// Header line prepended to every generated module.
const HEADER: &str = "// Code generated by protostore-build. Do not edit.";

/// Extension the input path's own extension is replaced with.
const OUTPUT_EXT: &str = "storage.rs";

/// One generated source artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Output path, derived from the input path by extension substitution.
    pub path: PathBuf,
    /// Generated module text.
    pub content: String,
}

/// The result of generating one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// The input schema file path.
    pub input: PathBuf,
    /// `Ok(None)` when the file has no qualifying message.
    pub result: Result<Option<GeneratedFile>, SchemaError>,
}

/// Generate the accessor module for one schema file.
///
/// Returns `Ok(None)` when the file defines no messages, or none of its
/// messages has a primary-key field. Output is deterministic: the same
/// input yields byte-identical text.
///
/// # Errors
///
/// The first [`SchemaError`] among the file's messages, in declaration
/// order.
pub fn generate(file: &SchemaFile) -> Result<Option<GeneratedFile>, SchemaError> {
    let mut entities = Vec::new();
    for message in &file.messages {
        if let Some(desc) = EntityDescriptor::build(message, &file.package)? {
            entities.push(desc);
        }
    }
    if entities.is_empty() {
        return Ok(None);
    }

    let mut tokens = TokenStream::new();
    for entity in &entities {
        tokens.extend(entity_tokens(entity));
    }

    Ok(Some(GeneratedFile {
        path: output_path(&file.path),
        content: format!("{HEADER}\n\n{tokens}\n"),
    }))
}

/// Generate every schema file, isolating failures per file.
///
/// One invalid file does not suppress output for the others; callers get
/// one [`FileOutcome`] per input, in input order, and decide whether any
/// error fails the build.
pub fn generate_all<'a, I>(files: I) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = &'a SchemaFile>,
{
    files
        .into_iter()
        .map(|file| FileOutcome {
            input: file.path.clone(),
            result: generate(file),
        })
        .collect()
}

fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXT)
}

fn entity_tokens(entity: &EntityDescriptor) -> TokenStream {
    let message = format_ident!("{}", entity.type_name.to_case(Case::Pascal));
    let repository = format_ident!("{}Repository", entity.type_name.to_case(Case::Pascal));
    let full_name = &entity.full_name;
    let pushes = entity.key_fields.iter().map(key_push_tokens);

    quote! {
        impl ::protostore::Entity for #message {
            const TYPE_NAME: &'static str = #full_name;

            fn primary_key(&self) -> ::std::vec::Vec<u8> {
                let mut key = ::protostore::KeyBuf::new();
                #(#pushes)*
                key.finish()
            }
        }

        /// Typed storage accessors bound to a [`::protostore::Store`].
        pub struct #repository<'a> {
            store: &'a ::protostore::Store,
        }

        impl<'a> #repository<'a> {
            pub fn new(store: &'a ::protostore::Store) -> Self {
                Self { store }
            }

            pub fn init(&self) -> ::protostore::Result<()> {
                self.store.init::<#message>()
            }

            pub fn get(&self, record: &mut #message) -> ::protostore::Result<()> {
                self.store.get(record)
            }

            pub fn save(&self, record: &#message) -> ::protostore::Result<()> {
                self.store.save(record)
            }

            pub fn delete(&self, record: &#message) -> ::protostore::Result<()> {
                self.store.delete(record)
            }

            pub fn for_each<F>(&self, template: &mut #message, f: F) -> ::protostore::Result<()>
            where
                F: FnMut(&#message) -> ::protostore::Result<()>,
            {
                self.store.for_each(template, f)
            }
        }
    }
}

fn key_push_tokens(field: &FieldSchema) -> TokenStream {
    let ident = format_ident!("{}", field.name.to_case(Case::Snake));
    match field.scalar {
        ScalarType::String => quote! { key.push_str(&self.#ident); },
        ScalarType::Bool => quote! { key.push_bool(self.#ident); },
        // prost represents enum fields as their i32 number.
        ScalarType::Enum | ScalarType::Int32 => quote! { key.push_int(i64::from(self.#ident)); },
        ScalarType::Int64 => quote! { key.push_int(self.#ident); },
        ScalarType::UInt32 => quote! { key.push_uint(u64::from(self.#ident)); },
        ScalarType::UInt64 => quote! { key.push_uint(self.#ident); },
        // The descriptor builder rejects everything else before emission;
        // reaching this arm is a bug in this crate, not bad input.
        other => unreachable!("key encoding requested for rejected type {other}"),
    }
}
