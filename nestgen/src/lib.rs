//! nestgen — deterministic schema-to-source artifact generator.
//!
//! Turns an in-memory relational-schema model ([`Entity`] with columns and
//! relations) into model, DTO, service, controller and module source
//! artifacts under a configurable naming and formatting policy. Given the
//! same schema and the same [`GenerationOptions`], output is byte-identical
//! across runs.
//!
//! Pipeline per artifact: filter ([`filter`]) → template render
//! ([`templates`]) → line-ending normalization → import pruning →
//! best-effort formatting ([`render`]) → write ([`output`]), orchestrated
//! by [`Generator`].

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod filter;
pub mod generator;
pub mod model;
pub mod naming;
pub mod output;
pub mod render;
pub mod templates;

pub use config::GenerationOptions;
pub use error::{Error, Result};
pub use generator::{ArtifactKind, GeneratedFile, Generator};
pub use model::{Column, ColumnOptions, Entity, JoinColumn, Relation, RelationType};
pub use naming::{
    EntityCase, ExportType, FileCase, NamingPolicy, PropertyCase, StrictMode, Visibility,
};
pub use render::{Eol, ExternalFormatter, FormatError, Formatter, NoopFormatter};
