//! Generation options.
//!
//! All style tokens are parsed fallibly at this boundary; once an options
//! value exists, every combination it can hold is legal.

use std::path::PathBuf;

use serde::Deserialize;

use crate::naming::{
    EntityCase, ExportType, FileCase, NamingPolicy, PropertyCase, StrictMode, Visibility,
};
use crate::render::Eol;

/// Options for one generation run. Immutable for the run's duration.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationOptions {
    /// Root of the generated directory tree.
    pub results_path: PathBuf,
    /// Skip the per-kind subdirectory layout and write everything at the
    /// results root.
    #[serde(default)]
    pub no_configs: bool,
    /// Emit an aggregate index file inside the model directory.
    #[serde(default)]
    pub index_file: bool,
    #[serde(default)]
    pub convert_case_file: FileCase,
    #[serde(default)]
    pub convert_case_entity: EntityCase,
    #[serde(default)]
    pub convert_case_property: PropertyCase,
    #[serde(default)]
    pub convert_eol: Eol,
    /// Wrap related-type expressions in a deferred `Promise<...>`.
    #[serde(default)]
    pub lazy: bool,
    #[serde(default)]
    pub property_visibility: Visibility,
    #[serde(default)]
    pub export_type: ExportType,
    #[serde(default)]
    pub strict_mode: StrictMode,
}

impl GenerationOptions {
    /// Options with defaults for everything but the output root.
    #[must_use]
    pub fn new(results_path: impl Into<PathBuf>) -> Self {
        Self {
            results_path: results_path.into(),
            no_configs: false,
            index_file: false,
            convert_case_file: FileCase::default(),
            convert_case_entity: EntityCase::default(),
            convert_case_property: PropertyCase::default(),
            convert_eol: Eol::default(),
            lazy: false,
            property_visibility: Visibility::default(),
            export_type: ExportType::default(),
            strict_mode: StrictMode::default(),
        }
    }

    /// The naming policy induced by these options.
    #[must_use]
    pub const fn naming(&self) -> NamingPolicy {
        NamingPolicy {
            entity_case: self.convert_case_entity,
            file_case: self.convert_case_file,
            property_case: self.convert_case_property,
            visibility: self.property_visibility,
            export_type: self.export_type,
            strict_mode: self.strict_mode,
            lazy: self.lazy,
        }
    }
}
