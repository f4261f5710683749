//! Output directory layout and file writing.
//!
//! The layout is fixed: per-kind subdirectories under the results root
//! (flattened when `no_configs` is set), the module file at the root, and
//! the optional index inside the model directory. Writes are full
//! overwrite; rerunning is safe and replaces previous output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GenerationOptions;
use crate::error::Result;

/// Extension carried by every generated artifact.
pub const ARTIFACT_EXT: &str = "ts";

/// Resolved destination directories for one run.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    results: PathBuf,
    models: PathBuf,
    dtos: PathBuf,
    services: PathBuf,
    controllers: PathBuf,
}

impl OutputLayout {
    /// Resolve the layout from the configured results root.
    #[must_use]
    pub fn resolve(options: &GenerationOptions) -> Self {
        let results = options.results_path.clone();
        if options.no_configs {
            Self {
                models: results.clone(),
                dtos: results.clone(),
                services: results.clone(),
                controllers: results.clone(),
                results,
            }
        } else {
            Self {
                models: results.join("models"),
                dtos: results.join("dtos"),
                services: results.join("services"),
                controllers: results.join("controllers"),
                results,
            }
        }
    }

    /// Create every directory of the layout. Idempotent; an already
    /// existing directory is not an error.
    pub fn ensure(&self) -> Result<()> {
        for dir in [
            &self.results,
            &self.models,
            &self.dtos,
            &self.services,
            &self.controllers,
        ] {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn results(&self) -> &Path {
        &self.results
    }

    #[must_use]
    pub fn models(&self) -> &Path {
        &self.models
    }

    #[must_use]
    pub fn dtos(&self) -> &Path {
        &self.dtos
    }

    #[must_use]
    pub fn services(&self) -> &Path {
        &self.services
    }

    #[must_use]
    pub fn controllers(&self) -> &Path {
        &self.controllers
    }

    /// Raw base name of the module artifact: the terminal path segment of
    /// the results root.
    #[must_use]
    pub fn module_base(&self) -> String {
        self.results
            .file_name()
            .map_or_else(|| "app".to_owned(), |s| s.to_string_lossy().into_owned())
    }
}

/// Write one artifact, overwriting any previous content at `path`.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)?;
    Ok(())
}
