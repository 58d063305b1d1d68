//! Template lookup, rendering, and copying
//!
//! This module provides:
//! - The template manifest (which files each kind of project gets)
//! - Template lookup from the embedded set or a local override directory
//! - Field substitution (`{{.Name}}`) in template contents and destinations
//! - Copying a rendered project onto disk

pub mod copier;
pub mod manifest;
pub mod render;
pub mod store;

use thiserror::Error;

pub use copier::copy_project;
pub use manifest::{FileEntry, KindManifest, Manifest, Root};
pub use render::render;
pub use store::{TemplateSource, TemplateStore};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template '{0}' not found")]
    NotFound(String),

    #[error("no templates for '{0}' projects")]
    MissingKind(String),

    #[error("template '{template}': unknown field '{field}'")]
    UnknownField { template: String, field: String },

    #[error("failed to parse template manifest: {0}")]
    Manifest(#[from] serde_yaml::Error),
}
