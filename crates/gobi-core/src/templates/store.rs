//! Template lookup from the embedded set or a local directory
//!
//! The embedded templates are compiled into the binary, so gobi works from
//! any directory. A local directory overrides them file by file: a template
//! found there wins, anything missing falls back to the embedded copy. The
//! manifest follows the same rule.

use super::manifest::Manifest;
use super::TemplateError;
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const MANIFEST: &str = "template.yaml";

macro_rules! embed {
    ($($path:literal),* $(,)?) => {
        &[$(($path, include_str!(concat!("../../templates/", $path)))),*]
    };
}

static EMBEDDED: &[(&str, &str)] = embed![
    "template.yaml",
    "AUTHORS.tpl",
    "VERSION.tpl",
    "cl/README.md.tpl",
    "cl/proj.go.tpl",
    "pkg/README.md.tpl",
    "pkg/proj.go.tpl",
    "pkg/proj_test.go.tpl",
    "pkg/example.go.tpl",
    "web/README.md.tpl",
    "web/proj.go.tpl",
    "web/index.html",
    "web/style.css",
];

fn embedded(name: &str) -> Option<&'static str> {
    EMBEDDED
        .iter()
        .find(|(path, _)| *path == name)
        .map(|(_, content)| *content)
}

/// Template source - embedded, or a local directory overriding it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    pub fn from_override(dir: Option<&Path>) -> Self {
        match dir {
            Some(dir) => Self::Local(dir.to_path_buf()),
            None => Self::Embedded,
        }
    }
}

/// Template store - reads the manifest and template files from a source
#[derive(Debug, Clone)]
pub struct TemplateStore {
    source: TemplateSource,
    manifest: Manifest,
}

impl TemplateStore {
    /// Store over the embedded templates only
    pub fn embedded() -> Result<Self, TemplateError> {
        Ok(Self {
            source: TemplateSource::Embedded,
            manifest: embedded_manifest()?,
        })
    }

    /// Open a store, reading the local manifest when there is one
    pub async fn open(source: TemplateSource) -> Result<Self> {
        let manifest = match &source {
            TemplateSource::Embedded => embedded_manifest()?,
            TemplateSource::Local(dir) => {
                if !fs::metadata(dir).await.is_ok_and(|m| m.is_dir()) {
                    anyhow::bail!("Template directory not found: {}", dir.display());
                }

                let path = dir.join(MANIFEST);
                match fs::read_to_string(&path).await {
                    Ok(content) => Manifest::parse(&content)
                        .with_context(|| format!("Failed to parse {}", path.display()))?,
                    Err(e) if e.kind() == ErrorKind::NotFound => embedded_manifest()?,
                    Err(e) => {
                        return Err(e).with_context(|| format!("Failed to read {}", path.display()))
                    }
                }
            }
        };

        tracing::debug!(?source, kinds = manifest.kinds.len(), "opened template store");
        Ok(Self { source, manifest })
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Read a template, preferring the local directory
    pub async fn read(&self, template: &str) -> Result<String> {
        if let TemplateSource::Local(dir) = &self.source {
            let path = dir.join(template);
            match fs::read_to_string(&path).await {
                Ok(content) => {
                    tracing::debug!(path = %path.display(), "using local template");
                    return Ok(content);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to read template {}", path.display()))
                }
            }
        }

        embedded(template)
            .map(str::to_string)
            .ok_or_else(|| TemplateError::NotFound(template.to_string()).into())
    }
}

fn embedded_manifest() -> Result<Manifest, TemplateError> {
    let content = embedded(MANIFEST).ok_or_else(|| TemplateError::NotFound(MANIFEST.into()))?;
    Ok(Manifest::parse(content)?)
}
