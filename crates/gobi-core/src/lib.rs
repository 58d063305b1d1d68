//! gobi core - shared library behind the `gobi` binary
//!
//! gobi creates boilerplate Go projects (command line apps, packages and web
//! apps) under `$GOPATH/src` from a small set of templates.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Configuration** - filesystem paths and the user's JSON configuration,
//!   validated with [`datautil::valid`]
//! - **Projects** - naming rules, directory layout and creation
//! - **Templates** - manifest, embedded/local lookup, field rendering, copying
//! - **Messages** - colored console output and command line errors
//!
//! # Feature Flags
//!
//! - `tui` (default): asks for a missing configuration on the terminal
//!
//! # Example Usage
//!
//! ```ignore
//! use gobi_core::{config, Project, ProjectKind, TemplateStore};
//!
//! let paths = config::Paths::from_env()?;
//! let user = config::ensure_config(&paths, false).await?;
//! let store = TemplateStore::embedded()?;
//! Project::new("net/http", ProjectKind::Pkg, &user)?
//!     .create(&paths.src, &store)
//!     .await?;
//! ```

pub mod config;
pub mod messages;
pub mod project;
pub mod templates;

// Re-export main types for convenience
pub use config::{ensure_config, Paths, UserConfig};
pub use messages::CommandLineError;
pub use project::{Layout, Project, ProjectKind};
pub use templates::{TemplateSource, TemplateStore};
