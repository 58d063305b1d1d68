//! Datautil - data typing and validation helpers
//!
//! This library converts user-entered strings into typed values under a
//! validation [`valid::Schema`]. It is used by `gobi` to sanity-check the
//! configuration form, but has no knowledge of projects or templates.
//!
//! # Modules
//!
//! - [`types`]: the [`Type`] tag recorded by a schema while checking a value
//! - [`valid`]: the schema, its pre/post checks, typed converters and extra validators
//! - `question`: validated terminal questions built on cliclack (feature-gated)
//!
//! # Feature Flags
//!
//! - `question` (default): Enables the cliclack-based question prompts
//!
//! # Example Usage
//!
//! ```
//! use datautil::valid::{self, Checker, Schema};
//!
//! let mut schema = Schema::new(Checker::REQUIRED | Checker::TRIM_SPACE);
//! assert_eq!(valid::string(&mut schema, " foo  ").unwrap(), "foo");
//!
//! schema.set_range(6, 66);
//! assert!(valid::int(&mut schema, "67").is_err());
//! ```

pub mod types;
pub mod valid;

#[cfg(feature = "question")]
pub mod question;

// Re-export main types for convenience
pub use types::Type;
pub use valid::{Checker, Schema};

#[cfg(feature = "question")]
pub use question::Question;
