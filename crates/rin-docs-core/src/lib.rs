//! Rin Docs Core - Foundation crate for the Rin documentation components.
//!
//! This crate provides shared types, error handling, configuration management,
//! and the host capability seam that the rendering crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based theme and logging configuration
//! - [`types`] - Shared newtypes and enums (`Annotation`, `LanguageTag`, `CopyStatus`,
//!   `CodeContent`)
//! - [`capabilities`] - Injected clipboard/selection capability of the hosting runtime
//! - [`logging`] - `tracing-subscriber` setup
//!
//! # Example
//!
//! ```rust
//! use rin_docs_core::{
//!     Annotation, ClipboardCapability, CodeContent, MemoryClipboard, RegionHandle,
//! };
//!
//! let tag = Annotation::new("language-python").language_tag();
//! assert_eq!(tag.as_str(), "python");
//!
//! let clipboard = MemoryClipboard::new();
//! let region = RegionHandle::for_content(&CodeContent::text("print(1)"));
//! clipboard.select_all(&region);
//! clipboard.copy_selection().expect("memory clipboard copies");
//! assert_eq!(clipboard.contents().as_deref(), Some("print(1)"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod capabilities;
pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use capabilities::{ClipboardCapability, MemoryClipboard, UnavailableClipboard};
pub use config::{DocsConfig, LoggingConfig, ThemeConfig};
pub use error::{ClipboardError, ConfigError, ConfigResult, DocsError, Result};
pub use types::{
    Annotation, CodeContent, ContentNode, CopyStatus, LanguageTag, RegionHandle, RegionId,
};
