//! Rin Docs code block.
//!
//! Renders fenced code with a language label and a copy-to-clipboard button
//! whose "✓ Copied!" confirmation reverts to "Copy" after 2000 ms.
//!
//! # Modules
//!
//! - [`widget`] - The [`AnnotatedCodeBlock`] component
//! - [`status`] - Copy status with a single cancellable revert timer
//! - [`render`] - Markup and scoped stylesheet (askama templates)
//! - [`mdx`] - `pre`/`code` overrides for the MDX pipeline
//!
//! # Example
//!
//! ```rust
//! use rin_docs_codeblock::{AnnotatedCodeBlock, CodeBlockProps, CopyOutcome};
//! use rin_docs_core::{CodeContent, MemoryClipboard};
//! use std::sync::Arc;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let clipboard = MemoryClipboard::new();
//! let block = AnnotatedCodeBlock::mount(
//!     CodeBlockProps::new(CodeContent::text("fn main() {}"), Some("language-rust")),
//!     Arc::new(clipboard.clone()),
//! )?;
//! let rendered = block.render()?;
//! block.attach_region(block.committed_region());
//!
//! assert_eq!(block.trigger_copy(), CopyOutcome::Copied);
//! assert_eq!(clipboard.contents().as_deref(), Some("fn main() {}"));
//! assert!(rendered.html.contains("Copy"));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod mdx;
pub mod render;
pub mod status;
pub mod widget;

pub use mdx::{MdxComponents, OverriddenElement};
pub use render::{RenderedBlock, Stylesheet};
pub use status::{CopyStatusTracker, REVERT_DELAY};
pub use widget::{AnnotatedCodeBlock, CodeBlockProps, CopyOutcome, ViewModel};
