//! The annotated code block component.
//!
//! A block shows host-supplied code, a language label derived from the fence
//! annotation, and a button that copies the rendered code through the
//! injected [`ClipboardCapability`]. Its only state is the copy status, which
//! reverts to idle on its own 2000 ms after a successful copy.

use crate::render::{render_block, RenderInput, RenderedBlock, Stylesheet};
use crate::status::CopyStatusTracker;
use rin_docs_core::{
    Annotation, ClipboardCapability, CodeContent, CopyStatus, DocsError, LanguageTag,
    RegionHandle, RegionId, Result, ThemeConfig,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Properties the host rendering pipeline passes to a code block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlockProps {
    /// Code payload, possibly empty
    #[serde(default)]
    pub content: CodeContent,
    /// Class annotation of the fence, e.g. `language-rust`
    #[serde(default)]
    pub class_name: Option<String>,
}

impl CodeBlockProps {
    /// Props for `content` annotated with `class_name`.
    #[must_use]
    pub fn new(content: CodeContent, class_name: Option<&str>) -> Self {
        Self {
            content,
            class_name: class_name.map(str::to_string),
        }
    }
}

/// What happened on a copy request. Failures are reported here and logged,
/// never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Content copied; status is now `Copied`
    Copied,
    /// No rendered region to copy from yet (or any more)
    Skipped,
    /// The host clipboard failed; status left as it was
    Failed,
}

/// What the reader currently sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewModel {
    /// Label text, uppercase, absent when there is no language tag
    pub label: Option<String>,
    /// Button text
    pub button_text: &'static str,
    /// Status behind the button text
    pub status: CopyStatus,
}

/// Code block with a language label and a copy-to-clipboard button.
///
/// Created per mount and never shared between blocks. Dropping the block
/// unmounts it.
pub struct AnnotatedCodeBlock {
    content: CodeContent,
    annotation: Option<Annotation>,
    language: LanguageTag,
    region_id: RegionId,
    region: Mutex<Option<RegionHandle>>,
    clipboard: Arc<dyn ClipboardCapability>,
    stylesheet: Stylesheet,
    status: CopyStatusTracker,
}

impl std::fmt::Debug for AnnotatedCodeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotatedCodeBlock")
            .field("language", &self.language)
            .field("region_id", &self.region_id)
            .field("status", &self.status.status())
            .finish_non_exhaustive()
    }
}

impl AnnotatedCodeBlock {
    /// Mount a block with the default theme.
    ///
    /// # Errors
    /// Returns [`DocsError::RuntimeUnavailable`] when called outside a tokio runtime.
    pub fn mount(props: CodeBlockProps, clipboard: Arc<dyn ClipboardCapability>) -> Result<Self> {
        Self::mount_with_stylesheet(props, clipboard, Stylesheet::new(ThemeConfig::default())?)
    }

    /// Mount a block styled by `theme`.
    pub fn mount_with_theme(
        props: CodeBlockProps,
        clipboard: Arc<dyn ClipboardCapability>,
        theme: ThemeConfig,
    ) -> Result<Self> {
        Self::mount_with_stylesheet(props, clipboard, Stylesheet::new(theme)?)
    }

    /// Mount a block sharing an already built stylesheet.
    pub fn mount_with_stylesheet(
        props: CodeBlockProps,
        clipboard: Arc<dyn ClipboardCapability>,
        stylesheet: Stylesheet,
    ) -> Result<Self> {
        let annotation = props.class_name.map(Annotation::new);
        let language = LanguageTag::from_annotation(annotation.as_ref());
        let status = CopyStatusTracker::new()?;

        let block = Self {
            content: props.content,
            annotation,
            language,
            region_id: RegionId::generate(),
            region: Mutex::new(None),
            clipboard,
            stylesheet,
            status,
        };
        tracing::debug!(
            region = %block.region_id,
            language = %block.language,
            "Code block mounted"
        );
        Ok(block)
    }

    /// The code payload.
    #[must_use]
    pub fn content(&self) -> &CodeContent {
        &self.content
    }

    /// Language tag, original case; empty when the fence had none.
    #[must_use]
    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    /// Identifier of the region this block renders into.
    #[must_use]
    pub fn region_id(&self) -> RegionId {
        self.region_id
    }

    /// Current copy status.
    #[must_use]
    pub fn copy_status(&self) -> CopyStatus {
        self.status.status()
    }

    /// Status changes, for hosts that re-render on updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CopyStatus> {
        self.status.subscribe()
    }

    /// The reader-visible state.
    #[must_use]
    pub fn view(&self) -> ViewModel {
        let status = self.copy_status();
        ViewModel {
            label: (!self.language.is_empty()).then(|| self.language.display_label()),
            button_text: status.button_text(),
            status,
        }
    }

    /// Render markup and scoped styling for the current status.
    pub fn render(&self) -> Result<RenderedBlock> {
        render_block(
            RenderInput {
                content: &self.content,
                annotation: self.annotation.as_ref(),
                language: &self.language,
                status: self.copy_status(),
                region_id: self.region_id,
            },
            &self.stylesheet,
        )
    }

    /// Handle a host gets once this block's markup is committed.
    #[must_use]
    pub fn committed_region(&self) -> RegionHandle {
        RegionHandle::new(self.region_id, self.content.rendered_text())
    }

    /// Give the block its rendered region to select from.
    ///
    /// Handles for another block's region are ignored.
    pub fn attach_region(&self, handle: RegionHandle) {
        if handle.id() != self.region_id {
            tracing::warn!(
                expected = %self.region_id,
                got = %handle.id(),
                "Ignoring region handle of another block"
            );
            return;
        }
        if self.status.is_disposed() {
            return;
        }
        *self.region_lock() = Some(handle);
    }

    /// Withdraw the rendered region.
    pub fn detach_region(&self) {
        self.region_lock().take();
    }

    /// Copy the rendered code to the clipboard.
    ///
    /// Without an attached region this does nothing. A clipboard failure is
    /// logged and leaves the status untouched.
    pub fn trigger_copy(&self) -> CopyOutcome {
        let Some(region) = self.region_lock().clone() else {
            tracing::debug!(region = %self.region_id, "Copy requested before region attached");
            return CopyOutcome::Skipped;
        };

        self.clipboard.clear_selection();
        self.clipboard.select_all(&region);
        let copied = self.clipboard.copy_selection();
        self.clipboard.clear_selection();

        match copied {
            Ok(()) => {
                self.status.mark_copied();
                tracing::debug!(region = %self.region_id, "Code block copied");
                CopyOutcome::Copied
            }
            Err(cause) => {
                let err = DocsError::ClipboardCopyFailed(cause);
                tracing::error!(region = %self.region_id, error = %err, "Code block copy failed");
                CopyOutcome::Failed
            }
        }
    }

    /// Tear the block down: cancel a pending reset and drop the region.
    ///
    /// Idempotent; also runs on drop.
    pub fn unmount(&self) {
        self.detach_region();
        self.status.dispose();
    }

    fn region_lock(&self) -> MutexGuard<'_, Option<RegionHandle>> {
        self.region.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for AnnotatedCodeBlock {
    fn drop(&mut self) {
        self.unmount();
    }
}
