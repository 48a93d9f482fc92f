//! Host capabilities injected into the components.
//!
//! The only environment-dependent seam of the code block is the hosting
//! runtime's ability to select a rendered region and copy the selection to
//! the system clipboard. Hosts implement [`ClipboardCapability`]; the
//! in-memory implementation here serves headless hosts and tests.

use crate::error::ClipboardError;
use crate::types::RegionHandle;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Text selection and clipboard access of the hosting runtime.
///
/// Implementations should be thread-safe (Send + Sync) so a component can be
/// driven from any task of the event loop.
pub trait ClipboardCapability: Send + Sync {
    /// Select the entire rendered region, replacing any active selection.
    fn select_all(&self, region: &RegionHandle);

    /// Copy the active selection to the clipboard.
    ///
    /// # Errors
    /// Returns [`ClipboardError::Unavailable`] when the host has no clipboard,
    /// [`ClipboardError::Rejected`] when the host refuses the write.
    fn copy_selection(&self) -> Result<(), ClipboardError>;

    /// Drop the active selection, if any.
    fn clear_selection(&self);
}

impl<T: ClipboardCapability + ?Sized> ClipboardCapability for Arc<T> {
    fn select_all(&self, region: &RegionHandle) {
        (**self).select_all(region);
    }

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        (**self).copy_selection()
    }

    fn clear_selection(&self) {
        (**self).clear_selection();
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    selection: Option<String>,
    contents: Option<String>,
    rejection: Option<String>,
    copies: usize,
}

/// Clipboard held in process memory.
///
/// Clones share the same selection and clipboard, so a test can keep one
/// handle while the component owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryClipboard {
    /// Create an empty clipboard with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clipboard that rejects every copy with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        let clipboard = Self::new();
        clipboard.reject_with(Some(reason.into()));
        clipboard
    }

    /// Make subsequent copies fail (`Some`) or succeed again (`None`).
    pub fn reject_with(&self, reason: Option<String>) {
        self.lock().rejection = reason;
    }

    /// Current clipboard contents.
    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.lock().contents.clone()
    }

    /// Current selection, if any.
    #[must_use]
    pub fn selection(&self) -> Option<String> {
        self.lock().selection.clone()
    }

    /// Number of successful copies.
    #[must_use]
    pub fn copy_count(&self) -> usize {
        self.lock().copies
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ClipboardCapability for MemoryClipboard {
    fn select_all(&self, region: &RegionHandle) {
        tracing::trace!("Selecting region {}", region.id());
        self.lock().selection = Some(region.text().to_string());
    }

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        let mut state = self.lock();
        if let Some(reason) = &state.rejection {
            return Err(ClipboardError::Rejected(reason.clone()));
        }
        state.contents = Some(state.selection.clone().unwrap_or_default());
        state.copies += 1;
        Ok(())
    }

    fn clear_selection(&self) {
        self.lock().selection = None;
    }
}

/// Capability for hosts without clipboard access; every copy fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableClipboard;

impl ClipboardCapability for UnavailableClipboard {
    fn select_all(&self, _region: &RegionHandle) {}

    fn copy_selection(&self) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable)
    }

    fn clear_selection(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CodeContent;

    fn region(text: &str) -> RegionHandle {
        RegionHandle::for_content(&CodeContent::text(text))
    }

    #[test]
    fn test_memory_clipboard_copies_selection() {
        let clipboard = MemoryClipboard::new();
        clipboard.select_all(&region("echo hi"));
        assert_eq!(clipboard.selection().as_deref(), Some("echo hi"));

        clipboard.copy_selection().expect("copy succeeds");
        assert_eq!(clipboard.contents().as_deref(), Some("echo hi"));
        assert_eq!(clipboard.copy_count(), 1);

        clipboard.clear_selection();
        assert!(clipboard.selection().is_none());
        assert_eq!(clipboard.contents().as_deref(), Some("echo hi"));
    }

    #[test]
    fn test_memory_clipboard_rejection() {
        let clipboard = MemoryClipboard::rejecting("permission denied");
        clipboard.select_all(&region("secret"));

        let err = clipboard.copy_selection().unwrap_err();
        assert_eq!(err, ClipboardError::Rejected("permission denied".to_string()));
        assert!(clipboard.contents().is_none());
        assert_eq!(clipboard.copy_count(), 0);

        clipboard.reject_with(None);
        clipboard.copy_selection().expect("copy succeeds once accepted");
        assert_eq!(clipboard.contents().as_deref(), Some("secret"));
    }

    #[test]
    fn test_clones_share_state() {
        let clipboard = MemoryClipboard::new();
        let handle = clipboard.clone();
        clipboard.select_all(&region("ls"));
        clipboard.copy_selection().expect("copy succeeds");
        assert_eq!(handle.contents().as_deref(), Some("ls"));
    }

    #[test]
    fn test_unavailable_clipboard() {
        let clipboard = UnavailableClipboard;
        clipboard.select_all(&region("x"));
        assert_eq!(clipboard.copy_selection(), Err(ClipboardError::Unavailable));
    }

    #[test]
    fn test_arc_forwarding() {
        let clipboard: Arc<dyn ClipboardCapability> = Arc::new(UnavailableClipboard);
        assert_eq!(clipboard.copy_selection(), Err(ClipboardError::Unavailable));
    }
}
