//! Shared types used across the Rin docs components.
//!
//! This module defines the annotation and language-tag newtypes, the copy
//! status enum, and the opaque code content payload handed over by the host
//! rendering pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix that code fences carry on their class annotation.
pub const LANGUAGE_PREFIX: &str = "language-";

/// Class-like annotation attached to a code fence, e.g. `"language-python"`.
///
/// The host may hand over a whole class list (`"language-rust line-numbers"`);
/// the annotation keeps it verbatim so it can be echoed back onto the `<pre>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Annotation(String);

impl Annotation {
    /// Wrap an annotation string as supplied by the host.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the language tag.
    ///
    /// The first whitespace-separated token starting with `language-` wins;
    /// an annotation without one yields an empty tag.
    #[must_use]
    pub fn language_tag(&self) -> LanguageTag {
        self.0
            .split_whitespace()
            .find_map(|token| token.strip_prefix(LANGUAGE_PREFIX))
            .map(LanguageTag::new)
            .unwrap_or_default()
    }
}

impl From<&str> for Annotation {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Language identifier extracted from an [`Annotation`].
///
/// Keeps the case it was written with; uppercasing is a display concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Create a tag from an already-stripped identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the tag from an optional annotation.
    #[must_use]
    pub fn from_annotation(annotation: Option<&Annotation>) -> Self {
        annotation.map(Annotation::language_tag).unwrap_or_default()
    }

    /// Get the stored identifier, original case.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether there is anything to label.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The label as the reader sees it.
    #[must_use]
    pub fn display_label(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observable state of the copy button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyStatus {
    /// Nothing copied recently
    #[default]
    Idle,
    /// Copy succeeded within the last revert window
    Copied,
}

impl CopyStatus {
    /// Button text for an idle block.
    pub const IDLE_TEXT: &'static str = "Copy";
    /// Button text right after a successful copy.
    pub const COPIED_TEXT: &'static str = "✓ Copied!";

    /// The literal shown on the copy button.
    #[must_use]
    pub fn button_text(self) -> &'static str {
        match self {
            Self::Idle => Self::IDLE_TEXT,
            Self::Copied => Self::COPIED_TEXT,
        }
    }
}

/// One node of host-supplied code content.
///
/// Highlighters hand over text interleaved with inline spans; the widget
/// renders them as given and never inspects their meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    /// Plain text run
    Text {
        /// The text itself
        value: String,
    },
    /// Inline element, usually a highlighted token
    Inline {
        /// Class attribute of the span, if any
        #[serde(default)]
        class: Option<String>,
        /// Nested nodes
        #[serde(default)]
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Shorthand for a text node.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Shorthand for an inline span.
    #[must_use]
    pub fn inline(class: Option<&str>, children: Vec<ContentNode>) -> Self {
        Self::Inline {
            class: class.map(str::to_string),
            children,
        }
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Self::Text { value } => out.push_str(value),
            Self::Inline { children, .. } => {
                for child in children {
                    child.push_text(out);
                }
            }
        }
    }
}

/// Opaque code payload of a block. May be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CodeContent(Vec<ContentNode>);

impl CodeContent {
    /// Wrap host-supplied nodes.
    #[must_use]
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self(nodes)
    }

    /// Content consisting of a single text run.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self(vec![ContentNode::text(value)])
    }

    /// The nodes in document order.
    #[must_use]
    pub fn nodes(&self) -> &[ContentNode] {
        &self.0
    }

    /// Whether there are no nodes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Text a reader gets when selecting the whole rendered region.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        let mut out = String::new();
        for node in &self.0 {
            node.push_text(&mut out);
        }
        out
    }
}

/// Identifier of a rendered content region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(uuid::Uuid);

impl RegionId {
    /// Create a new random `RegionId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The host's handle on a committed content region, the counterpart of a
/// DOM ref to the `<pre>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionHandle {
    id: RegionId,
    text: String,
}

impl RegionHandle {
    /// Handle for a region whose selectable text is `text`.
    #[must_use]
    pub fn new(id: RegionId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// Handle for freshly committed markup of `content`.
    #[must_use]
    pub fn for_content(content: &CodeContent) -> Self {
        Self::new(RegionId::generate(), content.rendered_text())
    }

    /// Region identifier.
    #[must_use]
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Text a full selection of the region yields.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
