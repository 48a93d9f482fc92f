//! Component overrides registered with the MDX pipeline.
//!
//! The framework wraps fenced code in `<pre><code class="language-…">`. The
//! block brings its own `<pre>`, so the outer `pre` becomes a plain `div`
//! passthrough and `code` is rendered by [`AnnotatedCodeBlock`].

use crate::render::Stylesheet;
use crate::widget::{AnnotatedCodeBlock, CodeBlockProps};
use askama::Template;
use rin_docs_core::{ClipboardCapability, CodeContent, DocsError, Result, ThemeConfig};
use std::sync::Arc;

/// Elements the overrides replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverriddenElement {
    /// `pre`, rendered as a `div`
    Pre,
    /// `code`, rendered as an annotated code block
    Code,
}

impl OverriddenElement {
    /// Map a host element tag to its override, if there is one.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "pre" => Some(Self::Pre),
            "code" => Some(Self::Code),
            _ => None,
        }
    }
}

#[derive(Template)]
#[template(path = "pre_passthrough.html")]
struct PrePassthrough<'a> {
    attrs: Vec<(&'a str, &'a str)>,
    inner: &'a str,
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
}

/// Override table shared by every page of a site.
#[derive(Clone)]
pub struct MdxComponents {
    clipboard: Arc<dyn ClipboardCapability>,
    stylesheet: Stylesheet,
}

impl std::fmt::Debug for MdxComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdxComponents")
            .field("scope", &self.stylesheet.scope())
            .finish_non_exhaustive()
    }
}

impl MdxComponents {
    /// Overrides with the default theme.
    pub fn new(clipboard: Arc<dyn ClipboardCapability>) -> Result<Self> {
        Self::with_theme(clipboard, ThemeConfig::default())
    }

    /// Overrides whose blocks are styled by `theme`.
    pub fn with_theme(clipboard: Arc<dyn ClipboardCapability>, theme: ThemeConfig) -> Result<Self> {
        Ok(Self {
            clipboard,
            stylesheet: Stylesheet::new(theme)?,
        })
    }

    /// Stylesheet shared by all blocks; emit once per page.
    #[must_use]
    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Render the `pre` override: same attributes, `div` element.
    ///
    /// `inner_html` is already-rendered child markup and is not escaped.
    /// Attributes with invalid names are dropped.
    pub fn render_pre(&self, attrs: &[(&str, &str)], inner_html: &str) -> Result<String> {
        PrePassthrough {
            attrs: attrs
                .iter()
                .copied()
                .filter(|(name, _)| is_attribute_name(name))
                .collect(),
            inner: inner_html,
        }
        .render()
        .map_err(|e| DocsError::Render(e.to_string()))
    }

    /// Mount the `code` override for one fence.
    pub fn code_block(
        &self,
        content: CodeContent,
        class_name: Option<&str>,
    ) -> Result<AnnotatedCodeBlock> {
        AnnotatedCodeBlock::mount_with_stylesheet(
            CodeBlockProps::new(content, class_name),
            Arc::clone(&self.clipboard),
            self.stylesheet.clone(),
        )
    }
}
