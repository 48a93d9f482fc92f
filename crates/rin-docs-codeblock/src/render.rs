//! Markup and scoped stylesheet of the code block.
//!
//! Templates live in `templates/` and are compiled by askama, which also
//! HTML-escapes every interpolated value of the markup.

use askama::Template;
use rin_docs_core::{
    Annotation, CodeContent, ContentNode, CopyStatus, DocsError, LanguageTag, RegionId, Result,
    ThemeConfig,
};
use serde::Serialize;
use std::hash::{DefaultHasher, Hash, Hasher};

/// Renderable unit handed back to the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedBlock {
    /// Block markup
    pub html: String,
    /// Stylesheet whose selectors only match this theme's blocks
    pub css: String,
    /// Class that scopes `css` to `html`
    pub scope_class: String,
}

impl RenderedBlock {
    /// Markup preceded by its `<style>` element, for hosts without a style sink.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        format!("<style>{}</style>{}", self.css, self.html)
    }
}

/// Scoped stylesheet derived from a theme.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    theme: ThemeConfig,
    scope: String,
    css: String,
}

#[derive(Template)]
#[template(path = "code_block.css", escape = "none")]
struct StylesheetTemplate<'a> {
    scope: &'a str,
    radius: f32,
    theme: &'a ThemeConfig,
}

impl Stylesheet {
    /// Build the stylesheet for `theme`.
    ///
    /// Blocks sharing a theme share a scope class, so hosts can emit the
    /// stylesheet once per page.
    pub fn new(theme: ThemeConfig) -> Result<Self> {
        let scope = scope_class(&theme);
        let css = StylesheetTemplate {
            scope: &scope,
            radius: theme.border_radius_rem,
            theme: &theme,
        }
        .render()
        .map_err(|e| DocsError::Render(e.to_string()))?;

        Ok(Self { theme, scope, css })
    }

    /// Scope class added to every element of a block.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Rendered CSS.
    #[must_use]
    pub fn css(&self) -> &str {
        &self.css
    }

    /// Theme the stylesheet was built from.
    #[must_use]
    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }
}

fn scope_class(theme: &ThemeConfig) -> String {
    let mut hasher = DefaultHasher::new();
    format!("{theme:?}").hash(&mut hasher);
    format!("rcb-{:08x}", hasher.finish() & 0xffff_ffff)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PieceKind {
    Open,
    Text,
    Close,
}

/// Flattened content node; the template walks these instead of recursing.
#[derive(Debug, Clone, Copy)]
struct Piece<'a> {
    kind: PieceKind,
    class: &'a str,
    text: &'a str,
}

impl Piece<'_> {
    fn is_open(&self) -> bool {
        self.kind == PieceKind::Open
    }

    fn is_close(&self) -> bool {
        self.kind == PieceKind::Close
    }
}

fn flatten<'a>(nodes: &'a [ContentNode], out: &mut Vec<Piece<'a>>) {
    for node in nodes {
        match node {
            ContentNode::Text { value } => out.push(Piece {
                kind: PieceKind::Text,
                class: "",
                text: value,
            }),
            ContentNode::Inline { class, children } => {
                out.push(Piece {
                    kind: PieceKind::Open,
                    class: class.as_deref().unwrap_or(""),
                    text: "",
                });
                flatten(children, out);
                out.push(Piece {
                    kind: PieceKind::Close,
                    class: "",
                    text: "",
                });
            }
        }
    }
}

#[derive(Template)]
#[template(path = "code_block.html")]
struct CodeBlockTemplate<'a> {
    scope: &'a str,
    status: &'a str,
    label: Option<&'a str>,
    button_text: &'a str,
    class_name: Option<&'a str>,
    region_id: String,
    pieces: Vec<Piece<'a>>,
}

/// Inputs of one render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    /// Code payload
    pub content: &'a CodeContent,
    /// Annotation echoed onto the `<pre>`
    pub annotation: Option<&'a Annotation>,
    /// Tag shown in the label, if non-empty
    pub language: &'a LanguageTag,
    /// Current copy status
    pub status: CopyStatus,
    /// Region the host will attach after committing the markup
    pub region_id: RegionId,
}

/// Render a block with `stylesheet`.
pub fn render_block(input: RenderInput<'_>, stylesheet: &Stylesheet) -> Result<RenderedBlock> {
    let mut pieces = Vec::new();
    flatten(input.content.nodes(), &mut pieces);

    let status = match input.status {
        CopyStatus::Idle => "idle",
        CopyStatus::Copied => "copied",
    };

    let html = CodeBlockTemplate {
        scope: stylesheet.scope(),
        status,
        // Uppercasing happens in CSS; the markup keeps the stored case
        label: (!input.language.is_empty()).then(|| input.language.as_str()),
        button_text: input.status.button_text(),
        class_name: input
            .annotation
            .map(Annotation::as_str)
            .filter(|class| !class.is_empty()),
        region_id: input.region_id.to_string(),
        pieces,
    }
    .render()
    .map_err(|e| DocsError::Render(e.to_string()))?;

    Ok(RenderedBlock {
        html,
        css: stylesheet.css().to_string(),
        scope_class: stylesheet.scope().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        content: &CodeContent,
        annotation: Option<&str>,
        status: CopyStatus,
    ) -> RenderedBlock {
        let annotation = annotation.map(Annotation::new);
        let language = LanguageTag::from_annotation(annotation.as_ref());
        let stylesheet = Stylesheet::new(ThemeConfig::default()).expect("default theme renders");
        render_block(
            RenderInput {
                content,
                annotation: annotation.as_ref(),
                language: &language,
                status,
                region_id: RegionId::generate(),
            },
            &stylesheet,
        )
        .expect("block renders")
    }

    #[test]
    fn test_label_and_button() {
        let block = render(
            &CodeContent::text("fn main() {}"),
            Some("language-rust"),
            CopyStatus::Idle,
        );
        assert!(block.html.contains("<span>rust</span>"));
        assert!(block.html.contains(">Copy</button>"));
        assert!(block.html.contains("fn main() {}</pre>"));
        assert!(block.html.contains("language-rust"));
        assert!(block.css.contains("text-transform: uppercase"));
    }

    #[test]
    fn test_no_label_without_annotation() {
        let block = render(&CodeContent::text("ls -la"), None, CopyStatus::Idle);
        assert!(!block.html.contains("code-language"));
        assert!(block.html.contains("copy-button"));
    }

    #[test]
    fn test_copied_button_text() {
        let block = render(&CodeContent::default(), None, CopyStatus::Copied);
        assert!(block.html.contains(">✓ Copied!</button>"));
        assert!(block.html.contains(r#"data-copy-status="copied""#));
    }

    #[test]
    fn test_content_is_escaped() {
        let content = CodeContent::new(vec![
            ContentNode::inline(Some("token tag"), vec![ContentNode::text("<script>")]),
            ContentNode::text(" & \"quotes\""),
        ]);
        let block = render(&content, Some("language-html"), CopyStatus::Idle);
        let numeric = r#"<span class="token tag">&#60;script&#62;</span>"#;
        let named = r#"<span class="token tag">&lt;script&gt;</span>"#;
        assert!(block.html.contains(numeric) || block.html.contains(named));
        assert!(!block.html.contains("<script>"));
    }

    #[test]
    fn test_inline_without_class() {
        let content =
            CodeContent::new(vec![ContentNode::inline(None, vec![ContentNode::text("x")])]);
        let block = render(&content, None, CopyStatus::Idle);
        assert!(block.html.contains("<span>x</span></pre>"));
    }

    #[test]
    fn test_scope_is_stable_per_theme() {
        let a = Stylesheet::new(ThemeConfig::default()).expect("renders");
        let b = Stylesheet::new(ThemeConfig::default()).expect("renders");
        assert_eq!(a.scope(), b.scope());
        assert!(a.css().contains(&format!(".copy-button.{}", a.scope())));

        let dark = ThemeConfig {
            code_background: "#000000".to_string(),
            ..ThemeConfig::default()
        };
        let c = Stylesheet::new(dark).expect("renders");
        assert_ne!(a.scope(), c.scope());
        assert!(c.css().contains("background-color: #000000 !important"));
    }

    #[test]
    fn test_overlays_do_not_overlap() {
        let stylesheet = Stylesheet::new(ThemeConfig::default()).expect("renders");
        let css = stylesheet.css();
        // Label pinned bottom-left, button top-right
        assert!(css.contains("bottom: 0;\n  left: 0;"));
        assert!(css.contains("top: 0.5rem;\n  right: 0.5rem;"));
    }

    #[test]
    fn test_fragment_includes_style() {
        let block = render(&CodeContent::text("x"), None, CopyStatus::Idle);
        let fragment = block.to_fragment();
        assert!(fragment.starts_with("<style>"));
        assert!(fragment.ends_with(&block.html));
    }
}
