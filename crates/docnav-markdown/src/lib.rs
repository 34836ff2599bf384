//! Markdown source transform hook for docnav.
//!
//! The site generator runs this hook over the raw text of every markdown
//! file before rendering. It performs three substitutions:
//!
//! 1. full-width period `。` becomes `.`
//! 2. every `{` becomes `&#123;` so the renderer does not treat it as an
//!    interpolation (closing braces are left as they are)
//! 3. images whose URL contains the placeholder marker get a fresh random
//!    placeholder photo URL
//!
//! # Example
//!
//! ```
//! use docnav_markdown::{FixedPlaceholder, MarkdownTransform};
//!
//! let hook = MarkdownTransform::new("placeholder", FixedPlaceholder::new("https://img.test/1"))?;
//! assert_eq!(hook.transform("这是。测试{code}"), "这是.测试&#123;code}");
//! assert_eq!(
//!     hook.transform("![cat](placeholder.png)"),
//!     "![cat](https://img.test/1)"
//! );
//! # Ok::<(), docnav_markdown::TransformError>(())
//! ```

mod placeholder;

use std::path::Path;

use regex::{Captures, Regex};
use tracing::debug;

pub use placeholder::{FixedPlaceholder, PlaceholderSource, RandomPlaceholder};

const FULL_WIDTH_PERIOD: char = '。';
const OPEN_BRACE_ENTITY: &str = "&#123;";

/// Error returned when the hook cannot be constructed.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    /// Placeholder marker is empty.
    #[error("placeholder marker cannot be empty")]
    EmptyMarker,
    /// Image pattern failed to compile.
    #[error("invalid image pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Number of substitutions made by one [`MarkdownTransform::apply`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Replacements {
    /// Full-width periods replaced.
    pub periods: usize,
    /// Opening braces escaped.
    pub braces: usize,
    /// Placeholder images rewritten.
    pub images: usize,
}

impl Replacements {
    /// True if the text was left untouched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods == 0 && self.braces == 0 && self.images == 0
    }
}

/// Result of transforming one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    /// Transformed markdown.
    pub text: String,
    /// What was replaced.
    pub replacements: Replacements,
}

/// Markdown transform hook.
///
/// Holds no per-file state: the same instance can be applied to any number
/// of files, from any thread.
pub struct MarkdownTransform {
    image_re: Regex,
    placeholder: Box<dyn PlaceholderSource>,
}

impl std::fmt::Debug for MarkdownTransform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarkdownTransform")
            .field("image_re", &self.image_re.as_str())
            .finish_non_exhaustive()
    }
}

impl MarkdownTransform {
    /// Create a hook rewriting images whose URL contains `marker`.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::EmptyMarker`] for an empty marker.
    pub fn new(
        marker: &str,
        placeholder: impl PlaceholderSource + 'static,
    ) -> Result<Self, TransformError> {
        if marker.is_empty() {
            return Err(TransformError::EmptyMarker);
        }
        // ![alt](url "optional title"), url containing the marker
        let pattern = format!(
            r#"!\[(?P<alt>[^\]]*)\]\((?P<url>[^)\s]*{}[^)\s]*)(?P<title>\s+"[^"]*")?\)"#,
            regex::escape(marker)
        );
        Ok(Self {
            image_re: Regex::new(&pattern)?,
            placeholder: Box::new(placeholder),
        })
    }

    /// Whether the hook runs on `path` (markdown files only).
    #[must_use]
    pub fn applies_to(path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "md")
    }

    /// Transform markdown text.
    #[must_use]
    pub fn transform(&self, text: &str) -> String {
        self.apply(text).text
    }

    /// Transform markdown text and report what was replaced.
    #[must_use]
    pub fn apply(&self, text: &str) -> Transformed {
        let mut replacements = Replacements::default();
        let mut out = String::with_capacity(text.len());

        for c in text.chars() {
            match c {
                FULL_WIDTH_PERIOD => {
                    replacements.periods += 1;
                    out.push('.');
                }
                '{' => {
                    replacements.braces += 1;
                    out.push_str(OPEN_BRACE_ENTITY);
                }
                _ => out.push(c),
            }
        }

        let text = if self.image_re.is_match(&out) {
            self.image_re
                .replace_all(&out, |caps: &Captures<'_>| {
                    replacements.images += 1;
                    let url = self.placeholder.next_url();
                    debug!(from = &caps["url"], to = %url, "Replacing placeholder image");
                    format!(
                        "![{}]({}{})",
                        &caps["alt"],
                        url,
                        caps.name("title").map_or("", |m| m.as_str())
                    )
                })
                .into_owned()
        } else {
            out
        };

        Transformed { text, replacements }
    }
}
