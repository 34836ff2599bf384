//! Document manifest loading.
//!
//! The manifest is a JSON array of [`DocNode`] trees produced by an external
//! authoring pipeline. It is parsed into typed records and checked once at
//! load time, so that sidebar building can trust its input.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::sidebar::{SidebarItem, build_sidebar};

/// Maximum nesting depth accepted in a manifest.
///
/// Sidebar building recurses once per level, so this also bounds its stack use.
pub const MAX_DEPTH: usize = 32;

/// One manifest entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    /// Display title.
    pub title: String,
    /// Relative path identifier used to build the link.
    pub slug: String,
    /// Whether the children form an expandable group.
    #[serde(rename = "hasChild", alias = "has_child", default)]
    pub has_child: bool,
    /// Child entries, in display order.
    #[serde(default)]
    pub children: Vec<DocNode>,
}

/// Error returned when a manifest cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Manifest file could not be read.
    #[error("Failed to read manifest {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Manifest is not valid JSON or does not have the expected shape.
    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
    /// Nesting exceeds [`MAX_DEPTH`].
    #[error("Manifest nesting depth {depth} exceeds limit of {limit} at \"{title}\"")]
    TooDeep {
        /// Depth of the offending entry.
        depth: usize,
        /// Configured limit.
        limit: usize,
        /// Title of the offending entry.
        title: String,
    },
}

/// Validated document manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    nodes: Vec<DocNode>,
    depth: usize,
}

impl Manifest {
    /// Parse and validate a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Parse`] for malformed JSON or missing fields,
    /// and [`ManifestError::TooDeep`] when nesting exceeds [`MAX_DEPTH`].
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let nodes: Vec<DocNode> = serde_json::from_str(content)?;
        Self::from_nodes(nodes)
    }

    /// Validate already-constructed nodes.
    ///
    /// # Errors
    ///
    /// Same as [`Manifest::from_json`], minus parse errors.
    pub fn from_nodes(nodes: Vec<DocNode>) -> Result<Self, ManifestError> {
        let depth = validate(&nodes)?;
        Ok(Self { nodes, depth })
    }

    /// Read, parse and validate a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Io`] if the file cannot be read, otherwise
    /// the errors of [`Manifest::from_json`].
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        debug!(path = %path.display(), "Loading manifest");
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&content)?;
        info!(
            entries = manifest.len(),
            depth = manifest.depth,
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Top-level entries.
    #[must_use]
    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the manifest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Maximum nesting depth (0 for an empty manifest).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Build the sidebar for this manifest.
    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarItem> {
        build_sidebar(&self.nodes)
    }
}

/// Walk the forest without recursion, returning its depth.
///
/// Titles and slugs are taken as they are: an empty title gives an empty
/// label and an empty slug links to `/`.
fn validate(nodes: &[DocNode]) -> Result<usize, ManifestError> {
    let mut max_depth = 0;
    let mut stack: Vec<(&DocNode, usize)> = nodes.iter().map(|node| (node, 1)).collect();

    while let Some((node, depth)) = stack.pop() {
        if depth > MAX_DEPTH {
            return Err(ManifestError::TooDeep {
                depth,
                limit: MAX_DEPTH,
                title: node.title.clone(),
            });
        }

        max_depth = max_depth.max(depth);
        stack.extend(node.children.iter().map(|child| (child, depth + 1)));
    }

    Ok(max_depth)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn nested_json(levels: usize) -> String {
        let mut json = String::from("[]");
        for i in (0..levels).rev() {
            json = format!(
                r#"[{{"title": "Level {i}", "slug": "l{i}", "hasChild": true, "children": {json}}}]"#
            );
        }
        json
    }

    #[test]
    fn test_parse_intro_example() {
        let manifest = Manifest::from_json(
            r#"[{"title": "Intro", "slug": "intro", "hasChild": false, "children": []}]"#,
        )
        .unwrap();

        assert_eq!(manifest.len(), 1);
        assert_eq!(manifest.depth(), 1);
        assert_eq!(
            manifest.nodes()[0],
            DocNode {
                title: "Intro".to_owned(),
                slug: "intro".to_owned(),
                has_child: false,
                children: Vec::new(),
            }
        );
    }

    #[test]
    fn test_parse_snake_case_alias_and_missing_children() {
        let manifest =
            Manifest::from_json(r#"[{"title": "Guide", "slug": "guide", "has_child": true}]"#)
                .unwrap();

        let node = &manifest.nodes()[0];
        assert!(node.has_child);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::from_json("[]").unwrap();

        assert!(manifest.is_empty());
        assert_eq!(manifest.depth(), 0);
        assert!(manifest.sidebar().is_empty());
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = Manifest::from_json(r#"[{"slug": "intro"}]"#).unwrap_err();

        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_non_array_children_rejected() {
        let err = Manifest::from_json(
            r#"[{"title": "Guide", "slug": "guide", "hasChild": true, "children": "none"}]"#,
        )
        .unwrap_err();

        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_non_array_top_level_rejected() {
        let err = Manifest::from_json(r#"{"title": "Intro", "slug": "intro"}"#).unwrap_err();

        assert!(matches!(err, ManifestError::Parse(_)));
    }

    #[test]
    fn test_empty_title_and_slug_accepted() {
        let manifest = Manifest::from_json(
            r#"[
                {"title": "", "slug": "blank-title", "hasChild": false, "children": []},
                {"title": "Home", "slug": "", "hasChild": false, "children": []},
                {"title": " ", "slug": "", "hasChild": true, "children": [
                    {"title": "Ok", "slug": "guide/ok"}
                ]}
            ]"#,
        )
        .unwrap();

        let json = serde_json::to_value(manifest.sidebar()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"text": "", "link": "/blank-title", "collapsed": true},
                {"text": "Home", "link": "/", "collapsed": true},
                {"text": " ", "collapsed": true, "items": [
                    {"text": "Ok", "link": "/guide/ok", "collapsed": true}
                ]}
            ])
        );
    }

    #[test]
    fn test_depth_at_limit_accepted() {
        let manifest = Manifest::from_json(&nested_json(MAX_DEPTH)).unwrap();

        assert_eq!(manifest.depth(), MAX_DEPTH);
        assert_eq!(crate::sidebar_depth(&manifest.sidebar()), MAX_DEPTH);
    }

    #[test]
    fn test_depth_over_limit_rejected() {
        let err = Manifest::from_json(&nested_json(MAX_DEPTH + 1)).unwrap_err();

        match err {
            ManifestError::TooDeep {
                depth,
                limit,
                title,
            } => {
                assert_eq!(depth, MAX_DEPTH + 1);
                assert_eq!(limit, MAX_DEPTH);
                assert_eq!(title, format!("Level {MAX_DEPTH}"));
            }
            other => panic!("Expected ManifestError::TooDeep, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");

        let err = Manifest::load(&path).unwrap_err();

        assert!(matches!(err, ManifestError::Io { .. }));
        assert!(err.to_string().contains("docs.json"));
    }

    #[test]
    fn test_load_builds_sidebar() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs.json");
        std::fs::write(
            &path,
            r#"[{"title": "Guide", "slug": "guide", "hasChild": true, "children": [
                {"title": "Step1", "slug": "guide/step1", "hasChild": false, "children": []}
            ]}]"#,
        )
        .unwrap();

        let manifest = Manifest::load(&path).unwrap();
        let json = serde_json::to_value(manifest.sidebar()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{
                "text": "Guide",
                "collapsed": true,
                "items": [{"text": "Step1", "link": "/guide/step1", "collapsed": true}]
            }])
        );
    }
}
