//! Sidebar tree builder.
//!
//! Maps manifest [`DocNode`] trees onto the [`SidebarItem`] shape expected by
//! the theme renderer. Order and nesting are preserved one-to-one.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::manifest::DocNode;

/// Sidebar entry: either a direct link or a collapsible group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidebarItem {
    /// Display text.
    pub text: String,
    /// Link target (`/` + slug).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Nested entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SidebarItem>>,
    /// Whether the group starts collapsed. Always true.
    pub collapsed: bool,
}

impl SidebarItem {
    /// Depth of the subtree rooted at this item (a leaf has depth 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.items.as_deref().map_or(0, sidebar_depth)
    }
}

/// Depth of a sidebar forest; 0 for an empty one.
#[must_use]
pub fn sidebar_depth(items: &[SidebarItem]) -> usize {
    items.iter().map(SidebarItem::depth).max().unwrap_or(0)
}

/// Build the sidebar for a sequence of manifest entries.
///
/// For every node, in order:
/// - `hasChild` set: the item gets `items` built from the children and no link
/// - otherwise: the item links to `/{slug}`, and still gets `items` when the
///   node happens to carry children
///
/// Every produced item is collapsed.
#[must_use]
pub fn build_sidebar(nodes: &[DocNode]) -> Vec<SidebarItem> {
    nodes.iter().map(build_item).collect()
}

fn build_item(node: &DocNode) -> SidebarItem {
    let (link, items) = if node.has_child {
        (None, Some(build_sidebar(&node.children)))
    } else {
        let items = if node.children.is_empty() {
            None
        } else {
            // Link and items coexist here; kept for compatibility with existing manifests.
            debug!(
                slug = %node.slug,
                children = node.children.len(),
                "Entry without hasChild carries children"
            );
            Some(build_sidebar(&node.children))
        };
        (Some(format!("/{}", node.slug)), items)
    };

    SidebarItem {
        text: node.title.clone(),
        link,
        items,
        collapsed: true,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(SidebarItem: Send, Sync);

    fn leaf(title: &str, slug: &str) -> DocNode {
        DocNode {
            title: title.to_owned(),
            slug: slug.to_owned(),
            has_child: false,
            children: Vec::new(),
        }
    }

    fn group(title: &str, slug: &str, children: Vec<DocNode>) -> DocNode {
        DocNode {
            title: title.to_owned(),
            slug: slug.to_owned(),
            has_child: true,
            children,
        }
    }

    fn assert_all_collapsed(items: &[SidebarItem]) {
        for item in items {
            assert!(item.collapsed, "{} is not collapsed", item.text);
            if let Some(children) = &item.items {
                assert_all_collapsed(children);
            }
        }
    }

    #[test]
    fn test_empty_manifest_builds_empty_sidebar() {
        let sidebar = build_sidebar(&[]);

        assert!(sidebar.is_empty());
        assert_eq!(sidebar_depth(&sidebar), 0);
    }

    #[test]
    fn test_leaf_becomes_link() {
        let sidebar = build_sidebar(&[leaf("Intro", "intro")]);

        assert_eq!(
            sidebar,
            vec![SidebarItem {
                text: "Intro".to_owned(),
                link: Some("/intro".to_owned()),
                items: None,
                collapsed: true,
            }]
        );
    }

    #[test]
    fn test_group_becomes_items_without_link() {
        let sidebar = build_sidebar(&[group(
            "Guide",
            "guide",
            vec![leaf("Step1", "guide/step1")],
        )]);

        assert_eq!(
            sidebar,
            vec![SidebarItem {
                text: "Guide".to_owned(),
                link: None,
                items: Some(vec![SidebarItem {
                    text: "Step1".to_owned(),
                    link: Some("/guide/step1".to_owned()),
                    items: None,
                    collapsed: true,
                }]),
                collapsed: true,
            }]
        );
    }

    #[test]
    fn test_group_without_children_gets_empty_items() {
        let sidebar = build_sidebar(&[group("Empty", "empty", Vec::new())]);

        assert_eq!(sidebar[0].items, Some(Vec::new()));
        assert!(sidebar[0].link.is_none());
    }

    #[test]
    fn test_children_without_has_child_keep_link_and_items() {
        let node = DocNode {
            title: "Reference".to_owned(),
            slug: "reference".to_owned(),
            has_child: false,
            children: vec![leaf("CLI", "reference/cli")],
        };

        let sidebar = build_sidebar(&[node]);

        assert_eq!(sidebar[0].link.as_deref(), Some("/reference"));
        let items = sidebar[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link.as_deref(), Some("/reference/cli"));
    }

    #[test]
    fn test_order_and_count_preserved() {
        let nodes = vec![
            leaf("Zeta", "zeta"),
            group("Alpha", "alpha", vec![leaf("A1", "alpha/a1")]),
            leaf("Mid", "mid"),
        ];

        let sidebar = build_sidebar(&nodes);

        let texts: Vec<_> = sidebar.iter().map(|item| item.text.as_str()).collect();
        assert_eq!(texts, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_depth_matches_input_and_all_collapsed() {
        let nodes = vec![
            group(
                "A",
                "a",
                vec![group(
                    "B",
                    "a/b",
                    vec![group("C", "a/b/c", vec![leaf("D", "a/b/c/d")])],
                )],
            ),
            leaf("E", "e"),
        ];

        let sidebar = build_sidebar(&nodes);

        assert_eq!(sidebar_depth(&sidebar), 4);
        assert_eq!(sidebar[1].depth(), 1);
        assert_all_collapsed(&sidebar);
        let d = &sidebar[0].items.as_ref().unwrap()[0].items.as_ref().unwrap()[0]
            .items
            .as_ref()
            .unwrap()[0];
        assert_eq!(d.text, "D");
        assert_eq!(d.link.as_deref(), Some("/a/b/c/d"));
    }

    #[test]
    fn test_slug_is_not_normalized() {
        let sidebar = build_sidebar(&[leaf("Nested", "guide/advanced/setup")]);

        assert_eq!(sidebar[0].link.as_deref(), Some("/guide/advanced/setup"));
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let sidebar = build_sidebar(&[
            leaf("Intro", "intro"),
            group("Guide", "guide", vec![leaf("Step1", "guide/step1")]),
        ]);

        let json = serde_json::to_value(&sidebar).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                {"text": "Intro", "link": "/intro", "collapsed": true},
                {
                    "text": "Guide",
                    "collapsed": true,
                    "items": [
                        {"text": "Step1", "link": "/guide/step1", "collapsed": true}
                    ]
                }
            ])
        );
    }
}
