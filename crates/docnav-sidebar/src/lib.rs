//! Document manifest parsing and sidebar tree building for docnav.
//!
//! This crate provides:
//! - [`Manifest`]: typed, validated view of the JSON document manifest
//! - [`build_sidebar`]: conversion of [`DocNode`] trees into [`SidebarItem`] trees
//!
//! # Quick Start
//!
//! ```
//! use docnav_sidebar::Manifest;
//!
//! let manifest = Manifest::from_json(
//!     r#"[{"title": "Intro", "slug": "intro", "hasChild": false, "children": []}]"#,
//! )?;
//! let sidebar = manifest.sidebar();
//!
//! assert_eq!(sidebar[0].text, "Intro");
//! assert_eq!(sidebar[0].link.as_deref(), Some("/intro"));
//! # Ok::<(), docnav_sidebar::ManifestError>(())
//! ```

mod manifest;
mod sidebar;

pub use manifest::{DocNode, MAX_DEPTH, Manifest, ManifestError};
pub use sidebar::{SidebarItem, build_sidebar, sidebar_depth};
