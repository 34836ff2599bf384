//! Site definition consumed by the site generator.
//!
//! Serialized as camelCase JSON. Head tags use the `[tag, attrs, content?]`
//! tuple form common to static site generators.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docnav_config::{AnalyticsConfig, Config, HeadEntry, NavLink, SearchProvider};
use docnav_sidebar::SidebarItem;
use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use crate::hooks::BuildHooks;

/// Error returned when the site definition cannot be written.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Serialization failed.
    #[error("Failed to serialize site definition: {0}")]
    Json(#[from] serde_json::Error),
    /// Output could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Tag injected into every page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadTag {
    /// Tag name.
    pub tag: String,
    /// Attributes.
    pub attrs: BTreeMap<String, String>,
    /// Inner content.
    pub content: Option<String>,
}

impl Serialize for HeadTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.content.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.tag)?;
        seq.serialize_element(&self.attrs)?;
        if let Some(content) = &self.content {
            seq.serialize_element(content)?;
        }
        seq.end()
    }
}

impl From<&HeadEntry> for HeadTag {
    fn from(entry: &HeadEntry) -> Self {
        Self {
            tag: entry.tag.clone(),
            attrs: entry.attrs.clone(),
            content: entry.content.clone(),
        }
    }
}

impl HeadTag {
    /// Loader and init script tags for an analytics provider.
    #[must_use]
    pub fn analytics(analytics: &AnalyticsConfig) -> [Self; 2] {
        let mut attrs = BTreeMap::new();
        if let Some(charset) = &analytics.charset {
            attrs.insert("charset".to_owned(), charset.clone());
        }
        if let Some(id) = &analytics.id {
            attrs.insert("id".to_owned(), id.clone());
        }
        attrs.insert("src".to_owned(), analytics.loader_src.clone());

        let init = if analytics.params.is_empty() {
            format!("{}()", analytics.init)
        } else {
            format!(
                "{}({})",
                analytics.init,
                serde_json::Value::Object(analytics.params.clone())
            )
        };

        [
            Self {
                tag: "script".to_owned(),
                attrs,
                content: None,
            },
            Self {
                tag: "script".to_owned(),
                attrs: BTreeMap::new(),
                content: Some(init),
            },
        ]
    }
}

/// Sitemap settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sitemap {
    /// Public hostname.
    pub hostname: String,
}

/// Page footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Message line (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Copyright line (HTML).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Search provider selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Search {
    /// Provider name.
    pub provider: SearchProvider,
}

/// Pagination labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocFooter {
    /// Previous-page label.
    pub prev: String,
    /// Next-page label.
    pub next: String,
}

/// Theme options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Top navigation links.
    pub nav: Vec<NavLink>,
    /// Page footer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    /// Sidebar tree.
    pub sidebar: Vec<SidebarItem>,
    /// Search provider, absent when search is disabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<Search>,
    /// Prev/next labels.
    pub doc_footer: DocFooter,
}

/// Registered build hook, as announced to the site generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HookDescriptor {
    /// Plugin slot name.
    pub name: String,
    /// Glob selecting the files the hook runs on.
    pub include: String,
}

/// Complete site definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDefinition {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Content language.
    pub lang: String,
    /// Head tags, analytics first.
    pub head: Vec<HeadTag>,
    /// Sitemap settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sitemap: Option<Sitemap>,
    /// Theme options.
    pub theme_config: ThemeConfig,
    /// Build hooks.
    pub hooks: Vec<HookDescriptor>,
}

impl SiteDefinition {
    /// Assemble the definition from loaded configuration and a built sidebar.
    #[must_use]
    pub fn assemble(config: &Config, sidebar: Vec<SidebarItem>, hooks: &BuildHooks) -> Self {
        let mut head: Vec<HeadTag> = config
            .analytics
            .as_ref()
            .map(HeadTag::analytics)
            .into_iter()
            .flatten()
            .collect();
        head.extend(config.head.iter().map(HeadTag::from));

        let footer = (config.footer.message.is_some() || config.footer.copyright.is_some())
            .then(|| Footer {
                message: config.footer.message.clone(),
                copyright: config.footer.copyright.clone(),
            });

        let search = match config.search.provider {
            SearchProvider::None => None,
            provider => Some(Search { provider }),
        };

        debug!(
            head = head.len(),
            nav = config.nav.len(),
            sidebar = sidebar.len(),
            "Assembled site definition"
        );

        Self {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            lang: config.site.lang.clone(),
            head,
            sitemap: config.sitemap.hostname.clone().map(|hostname| Sitemap { hostname }),
            theme_config: ThemeConfig {
                nav: config.nav.clone(),
                footer,
                sidebar,
                search,
                doc_footer: DocFooter {
                    prev: config.doc_footer.prev.clone(),
                    next: config.doc_footer.next.clone(),
                },
            },
            hooks: hooks.descriptors(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, SiteError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write pretty-printed JSON to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if serialization or writing fails.
    pub fn write_json(&self, path: &Path) -> Result<(), SiteError> {
        let json = self.to_json_pretty()?;
        let io_err = |source: std::io::Error| SiteError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, json).map_err(io_err)?;
        info!(path = %path.display(), "Wrote site definition");
        Ok(())
    }
}
