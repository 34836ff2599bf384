//! Site definition assembly and build hooks for docnav.
//!
//! This crate provides:
//! - [`SiteDefinition`]: the configuration object handed to the site generator
//! - [`BuildHooks`]: named source transforms run over the markdown tree
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use docnav_config::Config;
//! use docnav_sidebar::Manifest;
//! use docnav_site::{BuildHooks, SiteDefinition};
//!
//! let config = Config::load(None, None)?;
//! let manifest = Manifest::load(&config.docs_resolved.manifest)?;
//! let hooks = BuildHooks::from_config(&config.markdown)?;
//!
//! let site = SiteDefinition::assemble(&config, manifest.sidebar(), &hooks);
//! site.write_json(&config.docs_resolved.output_path())?;
//! # Ok(())
//! # }
//! ```

mod definition;
mod hooks;

pub use definition::{
    DocFooter, Footer, HeadTag, HookDescriptor, Search, SiteDefinition, SiteError, Sitemap,
    ThemeConfig,
};
pub use hooks::{BuildHooks, HookError, HookReport, MARKDOWN_HOOK};
