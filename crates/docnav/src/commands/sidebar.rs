//! `docnav sidebar` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_sidebar::Manifest;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sidebar command.
#[derive(Args)]
pub(crate) struct SidebarArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,
}

impl SidebarArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let json = self.render()?;
        Output::new().result(&json)?;
        Ok(())
    }

    /// Pretty-printed sidebar JSON.
    fn render(self) -> Result<String, CliError> {
        let cli_settings = CliSettings {
            manifest: self.manifest,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let manifest = Manifest::load(&config.docs_resolved.manifest)?;
        Ok(serde_json::to_string_pretty(&manifest.sidebar())?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_sidebar_uses_manifest_override() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("docnav.toml");
        fs::write(&config, "[docs]\nmanifest = \"missing.json\"\n").unwrap();
        let manifest = dir.path().join("nav.json");
        fs::write(
            &manifest,
            r#"[{"title": "Guide", "slug": "guide", "hasChild": true, "children": [
                {"title": "Step1", "slug": "guide/step1", "hasChild": false, "children": []}
            ]}]"#,
        )
        .unwrap();

        let json = SidebarArgs {
            config: Some(config),
            manifest: Some(manifest),
        }
        .render()
        .unwrap();

        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&json).unwrap(),
            serde_json::json!([{
                "text": "Guide",
                "collapsed": true,
                "items": [{"text": "Step1", "link": "/guide/step1", "collapsed": true}]
            }])
        );
    }

    #[test]
    fn test_sidebar_missing_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("docnav.toml");
        fs::write(&config, "").unwrap();

        let err = SidebarArgs {
            config: Some(config),
            manifest: None,
        }
        .render()
        .unwrap_err();

        assert!(matches!(err, CliError::Manifest(_)));
    }
}
