//! `docnav build` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_sidebar::{Manifest, sidebar_depth};
use docnav_site::{BuildHooks, SiteDefinition};
use tracing::info;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document manifest (overrides config).
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output file for the site definition (default: .docnav/site.json).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip running build hooks over the source directory.
    #[arg(long)]
    no_hooks: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, manifest loading or writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            manifest: self.manifest,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let docs = &config.docs_resolved;

        output.info(&format!("Manifest: {}", docs.manifest.display()));
        let manifest = Manifest::load(&docs.manifest)?;
        let sidebar = manifest.sidebar();
        info!(
            entries = sidebar.len(),
            depth = sidebar_depth(&sidebar),
            "Built sidebar"
        );

        let hooks = BuildHooks::from_config(&config.markdown)?;
        let site = SiteDefinition::assemble(&config, sidebar, &hooks);

        ensure_project_dir(&docs.project_dir)?;
        let output_path = self.output.unwrap_or_else(|| docs.output_path());
        site.write_json(&output_path)?;
        output.info(&format!("Site definition: {}", output_path.display()));

        if self.no_hooks || hooks.is_empty() {
            output.info("Build hooks: skipped");
        } else if docs.source_dir.is_dir() {
            let content_dir = docs.content_dir();
            let report = hooks.run(&docs.source_dir, &content_dir)?;
            output.info(&format!(
                "Build hooks: {} transformed, {} copied to {}",
                report.transformed,
                report.copied,
                content_dir.display()
            ));
        } else {
            output.warning(&format!(
                "Source directory {} not found, build hooks skipped",
                docs.source_dir.display()
            ));
        }

        output.success(&format!(
            "Built site definition with {} sidebar entries",
            manifest.len()
        ));
        Ok(())
    }
}

/// Ensure the `.docnav/` project directory exists with a `.gitignore`.
fn ensure_project_dir(project_dir: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(project_dir)?;

    let gitignore_path = project_dir.join(".gitignore");
    if !gitignore_path.exists() {
        let _ = std::fs::write(&gitignore_path, "# Automatically created by docnav\n*\n");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_project(root: &Path) -> PathBuf {
        fs::create_dir_all(root.join("docs/guide")).unwrap();
        fs::write(root.join("docs/intro.md"), "你好。{name}").unwrap();
        fs::write(root.join("docs/guide/step1.md"), "# Step 1").unwrap();
        fs::write(
            root.join("docs.json"),
            r#"[
                {"title": "Intro", "slug": "intro", "hasChild": false, "children": []},
                {"title": "Guide", "slug": "guide", "hasChild": true, "children": [
                    {"title": "Step1", "slug": "guide/step1", "hasChild": false, "children": []}
                ]}
            ]"#,
        )
        .unwrap();
        let config_path = root.join("docnav.toml");
        fs::write(
            &config_path,
            "[site]\ntitle = \"Guide\"\n\n[[nav]]\ntext = \"Home\"\nlink = \"/\"\n",
        )
        .unwrap();
        config_path
    }

    fn args(config: PathBuf) -> BuildArgs {
        BuildArgs {
            config: Some(config),
            manifest: None,
            source_dir: None,
            output: None,
            no_hooks: false,
        }
    }

    #[test]
    fn test_build_writes_definition_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_project(dir.path());

        args(config).execute().unwrap();

        let site: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join(".docnav/site.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(site["title"], "Guide");
        assert_eq!(
            site["themeConfig"]["sidebar"],
            serde_json::json!([
                {"text": "Intro", "link": "/intro", "collapsed": true},
                {"text": "Guide", "collapsed": true, "items": [
                    {"text": "Step1", "link": "/guide/step1", "collapsed": true}
                ]}
            ])
        );
        assert_eq!(
            fs::read_to_string(dir.path().join(".docnav/content/intro.md")).unwrap(),
            "你好.&#123;name}"
        );
        assert!(dir.path().join(".docnav/.gitignore").exists());
    }

    #[test]
    fn test_build_no_hooks_and_custom_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_project(dir.path());
        let output = dir.path().join("out/config.json");

        BuildArgs {
            output: Some(output.clone()),
            no_hooks: true,
            ..args(config)
        }
        .execute()
        .unwrap();

        assert!(output.exists());
        assert!(!dir.path().join(".docnav/content").exists());
    }

    #[test]
    fn test_build_invalid_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_project(dir.path());
        fs::write(dir.path().join("docs.json"), r#"[{"slug": "x"}]"#).unwrap();

        let err = args(config).execute().unwrap_err();

        assert!(matches!(err, CliError::Manifest(_)));
        assert!(!dir.path().join(".docnav/site.json").exists());
    }
}
