//! `docnav transform` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::Config;
use docnav_markdown::{MarkdownTransform, RandomPlaceholder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the transform command.
#[derive(Args)]
pub(crate) struct TransformArgs {
    /// Markdown file to transform.
    file: PathBuf,

    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl TransformArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if !MarkdownTransform::applies_to(&self.file) {
            output.warning(&format!(
                "{} is not a .md file; the build hook would not run on it",
                self.file.display()
            ));
        }

        let text = self.render()?;
        output.raw(&text)?;
        Ok(())
    }

    /// Transformed file content, unchanged otherwise.
    fn render(&self) -> Result<String, CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let markdown = &config.markdown;
        let hook = MarkdownTransform::new(
            &markdown.placeholder_marker,
            RandomPlaceholder::new(markdown.placeholder_url.clone()),
        )?;

        let text = std::fs::read_to_string(&self.file)?;
        Ok(hook.transform(&text))
    }
}
