//! Build hooks run over the markdown source tree.
//!
//! Each hook occupies a named plugin slot and applies a [`MarkdownTransform`]
//! to the files its include glob selects. Running the hooks mirrors the
//! source tree into a destination directory: matching files are written
//! transformed, everything else is copied as is.

use std::fs;
use std::path::{Path, PathBuf};

use docnav_config::MarkdownConfig;
use docnav_markdown::{MarkdownTransform, RandomPlaceholder, TransformError};
use glob::Pattern;
use tracing::{debug, info, warn};

use crate::definition::HookDescriptor;

/// Plugin slot of the markdown transform hook.
pub const MARKDOWN_HOOK: &str = "markdown-transform";

/// Error returned by hook registration or execution.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    /// Include glob is invalid.
    #[error("Invalid include pattern '{include}' for hook {name}: {source}")]
    Pattern {
        /// Hook name.
        name: String,
        /// Offending pattern.
        include: String,
        /// Glob error.
        source: glob::PatternError,
    },
    /// A hook with this name is already registered.
    #[error("Hook {0} is already registered")]
    Duplicate(String),
    /// Transform could not be constructed.
    #[error("{0}")]
    Transform(#[from] TransformError),
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> HookError + '_ {
    move |source| HookError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Files processed by [`BuildHooks::run`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HookReport {
    /// Files rewritten by at least one hook.
    pub transformed: usize,
    /// Files copied unchanged.
    pub copied: usize,
}

#[derive(Debug)]
struct BuildHook {
    name: String,
    include: Pattern,
    transform: MarkdownTransform,
}

/// Registry of build hooks, applied in registration order.
#[derive(Debug, Default)]
pub struct BuildHooks {
    hooks: Vec<BuildHook>,
}

impl BuildHooks {
    /// Registry with the markdown transform hook configured from `config`.
    ///
    /// Empty when the hook is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`HookError`] for an invalid include glob or placeholder marker.
    pub fn from_config(config: &MarkdownConfig) -> Result<Self, HookError> {
        let mut hooks = Self::default();
        if config.enabled {
            let transform = MarkdownTransform::new(
                &config.placeholder_marker,
                RandomPlaceholder::new(config.placeholder_url.clone()),
            )?;
            hooks.register(MARKDOWN_HOOK, &config.include, transform)?;
        }
        Ok(hooks)
    }

    /// Register a hook under `name` for files matching `include`.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Duplicate`] if `name` is taken, or
    /// [`HookError::Pattern`] if `include` is not a valid glob.
    pub fn register(
        &mut self,
        name: &str,
        include: &str,
        transform: MarkdownTransform,
    ) -> Result<(), HookError> {
        if self.hooks.iter().any(|hook| hook.name == name) {
            return Err(HookError::Duplicate(name.to_owned()));
        }
        let pattern = Pattern::new(include).map_err(|source| HookError::Pattern {
            name: name.to_owned(),
            include: include.to_owned(),
            source,
        })?;
        debug!(name, include, "Registered build hook");
        self.hooks.push(BuildHook {
            name: name.to_owned(),
            include: pattern,
            transform,
        });
        Ok(())
    }

    /// Number of registered hooks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True if no hook is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Name and include glob of each hook.
    #[must_use]
    pub fn descriptors(&self) -> Vec<HookDescriptor> {
        self.hooks
            .iter()
            .map(|hook| HookDescriptor {
                name: hook.name.clone(),
                include: hook.include.as_str().to_owned(),
            })
            .collect()
    }

    /// Apply every hook matching `rel_path` to `text`.
    ///
    /// `rel_path` uses `/` separators. Returns `None` when no hook matches.
    #[must_use]
    pub fn transform(&self, rel_path: &str, text: &str) -> Option<String> {
        let mut matched = self
            .hooks
            .iter()
            .filter(|hook| hook.include.matches(rel_path))
            .peekable();
        matched.peek()?;

        let mut current = text.to_owned();
        for hook in matched {
            let result = hook.transform.apply(&current);
            debug!(
                hook = %hook.name,
                file = rel_path,
                periods = result.replacements.periods,
                braces = result.replacements.braces,
                images = result.replacements.images,
                "Applied build hook"
            );
            current = result.text;
        }
        Some(current)
    }

    /// Mirror `source` into `dest`, transforming files matched by a hook.
    ///
    /// Hidden entries and `dest` itself (when nested inside `source`) are skipped.
    /// Matching files that are not valid UTF-8 are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::Io`] if reading or writing fails.
    pub fn run(&self, source: &Path, dest: &Path) -> Result<HookReport, HookError> {
        let mut report = HookReport::default();
        fs::create_dir_all(dest).map_err(io_error(dest))?;
        self.run_directory(source, dest, "", &mut report)?;
        info!(
            transformed = report.transformed,
            copied = report.copied,
            dest = %dest.display(),
            "Build hooks finished"
        );
        Ok(report)
    }

    fn run_directory(
        &self,
        dir: &Path,
        dest_root: &Path,
        rel_prefix: &str,
        report: &mut HookReport,
    ) -> Result<(), HookError> {
        let mut entries = fs::read_dir(dir)
            .map_err(io_error(dir))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error(dir))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if path == dest_root {
                continue;
            }
            let rel = if rel_prefix.is_empty() {
                name
            } else {
                format!("{rel_prefix}/{name}")
            };

            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.run_directory(&path, dest_root, &rel, report)?;
                continue;
            }

            let target = dest_root.join(&rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }

            let transformed = if self.hooks.iter().any(|hook| hook.include.matches(&rel)) {
                let bytes = fs::read(&path).map_err(io_error(&path))?;
                match String::from_utf8(bytes) {
                    Ok(text) => self.transform(&rel, &text),
                    Err(_) => {
                        warn!(file = %rel, "Not valid UTF-8, copying unchanged");
                        None
                    }
                }
            } else {
                None
            };

            if let Some(text) = transformed {
                fs::write(&target, text).map_err(io_error(&target))?;
                report.transformed += 1;
            } else {
                fs::copy(&path, &target).map_err(io_error(&path))?;
                report.copied += 1;
            }
        }

        Ok(())
    }
}
