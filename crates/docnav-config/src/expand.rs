//! `${VAR}` expansion for string settings.
//!
//! - `${VAR}` is replaced by the value of VAR and fails when VAR is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset
//!
//! Values without a `${` are returned untouched, so literal dollars in
//! HTML snippets survive.

use crate::ConfigError;

/// Expand environment references in `value`, reporting failures against `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name| -> Result<Option<String>, UnsetVar> {
        std::env::var(name).map(Some).map_err(|_| UnsetVar {
            name: name.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(current) = value.as_deref() {
        *value = Some(expand_env(current, field)?);
    }
    Ok(())
}

struct UnsetVar {
    name: String,
}
