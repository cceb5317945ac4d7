//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::convert::Infallible;

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// A `${VAR}` left unexpanded because VAR is unset is an error.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |var| {
        Ok::<_, Infallible>(std::env::var(var).ok())
    })
    .map_or_else(|_| value.to_owned(), std::borrow::Cow::into_owned);

    match unresolved_var(&expanded) {
        Some(var) => Err(ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{var}}} not set"),
        }),
        None => Ok(expanded),
    }
}

/// Name of the first `${VAR}` reference still present in `value`.
fn unresolved_var(value: &str) -> Option<&str> {
    let start = value.find("${")? + 2;
    let rest = &value[start..];
    let end = rest.find(['}', ':'])?;
    Some(&rest[..end])
}
