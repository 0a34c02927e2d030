//! `${VAR}` / `${VAR:-default}` expansion for URL settings.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// Only the braced form is recognized; a bare `$name` is left as is, which
/// keeps URL patterns such as `.../$path` intact.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var)
            .map(Some)
            .map_err(|_| UnsetVar(var.to_owned()))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })
}

struct UnsetVar(String);

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_var() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("MDSTYLE_TEST_KROKI", "kroki.internal");
        }
        assert_eq!(
            expand_env("https://${MDSTYLE_TEST_KROKI}/", "diagrams.kroki_url").unwrap(),
            "https://kroki.internal/"
        );
        unsafe {
            std::env::remove_var("MDSTYLE_TEST_KROKI");
        }
    }

    #[test]
    fn test_expand_default() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDSTYLE_TEST_UNSET_CDN");
        }
        assert_eq!(
            expand_env("${MDSTYLE_TEST_UNSET_CDN:-https://cdn.example}/{theme}.css", "f").unwrap(),
            "https://cdn.example/{theme}.css"
        );
    }

    #[test]
    fn test_missing_var_names_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("MDSTYLE_TEST_MISSING");
        }
        let err = expand_env("${MDSTYLE_TEST_MISSING}", "assets.stylesheet_url").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("MDSTYLE_TEST_MISSING"), "{msg}");
        assert!(msg.contains("assets.stylesheet_url"), "{msg}");
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("https://kroki.io", "f").unwrap(), "https://kroki.io");
        assert_eq!(expand_env("https://x/$path", "f").unwrap(), "https://x/$path");
    }
}
