//! Path template rendering
//!
//! Endpoint paths contain `{param}` placeholders (e.g.
//! `/projects/{project_id}/keys`) that are substituted from a parameter map
//! before a request is issued.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Regex for matching path placeholders: {param_name}
static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap());

/// Path parameters for endpoint templates
pub type PathParams = HashMap<&'static str, String>;

/// Render a path template, substituting every `{param}` from the map.
///
/// Fails with [`Error::MissingPathParam`] if a placeholder has no value.
pub fn render_path(template: &str, params: &PathParams) -> Result<String> {
    let mut result = template.to_string();

    for cap in PLACEHOLDER_REGEX.captures_iter(template) {
        let full_match = cap.get(0).unwrap().as_str();
        let name = cap.get(1).unwrap().as_str();

        match params.get(name) {
            Some(value) => {
                result = result.replace(full_match, value);
            }
            None => return Err(Error::missing_param(name)),
        }
    }

    Ok(result)
}

/// Convenience constructor for a single-parameter map
pub fn params(key: &'static str, value: impl Into<String>) -> PathParams {
    let mut map = PathParams::new();
    map.insert(key, value.into());
    map
}
