use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}/]+)\}").expect("placeholder pattern is valid"))
}

/// A route template such as `/store/products/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteTemplate(String);

impl RouteTemplate {
    /// Creates a route template from its raw string form.
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    /// Returns the raw template string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the placeholder names in the order they appear.
    pub fn placeholders(&self) -> Vec<&str> {
        placeholder_regex()
            .captures_iter(&self.0)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str())
            .collect()
    }

    /// Whether the template contains a `{name}` placeholder.
    pub fn has_placeholder(&self, name: &str) -> bool {
        self.placeholders().contains(&name)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}
