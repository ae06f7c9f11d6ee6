//! Turns validated tool input into a backend request.

use serde_json::{Map, Value};
use tracing::info;

use super::classifier::ParameterGroups;
use crate::catalog::{HttpMethod, RouteTemplate};
use crate::http::HttpRequest;

/// String form of a JSON value as it appears in a path or query string.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => value.to_string(),
    }
}

/// Substitutes declared path parameters into the route template.
///
/// Each `{name}` is replaced once. Placeholders whose parameter is absent
/// or `null` stay in the path verbatim.
pub fn resolve_path(
    template: &RouteTemplate,
    path_params: &[String],
    args: &Map<String, Value>,
) -> String {
    let mut path = template.as_str().to_string();

    for name in path_params {
        match args.get(name) {
            None | Some(Value::Null) => continue,
            Some(value) => {
                let placeholder = format!("{{{name}}}");
                path = path.replacen(&placeholder, &value_to_string(value), 1);
            }
        }
    }

    path
}

/// Collects query entries for the declared query parameters.
///
/// Arrays produce one entry per element under the same key, in order.
pub fn build_query(query_params: &[String], args: &Map<String, Value>) -> Vec<(String, String)> {
    let mut query = Vec::new();

    for name in query_params {
        match args.get(name) {
            None | Some(Value::Null) => {}
            Some(Value::Array(items)) => {
                query.extend(items.iter().map(|item| (name.clone(), value_to_string(item))));
            }
            Some(value) => query.push((name.clone(), value_to_string(value))),
        }
    }

    query
}

/// Form-encodes query entries, e.g. `tags=a&tags=b`.
pub fn encode_query(query: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query)
        .finish()
}

/// Every input key that is not a declared path or query parameter, with its
/// original value.
pub fn residual_body(groups: &ParameterGroups, args: &Map<String, Value>) -> Map<String, Value> {
    args.iter()
        .filter(|(key, _)| !groups.is_declared(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Headers sent with every tool request.
pub fn default_headers(token: &str) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        ("Authorization".to_string(), format!("Bearer {token}")),
    ]
}

/// Builds the request for one invocation.
pub fn build_request(
    method: HttpMethod,
    template: &RouteTemplate,
    groups: &ParameterGroups,
    args: &Map<String, Value>,
    token: &str,
) -> HttpRequest {
    let path = resolve_path(template, &groups.path, args);
    let query = build_query(&groups.query, args);

    let body = if method.sends_body() {
        Some(Value::Object(residual_body(groups, args)))
    } else {
        info!(route = %template, query = %encode_query(&query), "GET query");
        None
    };

    HttpRequest {
        method,
        path,
        headers: default_headers(token),
        query,
        body,
    }
}
