use crate::catalog::{Parameter, ParameterLocation};

/// Parameter names of one operation, grouped by location.
///
/// `header` holds everything that is neither path nor query. Those names are
/// never exposed to callers and never forwarded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterGroups {
    pub path: Vec<String>,
    pub query: Vec<String>,
    pub header: Vec<String>,
}

impl ParameterGroups {
    /// Whether `name` is consumed as a path or query parameter.
    pub fn is_declared(&self, name: &str) -> bool {
        self.path.iter().chain(&self.query).any(|declared| declared == name)
    }
}

/// Partitions declared parameters by location, keeping declaration order.
pub fn classify(parameters: &[Parameter]) -> ParameterGroups {
    let mut groups = ParameterGroups::default();

    for parameter in parameters {
        let group = match parameter.location {
            ParameterLocation::Path => &mut groups.path,
            ParameterLocation::Query => &mut groups.query,
            ParameterLocation::Header | ParameterLocation::Other(_) => &mut groups.header,
        };
        group.push(parameter.name.clone());
    }

    groups
}
