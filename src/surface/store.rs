use secrecy::SecretString;

use super::{Surface, SurfaceKind, describe};
use crate::compiler::FieldRule;

const PREAMBLE: &str = "This tool helps store customers.";

/// Body fields accepted by store tools that send a body.
pub const STORE_BODY_FIELDS: &[(&str, FieldRule)] = &[
    ("email", FieldRule::String),
    ("first_name", FieldRule::String),
    ("last_name", FieldRule::String),
    ("phone", FieldRule::String),
    ("company", FieldRule::String),
    ("address_1", FieldRule::String),
    ("address_2", FieldRule::String),
    ("city", FieldRule::String),
    ("country_code", FieldRule::String),
    ("province", FieldRule::String),
    ("postal_code", FieldRule::String),
    ("region_id", FieldRule::String),
    ("variant_id", FieldRule::String),
    ("quantity", FieldRule::Number),
    ("currency_code", FieldRule::String),
    ("items", FieldRule::Unknown),
    ("shipping_address", FieldRule::Object),
    ("billing_address", FieldRule::Object),
    ("promo_codes", FieldRule::StringList),
    ("metadata", FieldRule::Unknown),
];

/// The customer-facing surface. Requests carry the publishable API key as
/// the bearer token.
#[derive(Debug, Clone)]
pub struct StoreSurface {
    publishable_key: SecretString,
}

impl StoreSurface {
    pub fn new(publishable_key: SecretString) -> Self {
        Self { publishable_key }
    }
}

impl Surface for StoreSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Store
    }

    fn tool_name(&self, operation_id: &str) -> String {
        operation_id.to_string()
    }

    fn tool_description(&self, description: Option<&str>) -> String {
        describe(PREAMBLE, description)
    }

    fn body_fields(&self) -> &'static [(&'static str, FieldRule)] {
        STORE_BODY_FIELDS
    }

    fn bearer_token(&self) -> &SecretString {
        &self.publishable_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_store_decoration() {
        let surface = StoreSurface::new(SecretString::from("pk_01".to_string()));

        assert_eq!(surface.tool_name("GetProducts"), "GetProducts");
        assert_eq!(
            surface.tool_description(Some("Retrieve a list of products.")),
            "This tool helps store customers. Retrieve a list of products."
        );
        assert_eq!(surface.bearer_token().expose_secret(), "pk_01");
        assert!(surface.body_fields().iter().any(|(name, _)| *name == "metadata"));
    }
}
