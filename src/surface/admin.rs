use std::sync::Arc;

use secrecy::SecretString;

use super::{Surface, SurfaceKind, describe};
use crate::auth::{AdminSession, Authenticated};
use crate::compiler::FieldRule;

const PREAMBLE: &str = "This tool helps store administrators.";
const NAME_PREFIX: &str = "Admin";

/// Body fields accepted by admin tools that send a body.
pub const ADMIN_BODY_FIELDS: &[(&str, FieldRule)] = &[
    ("title", FieldRule::String),
    ("subtitle", FieldRule::String),
    ("description", FieldRule::String),
    ("handle", FieldRule::String),
    ("status", FieldRule::String),
    ("thumbnail", FieldRule::String),
    ("is_giftcard", FieldRule::Boolean),
    ("discountable", FieldRule::Boolean),
    ("weight", FieldRule::Number),
    ("images", FieldRule::Unknown),
    ("tags", FieldRule::Unknown),
    ("categories", FieldRule::Unknown),
    ("collection_id", FieldRule::String),
    ("type_id", FieldRule::String),
    ("options", FieldRule::Unknown),
    ("variants", FieldRule::Unknown),
    ("sales_channels", FieldRule::Unknown),
    ("name", FieldRule::String),
    ("is_active", FieldRule::Boolean),
    ("rank", FieldRule::Number),
    ("parent_category_id", FieldRule::String),
    ("metadata", FieldRule::Unknown),
];

/// The admin surface. Only constructible from an authenticated session.
#[derive(Debug, Clone)]
pub struct AdminSurface {
    session: Arc<AdminSession<Authenticated>>,
}

impl AdminSurface {
    pub fn new(session: AdminSession<Authenticated>) -> Self {
        Self {
            session: Arc::new(session),
        }
    }
}

impl Surface for AdminSurface {
    fn kind(&self) -> SurfaceKind {
        SurfaceKind::Admin
    }

    fn tool_name(&self, operation_id: &str) -> String {
        format!("{NAME_PREFIX}{operation_id}")
    }

    fn tool_description(&self, description: Option<&str>) -> String {
        describe(PREAMBLE, description)
    }

    fn body_fields(&self) -> &'static [(&'static str, FieldRule)] {
        ADMIN_BODY_FIELDS
    }

    fn bearer_token(&self) -> &SecretString {
        self.session.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_admin_decoration() {
        let surface = AdminSurface::new(AdminSession::authenticated("jwt-abc"));

        assert_eq!(surface.tool_name("GetProduct"), "AdminGetProduct");
        assert_eq!(surface.tool_description(None), PREAMBLE);
        assert_eq!(surface.bearer_token().expose_secret(), "jwt-abc");
        assert_eq!(surface.kind(), SurfaceKind::Admin);
    }
}
