//! API surfaces: the store (customer-facing) and admin audiences.
//!
//! A surface decides how tools are named and described, which optional body
//! fields non-`get` tools accept, and which bearer token is sent.

pub mod admin;
pub mod store;

pub use admin::AdminSurface;
pub use store::StoreSurface;

use std::fmt;

use secrecy::SecretString;

use crate::compiler::FieldRule;

/// Which API audience a surface serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SurfaceKind {
    Store,
    Admin,
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceKind::Store => f.write_str("store"),
            SurfaceKind::Admin => f.write_str("admin"),
        }
    }
}

/// Per-surface decoration and credentials used by the tool compiler.
pub trait Surface: Send + Sync + fmt::Debug {
    fn kind(&self) -> SurfaceKind;

    /// Tool name for an operation identifier.
    fn tool_name(&self, operation_id: &str) -> String;

    /// Tool description for an operation's optional description.
    fn tool_description(&self, description: Option<&str>) -> String;

    /// Optional body fields added to every non-`get` tool.
    fn body_fields(&self) -> &'static [(&'static str, FieldRule)];

    /// The bearer token sent with every request.
    fn bearer_token(&self) -> &SecretString;
}

/// Prefixes an operation description with an audience sentence.
pub(crate) fn describe(preamble: &str, description: Option<&str>) -> String {
    match description.map(str::trim).filter(|d| !d.is_empty()) {
        Some(description) => format!("{preamble} {description}"),
        None => preamble.to_string(),
    }
}
