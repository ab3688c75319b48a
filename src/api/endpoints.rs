//! Declarative endpoint table
//!
//! Every resource operation of the Lexio API is one row: name, verb, path
//! template, and whether the collection is paginated. The client dispatches
//! through this table instead of hand-writing one method body per resource.

use crate::types::Method;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One API operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Operation name, unique within the table
    pub name: &'static str,
    /// HTTP verb
    pub method: Method,
    /// Path template with `{param}` placeholders
    pub path: &'static str,
    /// Whether responses carry a `Link` pagination header
    pub paginated: bool,
}

/// The full operation table
pub const ENDPOINTS: &[Endpoint] = &[
    // Projects
    Endpoint {
        name: "list_projects",
        method: Method::GET,
        path: "/projects",
        paginated: true,
    },
    Endpoint {
        name: "get_project",
        method: Method::GET,
        path: "/projects/{project_id}",
        paginated: false,
    },
    // Keys
    Endpoint {
        name: "list_keys",
        method: Method::GET,
        path: "/projects/{project_id}/keys",
        paginated: true,
    },
    Endpoint {
        name: "create_key",
        method: Method::POST,
        path: "/projects/{project_id}/keys",
        paginated: false,
    },
    Endpoint {
        name: "delete_key",
        method: Method::DELETE,
        path: "/projects/{project_id}/keys/{key_id}",
        paginated: false,
    },
    Endpoint {
        name: "search_keys",
        method: Method::POST,
        path: "/projects/{project_id}/keys/search",
        paginated: true,
    },
    // Locales
    Endpoint {
        name: "list_locales",
        method: Method::GET,
        path: "/projects/{project_id}/locales",
        paginated: true,
    },
    // Translations
    Endpoint {
        name: "list_translations",
        method: Method::GET,
        path: "/projects/{project_id}/translations",
        paginated: true,
    },
    Endpoint {
        name: "list_translations_for_key",
        method: Method::GET,
        path: "/projects/{project_id}/keys/{key_id}/translations",
        paginated: true,
    },
    Endpoint {
        name: "create_translation",
        method: Method::POST,
        path: "/projects/{project_id}/translations",
        paginated: false,
    },
    Endpoint {
        name: "update_translation",
        method: Method::PATCH,
        path: "/projects/{project_id}/translations/{translation_id}",
        paginated: false,
    },
    Endpoint {
        name: "search_translations",
        method: Method::POST,
        path: "/projects/{project_id}/translations/search",
        paginated: true,
    },
];

static BY_NAME: Lazy<HashMap<&'static str, &'static Endpoint>> =
    Lazy::new(|| ENDPOINTS.iter().map(|e| (e.name, e)).collect());

/// Look up an operation by name
pub fn endpoint(name: &str) -> Option<&'static Endpoint> {
    BY_NAME.get(name).copied()
}
