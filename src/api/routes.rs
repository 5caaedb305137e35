//! API route configuration.

use crate::api::handlers::{
    create_contact, delete_all_contacts, delete_contact, get_contact, get_contacts_by_filter,
    method_not_allowed, update_contact,
};
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::get};

/// Multipart overhead allowed on top of the avatar size limit.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Contact resource routes, mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `GET    /contacts`       - List contacts (filtered, paginated)
/// - `POST   /contacts`       - Create a contact (multipart, optional avatar)
/// - `DELETE /contacts`       - Delete every contact
/// - `GET    /contacts/{id}`  - Get a contact
/// - `PUT    /contacts/{id}`  - Update a contact (multipart, optional avatar)
/// - `DELETE /contacts/{id}`  - Delete a contact
///
/// Any other verb on these paths answers `405 Method Not Allowed`.
pub fn contact_routes(avatar_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/contacts",
            get(get_contacts_by_filter)
                .post(create_contact)
                .delete(delete_all_contacts)
                .fallback(method_not_allowed),
        )
        .route(
            "/contacts/{id}",
            get(get_contact)
                .put(update_contact)
                .delete(delete_contact)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(
            avatar_max_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
}
