//! OpenAPI document for the contact API.

use axum::Json;
use utoipa::OpenApi;

use crate::api::dto::contact::{ContactData, ContactForm, ContactItem, ContactListData};
use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::api::dto::pagination::PaginationMetadata;
use crate::api::handlers::{contacts, health};
use crate::error::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "REST API for managing contacts with avatar images.",
    ),
    paths(
        contacts::get_contacts_by_filter,
        contacts::create_contact,
        contacts::delete_all_contacts,
        contacts::get_contact,
        contacts::update_contact,
        contacts::delete_contact,
        health::health_handler,
    ),
    components(schemas(
        ContactItem,
        ContactData,
        ContactListData,
        ContactForm,
        PaginationMetadata,
        ErrorBody,
        HealthResponse,
        HealthChecks,
        CheckStatus,
    )),
    tags(
        (name = "Contacts", description = "Contact management"),
        (name = "Health", description = "Service health"),
    )
)]
pub struct ApiDoc;

/// Serves the OpenAPI document.
///
/// # Endpoint
///
/// `GET /api-docs/openapi.json`
pub async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
