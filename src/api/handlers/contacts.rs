//! Handlers for the contact resource.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::{
    ApiResponse, ContactData, ContactItem, ContactListData, ContactQueryParams,
    PaginationMetadata,
};
use crate::api::extractors::{ContactId, ContactMultipart, ValidQuery};
use crate::error::{AppError, ErrorBody};
use crate::state::AppState;

/// Lists contacts matching the filter, one page at a time.
///
/// # Endpoint
///
/// `GET /api/v1/contacts`
///
/// # Query Parameters
///
/// - `favorite` (optional): only favorites (`true`) or non-favorites (`false`)
/// - `name` (optional): case-insensitive substring of the name
/// - `page` (optional): page number (default: 1)
/// - `limit` (optional): contacts per page (default: 5, max: 100)
///
/// # Performance
///
/// The page and the total count are fetched concurrently.
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    tag = "Contacts",
    params(
        ("favorite" = Option<bool>, Query, description = "Filter by favorite flag"),
        ("name" = Option<String>, Query, description = "Case-insensitive name substring"),
        ("page" = Option<u32>, Query, description = "Page number, starting at 1"),
        ("limit" = Option<u32>, Query, description = "Contacts per page, 1 to 100"),
    ),
    responses(
        (status = 200, description = "Page of contacts", body = ApiResponse<ContactListData>),
        (status = 400, description = "Invalid filter or pagination", body = ErrorBody),
    )
)]
pub async fn get_contacts_by_filter(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ContactQueryParams>,
) -> Result<Json<ApiResponse<ContactListData>>, AppError> {
    let (offset, limit) = params
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let (contacts, total) = state
        .contact_service
        .get_contacts_by_filter(params.to_filter(), offset, limit)
        .await?;

    Ok(Json(ApiResponse::success(ContactListData {
        contacts: contacts.into_iter().map(ContactItem::from).collect(),
        metadata: PaginationMetadata::new(total, params.page(), params.limit()),
    })))
}

/// Creates a contact from a multipart form, with an optional avatar image.
///
/// # Endpoint
///
/// `POST /api/v1/contacts`
///
/// # Errors
///
/// Returns 400 if `name` is missing, a field is invalid, or the avatar is not
/// an acceptable image.
#[utoipa::path(
    post,
    path = "/api/v1/contacts",
    tag = "Contacts",
    request_body(content = crate::api::dto::contact::ContactForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Contact created", body = ApiResponse<ContactData>),
        (status = 400, description = "Invalid payload", body = ErrorBody),
    )
)]
pub async fn create_contact(
    State(state): State<AppState>,
    form: ContactMultipart,
) -> Result<(StatusCode, Json<ApiResponse<ContactData>>), AppError> {
    let new_contact = form.fields.into_new_contact()?;

    let contact = state
        .contact_service
        .create_contact(new_contact, form.avatar)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(contact.into())),
    ))
}

/// Deletes every contact and their avatars.
///
/// # Endpoint
///
/// `DELETE /api/v1/contacts`
#[utoipa::path(
    delete,
    path = "/api/v1/contacts",
    tag = "Contacts",
    responses(
        (status = 200, description = "All contacts deleted"),
    )
)]
pub async fn delete_all_contacts(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.contact_service.delete_all_contacts().await?;

    Ok(Json(ApiResponse::success(())))
}

/// Retrieves a single contact.
///
/// # Endpoint
///
/// `GET /api/v1/contacts/{id}`
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "The contact", body = ApiResponse<ContactData>),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Contact not found", body = ErrorBody),
    )
)]
pub async fn get_contact(
    State(state): State<AppState>,
    ContactId(id): ContactId,
) -> Result<Json<ApiResponse<ContactData>>, AppError> {
    let contact = state.contact_service.get_contact(id).await?;

    Ok(Json(ApiResponse::success(contact.into())))
}

/// Partially updates a contact. Only the submitted fields change.
///
/// # Endpoint
///
/// `PUT /api/v1/contacts/{id}`
///
/// Sending an empty `email`, `address` or `phone` clears that field. A new
/// `avatarFile` replaces the previous avatar, whose file is then removed.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "Contact id")),
    request_body(content = crate::api::dto::contact::ContactForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Contact updated", body = ApiResponse<ContactData>),
        (status = 400, description = "Invalid id or payload", body = ErrorBody),
        (status = 404, description = "Contact not found", body = ErrorBody),
    )
)]
pub async fn update_contact(
    State(state): State<AppState>,
    ContactId(id): ContactId,
    form: ContactMultipart,
) -> Result<Json<ApiResponse<ContactData>>, AppError> {
    let contact = state
        .contact_service
        .update_contact(id, form.fields.into_patch(), form.avatar)
        .await?;

    Ok(Json(ApiResponse::success(contact.into())))
}

/// Deletes a contact and its avatar.
///
/// # Endpoint
///
/// `DELETE /api/v1/contacts/{id}`
#[utoipa::path(
    delete,
    path = "/api/v1/contacts/{id}",
    tag = "Contacts",
    params(("id" = i64, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 400, description = "Invalid id", body = ErrorBody),
        (status = 404, description = "Contact not found", body = ErrorBody),
    )
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    ContactId(id): ContactId,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.contact_service.delete_contact(id).await?;

    Ok(Json(ApiResponse::success(())))
}
