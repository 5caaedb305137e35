//! Multipart parser for contact create and update requests.

use axum::extract::multipart::Field;
use axum::extract::{FromRequest, Multipart, Request};
use bytes::BytesMut;
use serde_json::json;
use validator::Validate;

use crate::api::dto::contact::{ClearableField, ContactFormFields};
use crate::domain::entities::AvatarUpload;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::flag::parse_flag;

/// Multipart field carrying the avatar image.
pub const AVATAR_FIELD: &str = "avatarFile";

/// Parsed and validated `multipart/form-data` contact body.
///
/// # Fields
///
/// - `name`, `email`, `address`, `phone`: text, trimmed
/// - `favorite`: boolean flag (`true/false`, `1/0`, `on/off`, `yes/no`)
/// - `avatarFile`: optional image file, at most `AppState::avatar_max_bytes`
///
/// Unknown fields are ignored. An empty file part means "no avatar".
#[derive(Debug)]
pub struct ContactMultipart {
    pub fields: ContactFormFields,
    pub avatar: Option<AvatarUpload>,
}

impl FromRequest<AppState> for ContactMultipart {
    type Rejection = AppError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state).await?;
        let mut fields = ContactFormFields::default();
        let mut avatar = None;

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                AVATAR_FIELD => avatar = read_avatar(field, state.avatar_max_bytes).await?,
                "name" => fields.name = Some(read_text(field).await?),
                "email" => {
                    fields.email =
                        read_clearable(field, ClearableField::Email, &mut fields.cleared).await?;
                }
                "address" => {
                    fields.address =
                        read_clearable(field, ClearableField::Address, &mut fields.cleared).await?;
                }
                "phone" => {
                    fields.phone =
                        read_clearable(field, ClearableField::Phone, &mut fields.cleared).await?;
                }
                "favorite" => fields.favorite = read_flag(field).await?,
                _ => {}
            }
        }

        fields.validate()?;

        Ok(Self { fields, avatar })
    }
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    Ok(field.text().await?.trim().to_string())
}

/// Reads an optional text field. An empty value marks the field as cleared.
async fn read_clearable(
    field: Field<'_>,
    kind: ClearableField,
    cleared: &mut Vec<ClearableField>,
) -> Result<Option<String>, AppError> {
    let value = read_text(field).await?;
    cleared.retain(|k| *k != kind);
    if value.is_empty() {
        cleared.push(kind);
        Ok(None)
    } else {
        Ok(Some(value))
    }
}

async fn read_flag(field: Field<'_>) -> Result<Option<bool>, AppError> {
    let value = read_text(field).await?;
    if value.is_empty() {
        return Ok(None);
    }

    parse_flag(&value).map(Some).ok_or_else(|| {
        AppError::bad_request(
            "Invalid input",
            json!({ "fields": { "favorite": ["Favorite must be a boolean"] } }),
        )
    })
}

/// Reads the avatar file, enforcing the size limit while streaming.
async fn read_avatar(
    mut field: Field<'_>,
    max_bytes: usize,
) -> Result<Option<AvatarUpload>, AppError> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let mut data = BytesMut::new();

    while let Some(chunk) = field.chunk().await? {
        if data.len() + chunk.len() > max_bytes {
            return Err(AppError::bad_request(
                "Avatar file is too large",
                json!({ "max_bytes": max_bytes }),
            ));
        }
        data.extend_from_slice(&chunk);
    }

    let upload = AvatarUpload::new(file_name, content_type, data.freeze());

    Ok((!upload.is_empty()).then_some(upload))
}
