use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppPath, AppQuery};
use crate::features::attachments::dtos::{
    is_mime_type_allowed, AttachmentResponseDto, ContentDisposition, FileQuery,
    UploadAttachmentDto, UploadMetadata, ALLOWED_MIME_TYPES, MAX_FILE_SIZE,
};
use crate::features::attachments::guid::AttachmentPath;
use crate::features::attachments::services::{
    AttachmentService, NewAttachment, StoredFile, Thumbnail,
};
use crate::features::auth::guards::RequireSupervisor;
use crate::shared::types::ApiResponse;

const PLACEHOLDER_PATH: &str = "/attachments/placeholder";

/// Raw file response with its MIME type and optional disposition
fn serve(file: StoredFile, disposition: Option<ContentDisposition>) -> Result<Response> {
    let content_type = HeaderValue::from_str(&file.mime_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    let disposition = disposition
        .map(|d| {
            HeaderValue::from_str(&d.header_value(&file.filename)).map_err(|e| {
                AppError::Internal(format!("Invalid Content-Disposition header: {}", e))
            })
        })
        .transpose()?;

    let mut response = ([(header::CONTENT_TYPE, content_type)], file.data).into_response();
    if let Some(value) = disposition {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }

    Ok(response)
}

/// Download an attachment
#[utoipa::path(
    get,
    path = "/attachments/file/{id}",
    params(
        ("id" = Uuid, Path, description = "Attachment ID"),
        FileQuery
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "Attachment or stored file not found"),
        (status = 502, description = "Storage unavailable")
    ),
    tag = "attachments"
)]
pub async fn get_file(
    State(service): State<Arc<AttachmentService>>,
    AppPath(id): AppPath<Uuid>,
    AppQuery(query): AppQuery<FileQuery>,
) -> Result<Response> {
    let file = service.file(id).await?;
    serve(file, Some(query.disposition))
}

/// Thumbnail of an attachment
///
/// Images without a thumbnail redirect to the full file; anything else
/// without a thumbnail redirects to the placeholder.
#[utoipa::path(
    get,
    path = "/attachments/thumb/{id}",
    params(
        ("id" = Uuid, Path, description = "Attachment ID")
    ),
    responses(
        (status = 200, description = "Thumbnail content"),
        (status = 307, description = "Redirect to the file or the placeholder")
    ),
    tag = "attachments"
)]
pub async fn get_thumb(
    State(service): State<Arc<AttachmentService>>,
    AppPath(id): AppPath<Uuid>,
) -> Result<Response> {
    match service.thumbnail(id).await? {
        Thumbnail::Stored(file) => serve(file, None),
        Thumbnail::RedirectToFile => {
            Ok(Redirect::temporary(&format!("/attachments/file/{}", id)).into_response())
        }
        Thumbnail::Placeholder => Ok(Redirect::temporary(PLACEHOLDER_PATH).into_response()),
    }
}

/// Generic placeholder image
#[utoipa::path(
    get,
    path = "/attachments/placeholder",
    responses(
        (status = 200, description = "Placeholder image"),
        (status = 404, description = "Placeholder not configured")
    ),
    tag = "attachments"
)]
pub async fn get_placeholder(State(service): State<Arc<AttachmentService>>) -> Result<Response> {
    let file = service.placeholder().await?;
    serve(file, None)
}

/// Serve an upload by its public path
#[utoipa::path(
    get,
    path = "/uploads/{year}/{month}/{filename}",
    params(
        ("year" = String, Path, description = "Upload year (4 digits)"),
        ("month" = String, Path, description = "Upload month (2 digits)"),
        ("filename" = String, Path, description = "Stored file name")
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 404, description = "Upload not found")
    ),
    tag = "attachments"
)]
pub async fn get_upload(
    State(service): State<Arc<AttachmentService>>,
    Path((year, month, filename)): Path<(String, String, String)>,
) -> Result<Response> {
    let path = AttachmentPath {
        year,
        month,
        filename,
    };
    let file = service.file_by_path(&path).await?;
    serve(file, Some(ContentDisposition::Inline))
}

/// Upload an attachment
///
/// Accepts multipart/form-data with:
/// - `file`: The file to upload (required)
/// - `description`: Optional caption
#[utoipa::path(
    post,
    path = "/api/attachments",
    tag = "attachments",
    request_body(
        content = UploadAttachmentDto,
        content_type = "multipart/form-data",
        description = "Attachment upload form with an optional description",
    ),
    responses(
        (status = 201, description = "Attachment uploaded", body = ApiResponse<AttachmentResponseDto>),
        (status = 400, description = "Invalid file or validation error"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Forbidden - Supervisor access required"),
        (status = 413, description = "File too large")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn upload_attachment(
    RequireSupervisor(user): RequireSupervisor,
    State(service): State<Arc<AttachmentService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<AttachmentResponseDto>>)> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut metadata = UploadMetadata::default();

    // Process multipart fields
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let ct = field
                    .content_type()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());

                let fname = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
                file_name = Some(fname);
                content_type = Some(ct);
            }
            "description" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read description field: {}", e))
                })?;
                let text = text.trim();
                if !text.is_empty() {
                    metadata.description = Some(text.to_string());
                }
            }
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    metadata
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let file_data =
        file_data.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    let file_name =
        file_name.ok_or_else(|| AppError::BadRequest("Filename is required".to_string()))?;
    let content_type =
        content_type.ok_or_else(|| AppError::BadRequest("Content type is required".to_string()))?;

    if file_data.len() > MAX_FILE_SIZE {
        return Err(AppError::BadRequest(format!(
            "File too large. Maximum size is {} bytes ({} MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }

    if !is_mime_type_allowed(&content_type) {
        return Err(AppError::BadRequest(format!(
            "File type '{}' is not allowed. Allowed types: {}",
            content_type,
            ALLOWED_MIME_TYPES.join(", ")
        )));
    }

    let upload = NewAttachment {
        data: file_data,
        original_filename: file_name,
        content_type,
        description: metadata.description,
    };
    let response = service.upload(upload, &user.sub).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(response), None, None)),
    ))
}
