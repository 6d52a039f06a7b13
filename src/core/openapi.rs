use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::admin::{dtos as admin_dtos, handlers as admin_handlers};
use crate::features::attachments::{dtos as attachments_dtos, handlers as attachments_handlers};
use crate::features::auth;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::posts::{
    dtos as posts_dtos, handlers as posts_handlers, models as posts_models,
};
use crate::features::roles::{dtos as roles_dtos, handlers as roles_handlers, models::Role};
use crate::modules::storage::FileLocation;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handler::get_me,
        // Roles
        roles_handlers::list_roles,
        roles_handlers::my_subordinated_roles,
        roles_handlers::subordinated_roles_of,
        // Categories (public)
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::get_category_path,
        // Posts (public)
        posts_handlers::list_posts,
        posts_handlers::get_post,
        posts_handlers::list_tags,
        // Attachments
        attachments_handlers::get_file,
        attachments_handlers::get_thumb,
        attachments_handlers::get_placeholder,
        attachments_handlers::get_upload,
        attachments_handlers::upload_attachment,
        // Admin
        admin_handlers::list_users,
        admin_handlers::update_approval,
        admin_handlers::update_role,
    ),
    components(
        schemas(
            // Shared
            Meta,
            FileLocation,
            // Auth
            auth::dto::MeResponseDto,
            auth::model::AuthenticatedUser,
            ApiResponse<auth::dto::MeResponseDto>,
            // Roles
            Role,
            roles_dtos::RoleDto,
            ApiResponse<Vec<roles_dtos::RoleDto>>,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CategoryPathDto,
            categories_dtos::CategoryTreeDto,
            categories_handlers::CategoryListing,
            ApiResponse<categories_handlers::CategoryListing>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            ApiResponse<categories_dtos::CategoryPathDto>,
            // Posts
            posts_models::PostStatus,
            posts_dtos::PostSummaryDto,
            posts_dtos::PostDetailDto,
            posts_dtos::TagDto,
            ApiResponse<Vec<posts_dtos::PostSummaryDto>>,
            ApiResponse<posts_dtos::PostDetailDto>,
            ApiResponse<Vec<posts_dtos::TagDto>>,
            // Attachments
            attachments_dtos::ContentDisposition,
            attachments_dtos::UploadAttachmentDto,
            attachments_dtos::AttachmentResponseDto,
            ApiResponse<attachments_dtos::AttachmentResponseDto>,
            // Admin
            admin_dtos::AdminUserDto,
            admin_dtos::UpdateApprovalDto,
            admin_dtos::UpdateRoleDto,
            ApiResponse<Vec<admin_dtos::AdminUserDto>>,
            ApiResponse<admin_dtos::AdminUserDto>,
        )
    ),
    tags(
        (name = "auth", description = "Current user"),
        (name = "roles", description = "Role ladder (Administrator > Supervisor > Company)"),
        (name = "categories", description = "Hierarchical content categories (public)"),
        (name = "posts", description = "Published posts and tags (public)"),
        (name = "attachments", description = "Uploaded photos and documents"),
        (name = "admin", description = "Membership administration (supervisors and administrators)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Instituto API",
        version = "0.1.0",
        description = "API documentation for the institute portal",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_public_and_admin_paths() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/categories/{slug}/path"));
        assert!(paths.contains_key("/api/posts/{year}/{month}/{day}/{slug}"));
        assert!(paths.contains_key("/uploads/{year}/{month}/{filename}"));
        assert!(paths.contains_key("/api/admin/users"));
    }

    #[test]
    fn test_info_modifier_overrides_title() {
        let mut doc = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Portal".to_string(),
            version: "9.9.9".to_string(),
            description: "docs".to_string(),
        }
        .modify(&mut doc);

        assert_eq!(doc.info.title, "Portal");
        assert_eq!(doc.info.version, "9.9.9");
    }
}
