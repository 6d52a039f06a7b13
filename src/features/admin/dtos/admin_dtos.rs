use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::admin::models::ApplicationUser;
use crate::features::roles::models::Role;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// =============================================================================
// USER DTOs
// =============================================================================

/// Query params for listing users
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct UserQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,
    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,
    /// Only users holding this role
    #[param(value_type = Option<String>, example = "Company")]
    pub role: Option<Role>,
    /// Leave out locked-out users
    #[serde(default)]
    pub only_enabled: bool,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

impl UserQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit())
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

/// User as seen by supervisors and administrators
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminUserDto {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub firstname: String,
    pub lastname: String,
    pub company: String,
    pub language: String,
    pub approved: bool,
    pub accept_terms_of_service: bool,
    pub last_access: DateTime<Utc>,
    pub locked_out: bool,
    pub roles: Vec<String>,
    pub primary_role: Option<Role>,
}

impl From<ApplicationUser> for AdminUserDto {
    fn from(u: ApplicationUser) -> Self {
        Self {
            full_name: u.full_name(),
            locked_out: u.is_locked_out(Utc::now()),
            primary_role: u.primary_role(),
            id: u.id,
            email: u.email,
            firstname: u.firstname,
            lastname: u.lastname,
            company: u.company,
            language: u.language,
            approved: u.approved,
            accept_terms_of_service: u.accept_terms_of_service,
            last_access: u.last_access,
            roles: u.roles,
        }
    }
}

/// Request DTO for approving or revoking a user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateApprovalDto {
    pub approved: bool,
}

/// Request DTO for replacing a user's role
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: i64, page_size: i64) -> UserQueryParams {
        UserQueryParams {
            page,
            page_size,
            role: None,
            only_enabled: false,
        }
    }

    #[test]
    fn test_offset_and_limit() {
        assert_eq!(params(1, DEFAULT_PAGE_SIZE).offset(), 0);
        assert_eq!(params(3, 10).offset(), 20);
        assert_eq!(params(1, 5000).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(0, 10).offset(), 0);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        assert_eq!(params(i64::MAX, MAX_PAGE_SIZE).offset(), i64::MAX);
    }
}
