//! Role ladder feature.
//!
//! Three fixed tiers, `Administrator > Supervisor > Company`. Every role
//! manages the roles strictly below it.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/roles` | No | List all roles |
//! | GET | `/api/roles/{role}/subordinates` | No | Roles below a named role |
//! | GET | `/api/roles/subordinates` | Yes | Roles below the caller |

pub mod dtos;
pub mod handlers;
pub mod hierarchy;
pub mod models;
pub mod routes;
