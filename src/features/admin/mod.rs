//! Membership administration for supervisors and administrators.
//!
//! Every change is limited to accounts below the actor on the role ladder
//! (see [`crate::features::roles::hierarchy`]).

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
