mod application_user;

pub use application_user::ApplicationUser;
