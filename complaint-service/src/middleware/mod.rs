pub mod admin;
pub mod session;

pub use admin::{admin_auth_middleware, ADMIN_API_KEY_HEADER};
pub use session::SessionUser;
