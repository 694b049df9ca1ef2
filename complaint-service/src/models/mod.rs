pub mod complaint;
pub mod user;

pub use complaint::Complaint;
pub use user::User;
