//! Services layer for complaint-service.
//!
//! Domain operations, user storage, identifier generation and login
//! sessions.

pub mod complaints;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod sessions;
pub mod store;

pub use complaints::{ComplaintService, NewComplaint, DEFAULT_MAX_ID_ATTEMPTS};
pub use error::ServiceError;
pub use generator::{IdGenerator, RandomIdGenerator};
pub use sessions::{IssuedSession, SessionStore};
pub use store::{InMemoryUserStore, StoreError, UserStore};
