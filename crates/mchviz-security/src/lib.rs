//! Account lookup, password verification, and login sessions.

pub mod error;
pub mod password;
pub mod sessions;
pub mod users;

pub use error::SecurityError;
pub use sessions::{Session, SessionStore};
pub use users::{InMemoryUserStore, User, UserStore};
