//! # Vote Security
//!
//! Session handles, the session store port, and the session manager.

pub mod error;
pub mod handle;
pub mod session;
pub mod store;
pub mod manager;

pub use error::AuthError;
pub use handle::SessionHandle;
pub use session::{Session, SessionContext, Verification};
pub use store::{MemorySessionStore, SessionStore};
pub use manager::SessionManager;
