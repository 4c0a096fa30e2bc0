//! Authentication and authorization
//!
//! - `password`: argon2 hashing of account passwords
//! - `session`: the opaque session cookie and safe redirect targets
//! - `gate`: middleware that resolves sessions and guards every route
//! - `extract`: handler-side access to the authenticated user

pub mod extract;
pub mod gate;
pub mod password;
pub mod session;

pub use extract::CurrentUser;
