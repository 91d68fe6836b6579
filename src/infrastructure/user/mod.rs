//! User infrastructure module
//!
//! Password hashing with Argon2 and the account service handling registration
//! and login.

mod password;
mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use service::{AccountService, RegisterRequest, Registration};
