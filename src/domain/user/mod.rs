//! User domain
//!
//! Manager accounts: entity, login-name and password validation, and the
//! repository trait backing the identity store.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use repository::UserRepository;
pub use validation::{validate_password, validate_username, UserValidationError};
