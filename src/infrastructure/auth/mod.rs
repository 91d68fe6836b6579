//! Authentication infrastructure module
//!
//! Bearer token management for manager sessions.

mod jwt;

pub use jwt::{JwtClaims, JwtConfig, JwtService, TokenService};
