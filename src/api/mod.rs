//! API layer - HTTP endpoints and middleware

pub mod auth;
pub mod health;
pub mod market;
pub mod middleware;
pub mod players;
pub mod router;
pub mod state;
pub mod team;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use middleware::RequireUser;
pub use router::create_router;
pub use state::AppState;
