//! Infrastructure layer - Storage, credentials, services and observability

pub mod auth;
pub mod logging;
pub mod market;
pub mod observability;
pub mod storage;
pub mod team;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
