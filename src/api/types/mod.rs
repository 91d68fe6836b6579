//! Request and response types shared by the HTTP handlers

pub mod error;
pub mod extract;
pub mod game;

pub use error::{ApiError, ApiErrorResponse};
pub use extract::{Form, InputRejection, Json, Query};
pub use game::{non_empty, MessageResponse, PlayerMessageResponse, PlayerResponse};
