//! Helpers shared by every backend.

pub mod error;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{Backoff, retry_with_backoff};
