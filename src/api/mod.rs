/// Backend API access
///
/// - `client.rs` - the four endpoints plus the health probe
/// - `error.rs` - failure taxonomy and user-facing messages

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
