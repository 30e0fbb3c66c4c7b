//! Common types, protocol definitions, and errors for the `ezcrypt` HTTP surface.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
