//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod inference;
mod resources;
mod session;

pub use inference::InferenceService;
pub use resources::{ResourceLoader, Resources};
pub use session::{InferenceSession, SessionState};
