//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the application and external systems (model format, artifact storage).

mod artifacts;
mod classifier;

pub use artifacts::{Artifact, ArtifactSource, ResourceError};
pub use classifier::{Classifier, InferenceError};
