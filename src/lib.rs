//! Surface Context: focus tracking for front-facing application surfaces
//!
//! Keeps one non-owning execution-context handle per surface kind (app, primary console,
//! graphics, web, other) and tracks which surface is current, so subsystems can resolve
//! "the context to use right now" without holding a reference to any surface.

pub mod config;
pub mod error;
pub mod logging;
pub mod registry;
pub mod surface;

pub use config::{ConfigLoader, RegistryConfig, SurfaceConfig};
pub use error::ApiError;
pub use registry::{RegistrySnapshot, SlotSnapshot, SurfaceContextRegistry};
pub use surface::SurfaceKind;
