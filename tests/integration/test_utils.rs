//! Shared fixtures for integration tests

use std::sync::Arc;
use surface_context::SurfaceContextRegistry;

/// Stand-in for a host-provided execution context
#[derive(Debug)]
pub struct HostContext {
    pub name: String,
}

pub fn host(name: &str) -> Arc<HostContext> {
    Arc::new(HostContext {
        name: name.to_string(),
    })
}

/// Registry constructed with an `app` context the caller keeps alive
pub fn registry_with_app() -> (SurfaceContextRegistry<HostContext>, Arc<HostContext>) {
    let app = host("app");
    (SurfaceContextRegistry::new(&app), app)
}
