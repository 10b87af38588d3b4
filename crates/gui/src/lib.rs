// Library crate: exposes testable modules for integration tests and headless use.
// GUI-specific modules (app, ui, viewport rendering) remain in the binary crate.

pub mod build;
pub mod export;
pub mod fixtures;
pub mod harness;
pub mod plan;
pub mod state;
pub mod validation;

/// Subset of viewport types needed by build/picking (MeshData, Aabb, Ray).
/// The full viewport (camera, renderer, GL) stays in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
