//! Layout mesh cache management

use std::collections::HashMap;

use shared::{PlacementId, RoomSpec};

use super::{build_layout_meshes, AssetLibrary};
use crate::state::Placement;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::Aabb;

/// Cached world-space mesh data, rebuilt when the layout, the room, or the
/// asset library changes. Selection does not invalidate it; highlighting is
/// a draw-time tint.
pub struct LayoutMeshCache {
    meshes: HashMap<PlacementId, MeshData>,
    aabbs: HashMap<PlacementId, Aabb>,
    errors: HashMap<PlacementId, String>,
    layout_version: u64,
    assets_version: u64,
    room: Option<RoomSpec>,
    rebuild_count: u64,
}

impl Default for LayoutMeshCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutMeshCache {
    pub fn new() -> Self {
        Self {
            meshes: HashMap::new(),
            aabbs: HashMap::new(),
            errors: HashMap::new(),
            layout_version: u64::MAX, // force first rebuild
            assets_version: u64::MAX,
            room: None,
            rebuild_count: 0,
        }
    }

    /// Check if the cache still matches the inputs
    pub fn is_valid(&self, layout_version: u64, room: &RoomSpec, assets_version: u64) -> bool {
        self.layout_version == layout_version
            && self.assets_version == assets_version
            && self.room.as_ref() == Some(room)
    }

    /// Rebuild cached meshes and AABBs from the current placements
    pub fn rebuild(
        &mut self,
        room: &RoomSpec,
        placements: &[Placement],
        assets: &mut AssetLibrary,
        layout_version: u64,
    ) {
        let (meshes, errors) = build_layout_meshes(room, placements, assets);
        self.meshes = meshes;
        self.errors = errors;
        self.aabbs = self
            .meshes
            .iter()
            .map(|(id, mesh)| (id.clone(), Aabb::from_mesh(mesh)))
            .collect();
        self.layout_version = layout_version;
        self.assets_version = assets.version();
        self.room = Some(*room);
        self.rebuild_count += 1;
    }

    /// Clone the cached mesh map (for passing into PaintCallback)
    pub fn meshes_clone(&self) -> HashMap<PlacementId, MeshData> {
        self.meshes.clone()
    }

    /// Borrow the cached meshes
    pub fn meshes(&self) -> &HashMap<PlacementId, MeshData> {
        &self.meshes
    }

    /// Rebuild counter
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    /// Get the cached AABBs
    pub fn aabbs(&self) -> &HashMap<PlacementId, Aabb> {
        &self.aabbs
    }

    /// Get mesh build errors
    pub fn errors(&self) -> &HashMap<PlacementId, String> {
        &self.errors
    }
}
