//! World-space mesh building for the layout.
//!
//! Every placement becomes one baked world-space mesh: the procedural
//! template (or a loaded asset) transformed by scale, yaw and the
//! placement's floor position. The cache rebuilds only when the layout, the
//! room, or the asset library moved.

pub mod assets;
mod cache;
pub mod furniture;

pub use assets::{AssetLibrary, AssetStatus};
pub use cache::LayoutMeshCache;

use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};

use shared::{PlacementId, RoomSpec};

use crate::plan;
use crate::state::Placement;
use crate::viewport::mesh::MeshData;

/// Placement-local to world transform: uniform scale, then yaw, then
/// translation to the placement's floor point. Positive plan rotation reads
/// clockwise from above, matching the 2D surface.
pub fn placement_transform(room: &RoomSpec, placement: &Placement) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(placement.scale),
        Quat::from_rotation_y(-placement.rotation_deg.to_radians()),
        plan::plan_to_world(room, placement.pos),
    )
}

/// Build one world-space mesh per placement. A placement whose asset is
/// still loading or has failed gets the procedural template instead;
/// failures land in the error map keyed by placement id.
pub fn build_layout_meshes(
    room: &RoomSpec,
    placements: &[Placement],
    assets: &mut AssetLibrary,
) -> (HashMap<PlacementId, MeshData>, HashMap<PlacementId, String>) {
    let mut meshes: HashMap<PlacementId, MeshData> = HashMap::new();
    let mut errors: HashMap<PlacementId, String> = HashMap::new();

    for placement in placements {
        let local = match placement.item.asset_ref.as_deref() {
            Some(asset_ref) => {
                assets.request(asset_ref);
                match assets.status(asset_ref) {
                    Some(AssetStatus::Ready(mesh)) => {
                        assets::fit_to_dims(mesh, placement.item.dims_m())
                    }
                    Some(AssetStatus::Failed(msg)) => {
                        errors.insert(placement.id.clone(), msg.clone());
                        furniture::generate(&placement.item)
                    }
                    _ => furniture::generate(&placement.item),
                }
            }
            None => furniture::generate(&placement.item),
        };
        meshes.insert(
            placement.id.clone(),
            local.transformed(placement_transform(room, placement)),
        );
    }

    (meshes, errors)
}
