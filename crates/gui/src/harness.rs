//! Headless test harness for programmatic layout manipulation.
//!
//! Drives the same model, interaction contract, and mesh pipeline as the
//! running application, minus any window or GL context. Integration tests
//! script pointer flows against it.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use shared::{PlacementId, RoomSpec};

use crate::build::{AssetLibrary, LayoutMeshCache};
use crate::plan::{self, PlanPos};
use crate::state::{CatalogState, InteractionState, LayoutState};
use crate::validation::MeshValidator;
use crate::viewport::mesh::MeshData;
use crate::viewport::picking::{self, Ray};

/// Headless harness: room, catalog, layout, interaction, and mesh cache.
pub struct PlannerHarness {
    pub room: RoomSpec,
    pub catalog: CatalogState,
    pub layout: LayoutState,
    pub interaction: InteractionState,
    pub assets: AssetLibrary,
    cache: LayoutMeshCache,
}

impl Default for PlannerHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl PlannerHarness {
    /// Create a harness with the demo catalog and the default room.
    pub fn new() -> Self {
        Self::with_room(RoomSpec::default())
    }

    pub fn with_room(room: RoomSpec) -> Self {
        Self {
            room,
            catalog: CatalogState::default(),
            layout: LayoutState::default(),
            interaction: InteractionState::default(),
            assets: AssetLibrary::new(),
            cache: LayoutMeshCache::new(),
        }
    }

    // ── Layout manipulation ───────────────────────────────────

    /// Add a catalog item at the room center (the deep-link path).
    /// Unknown ids are a no-op.
    pub fn add_item(&mut self, item_id: &str) -> Option<PlacementId> {
        let item = self.catalog.resolve(item_id)?;
        Some(self.layout.place(item, PlanPos::CENTER))
    }

    /// Drop a catalog item at plan coordinates (percent, clamped).
    pub fn drop_item_at(&mut self, item_id: &str, x_pct: f32, y_pct: f32) -> Option<PlacementId> {
        let item = self.catalog.resolve(item_id)?;
        Some(self.layout.place(item, PlanPos::new(x_pct, y_pct)))
    }

    /// Remove a placement, clearing a matching selection.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.layout.remove(id);
        if removed {
            self.interaction.notify_removed(id);
        }
        removed
    }

    /// Remove whatever is selected.
    pub fn remove_selected(&mut self) -> bool {
        match self.interaction.selected().cloned() {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    /// Nudge the selected placement by plan percent.
    pub fn nudge_selected(&mut self, dx_pct: f32, dy_pct: f32) {
        if let Some(id) = self.interaction.selected().cloned() {
            self.layout.nudge(&id, dx_pct, dy_pct);
        }
    }

    /// Rotate the selected placement by degrees.
    pub fn rotate_selected(&mut self, delta_deg: f32) {
        if let Some(id) = self.interaction.selected().cloned() {
            self.layout.rotate(&id, delta_deg);
        }
    }

    /// Rescale the selected placement by a scale delta.
    pub fn rescale_selected(&mut self, delta: f32) {
        if let Some(id) = self.interaction.selected().cloned() {
            self.layout.rescale(&id, delta);
        }
    }

    pub fn undo(&mut self) -> bool {
        if self.layout.can_undo() {
            self.layout.undo();
            true
        } else {
            false
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.layout.can_redo() {
            self.layout.redo();
            true
        } else {
            false
        }
    }

    // ── 2D pointer flow ───────────────────────────────────────

    /// Topmost placement whose footprint contains the plan point.
    /// Later placements render on top, so the scan runs back to front.
    pub fn hit_test_plan(&self, at: PlanPos) -> Option<PlacementId> {
        let world = plan::plan_to_world(&self.room, at);
        let point = Vec2::new(world.x, world.z);
        self.layout
            .placements()
            .iter()
            .rev()
            .find(|p| p.footprint(&self.room).contains(point))
            .map(|p| p.id.clone())
    }

    /// Pointer-down on the plan: a hit starts a drag, empty room area
    /// clears the selection.
    pub fn pointer_down_plan(&mut self, at: PlanPos) -> Option<PlacementId> {
        if self.interaction.dragging().is_some() {
            return None;
        }
        match self.hit_test_plan(at) {
            Some(id) => {
                self.layout.begin_drag();
                self.interaction.pointer_down_on(id.clone(), at);
                Some(id)
            }
            None => {
                self.interaction.deselect();
                None
            }
        }
    }

    /// Pointer-move while dragging on the plan surface (percent clamp).
    pub fn drag_plan_to(&mut self, at: PlanPos) {
        if let Some(id) = self.interaction.dragging().cloned() {
            self.layout.drag_to(&id, at);
        }
    }

    /// Pointer-up: a drag settles into a selection.
    pub fn pointer_up(&mut self) {
        self.interaction.pointer_up();
    }

    // ── 3D pointer flow ───────────────────────────────────────

    /// Ray pick over the cached placement AABBs. Build first.
    pub fn pick_ray(&self, ray: &Ray) -> Option<PlacementId> {
        picking::pick_nearest(ray, self.cache.aabbs())
    }

    /// Pointer-down in the 3D view: a picked mesh starts a drag, a miss is
    /// a no-op.
    pub fn pointer_down_ray(&mut self, ray: &Ray) -> Option<PlacementId> {
        if self.interaction.dragging().is_some() {
            return None;
        }
        let id = self.pick_ray(ray)?;
        let anchor = self.layout.get(&id).map(|p| p.pos)?;
        self.layout.begin_drag();
        self.interaction.pointer_down_on(id.clone(), anchor);
        Some(id)
    }

    /// Pointer-move while dragging in 3D: intersect the ground plane,
    /// clamp the item's half extents inside the room, write back.
    pub fn drag_ray_to(&mut self, ray: &Ray) {
        let Some(id) = self.interaction.dragging().cloned() else {
            return;
        };
        let Some(hit) = picking::ray_ground(ray) else {
            return;
        };
        let Some(placement) = self.layout.get(&id) else {
            return;
        };
        let half = plan::footprint_half_extents(
            placement.item.dims_m(),
            placement.scale,
            placement.rotation_deg,
        );
        let clamped = plan::clamp_world_to_room(&self.room, hit, half);
        let pos = plan::world_to_plan(&self.room, clamped);
        self.layout.drag_to(&id, pos);
    }

    // ── Build + inspection ────────────────────────────────────

    /// Poll assets and rebuild the mesh cache if anything moved.
    pub fn build(&mut self) {
        self.assets.poll();
        if !self
            .cache
            .is_valid(self.layout.version(), &self.room, self.assets.version())
        {
            self.cache.rebuild(
                &self.room,
                self.layout.placements(),
                &mut self.assets,
                self.layout.version(),
            );
        }
    }

    /// Block until queued asset loads resolve, then rebuild.
    pub fn build_blocking(&mut self) {
        self.build();
        self.assets.finish();
        self.build();
    }

    pub fn placement_count(&self) -> usize {
        self.layout.len()
    }

    pub fn total_price(&self) -> f64 {
        self.layout.total_price()
    }

    pub fn mesh_of(&self, id: &str) -> Option<&MeshData> {
        self.cache.meshes().get(id)
    }

    /// Create a validator for a placement's cached mesh.
    pub fn validate_mesh(&self, id: &str) -> Option<MeshValidator> {
        self.cache.meshes().get(id).map(MeshValidator::new)
    }

    pub fn errors(&self) -> &HashMap<PlacementId, String> {
        self.cache.errors()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.cache.rebuild_count()
    }

    /// Export the current layout as summary JSON.
    pub fn export_json(&self) -> serde_json::Result<String> {
        crate::export::summary_json(&self.room, &self.layout)
    }

    /// A ray pointing straight down at a plan position, for pick tests.
    pub fn down_ray_at(&self, at: PlanPos) -> Ray {
        let world = plan::plan_to_world(&self.room, at);
        Ray {
            origin: Vec3::new(world.x, 10.0, world.z),
            direction: Vec3::NEG_Y,
        }
    }
}
