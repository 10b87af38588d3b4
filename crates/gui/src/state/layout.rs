//! Placement model: the authoritative list of placed items, with transform
//! clamping and undo/redo history.
//!
//! Every mutation goes through the operations here; the 2D and 3D surfaces
//! only read. Interactive drags bracket their writes with `begin_drag` +
//! `drag_to` so one gesture costs one undo entry.

use std::sync::Arc;

use glam::Vec2;

use shared::{CatalogItem, PlacementId, PlacementRecord, RoomSpec};

use crate::plan::{self, overlap::FootprintRect, PlanPos};

pub const SCALE_MIN: f32 = 0.5;
pub const SCALE_MAX: f32 = 2.0;

/// One placed catalog item and its transform
#[derive(Clone)]
pub struct Placement {
    pub id: PlacementId,
    pub item: Arc<CatalogItem>,
    /// Authoritative position in plan space, always within [5, 95]
    pub pos: PlanPos,
    /// Degrees in [0, 360)
    pub rotation_deg: f32,
    /// Uniform scale in [0.5, 2.0]
    pub scale: f32,
}

impl Placement {
    pub fn record(&self) -> PlacementRecord {
        PlacementRecord {
            id: self.id.clone(),
            item_id: self.item.id.clone(),
            x_pct: self.pos.x,
            y_pct: self.pos.y,
            rotation_deg: self.rotation_deg,
            scale: self.scale,
        }
    }

    /// Oriented floor footprint in world meters, used for hit testing and
    /// overlap warnings on both surfaces.
    pub fn footprint(&self, room: &RoomSpec) -> FootprintRect {
        let world = plan::plan_to_world(room, self.pos);
        let dims = self.item.dims_m();
        FootprintRect {
            center: Vec2::new(world.x, world.z),
            half: Vec2::new(dims[0] * self.scale * 0.5, dims[2] * self.scale * 0.5),
            rotation_deg: self.rotation_deg,
        }
    }
}

/// Placement list with undo/redo history
#[derive(Default)]
pub struct LayoutState {
    placements: Vec<Placement>,
    undo_stack: Vec<Vec<Placement>>,
    redo_stack: Vec<Vec<Placement>>,
    version: u64,
}

impl LayoutState {
    /// Current layout version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn get(&self, id: &str) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Sum of catalog prices over the current placements. Folded on every
    /// call so it can never go stale.
    pub fn total_price(&self) -> f64 {
        self.placements.iter().map(|p| p.item.price).sum()
    }

    pub fn records(&self) -> Vec<PlacementRecord> {
        self.placements.iter().map(Placement::record).collect()
    }

    /// Create a placement at `at` (clamped), rotation 0, scale 1. Infallible.
    pub fn place(&mut self, item: Arc<CatalogItem>, at: PlanPos) -> PlacementId {
        self.save_undo();
        self.redo_stack.clear();
        let id = uuid::Uuid::new_v4().to_string();
        self.placements.push(Placement {
            id: id.clone(),
            item,
            pos: at.clamped(),
            rotation_deg: 0.0,
            scale: 1.0,
        });
        self.version += 1;
        id
    }

    /// Move to an absolute plan position, clamped into [5, 95].
    pub fn move_to(&mut self, id: &str, pos: PlanPos) {
        self.mutate(id, |p| p.pos = pos.clamped());
    }

    /// Move by a percent delta, clamped. Out-of-bound deltas truncate at the
    /// boundary, so repeating them is idempotent.
    pub fn nudge(&mut self, id: &str, dx_pct: f32, dy_pct: f32) {
        self.mutate(id, |p| {
            p.pos = PlanPos::new(p.pos.x + dx_pct, p.pos.y + dy_pct).clamped();
        });
    }

    /// Rotate by a degree delta; the result wraps into [0, 360) and is never
    /// negative.
    pub fn rotate(&mut self, id: &str, delta_deg: f32) {
        if !delta_deg.is_finite() {
            return;
        }
        self.mutate(id, |p| {
            p.rotation_deg = (p.rotation_deg + delta_deg).rem_euclid(360.0);
        });
    }

    /// Rescale by a delta, clamped into [0.5, 2.0].
    pub fn rescale(&mut self, id: &str, delta: f32) {
        if !delta.is_finite() {
            return;
        }
        self.mutate(id, |p| {
            p.scale = (p.scale + delta).clamp(SCALE_MIN, SCALE_MAX);
        });
    }

    /// Remove a placement. Returns false (and records nothing) for an
    /// unknown id.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.placements.iter().position(|p| p.id == id) else {
            tracing::debug!("remove ignored for unknown placement {id}");
            return false;
        };
        self.save_undo();
        self.redo_stack.clear();
        self.placements.remove(idx);
        self.version += 1;
        true
    }

    /// Remove everything (room reset).
    pub fn clear(&mut self) {
        if self.placements.is_empty() {
            return;
        }
        self.save_undo();
        self.redo_stack.clear();
        self.placements.clear();
        self.version += 1;
    }

    /// Save one undo entry at the start of a drag gesture; the following
    /// `drag_to` calls mutate without further entries.
    pub fn begin_drag(&mut self) {
        self.save_undo();
        self.redo_stack.clear();
        self.version += 1;
    }

    /// Position write during an active drag: clamps like `move_to` but never
    /// touches the undo stack.
    pub fn drag_to(&mut self, id: &str, pos: PlanPos) {
        let Some(p) = self.placements.iter_mut().find(|p| p.id == id) else {
            tracing::debug!("drag ignored for unknown placement {id}");
            return;
        };
        p.pos = pos.clamped();
        self.version += 1;
    }

    pub fn undo(&mut self) {
        if let Some(prev) = self.undo_stack.pop() {
            self.redo_stack.push(self.placements.clone());
            self.placements = prev;
            self.version += 1;
        }
    }

    pub fn redo(&mut self) {
        if let Some(next) = self.redo_stack.pop() {
            self.undo_stack.push(self.placements.clone());
            self.placements = next;
            self.version += 1;
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    fn mutate<F: FnOnce(&mut Placement)>(&mut self, id: &str, f: F) {
        let Some(idx) = self.placements.iter().position(|p| p.id == id) else {
            tracing::debug!("op ignored for unknown placement {id}");
            return;
        };
        self.save_undo();
        self.redo_stack.clear();
        f(&mut self.placements[idx]);
        self.version += 1;
    }

    fn save_undo(&mut self) {
        self.undo_stack.push(self.placements.clone());
        if self.undo_stack.len() > 100 {
            self.undo_stack.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    fn item(id: &str, price: f64) -> Arc<CatalogItem> {
        Arc::new(CatalogItem {
            id: id.into(),
            name: format!("Item {id}"),
            price,
            category: Category::Other,
            thumbnail: None,
            asset_ref: None,
            dimensions: None,
            color: None,
        })
    }

    #[test]
    fn test_place_defaults_and_clamping() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 10.0), PlanPos::new(200.0, -50.0));
        let p = layout.get(&id).unwrap();
        assert_eq!(p.pos, PlanPos::new(95.0, 5.0));
        assert_eq!(p.rotation_deg, 0.0);
        assert_eq!(p.scale, 1.0);
        assert_ne!(p.id, p.item.id);
    }

    #[test]
    fn test_placement_ids_are_unique() {
        let mut layout = LayoutState::default();
        let a = layout.place(item("a", 1.0), PlanPos::CENTER);
        let b = layout.place(item("a", 1.0), PlanPos::CENTER);
        assert_ne!(a, b);
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_move_clamps_and_is_idempotent_at_boundary() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.move_to(&id, PlanPos::new(1000.0, 50.0));
        assert_eq!(layout.get(&id).unwrap().pos, PlanPos::new(95.0, 50.0));
        // Pushing further in the same direction changes nothing
        layout.nudge(&id, 500.0, 0.0);
        layout.nudge(&id, 500.0, 0.0);
        assert_eq!(layout.get(&id).unwrap().pos, PlanPos::new(95.0, 50.0));
    }

    #[test]
    fn test_rotation_wraps_non_negative() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.rotate(&id, 350.0);
        layout.rotate(&id, 15.0);
        assert_eq!(layout.get(&id).unwrap().rotation_deg, 5.0);
        layout.rotate(&id, -35.0);
        assert_eq!(layout.get(&id).unwrap().rotation_deg, 330.0);
    }

    #[test]
    fn test_rotation_of_375_lands_on_15() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.rotate(&id, 375.0);
        assert_eq!(layout.get(&id).unwrap().rotation_deg, 15.0);
    }

    #[test]
    fn test_rescale_clamps_to_range() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.rescale(&id, 10.0);
        assert_eq!(layout.get(&id).unwrap().scale, 2.0);
        layout.rescale(&id, -10.0);
        assert_eq!(layout.get(&id).unwrap().scale, 0.5);
        layout.rescale(&id, 0.1);
        assert!((layout.get(&id).unwrap().scale - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_total_price_recomputes() {
        let mut layout = LayoutState::default();
        let a = layout.place(item("sofa", 449.0), PlanPos::CENTER);
        layout.place(item("lamp", 39.5), PlanPos::CENTER);
        assert!((layout.total_price() - 488.5).abs() < 1e-9);
        assert!((layout.total_price() - 488.5).abs() < 1e-9);
        layout.remove(&a);
        assert!((layout.total_price() - 39.5).abs() < 1e-9);
    }

    #[test]
    fn test_ops_on_unknown_id_are_ignored() {
        let mut layout = LayoutState::default();
        layout.place(item("a", 1.0), PlanPos::CENTER);
        let before = layout.version();
        layout.move_to("missing", PlanPos::CENTER);
        layout.rotate("missing", 90.0);
        layout.rescale("missing", 0.5);
        assert!(!layout.remove("missing"));
        assert_eq!(layout.version(), before);
        assert!(layout.can_undo()); // only the place() entry
    }

    #[test]
    fn test_undo_redo_round_trip() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.rotate(&id, 90.0);
        layout.undo();
        assert_eq!(layout.get(&id).unwrap().rotation_deg, 0.0);
        layout.redo();
        assert_eq!(layout.get(&id).unwrap().rotation_deg, 90.0);
        layout.undo();
        layout.undo();
        assert!(layout.is_empty());
        assert!(!layout.can_undo());
    }

    #[test]
    fn test_new_op_clears_redo() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.rotate(&id, 90.0);
        layout.undo();
        assert!(layout.can_redo());
        layout.rescale(&id, 0.1);
        assert!(!layout.can_redo());
    }

    #[test]
    fn test_drag_costs_one_undo_entry() {
        let mut layout = LayoutState::default();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.begin_drag();
        for i in 0..20 {
            layout.drag_to(&id, PlanPos::new(50.0 + i as f32, 50.0));
        }
        assert_eq!(layout.get(&id).unwrap().pos, PlanPos::new(69.0, 50.0));
        layout.undo();
        assert_eq!(layout.get(&id).unwrap().pos, PlanPos::CENTER);
    }

    #[test]
    fn test_clear_empties_layout() {
        let mut layout = LayoutState::default();
        layout.place(item("a", 1.0), PlanPos::CENTER);
        layout.place(item("b", 2.0), PlanPos::CENTER);
        layout.clear();
        assert!(layout.is_empty());
        assert_eq!(layout.total_price(), 0.0);
        layout.undo();
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn test_version_bumps_on_every_mutation() {
        let mut layout = LayoutState::default();
        let v0 = layout.version();
        let id = layout.place(item("a", 1.0), PlanPos::CENTER);
        let v1 = layout.version();
        assert!(v1 > v0);
        layout.drag_to(&id, PlanPos::new(60.0, 60.0));
        assert!(layout.version() > v1);
    }
}
