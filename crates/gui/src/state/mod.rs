pub mod catalog;
pub mod interaction;
pub mod layout;
pub mod settings;

use std::collections::{HashMap, HashSet};

pub use catalog::CatalogState;
pub use interaction::{Interaction, InteractionState};
pub use layout::{LayoutState, Placement};
pub use settings::AppSettings;

use shared::{PlacementId, RoomSpec};

use crate::plan::overlap::{self, FootprintRect};

/// Which editing surface fills the central panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Plan,
    Walkthrough,
}

/// Panel visibility flags
pub struct PanelVisibility {
    pub catalog: bool,
    pub inspector: bool,
}

impl Default for PanelVisibility {
    fn default() -> Self {
        Self { catalog: true, inspector: true }
    }
}

/// Inline state of the room dimension form. The engine only ever sees specs
/// that passed validation; rejected input stays here with its message.
#[derive(Default)]
pub struct RoomForm {
    pub width_text: String,
    pub length_text: String,
    pub error: Option<String>,
}

impl RoomForm {
    pub fn from_room(room: &RoomSpec) -> Self {
        Self {
            width_text: format!("{}", room.width),
            length_text: format!("{}", room.length),
            error: None,
        }
    }

    /// Parse and validate the form. Returns the new spec on success; on
    /// failure keeps the text and records the inline message.
    pub fn try_apply(&mut self) -> Option<RoomSpec> {
        let width = match self.width_text.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.error = Some("width must be a number".into());
                return None;
            }
        };
        let length = match self.length_text.trim().parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.error = Some("length must be a number".into());
                return None;
            }
        };
        match RoomSpec::new(width, length) {
            Ok(room) => {
                self.error = None;
                Some(room)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }
}

/// Combined application state
pub struct AppState {
    pub room: RoomSpec,
    pub catalog: CatalogState,
    pub layout: LayoutState,
    pub interaction: InteractionState,
    pub view: ViewMode,
    pub panels: PanelVisibility,
    pub settings: AppSettings,
    pub room_form: RoomForm,
    /// Mesh build problems (placement id → message), fed by the asset
    /// pipeline each rebuild
    pub build_errors: HashMap<PlacementId, String>,
    /// Set by the settings UI so the app knows to persist
    pub settings_dirty: bool,
    pub show_settings: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CatalogState::default(), RoomSpec::default())
    }
}

impl AppState {
    pub fn new(catalog: CatalogState, room: RoomSpec) -> Self {
        Self {
            room,
            catalog,
            layout: LayoutState::default(),
            interaction: InteractionState::default(),
            view: ViewMode::default(),
            panels: PanelVisibility::default(),
            settings: AppSettings::load(),
            room_form: RoomForm::from_room(&room),
            build_errors: HashMap::new(),
            settings_dirty: false,
            show_settings: false,
        }
    }

    /// Remove a placement and reset a matching selection. All removal paths
    /// (inspector button, Delete key, programmatic) route through here so
    /// selection can never point at a dead id.
    pub fn remove_placement(&mut self, id: &str) -> bool {
        let removed = self.layout.remove(id);
        if removed {
            self.interaction.notify_removed(id);
        }
        removed
    }

    pub fn selected_placement(&self) -> Option<&Placement> {
        self.interaction.selected().and_then(|id| self.layout.get(id))
    }

    /// Undo the last layout mutation. Ignored during a drag; a selection
    /// whose placement the undo removed resets to idle.
    pub fn undo(&mut self) {
        if self.interaction.dragging().is_some() {
            return;
        }
        self.layout.undo();
        self.drop_dead_selection();
    }

    pub fn redo(&mut self) {
        if self.interaction.dragging().is_some() {
            return;
        }
        self.layout.redo();
        self.drop_dead_selection();
    }

    fn drop_dead_selection(&mut self) {
        if let Some(id) = self.interaction.selected().cloned() {
            if self.layout.get(&id).is_none() {
                self.interaction.notify_removed(&id);
            }
        }
    }

    /// Ids of placements whose footprint intersects another footprint.
    /// Warning only; nothing is rejected.
    pub fn overlapping_placements(&self) -> HashSet<PlacementId> {
        let entries: Vec<(PlacementId, FootprintRect)> = self
            .layout
            .placements()
            .iter()
            .map(|p| (p.id.clone(), p.footprint(&self.room)))
            .collect();
        overlap::overlapping_ids(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlanPos;

    #[test]
    fn test_room_form_round_trip() {
        let room = RoomSpec::new(7.5, 3.0).unwrap();
        let mut form = RoomForm::from_room(&room);
        assert_eq!(form.width_text, "7.5");
        let applied = form.try_apply().unwrap();
        assert_eq!(applied, room);
        assert!(form.error.is_none());
    }

    #[test]
    fn test_room_form_rejects_garbage_and_out_of_range() {
        let mut form = RoomForm {
            width_text: "wide".into(),
            length_text: "4".into(),
            error: None,
        };
        assert!(form.try_apply().is_none());
        assert!(form.error.as_deref().unwrap().contains("number"));

        form.width_text = "25".into();
        assert!(form.try_apply().is_none());
        assert!(form.error.as_deref().unwrap().contains("between 2 and 20"));

        form.width_text = "12".into();
        assert!(form.try_apply().is_some());
        assert!(form.error.is_none());
    }

    #[test]
    fn test_remove_placement_clears_selection() {
        let mut state = AppState::default();
        let item = state.catalog.items()[0].clone();
        let id = state.layout.place(item, PlanPos::CENTER);
        state.interaction.select(id.clone());
        assert!(state.selected_placement().is_some());
        assert!(state.remove_placement(&id));
        assert!(state.interaction.is_idle());
        assert!(state.selected_placement().is_none());
    }

    #[test]
    fn test_undo_of_a_place_resets_selection() {
        let mut state = AppState::default();
        let item = state.catalog.items()[0].clone();
        let id = state.layout.place(item, PlanPos::CENTER);
        state.interaction.select(id);
        state.undo();
        assert!(state.layout.is_empty());
        assert!(state.interaction.is_idle());
        state.redo();
        assert_eq!(state.layout.len(), 1);
        // Redo restores the placement but selection stays cleared
        assert!(state.selected_placement().is_none());
    }

    #[test]
    fn test_overlapping_placements_report() {
        let mut state = AppState::default();
        let item = state.catalog.items()[0].clone();
        let a = state.layout.place(item.clone(), PlanPos::CENTER);
        let b = state.layout.place(item.clone(), PlanPos::new(51.0, 50.0));
        let far = state.layout.place(item, PlanPos::new(5.0, 5.0));
        let ids = state.overlapping_placements();
        assert!(ids.contains(&a));
        assert!(ids.contains(&b));
        assert!(!ids.contains(&far));
    }
}
