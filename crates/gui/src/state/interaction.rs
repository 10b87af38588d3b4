//! Pointer interaction state machine shared by the 2D plan and the 3D
//! viewport.
//!
//! One owned value, no globals: Idle, Selected(id), or Dragging(id). Both
//! surfaces report pointer intents here and read the current target back, so
//! selection and drag behavior cannot diverge between them. Position clamping
//! itself lives in the layout operations; this machine only tracks the
//! target.

use shared::PlacementId;

use crate::plan::PlanPos;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Selected(PlacementId),
    Dragging {
        id: PlacementId,
        /// Position at drag start, kept for diagnostics
        anchor: PlanPos,
    },
}

#[derive(Default)]
pub struct InteractionState {
    current: Interaction,
}

impl InteractionState {
    pub fn current(&self) -> &Interaction {
        &self.current
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.current, Interaction::Idle)
    }

    /// The active target: the selected id, or the dragged id while a drag is
    /// live. At most one at any time.
    pub fn selected(&self) -> Option<&PlacementId> {
        match &self.current {
            Interaction::Idle => None,
            Interaction::Selected(id) => Some(id),
            Interaction::Dragging { id, .. } => Some(id),
        }
    }

    pub fn dragging(&self) -> Option<&PlacementId> {
        match &self.current {
            Interaction::Dragging { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn drag_anchor(&self) -> Option<PlanPos> {
        match &self.current {
            Interaction::Dragging { anchor, .. } => Some(*anchor),
            _ => None,
        }
    }

    /// Select a placement. Replaces any previous selection; ignored while a
    /// drag is live (one drag at a time).
    pub fn select(&mut self, id: PlacementId) {
        if self.dragging().is_some() {
            tracing::debug!("select ignored during drag");
            return;
        }
        self.current = Interaction::Selected(id);
    }

    /// Pointer-down on empty space, or an explicit deselect. No-op while
    /// dragging.
    pub fn deselect(&mut self) {
        if self.dragging().is_some() {
            return;
        }
        self.current = Interaction::Idle;
    }

    /// Pointer-down on a placement starts a drag, from Idle or from any
    /// selection. Ignored if a drag is already live.
    pub fn pointer_down_on(&mut self, id: PlacementId, anchor: PlanPos) {
        if self.dragging().is_some() {
            tracing::debug!("pointer down ignored during drag");
            return;
        }
        self.current = Interaction::Dragging { id, anchor };
    }

    /// Pointer-up ends a drag, leaving the item selected. No-op otherwise;
    /// loss of pointer capture routes through here as well, committing the
    /// last clamped position.
    pub fn pointer_up(&mut self) {
        if let Interaction::Dragging { id, .. } = &self.current {
            self.current = Interaction::Selected(id.clone());
        }
    }

    /// A placement was removed; if it is the current target the machine
    /// resets to Idle.
    pub fn notify_removed(&mut self, id: &str) {
        if self.selected().map(|s| s.as_str()) == Some(id) {
            self.current = Interaction::Idle;
        }
    }
}
