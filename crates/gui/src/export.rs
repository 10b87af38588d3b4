//! Layout summary export.
//!
//! The hand-off format for downstream consumers (cart, order flow): the
//! room, every placement record, and the recomputed total price as pretty
//! JSON. Import is deliberately not supported; the summary is an output,
//! not a save file.

use std::path::Path;

use shared::{LayoutSummary, RoomSpec};

use crate::state::LayoutState;

/// Snapshot the current layout into its hand-off record.
pub fn layout_summary(room: &RoomSpec, layout: &LayoutState) -> LayoutSummary {
    LayoutSummary {
        room: *room,
        placements: layout.records(),
        total_price: layout.total_price(),
    }
}

/// Serialize the summary as pretty JSON.
pub fn summary_json(room: &RoomSpec, layout: &LayoutState) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&layout_summary(room, layout))
}

/// Write the summary to `path`.
pub fn write_summary(path: &Path, room: &RoomSpec, layout: &LayoutState) -> std::io::Result<()> {
    let json = summary_json(room, layout)?;
    std::fs::write(path, json)?;
    tracing::info!("exported layout summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::plan::PlanPos;
    use std::sync::Arc;

    fn sample() -> (RoomSpec, LayoutState) {
        let room = RoomSpec::new(5.0, 4.0).unwrap();
        let mut layout = LayoutState::default();
        let sofa = Arc::new(fixtures::item(
            "sofa-fabric",
            "Fabric Sofa",
            450.0,
            shared::Category::Sofa,
            220.0,
            85.0,
            95.0,
        ));
        layout.place(sofa, PlanPos::new(40.0, 60.0));
        (room, layout)
    }

    #[test]
    fn test_summary_reflects_layout() {
        let (room, layout) = sample();
        let summary = layout_summary(&room, &layout);
        assert_eq!(summary.room, room);
        assert_eq!(summary.placements.len(), 1);
        assert_eq!(summary.placements[0].item_id, "sofa-fabric");
        assert_eq!(summary.placements[0].x_pct, 40.0);
        assert_eq!(summary.total_price, 450.0);
    }

    #[test]
    fn test_summary_json_shape() {
        let (room, layout) = sample();
        let json = summary_json(&room, &layout).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["room"]["width"], 5.0);
        assert_eq!(value["total_price"], 450.0);
        assert_eq!(value["placements"][0]["item_id"], "sofa-fabric");
        assert_eq!(value["placements"][0]["rotation_deg"], 0.0);
        assert_eq!(value["placements"][0]["scale"], 1.0);
    }

    #[test]
    fn test_write_summary_round_trip_file() {
        let (room, layout) = sample();
        let path = std::env::temp_dir().join(format!("layout_export_{}.json", std::process::id()));
        write_summary(&path, &room, &layout).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("sofa-fabric"));
        let _ = std::fs::remove_file(&path);
    }
}
