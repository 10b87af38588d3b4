use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique identifier of a placed item instance
pub type PlacementId = String;

/// Unique identifier of a catalog item
pub type ItemId = String;

pub const ROOM_MIN_SIDE: f64 = 2.0;
pub const ROOM_MAX_SIDE: f64 = 20.0;
pub const WALL_HEIGHT_DEFAULT: f64 = 2.7;
pub const WALL_HEIGHT_MIN: f64 = 2.6;
pub const WALL_HEIGHT_MAX: f64 = 3.0;

/// Catalog category tag. Closed set: the mesh generator matches on it
/// exhaustively, so a new category is a compile-time change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sofa,
    Bed,
    Table,
    Storage,
    Lighting,
    Decor,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Sofa,
        Category::Bed,
        Category::Table,
        Category::Storage,
        Category::Lighting,
        Category::Decor,
        Category::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Sofa => "Sofa",
            Category::Bed => "Bed",
            Category::Table => "Table",
            Category::Storage => "Storage",
            Category::Lighting => "Lighting",
            Category::Decor => "Decor",
            Category::Other => "Other",
        }
    }
}

/// Physical item dimensions in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub fn is_valid(&self) -> bool {
        [self.width, self.height, self.depth]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Width/height/depth converted to meters.
    pub fn meters(&self) -> [f32; 3] {
        [
            (self.width / 100.0) as f32,
            (self.height / 100.0) as f32,
            (self.depth / 100.0) as f32,
        ]
    }
}

/// One catalog record. Immutable for the session; placements reference it
/// rather than copying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub price: f64,
    pub category: Category,
    /// Path or URI of the top-down thumbnail shown in the 2D plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Path of an external mesh asset; absence triggers procedural generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    /// Flat material color hint (linear RGB); default tan when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
}

impl CatalogItem {
    /// Footprint in meters, substituting a 1x1x1 m box when dimensions are
    /// absent or unusable. Mesh generation relies on this never failing.
    pub fn dims_m(&self) -> [f32; 3] {
        match self.dimensions {
            Some(d) if d.is_valid() => d.meters(),
            _ => [1.0, 1.0, 1.0],
        }
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate catalog item id '{0}'")]
    DuplicateId(ItemId),
    #[error("catalog item '{0}' has a negative price")]
    NegativePrice(ItemId),
    #[error("catalog item '{0}' has non-positive dimensions")]
    BadDimensions(ItemId),
}

/// A catalog snapshot: the read-only collection of items available for
/// placement this session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::DuplicateId(item.id.clone()));
            }
            if !item.price.is_finite() || item.price < 0.0 {
                return Err(CatalogError::NegativePrice(item.id.clone()));
            }
            if let Some(d) = &item.dimensions {
                if !d.is_valid() {
                    return Err(CatalogError::BadDimensions(item.id.clone()));
                }
            }
        }
        Ok(())
    }

    pub fn find(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("room width must be between 2 and 20 m, got {0}")]
    InvalidWidth(f64),
    #[error("room length must be between 2 and 20 m, got {0}")]
    InvalidLength(f64),
    #[error("wall height must be between 2.6 and 3 m, got {0}")]
    InvalidWallHeight(f64),
}

/// The room being planned: a single rectangle, meters. Constructed only
/// through the validating constructors, so an in-range spec is guaranteed
/// everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub width: f64,
    pub length: f64,
    pub wall_height: f64,
}

impl RoomSpec {
    pub fn new(width: f64, length: f64) -> Result<Self, RoomError> {
        Self::with_wall_height(width, length, WALL_HEIGHT_DEFAULT)
    }

    pub fn with_wall_height(
        width: f64,
        length: f64,
        wall_height: f64,
    ) -> Result<Self, RoomError> {
        if !(ROOM_MIN_SIDE..=ROOM_MAX_SIDE).contains(&width) {
            return Err(RoomError::InvalidWidth(width));
        }
        if !(ROOM_MIN_SIDE..=ROOM_MAX_SIDE).contains(&length) {
            return Err(RoomError::InvalidLength(length));
        }
        if !(WALL_HEIGHT_MIN..=WALL_HEIGHT_MAX).contains(&wall_height) {
            return Err(RoomError::InvalidWallHeight(wall_height));
        }
        Ok(Self { width, length, wall_height })
    }

    /// Recomputed on every call; never cached.
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    pub fn diagonal(&self) -> f64 {
        (self.width * self.width + self.length * self.length).sqrt()
    }
}

impl Default for RoomSpec {
    fn default() -> Self {
        Self { width: 6.0, length: 5.0, wall_height: WALL_HEIGHT_DEFAULT }
    }
}

/// One placement as handed to external callers: enough to rebuild or bulk-add
/// the layout elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRecord {
    pub id: PlacementId,
    pub item_id: ItemId,
    pub x_pct: f32,
    pub y_pct: f32,
    pub rotation_deg: f32,
    pub scale: f32,
}

/// The full layout hand-off: room, placements, and the recomputed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSummary {
    pub room: RoomSpec,
    pub placements: Vec<PlacementRecord>,
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    fn item(id: &str) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: format!("Item {id}"),
            price: 10.0,
            category: Category::Other,
            thumbnail: None,
            asset_ref: None,
            dimensions: None,
            color: None,
        }
    }

    // --- Category ---

    #[test]
    fn test_category_serde_snake_case() {
        let json = serde_json::to_string(&Category::Sofa).unwrap();
        assert_eq!(json, r#""sofa""#);
        for c in Category::ALL {
            roundtrip(&c);
        }
    }

    // --- Dimensions ---

    #[test]
    fn test_dimensions_meters() {
        let d = Dimensions { width: 220.0, height: 85.0, depth: 95.0 };
        assert!(d.is_valid());
        let [w, h, depth] = d.meters();
        assert!((w - 2.2).abs() < 1e-6);
        assert!((h - 0.85).abs() < 1e-6);
        assert!((depth - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_dimensions_invalid() {
        assert!(!Dimensions { width: 0.0, height: 10.0, depth: 10.0 }.is_valid());
        assert!(!Dimensions { width: -5.0, height: 10.0, depth: 10.0 }.is_valid());
        assert!(!Dimensions { width: f64::NAN, height: 10.0, depth: 10.0 }.is_valid());
    }

    #[test]
    fn test_dims_m_fallback_unit_cube() {
        let mut it = item("a");
        assert_eq!(it.dims_m(), [1.0, 1.0, 1.0]);
        it.dimensions = Some(Dimensions { width: -1.0, height: 2.0, depth: 3.0 });
        assert_eq!(it.dims_m(), [1.0, 1.0, 1.0]);
        it.dimensions = Some(Dimensions { width: 200.0, height: 100.0, depth: 50.0 });
        assert_eq!(it.dims_m(), [2.0, 1.0, 0.5]);
    }

    // --- Catalog ---

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "items": [
                {"id": "sofa-1", "name": "Aria", "price": 449.0, "category": "sofa",
                 "dimensions": {"width": 220.0, "height": 85.0, "depth": 95.0}},
                {"id": "lamp-1", "name": "Glow", "price": 39.5, "category": "lighting"}
            ]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find("sofa-1").unwrap().category, Category::Sofa);
        assert_eq!(catalog.find("lamp-1").unwrap().dimensions, None);
        assert!(catalog.find("missing").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let catalog = Catalog { items: vec![item("a"), item("a")] };
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::DuplicateId(id)) if id == "a"
        ));
    }

    #[test]
    fn test_catalog_rejects_negative_price() {
        let mut bad = item("a");
        bad.price = -1.0;
        let json = serde_json::to_string(&Catalog { items: vec![bad] }).unwrap();
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_catalog_rejects_bad_dimensions() {
        let mut bad = item("a");
        bad.dimensions = Some(Dimensions { width: 0.0, height: 1.0, depth: 1.0 });
        let json = serde_json::to_string(&Catalog { items: vec![bad] }).unwrap();
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::BadDimensions(_))
        ));
    }

    #[test]
    fn test_catalog_parse_error() {
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    // --- RoomSpec ---

    #[test]
    fn test_room_valid_range() {
        let room = RoomSpec::new(5.0, 4.0).unwrap();
        assert_eq!(room.width, 5.0);
        assert_eq!(room.length, 4.0);
        assert_eq!(room.wall_height, WALL_HEIGHT_DEFAULT);
        assert!((room.area() - 20.0).abs() < 1e-9);
        assert!(RoomSpec::new(2.0, 20.0).is_ok());
    }

    #[test]
    fn test_room_rejects_out_of_range() {
        assert!(matches!(RoomSpec::new(1.9, 4.0), Err(RoomError::InvalidWidth(_))));
        assert!(matches!(RoomSpec::new(5.0, 20.1), Err(RoomError::InvalidLength(_))));
        assert!(matches!(RoomSpec::new(f64::NAN, 4.0), Err(RoomError::InvalidWidth(_))));
        assert!(matches!(
            RoomSpec::with_wall_height(5.0, 4.0, 3.5),
            Err(RoomError::InvalidWallHeight(_))
        ));
    }

    #[test]
    fn test_room_error_message_is_inline_friendly() {
        let msg = RoomSpec::new(25.0, 4.0).unwrap_err().to_string();
        assert!(msg.contains("between 2 and 20"));
        assert!(msg.contains("25"));
    }

    // --- LayoutSummary ---

    #[test]
    fn test_layout_summary_serde() {
        let summary = LayoutSummary {
            room: RoomSpec::default(),
            placements: vec![PlacementRecord {
                id: "p1".into(),
                item_id: "sofa-1".into(),
                x_pct: 50.0,
                y_pct: 50.0,
                rotation_deg: 15.0,
                scale: 1.0,
            }],
            total_price: 449.0,
        };
        roundtrip(&summary);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains(r#""item_id":"sofa-1""#));
        assert!(json.contains(r#""total_price":449.0"#));
    }
}
