//! Factory functions for catalog test data and the built-in demo catalog.
//!
//! The demo catalog ships inside the binary so the planner is usable
//! without any `--catalog` file. Tests lean on the same factories.

use shared::{Catalog, CatalogItem, Category, Dimensions};

// ── Item factories ──────────────────────────────────────────────

/// Create a catalog item with explicit dimensions (centimeters).
pub fn item(
    id: &str,
    name: &str,
    price: f64,
    category: Category,
    w_cm: f64,
    h_cm: f64,
    d_cm: f64,
) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        price,
        category,
        thumbnail: None,
        asset_ref: None,
        dimensions: Some(Dimensions {
            width: w_cm,
            height: h_cm,
            depth: d_cm,
        }),
        color: None,
    }
}

/// Same as [`item`] but with a flat material color hint.
pub fn colored_item(
    id: &str,
    name: &str,
    price: f64,
    category: Category,
    w_cm: f64,
    h_cm: f64,
    d_cm: f64,
    color: [f32; 3],
) -> CatalogItem {
    CatalogItem {
        color: Some(color),
        ..item(id, name, price, category, w_cm, h_cm, d_cm)
    }
}

/// Minimal item without dimensions; mesh generation falls back to a
/// one-meter cube for these.
pub fn bare_item(id: &str, price: f64) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: format!("Item {id}"),
        price,
        category: Category::Other,
        thumbnail: None,
        asset_ref: None,
        dimensions: None,
        color: None,
    }
}

// ── Demo catalog ────────────────────────────────────────────────

/// The built-in catalog: one or two items per category, sized like real
/// furniture so the default room reads sensibly.
pub fn demo_catalog() -> Catalog {
    Catalog {
        items: vec![
            colored_item(
                "sofa-fabric",
                "Fabric Sofa",
                449.0,
                Category::Sofa,
                220.0,
                85.0,
                95.0,
                [0.45, 0.52, 0.62],
            ),
            colored_item(
                "armchair",
                "Armchair",
                189.0,
                Category::Sofa,
                85.0,
                80.0,
                85.0,
                [0.55, 0.45, 0.40],
            ),
            colored_item(
                "bed-double",
                "Double Bed",
                549.0,
                Category::Bed,
                160.0,
                95.0,
                210.0,
                [0.78, 0.78, 0.83],
            ),
            item(
                "table-dining",
                "Dining Table",
                329.0,
                Category::Table,
                160.0,
                75.0,
                90.0,
            ),
            item(
                "table-coffee",
                "Coffee Table",
                89.0,
                Category::Table,
                110.0,
                45.0,
                60.0,
            ),
            item(
                "bookshelf",
                "Bookshelf",
                129.0,
                Category::Storage,
                80.0,
                200.0,
                30.0,
            ),
            item(
                "wardrobe",
                "Wardrobe",
                399.0,
                Category::Storage,
                120.0,
                190.0,
                60.0,
            ),
            colored_item(
                "lamp-floor",
                "Floor Lamp",
                59.0,
                Category::Lighting,
                35.0,
                165.0,
                35.0,
                [0.92, 0.88, 0.70],
            ),
            colored_item(
                "plant-monstera",
                "Potted Plant",
                24.5,
                Category::Decor,
                45.0,
                120.0,
                45.0,
                [0.30, 0.55, 0.32],
            ),
            colored_item(
                "rug-wool",
                "Wool Rug",
                79.0,
                Category::Other,
                200.0,
                1.5,
                140.0,
                [0.70, 0.32, 0.28],
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_survives_the_loader() {
        // Round-trip through the validating parser so the shipped data can
        // never drift out of line with the loader's rules.
        let json = serde_json::to_string(&demo_catalog()).unwrap();
        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed, demo_catalog());
    }

    #[test]
    fn test_demo_catalog_covers_every_category() {
        let catalog = demo_catalog();
        for category in Category::ALL {
            assert!(
                catalog.items.iter().any(|i| i.category == category),
                "no demo item for {:?}",
                category
            );
        }
    }

    #[test]
    fn test_item_factories() {
        let plain = item("t1", "Table", 10.0, Category::Table, 100.0, 75.0, 60.0);
        assert_eq!(plain.dims_m(), [1.0, 0.75, 0.6]);
        assert!(plain.color.is_none());

        let tinted = colored_item(
            "t2",
            "Table",
            10.0,
            Category::Table,
            100.0,
            75.0,
            60.0,
            [1.0, 0.0, 0.0],
        );
        assert_eq!(tinted.color, Some([1.0, 0.0, 0.0]));

        let bare = bare_item("b1", 5.0);
        assert!(bare.dimensions.is_none());
        assert_eq!(bare.dims_m(), [1.0, 1.0, 1.0]);
    }
}
