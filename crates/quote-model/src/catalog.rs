//! Fixed service price list
//!
//! Base prices seed new line items in the quote builder; the price on a line
//! item remains editable after it is added.

use serde::Serialize;

use crate::quote::LineItem;

/// One orderable service with its base price
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ServiceDef {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub base_price: f64,
    pub unit: &'static str,
}

impl ServiceDef {
    /// Seed a line item with quantity 1 at the base price.
    pub fn line_item(&self) -> LineItem {
        LineItem::new(self.id, self.name, self.unit, 1, self.base_price)
    }
}

/// The full price list offered by the business.
pub fn service_catalog() -> &'static [ServiceDef] {
    CATALOG
}

/// Look up a catalog entry by id.
pub fn find_service(id: &str) -> Option<&'static ServiceDef> {
    CATALOG.iter().find(|s| s.id == id)
}

const CATALOG: &[ServiceDef] = &[
    ServiceDef {
        id: "chimney-removal-single",
        name: "Chimney Removal - Single Room Full Size",
        category: "Chimney Removal",
        base_price: 900.0,
        unit: "per chimney",
    },
    ServiceDef {
        id: "chimney-removal-small",
        name: "Chimney Removal - Small Size",
        category: "Chimney Removal",
        base_price: 500.0,
        unit: "per chimney",
    },
    ServiceDef {
        id: "chimney-removal-upstairs-downstairs",
        name: "Chimney Removal - Upstairs + Downstairs",
        category: "Chimney Removal",
        base_price: 1800.0,
        unit: "per set",
    },
    ServiceDef {
        id: "chimney-removal-with-materials",
        name: "Chimney Removal - With Materials",
        category: "Chimney Removal",
        base_price: 2200.0,
        unit: "per chimney",
    },
    ServiceDef {
        id: "skimming-single-room",
        name: "Skimming - Single Room",
        category: "Plastering & Skimming",
        base_price: 150.0,
        unit: "per room",
    },
    ServiceDef {
        id: "skimming-multiple-rooms",
        name: "Skimming - Multiple Rooms",
        category: "Plastering & Skimming",
        base_price: 130.0,
        unit: "per room",
    },
    ServiceDef {
        id: "plastering-small",
        name: "Full Plastering - Small Room (up to 12m²)",
        category: "Plastering & Skimming",
        base_price: 350.0,
        unit: "per room",
    },
    ServiceDef {
        id: "plastering-medium",
        name: "Full Plastering - Medium Room (12-20m²)",
        category: "Plastering & Skimming",
        base_price: 500.0,
        unit: "per room",
    },
    ServiceDef {
        id: "plastering-large",
        name: "Full Plastering - Large Room (20m²+)",
        category: "Plastering & Skimming",
        base_price: 800.0,
        unit: "per room",
    },
    ServiceDef {
        id: "painting-interior-single",
        name: "Interior Painting - Single Room",
        category: "Painting & Decoration",
        base_price: 300.0,
        unit: "per room",
    },
    ServiceDef {
        id: "painting-interior-multiple",
        name: "Interior Painting - Multiple Rooms",
        category: "Painting & Decoration",
        base_price: 250.0,
        unit: "per room",
    },
    ServiceDef {
        id: "painting-exterior-small",
        name: "Exterior Painting - Small Property",
        category: "Painting & Decoration",
        base_price: 1500.0,
        unit: "per property",
    },
    ServiceDef {
        id: "painting-exterior-medium",
        name: "Exterior Painting - Medium Property",
        category: "Painting & Decoration",
        base_price: 2500.0,
        unit: "per property",
    },
    ServiceDef {
        id: "partition-standard",
        name: "Partition Installation - Standard",
        category: "Partition Installation",
        base_price: 400.0,
        unit: "per partition",
    },
    ServiceDef {
        id: "partition-soundproof",
        name: "Partition Installation - Soundproof",
        category: "Partition Installation",
        base_price: 800.0,
        unit: "per partition",
    },
    ServiceDef {
        id: "boarding-small",
        name: "Boarding - Small Area (up to 10m²)",
        category: "Boarding & Sealing",
        base_price: 200.0,
        unit: "per area",
    },
];
