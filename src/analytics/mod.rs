//! Loading, coercion, filtering and aggregation over the generated tables.
//!
//! Everything here except [`loader`] is a pure function of its inputs: source
//! tables are never mutated, every step returns a fresh [`Table`].

pub mod aggregate;
pub mod cache;
pub mod coerce;
pub mod filter;
pub mod integrity;
pub mod kpi;
pub mod loader;
pub mod view;

use crate::domain::EntityKind;
use crate::errors::custom::LoadError;
use crate::table::{Table, Workbook};

/// The five raw tables plus whatever went wrong while loading them.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub customers: Table,
    pub vendors: Table,
    pub inventory: Table,
    pub transactions: Table,
    pub shipments: Table,
    pub notices: Vec<LoadError>,
}

impl Dataset {
    /// Missing sheets become empty tables without a notice.
    pub fn from_workbook(workbook: &Workbook) -> Self {
        let sheet = |kind: EntityKind| workbook.sheet(kind.sheet_name()).unwrap_or_default();
        Self {
            customers: sheet(EntityKind::Customer),
            vendors: sheet(EntityKind::Vendor),
            inventory: sheet(EntityKind::Inventory),
            transactions: sheet(EntityKind::Transaction),
            shipments: sheet(EntityKind::Shipment),
            notices: Vec::new(),
        }
    }

    pub fn table_mut(&mut self, kind: EntityKind) -> &mut Table {
        match kind {
            EntityKind::Customer => &mut self.customers,
            EntityKind::Vendor => &mut self.vendors,
            EntityKind::Inventory => &mut self.inventory,
            EntityKind::Transaction => &mut self.transactions,
            EntityKind::Shipment => &mut self.shipments,
        }
    }
}
