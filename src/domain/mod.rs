pub mod records;

pub use records::{
    Availability, Customer, InventoryItem, ItemStatus, Record, Shipment, Transaction, Vendor,
};

/// The five tables of the dataset, in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Vendor,
    Inventory,
    Transaction,
    Shipment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Customer,
        EntityKind::Vendor,
        EntityKind::Inventory,
        EntityKind::Transaction,
        EntityKind::Shipment,
    ];

    pub fn sheet_name(self) -> &'static str {
        match self {
            EntityKind::Customer => "customers",
            EntityKind::Vendor => "vendors",
            EntityKind::Inventory => "inventory",
            EntityKind::Transaction => "transactions",
            EntityKind::Shipment => "shipments",
        }
    }

    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.sheet_name() == name)
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Customer => Customer::COLUMNS,
            EntityKind::Vendor => Vendor::COLUMNS,
            EntityKind::Inventory => InventoryItem::COLUMNS,
            EntityKind::Transaction => Transaction::COLUMNS,
            EntityKind::Shipment => Shipment::COLUMNS,
        }
    }
}

/// Zero-padded identifier, e.g. `format_id("CUST", 7, 4)` is `CUST0007`.
pub fn format_id(prefix: &str, n: u32, width: usize) -> String {
    format!("{}{:0width$}", prefix, n, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_none, assert_some_eq};

    #[test]
    fn ids_are_zero_padded() {
        assert_eq!(format_id("CUST", 1, 4), "CUST0001");
        assert_eq!(format_id("INV", 42, 4), "INV0042");
        assert_eq!(format_id("TRN", 1, 5), "TRN00001");
    }

    #[test]
    fn sheet_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_some_eq!(EntityKind::from_sheet_name(kind.sheet_name()), kind);
        }
        assert_none!(EntityKind::from_sheet_name("orders"));
    }
}
