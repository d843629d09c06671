use crate::analytics::Dataset;
use crate::domain::records::col;
use crate::table::Table;
use serde::Serialize;
use std::collections::HashSet;

/// References that do not resolve to a generated row. Reported, never
/// repaired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrityReport {
    pub dangling_transaction_customers: usize,
    pub dangling_transaction_inventory: usize,
    pub dangling_shipment_customers: usize,
}

impl IntegrityReport {
    pub fn is_consistent(&self) -> bool {
        self.dangling_transaction_customers == 0
            && self.dangling_transaction_inventory == 0
            && self.dangling_shipment_customers == 0
    }
}

pub fn integrity_report(dataset: &Dataset) -> IntegrityReport {
    let customers = key_set(&dataset.customers, col::CUSTOMER_ID);
    let inventory = key_set(&dataset.inventory, col::INVENTORY_ID);
    IntegrityReport {
        dangling_transaction_customers: dangling(&dataset.transactions, col::CUSTOMER_ID, &customers),
        dangling_transaction_inventory: dangling(&dataset.transactions, col::INVENTORY_ID, &inventory),
        dangling_shipment_customers: dangling(&dataset.shipments, col::CUSTOMER_ID, &customers),
    }
}

fn key_set(table: &Table, column: &str) -> HashSet<String> {
    table
        .column(column)
        .into_iter()
        .filter(|c| !c.is_null())
        .map(|c| c.to_string())
        .collect()
}

fn dangling(table: &Table, column: &str, keys: &HashSet<String>) -> usize {
    table
        .column(column)
        .into_iter()
        .filter(|c| !c.is_null() && !keys.contains(&c.to_string()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    #[test]
    fn counts_references_outside_the_pool() {
        let mut customers = Table::new([col::CUSTOMER_ID]);
        customers.push_row(vec![Cell::text("CUST0001")]);
        let mut shipments = Table::new([col::CUSTOMER_ID]);
        shipments.push_row(vec![Cell::text("CUST0001")]);
        shipments.push_row(vec![Cell::text("CUST0099")]);
        let dataset = Dataset {
            customers,
            shipments,
            ..Dataset::default()
        };

        let report = integrity_report(&dataset);

        assert_eq!(report.dangling_shipment_customers, 1);
        assert_eq!(report.dangling_transaction_customers, 0);
        assert!(!report.is_consistent());
    }

    #[test]
    fn empty_dataset_is_consistent() {
        assert!(integrity_report(&Dataset::default()).is_consistent());
    }
}
