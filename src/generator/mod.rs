//! Synthetic dataset generation.
//!
//! Every table is produced by a [`Generator`], which owns a seeded ChaCha
//! RNG and a fixed reference date. With the same seed and date the output
//! is identical byte for byte.

pub mod writer;

use crate::config::configuration::GeneratorSettings;
use crate::domain::{
    format_id, Availability, Customer, EntityKind, InventoryItem, ItemStatus, Record, Shipment,
    Transaction, Vendor,
};
use crate::table::{Table, Workbook};
use chrono::{Days, NaiveDate};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::RangeInclusive;
use tracing::info;

pub use writer::write_workbook;

const CITIES: &[&str] = &["New York", "Los Angeles", "Chicago", "Houston", "Phoenix"];
const STATES: &[&str] = &["NY", "CA", "IL", "TX", "AZ"];
const COUNTRIES: &[&str] = &["USA"];

const VENDOR_NAMES: &[&str] = &["VendorA", "VendorB", "VendorC", "VendorD", "VendorE"];
const VENDOR_ITEMS: &[&str] = &["Laptop", "Mouse", "Keyboard", "Monitor", "Webcam"];

const BRANDS: &[&str] = &["Dell", "HP", "Lenovo", "Apple", "Samsung"];
const CATEGORIES: &[&str] = &["Electronics", "Peripherals", "Accessories"];
const ITEM_NAMES: &[&str] = &[
    "Laptop",
    "Desktop",
    "Monitor",
    "Keyboard",
    "Mouse",
    "Headphones",
];

const CHANNELS: &[&str] = &["Website", "Mobile App", "Retail Store", "Marketplace"];
const SELLERS: &[&str] = &["Salesperson A", "Salesperson B", "Online System"];

const CARRIERS: &[&str] = &["FedEx", "UPS", "DHL", "USPS"];
const CARRIER_SERVICES: &[&str] = &["Standard", "Express", "Priority"];
const WAREHOUSES: &[&str] = &["Warehouse A", "Warehouse B"];

// Fallback ID ranges used when no pool is supplied. They mirror the default
// table sizes, so they can point at rows that were never generated.
const FALLBACK_CUSTOMERS: RangeInclusive<u32> = 1..=100;
const FALLBACK_INVENTORY: RangeInclusive<u32> = 1..=200;
const FALLBACK_VENDORS: RangeInclusive<u32> = 1..=20;

/// Valid IDs for entities that reference other tables. A missing or empty
/// pool means "sample from the fallback range".
#[derive(Debug, Clone, Default)]
pub struct ForeignKeyPools {
    pub customer_ids: Option<Vec<String>>,
    pub inventory_ids: Option<Vec<String>>,
    pub vendor_ids: Option<Vec<String>>,
}

impl ForeignKeyPools {
    pub fn none() -> Self {
        Self::default()
    }
}

pub struct Generator {
    rng: ChaCha8Rng,
    seed: u64,
    today: NaiveDate,
}

impl Generator {
    /// `seed: None` draws a fresh seed; read it back with [`Generator::seed`]
    /// to replay the run.
    pub fn new(seed: Option<u64>, today: NaiveDate) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            today,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// `count` rows of `kind` as a table in schema column order.
    pub fn generate(&mut self, kind: EntityKind, count: usize, pools: &ForeignKeyPools) -> Table {
        match kind {
            EntityKind::Customer => Customer::into_table(self.customers(count)),
            EntityKind::Vendor => Vendor::into_table(self.vendors(count)),
            EntityKind::Inventory => InventoryItem::into_table(self.inventory(count, pools)),
            EntityKind::Transaction => Transaction::into_table(self.transactions(count, pools)),
            EntityKind::Shipment => Shipment::into_table(self.shipments(count, pools)),
        }
    }

    pub fn customers(&mut self, count: usize) -> Vec<Customer> {
        (1..=count)
            .map(|i| Customer {
                customer_id: format_id("CUST", i as u32, 4),
                user_name: format!("user{}", i),
                name: format!("Customer {}", i),
                phone_number: self.phone_number(),
                email: format!("user{}@example.com", i),
                city: self.pick(CITIES),
                state: self.pick(STATES),
                country: self.pick(COUNTRIES),
            })
            .collect()
    }

    pub fn vendors(&mut self, count: usize) -> Vec<Vendor> {
        (1..=count)
            .map(|i| Vendor {
                vendor_id: format_id("VEND", i as u32, 3),
                name: self.pick(VENDOR_NAMES),
                phone_number: self.phone_number(),
                email: format!("vendor{}@example.com", i),
                supplied_item_name: self.pick(VENDOR_ITEMS),
                inventory_id: format_id("INV", self.rng.gen_range(1000..=9999), 4),
            })
            .collect()
    }

    pub fn inventory(&mut self, count: usize, pools: &ForeignKeyPools) -> Vec<InventoryItem> {
        (1..=count)
            .map(|i| {
                let vendor_id =
                    self.pick_id(pools.vendor_ids.as_deref(), "VEND", FALLBACK_VENDORS, 3);
                let name = self.pick(ITEM_NAMES);
                let brand = self.pick(BRANDS);
                let category = self.pick(CATEGORIES);
                let model = format!("Model{}", self.rng.gen_range(1..=10));
                let price = round2(self.rng.gen_range(50.0..=1500.0));
                // Within 10% of price before rounding; round2 can add up to 0.005.
                let estimated_price = round2(price * self.rng.gen_range(0.9..=1.1));
                let incoming_date = self.days_ago(1..=365);
                // Drawn independently of incoming_date: an item may be sold
                // before it arrived.
                let sold_date = if self.rng.gen_bool(0.8) {
                    Some(self.days_ago(1..=365))
                } else {
                    None
                };
                let availability = Availability::ALL[self.rng.gen_range(0..Availability::ALL.len())];
                let status = ItemStatus::ALL[self.rng.gen_range(0..ItemStatus::ALL.len())];
                InventoryItem {
                    inventory_id: format_id("INV", i as u32, 4),
                    vendor_id,
                    name,
                    brand,
                    category,
                    model,
                    price,
                    estimated_price,
                    incoming_date,
                    sold_date,
                    availability,
                    status,
                    image_url: format!("http://example.com/inv{}.jpg", i),
                }
            })
            .collect()
    }

    pub fn transactions(&mut self, count: usize, pools: &ForeignKeyPools) -> Vec<Transaction> {
        (1..=count)
            .map(|i| {
                let customer_id =
                    self.pick_id(pools.customer_ids.as_deref(), "CUST", FALLBACK_CUSTOMERS, 4);
                let inventory_id =
                    self.pick_id(pools.inventory_ids.as_deref(), "INV", FALLBACK_INVENTORY, 4);
                let total_sales = round2(self.rng.gen_range(10.0..=2000.0));
                let total_earnings = round2(total_sales * self.rng.gen_range(0.7..=0.95));
                let shipping_fee = if self.rng.gen_bool(0.7) {
                    round2(self.rng.gen_range(5.0..=50.0))
                } else {
                    0.0
                };
                let other_fee = if self.rng.gen_bool(0.5) {
                    round2(self.rng.gen_range(0.0..=20.0))
                } else {
                    0.0
                };
                Transaction {
                    transaction_id: format_id("TRN", i as u32, 5),
                    customer_id,
                    inventory_id,
                    total_sales,
                    total_earnings,
                    shipping_fee,
                    other_fee,
                    shipping_id: format_id("SHIP", self.rng.gen_range(10000..=99999), 5),
                    sold_by: self.pick(SELLERS),
                    invoice_number: format_id("INV", self.rng.gen_range(100000..=999999), 6),
                    channel: self.pick(CHANNELS),
                }
            })
            .collect()
    }

    pub fn shipments(&mut self, count: usize, pools: &ForeignKeyPools) -> Vec<Shipment> {
        (1..=count)
            .map(|i| Shipment {
                shipping_id: format_id("SHIP", i as u32, 5),
                receiver: format!("Receiver {}", i),
                tracking_number: format!("TRK{}", self.rng.gen_range(100_000_000..=999_999_999)),
                origin: self.pick(WAREHOUSES),
                destination: format!("City {}", self.rng.gen_range(1..=10)),
                carrier: self.pick(CARRIERS),
                carrier_service: self.pick(CARRIER_SERVICES),
                customer_id: self.pick_id(
                    pools.customer_ids.as_deref(),
                    "CUST",
                    FALLBACK_CUSTOMERS,
                    4,
                ),
                delay_flag: self.rng.gen_bool(0.5),
            })
            .collect()
    }

    fn pick(&mut self, options: &[&str]) -> String {
        options[self.rng.gen_range(0..options.len())].to_string()
    }

    fn pick_id(
        &mut self,
        pool: Option<&[String]>,
        prefix: &str,
        fallback: RangeInclusive<u32>,
        width: usize,
    ) -> String {
        match pool.filter(|p| !p.is_empty()) {
            Some(ids) => ids[self.rng.gen_range(0..ids.len())].clone(),
            None => format_id(prefix, self.rng.gen_range(fallback), width),
        }
    }

    fn phone_number(&mut self) -> String {
        format!(
            "+1-{}-{}-{}",
            self.rng.gen_range(100..=999),
            self.rng.gen_range(100..=999),
            self.rng.gen_range(1000..=9999)
        )
    }

    fn days_ago(&mut self, range: RangeInclusive<u64>) -> NaiveDate {
        let days = self.rng.gen_range(range);
        self.today
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN)
    }
}

/// Two-decimal rounding applied to every monetary value.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/******************************************/
// Generating the full, linked dataset
/******************************************/
/// Customers, vendors and inventory first; their IDs then become the pools
/// for inventory, transactions and shipments.
pub fn generate_dataset(generator: &mut Generator, settings: &GeneratorSettings) -> Workbook {
    info!(seed = generator.seed(), today = %generator.today(), "generating dataset");

    let customers = generator.customers(settings.customers);
    let vendors = generator.vendors(settings.vendors);
    let vendor_pool = ForeignKeyPools {
        vendor_ids: Some(vendors.iter().map(|v| v.vendor_id.clone()).collect()),
        ..ForeignKeyPools::none()
    };
    let inventory = generator.inventory(settings.inventory, &vendor_pool);

    let pools = ForeignKeyPools {
        customer_ids: Some(customers.iter().map(|c| c.customer_id.clone()).collect()),
        inventory_ids: Some(inventory.iter().map(|i| i.inventory_id.clone()).collect()),
        vendor_ids: vendor_pool.vendor_ids,
    };
    let transactions = generator.transactions(settings.transactions, &pools);
    let shipments = generator.shipments(settings.shipments, &pools);

    let mut workbook = Workbook::new();
    workbook.push(EntityKind::Customer.sheet_name(), Customer::into_table(customers));
    workbook.push(EntityKind::Vendor.sheet_name(), Vendor::into_table(vendors));
    workbook.push(EntityKind::Inventory.sheet_name(), InventoryItem::into_table(inventory));
    workbook.push(
        EntityKind::Transaction.sheet_name(),
        Transaction::into_table(transactions),
    );
    workbook.push(EntityKind::Shipment.sheet_name(), Shipment::into_table(shipments));

    for sheet in &workbook.sheets {
        info!(sheet = %sheet.name, rows = sheet.rows.len(), "generated sheet");
    }
    workbook
}
