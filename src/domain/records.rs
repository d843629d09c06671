use crate::table::{Cell, Table};
use chrono::NaiveDate;

/// Column names shared by the generator and the analytics layer.
pub mod col {
    pub const CUSTOMER_ID: &str = "customerID";
    pub const VENDOR_ID: &str = "vendorID";
    pub const INVENTORY_ID: &str = "inventoryID";
    pub const TRANSACTION_ID: &str = "transactionID";
    pub const SHIPPING_ID: &str = "shippingID";

    pub const NAME: &str = "name";
    pub const CITY: &str = "city";
    pub const STATE: &str = "state";

    pub const BRAND: &str = "brand";
    pub const CATEGORY: &str = "category";
    pub const PRICE: &str = "price";
    pub const ESTIMATED_PRICE: &str = "estimatedPrice";
    pub const INCOMING_DATE: &str = "incomingDate";
    pub const SOLD_DATE: &str = "soldDate";
    pub const AVAILABILITY: &str = "availability";

    pub const TOTAL_SALES: &str = "totalSales";
    pub const TOTAL_EARNINGS: &str = "totalEarnings";
    pub const SHIPPING_FEE: &str = "shippingFee";
    pub const OTHER_FEE: &str = "otherFee";
    pub const CHANNEL: &str = "channel";

    pub const CARRIER: &str = "carrier";
    pub const DELAY_FLAG: &str = "delayFlag";

    // Derived by coercion, never stored.
    pub const TRANSACTION_DATE: &str = "transactionDate";
    pub const MONTH: &str = "month";
    pub const DAY_OF_WEEK: &str = "dayOfWeek";
}

/// A row type with a fixed column order.
pub trait Record {
    const COLUMNS: &'static [&'static str];

    fn into_row(self) -> Vec<Cell>;

    fn into_table(records: Vec<Self>) -> Table
    where
        Self: Sized,
    {
        let mut table = Table::new(Self::COLUMNS.iter().copied());
        for record in records {
            table.push_row(record.into_row());
        }
        table
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
}

impl Availability {
    pub const ALL: [Availability; 3] = [
        Availability::InStock,
        Availability::LowStock,
        Availability::OutOfStock,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::InStock => "In Stock",
            Availability::LowStock => "Low Stock",
            Availability::OutOfStock => "Out of Stock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Active,
    Discontinued,
}

impl ItemStatus {
    pub const ALL: [ItemStatus; 2] = [ItemStatus::Active, ItemStatus::Discontinued];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Active => "Active",
            ItemStatus::Discontinued => "Discontinued",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: String,
    pub user_name: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Record for Customer {
    const COLUMNS: &'static [&'static str] = &[
        col::CUSTOMER_ID,
        "userName",
        col::NAME,
        "phoneNumber",
        "email",
        col::CITY,
        col::STATE,
        "country",
    ];

    fn into_row(self) -> Vec<Cell> {
        vec![
            self.customer_id.into(),
            self.user_name.into(),
            self.name.into(),
            self.phone_number.into(),
            self.email.into(),
            self.city.into(),
            self.state.into(),
            self.country.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vendor {
    pub vendor_id: String,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub supplied_item_name: String,
    pub inventory_id: String,
}

impl Record for Vendor {
    const COLUMNS: &'static [&'static str] = &[
        col::VENDOR_ID,
        col::NAME,
        "phoneNumber",
        "email",
        "suppliedItemName",
        col::INVENTORY_ID,
    ];

    fn into_row(self) -> Vec<Cell> {
        vec![
            self.vendor_id.into(),
            self.name.into(),
            self.phone_number.into(),
            self.email.into(),
            self.supplied_item_name.into(),
            self.inventory_id.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    pub inventory_id: String,
    pub vendor_id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub model: String,
    pub price: f64,
    pub estimated_price: f64,
    pub incoming_date: NaiveDate,
    pub sold_date: Option<NaiveDate>,
    pub availability: Availability,
    pub status: ItemStatus,
    pub image_url: String,
}

impl Record for InventoryItem {
    const COLUMNS: &'static [&'static str] = &[
        col::INVENTORY_ID,
        col::VENDOR_ID,
        col::NAME,
        col::BRAND,
        col::CATEGORY,
        "model",
        col::PRICE,
        col::ESTIMATED_PRICE,
        col::INCOMING_DATE,
        col::SOLD_DATE,
        col::AVAILABILITY,
        "status",
        "imageURL",
    ];

    fn into_row(self) -> Vec<Cell> {
        vec![
            self.inventory_id.into(),
            self.vendor_id.into(),
            self.name.into(),
            self.brand.into(),
            self.category.into(),
            self.model.into(),
            Cell::Number(self.price),
            Cell::Number(self.estimated_price),
            Cell::Date(self.incoming_date),
            self.sold_date.into(),
            self.availability.as_str().into(),
            self.status.as_str().into(),
            self.image_url.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,
    pub customer_id: String,
    pub inventory_id: String,
    pub total_sales: f64,
    pub total_earnings: f64,
    pub shipping_fee: f64,
    pub other_fee: f64,
    pub shipping_id: String,
    pub sold_by: String,
    pub invoice_number: String,
    pub channel: String,
}

impl Record for Transaction {
    const COLUMNS: &'static [&'static str] = &[
        col::TRANSACTION_ID,
        col::CUSTOMER_ID,
        col::INVENTORY_ID,
        col::TOTAL_SALES,
        col::TOTAL_EARNINGS,
        col::SHIPPING_FEE,
        col::OTHER_FEE,
        col::SHIPPING_ID,
        "soldBy",
        "invoiceNumber",
        col::CHANNEL,
    ];

    fn into_row(self) -> Vec<Cell> {
        vec![
            self.transaction_id.into(),
            self.customer_id.into(),
            self.inventory_id.into(),
            Cell::Number(self.total_sales),
            Cell::Number(self.total_earnings),
            Cell::Number(self.shipping_fee),
            Cell::Number(self.other_fee),
            self.shipping_id.into(),
            self.sold_by.into(),
            self.invoice_number.into(),
            self.channel.into(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    pub shipping_id: String,
    pub receiver: String,
    pub tracking_number: String,
    pub origin: String,
    pub destination: String,
    pub carrier: String,
    pub carrier_service: String,
    pub customer_id: String,
    pub delay_flag: bool,
}

impl Record for Shipment {
    const COLUMNS: &'static [&'static str] = &[
        col::SHIPPING_ID,
        "receiver",
        "trackingNumber",
        "origin",
        "destination",
        col::CARRIER,
        "carrierService",
        col::CUSTOMER_ID,
        col::DELAY_FLAG,
    ];

    fn into_row(self) -> Vec<Cell> {
        vec![
            self.shipping_id.into(),
            self.receiver.into(),
            self.tracking_number.into(),
            self.origin.into(),
            self.destination.into(),
            self.carrier.into(),
            self.carrier_service.into(),
            self.customer_id.into(),
            Cell::Bool(self.delay_flag),
        ]
    }
}
