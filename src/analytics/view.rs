//! The dashboard as a pure function: filters and raw tables in, a
//! serializable view model out.

use crate::analytics::aggregate::{aggregate, value_counts, AggregateOp, Series};
use crate::analytics::coerce::{coerce_inventory, coerce_transactions};
use crate::analytics::filter::{filter_by_date_range, filter_by_equality, ALL};
use crate::analytics::kpi::{compute_kpis, on_time_rate_by_carrier, Kpis};
use crate::analytics::Dataset;
use crate::domain::records::col;
use crate::domain::Availability;
use crate::table::{Cell, Table};
use crate::validations::filters::FilterValue;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

const WEEKDAYS: &[&str] = &[
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
const TOP_ITEMS: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardFilters {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub channel: FilterValue,
    pub city: FilterValue,
    pub state: FilterValue,
    pub brand: FilterValue,
}

impl DashboardFilters {
    pub fn for_period(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            channel: FilterValue::all(),
            city: FilterValue::all(),
            state: FilterValue::all(),
            brand: FilterValue::all(),
        }
    }

    /// `Channel: Website`-style labels for every filter that is not "All".
    pub fn active(&self) -> Vec<String> {
        [
            ("Channel", &self.channel),
            ("City", &self.city),
            ("State", &self.state),
            ("Brand", &self.brand),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_all())
        .map(|(label, value)| format!("{}: {}", label, value.as_ref()))
        .collect()
    }
}

/// Left join on `customerID`, adding the customer's `city` and `state`.
/// Unmatched rows get nulls; the first customer row wins on duplicate IDs.
pub fn join_customers(transactions: &Table, customers: &Table) -> Table {
    let mut lookup: HashMap<String, (Cell, Cell)> = HashMap::new();
    if let (Some(id), Some(city), Some(state)) = (
        customers.column_index(col::CUSTOMER_ID),
        customers.column_index(col::CITY),
        customers.column_index(col::STATE),
    ) {
        for row in customers.rows() {
            lookup
                .entry(row[id].to_string())
                .or_insert_with(|| (row[city].clone(), row[state].clone()));
        }
    }

    let ids: Vec<String> = transactions
        .column(col::CUSTOMER_ID)
        .iter()
        .map(|c| c.to_string())
        .collect();
    let find = |i: usize| ids.get(i).and_then(|id| lookup.get(id));

    transactions
        .clone()
        .map_column(col::CITY, |i, _| {
            find(i).map(|(city, _)| city.clone()).unwrap_or(Cell::Null)
        })
        .map_column(col::STATE, |i, _| {
            find(i).map(|(_, state)| state.clone()).unwrap_or(Cell::Null)
        })
}

/// Filtered tables behind both the view model and the CSV exports.
#[derive(Debug, Clone, Default)]
pub struct FilteredTables {
    /// Coerced transactions joined with customers, before any filter.
    pub sales_analysis: Table,
    pub sales: Table,
    pub inventory: Table,
    pub shipments: Table,
}

pub fn apply_filters(filters: &DashboardFilters, dataset: &Dataset) -> FilteredTables {
    let sales_analysis = join_customers(
        &coerce_transactions(&dataset.transactions),
        &dataset.customers,
    );

    let mut sales = filter_by_date_range(&sales_analysis, filters.start, filters.end);
    sales = filter_by_equality(&sales, col::CHANNEL, filters.channel.as_ref());
    sales = filter_by_equality(&sales, col::CITY, filters.city.as_ref());
    sales = filter_by_equality(&sales, col::STATE, filters.state.as_ref());

    let inventory = filter_by_equality(
        &coerce_inventory(&dataset.inventory),
        col::BRAND,
        filters.brand.as_ref(),
    );

    FilteredTables {
        sales_analysis,
        sales,
        inventory,
        shipments: dataset.shipments.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub channels: Vec<String>,
    pub cities: Vec<String>,
    pub states: Vec<String>,
    pub brands: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesView {
    pub daily: Series,
    pub by_channel: Series,
    pub by_state: Series,
    pub by_day_of_week: Series,
    pub by_month: Series,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub status_counts: Series,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub critical_items: Table,
    pub value_by_brand: Series,
    pub top_items: Table,
    pub by_category: Series,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomersView {
    pub by_city: Series,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingView {
    pub by_carrier: Series,
    pub on_time_rate_by_carrier: Series,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub period: Period,
    pub active_filters: Vec<String>,
    pub filter_options: FilterOptions,
    pub kpis: Kpis,
    pub sales: SalesView,
    pub inventory: InventoryView,
    pub customers: CustomersView,
    pub shipping: ShippingView,
    pub notices: Vec<String>,
}

/******************************************/
// Rendering the dashboard view model
/******************************************/
pub fn render(filters: &DashboardFilters, dataset: &Dataset) -> DashboardView {
    let tables = apply_filters(filters, dataset);

    DashboardView {
        period: Period {
            start: filters.start,
            end: filters.end,
        },
        active_filters: filters.active(),
        // Brands come from the unfiltered inventory so the current choice stays
        // selectable.
        filter_options: filter_options(&tables.sales_analysis, &dataset.inventory),
        kpis: compute_kpis(
            &tables.sales,
            &dataset.customers,
            &tables.shipments,
            &tables.inventory,
        ),
        sales: sales_view(&tables.sales),
        inventory: inventory_view(&tables.inventory),
        customers: CustomersView {
            by_city: aggregate(
                &dataset.customers,
                col::CITY,
                col::CUSTOMER_ID,
                AggregateOp::Count,
            )
            .sorted_desc(),
        },
        shipping: ShippingView {
            by_carrier: aggregate(
                &tables.shipments,
                col::CARRIER,
                col::SHIPPING_ID,
                AggregateOp::Count,
            )
            .sorted_desc(),
            on_time_rate_by_carrier: on_time_rate_by_carrier(&tables.shipments),
        },
        notices: dataset.notices.iter().map(ToString::to_string).collect(),
    }
}

fn filter_options(sales_analysis: &Table, inventory: &Table) -> FilterOptions {
    let with_all = |mut values: Vec<String>| {
        values.insert(0, ALL.to_string());
        values
    };
    FilterOptions {
        channels: with_all(sales_analysis.distinct(col::CHANNEL)),
        cities: with_all(sales_analysis.distinct(col::CITY)),
        states: with_all(sales_analysis.distinct(col::STATE)),
        brands: with_all(inventory.distinct(col::BRAND)),
    }
}

fn sales_view(sales: &Table) -> SalesView {
    let by = |key: &str| aggregate(sales, key, col::TOTAL_SALES, AggregateOp::Sum);
    SalesView {
        daily: by(col::TRANSACTION_DATE),
        by_channel: by(col::CHANNEL).sorted_desc(),
        by_state: by(col::STATE).sorted_desc(),
        by_day_of_week: by(col::DAY_OF_WEEK).ordered_by(WEEKDAYS),
        by_month: by(col::MONTH),
    }
}

fn inventory_view(inventory: &Table) -> InventoryView {
    let availability_is = |wanted: &'static [Availability]| {
        let idx = inventory.column_index(col::AVAILABILITY);
        inventory.filter_rows(move |row| {
            idx.map_or(false, |i| {
                let value = row[i].to_string();
                wanted.iter().any(|a| a.as_str() == value)
            })
        })
    };

    let critical = availability_is(&[Availability::LowStock, Availability::OutOfStock]);
    InventoryView {
        status_counts: value_counts(inventory, col::AVAILABILITY),
        low_stock_count: availability_is(&[Availability::LowStock]).len(),
        out_of_stock_count: availability_is(&[Availability::OutOfStock]).len(),
        critical_items: critical
            .select(&[col::NAME, col::BRAND, col::AVAILABILITY, col::PRICE])
            .head(TOP_ITEMS),
        value_by_brand: aggregate(inventory, col::BRAND, col::PRICE, AggregateOp::Sum)
            .sorted_desc(),
        top_items: inventory
            .sort_desc_by(col::PRICE)
            .select(&[col::NAME, col::BRAND, col::PRICE, col::AVAILABILITY])
            .head(TOP_ITEMS),
        by_category: aggregate(inventory, col::CATEGORY, col::INVENTORY_ID, AggregateOp::Count)
            .sorted_desc(),
    }
}
