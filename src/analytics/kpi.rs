use crate::analytics::aggregate::{aggregate, AggregateOp, Series, SeriesPoint};
use crate::domain::records::col;
use crate::domain::Availability;
use crate::table::Table;
use serde::Serialize;
use std::collections::HashSet;

/// Scalar tiles shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_sales: f64,
    pub total_earnings: f64,
    pub profit_margin: f64,
    pub transaction_count: usize,
    pub unique_customers: usize,
    pub average_order_value: f64,
    pub total_customers: usize,
    pub delayed_shipments: usize,
    pub delay_rate: f64,
    pub on_time_rate: f64,
    pub in_stock_value: f64,
}

/// `sales` is the filtered transaction table; the other tables are used
/// whole, as the dashboard does not filter them by date.
pub fn compute_kpis(sales: &Table, customers: &Table, shipments: &Table, inventory: &Table) -> Kpis {
    let total_sales = sum_column(sales, col::TOTAL_SALES);
    let total_earnings = sum_column(sales, col::TOTAL_EARNINGS);
    Kpis {
        total_sales,
        total_earnings,
        profit_margin: profit_margin(total_earnings, total_sales),
        transaction_count: sales.len(),
        unique_customers: distinct_count(sales, col::CUSTOMER_ID),
        average_order_value: average_order_value(total_sales, sales.len()),
        total_customers: distinct_count(customers, col::CUSTOMER_ID),
        delayed_shipments: delayed_count(shipments),
        delay_rate: delay_rate(shipments),
        on_time_rate: on_time_rate(shipments),
        in_stock_value: in_stock_value(inventory),
    }
}

pub fn sum_column(table: &Table, column: &str) -> f64 {
    table
        .column(column)
        .iter()
        .filter_map(|c| c.as_f64())
        .sum()
}

/// Earnings over sales, as a percentage; 0 when there are no sales.
pub fn profit_margin(total_earnings: f64, total_sales: f64) -> f64 {
    if total_sales > 0.0 {
        total_earnings / total_sales * 100.0
    } else {
        0.0
    }
}

pub fn average_order_value(total_sales: f64, rows: usize) -> f64 {
    if rows == 0 {
        0.0
    } else {
        total_sales / rows as f64
    }
}

pub fn distinct_count(table: &Table, column: &str) -> usize {
    table
        .column(column)
        .into_iter()
        .filter(|c| !c.is_null())
        .map(|c| c.to_string())
        .collect::<HashSet<_>>()
        .len()
}

pub fn delayed_count(shipments: &Table) -> usize {
    delayed_shipments(shipments).len()
}

/// Rows whose delay flag reads as true, whether stored as a bool or as text.
fn delayed_shipments(shipments: &Table) -> Table {
    let Some(idx) = shipments.column_index(col::DELAY_FLAG) else {
        return Table::new(shipments.columns().iter().cloned());
    };
    shipments.filter_rows(|row| row[idx].as_bool() == Some(true))
}

/// Delayed over total shipments, as a percentage; 0 with no shipments.
pub fn delay_rate(shipments: &Table) -> f64 {
    percentage(delayed_count(shipments), shipments.len())
}

pub fn on_time_rate(shipments: &Table) -> f64 {
    if shipments.is_empty() {
        return 0.0;
    }
    let on_time = shipments
        .column(col::DELAY_FLAG)
        .iter()
        .filter(|c| c.as_bool() == Some(false))
        .count();
    percentage(on_time, shipments.len())
}

/// Sum of `price` over items that are in stock.
pub fn in_stock_value(inventory: &Table) -> f64 {
    let Some(idx) = inventory.column_index(col::AVAILABILITY) else {
        return 0.0;
    };
    let in_stock = inventory.filter_rows(|row| {
        row[idx].to_string() == Availability::InStock.as_str()
    });
    sum_column(&in_stock, col::PRICE)
}

/// Per carrier: (total − delayed) / total × 100, rounded to two decimals.
pub fn on_time_rate_by_carrier(shipments: &Table) -> Series {
    let totals = aggregate(shipments, col::CARRIER, col::DELAY_FLAG, AggregateOp::Count);
    let delayed = aggregate(
        &delayed_shipments(shipments),
        col::CARRIER,
        col::DELAY_FLAG,
        AggregateOp::Count,
    );
    let points = totals
        .points()
        .iter()
        .map(|total| {
            let late = delayed.get(&total.key).unwrap_or(0.0);
            let rate = if total.value > 0.0 {
                (total.value - late) / total.value * 100.0
            } else {
                0.0
            };
            SeriesPoint {
                key: total.key.clone(),
                value: (rate * 100.0).round() / 100.0,
            }
        })
        .collect();
    Series::from_points(points)
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
