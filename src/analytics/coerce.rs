use crate::domain::records::col;
use crate::table::{Cell, Table};
use chrono::{Days, NaiveDate};

const MONETARY_COLUMNS: &[&str] = &[
    col::TOTAL_SALES,
    col::TOTAL_EARNINGS,
    col::SHIPPING_FEE,
    col::OTHER_FEE,
];

/// First synthetic transaction date; row `i` is dated `epoch + i` days.
pub fn transaction_epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Any cell to a number; anything unparsable becomes zero.
pub fn to_number(cell: &Cell) -> Cell {
    Cell::Number(cell.as_f64().unwrap_or(0.0))
}

/// Any cell to a date; anything unparsable becomes null.
pub fn to_date(cell: &Cell) -> Cell {
    cell.as_date().map(Cell::Date).unwrap_or(Cell::Null)
}

/******************************************/
// Transactions
/******************************************/
/// Casts the monetary columns that are present to numbers and derives
/// `transactionDate`, `month` (`YYYY-MM`) and `dayOfWeek` from row order.
pub fn coerce_transactions(table: &Table) -> Table {
    coerce_transactions_from(table, transaction_epoch())
}

pub fn coerce_transactions_from(table: &Table, epoch: NaiveDate) -> Table {
    let mut out = table.clone();
    for column in MONETARY_COLUMNS {
        if out.has_column(column) {
            out = out.map_column(column, |_, cell| to_number(cell));
        }
    }

    let dates: Vec<Option<NaiveDate>> = (0..out.len())
        .map(|i| epoch.checked_add_days(Days::new(i as u64)))
        .collect();
    out.map_column(col::TRANSACTION_DATE, |i, _| dates[i].into())
        .map_column(col::MONTH, |i, _| {
            dates[i].map(|d| d.format("%Y-%m").to_string()).into()
        })
        .map_column(col::DAY_OF_WEEK, |i, _| {
            dates[i].map(|d| d.format("%A").to_string()).into()
        })
}

/******************************************/
// Inventory
/******************************************/
pub fn coerce_inventory(table: &Table) -> Table {
    let mut out = table.clone();
    for column in [col::PRICE, col::ESTIMATED_PRICE] {
        if out.has_column(column) {
            out = out.map_column(column, |_, cell| to_number(cell));
        }
    }
    for column in [col::INCOMING_DATE, col::SOLD_DATE] {
        if out.has_column(column) {
            out = out.map_column(column, |_, cell| to_date(cell));
        }
    }
    out
}
