use crate::domain::records::col;
use crate::table::{Cell, Table};
use chrono::NaiveDate;

/// Filter value meaning "do not filter on this column".
pub const ALL: &str = "All";

/// Keeps rows whose `transactionDate` lies in `start..=end`. Rows without a
/// date are dropped.
pub fn filter_by_date_range(table: &Table, start: NaiveDate, end: NaiveDate) -> Table {
    filter_by_date_column(table, col::TRANSACTION_DATE, start, end)
}

pub fn filter_by_date_column(
    table: &Table,
    column: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Table {
    let Some(idx) = table.column_index(column) else {
        return table.filter_rows(|_| false);
    };
    table.filter_rows(|row| {
        row[idx]
            .as_date()
            .map_or(false, |d| d >= start && d <= end)
    })
}

/// Exact match on the rendered cell value; [`ALL`] returns the table as is.
pub fn filter_by_equality(table: &Table, column: &str, value: &str) -> Table {
    if value == ALL {
        return table.clone();
    }
    let Some(idx) = table.column_index(column) else {
        return table.filter_rows(|_| false);
    };
    table.filter_rows(|row| matches_value(&row[idx], value))
}

fn matches_value(cell: &Cell, value: &str) -> bool {
    match cell {
        Cell::Null => false,
        Cell::Text(s) => s == value,
        other => other.to_string() == value,
    }
}
