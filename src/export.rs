use crate::errors::custom::ExportError;
use crate::table::Table;
use chrono::NaiveDate;

/// Header row plus one record per row. Nulls become empty fields, dates are
/// written as `YYYY-MM-DD`.
pub fn table_to_csv(table: &Table) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if !table.columns().is_empty() {
        writer.write_record(table.columns())?;
    }
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Encoding(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

/// `sales_data_20240131.csv`
pub fn export_file_name(kind: &str, day: NaiveDate) -> String {
    format!("{}_data_{}.csv", kind, day.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use claim::assert_ok;

    #[test]
    fn nulls_are_empty_and_dates_iso() {
        let mut table = Table::new(["id", "soldDate", "price"]);
        table.push_row(vec![
            Cell::text("INV00001"),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap()),
            Cell::Number(12.5),
        ]);
        table.push_row(vec![Cell::text("INV00002"), Cell::Null, Cell::Number(3.0)]);

        let csv = table_to_csv(&table).unwrap();

        assert_eq!(csv, "id,soldDate,price\nINV00001,2024-02-03,12.5\nINV00002,,3\n");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let mut table = Table::new(["name"]);
        table.push_row(vec![Cell::text("Smith, John")]);
        assert_eq!(table_to_csv(&table).unwrap(), "name\n\"Smith, John\"\n");
    }

    #[test]
    fn an_empty_table_exports_nothing() {
        let csv = assert_ok!(table_to_csv(&Table::empty()));
        assert!(csv.is_empty());
    }

    #[test]
    fn file_names_carry_the_day() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(export_file_name("sales", day), "sales_data_20240131.csv");
    }
}
