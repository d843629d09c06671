use crate::table::Table;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Sum,
    /// Non-null values of the value column.
    Count,
    Mean,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub key: String,
    pub value: f64,
}

/// Grouped values in first-seen key order unless re-sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn from_points(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.points.iter().find(|p| p.key == key).map(|p| p.value)
    }

    pub fn keys(&self) -> Vec<&str> {
        self.points.iter().map(|p| p.key.as_str()).collect()
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }

    /// Largest value first; ties keep their current order.
    pub fn sorted_desc(mut self) -> Self {
        self.points.sort_by(|a, b| b.value.total_cmp(&a.value));
        self
    }

    /// Reorders by position in `order`; keys not listed go last, in their
    /// current order.
    pub fn ordered_by(mut self, order: &[&str]) -> Self {
        let rank = |key: &str| order.iter().position(|o| *o == key).unwrap_or(order.len());
        self.points.sort_by_key(|p| rank(&p.key));
        self
    }
}

/******************************************/
// Group-by reduction
/******************************************/
/// Groups rows by the rendered value of `group_key` (null keys are
/// dropped) and reduces `value_key` with `op`. Missing columns or an empty
/// table give an empty series.
pub fn aggregate(table: &Table, group_key: &str, value_key: &str, op: AggregateOp) -> Series {
    let (Some(group_idx), Some(value_idx)) =
        (table.column_index(group_key), table.column_index(value_key))
    else {
        return Series::default();
    };

    let mut index: HashMap<String, usize> = HashMap::new();
    // (sum, count) per group, in first-seen order.
    let mut groups: Vec<(String, f64, usize)> = Vec::new();

    for row in table.rows() {
        let key_cell = &row[group_idx];
        if key_cell.is_null() {
            continue;
        }
        let key = key_cell.to_string();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, 0.0, 0));
            groups.len() - 1
        });

        let value = &row[value_idx];
        let group = &mut groups[slot];
        match op {
            AggregateOp::Count => {
                if !value.is_null() {
                    group.2 += 1;
                }
            }
            AggregateOp::Sum => group.1 += value.as_f64().unwrap_or(0.0),
            AggregateOp::Mean => {
                if let Some(n) = value.as_f64() {
                    group.1 += n;
                    group.2 += 1;
                }
            }
        }
    }

    let points = groups
        .into_iter()
        .map(|(key, sum, count)| {
            let value = match op {
                AggregateOp::Sum => sum,
                AggregateOp::Count => count as f64,
                AggregateOp::Mean if count > 0 => sum / count as f64,
                AggregateOp::Mean => 0.0,
            };
            SeriesPoint { key, value }
        })
        .collect();
    Series { points }
}

/// `aggregate(.., Count)` on the key column itself, sorted descending, the
/// shape of a value-counts chart.
pub fn value_counts(table: &Table, column: &str) -> Series {
    aggregate(table, column, column, AggregateOp::Count).sorted_desc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use claim::{assert_none, assert_some_eq};

    fn sales() -> Table {
        let mut t = Table::new(["channel", "totalSales"]);
        for (channel, amount) in [
            ("Website", Cell::Number(10.0)),
            ("Marketplace", Cell::Number(50.0)),
            ("Website", Cell::Number(30.0)),
            ("Retail Store", Cell::Null),
        ] {
            t.push_row(vec![Cell::text(channel), amount]);
        }
        t.push_row(vec![Cell::Null, Cell::Number(99.0)]);
        t
    }

    #[test]
    fn empty_table_gives_empty_mapping() {
        let empty = Table::new(["channel", "totalSales"]);
        assert!(aggregate(&empty, "channel", "totalSales", AggregateOp::Sum).is_empty());
        assert!(aggregate(&Table::empty(), "channel", "totalSales", AggregateOp::Sum).is_empty());
    }

    #[test]
    fn sum_keeps_first_seen_order_and_drops_null_keys() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Sum);
        assert_eq!(s.keys(), vec!["Website", "Marketplace", "Retail Store"]);
        assert_some_eq!(s.get("Website"), 40.0);
        assert_some_eq!(s.get("Retail Store"), 0.0);
        assert_eq!(s.total(), 90.0);
    }

    #[test]
    fn count_skips_null_values() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Count);
        assert_some_eq!(s.get("Website"), 2.0);
        assert_some_eq!(s.get("Retail Store"), 0.0);
    }

    #[test]
    fn mean_averages_numeric_values() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Mean);
        assert_some_eq!(s.get("Website"), 20.0);
        assert_some_eq!(s.get("Retail Store"), 0.0);
    }

    #[test]
    fn sorted_desc_orders_by_value() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Sum).sorted_desc();
        assert_eq!(s.keys(), vec!["Marketplace", "Website", "Retail Store"]);
    }

    #[test]
    fn ordered_by_follows_the_given_order() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Sum)
            .ordered_by(&["Retail Store", "Website"]);
        assert_eq!(s.keys(), vec!["Retail Store", "Website", "Marketplace"]);
    }

    #[test]
    fn missing_columns_give_empty_series() {
        assert!(aggregate(&sales(), "city", "totalSales", AggregateOp::Sum).is_empty());
        assert_none!(aggregate(&sales(), "channel", "nope", AggregateOp::Sum).get("Website"));
    }

    #[test]
    fn series_serializes_as_a_list_of_points() {
        let s = aggregate(&sales(), "channel", "totalSales", AggregateOp::Sum).sorted_desc();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json[0]["key"], "Marketplace");
        assert_eq!(json[0]["value"], 50.0);
    }
}
