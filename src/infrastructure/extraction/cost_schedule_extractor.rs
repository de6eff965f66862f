use crate::application::ports::{EntityExtractor, ExtractorError};
use crate::domain::{CostItem, EntityRecord};

use super::table::{cell, find_column, is_separator_row, is_table_row, parse_number, split_row};

/// Parses construction cost schedules serialized as pipe tables. The header
/// row names an item column plus any of quantity / unit price / total cost /
/// cost type; rows after it become `CostItem` records in document order.
///
/// Zero data rows is a valid result. An error means the table structure
/// itself is absent.
#[derive(Default)]
pub struct CostScheduleExtractor;

impl CostScheduleExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractor for CostScheduleExtractor {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>, ExtractorError> {
        let mut lines = text.lines().filter(|l| is_table_row(l)).peekable();
        if lines.peek().is_none() {
            return Err(ExtractorError::MissingTableMarkers(
                "no table rows in cost schedule text".to_string(),
            ));
        }

        let mut items = Vec::new();
        let mut columns: Option<Columns> = None;

        for line in lines {
            let cells = split_row(line);
            if is_separator_row(&cells) {
                continue;
            }

            match &columns {
                None => {
                    if let Some(found) = Columns::from_header(&cells) {
                        columns = Some(found);
                    }
                }
                Some(cols) => {
                    let Some(name) = cell(&cells, Some(cols.item)) else {
                        continue;
                    };
                    items.push(EntityRecord::Cost(CostItem {
                        item_name: name.to_string(),
                        quantity: cell(&cells, cols.quantity).and_then(parse_number),
                        unit_price: cell(&cells, cols.unit_price).and_then(parse_number),
                        total_cost: cell(&cells, cols.total_cost).and_then(parse_number),
                        cost_type: cell(&cells, cols.cost_type).map(str::to_string),
                    }));
                }
            }
        }

        if columns.is_none() {
            return Err(ExtractorError::MissingTableMarkers(
                "no cost table header row found".to_string(),
            ));
        }

        Ok(items)
    }
}

struct Columns {
    item: usize,
    quantity: Option<usize>,
    unit_price: Option<usize>,
    total_cost: Option<usize>,
    cost_type: Option<usize>,
}

impl Columns {
    fn from_header(cells: &[String]) -> Option<Self> {
        let item = find_column(cells, &["item", "description"])?;
        let quantity = find_column(cells, &["quantity", "qty"]);
        let unit_price = find_column(cells, &["unit price", "unit cost", "rate"]);
        // Header must look like a cost table, not any table with an item
        // column.
        let total_cost = find_column(cells, &["total cost", "total", "amount"]);
        if quantity.is_none() && unit_price.is_none() && total_cost.is_none() {
            return None;
        }
        Some(Self {
            item,
            quantity,
            unit_price,
            total_cost,
            cost_type: find_column(cells, &["cost type", "type", "category"]),
        })
    }
}
