use chrono::NaiveDate;

/// One line item from a construction cost schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct CostItem {
    pub item_name: String,
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub total_cost: Option<f64>,
    pub cost_type: Option<String>,
}

/// One task row from a project schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTask {
    pub task_name: String,
    pub duration_days: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub finish_date: Option<NaiveDate>,
}

/// One numbered clause from a regulatory circular.
#[derive(Debug, Clone, PartialEq)]
pub struct RegulatoryRule {
    pub rule_summary: String,
    pub measurement_basis: Option<String>,
}

/// Tagged entity record produced by an extractor. Extractors emit a flat,
/// order-stable sequence; `ExtractedEntities` partitions it per table.
#[derive(Debug, Clone, PartialEq)]
pub enum EntityRecord {
    Cost(CostItem),
    Task(ProjectTask),
    Rule(RegulatoryRule),
}

/// Entity rows for one document, grouped the way the relational schema
/// stores them. Persisted as a single transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedEntities {
    pub cost_items: Vec<CostItem>,
    pub tasks: Vec<ProjectTask>,
    pub rules: Vec<RegulatoryRule>,
}

impl ExtractedEntities {
    pub fn from_records(records: Vec<EntityRecord>) -> Self {
        let mut entities = Self::default();
        for record in records {
            match record {
                EntityRecord::Cost(item) => entities.cost_items.push(item),
                EntityRecord::Task(task) => entities.tasks.push(task),
                EntityRecord::Rule(rule) => entities.rules.push(rule),
            }
        }
        entities
    }

    pub fn is_empty(&self) -> bool {
        self.cost_items.is_empty() && self.tasks.is_empty() && self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cost_items.len() + self.tasks.len() + self.rules.len()
    }
}

/// Per-table row counts for one document, used by reconciliation to decide
/// whether the entity stage already ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntityCounts {
    pub cost_items: u64,
    pub tasks: u64,
    pub rules: u64,
}

impl EntityCounts {
    pub fn total(&self) -> u64 {
        self.cost_items + self.tasks + self.rules
    }
}
