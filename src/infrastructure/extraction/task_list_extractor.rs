use chrono::NaiveDate;

use crate::application::ports::{EntityExtractor, ExtractorError};
use crate::domain::{EntityRecord, ProjectTask};

use super::table::{cell, find_column, is_separator_row, is_table_row, parse_number, split_row};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y"];

/// Parses project schedules serialized as pipe tables: a task column plus
/// duration / start / finish columns, one `ProjectTask` per data row.
#[derive(Default)]
pub struct TaskListExtractor;

impl TaskListExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl EntityExtractor for TaskListExtractor {
    fn extract(&self, text: &str) -> Result<Vec<EntityRecord>, ExtractorError> {
        let mut lines = text.lines().filter(|l| is_table_row(l)).peekable();
        if lines.peek().is_none() {
            return Err(ExtractorError::MissingTableMarkers(
                "no table rows in task list text".to_string(),
            ));
        }

        let mut tasks = Vec::new();
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
                    let Some(name) = cell(&cells, Some(cols.task)) else {
                        continue;
                    };
                    tasks.push(EntityRecord::Task(ProjectTask {
                        task_name: name.to_string(),
                        duration_days: cell(&cells, cols.duration)
                            .and_then(parse_number)
                            .map(|d| d as i32),
                        start_date: cell(&cells, cols.start).and_then(parse_date),
                        finish_date: cell(&cells, cols.finish).and_then(parse_date),
                    }));
                }
            }
        }

        if columns.is_none() {
            return Err(ExtractorError::MissingTableMarkers(
                "no task table header row found".to_string(),
            ));
        }

        Ok(tasks)
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

struct Columns {
    task: usize,
    duration: Option<usize>,
    start: Option<usize>,
    finish: Option<usize>,
}

impl Columns {
    fn from_header(cells: &[String]) -> Option<Self> {
        let task = find_column(cells, &["task", "activity"])?;
        let duration = find_column(cells, &["duration"]);
        let start = find_column(cells, &["start"]);
        let finish = find_column(cells, &["finish", "end"]);
        if duration.is_none() && start.is_none() && finish.is_none() {
            return None;
        }
        Some(Self {
            task,
            duration,
            start,
            finish,
        })
    }
}
