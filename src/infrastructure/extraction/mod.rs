mod circular_extractor;
mod cost_schedule_extractor;
mod table;
mod task_list_extractor;

pub use circular_extractor::CircularExtractor;
pub use cost_schedule_extractor::CostScheduleExtractor;
pub use task_list_extractor::TaskListExtractor;

use std::sync::Arc;

use crate::application::services::ExtractorRegistry;
use crate::domain::PdfType;

/// The fixed type-to-extractor mapping the pipeline ships with.
pub fn default_registry() -> ExtractorRegistry {
    ExtractorRegistry::new()
        .register(PdfType::CostSchedule, Arc::new(CostScheduleExtractor::new()))
        .register(PdfType::TaskList, Arc::new(TaskListExtractor::new()))
        .register(PdfType::UraCircular, Arc::new(CircularExtractor::new()))
}
