use std::fmt;
use std::str::FromStr;

/// Detected document category. `Unknown` is a valid classification, not an
/// error: entity extraction becomes a no-op for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfType {
    Unknown,
    UraCircular,
    CostSchedule,
    TaskList,
}

impl PdfType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PdfType::Unknown => "unknown",
            PdfType::UraCircular => "ura_circular",
            PdfType::CostSchedule => "cost_schedule",
            PdfType::TaskList => "task_list",
        }
    }
}

impl FromStr for PdfType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unknown" => Ok(PdfType::Unknown),
            "ura_circular" => Ok(PdfType::UraCircular),
            "cost_schedule" => Ok(PdfType::CostSchedule),
            "task_list" => Ok(PdfType::TaskList),
            _ => Err(format!("Invalid pdf type: {}", s)),
        }
    }
}

impl fmt::Display for PdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
