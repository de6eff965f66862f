use crate::application::ports::Classifier;
use crate::domain::PdfType;

/// Weighted keyword scoring over lowercased text. Deterministic: same text,
/// same verdict. A document whose best score stays under the confidence
/// threshold classifies as `Unknown`.
pub struct KeywordClassifier {
    threshold: f32,
}

/// Repeated keywords stop adding signal past this count; a cost schedule
/// that says "cost" two hundred times is not two hundred times more likely
/// to be one.
const MAX_OCCURRENCES: usize = 3;

const URA_CIRCULAR_KEYWORDS: &[(&str, f32)] = &[
    ("urban redevelopment authority", 3.0),
    ("development control", 2.0),
    ("gross floor area", 2.5),
    ("circular", 2.0),
    ("gfa", 1.5),
    ("clause", 1.0),
    ("guidelines", 1.0),
];

const COST_SCHEDULE_KEYWORDS: &[(&str, f32)] = &[
    ("bill of quantities", 3.0),
    ("unit price", 2.0),
    ("total cost", 2.0),
    ("cost type", 2.0),
    ("quantity", 1.5),
    ("cost", 0.5),
];

const TASK_LIST_KEYWORDS: &[(&str, f32)] = &[
    ("duration", 2.0),
    ("start date", 2.0),
    ("finish date", 2.0),
    ("milestone", 1.5),
    ("task", 1.0),
    ("schedule", 1.0),
];

impl KeywordClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    fn score(text: &str, keywords: &[(&str, f32)]) -> f32 {
        keywords
            .iter()
            .map(|(keyword, weight)| {
                let occurrences = text.matches(keyword).count().min(MAX_OCCURRENCES);
                occurrences as f32 * weight
            })
            .sum()
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(3.0)
    }
}

impl Classifier for KeywordClassifier {
    fn classify(&self, text: &str) -> PdfType {
        let lowered = text.to_lowercase();

        let candidates = [
            (PdfType::UraCircular, Self::score(&lowered, URA_CIRCULAR_KEYWORDS)),
            (PdfType::CostSchedule, Self::score(&lowered, COST_SCHEDULE_KEYWORDS)),
            (PdfType::TaskList, Self::score(&lowered, TASK_LIST_KEYWORDS)),
        ];

        let mut best = (PdfType::Unknown, self.threshold);
        for (pdf_type, score) in candidates {
            // Strictly greater keeps ties resolved by the fixed candidate
            // order above, so classification stays deterministic.
            if score > best.1 {
                best = (pdf_type, score);
            }
        }

        tracing::debug!(
            ura = candidates[0].1,
            cost = candidates[1].1,
            task = candidates[2].1,
            verdict = %best.0,
            "classification scores"
        );
        best.0
    }
}
