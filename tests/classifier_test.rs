use kallang::application::ports::Classifier;
use kallang::domain::PdfType;
use kallang::infrastructure::classification::KeywordClassifier;

const COST_SCHEDULE_TEXT: &str = "Bill of Quantities for the proposed development.\n\
    | Item | Quantity | Unit Price | Total Cost | Cost Type |\n\
    Concrete works measured per cubic metre, unit price as tendered.";

const TASK_LIST_TEXT: &str = "Project schedule rev 3.\n\
    Each task lists duration, start date and finish date.\n\
    Milestone: structural completion.";

const URA_CIRCULAR_TEXT: &str = "Urban Redevelopment Authority circular on development control.\n\
    Gross floor area (GFA) guidelines, see clause 2.1.";

#[test]
fn given_cost_schedule_text_when_classifying_then_returns_cost_schedule() {
    let classifier = KeywordClassifier::default();
    assert_eq!(classifier.classify(COST_SCHEDULE_TEXT), PdfType::CostSchedule);
}

#[test]
fn given_task_list_text_when_classifying_then_returns_task_list() {
    let classifier = KeywordClassifier::default();
    assert_eq!(classifier.classify(TASK_LIST_TEXT), PdfType::TaskList);
}

#[test]
fn given_ura_circular_text_when_classifying_then_returns_ura_circular() {
    let classifier = KeywordClassifier::default();
    assert_eq!(classifier.classify(URA_CIRCULAR_TEXT), PdfType::UraCircular);
}

#[test]
fn given_unrelated_text_when_classifying_then_returns_unknown() {
    let classifier = KeywordClassifier::default();
    let text = "Minutes of the annual general meeting. Attendance was recorded.";
    assert_eq!(classifier.classify(text), PdfType::Unknown);
}

#[test]
fn given_empty_text_when_classifying_then_returns_unknown() {
    let classifier = KeywordClassifier::default();
    assert_eq!(classifier.classify(""), PdfType::Unknown);
}

#[test]
fn given_mixed_case_text_when_classifying_then_matching_is_case_insensitive() {
    let classifier = KeywordClassifier::default();
    let text = "BILL OF QUANTITIES. UNIT PRICE per item. TOTAL COST summary.";
    assert_eq!(classifier.classify(text), PdfType::CostSchedule);
}

#[test]
fn given_same_text_when_classifying_twice_then_verdict_is_identical() {
    let classifier = KeywordClassifier::default();
    assert_eq!(
        classifier.classify(COST_SCHEDULE_TEXT),
        classifier.classify(COST_SCHEDULE_TEXT)
    );
}

#[test]
fn given_keyword_spam_when_classifying_then_repetition_does_not_dominate() {
    // "cost" repeated alone scores at most 3 * 0.5, under the threshold.
    let classifier = KeywordClassifier::default();
    let text = "cost cost cost cost cost cost cost cost cost cost";
    assert_eq!(classifier.classify(text), PdfType::Unknown);
}
