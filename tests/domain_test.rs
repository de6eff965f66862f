use std::str::FromStr;

use kallang::domain::{Document, DocumentStatus, PdfType, StoragePath};

#[test]
fn given_pending_document_when_transitioning_forward_then_status_advances() {
    let mut document = Document::new(
        "costing.pdf".to_string(),
        StoragePath::from_raw("abc/costing.pdf"),
    );
    assert_eq!(document.status, DocumentStatus::Pending);

    document.transition(DocumentStatus::Extracting).unwrap();
    document.transition(DocumentStatus::Classifying).unwrap();
    document
        .transition(DocumentStatus::ExtractingEntities)
        .unwrap();
    document.transition(DocumentStatus::Embedding).unwrap();
    document.transition(DocumentStatus::Persisting).unwrap();
    document.transition(DocumentStatus::Complete).unwrap();

    assert_eq!(document.status, DocumentStatus::Complete);
}

#[test]
fn given_failed_document_when_reopened_then_the_pipeline_can_advance_again() {
    let mut document = Document::new(
        "costing.pdf".to_string(),
        StoragePath::from_raw("abc/costing.pdf"),
    );
    document.transition(DocumentStatus::Extracting).unwrap();
    document.transition(DocumentStatus::Failed).unwrap();
    assert!(document.transition(DocumentStatus::Classifying).is_err());

    document.reopen();

    assert_eq!(document.status, DocumentStatus::Pending);
    assert!(document.error_detail.is_none());
    document.transition(DocumentStatus::Extracting).unwrap();
}

#[test]
fn given_later_status_when_transitioning_backward_then_transition_is_rejected() {
    let result = DocumentStatus::Embedding.check_transition(DocumentStatus::Classifying);
    assert!(result.is_err());
}

#[test]
fn given_same_status_when_transitioning_then_transition_is_rejected() {
    let result = DocumentStatus::Extracting.check_transition(DocumentStatus::Extracting);
    assert!(result.is_err());
}

#[test]
fn given_any_non_terminal_status_when_failing_then_transition_is_allowed() {
    for status in [
        DocumentStatus::Pending,
        DocumentStatus::Extracting,
        DocumentStatus::Classifying,
        DocumentStatus::ExtractingEntities,
        DocumentStatus::Embedding,
        DocumentStatus::Persisting,
    ] {
        assert!(status.check_transition(DocumentStatus::Failed).is_ok());
    }
}

#[test]
fn given_terminal_status_when_transitioning_then_transition_is_rejected() {
    assert!(
        DocumentStatus::Complete
            .check_transition(DocumentStatus::Failed)
            .is_err()
    );
    assert!(
        DocumentStatus::Failed
            .check_transition(DocumentStatus::Extracting)
            .is_err()
    );
}

#[test]
fn given_intermediate_stages_when_skipping_forward_then_transition_is_allowed() {
    assert!(
        DocumentStatus::Pending
            .check_transition(DocumentStatus::Embedding)
            .is_ok()
    );
}

#[test]
fn given_status_string_when_parsing_then_round_trips() {
    for status in [
        DocumentStatus::Pending,
        DocumentStatus::ExtractingEntities,
        DocumentStatus::Complete,
        DocumentStatus::Failed,
    ] {
        assert_eq!(DocumentStatus::from_str(status.as_str()), Ok(status));
    }
}

#[test]
fn given_unknown_status_string_when_parsing_then_returns_error() {
    assert!(DocumentStatus::from_str("RUNNING").is_err());
}

#[test]
fn given_pdf_type_string_when_parsing_then_round_trips() {
    for pdf_type in [
        PdfType::CostSchedule,
        PdfType::TaskList,
        PdfType::UraCircular,
        PdfType::Unknown,
    ] {
        assert_eq!(PdfType::from_str(pdf_type.as_str()), Ok(pdf_type));
    }
}

#[test]
fn given_document_id_and_filename_when_building_storage_path_then_path_embeds_both() {
    let document = Document::new("plan.pdf".to_string(), StoragePath::from_raw(""));
    let path = StoragePath::new(&document.id, "plan.pdf");

    let rendered = path.as_str();
    assert!(rendered.starts_with(&document.id.as_uuid().to_string()));
    assert!(rendered.ends_with("plan.pdf"));
}

#[test]
fn given_traversal_filename_when_building_storage_path_then_only_final_segment_survives() {
    let document = Document::new("escaped.pdf".to_string(), StoragePath::from_raw(""));
    let path = StoragePath::new(&document.id, "../../../../tmp/escaped.pdf");

    assert_eq!(
        path.as_str(),
        format!("{}/escaped.pdf", document.id.as_uuid())
    );
}

#[test]
fn given_filename_of_only_dot_segments_when_building_storage_path_then_a_default_name_is_used() {
    let document = Document::new("upload.pdf".to_string(), StoragePath::from_raw(""));
    let path = StoragePath::new(&document.id, "../..");

    assert_eq!(
        path.as_str(),
        format!("{}/upload.pdf", document.id.as_uuid())
    );
}
