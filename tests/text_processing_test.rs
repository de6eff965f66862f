use kallang::application::ports::{SplitterConfigError, TextSplitter};
use kallang::domain::DocumentId;
use kallang::infrastructure::text_processing::{SlidingWindowSplitter, sanitize_extracted_text};

const CHUNK_SIZE: usize = 20;
const OVERLAP: usize = 5;

#[test]
fn given_zero_chunk_size_when_building_splitter_then_construction_fails() {
    let result = SlidingWindowSplitter::new(0, 0);
    assert!(matches!(result, Err(SplitterConfigError::ZeroChunkSize)));
}

#[test]
fn given_overlap_equal_to_chunk_size_when_building_splitter_then_construction_fails() {
    let result = SlidingWindowSplitter::new(10, 10);
    assert!(matches!(
        result,
        Err(SplitterConfigError::OverlapTooLarge { .. })
    ));
}

#[test]
fn given_empty_text_when_splitting_then_returns_no_chunks() {
    let splitter = SlidingWindowSplitter::new(CHUNK_SIZE, OVERLAP).unwrap();
    assert!(splitter.split("", DocumentId::new()).is_empty());
}

#[test]
fn given_short_text_when_splitting_then_returns_single_chunk() {
    let splitter = SlidingWindowSplitter::new(CHUNK_SIZE, OVERLAP).unwrap();
    let chunks = splitter.split("short text", DocumentId::new());

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "short text");
    assert_eq!(chunks[0].index, 0);
    assert_eq!(chunks[0].offset, 0);
}

#[test]
fn given_long_text_when_splitting_then_chunks_cover_the_full_input() {
    let splitter = SlidingWindowSplitter::new(CHUNK_SIZE, OVERLAP).unwrap();
    let text: String = ('a'..='z').cycle().take(100).collect();
    let chunks = splitter.split(&text, DocumentId::new());

    assert!(chunks.len() > 1);
    // Consecutive windows share exactly the configured overlap, so dropping
    // the first `overlap` chars of every later chunk reconstructs the input.
    let mut rebuilt = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        rebuilt.push_str(&chunk.text.chars().skip(OVERLAP).collect::<String>());
    }
    assert_eq!(rebuilt, text);
}

#[test]
fn given_long_text_when_splitting_then_indices_and_offsets_are_sequential() {
    let splitter = SlidingWindowSplitter::new(CHUNK_SIZE, OVERLAP).unwrap();
    let text = "x".repeat(75);
    let chunks = splitter.split(&text, DocumentId::new());

    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert_eq!(chunk.offset, i * (CHUNK_SIZE - OVERLAP));
    }
}

#[test]
fn given_same_text_when_splitting_twice_then_output_is_identical() {
    let splitter = SlidingWindowSplitter::new(CHUNK_SIZE, OVERLAP).unwrap();
    let id = DocumentId::new();
    let text = "deterministic splitting matters for idempotent vector ids".repeat(3);

    assert_eq!(splitter.split(&text, id), splitter.split(&text, id));
}

#[test]
fn given_hyphenated_line_break_when_sanitizing_then_word_is_rejoined() {
    let cleaned = sanitize_extracted_text("guidelines on construc-\ntion costing");
    assert!(cleaned.contains("construction"));
}

#[test]
fn given_whitespace_runs_when_sanitizing_then_runs_collapse_to_single_spaces() {
    let cleaned = sanitize_extracted_text("a  \t  b\u{a0}\u{a0}c");
    assert_eq!(cleaned, "a b c");
}

#[test]
fn given_many_blank_lines_when_sanitizing_then_paragraphs_separate_by_one_blank_line() {
    let cleaned = sanitize_extracted_text("first paragraph\n\n\n\n\nsecond paragraph");
    assert_eq!(cleaned, "first paragraph\n\nsecond paragraph");
}

#[test]
fn given_fullwidth_characters_when_sanitizing_then_text_is_nfkc_normalized() {
    // Fullwidth digits compose to ASCII under NFKC.
    let cleaned = sanitize_extracted_text("ＧＦＡ ｃａｐ １０％");
    assert_eq!(cleaned, "GFA cap 10%");
}
