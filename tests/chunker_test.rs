use docquery::application::ports::{TextSplitter, TextSplitterError};
use docquery::domain::DocumentId;
use docquery::infrastructure::text_processing::OverlapSplitter;

const SMALL_CHUNK_SIZE: usize = 10;
const SMALL_OVERLAP: usize = 2;
const POLICY_CHUNK_SIZE: usize = 1000;
const POLICY_OVERLAP: usize = 100;

#[tokio::test]
async fn given_long_text_when_split_then_creates_fixed_size_chunks_with_sequential_ids() {
    let splitter = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP).unwrap();
    let text = "abcdefghijklmnopqrstuvwxyz";
    let doc_id = DocumentId::new();

    let chunks = splitter.split(text, doc_id).await.unwrap();

    assert_eq!(chunks.len(), 3);
    for (position, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.id.value(), position as u64);
        assert_eq!(chunk.document_id, doc_id);
        assert!(chunk.text.chars().count() <= SMALL_CHUNK_SIZE);
    }
    assert_eq!(chunks[0].offset, 0);
    assert_eq!(chunks[1].offset, SMALL_CHUNK_SIZE - SMALL_OVERLAP);
    assert_eq!(chunks[2].offset, 2 * (SMALL_CHUNK_SIZE - SMALL_OVERLAP));
}

#[tokio::test]
async fn given_any_valid_config_when_split_then_chunks_cover_original_text_without_gaps() {
    let splitter = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP).unwrap();
    let text = "The policy covers accidental damage but excludes wear and tear entirely.";
    let doc_id = DocumentId::new();

    let chunks = splitter.split(text, doc_id).await.unwrap();

    let mut reconstructed: String = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        reconstructed.extend(chunk.text.chars().skip(SMALL_OVERLAP));
    }

    assert_eq!(reconstructed, text);
}

#[tokio::test]
async fn given_consecutive_chunks_when_split_then_they_share_the_overlap_window() {
    let splitter = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP).unwrap();
    let text = "abcdefghijklmnopqrstuvwxyz";
    let doc_id = DocumentId::new();

    let chunks = splitter.split(text, doc_id).await.unwrap();

    for pair in chunks.windows(2) {
        let prev_tail: String = pair[0]
            .text
            .chars()
            .skip(pair[0].text.chars().count() - SMALL_OVERLAP)
            .collect();
        let next_head: String = pair[1].text.chars().take(SMALL_OVERLAP).collect();
        assert_eq!(prev_tail, next_head);
    }
}

#[tokio::test]
async fn given_empty_text_when_split_then_returns_no_chunks() {
    let splitter = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP).unwrap();
    let doc_id = DocumentId::new();

    let chunks = splitter.split("", doc_id).await.unwrap();

    assert!(chunks.is_empty());
}

#[tokio::test]
async fn given_text_shorter_than_chunk_size_when_split_then_returns_single_chunk() {
    let splitter = OverlapSplitter::new(POLICY_CHUNK_SIZE, POLICY_OVERLAP).unwrap();
    let text = "The grace period is thirty days.";
    let doc_id = DocumentId::new();

    let chunks = splitter.split(text, doc_id).await.unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, text);
    assert_eq!(chunks[0].offset, 0);
}

#[tokio::test]
async fn given_multibyte_text_when_split_then_respects_char_boundaries() {
    let splitter = OverlapSplitter::new(5, 1).unwrap();
    let text = "héllo wörld çafé time";
    let doc_id = DocumentId::new();

    let chunks = splitter.split(text, doc_id).await.unwrap();

    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 5);
    }

    let mut reconstructed: String = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        reconstructed.extend(chunk.text.chars().skip(1));
    }
    assert_eq!(reconstructed, text);
}

#[test]
fn given_overlap_equal_to_chunk_size_when_constructed_then_fails_with_invalid_configuration() {
    let result = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_CHUNK_SIZE);

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

#[test]
fn given_overlap_larger_than_chunk_size_when_constructed_then_fails_with_invalid_configuration() {
    let result = OverlapSplitter::new(SMALL_CHUNK_SIZE, SMALL_CHUNK_SIZE + 5);

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}

#[test]
fn given_zero_chunk_size_when_constructed_then_fails_with_invalid_configuration() {
    let result = OverlapSplitter::new(0, 0);

    assert!(matches!(
        result,
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
}
