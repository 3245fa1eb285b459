use corpus_core::corpus::CorpusConfig;
use corpus_core::document::{DisplayMetadata, Timestamp};
use corpus_core::types::CleanReport;
use corpus_core::{Corpus, Document, Outcome, Source};
use serde_json::{json, Value};

#[test]
fn golden_document_serialization() {
    let doc = Document::new("Some text", Source::Preprint).with_metadata(DisplayMetadata {
        title: Some("Title".to_string()),
        author: Some("Unknown".to_string()),
        timestamp: Some(Timestamp::Published("2024-01-01T00:00:00Z".to_string())),
        url: Some("http://arxiv.org/abs/1".to_string()),
    });

    let json_str = serde_json::to_string(&doc).unwrap();

    // "text" -> "source" -> "metadata"
    let text_pos = json_str.find("\"text\":").unwrap();
    let src_pos = json_str.find("\"source\":").unwrap();
    let meta_pos = json_str.find("\"metadata\":").unwrap();
    assert!(text_pos < src_pos);
    assert!(src_pos < meta_pos);

    let value: Value = serde_json::from_str(&json_str).unwrap();
    assert_eq!(value["source"], "preprint");
    assert_eq!(value["metadata"]["timestamp"], "2024-01-01T00:00:00Z");

    let back: Document = serde_json::from_str(&json_str).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn bare_document_omits_metadata() {
    let doc = Document::new("plain", Source::Discussion);

    let value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value, json!({"text": "plain", "source": "discussion"}));
}

#[test]
fn epoch_timestamp_serializes_as_number() {
    let meta = DisplayMetadata {
        timestamp: Some(Timestamp::Epoch(1_700_000_000.5)),
        ..DisplayMetadata::new()
    };

    let value = serde_json::to_value(&meta).unwrap();

    assert_eq!(value["timestamp"], json!(1_700_000_000.5));
    let back: DisplayMetadata = serde_json::from_value(value).unwrap();
    assert_eq!(back, meta);
}

#[test]
fn golden_outcome_serialization() {
    let done: Outcome<CleanReport> = Outcome::Completed(CleanReport {
        min_length: 20,
        before: 3,
        after: 2,
        removed: 1,
    });
    let empty: Outcome<CleanReport> = Outcome::Empty;

    assert_eq!(
        serde_json::to_value(&done).unwrap(),
        json!({
            "status": "completed",
            "report": {"min_length": 20, "before": 3, "after": 2, "removed": 1}
        })
    );
    assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"status": "empty"}));
}

#[test]
fn stats_serialize_with_entry_ids() {
    let corpus = Corpus::new(vec![Document::new("One. Two.", Source::Discussion)]);

    let stats = corpus.stats().completed().unwrap();
    let value = serde_json::to_value(&stats).unwrap();

    assert_eq!(value["total_documents"], 1);
    assert_eq!(value["per_source"][0], json!({"source": "discussion", "count": 1}));
    assert_eq!(
        value["documents"][0],
        json!({"id": 0, "words": 2, "sentences": 2, "chars": 9})
    );
}

#[test]
fn config_defaults() {
    let config = CorpusConfig::default();

    assert_eq!(config, CorpusConfig::v0());
    assert_eq!(config.min_length, 20);
    assert_eq!(config.sample_size, 5);
    assert_eq!(config.sample_width, 200);
    assert_eq!(config.normalizer.discussion_host, "https://reddit.com");
    assert_eq!(config.normalizer.unknown_author, "Unknown");
}

#[test]
fn partial_config_falls_back_to_defaults() {
    let config = CorpusConfig::from_reader(
        r#"{"min_length": 50, "normalizer": {"unknown_author": "Anonymous"}}"#.as_bytes(),
    )
    .unwrap();

    assert_eq!(config.min_length, 50);
    assert_eq!(config.sample_size, 5);
    assert_eq!(config.normalizer.unknown_author, "Anonymous");
    assert_eq!(config.normalizer.discussion_host, "https://reddit.com");
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("corpus.json");
    let mut config = CorpusConfig::v0();
    config.sample_width = 80;
    std::fs::write(&path, serde_json::to_vec_pretty(&config).unwrap()).unwrap();

    let loaded = CorpusConfig::from_json_file(&path).unwrap();

    assert_eq!(loaded, config);
}
