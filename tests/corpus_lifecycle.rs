use corpus_core::corpus::{Corpus, CorpusConfig, CorpusState};
use corpus_core::types::CleanReport;
use corpus_core::{Document, EntryId, Outcome, Source};

fn make_doc(text: &str, source: Source) -> Document {
    Document::new(text, source)
}

fn ids(corpus: &Corpus) -> Vec<usize> {
    corpus.iter().map(|e| e.id.as_usize()).collect()
}

#[test]
fn invariant_construct_assigns_dense_ids() {
    let corpus = Corpus::new(vec![
        make_doc("one", Source::Discussion),
        make_doc("two", Source::Preprint),
        make_doc("three", Source::Discussion),
    ]);

    assert_eq!(corpus.len(), 3);
    assert_eq!(ids(&corpus), vec![0, 1, 2]);
    assert_eq!(corpus.get(EntryId::new(1)).unwrap().text, "two");
    assert_eq!(corpus.state(), CorpusState::Populated);
}

#[test]
fn empty_construct_is_valid() {
    let corpus = Corpus::new(Vec::new());

    assert_eq!(corpus.len(), 0);
    assert!(corpus.is_empty());
    assert_eq!(corpus.state(), CorpusState::Empty);
}

#[test]
fn scenario_clean_removes_short_and_renumbers() {
    let mut corpus = Corpus::new(vec![
        make_doc("Hello world. Nice.", Source::Discussion),
        make_doc("Hi", Source::Preprint),
    ]);
    assert_eq!(corpus.len(), 2);

    let outcome = corpus.clean(5);

    assert_eq!(
        outcome,
        Outcome::Completed(CleanReport {
            min_length: 5,
            before: 2,
            after: 1,
            removed: 1,
        })
    );
    assert_eq!(corpus.len(), 1);
    let remaining = &corpus.entries()[0];
    assert_eq!(remaining.id, EntryId::new(0));
    assert_eq!(remaining.text, "Hello world. Nice.");
}

#[test]
fn clean_boundary_removes_exact_length() {
    let mut corpus = Corpus::new(vec![
        make_doc("12345", Source::Discussion),
        make_doc("123456", Source::Discussion),
    ]);

    corpus.clean(5);

    assert_eq!(corpus.len(), 1);
    assert_eq!(corpus.entries()[0].text, "123456");
}

#[test]
fn clean_counts_characters_not_bytes() {
    // 5 characters, 10 bytes
    let mut corpus = Corpus::new(vec![make_doc("éééèè", Source::Preprint)]);

    let report = corpus.clean(5).completed().unwrap();

    assert_eq!(report.removed, 1);
}

#[test]
fn invariant_clean_renumbers_interior_gaps() {
    let mut corpus = Corpus::new(vec![
        make_doc("long enough text", Source::Discussion),
        make_doc("x", Source::Discussion),
        make_doc("another long text", Source::Preprint),
        make_doc("y", Source::Preprint),
        make_doc("third long enough one", Source::Discussion),
    ]);

    corpus.clean(3);

    assert_eq!(ids(&corpus), vec![0, 1, 2]);
    let texts: Vec<&str> = corpus.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        vec!["long enough text", "another long text", "third long enough one"]
    );
}

#[test]
fn clean_can_empty_the_corpus() {
    let mut corpus = Corpus::new(vec![make_doc("short", Source::Discussion)]);

    let outcome = corpus.clean_with(&CorpusConfig::default());

    let report = outcome.as_completed().unwrap();
    assert_eq!((report.before, report.after, report.removed), (1, 0, 1));
    assert_eq!(corpus.state(), CorpusState::Empty);
    assert!(corpus.clean(0).is_empty());
}

#[test]
fn clean_is_idempotent() {
    let mut corpus = Corpus::new(vec![
        make_doc("a reasonably long document", Source::Discussion),
        make_doc("tiny", Source::Preprint),
    ]);

    corpus.clean(10);
    let second = corpus.clean(10).completed().unwrap();

    assert_eq!(second.removed, 0);
    assert_eq!(second.before, second.after);
}

#[test]
fn to_text_joins_in_id_order() {
    let corpus = Corpus::new(vec![
        make_doc("alpha", Source::Discussion),
        make_doc("beta", Source::Preprint),
        make_doc("gamma", Source::Discussion),
    ]);

    assert_eq!(corpus.to_text(), "alpha beta gamma");
    assert_eq!(Corpus::new(Vec::new()).to_text(), "");
}

#[test]
fn sample_truncates_for_display_only() {
    let long = "ß".repeat(250);
    let corpus = Corpus::new(vec![
        make_doc(&long, Source::Preprint),
        make_doc("short", Source::Discussion),
    ]);

    let sample = corpus.sample_with(&CorpusConfig::default());

    assert_eq!(sample.len(), 2);
    assert_eq!(sample[0].text.chars().count(), 200);
    assert!(sample[0].truncated);
    assert_eq!(sample[1].text, "short");
    assert!(!sample[1].truncated);
    assert_eq!(corpus.entries()[0].text, long);
}

#[test]
fn sample_takes_first_n() {
    let docs = (0..8)
        .map(|i| make_doc(&format!("document {i}"), Source::Discussion))
        .collect();
    let corpus = Corpus::new(docs);

    let sample = corpus.sample(5, 200);
    let sampled: Vec<usize> = sample.iter().map(|s| s.id.as_usize()).collect();
    assert_eq!(sampled, vec![0, 1, 2, 3, 4]);

    assert_eq!(corpus.sample(20, 200).len(), 8);
    assert!(Corpus::new(Vec::new()).sample(5, 200).is_empty());
}

#[test]
fn documents_round_trip_through_construct() {
    let corpus = Corpus::new(vec![
        make_doc("one", Source::Discussion),
        make_doc("two", Source::Preprint),
    ]);

    let rebuilt = Corpus::new(corpus.documents());

    assert_eq!(rebuilt, corpus);
}

#[test]
fn display_names_document_count() {
    let corpus = Corpus::new(vec![make_doc("one", Source::Discussion)]);
    assert_eq!(corpus.to_string(), "Corpus(1 documents)");
}
