use crate::corpus::store::Entry;
use crate::types::reports::{CorpusStats, DocumentMetrics, SourceCount, TextSummary};

pub fn document_metrics(entry: &Entry) -> DocumentMetrics {
    DocumentMetrics {
        id: entry.id,
        words: entry.text.split_whitespace().count(),
        sentences: entry.text.matches('.').count(),
        chars: entry.text.chars().count(),
    }
}

/// Count per source: descending count, ties keep first-seen order.
pub fn source_counts(entries: &[Entry]) -> Vec<SourceCount> {
    let mut counts: Vec<SourceCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.source == entry.source) {
            Some(c) => c.count += 1,
            None => counts.push(SourceCount {
                source: entry.source,
                count: 1,
            }),
        }
    }
    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// `None` for an empty table.
pub fn compute(entries: &[Entry]) -> Option<CorpusStats> {
    if entries.is_empty() {
        return None;
    }

    let documents: Vec<DocumentMetrics> = entries.iter().map(document_metrics).collect();
    let n = documents.len() as f64;

    let total_words: usize = documents.iter().map(|m| m.words).sum();
    let total_sentences: usize = documents.iter().map(|m| m.sentences).sum();
    let total_chars: usize = documents.iter().map(|m| m.chars).sum();

    let summary = TextSummary {
        mean_words: total_words as f64 / n,
        min_words: documents.iter().map(|m| m.words).min().unwrap_or(0),
        max_words: documents.iter().map(|m| m.words).max().unwrap_or(0),
        mean_sentences: total_sentences as f64 / n,
        mean_chars: total_chars as f64 / n,
    };

    Some(CorpusStats {
        total_documents: entries.len(),
        per_source: source_counts(entries),
        documents,
        summary,
    })
}
