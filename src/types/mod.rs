pub mod identifiers;
pub mod reports;

pub use identifiers::{EntryId, Source, UnknownSource};
pub use reports::{
    CleanReport, CorpusStats, DocumentMetrics, Outcome, SampleEntry, SaveReport, SourceCount,
    TextSummary,
};
