//! Running the builder over many documents.

use std::sync::mpsc;
use std::sync::Arc;

use threadpool::ThreadPool;

use crate::error::Skip;
use crate::record::{RawDocument, ResumeRecord, ResumeRecordBuilder};

/// Records accumulated by the caller across uploads.
#[derive(Debug, Clone, Default)]
pub struct ResumeCollection {
    records: Vec<ResumeRecord>,
}

impl ResumeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ResumeRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[ResumeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResumeRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ResumeCollection {
    type Item = &'a ResumeRecord;
    type IntoIter = std::slice::Iter<'a, ResumeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<ResumeRecord> for ResumeCollection {
    fn from_iter<I: IntoIterator<Item = ResumeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// Outcome of a batch: how many documents became records and why the rest
/// did not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub parsed: usize,
    pub skipped: Vec<(String, Skip)>,
}

impl BatchSummary {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn total(&self) -> usize {
        self.parsed + self.skipped.len()
    }

    /// Fold in documents rejected before they reached the builder.
    pub fn record_skip(&mut self, filename: impl Into<String>, reason: Skip) {
        self.skipped.push((filename.into(), reason));
    }

    fn absorb(&mut self, filename: &str, result: Result<ResumeRecord, Skip>, into: &mut ResumeCollection) {
        match result {
            Ok(record) => {
                tracing::debug!(file = %filename, "parsed");
                into.push(record);
                self.parsed += 1;
            }
            Err(reason) => {
                tracing::info!(file = %filename, %reason, "skipped");
                self.skipped.push((filename.to_string(), reason));
            }
        }
    }
}

/// Process documents one after another, appending records to `into`.
pub fn process_batch(
    builder: &ResumeRecordBuilder,
    docs: &[RawDocument],
    into: &mut ResumeCollection,
) -> BatchSummary {
    let mut summary = BatchSummary::default();
    for doc in docs {
        summary.absorb(&doc.filename, builder.build(doc), into);
    }
    summary
}

/// Process documents on a pool of `workers` threads. Records are appended in
/// input order regardless of which document finishes first.
pub fn process_batch_parallel(
    builder: Arc<ResumeRecordBuilder>,
    docs: Vec<RawDocument>,
    workers: usize,
    into: &mut ResumeCollection,
) -> BatchSummary {
    let total = docs.len();
    let pool = ThreadPool::new(workers.max(1));
    let (tx, rx) = mpsc::channel();

    for (idx, doc) in docs.into_iter().enumerate() {
        let builder = Arc::clone(&builder);
        let tx = tx.clone();
        pool.execute(move || {
            let result = builder.build(&doc);
            // Receiver only goes away if the caller stopped collecting.
            let _ = tx.send((idx, doc.filename, result));
        });
    }
    drop(tx);

    let mut results: Vec<_> = rx.iter().collect();
    if results.len() < total {
        tracing::warn!(expected = total, received = results.len(), "worker lost documents");
    }
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut summary = BatchSummary::default();
    for (_, filename, result) in results {
        summary.absorb(&filename, result, into);
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;
    use crate::extract::TextBackend;

    /// Treats the document bytes as already-extracted UTF-8 text.
    struct PlainBytes;

    impl TextBackend for PlainBytes {
        fn pdf_pages(&self, bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
            Ok(vec![String::from_utf8_lossy(bytes).into_owned()])
        }

        fn docx_paragraphs(&self, _: &[u8]) -> Result<Vec<String>, ExtractError> {
            Err(ExtractError::Docx("corrupt".into()))
        }
    }

    fn builder() -> ResumeRecordBuilder {
        ResumeRecordBuilder::default().with_backend(Box::new(PlainBytes))
    }

    fn docs() -> Vec<RawDocument> {
        vec![
            RawDocument::new("a.pdf", "Alice\n3 years of experience"),
            RawDocument::new("b.txt", "Bob"),
            RawDocument::new("c.docx", "whatever"),
            RawDocument::new("d.pdf", ""),
            RawDocument::new("e.PDF", "Eve\n8 years"),
        ]
    }

    #[test]
    fn bad_documents_do_not_stop_the_batch() {
        let mut collection = ResumeCollection::new();
        let summary = process_batch(&builder(), &docs(), &mut collection);

        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.total(), 5);
        assert_eq!(
            summary.skipped,
            vec![
                ("b.txt".to_string(), Skip::UnsupportedFormat("b.txt".into())),
                ("c.docx".to_string(), Skip::NoText),
                ("d.pdf".to_string(), Skip::NoText),
            ]
        );
        let names: Vec<_> = collection.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Eve"]);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut sequential = ResumeCollection::new();
        let expected = process_batch(&builder(), &docs(), &mut sequential);

        let mut parallel = ResumeCollection::new();
        let summary = process_batch_parallel(Arc::new(builder()), docs(), 3, &mut parallel);

        assert_eq!(summary, expected);
        assert_eq!(parallel.records(), sequential.records());
    }

    #[test]
    fn collections_accumulate_duplicates() {
        let mut collection = ResumeCollection::new();
        let b = builder();
        process_batch(&b, &docs()[..1], &mut collection);
        process_batch(&b, &docs()[..1], &mut collection);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.records()[0], collection.records()[1]);

        collection.clear();
        assert!(collection.is_empty());
    }
}
