//! Batch orchestration over ordered path lists.
//!
//! Phase 1 runs extraction and analysis per document on blocking workers;
//! per-item failures become error outcomes without halting the batch.
//! Phase 2 compares every unordered pair of successes and fills the
//! semantic similarity matrix. Progress is emitted as events; the batch
//! itself never fails because of a single document.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::mpsc;

use crate::analysis::DocumentAnalyzer;
use crate::compare::DocumentComparator;
use crate::config::Settings;
use crate::extract::DocumentExtractor;
use crate::models::{
    batch_id, AnalysisResult, BatchInsights, BatchResult, ComparativeAnalysis, DocumentOutcome,
    DocumentRecord, OutcomeStatus, QualityAssessment,
};

/// Events emitted while a batch runs.
/// Fields are populated when events are created, even if consumers don't
/// read all of them.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    /// Batch accepted; phase 1 starting.
    BatchStarted { total_documents: usize },
    /// Extraction+analysis started for one document.
    DocumentStarted { index: usize, path: PathBuf },
    /// One document finished successfully.
    DocumentCompleted {
        index: usize,
        path: PathBuf,
        category: String,
        word_count: usize,
    },
    /// One document failed; the batch continues.
    DocumentFailed {
        index: usize,
        path: PathBuf,
        error: String,
    },
    /// Phase 1 done.
    AnalysisPhaseComplete { succeeded: usize, failed: usize },
    /// Phase 2 starting over all unordered pairs of successes.
    ComparisonPhaseStarted { total_pairs: usize },
    /// One pair compared.
    PairCompared {
        file_a: String,
        file_b: String,
        overall: f64,
    },
    /// Batch finished.
    BatchCompleted { elapsed_ms: u64 },
}

/// One successfully analyzed document, kept for the comparison phase.
struct AnalyzedDocument {
    record: Arc<DocumentRecord>,
    analysis: Arc<AnalysisResult>,
}

/// Runs the full pipeline over an ordered list of paths.
pub struct BatchOrchestrator {
    extractor: Arc<DocumentExtractor>,
    analyzer: Arc<DocumentAnalyzer>,
    comparator: Arc<DocumentComparator>,
    settings: Settings,
    workers: usize,
}

impl BatchOrchestrator {
    pub fn new(
        extractor: Arc<DocumentExtractor>,
        analyzer: Arc<DocumentAnalyzer>,
        comparator: Arc<DocumentComparator>,
        settings: Settings,
    ) -> Self {
        let workers = settings.workers.max(1);
        Self {
            extractor,
            analyzer,
            comparator,
            settings,
            workers,
        }
    }

    /// Analyze a batch of documents.
    ///
    /// Always returns one outcome per input path, in input order, no matter
    /// how many items fail. Event sends ignore a dropped receiver.
    pub async fn analyze_batch(
        &self,
        paths: &[PathBuf],
        event_tx: mpsc::Sender<BatchEvent>,
    ) -> BatchResult {
        let started = Instant::now();
        let started_at = Utc::now();

        let _ = event_tx
            .send(BatchEvent::BatchStarted {
                total_documents: paths.len(),
            })
            .await;

        let (outcomes, analyzed, processing_errors) = self.run_analysis_phase(paths, &event_tx).await;

        let succeeded = analyzed.len();
        let _ = event_tx
            .send(BatchEvent::AnalysisPhaseComplete {
                succeeded,
                failed: paths.len() - succeeded,
            })
            .await;

        let comparative = if succeeded > 1 {
            Some(self.run_comparison_phase(&analyzed, &event_tx).await)
        } else {
            None
        };

        let insights = build_insights(&analyzed, &self.settings);

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let _ = event_tx
            .send(BatchEvent::BatchCompleted { elapsed_ms })
            .await;

        tracing::info!(
            "batch of {} documents completed in {}ms ({} succeeded)",
            paths.len(),
            elapsed_ms,
            succeeded
        );

        BatchResult {
            batch_id: batch_id(paths),
            started_at,
            document_count: paths.len(),
            documents: outcomes,
            comparative,
            insights,
            processing_errors,
            elapsed_ms,
        }
    }

    /// Phase 1: extract and analyze every path on blocking workers.
    async fn run_analysis_phase(
        &self,
        paths: &[PathBuf],
        event_tx: &mpsc::Sender<BatchEvent>,
    ) -> (Vec<DocumentOutcome>, Vec<AnalyzedDocument>, Vec<String>) {
        let mut slots: Vec<Option<(DocumentOutcome, Option<AnalyzedDocument>)>> =
            (0..paths.len()).map(|_| None).collect();

        let mut handles = Vec::with_capacity(self.workers);

        for (index, path) in paths.iter().cloned().enumerate() {
            let extractor = self.extractor.clone();
            let analyzer = self.analyzer.clone();
            let event_tx = event_tx.clone();

            let handle = tokio::task::spawn_blocking(move || {
                let _ = futures::executor::block_on(event_tx.send(BatchEvent::DocumentStarted {
                    index,
                    path: path.clone(),
                }));

                let (outcome, analyzed) = process_document(&extractor, &analyzer, &path);

                let event = match &outcome.status {
                    OutcomeStatus::Success => BatchEvent::DocumentCompleted {
                        index,
                        path: path.clone(),
                        category: outcome
                            .category
                            .map(|c| c.as_str().to_string())
                            .unwrap_or_default(),
                        word_count: outcome.word_count.unwrap_or(0),
                    },
                    OutcomeStatus::Error => BatchEvent::DocumentFailed {
                        index,
                        path: path.clone(),
                        error: outcome.error.clone().unwrap_or_default(),
                    },
                };
                let _ = futures::executor::block_on(event_tx.send(event));

                (index, outcome, analyzed)
            });

            handles.push(handle);

            if handles.len() >= self.workers {
                for handle in handles.drain(..) {
                    collect_slot(handle.await, &mut slots);
                }
            }
        }

        for handle in handles {
            collect_slot(handle.await, &mut slots);
        }

        let mut outcomes = Vec::with_capacity(paths.len());
        let mut analyzed = Vec::new();
        let mut errors = Vec::new();

        for (index, slot) in slots.into_iter().enumerate() {
            let (outcome, pair) = slot.unwrap_or_else(|| {
                // A panicked worker still yields an outcome for its slot.
                (
                    DocumentOutcome::error(paths[index].clone(), "worker failed".to_string()),
                    None,
                )
            });
            if let Some(error) = &outcome.error {
                errors.push(format!(
                    "Error processing {}: {}",
                    outcome.path.display(),
                    error
                ));
            }
            if let Some(pair) = pair {
                analyzed.push(pair);
            }
            outcomes.push(outcome);
        }

        (outcomes, analyzed, errors)
    }

    /// Phase 2: compare every unordered pair of successes. Only entered
    /// once all analyses exist.
    async fn run_comparison_phase(
        &self,
        analyzed: &[AnalyzedDocument],
        event_tx: &mpsc::Sender<BatchEvent>,
    ) -> ComparativeAnalysis {
        let n = analyzed.len();
        let total_pairs = n * (n - 1) / 2;

        let _ = event_tx
            .send(BatchEvent::ComparisonPhaseStarted { total_pairs })
            .await;

        let mut matrix = vec![vec![0.0f64; n]; n];
        for (i, row) in matrix.iter_mut().enumerate() {
            row[i] = 1.0;
        }

        let mut handles = Vec::with_capacity(self.workers);
        let mut results: Vec<(usize, usize, f64)> = Vec::with_capacity(total_pairs);

        for i in 0..n {
            for j in (i + 1)..n {
                let comparator = self.comparator.clone();
                let record_a = analyzed[i].record.clone();
                let analysis_a = analyzed[i].analysis.clone();
                let record_b = analyzed[j].record.clone();
                let analysis_b = analyzed[j].analysis.clone();
                let event_tx = event_tx.clone();

                let handle = tokio::task::spawn_blocking(move || {
                    let comparison =
                        comparator.compare(&record_a, &analysis_a, &record_b, &analysis_b);

                    let _ = futures::executor::block_on(event_tx.send(BatchEvent::PairCompared {
                        file_a: record_a.file_name.clone(),
                        file_b: record_b.file_name.clone(),
                        overall: comparison.scores.overall(),
                    }));

                    (i, j, comparison.scores.semantic)
                });

                handles.push(handle);

                if handles.len() >= self.workers {
                    for handle in handles.drain(..) {
                        if let Ok(result) = handle.await {
                            results.push(result);
                        }
                    }
                }
            }
        }

        for handle in handles {
            if let Ok(result) = handle.await {
                results.push(result);
            }
        }

        for (i, j, semantic) in results {
            matrix[i][j] = semantic;
            matrix[j][i] = semantic;
        }

        let mut type_distribution = std::collections::BTreeMap::new();
        for doc in analyzed {
            *type_distribution
                .entry(doc.analysis.category.as_str().to_string())
                .or_insert(0) += 1;
        }

        ComparativeAnalysis {
            similarity_matrix: matrix,
            type_distribution,
        }
    }
}

/// Extract and analyze one document; strategy failures and hard errors
/// both become error outcomes.
fn process_document(
    extractor: &DocumentExtractor,
    analyzer: &DocumentAnalyzer,
    path: &PathBuf,
) -> (DocumentOutcome, Option<AnalyzedDocument>) {
    let record = match extractor.extract(path) {
        Ok(record) => record,
        Err(e) => {
            return (DocumentOutcome::error(path.clone(), e.to_string()), None);
        }
    };

    if let Some(error) = &record.error {
        return (DocumentOutcome::error(path.clone(), error.clone()), None);
    }

    let analysis = Arc::new(analyzer.analyze(&record));

    let outcome = DocumentOutcome {
        path: path.clone(),
        status: OutcomeStatus::Success,
        fingerprint: Some(record.fingerprint.clone()),
        category: Some(analysis.category),
        word_count: Some(analysis.stats.word_count),
        error: None,
    };

    (outcome, Some(AnalyzedDocument { record, analysis }))
}

fn collect_slot(
    joined: Result<(usize, DocumentOutcome, Option<AnalyzedDocument>), tokio::task::JoinError>,
    slots: &mut [Option<(DocumentOutcome, Option<AnalyzedDocument>)>],
) {
    match joined {
        Ok((index, outcome, analyzed)) => {
            slots[index] = Some((outcome, analyzed));
        }
        Err(e) => {
            tracing::error!("batch worker panicked: {}", e);
        }
    }
}

/// Aggregate insights over successful documents.
fn build_insights(analyzed: &[AnalyzedDocument], settings: &Settings) -> BatchInsights {
    let mut insights = BatchInsights {
        total_documents: analyzed.len(),
        ..Default::default()
    };

    if analyzed.is_empty() {
        return insights;
    }

    let mut readability_scores = Vec::new();
    let mut word_counts = Vec::new();

    for doc in analyzed {
        let stats = &doc.analysis.stats;
        word_counts.push(stats.word_count);
        insights.total_words += stats.word_count;

        if stats.readability > 0.0 {
            readability_scores.push(stats.readability);
        }

        *insights
            .document_types
            .entry(doc.analysis.category.as_str().to_string())
            .or_insert(0) += 1;
    }

    if !readability_scores.is_empty() {
        insights.average_readability =
            readability_scores.iter().sum::<f64>() / readability_scores.len() as f64;
    }
    insights.average_word_count = insights.total_words as f64 / word_counts.len() as f64;

    insights.quality = QualityAssessment {
        good_readability: readability_scores
            .iter()
            .filter(|r| **r > settings.good_readability_threshold)
            .count(),
        poor_readability: readability_scores
            .iter()
            .filter(|r| **r < settings.poor_readability_threshold)
            .count(),
        word_count_spread: word_counts.iter().max().copied().unwrap_or(0)
            - word_counts.iter().min().copied().unwrap_or(0),
    };

    insights
}
