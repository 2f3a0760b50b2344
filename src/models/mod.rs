//! Data models for the extraction, analysis, comparison, and batch stages.

mod analysis;
mod batch;
mod comparison;
mod document;

pub use analysis::{
    AnalysisResult, DocumentCategory, Entity, Sentiment, SentimentLabel, TextStats,
};
pub use batch::{
    batch_id, BatchInsights, BatchResult, ComparativeAnalysis, DocumentOutcome, OutcomeStatus,
    QualityAssessment,
};
pub use comparison::{
    comparison_id, CommonElements, ComparisonResult, Differences, DocumentIdentity,
    SimilarityScores,
};
pub use document::{DocumentRecord, DocumentType, DocumentUnit, ExtractionMethod};
