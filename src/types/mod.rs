//! Data types for the research pipeline.

pub mod batch;
pub mod config;
pub mod report;
pub mod subject;
pub mod validation;

pub use batch::BatchResult;
pub use config::{BatchConfig, CollectorConfig};
pub use report::{ClaimVerdict, FinalReport, PhaseRecord, ResearchAnswer};
pub use subject::Subject;
pub use validation::{
    CrossReference, TemporalConsistency, TrendDirection, ValidationResult,
    CROSS_REFERENCE_WEIGHT, HIGH_CONFIDENCE_THRESHOLD, TEMPORAL_WEIGHT, VALIDITY_THRESHOLD,
};
