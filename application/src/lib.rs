//! Application layer for team-align
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::AnalysisParams;
pub use ports::{
    analysis_log::{AnalysisEvent, AnalysisLog, NoAnalysisLog},
    completion_gateway::{CompletionError, CompletionGateway, CompletionRequest, StreamHandle},
    embedding_gateway::{EmbeddingError, EmbeddingGateway},
    progress::{AnalysisPhase, NoProgress, ProgressNotifier},
    store::{ConsensusStore, ProjectStore, ResponseStore, SectionStore, StoreError},
};
pub use use_cases::alignment_overview::{AlignmentOverviewError, AlignmentOverviewUseCase};
pub use use_cases::detect_conflict::{
    DetectConflictError, DetectConflictInput, DetectConflictUseCase,
};
pub use use_cases::export_prd::{ExportPrdError, ExportPrdUseCase};
pub use use_cases::generate_questions::{
    GenerateQuestionsInput, GenerateQuestionsUseCase, QuestionSet,
};
pub use use_cases::init_workspace::{InitWorkspaceError, InitWorkspaceUseCase};
pub use use_cases::review_consensus::{ReviewConsensusError, ReviewConsensusUseCase};
pub use use_cases::submit_response::{
    SubmitOutcome, SubmitResponseError, SubmitResponseInput, SubmitResponseUseCase,
};
pub use use_cases::synthesize_consensus::{
    SynthesizeConsensusError, SynthesizeConsensusUseCase,
};
