//! The brand search pipeline: collect, process, generate insights, persist.
//!
//! Collection and processing failures end the search. Insight generation and
//! persistence are best-effort and report a [`StepOutcome`] instead.
//!
//! [`StepOutcome`]: sociallens_core::StepOutcome

pub mod error;
pub mod pipeline;
pub mod services;

pub use error::{SearchError, WiringError};
pub use pipeline::{SearchPipeline, SearchReport};
pub use services::{build_pipeline, PipelineOptions};
